//! Height-bucketed index of overflowing vertices
//!
//! Buckets are indexed by height; bucket `h` holds the vertices of height
//! `h` with positive excess. A cursor tracks the highest non-empty bucket so
//! that highest-label selection is O(1) amortized: it is raised on insertion
//! and walked down lazily when its bucket empties.

use crate::algorithm::traits::{Height, NodeId};
use crate::data_structures::indexed_lists::IndexedLists;

/// Highest-label selection structure
#[derive(Debug, Clone)]
pub struct ExcessIndex {
    buckets: IndexedLists,
    highest: Height,
    len: usize,
}

impl ExcessIndex {
    /// Creates an index for `vertex_count` vertices.
    ///
    /// Heights of overflowing vertices never exceed `2 * (vertex_count - 1)`,
    /// so `2 * vertex_count` buckets always suffice.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            buckets: IndexedLists::new(2 * vertex_count.max(1), vertex_count),
            highest: 0,
            len: 0,
        }
    }

    /// Number of height buckets
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.list_count()
    }

    /// Number of indexed vertices
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, vertex: NodeId) -> bool {
        self.buckets.contains(vertex)
    }

    /// Bucket currently holding `vertex`
    #[inline]
    pub fn height_of(&self, vertex: NodeId) -> Option<Height> {
        self.buckets.list_of(vertex)
    }

    /// The cursor: highest non-empty bucket, or 0 when the index is empty
    #[inline]
    pub fn highest_height(&self) -> Height {
        self.highest
    }

    /// A vertex of maximum height, if any vertex overflows
    #[inline]
    pub fn highest_vertex(&self) -> Option<NodeId> {
        self.buckets.first(self.highest)
    }

    /// Vertices of one bucket, most recently inserted first
    pub fn bucket(&self, height: Height) -> impl Iterator<Item = NodeId> + '_ {
        self.buckets.iter(height)
    }

    /// Inserts a vertex that is not yet indexed into bucket `height`.
    pub fn insert(&mut self, vertex: NodeId, height: Height) {
        debug_assert!(
            height < self.bucket_count(),
            "height {height} of vertex {vertex} exceeds the bucket range"
        );
        self.buckets.push_front(height, vertex);
        self.len += 1;
        if height > self.highest {
            self.highest = height;
        }
    }

    /// Removes `vertex` and lowers the cursor past empty buckets.
    pub fn remove(&mut self, vertex: NodeId) -> bool {
        if self.buckets.remove(vertex).is_none() {
            return false;
        }
        self.len -= 1;
        while self.highest > 0 && self.buckets.is_empty(self.highest) {
            self.highest -= 1;
        }
        true
    }

    /// Moves an indexed vertex to bucket `height`, raising the cursor if needed.
    pub fn relocate(&mut self, vertex: NodeId, height: Height) {
        debug_assert!(self.contains(vertex), "vertex {vertex} is not indexed");
        debug_assert!(height < self.bucket_count());
        self.buckets.move_to(height, vertex);
        if height > self.highest {
            self.highest = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = ExcessIndex::new(4);
        assert_eq!(index.bucket_count(), 8);
        assert!(index.is_empty());
        assert_eq!(index.highest_vertex(), None);
        assert_eq!(index.highest_height(), 0);
    }

    #[test]
    fn test_cursor_follows_insertions() {
        let mut index = ExcessIndex::new(6);
        index.insert(1, 0);
        assert_eq!(index.highest_vertex(), Some(1));

        index.insert(2, 3);
        index.insert(3, 1);
        assert_eq!(index.highest_height(), 3);
        assert_eq!(index.highest_vertex(), Some(2));
        assert_eq!(index.height_of(3), Some(1));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_cursor_clamps_down_on_removal() {
        let mut index = ExcessIndex::new(6);
        index.insert(1, 1);
        index.insert(2, 5);

        assert!(index.remove(2));
        assert_eq!(index.highest_height(), 1);
        assert_eq!(index.highest_vertex(), Some(1));

        assert!(index.remove(1));
        assert_eq!(index.highest_height(), 0);
        assert_eq!(index.highest_vertex(), None);
        assert!(!index.remove(1));
    }

    #[test]
    fn test_removing_lower_vertex_keeps_cursor() {
        let mut index = ExcessIndex::new(5);
        index.insert(1, 2);
        index.insert(2, 4);
        index.remove(1);
        assert_eq!(index.highest_height(), 4);
        assert_eq!(index.highest_vertex(), Some(2));
    }

    #[test]
    fn test_relocate_raises_cursor() {
        let mut index = ExcessIndex::new(5);
        index.insert(1, 2);
        index.insert(3, 2);
        index.relocate(1, 3);

        assert_eq!(index.height_of(1), Some(3));
        assert_eq!(index.highest_height(), 3);
        assert_eq!(index.bucket(2).collect::<Vec<_>>(), vec![3]);
        assert_eq!(index.len(), 2);
    }
}
