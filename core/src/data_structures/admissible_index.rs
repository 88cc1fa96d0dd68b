//! Per-vertex lists of admissible edges
//!
//! An edge is admissible from an endpoint when it has positive residual in
//! the direction leaving that endpoint and the endpoint is strictly higher
//! than the far one. At most one endpoint can satisfy this at a time, so
//! every edge is listed under at most one vertex: the lists are a single
//! family of disjoint intrusive lists keyed by vertex.

use crate::algorithm::traits::{EdgeId, NodeId};
use crate::data_structures::indexed_lists::IndexedLists;

/// Incrementally maintained admissible-edge lists
#[derive(Debug, Clone)]
pub struct AdmissibleIndex {
    lists: IndexedLists,
}

impl AdmissibleIndex {
    /// Creates empty lists for `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            lists: IndexedLists::new(vertex_count, 0),
        }
    }

    /// Starts tracking a newly inserted edge, initially listed nowhere
    pub fn track_edge(&mut self) -> EdgeId {
        self.lists.add_item()
    }

    /// Vertex the edge is currently listed under
    #[inline]
    pub fn owner(&self, edge: EdgeId) -> Option<NodeId> {
        self.lists.list_of(edge)
    }

    /// Any admissible edge of `vertex`
    #[inline]
    pub fn first(&self, vertex: NodeId) -> Option<EdgeId> {
        self.lists.first(vertex)
    }

    #[inline]
    pub fn count(&self, vertex: NodeId) -> usize {
        self.lists.len(vertex)
    }

    /// Admissible edges of `vertex`
    pub fn edges_of(&self, vertex: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.lists.iter(vertex)
    }

    /// Lists `edge` under `owner`, or under no vertex for `None`.
    pub fn assign(&mut self, edge: EdgeId, owner: Option<NodeId>) {
        match owner {
            Some(vertex) => self.lists.move_to(vertex, edge),
            None => {
                self.lists.remove(edge);
            }
        }
    }
}
