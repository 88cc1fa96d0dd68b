//! Arena-backed intrusive doubly-linked lists
//!
//! A fixed family of lists over a growable set of items, where every item
//! belongs to at most one list at a time. Links live in a vector indexed by
//! item, so an item's position is its own index: insertion, removal and
//! membership queries are O(1) and survive any reallocation of the arena.
//!
//! # Invariants
//! - `owner[item] == Some(list)` iff `item` is reachable from `heads[list]`
//! - `lengths[list]` equals the number of items reachable from `heads[list]`

/// Doubly-linked position of one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Link {
    prev: Option<usize>,
    next: Option<usize>,
}

/// Family of disjoint intrusive lists
#[derive(Debug, Clone, Default)]
pub struct IndexedLists {
    /// First item of every list
    heads: Vec<Option<usize>>,
    /// Number of items in every list
    lengths: Vec<usize>,
    /// Per-item links
    links: Vec<Link>,
    /// List currently holding each item
    owner: Vec<Option<usize>>,
}

impl IndexedLists {
    /// Creates `list_count` empty lists over `item_count` detached items
    pub fn new(list_count: usize, item_count: usize) -> Self {
        Self {
            heads: vec![None; list_count],
            lengths: vec![0; list_count],
            links: vec![Link::default(); item_count],
            owner: vec![None; item_count],
        }
    }

    /// Registers one more detached item and returns its index
    pub fn add_item(&mut self) -> usize {
        self.links.push(Link::default());
        self.owner.push(None);
        self.links.len() - 1
    }

    #[inline]
    pub fn list_count(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.links.len()
    }

    /// List holding `item`, if any
    #[inline]
    pub fn list_of(&self, item: usize) -> Option<usize> {
        self.owner[item]
    }

    #[inline]
    pub fn contains(&self, item: usize) -> bool {
        self.owner[item].is_some()
    }

    #[inline]
    pub fn first(&self, list: usize) -> Option<usize> {
        self.heads[list]
    }

    #[inline]
    pub fn is_empty(&self, list: usize) -> bool {
        self.heads[list].is_none()
    }

    #[inline]
    pub fn len(&self, list: usize) -> usize {
        self.lengths[list]
    }

    /// Links a detached item at the front of `list`.
    pub fn push_front(&mut self, list: usize, item: usize) {
        debug_assert!(self.owner[item].is_none(), "item {item} is already listed");

        let old_head = self.heads[list];
        self.links[item] = Link {
            prev: None,
            next: old_head,
        };
        if let Some(head) = old_head {
            self.links[head].prev = Some(item);
        }
        self.heads[list] = Some(item);
        self.owner[item] = Some(list);
        self.lengths[list] += 1;
    }

    /// Unlinks `item` and returns the list it was in.
    pub fn remove(&mut self, item: usize) -> Option<usize> {
        let list = self.owner[item].take()?;
        let Link { prev, next } = std::mem::take(&mut self.links[item]);

        match prev {
            Some(prev) => self.links[prev].next = next,
            None => self.heads[list] = next,
        }
        if let Some(next) = next {
            self.links[next].prev = prev;
        }
        self.lengths[list] -= 1;
        Some(list)
    }

    /// Moves `item` to the front of `list`, unlinking it first if needed.
    pub fn move_to(&mut self, list: usize, item: usize) {
        if self.owner[item] == Some(list) {
            return;
        }
        self.remove(item);
        self.push_front(list, item);
    }

    /// Iterates the items of `list` from front to back
    pub fn iter(&self, list: usize) -> ListIter<'_> {
        ListIter {
            lists: self,
            cursor: self.heads[list],
        }
    }
}

/// Front-to-back iterator over one list
#[derive(Debug, Clone)]
pub struct ListIter<'a> {
    lists: &'a IndexedLists,
    cursor: Option<usize>,
}

impl Iterator for ListIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor?;
        self.cursor = self.lists.links[item].next;
        Some(item)
    }
}
