//! Arena-backed graph records and the index structures of the flow engine
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod admissible_index;
pub mod excess_index;
pub mod graph;
pub mod indexed_lists;

pub use self::admissible_index::AdmissibleIndex;
pub use self::excess_index::ExcessIndex;
pub use self::graph::{Edge, Vertex};
pub use self::indexed_lists::IndexedLists;
