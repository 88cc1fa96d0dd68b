//! PREFLOW core: highest-label Goldberg-Tarjan maximum flow
//!
//! The engine keeps vertices and edges in owned arenas and maintains two
//! auxiliary indices under every mutation: height-bucketed lists of
//! overflowing vertices and per-vertex lists of admissible edges. Both are
//! intrusive doubly-linked lists over stable indices, so insertion and
//! removal stay O(1) without pointer stability assumptions.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod io;
pub mod validation;

pub use crate::algorithm::graph::max_flow::{FlowAssignment, FlowError, FlowMetrics, FlowNetwork};
pub use crate::algorithm::graph::solver::{MaxFlowResult, MaxFlowSolver, SolverConfig};
pub use crate::algorithm::traits::{Algorithm, AlgorithmError, Capacity, EdgeId, Flow, Height, NodeId};
