//! Maximum flow on capacitated directed graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod solver;

pub use self::max_flow::{FlowAssignment, FlowError, FlowMetrics, FlowNetwork};
pub use self::solver::{MaxFlowResult, MaxFlowSolver, SolverConfig};
