//! Toggleable correctness checks for the flow engine
//!
//! Invoked by the solver after every push and relabel when
//! `SolverConfig::validate_invariants` is set; a failure is an engine bug,
//! never a caller error.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod invariants;

pub use self::invariants::{validate_network, validate_solution, InvariantViolation};
