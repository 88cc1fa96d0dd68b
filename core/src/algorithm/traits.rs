//! Core algorithm trait definitions for the PREFLOW engine
//!
//! This module fixes the scalar vocabulary shared by every flow component
//! (vertex and edge identifiers, capacities, flows, height labels) and the
//! parameter-driven `Algorithm` interface through which solvers are
//! configured.
//!
//! # Key Design Principles
//! - Identifiers are stable arena indices, never pointers
//! - Capacities and flows are exact integers
//! - Solver configuration is validated at the parameter boundary

use serde::{Deserialize, Serialize};

/// Vertex identifier: a stable, 0-based index into the vertex arena
pub type NodeId = usize;

/// Edge identifier: a stable index into the edge arena, in insertion order
pub type EdgeId = usize;

/// Edge capacity type
pub type Capacity = i64;

/// Flow value type; also used for vertex excess
pub type Flow = i64;

/// Height (distance) label for push-relabel
pub type Height = usize;

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub description: String,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Boolean,
}

impl ParameterType {
    /// Checks that `value` parses as this type
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ParameterType::Integer => value.parse::<usize>().is_ok(),
            ParameterType::Boolean => value.parse::<bool>().is_ok(),
        }
    }
}

/// Errors raised while configuring an algorithm
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

/// Parameter-driven algorithm interface
pub trait Algorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> String;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}
