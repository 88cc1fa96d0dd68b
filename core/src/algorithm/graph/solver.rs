//! Maximum flow solver facade
//!
//! Wraps [`FlowNetwork`] with a serde-configurable [`SolverConfig`], the
//! string-parameter interface of [`Algorithm`], and a serializable
//! [`MaxFlowResult`] bundling the flow value, per-edge assignment, minimum
//! cut and operation counts.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::{FlowAssignment, FlowError, FlowMetrics, FlowNetwork};
use crate::algorithm::traits::{Algorithm, AlgorithmError, AlgorithmParameter, Flow, NodeId, ParameterType};

/// Solver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Run the invariant validation pass after init and after every push and relabel
    pub validate_invariants: bool,
    /// Abort after this many push and relabel operations
    pub step_limit: Option<usize>,
    /// Return 0 without preflow when no directed source-target path exists
    pub skip_unreachable: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            validate_invariants: cfg!(debug_assertions),
            step_limit: None,
            skip_unreachable: true,
        }
    }
}

/// Maximum flow result with detailed flow information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub max_flow: Flow,
    /// Net flow per edge, opposite arcs netted
    pub flow_edges: Vec<FlowAssignment>,
    /// Source side of a minimum cut
    pub min_cut: Vec<NodeId>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

/// Highest-label push-relabel solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: SolverConfig,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the network and collect the full result
    pub fn solve(&self, network: &mut FlowNetwork) -> Result<MaxFlowResult, FlowError> {
        let max_flow = network.solve_with(&self.config)?;
        Ok(MaxFlowResult {
            max_flow,
            flow_edges: network.flow_edges(),
            min_cut: network.min_cut()?,
            metrics: network.metrics().clone(),
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    value.parse::<bool>().map_err(|_| AlgorithmError::InvalidParameter {
        name: name.to_string(),
        reason: "must be true or false".to_string(),
    })
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Push-Relabel Highest Label"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Goldberg-Tarjan push-relabel maximum flow with highest-label selection, \
         height-bucketed excess lists and incrementally maintained admissible-edge lists; \
         O(V^2 * sqrt(E)) push-relabel steps."
            .to_string()
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        ["validate_invariants", "step_limit", "skip_unreachable"]
            .iter()
            .map(|&name| {
                let (value_type, description) = match name {
                    "step_limit" => (ParameterType::Integer, "maximum push/relabel operations, or none"),
                    "validate_invariants" => (ParameterType::Boolean, "check flow invariants after every step"),
                    _ => (ParameterType::Boolean, "skip preflow when the target is unreachable"),
                };
                AlgorithmParameter {
                    name: name.to_string(),
                    value: self.get_parameter(name).unwrap_or_default(),
                    value_type,
                    description: description.to_string(),
                }
            })
            .collect()
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "validate_invariants" => {
                self.config.validate_invariants = parse_bool(name, value)?;
                Ok(())
            }
            "skip_unreachable" => {
                self.config.skip_unreachable = parse_bool(name, value)?;
                Ok(())
            }
            "step_limit" => {
                self.config.step_limit = match value {
                    "none" => None,
                    _ => Some(value.parse::<usize>().map_err(|_| AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: "must be a non-negative integer or none".to_string(),
                    })?),
                };
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter(name.to_string())),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "validate_invariants" => Some(self.config.validate_invariants.to_string()),
            "skip_unreachable" => Some(self.config.skip_unreachable.to_string()),
            "step_limit" => Some(
                self.config
                    .step_limit
                    .map_or_else(|| "none".to_string(), |limit| limit.to_string()),
            ),
            _ => None,
        }
    }
}
