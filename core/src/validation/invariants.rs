//! Push-relabel invariant verification
//!
//! Every check recomputes its property from the edge and vertex arenas
//! alone and compares it with the engine's incremental bookkeeping:
//!
//! - flow bounds: `0 <= flow <= capacity` on every edge;
//! - conservation: every non-source excess is non-negative and equals net
//!   inflow over incident edges;
//! - height invariant: positive residual from `u` to `v` implies
//!   `height(u) <= height(v) + 1`;
//! - height limit: source at `vertex_count`, target at 0, every other
//!   vertex at most `2 * (vertex_count - 1)`;
//! - index consistency: both the excess buckets and the admissible lists
//!   match what the arenas say they should contain.
//!
//! Edge and vertex scans run as read-only rayon parallel iterators.

use rayon::prelude::*;
use thiserror::Error;

use crate::algorithm::graph::max_flow::FlowNetwork;
use crate::algorithm::traits::{Capacity, EdgeId, Flow, Height, NodeId};

/// Broken engine invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("edge {edge} carries flow {flow} outside [0, {capacity}]")]
    FlowOutOfBounds {
        edge: EdgeId,
        flow: Flow,
        capacity: Capacity,
    },
    #[error("vertex {vertex} has negative excess {excess}")]
    NegativeExcess { vertex: NodeId, excess: Flow },
    #[error("vertex {vertex} records excess {excess} but its net inflow is {net_inflow}")]
    ExcessMismatch {
        vertex: NodeId,
        excess: Flow,
        net_inflow: Flow,
    },
    #[error("residual arc {from} -> {to} drops from height {from_height} to {to_height}")]
    HeightGap {
        from: NodeId,
        to: NodeId,
        from_height: Height,
        to_height: Height,
    },
    #[error("source height is {height}, expected {expected}")]
    SourceHeight { height: Height, expected: Height },
    #[error("target height is {height}, expected 0")]
    TargetHeight { height: Height },
    #[error("vertex {vertex} reached height {height} above the limit {limit}")]
    HeightLimit {
        vertex: NodeId,
        height: Height,
        limit: Height,
    },
    #[error("vertex {vertex} with excess {excess} has excess-index membership {indexed}")]
    ExcessIndexMembership {
        vertex: NodeId,
        excess: Flow,
        indexed: bool,
    },
    #[error("vertex {vertex} of height {height} sits in excess bucket {bucket}")]
    ExcessIndexBucket {
        vertex: NodeId,
        bucket: Height,
        height: Height,
    },
    #[error("excess cursor at {cursor}, highest non-empty bucket is {expected}")]
    ExcessCursor { cursor: Height, expected: Height },
    #[error("edge {edge} is listed under {listed:?}, expected {expected:?}")]
    AdmissibleOwner {
        edge: EdgeId,
        listed: Option<NodeId>,
        expected: Option<NodeId>,
    },
    #[error("vertex {vertex} still overflows by {excess} after termination")]
    ResidualExcess { vertex: NodeId, excess: Flow },
    #[error("target excess {target_excess} differs from source outflow {source_outflow}")]
    ValueMismatch {
        target_excess: Flow,
        source_outflow: Flow,
    },
}

pub type InvariantResult = Result<(), InvariantViolation>;

/// Every edge within `[0, capacity]`
pub fn check_flow_bounds(network: &FlowNetwork) -> InvariantResult {
    match network
        .edges()
        .par_iter()
        .enumerate()
        .find_map_first(|(edge_id, edge)| {
            (edge.flow() < 0 || edge.flow() > edge.capacity()).then(|| InvariantViolation::FlowOutOfBounds {
                edge: edge_id,
                flow: edge.flow(),
                capacity: edge.capacity(),
            })
        }) {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Non-negative excess equal to net inflow on every vertex but the source
pub fn check_excess(network: &FlowNetwork) -> InvariantResult {
    let source = network.source();
    match network.vertices().par_iter().find_map_first(|vertex| {
        if vertex.id() == source {
            return None;
        }
        if vertex.excess() < 0 {
            return Some(InvariantViolation::NegativeExcess {
                vertex: vertex.id(),
                excess: vertex.excess(),
            });
        }
        let net_inflow: Flow = vertex
            .edges()
            .iter()
            .map(|&edge_id| network.edges()[edge_id].inflow_to(vertex.id()))
            .sum();
        (net_inflow != vertex.excess()).then(|| InvariantViolation::ExcessMismatch {
            vertex: vertex.id(),
            excess: vertex.excess(),
            net_inflow,
        })
    }) {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// No residual arc descends more than one level
pub fn check_height_invariant(network: &FlowNetwork) -> InvariantResult {
    match network.edges().par_iter().find_map_first(|edge| {
        [edge.from(), edge.to()].into_iter().find_map(|from| {
            let to = edge.other(from);
            let (from_height, to_height) = (network.height(from), network.height(to));
            (edge.residual_from(from) > 0 && from_height > to_height + 1).then_some(InvariantViolation::HeightGap {
                from,
                to,
                from_height,
                to_height,
            })
        })
    }) {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Fixed source/target heights and the `2 * (n - 1)` bound elsewhere
pub fn check_height_limit(network: &FlowNetwork) -> InvariantResult {
    let vertex_count = network.vertex_count();
    let source_height = network.height(network.source());
    if source_height != vertex_count {
        return Err(InvariantViolation::SourceHeight {
            height: source_height,
            expected: vertex_count,
        });
    }
    let target_height = network.height(network.target());
    if target_height != 0 {
        return Err(InvariantViolation::TargetHeight { height: target_height });
    }

    let limit = 2 * (vertex_count - 1);
    match network
        .vertices()
        .iter()
        .filter(|vertex| vertex.id() != network.source())
        .find(|vertex| vertex.height() > limit)
    {
        Some(vertex) => Err(InvariantViolation::HeightLimit {
            vertex: vertex.id(),
            height: vertex.height(),
            limit,
        }),
        None => Ok(()),
    }
}

/// Buckets hold exactly the overflowing inner vertices at their heights
pub fn check_excess_index(network: &FlowNetwork) -> InvariantResult {
    let index = network.excess_index();
    for vertex in network.vertices() {
        let terminal = vertex.id() == network.source() || vertex.id() == network.target();
        let should_index = !terminal && vertex.excess() > 0;
        let indexed = index.contains(vertex.id());
        if indexed != should_index {
            return Err(InvariantViolation::ExcessIndexMembership {
                vertex: vertex.id(),
                excess: vertex.excess(),
                indexed,
            });
        }
        if let Some(bucket) = index.height_of(vertex.id()) {
            if bucket != vertex.height() {
                return Err(InvariantViolation::ExcessIndexBucket {
                    vertex: vertex.id(),
                    bucket,
                    height: vertex.height(),
                });
            }
        }
    }

    let expected = (0..index.bucket_count())
        .rev()
        .find(|&height| index.bucket(height).next().is_some())
        .unwrap_or(0);
    if index.highest_height() != expected {
        return Err(InvariantViolation::ExcessCursor {
            cursor: index.highest_height(),
            expected,
        });
    }
    Ok(())
}

/// Every edge listed under exactly the endpoint it is admissible from
pub fn check_admissible_index(network: &FlowNetwork) -> InvariantResult {
    let index = network.admissible_index();
    for (edge_id, edge) in network.edges().iter().enumerate() {
        let expected = [edge.from(), edge.to()]
            .into_iter()
            .find(|&from| network.is_admissible(edge_id, from));
        let listed = index.owner(edge_id);
        if listed != expected {
            return Err(InvariantViolation::AdmissibleOwner {
                edge: edge_id,
                listed,
                expected,
            });
        }
    }
    Ok(())
}

/// Full pass run between push-relabel steps
pub fn validate_network(network: &FlowNetwork) -> InvariantResult {
    check_flow_bounds(network)?;
    check_excess(network)?;
    check_height_invariant(network)?;
    check_height_limit(network)?;
    check_excess_index(network)?;
    check_admissible_index(network)
}

/// Pass run on a terminated computation: a valid flow whose value agrees
/// between the target's excess and the source's outgoing arcs
pub fn validate_solution(network: &FlowNetwork) -> InvariantResult {
    check_flow_bounds(network)?;
    check_excess(network)?;

    let (source, target) = (network.source(), network.target());
    if let Some(vertex) = network
        .vertices()
        .iter()
        .find(|vertex| vertex.id() != source && vertex.id() != target && vertex.excess() != 0)
    {
        return Err(InvariantViolation::ResidualExcess {
            vertex: vertex.id(),
            excess: vertex.excess(),
        });
    }

    let source_outflow: Flow = network
        .incident_edges(source)
        .iter()
        .map(|&edge_id| &network.edges()[edge_id])
        .filter(|edge| edge.is_outgoing(source))
        .map(|edge| edge.flow())
        .sum();
    let target_excess = network.excess(target);
    if source_outflow != target_excess {
        return Err(InvariantViolation::ValueMismatch {
            target_excess,
            source_outflow,
        });
    }
    Ok(())
}
