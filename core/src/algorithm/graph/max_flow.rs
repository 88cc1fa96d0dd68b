//! Highest-label push-relabel maximum flow
//!
//! This module implements the Goldberg-Tarjan preflow method with
//! highest-label vertex selection. Two indices are kept consistent under
//! every mutation of heights and flows:
//!
//! - an [`ExcessIndex`] bucketing overflowing vertices by height, which
//!   makes picking a highest overflowing vertex O(1) amortized;
//! - an [`AdmissibleIndex`] listing, per vertex, the incident edges along
//!   which it may currently push, refreshed per relabel instead of
//!   rescanned per push.
//!
//! Edges carry both residual directions in one record (forward residual
//! `capacity - flow`, reverse residual `flow`), so pushing against an arc
//! cancels its recorded flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::solver::SolverConfig;
use crate::algorithm::traits::{Capacity, EdgeId, Flow, Height, NodeId};
use crate::data_structures::{AdmissibleIndex, Edge, ExcessIndex, Vertex};
use crate::validation::invariants;

/// Flow network errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Vertex {vertex} is out of range for a network of {vertex_count} vertices")]
    InvalidVertex { vertex: NodeId, vertex_count: usize },
    #[error("Source and target are the same vertex {0}")]
    SourceIsTarget(NodeId),
    #[error("Self-loop on vertex {0}")]
    SelfLoop(NodeId),
    #[error("Edge {from} -> {to} has non-positive capacity {capacity}")]
    NonPositiveCapacity {
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    },
    #[error("Total capacity entering vertex {0} exceeds the representable flow range")]
    CapacityOverflow(NodeId),
    #[error("Maximum flow has already been computed on this network")]
    AlreadySolved,
    #[error("Maximum flow has not been computed on this network")]
    NotSolved,
    #[error("Step limit of {0} push/relabel operations exceeded")]
    StepLimitExceeded(usize),
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of push operations
    pub push_operations: usize,
    /// Number of relabel operations
    pub relabel_operations: usize,
    /// Flow cycles through the source cancelled after the main loop
    pub cancelled_cycles: usize,
    /// Algorithm execution time
    pub execution_time_ms: f64,
}

impl FlowMetrics {
    /// Push and relabel operations performed so far
    #[inline]
    pub fn steps(&self) -> usize {
        self.push_operations + self.relabel_operations
    }
}

/// Net flow carried from one vertex to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAssignment {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: Flow,
}

/// Lifecycle of a network: edges may only be added before solving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NetworkState {
    Building,
    Solved,
    Aborted,
}

/// Flow network owning its vertices, edges and both push-relabel indices
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    /// Vertex arena, indexed by `NodeId`
    vertices: Vec<Vertex>,
    /// Edge arena, indexed by `EdgeId` in insertion order
    edges: Vec<Edge>,
    /// Ordered (from, to) pair lookup
    lookup: HashMap<(NodeId, NodeId), EdgeId>,
    /// Capacity sum over incoming edges; bounds the excess a vertex can hold
    inbound_capacity: Vec<Capacity>,
    source: NodeId,
    target: NodeId,
    /// Overflowing vertices bucketed by height
    excess_index: ExcessIndex,
    /// Admissible edges listed under the endpoint that may push along them
    admissible: AdmissibleIndex,
    metrics: FlowMetrics,
    state: NetworkState,
}

impl FlowNetwork {
    /// Create a network of `vertex_count` vertices with 0-based `source` and `target`
    pub fn new(vertex_count: usize, source: NodeId, target: NodeId) -> Result<Self, FlowError> {
        for vertex in [source, target] {
            if vertex >= vertex_count {
                return Err(FlowError::InvalidVertex {
                    vertex,
                    vertex_count,
                });
            }
        }
        if source == target {
            return Err(FlowError::SourceIsTarget(source));
        }

        Ok(Self {
            vertices: (0..vertex_count).map(Vertex::new).collect(),
            edges: Vec::new(),
            lookup: HashMap::new(),
            inbound_capacity: vec![0; vertex_count],
            source,
            target,
            excess_index: ExcessIndex::new(vertex_count),
            admissible: AdmissibleIndex::new(vertex_count),
            metrics: FlowMetrics::default(),
            state: NetworkState::Building,
        })
    }

    /// Add a directed edge.
    ///
    /// Returns `Ok(false)` without touching the network when the ordered
    /// pair already exists: the first insertion wins. Fails with
    /// [`FlowError::CapacityOverflow`] when the capacities entering `to`
    /// would no longer fit a [`Flow`]; the source is exempt since its
    /// excess is not tracked.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) -> Result<bool, FlowError> {
        if self.state != NetworkState::Building {
            return Err(FlowError::AlreadySolved);
        }
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(FlowError::SelfLoop(from));
        }
        if capacity <= 0 {
            return Err(FlowError::NonPositiveCapacity { from, to, capacity });
        }
        if self.lookup.contains_key(&(from, to)) {
            trace!("ignoring duplicate edge {} -> {}", from, to);
            return Ok(false);
        }
        if to != self.source {
            self.inbound_capacity[to] = self.inbound_capacity[to]
                .checked_add(capacity)
                .ok_or(FlowError::CapacityOverflow(to))?;
        }

        let edge_id = self.admissible.track_edge();
        debug_assert_eq!(edge_id, self.edges.len());

        self.edges.push(Edge::new(from, to, capacity));
        self.vertices[from].edges.push(edge_id);
        self.vertices[to].edges.push(edge_id);
        self.lookup.insert((from, to), edge_id);
        Ok(true)
    }

    /// Compute the maximum flow with the default solver configuration
    pub fn get_max_flow(&mut self) -> Result<Flow, FlowError> {
        self.solve_with(&SolverConfig::default())
    }

    /// Compute the maximum flow.
    ///
    /// Single use: once this has run, further calls and edge insertions
    /// fail with [`FlowError::AlreadySolved`].
    pub fn solve_with(&mut self, config: &SolverConfig) -> Result<Flow, FlowError> {
        if self.state != NetworkState::Building {
            return Err(FlowError::AlreadySolved);
        }
        let started = Instant::now();

        if config.skip_unreachable && !self.is_target_reachable() {
            debug!(
                "target {} is unreachable from source {}, skipping preflow",
                self.target, self.source
            );
            self.vertices[self.source].height = self.vertex_count();
            self.state = NetworkState::Solved;
            self.metrics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
            return Ok(0);
        }

        self.init();
        self.check_invariants(config, "init");

        while let Some(vertex) = self.excess_index.highest_vertex() {
            if let Some(limit) = config.step_limit {
                if self.metrics.steps() >= limit {
                    debug!("stopping after {} steps with vertex {} still overflowing", limit, vertex);
                    self.state = NetworkState::Aborted;
                    self.metrics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
                    return Err(FlowError::StepLimitExceeded(limit));
                }
            }

            match self.admissible.first(vertex) {
                Some(edge_id) => {
                    self.push(vertex, edge_id);
                    self.check_invariants(config, "push");
                }
                None => {
                    self.relabel(vertex);
                    self.check_invariants(config, "relabel");
                }
            }
        }

        self.cancel_source_cycles();
        self.state = NetworkState::Solved;

        if config.validate_invariants {
            if let Err(violation) = invariants::validate_solution(self) {
                panic!("flow invariant violated after termination: {violation}");
            }
        }

        let max_flow = self.flow_value();
        self.metrics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            "max flow {} ({} pushes, {} relabels, {:.3} ms)",
            max_flow,
            self.metrics.push_operations,
            self.metrics.relabel_operations,
            self.metrics.execution_time_ms
        );
        Ok(max_flow)
    }

    /// Saturate every source edge; the only pushes made before the main loop.
    ///
    /// The source's own excess stays at 0: its outgoing capacities may sum
    /// past the [`Flow`] range, and the flow value is read from the arcs.
    fn init(&mut self) {
        let source = self.source;
        self.vertices[source].height = self.vertex_count();

        let mut saturated = 0;
        for position in 0..self.vertices[source].edges.len() {
            let edge_id = self.vertices[source].edges[position];
            let edge = &mut self.edges[edge_id];
            if !edge.is_outgoing(source) {
                continue;
            }

            let amount = edge.residual_from(source);
            edge.push_from(source, amount);
            let head = edge.to;

            self.vertices[head].excess += amount;
            self.fix_excess(head);
            saturated += 1;
        }

        debug!(
            "preflow initialized: {} source edges saturated, {} vertices overflowing",
            saturated,
            self.excess_index.len()
        );
    }

    /// Push as much excess as the edge allows away from `vertex`.
    fn push(&mut self, vertex: NodeId, edge_id: EdgeId) {
        let edge = &mut self.edges[edge_id];
        let other = edge.other(vertex);
        let amount = self.vertices[vertex].excess.min(edge.residual_from(vertex));
        debug_assert!(amount > 0, "push along non-admissible edge {edge_id}");

        edge.push_from(vertex, amount);
        self.vertices[vertex].excess -= amount;
        if other != self.source {
            self.vertices[other].excess += amount;
        }
        self.metrics.push_operations += 1;
        trace!("push {} -> {}: {} units along edge {}", vertex, other, amount, edge_id);

        self.fix_excess(other);
        self.fix_excess(vertex);
        self.fix_admissible(edge_id, vertex);
    }

    /// Raise an overflowing vertex without admissible edges by one level.
    fn relabel(&mut self, vertex: NodeId) {
        debug_assert!(vertex != self.source && vertex != self.target);
        debug_assert!(self.admissible.first(vertex).is_none());

        let height = self.vertices[vertex].height + 1;
        self.vertices[vertex].height = height;
        self.excess_index.relocate(vertex, height);
        self.metrics.relabel_operations += 1;
        trace!("relabel {} to height {}", vertex, height);

        self.update_admissible(vertex);
    }

    /// Keep `vertex` in its height bucket iff it overflows.
    fn fix_excess(&mut self, vertex: NodeId) {
        if vertex == self.source || vertex == self.target {
            return;
        }

        let record = &self.vertices[vertex];
        if record.excess == 0 {
            self.excess_index.remove(vertex);
        } else if !self.excess_index.contains(vertex) {
            self.excess_index.insert(vertex, record.height);
        }
    }

    /// Re-list one edge after a height or flow change at `vertex`.
    fn fix_admissible(&mut self, edge_id: EdgeId, vertex: NodeId) {
        let other = self.edges[edge_id].other(vertex);
        let owner = if self.is_admissible(edge_id, vertex) {
            Some(vertex)
        } else if self.is_admissible(edge_id, other) {
            Some(other)
        } else {
            None
        };
        self.admissible.assign(edge_id, owner);
    }

    fn update_admissible(&mut self, vertex: NodeId) {
        for position in 0..self.vertices[vertex].edges.len() {
            let edge_id = self.vertices[vertex].edges[position];
            self.fix_admissible(edge_id, vertex);
        }
    }

    /// Positive residual away from `from` and `from` strictly higher than the far end
    pub(crate) fn is_admissible(&self, edge_id: EdgeId, from: NodeId) -> bool {
        let edge = &self.edges[edge_id];
        edge.residual_from(from) > 0 && self.vertices[from].height > self.vertices[edge.other(from)].height
    }

    /// Cancel flow that went around a cycle back into the source.
    ///
    /// Leaves every excess unchanged; afterwards no edge entering the
    /// source carries flow.
    fn cancel_source_cycles(&mut self) {
        let source = self.source;
        for position in 0..self.vertices[source].edges.len() {
            let entering = self.vertices[source].edges[position];

            while self.edges[entering].to == source && self.edges[entering].flow > 0 {
                let tail = self.edges[entering].from;
                let Some(mut cycle) = self.flow_path(source, tail) else {
                    break;
                };
                cycle.push(entering);

                let amount = cycle.iter().map(|&edge_id| self.edges[edge_id].flow).min().unwrap_or(0);
                for &edge_id in &cycle {
                    self.edges[edge_id].flow -= amount;
                }
                self.metrics.cancelled_cycles += 1;
                trace!("cancelled {} units on a {}-edge cycle through the source", amount, cycle.len());
            }
        }
    }

    /// Breadth-first path of flow-carrying arcs from `from` to `to`
    fn flow_path(&self, from: NodeId, to: NodeId) -> Option<Vec<EdgeId>> {
        let mut predecessor: Vec<Option<EdgeId>> = vec![None; self.vertex_count()];
        let mut seen = vec![false; self.vertex_count()];
        let mut queue = VecDeque::from([from]);
        seen[from] = true;

        while let Some(vertex) = queue.pop_front() {
            if vertex == to {
                break;
            }
            for &edge_id in &self.vertices[vertex].edges {
                let edge = &self.edges[edge_id];
                if edge.is_outgoing(vertex) && edge.flow > 0 && !seen[edge.to] {
                    seen[edge.to] = true;
                    predecessor[edge.to] = Some(edge_id);
                    queue.push_back(edge.to);
                }
            }
        }

        if !seen[to] {
            return None;
        }
        let mut path = Vec::new();
        let mut vertex = to;
        while let Some(edge_id) = predecessor[vertex] {
            path.push(edge_id);
            vertex = self.edges[edge_id].from;
        }
        path.reverse();
        Some(path)
    }

    /// Vertices reachable from the source along arcs accepted by `usable`
    fn reachable_from_source(&self, usable: impl Fn(&Edge, NodeId) -> bool) -> Vec<bool> {
        let mut seen = vec![false; self.vertex_count()];
        let mut queue = VecDeque::from([self.source]);
        seen[self.source] = true;

        while let Some(vertex) = queue.pop_front() {
            for &edge_id in &self.vertices[vertex].edges {
                let edge = &self.edges[edge_id];
                if !usable(edge, vertex) {
                    continue;
                }
                let next = edge.other(vertex);
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Whether a directed path leads from source to target
    pub fn is_target_reachable(&self) -> bool {
        self.reachable_from_source(|edge, vertex| edge.is_outgoing(vertex))[self.target]
    }

    /// Source side of a minimum cut: vertices reachable in the residual graph
    pub fn min_cut(&self) -> Result<Vec<NodeId>, FlowError> {
        if self.state != NetworkState::Solved {
            return Err(FlowError::NotSolved);
        }
        let reachable = self.reachable_from_source(|edge, vertex| edge.residual_from(vertex) > 0);
        Ok(reachable
            .iter()
            .enumerate()
            .filter_map(|(vertex, &seen)| seen.then_some(vertex))
            .collect())
    }

    /// Net flow out of the source.
    ///
    /// Saturates at `Flow::MAX`, which only a preflow aborted right after
    /// saturating huge source arcs can reach.
    pub fn flow_value(&self) -> Flow {
        let source = self.source;
        let net: i128 = self.vertices[source]
            .edges
            .iter()
            .map(|&edge_id| -i128::from(self.edges[edge_id].inflow_to(source)))
            .sum();
        Flow::try_from(net).unwrap_or(Flow::MAX)
    }

    /// Edges with positive net flow, opposite arcs netted against each other.
    ///
    /// Netting affects only this report, never the per-edge bookkeeping.
    pub fn flow_edges(&self) -> Vec<FlowAssignment> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let opposing = self.edge(edge.to, edge.from).map_or(0, Edge::flow);
                let net = edge.flow - opposing;
                (net > 0).then_some(FlowAssignment {
                    from: edge.from,
                    to: edge.to,
                    flow: net,
                })
            })
            .collect()
    }

    fn check_vertex(&self, vertex: NodeId) -> Result<(), FlowError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(FlowError::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn check_invariants(&self, config: &SolverConfig, operation: &str) {
        if !config.validate_invariants {
            return;
        }
        if let Err(violation) = invariants::validate_network(self) {
            panic!("flow invariant violated after {operation}: {violation}");
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> NodeId {
        self.target
    }

    #[inline]
    pub fn vertex(&self, vertex: NodeId) -> &Vertex {
        &self.vertices[vertex]
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn height(&self, vertex: NodeId) -> Height {
        self.vertices[vertex].height
    }

    #[inline]
    pub fn excess(&self, vertex: NodeId) -> Flow {
        self.vertices[vertex].excess
    }

    /// Incident edges of `vertex`, both directions
    #[inline]
    pub fn incident_edges(&self, vertex: NodeId) -> &[EdgeId] {
        &self.vertices[vertex].edges
    }

    pub fn edge_id(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.lookup.get(&(from, to)).copied()
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edge_id(from, to).map(|edge_id| &self.edges[edge_id])
    }

    pub fn edge_exists(&self, from: NodeId, to: NodeId) -> bool {
        self.lookup.contains_key(&(from, to))
    }

    #[inline]
    pub fn excess_index(&self) -> &ExcessIndex {
        &self.excess_index
    }

    #[inline]
    pub fn admissible_index(&self) -> &AdmissibleIndex {
        &self.admissible
    }

    #[inline]
    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// Whether the flow computation completed on this network
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.state == NetworkState::Solved
    }

    #[cfg(test)]
    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    #[cfg(test)]
    pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }
}
