//! Shared helpers for the flow integration tests

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};

use preflow_core::{Capacity, Flow, FlowNetwork, NodeId, SolverConfig};

/// Solver settings with the validation pass switched on
pub fn validating() -> SolverConfig {
    SolverConfig {
        validate_invariants: true,
        ..SolverConfig::default()
    }
}

/// Builds a network from 1-based `(from, to, capacity)` triples
pub fn build_one_based(
    vertex_count: usize,
    source: usize,
    target: usize,
    edges: &[(usize, usize, Capacity)],
) -> FlowNetwork {
    let mut network = FlowNetwork::new(vertex_count, source - 1, target - 1).unwrap();
    for &(from, to, capacity) in edges {
        network.add_edge(from - 1, to - 1, capacity).unwrap();
    }
    network
}

/// Reference maximum flow by shortest augmenting paths on a capacity matrix.
///
/// Mirrors the network's insertion rules: self-loops and non-positive
/// capacities are skipped and only the first copy of an ordered pair counts.
pub fn edmonds_karp(vertex_count: usize, source: NodeId, target: NodeId, edges: &[(NodeId, NodeId, Capacity)]) -> Flow {
    let mut residual = vec![vec![0 as Flow; vertex_count]; vertex_count];
    let mut seen = HashSet::new();
    for &(from, to, capacity) in edges {
        if from == to || capacity <= 0 || !seen.insert((from, to)) {
            continue;
        }
        residual[from][to] += capacity;
    }

    let mut total = 0;
    loop {
        let mut parent = vec![None; vertex_count];
        let mut queue = VecDeque::from([source]);
        parent[source] = Some(source);
        while let Some(vertex) = queue.pop_front() {
            for next in 0..vertex_count {
                if parent[next].is_none() && residual[vertex][next] > 0 {
                    parent[next] = Some(vertex);
                    queue.push_back(next);
                }
            }
        }
        if parent[target].is_none() {
            return total;
        }

        let mut bottleneck = Flow::MAX;
        let mut vertex = target;
        while vertex != source {
            let previous = parent[vertex].unwrap();
            bottleneck = bottleneck.min(residual[previous][vertex]);
            vertex = previous;
        }
        let mut vertex = target;
        while vertex != source {
            let previous = parent[vertex].unwrap();
            residual[previous][vertex] -= bottleneck;
            residual[vertex][previous] += bottleneck;
            vertex = previous;
        }
        total += bottleneck;
    }
}

/// Total capacity of the edges leaving `side`
pub fn cut_capacity(network: &FlowNetwork, side: &[NodeId]) -> Capacity {
    let mut inside = vec![false; network.vertex_count()];
    for &vertex in side {
        inside[vertex] = true;
    }
    network
        .edges()
        .iter()
        .filter(|edge| inside[edge.from()] && !inside[edge.to()])
        .map(|edge| edge.capacity())
        .sum()
}

/// Sum of flow on the arcs leaving the source
pub fn source_outflow(network: &FlowNetwork) -> Flow {
    network
        .edges()
        .iter()
        .filter(|edge| edge.from() == network.source())
        .map(|edge| edge.flow())
        .sum()
}

/// Asserts the post-termination properties of a solved network
pub fn assert_valid_max_flow(network: &FlowNetwork, expected: Flow) {
    assert!(network.is_solved());
    assert_eq!(network.flow_value(), expected);
    assert_eq!(network.excess(network.target()), expected);
    assert_eq!(source_outflow(network), expected);

    for edge in network.edges() {
        assert!(0 <= edge.flow() && edge.flow() <= edge.capacity(), "edge {:?}", edge);
    }
    for vertex in network.vertices() {
        if vertex.id() == network.source() {
            continue;
        }
        let net: Flow = vertex
            .edges()
            .iter()
            .map(|&edge_id| network.edges()[edge_id].inflow_to(vertex.id()))
            .sum();
        assert_eq!(vertex.excess(), net);
        if vertex.id() != network.target() {
            assert_eq!(vertex.excess(), 0, "vertex {} overflows", vertex.id());
            assert!(vertex.height() <= 2 * (network.vertex_count() - 1));
        }
    }
    assert_eq!(network.height(network.target()), 0);
    assert_eq!(network.height(network.source()), network.vertex_count());

    let cut = network.min_cut().unwrap();
    assert!(cut.contains(&network.source()));
    assert!(!cut.contains(&network.target()));
    assert_eq!(cut_capacity(network, &cut), expected);
}
