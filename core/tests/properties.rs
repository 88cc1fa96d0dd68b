//! Property-based checks of the flow engine

mod common;

use common::{edmonds_karp, source_outflow, validating};
use preflow_core::{Capacity, FlowNetwork, NodeId};
use proptest::prelude::*;

/// Strategy for a vertex count and an arbitrary (possibly invalid) edge list
fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(NodeId, NodeId, Capacity)>)> {
    (2usize..10).prop_flat_map(|vertex_count| {
        let edge = (0..vertex_count, 0..vertex_count, 1 as Capacity..30);
        (Just(vertex_count), prop::collection::vec(edge, 0..40))
    })
}

fn build(vertex_count: usize, edges: &[(NodeId, NodeId, Capacity)]) -> FlowNetwork {
    let mut network = FlowNetwork::new(vertex_count, 0, vertex_count - 1).unwrap();
    for &(from, to, capacity) in edges {
        if from != to {
            network.add_edge(from, to, capacity).unwrap();
        }
    }
    network
}

proptest! {
    /// The flow value matches the reference and both readings agree.
    #[test]
    fn max_flow_matches_reference((vertex_count, edges) in graph_strategy()) {
        let mut network = build(vertex_count, &edges);
        let value = network.solve_with(&validating()).unwrap();

        prop_assert_eq!(value, edmonds_karp(vertex_count, 0, vertex_count - 1, &edges));
        prop_assert_eq!(network.excess(vertex_count - 1), value);
        prop_assert_eq!(source_outflow(&network), value);
    }

    /// Flows stay within capacity and inner vertices end balanced.
    #[test]
    fn solved_flow_is_feasible((vertex_count, edges) in graph_strategy()) {
        let mut network = build(vertex_count, &edges);
        network.solve_with(&validating()).unwrap();

        for edge in network.edges() {
            prop_assert!(0 <= edge.flow() && edge.flow() <= edge.capacity());
        }
        for vertex in 1..vertex_count - 1 {
            prop_assert_eq!(network.excess(vertex), 0);
        }
    }

    /// Inserting every edge twice yields the same edges and capacities.
    #[test]
    fn add_edge_is_idempotent((vertex_count, edges) in graph_strategy()) {
        let once = build(vertex_count, &edges);
        let doubled: Vec<_> = edges.iter().chain(edges.iter()).copied().collect();
        let twice = build(vertex_count, &doubled);

        prop_assert_eq!(once.edges(), twice.edges());
        for vertex in 0..vertex_count {
            prop_assert_eq!(once.incident_edges(vertex), twice.incident_edges(vertex));
        }
    }

    /// Netted report conserves flow at every inner vertex.
    #[test]
    fn reported_flow_is_conserved((vertex_count, edges) in graph_strategy()) {
        let mut network = build(vertex_count, &edges);
        let value = network.solve_with(&validating()).unwrap();

        let mut balance = vec![0; vertex_count];
        for assignment in network.flow_edges() {
            prop_assert!(assignment.flow > 0);
            balance[assignment.from] -= assignment.flow;
            balance[assignment.to] += assignment.flow;
        }
        prop_assert_eq!(balance[vertex_count - 1], value);
        prop_assert_eq!(balance[0], -value);
        prop_assert!(balance[1..vertex_count - 1].iter().all(|&b| b == 0));
    }
}
