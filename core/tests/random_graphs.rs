//! Seeded random graphs checked against a reference augmenting-path solver

mod common;

use common::{assert_valid_max_flow, edmonds_karp, validating};
use preflow_core::{Capacity, FlowNetwork, NodeId, SolverConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sparse random digraph with roughly `(1 + ln n) / n` edge density
fn random_edges(rng: &mut StdRng, vertex_count: usize, max_capacity: Capacity) -> Vec<(NodeId, NodeId, Capacity)> {
    let probability = (1.0 + (vertex_count as f64).ln()) / vertex_count as f64;
    let mut edges = Vec::new();
    for from in 0..vertex_count {
        for to in 0..vertex_count {
            if from != to && rng.gen_bool(probability.min(1.0)) {
                edges.push((from, to, rng.gen_range(1..=max_capacity)));
            }
        }
    }
    edges
}

fn solve(vertex_count: usize, edges: &[(NodeId, NodeId, Capacity)], config: &SolverConfig) -> FlowNetwork {
    let mut network = FlowNetwork::new(vertex_count, 0, vertex_count - 1).unwrap();
    for &(from, to, capacity) in edges {
        network.add_edge(from, to, capacity).unwrap();
    }
    network.solve_with(config).unwrap();
    network
}

#[test]
fn test_small_random_graphs_with_validation() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let vertex_count = rng.gen_range(2..=12);
        let edges = random_edges(&mut rng, vertex_count, 20);

        let network = solve(vertex_count, &edges, &validating());
        let expected = edmonds_karp(vertex_count, 0, vertex_count - 1, &edges);
        assert_valid_max_flow(&network, expected);
    }
}

#[test]
fn test_dense_random_graphs_with_validation() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..30 {
        let vertex_count = rng.gen_range(5..=15);
        let edges: Vec<_> = (0..vertex_count * vertex_count)
            .map(|_| {
                (
                    rng.gen_range(0..vertex_count),
                    rng.gen_range(0..vertex_count),
                    rng.gen_range(1..=50),
                )
            })
            .filter(|&(from, to, _)| from != to)
            .collect();

        let network = solve(vertex_count, &edges, &validating());
        let expected = edmonds_karp(vertex_count, 0, vertex_count - 1, &edges);
        assert_valid_max_flow(&network, expected);
    }
}

#[test]
fn test_larger_random_graphs() {
    let config = SolverConfig {
        validate_invariants: false,
        ..SolverConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(7);
    for vertex_count in [100, 200, 400] {
        for max_capacity in [10, 50, 100] {
            let edges = random_edges(&mut rng, vertex_count, max_capacity);
            let network = solve(vertex_count, &edges, &config);
            let expected = edmonds_karp(vertex_count, 0, vertex_count - 1, &edges);
            assert_valid_max_flow(&network, expected);
        }
    }
}
