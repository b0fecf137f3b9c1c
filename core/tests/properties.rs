//! Property tests for path trees and separation queries over random
//! undirected graphs.

use std::collections::HashSet;

use costar_core::{
    average_separation, average_separation_with, build_path_tree, missing_vertices,
    path_to_root, rank_by_separation, separations, GraphError, LabeledGraph, SeparationStrategy,
};
use proptest::prelude::*;

/// Vertex count plus an edge list over `0..n` without self-loops.
fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..24).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..n * 2)
            .prop_map(|edges| edges.into_iter().filter(|(a, b)| a != b).collect::<Vec<_>>());
        (Just(n), edges)
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> LabeledGraph<usize, (usize, usize)> {
    let mut g = LabeledGraph::new();
    for v in 0..n {
        g.insert_vertex(v);
    }
    for &(a, b) in edges {
        g.insert_undirected(&a, &b, (a, b)).unwrap();
    }
    g
}

fn reachable(g: &LabeledGraph<usize, (usize, usize)>, source: usize) -> HashSet<usize> {
    let mut seen = HashSet::from([source]);
    let mut stack = vec![source];
    while let Some(v) = stack.pop() {
        for &next in g.out_neighbors(&v).unwrap() {
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn tree_spans_exactly_the_reachable_set((n, edges) in graph_strategy(), pick in any::<prop::sample::Index>()) {
        let g = build(n, &edges);
        let source = pick.index(n);
        let tree = build_path_tree(&g, &source).unwrap();

        let in_tree: HashSet<usize> = tree.vertices().copied().collect();
        prop_assert_eq!(in_tree, reachable(&g, source));

        for v in tree.vertices() {
            let expected = if *v == source { 0 } else { 1 };
            prop_assert_eq!(tree.graph().out_degree(v), Ok(expected));
        }
    }

    #[test]
    fn paths_follow_tree_levels((n, edges) in graph_strategy(), pick in any::<prop::sample::Index>()) {
        let g = build(n, &edges);
        let source = pick.index(n);
        let tree = build_path_tree(&g, &source).unwrap();
        let levels = separations(&tree);

        prop_assert_eq!(path_to_root(&tree, &source), vec![source]);
        for v in tree.vertices() {
            let path = path_to_root(&tree, v);
            prop_assert_eq!(path.len(), 1 + levels[v]);
            prop_assert_eq!(path.last(), Some(&source));
            for hop in path.windows(2) {
                prop_assert!(tree.graph().has_edge(&hop[0], &hop[1]));
                prop_assert!(g.has_edge(&hop[0], &hop[1]));
            }
        }
    }

    #[test]
    fn missing_and_tree_partition_the_graph((n, edges) in graph_strategy(), pick in any::<prop::sample::Index>()) {
        let g = build(n, &edges);
        let source = pick.index(n);
        let tree = build_path_tree(&g, &source).unwrap();
        let missing = missing_vertices(&g, &tree);
        let in_tree: HashSet<usize> = tree.vertices().copied().collect();

        prop_assert!(missing.is_disjoint(&in_tree));
        let all: HashSet<usize> = g.vertices().copied().collect();
        let union: HashSet<usize> = missing.union(&in_tree).copied().collect();
        prop_assert_eq!(union, all);
        for v in &missing {
            prop_assert!(path_to_root(&tree, v).is_empty());
        }
    }

    #[test]
    fn average_is_mean_depth((n, edges) in graph_strategy(), pick in any::<prop::sample::Index>()) {
        let g = build(n, &edges);
        let source = pick.index(n);
        let tree = build_path_tree(&g, &source).unwrap();

        if tree.num_vertices() == 1 {
            prop_assert!(matches!(
                average_separation(&tree, &source),
                Err(GraphError::SingleVertexTree(_))
            ));
        } else {
            let total: usize = separations(&tree).values().sum();
            let expected = total as f64 / (tree.num_vertices() - 1) as f64;
            let level = average_separation(&tree, &source).unwrap();
            let recursive =
                average_separation_with(&tree, &source, SeparationStrategy::Recursive).unwrap();
            prop_assert!(level >= 1.0);
            prop_assert!((level - expected).abs() < 1e-9);
            prop_assert!((level - recursive).abs() < 1e-9);
        }
    }

    #[test]
    fn ranking_scores_tree_vertices_in_order((n, edges) in graph_strategy(), pick in any::<prop::sample::Index>()) {
        let g = build(n, &edges);
        let source = pick.index(n);
        let tree = build_path_tree(&g, &source).unwrap();

        let too_many = rank_by_separation(&g, &tree, n);
        let is_insufficient = matches!(too_many, Err(GraphError::InsufficientVertices { .. }));
        prop_assert!(is_insufficient);

        let ranked = rank_by_separation(&g, &tree, n - 1).unwrap();
        let expected_len = if tree.num_vertices() > 1 {
            tree.num_vertices().min(n - 1)
        } else {
            0
        };
        prop_assert_eq!(ranked.len(), expected_len);
        for v in &ranked {
            prop_assert!(tree.has_vertex(v));
        }
        let scores: Vec<f64> = ranked
            .iter()
            .map(|v| average_separation(&tree, v).unwrap())
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        if let Some(first) = ranked.first() {
            prop_assert_eq!(first, &source);
        }
    }
}

#[test]
fn scenario_from_four_actors() {
    let mut g: LabeledGraph<&str, HashSet<&str>> = LabeledGraph::new();
    for v in ["A", "B", "C", "D"] {
        g.insert_vertex(v);
    }
    g.insert_undirected(&"A", &"B", HashSet::from(["M1"])).unwrap();
    g.insert_undirected(&"B", &"C", HashSet::from(["M1"])).unwrap();

    let tree = build_path_tree(&g, &"A").unwrap();
    assert_eq!(path_to_root(&tree, &"C"), vec!["C", "B", "A"]);
    assert!(path_to_root(&tree, &"D").is_empty());
    assert_eq!(missing_vertices(&g, &tree), HashSet::from(["D"]));
    assert!((average_separation(&tree, &"A").unwrap() - 1.5).abs() < 1e-9);
    assert_eq!(costar_core::list_by_degree_range(&g, 1, 1), vec!["A", "C"]);
}
