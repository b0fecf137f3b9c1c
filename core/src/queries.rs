use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use log::warn;

use crate::error::{GraphError, Result};
use crate::graph::LabeledGraph;
use crate::separation::{average_separation_with, separations, SeparationStrategy};
use crate::traversal::PathTree;

/// Vertices of `graph` with no path to the tree's root.
pub fn missing_vertices<V, E>(graph: &LabeledGraph<V, E>, tree: &PathTree<V>) -> HashSet<V>
where
    V: Eq + Hash + Clone + Debug,
{
    graph
        .vertices()
        .filter(|v| !tree.has_vertex(v))
        .cloned()
        .collect()
}

/// Vertices with `low <= out_degree <= high`, highest in-degree first.
///
/// Ties are broken by vertex (ascending).
pub fn list_by_degree_range<V, E>(graph: &LabeledGraph<V, E>, low: usize, high: usize) -> Vec<V>
where
    V: Eq + Hash + Clone + Debug + Ord,
{
    let mut matches: Vec<(&V, usize)> = graph
        .degrees()
        .filter(|&(_, out_degree, _)| (low..=high).contains(&out_degree))
        .map(|(v, _, in_degree)| (v, in_degree))
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    matches.into_iter().map(|(v, _)| v.clone()).collect()
}

/// Vertices reachable from the root whose hop distance lies in `[low, high]`,
/// nearest first. Ties are broken by vertex (ascending).
pub fn list_by_separation_range<V>(tree: &PathTree<V>, low: usize, high: usize) -> Vec<V>
where
    V: Eq + Hash + Clone + Debug + Ord,
{
    let mut matches: Vec<(&V, usize)> = separations(tree)
        .into_iter()
        .filter(|(_, depth)| (low..=high).contains(depth))
        .collect();

    matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    matches.into_iter().map(|(v, _)| v.clone()).collect()
}

/// The `count` vertices with the largest average separation in `tree`,
/// largest first.
///
/// `count` must be below the vertex count. Vertices unreachable from the
/// tree's root are left out.
pub fn rank_by_separation<V, E>(
    graph: &LabeledGraph<V, E>,
    tree: &PathTree<V>,
    count: usize,
) -> Result<Vec<V>>
where
    V: Eq + Hash + Clone + Debug + Ord,
{
    rank(graph, tree, count, RankOrder::Worst, SeparationStrategy::default())
}

/// The `count` vertices with the smallest average separation in `tree`,
/// smallest first. Same contract as [`rank_by_separation`].
pub fn best_centers<V, E>(
    graph: &LabeledGraph<V, E>,
    tree: &PathTree<V>,
    count: usize,
) -> Result<Vec<V>>
where
    V: Eq + Hash + Clone + Debug + Ord,
{
    rank(graph, tree, count, RankOrder::Best, SeparationStrategy::default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RankOrder {
    Best,
    Worst,
}

/// Score every vertex against the supplied tree and keep the first `count`.
///
/// A vertex's score is [`average_separation_with`] rooted at it: the depth
/// sum of its subtree over the whole tree's vertex count minus one. Vertices
/// absent from the tree have no score and are skipped, as is every vertex
/// when the tree holds only its root.
pub(crate) fn rank<V, E>(
    graph: &LabeledGraph<V, E>,
    tree: &PathTree<V>,
    count: usize,
    order: RankOrder,
    strategy: SeparationStrategy,
) -> Result<Vec<V>>
where
    V: Eq + Hash + Clone + Debug + Ord,
{
    let available = graph.num_vertices();
    if count >= available {
        return Err(GraphError::InsufficientVertices {
            requested: count,
            available: available.saturating_sub(1),
        });
    }

    let mut scored: Vec<(&V, f64)> = Vec::with_capacity(tree.num_vertices());
    let mut skipped = 0usize;

    for candidate in graph.vertices() {
        if !tree.has_vertex(candidate) {
            skipped += 1;
            continue;
        }
        match average_separation_with(tree, candidate, strategy) {
            Ok(score) => scored.push((candidate, score)),
            Err(GraphError::SingleVertexTree(_)) => skipped += 1,
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        warn!("ranking skipped {skipped} vertices with no path to {:?}", tree.root());
    }

    scored.sort_by(|a, b| {
        let by_score = match order {
            RankOrder::Worst => b.1.total_cmp(&a.1),
            RankOrder::Best => a.1.total_cmp(&b.1),
        };
        match by_score {
            Ordering::Equal => a.0.cmp(b.0),
            other => other,
        }
    });

    Ok(scored
        .into_iter()
        .take(count)
        .map(|(v, _)| v.clone())
        .collect())
}
