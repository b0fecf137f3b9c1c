//! Session state: the collaboration graph, the current center of the
//! universe, and the path tree rooted at it.
//!
//! A generation counter is bumped on every center change so callers holding
//! results can tell whether they were computed against the current tree.

use std::fmt::Debug;
use std::hash::Hash;

use log::{info, warn};

use crate::config::UniverseSettings;
use crate::error::{GraphError, Result};
use crate::graph::LabeledGraph;
use crate::queries::{self, RankOrder};
use crate::separation::{
    average_separation_with, tree_height, SeparationStrategy, MAX_RECURSIVE_DEPTH,
};
use crate::traversal::{self, build_path_tree, PathStep, PathTree};

pub struct Universe<V, E> {
    graph: LabeledGraph<V, E>,
    tree: PathTree<V>,
    generation: u64,
    separation: SeparationStrategy,
    rank_limit: usize,
}

impl<V, E> Universe<V, E>
where
    V: Eq + Hash + Clone + Debug + Ord,
{
    /// Take ownership of a fully built graph and center it on `center`.
    pub fn new(graph: LabeledGraph<V, E>, center: V) -> Result<Self> {
        let defaults = UniverseSettings::default();
        let tree = build_path_tree(&graph, &center)?;
        info!("center of the universe is {:?}", center);
        Ok(Self {
            graph,
            tree,
            generation: 0,
            separation: defaults.separation,
            rank_limit: defaults.rank_limit,
        })
    }

    pub fn with_strategy(mut self, separation: SeparationStrategy) -> Self {
        self.separation = separation;
        self
    }

    pub fn with_rank_limit(mut self, rank_limit: usize) -> Self {
        self.rank_limit = rank_limit;
        self
    }

    pub fn graph(&self) -> &LabeledGraph<V, E> {
        &self.graph
    }

    pub fn tree(&self) -> &PathTree<V> {
        &self.tree
    }

    pub fn center(&self) -> &V {
        self.tree.root()
    }

    /// Number of center changes since the session was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Re-center the universe, rebuilding the path tree.
    ///
    /// Returns the new center's average separation, or None when it has no
    /// collaborators. On error the previous center and tree stay in place.
    pub fn change_center(&mut self, center: V) -> Result<Option<f64>> {
        let tree = build_path_tree(&self.graph, &center)?;
        let strategy = self.strategy_for(&tree);
        let average = match average_separation_with(&tree, &center, strategy) {
            Ok(avg) => Some(avg),
            Err(GraphError::SingleVertexTree(_)) => None,
            Err(e) => return Err(e),
        };

        self.tree = tree;
        self.generation += 1;

        match average {
            Some(avg) => info!(
                "center of the universe is {:?} (generation {}), average separation {:.3}",
                center, self.generation, avg
            ),
            None => info!(
                "center of the universe is {:?} (generation {}), no collaborators",
                center, self.generation
            ),
        }
        Ok(average)
    }

    /// Average separation of the current center.
    pub fn average_separation(&self) -> Result<f64> {
        average_separation_with(&self.tree, self.tree.root(), self.strategy_for(&self.tree))
    }

    /// The configured strategy, or `LevelOrder` when `tree` is too deep to recurse.
    fn strategy_for(&self, tree: &PathTree<V>) -> SeparationStrategy {
        if self.separation != SeparationStrategy::Recursive {
            return self.separation;
        }
        let height = tree_height(tree);
        if height > MAX_RECURSIVE_DEPTH {
            warn!(
                "tree height {} exceeds {}, using level-order depth sum",
                height, MAX_RECURSIVE_DEPTH
            );
            SeparationStrategy::LevelOrder
        } else {
            SeparationStrategy::Recursive
        }
    }

    /// Path from `v` to the current center; empty if unreachable.
    pub fn path_to_center(&self, v: &V) -> Vec<V> {
        traversal::path_to_root(&self.tree, v)
    }

    /// Hops from `v` to the center with the label shared on each hop.
    pub fn path_steps(&self, v: &V) -> Result<Vec<PathStep<'_, V, E>>> {
        traversal::path_steps(&self.graph, &self.tree, v)
    }

    /// Vertices with no path to the center, sorted.
    pub fn infinite_separation(&self) -> Vec<V> {
        let mut missing: Vec<V> = queries::missing_vertices(&self.graph, &self.tree)
            .into_iter()
            .collect();
        missing.sort();
        missing
    }

    pub fn list_by_degree(&self, low: usize, high: usize) -> Vec<V> {
        queries::list_by_degree_range(&self.graph, low, high)
    }

    pub fn list_by_separation(&self, low: usize, high: usize) -> Vec<V> {
        queries::list_by_separation_range(&self.tree, low, high)
    }

    /// Worst centers first. Valid requests above the rank limit are clamped.
    pub fn worst_centers(&self, count: usize) -> Result<Vec<V>> {
        self.ranked(count, RankOrder::Worst)
    }

    /// Best centers first. Valid requests above the rank limit are clamped.
    pub fn best_centers(&self, count: usize) -> Result<Vec<V>> {
        self.ranked(count, RankOrder::Best)
    }

    fn ranked(&self, count: usize, order: RankOrder) -> Result<Vec<V>> {
        let count = if count > self.rank_limit && count < self.graph.num_vertices() {
            warn!(
                "ranking of {} clamped to rank_limit {}",
                count, self.rank_limit
            );
            self.rank_limit
        } else {
            count
        };
        queries::rank(&self.graph, &self.tree, count, order, self.strategy_for(&self.tree))
    }
}

impl<E> Universe<String, E> {
    /// Center the graph on `settings.center` with the configured strategy
    /// and rank limit.
    pub fn from_settings(graph: LabeledGraph<String, E>, settings: &UniverseSettings) -> Result<Self> {
        Ok(Self::new(graph, settings.center.clone())?
            .with_strategy(settings.separation)
            .with_rank_limit(settings.rank_limit))
    }
}
