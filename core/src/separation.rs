//! Average degree of separation over a path tree.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use serde::Deserialize;

use crate::error::{GraphError, Result};
use crate::traversal::PathTree;

/// How the per-vertex depth sum is accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationStrategy {
    /// Explicit FIFO walk carrying each vertex's depth. Stack use is constant.
    #[default]
    LevelOrder,
    /// Depth-first recursion; stack depth equals tree height. Sessions fall
    /// back to `LevelOrder` on trees deeper than [`MAX_RECURSIVE_DEPTH`].
    Recursive,
}

/// Deepest tree the recursive depth sum is trusted with.
pub const MAX_RECURSIVE_DEPTH: usize = 10_000;

/// Mean hop distance from `root` to every other vertex of the tree.
pub fn average_separation<V>(tree: &PathTree<V>, root: &V) -> Result<f64>
where
    V: Eq + Hash + Clone + Debug,
{
    average_separation_with(tree, root, SeparationStrategy::default())
}

/// Like [`average_separation`] with an explicit accumulation strategy.
///
/// The depth sum covers the subtree below `root`; the denominator is always
/// the whole tree's vertex count minus one.
#[allow(clippy::cast_precision_loss)]
pub fn average_separation_with<V>(
    tree: &PathTree<V>,
    root: &V,
    strategy: SeparationStrategy,
) -> Result<f64>
where
    V: Eq + Hash + Clone + Debug,
{
    if !tree.has_vertex(root) {
        return Err(GraphError::unknown_vertex(root));
    }
    if tree.num_vertices() <= 1 {
        return Err(GraphError::SingleVertexTree(format!("{root:?}")));
    }

    let total = match strategy {
        SeparationStrategy::LevelOrder => depth_sum_level_order(tree, root)?,
        SeparationStrategy::Recursive => depth_sum_recursive(tree, root, 0)?,
    };

    Ok(total as f64 / (tree.num_vertices() - 1) as f64)
}

/// `depth + Σ depth_sum(child, depth + 1)` over the children of `node`.
fn depth_sum_recursive<V>(tree: &PathTree<V>, node: &V, depth: u64) -> Result<u64>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut total = depth;
    for child in tree.children(node)? {
        total += depth_sum_recursive(tree, child, depth + 1)?;
    }
    Ok(total)
}

fn depth_sum_level_order<V>(tree: &PathTree<V>, root: &V) -> Result<u64>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut total = 0u64;
    let mut queue: VecDeque<(&V, u64)> = VecDeque::new();
    queue.push_back((root, 0));

    while let Some((node, depth)) = queue.pop_front() {
        total += depth;
        for child in tree.children(node)? {
            queue.push_back((child, depth + 1));
        }
    }
    Ok(total)
}

/// Hop distance from the tree root for every vertex in the tree.
pub fn separations<V>(tree: &PathTree<V>) -> HashMap<&V, usize>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut depths: HashMap<&V, usize> = HashMap::with_capacity(tree.num_vertices());
    let mut queue: VecDeque<(&V, usize)> = VecDeque::new();
    queue.push_back((tree.root(), 0));

    while let Some((node, depth)) = queue.pop_front() {
        depths.insert(node, depth);
        if let Ok(children) = tree.children(node) {
            queue.extend(children.map(|c| (c, depth + 1)));
        }
    }
    depths
}

/// Hop count from the root to the deepest vertex.
pub fn tree_height<V>(tree: &PathTree<V>) -> usize
where
    V: Eq + Hash + Clone + Debug,
{
    separations(tree).into_values().max().unwrap_or(0)
}
