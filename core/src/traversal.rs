use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::error::{GraphError, Result};
use crate::graph::{LabelId, LabeledGraph};

/// Shortest-path tree rooted at a center vertex.
///
/// Every tree edge points from child to parent and carries the label id of
/// the original graph edge that justified it. The root has no outgoing edge.
/// Vertices unreachable from the root are absent.
#[derive(Debug, Clone)]
pub struct PathTree<V> {
    root: V,
    tree: LabeledGraph<V, LabelId>,
}

impl<V> PathTree<V>
where
    V: Eq + Hash + Clone + Debug,
{
    pub fn root(&self) -> &V {
        &self.root
    }

    /// The arborescence as a plain labeled graph.
    pub fn graph(&self) -> &LabeledGraph<V, LabelId> {
        &self.tree
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.tree.has_vertex(v)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.tree.vertices()
    }

    pub fn num_vertices(&self) -> usize {
        self.tree.num_vertices()
    }

    /// BFS parent of `v`. None for the root and for absent vertices.
    pub fn parent(&self, v: &V) -> Option<&V> {
        self.tree.out_neighbors(v).ok()?.next()
    }

    /// Label id (in the source graph's arena) of the edge from `v` to its parent.
    pub fn parent_label(&self, v: &V) -> Option<LabelId> {
        let parent = self.parent(v)?;
        self.tree.label(v, parent).ok().copied()
    }

    /// Vertices whose parent is `v`.
    pub fn children(&self, v: &V) -> Result<impl Iterator<Item = &V> + '_> {
        self.tree.in_neighbors(v)
    }
}

/// One hop of a reconstructed path, with the label that joins the two vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep<'a, V, E> {
    pub vertex: V,
    pub parent: V,
    pub label: &'a E,
}

/// Build the shortest-path tree of `graph` rooted at `source`.
///
/// Level-order BFS over out-edges. Each vertex enters the tree once, at its
/// minimum hop distance, with a single edge to the vertex it was discovered
/// from. The tree edge reuses the label of the original edge child→parent,
/// or parent→child when only that direction exists.
pub fn build_path_tree<V, E>(graph: &LabeledGraph<V, E>, source: &V) -> Result<PathTree<V>>
where
    V: Eq + Hash + Clone + Debug,
{
    if graph.num_vertices() == 0 {
        return Err(GraphError::EmptyGraph);
    }
    if !graph.has_vertex(source) {
        return Err(GraphError::UnknownCenter(format!("{source:?}")));
    }

    let mut tree: LabeledGraph<V, LabelId> =
        LabeledGraph::with_capacity(graph.num_vertices(), graph.num_vertices());
    tree.insert_vertex(source.clone());

    let mut visited: HashSet<&V> = HashSet::with_capacity(graph.num_vertices());
    let mut queue: VecDeque<&V> = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for next in graph.out_neighbors(current)? {
            if !visited.insert(next) {
                continue;
            }
            queue.push_back(next);

            let label = graph
                .label_id(next, current)
                .or_else(|_| graph.label_id(current, next))?;
            tree.insert_vertex(next.clone());
            tree.insert_directed(next, current, label)?;
        }
    }

    debug!(
        "path tree from {:?}: {} of {} vertices reached",
        source,
        tree.num_vertices(),
        graph.num_vertices()
    );

    Ok(PathTree {
        root: source.clone(),
        tree,
    })
}

/// Walk parent pointers from `v` up to the root.
///
/// Returns `[v, parent(v), ..., root]`, or an empty path when `v` is not in
/// the tree (unreachable from the center).
pub fn path_to_root<V>(tree: &PathTree<V>, v: &V) -> Vec<V>
where
    V: Eq + Hash + Clone + Debug,
{
    let mut path = Vec::new();
    if !tree.has_vertex(v) {
        return path;
    }

    let mut current = v;
    loop {
        path.push(current.clone());
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    path
}

/// Path from `v` to the root as labeled hops, labels borrowed from `graph`.
///
/// Empty when `v` is unreachable or is the root itself.
pub fn path_steps<'a, V, E>(
    graph: &'a LabeledGraph<V, E>,
    tree: &PathTree<V>,
    v: &V,
) -> Result<Vec<PathStep<'a, V, E>>>
where
    V: Eq + Hash + Clone + Debug,
{
    let path = path_to_root(tree, v);
    path.windows(2)
        .map(|pair| -> Result<PathStep<'a, V, E>> {
            let label = graph.label(&pair[0], &pair[1])?;
            Ok(PathStep {
                vertex: pair[0].clone(),
                parent: pair[1].clone(),
                label,
            })
        })
        .collect()
}
