use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, Result};

/// Index of a label in the graph's label arena.
///
/// Both directions of an undirected edge hold the same id, so a label
/// mutated through one direction is seen through the other.
pub type LabelId = usize;

/// In-memory labeled graph: adjacency maps + a label arena.
///
/// Edges are directed. `outgoing[u][v]` and `incoming[v][u]` both hold the
/// label id of u→v and are populated together. Every vertex has an entry in
/// both maps, even with no edges.
#[derive(Debug, Clone)]
pub struct LabeledGraph<V, E> {
    outgoing: HashMap<V, HashMap<V, LabelId>>,
    incoming: HashMap<V, HashMap<V, LabelId>>,
    labels: Vec<E>,
}

impl<V, E> LabeledGraph<V, E>
where
    V: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            labels: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    ///
    /// `edge_count` sizes the label arena. The arena never shrinks: every
    /// insert on an existing pair adds a label and orphans the old one.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(vertex_count),
            incoming: HashMap::with_capacity(vertex_count),
            labels: Vec::with_capacity(edge_count),
        }
    }

    /// Add a vertex. Returns false if it was already present.
    pub fn insert_vertex(&mut self, v: V) -> bool {
        if self.outgoing.contains_key(&v) {
            return false;
        }
        self.incoming.insert(v.clone(), HashMap::new());
        self.outgoing.insert(v, HashMap::new());
        true
    }

    /// Add a directed edge u→v, replacing any existing u→v label.
    ///
    /// The replaced label stays in the arena, so a reverse edge that shared
    /// it keeps its value.
    pub fn insert_directed(&mut self, u: &V, v: &V, label: E) -> Result<LabelId> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let id = self.push_label(label);
        self.link(u, v, id);
        Ok(id)
    }

    /// Add u→v and v→u sharing a single label.
    pub fn insert_undirected(&mut self, u: &V, v: &V, label: E) -> Result<LabelId> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let id = self.push_label(label);
        self.link(u, v, id);
        self.link(v, u, id);
        Ok(id)
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.outgoing.contains_key(v)
    }

    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.outgoing
            .get(u)
            .is_some_and(|targets| targets.contains_key(v))
    }

    /// Label of the edge u→v.
    pub fn label(&self, u: &V, v: &V) -> Result<&E> {
        let id = self.label_id(u, v)?;
        Ok(&self.labels[id])
    }

    /// Mutable label of the edge u→v. Shared with v→u for undirected edges.
    pub fn label_mut(&mut self, u: &V, v: &V) -> Result<&mut E> {
        let id = self.label_id(u, v)?;
        Ok(&mut self.labels[id])
    }

    /// Arena id of the label on u→v.
    pub fn label_id(&self, u: &V, v: &V) -> Result<LabelId> {
        self.outgoing
            .get(u)
            .and_then(|targets| targets.get(v))
            .copied()
            .ok_or_else(|| GraphError::no_such_edge(u, v))
    }

    /// Resolve a label id handed out by this graph.
    pub fn label_by_id(&self, id: LabelId) -> Option<&E> {
        self.labels.get(id)
    }

    /// Vertices reachable from `v` by one outgoing edge.
    pub fn out_neighbors(&self, v: &V) -> Result<impl Iterator<Item = &V> + '_> {
        self.outgoing
            .get(v)
            .map(|targets| targets.keys())
            .ok_or_else(|| GraphError::unknown_vertex(v))
    }

    /// Vertices with an edge into `v`.
    pub fn in_neighbors(&self, v: &V) -> Result<impl Iterator<Item = &V> + '_> {
        self.incoming
            .get(v)
            .map(|sources| sources.keys())
            .ok_or_else(|| GraphError::unknown_vertex(v))
    }

    pub fn out_degree(&self, v: &V) -> Result<usize> {
        self.outgoing
            .get(v)
            .map(HashMap::len)
            .ok_or_else(|| GraphError::unknown_vertex(v))
    }

    pub fn in_degree(&self, v: &V) -> Result<usize> {
        self.incoming
            .get(v)
            .map(HashMap::len)
            .ok_or_else(|| GraphError::unknown_vertex(v))
    }

    /// All vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.outgoing.keys()
    }

    /// `(vertex, out_degree, in_degree)` for every vertex.
    pub fn degrees(&self) -> impl Iterator<Item = (&V, usize, usize)> + '_ {
        self.outgoing.iter().map(|(v, targets)| {
            let in_degree = self.incoming.get(v).map_or(0, HashMap::len);
            (v, targets.len(), in_degree)
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of directed edges. An undirected edge counts twice.
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(HashMap::len).sum()
    }

    /// Number of labels allocated, including ones orphaned by overwrites.
    ///
    /// Grows by one per edge insert; an upper bound on the live labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Approximate memory usage in bytes, excluding heap data owned by
    /// vertices and labels.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let entry = size_of::<V>() + size_of::<LabelId>();
        let vertex_mem = self.outgoing.len() * 2 * (size_of::<V>() + 48);
        let edge_mem = self.edge_count() * 2 * entry;
        let label_mem = self.labels.len() * size_of::<E>();

        vertex_mem + edge_mem + label_mem
    }

    fn check_vertex(&self, v: &V) -> Result<()> {
        if self.has_vertex(v) {
            Ok(())
        } else {
            Err(GraphError::unknown_vertex(v))
        }
    }

    fn push_label(&mut self, label: E) -> LabelId {
        self.labels.push(label);
        self.labels.len() - 1
    }

    /// Both endpoints must already be checked.
    fn link(&mut self, u: &V, v: &V, id: LabelId) {
        if let Some(targets) = self.outgoing.get_mut(u) {
            targets.insert(v.clone(), id);
        }
        if let Some(sources) = self.incoming.get_mut(v) {
            sources.insert(u.clone(), id);
        }
    }
}

impl<V, E> Default for LabeledGraph<V, E>
where
    V: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn movies(titles: &[&str]) -> BTreeSet<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_insert_vertex_idempotent() {
        let mut g: LabeledGraph<&str, ()> = LabeledGraph::new();
        assert!(g.insert_vertex("A"));
        assert!(!g.insert_vertex("A"));
        assert_eq!(g.num_vertices(), 1);
        assert_eq!(g.out_degree(&"A"), Ok(0));
        assert_eq!(g.in_degree(&"A"), Ok(0));
    }

    #[test]
    fn test_insert_directed_unknown_vertex() {
        let mut g: LabeledGraph<&str, u32> = LabeledGraph::new();
        g.insert_vertex("A");
        let err = g.insert_directed(&"A", &"B", 1).unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex("\"B\"".to_string()));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_insert_undirected_unknown_endpoint() {
        let mut g: LabeledGraph<&str, u32> = LabeledGraph::new();
        g.insert_vertex("A");
        assert_eq!(
            g.insert_undirected(&"Z", &"A", 1),
            Err(GraphError::UnknownVertex("\"Z\"".to_string()))
        );
        assert_eq!(
            g.insert_undirected(&"A", &"Z", 1),
            Err(GraphError::UnknownVertex("\"Z\"".to_string()))
        );
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.label_count(), 0);
        assert_eq!(g.in_degree(&"A"), Ok(0));
    }

    #[test]
    fn test_overwrite_orphans_old_label() {
        let mut g: LabeledGraph<&str, u32> = LabeledGraph::new();
        g.insert_vertex("A");
        g.insert_vertex("B");
        let first = g.insert_undirected(&"A", &"B", 1).unwrap();
        let second = g.insert_undirected(&"A", &"B", 2).unwrap();
        assert_ne!(first, second);
        assert_eq!(g.label_count(), 2);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.label(&"B", &"A"), Ok(&2));
        // still resolvable by id, no longer on any edge
        assert_eq!(g.label_by_id(first), Some(&1));
    }

    #[test]
    fn test_insert_directed_one_way() {
        let mut g: LabeledGraph<&str, u32> = LabeledGraph::new();
        g.insert_vertex("A");
        g.insert_vertex("B");
        g.insert_directed(&"A", &"B", 7).unwrap();
        assert!(g.has_edge(&"A", &"B"));
        assert!(!g.has_edge(&"B", &"A"));
        assert_eq!(g.out_degree(&"A"), Ok(1));
        assert_eq!(g.in_degree(&"B"), Ok(1));
        assert_eq!(g.in_degree(&"A"), Ok(0));
        assert_eq!(g.label(&"A", &"B"), Ok(&7));
    }

    #[test]
    fn test_insert_directed_overwrites() {
        let mut g: LabeledGraph<&str, u32> = LabeledGraph::new();
        g.insert_vertex("A");
        g.insert_vertex("B");
        g.insert_undirected(&"A", &"B", 1).unwrap();
        g.insert_directed(&"A", &"B", 2).unwrap();
        assert_eq!(g.label(&"A", &"B"), Ok(&2));
        // the reverse direction keeps the original label
        assert_eq!(g.label(&"B", &"A"), Ok(&1));
        assert_eq!(g.out_degree(&"A"), Ok(1));
    }

    #[test]
    fn test_undirected_label_is_shared() {
        let mut g: LabeledGraph<&str, BTreeSet<String>> = LabeledGraph::new();
        g.insert_vertex("A");
        g.insert_vertex("B");
        g.insert_undirected(&"A", &"B", BTreeSet::new()).unwrap();

        g.label_mut(&"A", &"B").unwrap().insert("Footloose".to_string());
        g.label_mut(&"B", &"A").unwrap().insert("Tremors".to_string());

        let expected = movies(&["Footloose", "Tremors"]);
        assert_eq!(g.label(&"A", &"B"), Ok(&expected));
        assert_eq!(g.label(&"B", &"A"), Ok(&expected));
        assert_eq!(g.label_id(&"A", &"B"), g.label_id(&"B", &"A"));
        assert_eq!(g.label_count(), 1);
    }

    #[test]
    fn test_label_missing_edge() {
        let mut g: LabeledGraph<&str, u32> = LabeledGraph::new();
        g.insert_vertex("A");
        g.insert_vertex("B");
        assert_eq!(
            g.label(&"A", &"B"),
            Err(GraphError::NoSuchEdge {
                from: "\"A\"".to_string(),
                to: "\"B\"".to_string(),
            })
        );
        assert!(g.label_mut(&"A", &"Z").is_err());
    }

    #[test]
    fn test_neighbors_of_absent_vertex() {
        let g: LabeledGraph<&str, u32> = LabeledGraph::new();
        assert!(g.out_neighbors(&"A").is_err());
        assert!(g.in_neighbors(&"A").is_err());
        assert!(g.out_degree(&"A").is_err());
        assert!(g.in_degree(&"A").is_err());
    }

    #[test]
    fn test_neighbors() {
        let mut g: LabeledGraph<u64, ()> = LabeledGraph::new();
        for i in 0..4 {
            g.insert_vertex(i);
        }
        g.insert_directed(&0, &1, ()).unwrap();
        g.insert_directed(&0, &2, ()).unwrap();
        g.insert_directed(&3, &0, ()).unwrap();

        let mut out: Vec<u64> = g.out_neighbors(&0).unwrap().copied().collect();
        out.sort();
        assert_eq!(out, vec![1, 2]);
        let inc: Vec<u64> = g.in_neighbors(&0).unwrap().copied().collect();
        assert_eq!(inc, vec![3]);
    }

    #[test]
    fn test_graph_counts() {
        let mut g: LabeledGraph<u64, ()> = LabeledGraph::with_capacity(3, 2);
        for i in 0..3 {
            g.insert_vertex(i);
        }
        g.insert_undirected(&0, &1, ()).unwrap();
        g.insert_undirected(&1, &2, ()).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.vertices().count(), 3);
        assert!(g.memory_usage() > 0);
    }
}
