//! Actor ↔ movie association into an actor collaboration graph.

use std::collections::{BTreeMap, BTreeSet};

use log::info;

use crate::error::Result;
use crate::graph::LabeledGraph;

/// Actors linked by the set of movie titles they share.
pub type CollaborationGraph = LabeledGraph<String, BTreeSet<String>>;

/// Build the collaboration graph from `(actor, movie)` appearances.
///
/// Every actor becomes a vertex. Two distinct actors who appear in the same
/// movie get one undirected edge whose label collects every title they
/// share. Duplicate appearances are ignored.
pub fn build_collaboration_graph<I, A, M>(appearances: I) -> Result<CollaborationGraph>
where
    I: IntoIterator<Item = (A, M)>,
    A: Into<String>,
    M: Into<String>,
{
    let mut casts: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut actors: BTreeSet<String> = BTreeSet::new();
    for (actor, movie) in appearances {
        let actor = actor.into();
        casts.entry(movie.into()).or_default().insert(actor.clone());
        actors.insert(actor);
    }

    let mut graph = CollaborationGraph::with_capacity(actors.len(), casts.len());
    for actor in actors {
        graph.insert_vertex(actor);
    }

    for (movie, cast) in &casts {
        for a in cast {
            for b in cast {
                if a == b {
                    continue;
                }
                if !graph.has_edge(a, b) {
                    graph.insert_undirected(a, b, BTreeSet::new())?;
                }
                graph.label_mut(a, b)?.insert(movie.clone());
            }
        }
    }

    info!(
        "collaboration graph: {} actors, {} movies, {} links",
        graph.num_vertices(),
        casts.len(),
        graph.edge_count() / 2
    );

    Ok(graph)
}
