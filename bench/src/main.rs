use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use costar_core::{LabeledGraph, SeparationStrategy, MAX_RECURSIVE_DEPTH};
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Synthetic collaboration graph: vertices are performer ids, labels are the
/// id of the production that linked them.
type CastGraph = LabeledGraph<u64, u32>;

#[derive(Debug, Parser)]
#[command(name = "costar-bench", about = "Benchmark costar-core separation queries")]
struct Args {
    /// Topology to generate
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of vertices per generated graph
    #[arg(default_value_t = 200_000)]
    node_count: u64,

    /// Also rank the N best centers (one BFS per vertex; keep graphs small)
    #[arg(long, value_name = "N")]
    rank: Option<usize>,

    /// Log core diagnostics
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator (default)
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Erdos-Renyi uniform random edges (leaves isolated vertices)
    Random,
    /// Two dense cliques connected by a thin bridge
    Barbell,
    /// Disconnected communities (large missing set)
    Islands,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to install logger")?;

    if args.node_count < 2 {
        bail!("node_count must be at least 2, got {}", args.node_count);
    }

    println!("costar-bench");
    println!("============");
    println!();

    let generators: Vec<(&str, fn(u64) -> CastGraph)> = match args.mode {
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        Mode::Islands => vec![("Islands (disconnected communities)", gen_islands)],
        Mode::All => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> CastGraph),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("Islands (disconnected communities)", gen_islands),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, args.node_count, args.rank)?;
    }
    Ok(())
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &str,
    generator: fn(u64) -> CastGraph,
    node_count: u64,
    rank: Option<usize>,
) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} vertices", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s: {} vertices, {} edges, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.num_vertices(),
        graph.edge_count() / 2,
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();

    // Vertex 0 is the root or a hub for every generator
    let t = Instant::now();
    let tree = costar_core::build_path_tree(&graph, &0)?;
    let tree_ms = ms(t);

    let t = Instant::now();
    let missing = costar_core::missing_vertices(&graph, &tree);
    let missing_ms = ms(t);

    let depths = costar_core::separations(&tree);
    let (far, height) = depths
        .iter()
        .max_by_key(|(v, depth)| (**depth, std::cmp::Reverse(**v)))
        .map(|(v, depth)| (**v, *depth))
        .unwrap_or((0, 0));

    let t = Instant::now();
    let path = costar_core::path_to_root(&tree, &far);
    let path_ms = ms(t);

    println!("{:<28} {:>12} {:>10}", "query", "result", "time");
    println!("{:-<28} {:->12} {:->10}", "", "", "");
    println!("{:<28} {:>12} {:>8.1}ms", "path tree (reached)", tree.num_vertices(), tree_ms);
    println!("{:<28} {:>12} {:>8.1}ms", "missing vertices", missing.len(), missing_ms);
    println!("{:<28} {:>12} {:>8.3}ms", "path to farthest (hops)", path.len() - 1, path_ms);

    for strategy in [SeparationStrategy::LevelOrder, SeparationStrategy::Recursive] {
        if strategy == SeparationStrategy::Recursive && height > MAX_RECURSIVE_DEPTH {
            warn!("tree height {height} too deep for recursive depth sum, skipped");
            continue;
        }
        let t = Instant::now();
        match costar_core::average_separation_with(&tree, &0, strategy) {
            Ok(avg) => println!(
                "{:<28} {:>12.3} {:>8.1}ms",
                format!("avg separation ({:?})", strategy),
                avg,
                ms(t)
            ),
            Err(e) => println!("{:<28} {:>12}", format!("avg separation ({:?})", strategy), e),
        }
    }

    let t = Instant::now();
    let low_degree = costar_core::list_by_degree_range(&graph, 1, 2);
    println!("{:<28} {:>12} {:>8.1}ms", "degree in [1, 2]", low_degree.len(), ms(t));

    let t = Instant::now();
    let near = costar_core::list_by_separation_range(&tree, 1, 3);
    println!("{:<28} {:>12} {:>8.1}ms", "separation in [1, 3]", near.len(), ms(t));

    if let Some(count) = rank {
        let t = Instant::now();
        match costar_core::best_centers(&graph, &tree, count) {
            Ok(best) => {
                println!("{:<28} {:>12} {:>8.1}ms", "best centers", best.len(), ms(t));
                info!("best centers: {:?}", best);
            }
            Err(e) => warn!("ranking skipped: {e}"),
        }
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, undirected edges
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn with_vertices(node_count: u64, edges_per_node: u64) -> CastGraph {
    let mut graph =
        CastGraph::with_capacity(node_count as usize, (node_count * edges_per_node) as usize);
    for i in 0..node_count {
        graph.insert_vertex(i);
    }
    graph
}

/// Link two performers unless they already share a production or are the
/// same vertex.
fn link(graph: &mut CastGraph, a: u64, b: u64, production: u32) {
    if a != b && !graph.has_edge(&a, &b) {
        if let Err(e) = graph.insert_undirected(&a, &b, production) {
            warn!("generator produced a dangling link: {e}");
        }
    }
}

/// L-system fractal tree: each vertex spawns three children. Log depth,
/// exponential width.
fn gen_lsystem(node_count: u64) -> CastGraph {
    let mut graph = with_vertices(node_count, 1);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                link(&mut graph, parent, child, rng.next(1000) as u32);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Scale-free via edge-list sampling: a new vertex attaches to the endpoint
/// of a random existing edge, so well-connected vertices attract more links.
fn gen_scale_free(node_count: u64) -> CastGraph {
    let edges_per_node = 5u64;
    let mut graph = with_vertices(node_count, edges_per_node);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            link(&mut graph, i, j, 0);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            link(&mut graph, new_node, target, new_node as u32);
            endpoints.push(new_node);
            endpoints.push(target);
        }
    }

    graph
}

/// Erdos-Renyi: ~2 edges per vertex, uniformly at random. Sparse enough to
/// leave some vertices with no collaborators.
fn gen_random(node_count: u64) -> CastGraph {
    let target_edges = node_count * 2;
    let mut graph = with_vertices(node_count, target_edges / node_count);
    let mut rng = FastRng::new(54321);

    for production in 0..target_edges {
        let a = rng.next(node_count);
        let b = rng.next(node_count);
        link(&mut graph, a, b, production as u32);
    }

    graph
}

/// Barbell: two dense cliques joined by a chain of bridge vertices.
fn gen_barbell(node_count: u64) -> CastGraph {
    let bridge_len = 10u64.min(node_count / 2);
    let clique_size = (node_count - bridge_len) / 2;
    let mut graph = with_vertices(node_count, 20);
    let mut rng = FastRng::new(99999);

    let b_start = clique_size + bridge_len;
    for base in [0, b_start] {
        for i in 0..clique_size {
            for _ in 0..20u64.min(clique_size.saturating_sub(1)) {
                let target = rng.next(clique_size);
                link(&mut graph, base + i, base + target, base as u32);
            }
        }
    }

    // chain: last of clique A → bridge → first of clique B
    let mut prev = clique_size.saturating_sub(1);
    for id in clique_size..b_start {
        link(&mut graph, prev, id, u32::MAX);
        prev = id;
    }
    if b_start < node_count {
        link(&mut graph, prev, b_start, u32::MAX);
    }

    graph
}

/// Communities of ~1000 vertices, each grown by random attachment with no
/// links between communities. Only vertex 0's community is reachable.
fn gen_islands(node_count: u64) -> CastGraph {
    let island = 1000u64;
    let mut graph = with_vertices(node_count, 2);
    let mut rng = FastRng::new(77777);
    let mut members: Vec<u64> = Vec::with_capacity(island as usize);

    for v in 0..node_count {
        if v % island == 0 {
            members.clear();
        }
        if !members.is_empty() {
            let anchor = members[rng.next(members.len() as u64) as usize];
            link(&mut graph, v, anchor, (v / island) as u32);
        }
        members.push(v);
    }

    graph
}
