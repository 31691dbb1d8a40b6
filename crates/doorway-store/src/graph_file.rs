use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info, warn};

use doorway_graph::{NodeId, WalkGraph};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub crs: String,
    #[serde(default)]
    pub directed: bool,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    pub length: f64,
}

impl GraphFile {
    pub fn into_graph(self) -> Result<WalkGraph> {
        let mut graph = WalkGraph::new(self.crs, self.directed);
        for node in self.nodes {
            graph.add_node(node.id, node.x, node.y)?;
        }
        for (i, edge) in self.edges.into_iter().enumerate() {
            graph
                .add_edge(edge.source, edge.target, edge.length)
                .with_context(|| format!("edge #{}", i))?;
        }
        Ok(graph)
    }
}

pub fn parse_graph(json: &str) -> Result<WalkGraph> {
    let file: GraphFile = serde_json::from_str(json).context("failed to parse graph JSON")?;
    file.into_graph()
}

/// Import a graph from its JSON source.
pub fn read_graph(path: &Path) -> Result<WalkGraph> {
    let file = File::open(path).with_context(|| format!("failed to open graph file {}", path.display()))?;
    let parsed: GraphFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse graph file {}", path.display()))?;
    let graph = parsed.into_graph()?;
    info!(
        nodes = graph.node_count(),
        arcs = graph.arc_count(),
        crs = %graph.crs(),
        "graph imported"
    );
    Ok(graph)
}

pub fn save_graph_cache(path: &Path, graph: &WalkGraph) -> Result<()> {
    let file = File::create(path).context("failed to create graph cache")?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, graph).context("failed to serialize graph")?;
    Ok(())
}

/// `None` when no cache file exists.
pub fn load_graph_cache(path: &Path) -> Result<Option<WalkGraph>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).context("failed to open graph cache")?;
    let reader = BufReader::new(file);
    let graph: WalkGraph = bincode::deserialize_from(reader).context("failed to deserialize graph")?;
    Ok(Some(graph))
}

/// Load the graph, going through the bincode cache when one is configured.
///
/// A cache older than its JSON source is ignored and rewritten. An
/// unreadable cache is treated the same way.
pub fn load_graph(source: &Path, cache: Option<&Path>) -> Result<WalkGraph> {
    let Some(cache) = cache else {
        return read_graph(source);
    };

    if is_fresh(cache, source) {
        match load_graph_cache(cache) {
            Ok(Some(graph)) => {
                debug!(path = %cache.display(), "graph loaded from cache");
                return Ok(graph);
            }
            Ok(None) => {}
            Err(e) => warn!(path = %cache.display(), error = %e, "ignoring unreadable graph cache"),
        }
    }

    let graph = read_graph(source)?;
    if let Err(e) = save_graph_cache(cache, &graph) {
        warn!(path = %cache.display(), error = %e, "could not write graph cache");
    }
    Ok(graph)
}

fn is_fresh(cache: &Path, source: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified()).ok();
    match (modified(cache), modified(source)) {
        (Some(c), Some(s)) => c >= s,
        (Some(_), None) => true,
        _ => false,
    }
}
