use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, NodeIndexable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use doorway_core::Crs;

use crate::error::GraphError;

/// Identifier of a graph node, as given by the map source (OSM node ids).
pub type NodeId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WalkNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Walkway {
    pub length: f64,
}

/// Pedestrian network: nodes with planar (or lon/lat) coordinates, edges
/// weighted by physical length.
///
/// Undirected edges are stored as a pair of opposite arcs so the router only
/// ever follows outgoing edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkGraph {
    crs: Crs,
    directed: bool,
    graph: StableGraph<WalkNode, Walkway>,
    node_indices: HashMap<NodeId, NodeIndex>,
}

impl WalkGraph {
    pub fn new(crs: impl Into<Crs>, directed: bool) -> Self {
        Self {
            crs: crs.into(),
            directed,
            graph: StableGraph::new(),
            node_indices: HashMap::new(),
        }
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn add_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), GraphError> {
        if self.node_indices.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        let idx = self.graph.add_node(WalkNode { id, x, y });
        self.node_indices.insert(id, idx);
        Ok(())
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, length: f64) -> Result<(), GraphError> {
        let src_idx = self.index_of(source).ok_or(GraphError::UnknownNode { id: source })?;
        let tgt_idx = self.index_of(target).ok_or(GraphError::UnknownNode { id: target })?;
        if !length.is_finite() || length < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: source,
                to: target,
                weight: length,
            });
        }

        self.graph.add_edge(src_idx, tgt_idx, Walkway { length });
        if !self.directed && src_idx != tgt_idx {
            self.graph.add_edge(tgt_idx, src_idx, Walkway { length });
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of stored arcs (an undirected edge counts twice).
    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_indices.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&WalkNode> {
        self.index_of(id).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &WalkNode> + '_ {
        self.graph.node_weights()
    }

    /// Smallest node id; the default origin when a query names none.
    pub fn min_node_id(&self) -> Option<NodeId> {
        self.node_indices.keys().copied().min()
    }

    /// Directed length of the cheapest arc `source -> target`, if any.
    pub fn arc_length(&self, source: NodeId, target: NodeId) -> Option<f64> {
        let (s, t) = (self.index_of(source)?, self.index_of(target)?);
        self.graph
            .edges(s)
            .filter(|e| e.target() == t)
            .map(|e| e.weight().length)
            .min_by(f64::total_cmp)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_indices.get(&id).copied()
    }

    pub(crate) fn id_at(&self, idx: NodeIndex) -> Option<NodeId> {
        self.graph.node_weight(idx).map(|n| n.id)
    }

    pub(crate) fn index_bound(&self) -> usize {
        self.graph.node_bound()
    }

    pub(crate) fn arcs_from(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph
            .edges(idx)
            .map(|edge| (edge.target(), edge.weight().length))
    }
}
