//! Nearest-node snapping.
//!
//! Planar graphs index `[x, y, 0]`. Geodetic graphs (lon/lat degrees) index
//! points on the unit sphere: chord length grows monotonically with
//! great-circle distance, so the nearest chord is the nearest haversine
//! neighbour and one R-tree serves both metrics.

use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::debug;

use doorway_config::{DistanceMetric, SnapConfig};

use crate::error::GraphError;
use crate::graph::{NodeId, WalkGraph};

type NodeRtreeItem = GeomWithData<[f64; 3], NodeId>;

/// Immutable nearest-neighbour index over a graph's nodes.
pub struct SnapIndex {
    metric: DistanceMetric,
    points: Vec<NodeRtreeItem>,
    tree: Option<RTree<NodeRtreeItem>>,
}

impl SnapIndex {
    /// Index every node of `graph`. Graphs smaller than
    /// `linear_scan_threshold` are scanned instead of tree-indexed.
    pub fn build(graph: &WalkGraph, config: &SnapConfig) -> Result<Self, GraphError> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut points: Vec<NodeRtreeItem> = graph
            .nodes()
            .filter(|n| n.x.is_finite() && n.y.is_finite())
            .map(|n| GeomWithData::new(embed(config.metric, n.x, n.y), n.id))
            .collect();
        if points.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        points.sort_by_key(|p| p.data);

        let tree = if points.len() >= config.linear_scan_threshold {
            Some(RTree::bulk_load(points.clone()))
        } else {
            None
        };
        debug!(
            nodes = points.len(),
            metric = ?config.metric,
            rtree = tree.is_some(),
            "built snap index"
        );

        Ok(Self { metric: config.metric, points, tree })
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Id of the node closest to `(x, y)`; equal distances go to the lowest id.
    /// `None` only for non-finite query coordinates.
    pub fn nearest(&self, x: f64, y: f64) -> Option<NodeId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let query = embed(self.metric, x, y);

        match &self.tree {
            Some(tree) => {
                let mut candidates = tree.nearest_neighbor_iter_with_distance_2(&query);
                let (first, best) = candidates.next()?;
                let tied = candidates
                    .take_while(|(_, d)| *d == best)
                    .map(|(item, _)| item.data);
                Some(tied.fold(first.data, NodeId::min))
            }
            None => scan(&self.points, &query),
        }
    }
}

/// One-off nearest node lookup. Builds a throwaway [`SnapIndex`]; prefer
/// keeping an index around when snapping many points.
pub fn nearest(graph: &WalkGraph, x: f64, y: f64, metric: DistanceMetric) -> Result<NodeId, GraphError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(GraphError::InvalidCoordinate { x, y });
    }
    let config = SnapConfig {
        metric,
        ..SnapConfig::default()
    };
    SnapIndex::build(graph, &config)?
        .nearest(x, y)
        .ok_or(GraphError::InvalidCoordinate { x, y })
}

fn embed(metric: DistanceMetric, x: f64, y: f64) -> [f64; 3] {
    match metric {
        DistanceMetric::Euclidean => [x, y, 0.0],
        DistanceMetric::Haversine => {
            let (lon, lat) = (x.to_radians(), y.to_radians());
            [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
        }
    }
}

fn distance_2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let (dx, dy, dz) = (a[0] - b[0], a[1] - b[1], a[2] - b[2]);
    dx * dx + dy * dy + dz * dz
}

fn scan(points: &[NodeRtreeItem], query: &[f64; 3]) -> Option<NodeId> {
    let mut best: Option<(f64, NodeId)> = None;
    for point in points {
        let d = distance_2(point.geom(), query);
        best = match best {
            Some((bd, bid)) if bd < d || (bd == d && bid <= point.data) => Some((bd, bid)),
            _ => Some((d, point.data)),
        };
    }
    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(metric: DistanceMetric, threshold: usize) -> SnapConfig {
        SnapConfig {
            metric,
            linear_scan_threshold: threshold,
        }
    }

    fn grid(n: u64) -> WalkGraph {
        let mut graph = WalkGraph::new("EPSG:3116", false);
        for i in 0..n {
            for j in 0..n {
                graph.add_node(i * n + j + 1, i as f64 * 10.0, j as f64 * 10.0).unwrap();
            }
        }
        graph
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = WalkGraph::new("EPSG:3116", false);
        assert!(matches!(
            SnapIndex::build(&graph, &SnapConfig::default()),
            Err(GraphError::EmptyGraph)
        ));
        assert_eq!(nearest(&graph, 0.0, 0.0, DistanceMetric::Euclidean), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn one_off_lookup_rejects_non_finite_query() {
        let graph = grid(2);
        assert!(matches!(
            nearest(&graph, f64::NAN, 0.0, DistanceMetric::Euclidean),
            Err(GraphError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            nearest(&graph, 0.0, f64::INFINITY, DistanceMetric::Haversine),
            Err(GraphError::InvalidCoordinate { .. })
        ));
        assert_eq!(nearest(&graph, 1.0, 1.0, DistanceMetric::Euclidean), Ok(1));
    }

    #[test]
    fn tree_and_scan_agree() {
        let graph = grid(20);
        let tree = SnapIndex::build(&graph, &config(DistanceMetric::Euclidean, 1)).unwrap();
        let linear = SnapIndex::build(&graph, &config(DistanceMetric::Euclidean, 10_000)).unwrap();
        for (x, y) in [(3.0, 4.0), (-50.0, 77.0), (193.0, 190.0), (55.5, 12.1)] {
            assert_eq!(tree.nearest(x, y), linear.nearest(x, y));
        }
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let mut graph = WalkGraph::new("EPSG:3116", false);
        graph.add_node(9, 0.0, 0.0).unwrap();
        graph.add_node(4, 10.0, 0.0).unwrap();
        graph.add_node(6, 5.0, 100.0).unwrap();

        for threshold in [1, 1000] {
            let index = SnapIndex::build(&graph, &config(DistanceMetric::Euclidean, threshold)).unwrap();
            assert_eq!(index.nearest(5.0, 0.0), Some(4));
        }
    }

    #[test]
    fn coincident_nodes_resolve_to_lowest_id() {
        let mut graph = WalkGraph::new("EPSG:3116", false);
        for id in [30, 10, 20] {
            graph.add_node(id, 1.0, 1.0).unwrap();
        }
        let index = SnapIndex::build(&graph, &config(DistanceMetric::Euclidean, 1)).unwrap();
        assert_eq!(index.nearest(0.0, 0.0), Some(10));
    }

    #[test]
    fn haversine_respects_longitude_wrap() {
        let mut graph = WalkGraph::new("EPSG:4326", false);
        graph.add_node(1, 179.9, 0.0).unwrap();
        graph.add_node(2, 170.0, 0.0).unwrap();

        let index = SnapIndex::build(&graph, &config(DistanceMetric::Haversine, 1)).unwrap();
        assert_eq!(index.nearest(-179.9, 0.0), Some(1));

        let planar = SnapIndex::build(&graph, &config(DistanceMetric::Euclidean, 1)).unwrap();
        assert_eq!(planar.nearest(-179.9, 0.0), Some(2));
    }

    #[test]
    fn non_finite_query_is_unsnappable() {
        let index = SnapIndex::build(&grid(2), &SnapConfig::default()).unwrap();
        assert_eq!(index.nearest(f64::NAN, 0.0), None);
    }
}
