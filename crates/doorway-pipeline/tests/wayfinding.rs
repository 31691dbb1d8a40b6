use std::sync::Arc;

use doorway_config::{Config, RouteStrategy, RouterConfig};
use doorway_core::{BuildingFootprint, EntranceGeometry, EntranceShape, GeometryError, Layer};
use doorway_graph::{GraphError, WalkGraph};
use doorway_pipeline::{
    prepare_catalog, BuildingCatalog, EntranceNode, PipelineError, QueryError, QueryOutcome, Wayfinder,
};
use geo::{polygon, LineString, Point};
use pretty_assertions::assert_eq;

const CRS: &str = "EPSG:3116";

/// A(0,0) -10- B(10,0) -5- D(10,5); A -20- C(0,20) -5- D.
fn campus_graph() -> WalkGraph {
    let mut graph = WalkGraph::new(CRS, false);
    graph.add_node(1, 0.0, 0.0).unwrap();
    graph.add_node(2, 10.0, 0.0).unwrap();
    graph.add_node(3, 0.0, 20.0).unwrap();
    graph.add_node(4, 10.0, 5.0).unwrap();
    graph.add_edge(1, 2, 10.0).unwrap();
    graph.add_edge(2, 4, 5.0).unwrap();
    graph.add_edge(1, 3, 20.0).unwrap();
    graph.add_edge(3, 4, 5.0).unwrap();
    graph
}

/// "Hall" spans C and D, with one entrance near each.
fn layers() -> (Layer<BuildingFootprint>, Layer<EntranceGeometry>) {
    let hall = polygon![(x: -1.0, y: 4.0), (x: 11.0, y: 4.0), (x: 11.0, y: 21.0), (x: -1.0, y: 21.0)];
    let shed = polygon![(x: 30.0, y: 30.0), (x: 31.0, y: 30.0), (x: 31.0, y: 31.0), (x: 30.0, y: 31.0)];
    let buildings = Layer::new(
        CRS,
        vec![
            BuildingFootprint::polygon(Some("Hall"), hall),
            BuildingFootprint::polygon(None, shed),
        ],
    );
    let entrances = Layer::new(
        CRS,
        vec![
            EntranceGeometry::point(Some("main"), 0.5, 19.5),
            EntranceGeometry::point(Some("side"), 10.5, 5.0),
            EntranceGeometry::point(Some("street"), 50.0, 50.0),
        ],
    );
    (buildings, entrances)
}

fn wayfinder(strategy: RouteStrategy) -> Wayfinder {
    let graph = campus_graph();
    let (buildings, entrances) = layers();
    let prepared = prepare_catalog(&graph, &buildings, &entrances, &Config::default()).unwrap();
    Wayfinder::new(
        Arc::new(graph),
        Arc::new(prepared.catalog),
        RouterConfig {
            strategy,
            ..RouterConfig::default()
        },
    )
}

#[test]
fn hall_entrances_snap_to_c_and_d() {
    let graph = campus_graph();
    let (buildings, entrances) = layers();
    let prepared = prepare_catalog(&graph, &buildings, &entrances, &Config::default()).unwrap();

    assert_eq!(prepared.catalog.lookup("hall"), &[3, 4]);
    assert_eq!(prepared.diagnostics.snapped, 2);
    assert_eq!(prepared.diagnostics.skipped_degenerate, 0);
    // the shed has no entrance, so it is not catalogued
    assert_eq!(prepared.catalog.len(), 1);
}

#[test]
fn empty_entrances_are_counted_as_degenerate() {
    let graph = campus_graph();
    let (buildings, mut entrances) = layers();
    entrances.features.push(EntranceGeometry::new(
        Some("ghost"),
        EntranceShape::Point(Point::new(f64::NAN, f64::NAN)),
    ));
    entrances
        .features
        .push(EntranceGeometry::new(None, EntranceShape::Line(LineString::new(vec![]))));

    let prepared = prepare_catalog(&graph, &buildings, &entrances, &Config::default()).unwrap();
    assert_eq!(prepared.diagnostics.skipped_degenerate, 2);
    assert_eq!(prepared.diagnostics.snapped, 2);
    assert_eq!(prepared.catalog.lookup("hall"), &[3, 4]);
}

#[test]
fn shortest_route_to_hall_goes_through_b() {
    for strategy in [RouteStrategy::PerTarget, RouteStrategy::SingleSearch, RouteStrategy::Parallel] {
        let finder = wayfinder(strategy);
        match finder.route_to_building(1, "HALL").unwrap() {
            QueryOutcome::Found(found) => {
                assert_eq!(found.nodes, vec![1, 2, 4]);
                assert_eq!(found.weight, 15.0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}

#[test]
fn unknown_building_never_reaches_the_router() {
    let finder = wayfinder(RouteStrategy::default());
    // origin 999 is not in the graph: routing would have failed with UnknownOrigin
    let outcome = finder.route_to_building(999, "Library").unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::UnknownBuilding {
            name: "Library".to_string()
        }
    );
}

#[test]
fn unreachable_entrances_are_no_path() {
    let mut graph = campus_graph();
    graph.add_node(9, 100.0, 100.0).unwrap();
    let (buildings, entrances) = layers();
    let prepared = prepare_catalog(&graph, &buildings, &entrances, &Config::default()).unwrap();
    let finder = Wayfinder::new(Arc::new(graph), Arc::new(prepared.catalog), RouterConfig::default());

    assert_eq!(finder.route_to_building(9, "hall").unwrap(), QueryOutcome::NoPath);
    assert_eq!(finder.default_origin(), Some(1));
}

#[test]
fn crs_disagreement_with_graph_is_fatal() {
    let graph = campus_graph();
    let (buildings, _) = layers();
    let entrances = Layer::new("EPSG:4326", vec![EntranceGeometry::point(None, 0.0, 0.0)]);
    let err = prepare_catalog(&graph, &buildings, &entrances, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Geometry(GeometryError::CoordinateSystemMismatch { .. })
    ));
}

#[test]
fn empty_graph_is_fatal() {
    let graph = WalkGraph::new(CRS, false);
    let (buildings, entrances) = layers();
    let err = prepare_catalog(&graph, &buildings, &entrances, &Config::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Graph(GraphError::EmptyGraph)));
}

#[tokio::test]
async fn timed_query_matches_direct_query() {
    let finder = wayfinder(RouteStrategy::SingleSearch);
    let direct = finder.route_to_building(1, "hall").unwrap();
    let timed = finder.route_to_building_with_timeout(1, "hall").await.unwrap();
    assert_eq!(direct, timed);
}

/// Square grid of `side * side` nodes, unit edges, ids row by row from 0.
fn grid(side: u64) -> WalkGraph {
    let mut graph = WalkGraph::new(CRS, false);
    for r in 0..side {
        for c in 0..side {
            graph.add_node(r * side + c, c as f64, r as f64).unwrap();
        }
    }
    for r in 0..side {
        for c in 0..side {
            let id = r * side + c;
            if c + 1 < side {
                graph.add_edge(id, id + 1, 1.0).unwrap();
            }
            if r + 1 < side {
                graph.add_edge(id, id + side, 1.0).unwrap();
            }
        }
    }
    graph
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_search_times_out_and_is_retryable() {
    let side = 300;
    let graph = grid(side);
    let last = side * side - 1;
    // entrances clustered in the far corner: each per-target search settles
    // nearly the whole grid
    let rows: Vec<EntranceNode> = [last, last - 1, last - side, last - side - 1]
        .into_iter()
        .map(|node| EntranceNode {
            building: "Depot".to_string(),
            entrance: None,
            node,
        })
        .collect();
    let (catalog, dropped) = BuildingCatalog::from_entrance_nodes(rows, &graph);
    assert_eq!(dropped, 0);

    let finder = Wayfinder::new(
        Arc::new(graph),
        Arc::new(catalog),
        RouterConfig {
            strategy: RouteStrategy::PerTarget,
            timeout_ms: 1,
        },
    );

    let err = finder.route_to_building_with_timeout(0, "depot").await.unwrap_err();
    assert!(matches!(err, QueryError::TimedOut { timeout_ms: 1 }));
    assert!(err.is_retryable());
}
