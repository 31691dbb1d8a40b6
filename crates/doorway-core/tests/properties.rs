use doorway_core::{join, normalize, BuildingFootprint, EntranceGeometry, EntranceShape, Layer};
use geo::{polygon, ConvexHull, Intersects, LineString, MultiPoint, Point, Polygon};
use proptest::prelude::*;

fn rect(x0: i32, y0: i32, w: i32, h: i32) -> Polygon<f64> {
    let (x0, y0, x1, y1) = (x0 as f64, y0 as f64, (x0 + w) as f64, (y0 + h) as f64);
    polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]
}

fn twice_area(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> i64 {
    let (ax, ay, bx, by, cx, cy) = (a.0 as i64, a.1 as i64, b.0 as i64, b.1 as i64, c.0 as i64, c.1 as i64);
    ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).abs()
}

proptest! {
    #[test]
    fn join_matches_rectangle_containment(
        boxes in prop::collection::vec((-50i32..50, -50i32..50, 1i32..30, 1i32..30), 1..8),
        points in prop::collection::vec((-60i32..90, -60i32..90), 0..40),
    ) {
        let buildings = Layer::new(
            "EPSG:3116",
            boxes.iter().map(|&(x, y, w, h)| BuildingFootprint::polygon(None, rect(x, y, w, h))).collect(),
        );
        let entrances = Layer::new(
            "EPSG:3116",
            points.iter().map(|&(x, y)| EntranceGeometry::point(None, x as f64, y as f64)).collect(),
        );

        let joined = join(&buildings, &entrances).unwrap();
        prop_assert_eq!(joined.len(), boxes.len());

        for (i, &(bx, by, w, h)) in boxes.iter().enumerate() {
            let expected: Vec<Point<f64>> = points
                .iter()
                .filter(|&&(x, y)| x >= bx && x <= bx + w && y >= by && y <= by + h)
                .map(|&(x, y)| Point::new(x as f64, y as f64))
                .collect();
            let actual: Vec<Point<f64>> = joined[i]
                .iter()
                .map(|e| match &e.shape {
                    EntranceShape::Point(p) => *p,
                    other => panic!("unexpected shape {:?}", other),
                })
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn normalizing_twice_changes_nothing(
        coords in prop::collection::vec((-1000i32..1000, -1000i32..1000), 2..10),
    ) {
        let line = LineString::from(coords.iter().map(|&(x, y)| (x as f64, y as f64)).collect::<Vec<_>>());
        let shape = EntranceShape::Line(line);
        if let Ok(first) = normalize(&shape) {
            let second = normalize(&EntranceShape::Point(first)).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn triangle_centroid_lies_in_convex_hull(
        a in (-100i32..100, -100i32..100),
        b in (-100i32..100, -100i32..100),
        c in (-100i32..100, -100i32..100),
    ) {
        prop_assume!(twice_area(a, b, c) > 0);
        let vertices = vec![
            (a.0 as f64, a.1 as f64),
            (b.0 as f64, b.1 as f64),
            (c.0 as f64, c.1 as f64),
        ];
        let triangle = Polygon::new(LineString::from(vertices.clone()), vec![]);
        let centroid = normalize(&EntranceShape::Polygon(triangle)).unwrap();

        let hull = MultiPoint::from(vertices).convex_hull();
        prop_assert!(hull.intersects(&centroid));
    }
}

#[test]
fn multipolygon_building_collects_from_every_part() {
    let building = BuildingFootprint::new(
        Some("Twin".to_string()),
        geo::MultiPolygon::new(vec![rect(0, 0, 5, 5), rect(20, 0, 5, 5)]),
    );
    let buildings = Layer::new("EPSG:3116", vec![building]);
    let entrances = Layer::new(
        "EPSG:3116",
        vec![
            EntranceGeometry::point(Some("west"), 2.0, 2.0),
            EntranceGeometry::point(Some("gap"), 12.0, 2.0),
            EntranceGeometry::point(Some("east"), 22.0, 2.0),
        ],
    );
    let joined = join(&buildings, &entrances).unwrap();
    let kinds: Vec<_> = joined[0].iter().filter_map(|e| e.entrance_type.as_deref()).collect();
    assert_eq!(kinds, vec!["west", "east"]);
}
