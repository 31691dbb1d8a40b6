use geo::{BoundingRect, Intersects, LineString, MultiPolygon, Point, Polygon, Rect};

use crate::crs::Crs;

/// A set of features that share one coordinate frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<T> {
    pub crs: Crs,
    pub features: Vec<T>,
}

impl<T> Layer<T> {
    pub fn new(crs: impl Into<Crs>, features: Vec<T>) -> Self {
        Self {
            crs: crs.into(),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A building footprint. OSM buildings are often multipolygons, so a plain
/// polygon is stored as a one-member multipolygon.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingFootprint {
    pub name: Option<String>,
    pub shape: MultiPolygon<f64>,
}

impl BuildingFootprint {
    pub fn new(name: Option<String>, shape: impl Into<MultiPolygon<f64>>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            shape: shape.into(),
        }
    }

    pub fn polygon(name: Option<&str>, polygon: Polygon<f64>) -> Self {
        Self::new(name.map(str::to_string), MultiPolygon::new(vec![polygon]))
    }

    /// The building's name, or `"{unnamed_prefix} {index}"` for unnamed ones.
    pub fn identifier(&self, index: usize, unnamed_prefix: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", unnamed_prefix, index),
        }
    }

    pub(crate) fn envelope(&self) -> Option<Rect<f64>> {
        self.shape.bounding_rect()
    }

    /// True geometric intersection with an entrance (boundary or interior).
    pub fn intersects(&self, entrance: &EntranceShape) -> bool {
        self.shape.0.iter().any(|polygon| match entrance {
            EntranceShape::Point(p) => polygon.intersects(p),
            EntranceShape::Line(l) => polygon.intersects(l),
            EntranceShape::Polygon(g) => polygon.intersects(g),
        })
    }
}

/// The shapes an entrance may be mapped as.
#[derive(Debug, Clone, PartialEq)]
pub enum EntranceShape {
    Point(Point<f64>),
    Line(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl EntranceShape {
    pub fn kind(&self) -> &'static str {
        match self {
            EntranceShape::Point(_) => "point",
            EntranceShape::Line(_) => "line",
            EntranceShape::Polygon(_) => "polygon",
        }
    }

    /// `None` for shapes without any coordinate or with a non-finite one.
    /// Such an entrance cannot be located, so it never joins a building.
    pub(crate) fn envelope(&self) -> Option<Rect<f64>> {
        let rect = match self {
            EntranceShape::Point(p) => Some(p.bounding_rect()),
            EntranceShape::Line(l) => l.bounding_rect(),
            EntranceShape::Polygon(g) => g.bounding_rect(),
        }?;
        let (min, max) = (rect.min(), rect.max());
        [min.x, min.y, max.x, max.y]
            .iter()
            .all(|v| v.is_finite())
            .then_some(rect)
    }
}

/// An entrance feature with its optional `entrance=*` tag value.
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceGeometry {
    pub entrance_type: Option<String>,
    pub shape: EntranceShape,
}

impl EntranceGeometry {
    pub fn new(entrance_type: Option<&str>, shape: EntranceShape) -> Self {
        Self {
            entrance_type: entrance_type.map(str::to_string),
            shape,
        }
    }

    pub fn point(entrance_type: Option<&str>, x: f64, y: f64) -> Self {
        Self::new(entrance_type, EntranceShape::Point(Point::new(x, y)))
    }
}
