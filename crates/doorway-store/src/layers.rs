use anyhow::{anyhow, bail, Context, Result};
use geo::{Geometry, LineString, MultiPolygon, Point};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;
use wkt::TryFromWkt;

use doorway_core::{BuildingFootprint, EntranceGeometry, EntranceShape, Layer};

#[derive(Debug, Deserialize)]
struct LayerFile<F> {
    crs: String,
    features: Vec<F>,
}

#[derive(Debug, Deserialize)]
struct BuildingFeature {
    #[serde(default)]
    name: Option<String>,
    wkt: String,
}

#[derive(Debug, Deserialize)]
struct EntranceFeature {
    #[serde(default)]
    entrance: Option<String>,
    wkt: String,
}

fn geometry(index: usize, wkt: &str) -> Result<Geometry<f64>> {
    Geometry::try_from_wkt_str(wkt).map_err(|e| anyhow!("feature #{}: invalid WKT: {}", index, e))
}

pub fn parse_buildings(json: &str) -> Result<Layer<BuildingFootprint>> {
    let file: LayerFile<BuildingFeature> =
        serde_json::from_str(json).context("failed to parse buildings layer")?;

    let mut features = Vec::with_capacity(file.features.len());
    for (i, feature) in file.features.into_iter().enumerate() {
        let shape: MultiPolygon<f64> = match geometry(i, &feature.wkt)? {
            Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            Geometry::MultiPolygon(mp) => mp,
            other => bail!("feature #{}: buildings must be polygons, got {}", i, kind(&other)),
        };
        features.push(BuildingFootprint::new(feature.name, shape));
    }
    Ok(Layer::new(file.crs, features))
}

pub fn parse_entrances(json: &str) -> Result<Layer<EntranceGeometry>> {
    let file: LayerFile<EntranceFeature> =
        serde_json::from_str(json).context("failed to parse entrances layer")?;

    let mut features = Vec::with_capacity(file.features.len());
    for (i, feature) in file.features.into_iter().enumerate() {
        let shape = match geometry(i, &feature.wkt)? {
            Geometry::Point(p) => EntranceShape::Point(p),
            Geometry::Line(l) => EntranceShape::Line(LineString::from(vec![l.start, l.end])),
            Geometry::LineString(l) => EntranceShape::Line(l),
            Geometry::Polygon(p) => EntranceShape::Polygon(p),
            // wkt reads `POINT EMPTY` as an empty multipoint; keep it so it is
            // counted as degenerate downstream instead of failing the layer
            Geometry::MultiPoint(mp) if mp.0.is_empty() => {
                EntranceShape::Point(Point::new(f64::NAN, f64::NAN))
            }
            other => bail!("feature #{}: unsupported entrance geometry {}", i, kind(&other)),
        };
        features.push(EntranceGeometry::new(feature.entrance.as_deref(), shape));
    }
    Ok(Layer::new(file.crs, features))
}

pub fn read_buildings(path: &Path) -> Result<Layer<BuildingFootprint>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read buildings from {}", path.display()))?;
    let layer = parse_buildings(&json).with_context(|| path.display().to_string())?;
    info!(count = layer.len(), crs = %layer.crs, "buildings loaded");
    Ok(layer)
}

pub fn read_entrances(path: &Path) -> Result<Layer<EntranceGeometry>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read entrances from {}", path.display()))?;
    let layer = parse_entrances(&json).with_context(|| path.display().to_string())?;
    info!(count = layer.len(), crs = %layer.crs, "entrances loaded");
    Ok(layer)
}

fn kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::Line(_) => "LINE",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        Geometry::Rect(_) => "RECT",
        Geometry::Triangle(_) => "TRIANGLE",
    }
}
