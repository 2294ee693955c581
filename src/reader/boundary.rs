//! GeoJSON boundary reader

use std::path::Path;

use geo::{Geometry, MultiPolygon, Polygon};
use geojson::GeoJson;
use tracing::{debug, info};

use super::Reader;
use crate::plot::BoundaryShape;
use crate::{MapError, Result};

/// Reads polygon boundaries from a GeoJSON file
///
/// Accepts a FeatureCollection, a single Feature or a bare Geometry. Polygon
/// and MultiPolygon geometries are collected (GeometryCollections are
/// flattened); other geometry kinds are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryReader;

impl Reader for BoundaryReader {
    type Output = BoundaryShape;

    fn read(&self, path: &Path) -> Result<BoundaryShape> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MapError::LoadError(format!(
                "Failed to read boundary file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let shape = parse_boundary(&text).map_err(|e| match e {
            MapError::LoadError(msg) => {
                MapError::LoadError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        info!(
            path = %path.display(),
            polygons = shape.len(),
            "boundary loaded"
        );
        Ok(shape)
    }
}

/// Parse GeoJSON text into a boundary shape
pub fn parse_boundary(text: &str) -> Result<BoundaryShape> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e| MapError::LoadError(format!("Invalid GeoJSON: {}", e)))?;

    let collection = geojson::quick_collection(&geojson)
        .map_err(|e| MapError::LoadError(format!("Unsupported GeoJSON geometry: {}", e)))?;

    let mut polygons = Vec::new();
    for geometry in collection {
        collect_polygons(geometry, &mut polygons);
    }

    if polygons.is_empty() {
        return Err(MapError::LoadError(
            "Boundary contains no Polygon or MultiPolygon geometry".to_string(),
        ));
    }
    Ok(BoundaryShape::new(MultiPolygon::new(polygons)))
}

fn collect_polygons(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi),
        Geometry::Rect(rect) => out.push(rect.to_polygon()),
        Geometry::GeometryCollection(collection) => {
            for inner in collection {
                collect_polygons(inner, out);
            }
        }
        other => debug!(kind = geometry_kind(&other), "ignoring non-polygon geometry"),
    }
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::Triangle(_) => "Triangle",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"[[[-60.0, 0.0], [0.0, 0.0], [0.0, 60.0], [-60.0, 60.0], [-60.0, 0.0]]]"#;

    #[test]
    fn test_feature_collection() {
        let text = format!(
            r#"{{"type": "FeatureCollection", "features": [
                {{"type": "Feature", "properties": {{}}, "geometry": {{"type": "Polygon", "coordinates": {}}}}},
                {{"type": "Feature", "properties": {{}}, "geometry": {{"type": "Point", "coordinates": [1.0, 2.0]}}}}
            ]}}"#,
            SQUARE
        );
        let shape = parse_boundary(&text).unwrap();
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.crs.epsg(), 4326);
    }

    #[test]
    fn test_bare_multipolygon() {
        let text = format!(
            r#"{{"type": "MultiPolygon", "coordinates": [{}, {}]}}"#,
            SQUARE, SQUARE
        );
        let shape = parse_boundary(&text).unwrap();
        assert_eq!(shape.len(), 2);
    }

    #[test]
    fn test_nested_geometry_collection() {
        let text = format!(
            r#"{{"type": "GeometryCollection", "geometries": [
                {{"type": "GeometryCollection", "geometries": [{{"type": "Polygon", "coordinates": {}}}]}}
            ]}}"#,
            SQUARE
        );
        assert_eq!(parse_boundary(&text).unwrap().len(), 1);
    }

    #[test]
    fn test_no_polygons_is_load_error() {
        let text = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        let err = parse_boundary(text).unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
    }

    #[test]
    fn test_malformed_json_is_load_error() {
        let err = parse_boundary("{not json").unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BoundaryReader
            .read(&dir.path().join("missing.geojson"))
            .unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
        assert!(err.to_string().contains("missing.geojson"));
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocean.geojson");
        std::fs::write(
            &path,
            format!(r#"{{"type": "Polygon", "coordinates": {}}}"#, SQUARE),
        )
        .unwrap();
        assert_eq!(BoundaryReader.read(&path).unwrap().len(), 1);
    }
}
