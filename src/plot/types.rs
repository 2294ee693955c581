//! Core value types for map figures
//!
//! These types replace loosely typed tables and geometries with explicit
//! records, plus the conversion from records to plottable point geometry.

use geo::{MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Coordinate reference system of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Crs {
    /// WGS84 longitude/latitude in degrees
    #[default]
    Wgs84,
}

impl Crs {
    /// EPSG code of the reference system
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

/// One row of the point table
///
/// A coordinate is `None` when its cell was empty in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PointRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Position as an (x = longitude, y = latitude) point, if both coordinates are present
    pub fn position(&self) -> Option<Point<f64>> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

/// Background region drawn beneath the points
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryShape {
    pub polygons: MultiPolygon<f64>,
    pub crs: Crs,
}

impl BoundaryShape {
    pub fn new(polygons: MultiPolygon<f64>) -> Self {
        Self {
            polygons,
            crs: Crs::Wgs84,
        }
    }

    pub fn len(&self) -> usize {
        self.polygons.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.0.is_empty()
    }
}

/// A projected point with the number it is labeled with on the map
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// 1-based position of the source record in the file
    pub index: usize,
    pub name: String,
    pub point: Point<f64>,
}

/// Point geometries projected from records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointLayer {
    pub crs: Crs,
    pub points: Vec<GeoPoint>,
}

impl PointLayer {
    /// Project records into point geometry in `crs`.
    ///
    /// Records lacking either coordinate are skipped but the remaining points
    /// keep the index of their original row.
    pub fn from_records(records: &[PointRecord], crs: Crs) -> Self {
        let points = records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| match record.position() {
                Some(point) => Some(GeoPoint {
                    index: idx + 1,
                    name: record.name.clone(),
                    point,
                }),
                None => {
                    warn!(
                        index = idx + 1,
                        name = %record.name,
                        "record has no coordinates, not plotted"
                    );
                    None
                }
            })
            .collect();
        Self { crs, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
