//! Map extent around the plotted points

use geo::{BoundingRect, Coord, LineString, MultiPoint, Rect};

use super::PointLayer;
use crate::{MapError, Result};

/// Default padding around the point bounds, in degrees
pub const DEFAULT_MARGIN: f64 = 0.5;

/// Axis extents of the map, in layer coordinates (degrees for WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Viewport {
    /// Bounding box of all points in `layer`, expanded by `margin` on every side.
    ///
    /// Fails with `EmptyDatasetError` when the layer has no points, since the
    /// bounds are undefined.
    pub fn from_points(layer: &PointLayer, margin: f64) -> Result<Self> {
        let points: MultiPoint<f64> = layer.points.iter().map(|p| p.point).collect();
        let bounds = points.bounding_rect().ok_or_else(|| {
            MapError::EmptyDatasetError("No points with coordinates to bound the map".to_string())
        })?;

        Ok(Self {
            xmin: bounds.min().x - margin,
            xmax: bounds.max().x + margin,
            ymin: bounds.min().y - margin,
            ymax: bounds.max().y + margin,
        })
    }

    pub fn x_range(&self) -> std::ops::Range<f64> {
        self.xmin..self.xmax
    }

    pub fn y_range(&self) -> std::ops::Range<f64> {
        self.ymin..self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Strict containment: points on the edge are outside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.xmin && x < self.xmax && y > self.ymin && y < self.ymax
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new((self.xmin, self.ymin), (self.xmax, self.ymax))
    }

    /// Parts of a ring that are not on the viewport border.
    ///
    /// A boundary clipped to the viewport gains segments along the frame;
    /// those are left out so only real coastline is stroked. Each run is a
    /// connected polyline of at least two vertices.
    pub fn edge_runs(&self, ring: &LineString<f64>) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for line in ring.lines() {
            if self.on_border(line.start, line.end) {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
                continue;
            }
            if current.is_empty() {
                current.push(line.start.x_y());
            }
            current.push(line.end.x_y());
        }
        if current.len() > 1 {
            runs.push(current);
        }
        runs
    }

    /// Whether the segment `a`-`b` lies along one side of the frame
    fn on_border(&self, a: Coord<f64>, b: Coord<f64>) -> bool {
        // Clipping snaps to a fixed-point grid, so allow a small slack
        let tol = 1e-7 * self.width().abs().max(self.height().abs());
        let near = |v: f64, edge: f64| (v - edge).abs() <= tol;
        (near(a.x, self.xmin) && near(b.x, self.xmin))
            || (near(a.x, self.xmax) && near(b.x, self.xmax))
            || (near(a.y, self.ymin) && near(b.y, self.ymin))
            || (near(a.y, self.ymax) && near(b.y, self.ymax))
    }

    /// Display height/width ratio of one degree for geographic coordinates.
    ///
    /// One degree of longitude shrinks by cos(latitude), so the y axis is
    /// stretched by 1/cos of the mid latitude. Falls back to 1.0 near the poles.
    pub fn geographic_aspect(&self) -> f64 {
        let mid = (self.ymin + self.ymax) / 2.0;
        let cos = mid.to_radians().cos();
        if cos.abs() < 1e-6 || !cos.is_finite() {
            1.0
        } else {
            1.0 / cos
        }
    }
}
