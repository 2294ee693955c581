//! The composed map figure
//!
//! `MapFigure` holds every layer in drawing order together with the axis
//! extents and style. Writers receive it explicitly; there is no global
//! "current figure".

use geo::{BooleanOps, MultiPolygon};
use tracing::{debug, info};

use super::{BoundaryShape, Crs, Legend, MapConfig, Palette, PointLayer, PointRecord, Viewport};
use crate::Result;

/// A fully resolved map, ready for a writer
#[derive(Debug, Clone)]
pub struct MapFigure {
    pub viewport: Viewport,
    /// Base layer, already clipped to the viewport
    pub boundary: MultiPolygon<f64>,
    pub points: PointLayer,
    pub legend: Legend,
    pub config: MapConfig,
    pub palette: Palette,
}

impl MapFigure {
    /// Project the records, bound them, clip the boundary and number the legend.
    pub fn new(
        boundary: BoundaryShape,
        records: Vec<PointRecord>,
        config: &MapConfig,
    ) -> Result<Self> {
        let palette = config.validate()?;

        let points = PointLayer::from_records(&records, Crs::Wgs84);
        let viewport = Viewport::from_points(&points, config.margin)?;
        info!(
            plotted = points.len(),
            records = records.len(),
            crs = %points.crs,
            "points projected"
        );
        debug!(?viewport, "viewport computed");

        let clip = MultiPolygon::new(vec![viewport.to_rect().to_polygon()]);
        let clipped = boundary.polygons.intersection(&clip);
        debug!(
            polygons = boundary.len(),
            clipped = clipped.0.len(),
            "boundary clipped to viewport"
        );

        Ok(Self {
            viewport,
            boundary: clipped,
            points,
            legend: Legend::from_records(&records),
            config: config.clone(),
            palette,
        })
    }
}
