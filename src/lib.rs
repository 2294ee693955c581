//! buoymap - render data buoy locations on a static map
//!
//! Loads an ocean boundary (GeoJSON) and a table of named buoy positions (CSV),
//! and renders them into a single image: boundary as the base layer, numbered
//! markers on top, and a legend box mapping each number to its buoy name.
//!
//! # Architecture
//!
//! - `reader` - loads the boundary shape and point records from disk
//! - `plot` - typed data model, viewport and legend computation, the `MapFigure`
//! - `writer` - turns a `MapFigure` into image bytes (PNG, JPEG, BMP or SVG)
//!
//! # Example
//!
//! ```rust,ignore
//! buoymap::render(
//!     "data/north_atlantic.geojson",
//!     "data/buoy_data.csv",
//!     "bouys_plot.png",
//! )?;
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::info;

pub mod plot;
pub mod reader;
pub mod writer;

pub use plot::{
    BoundaryShape, Crs, Legend, LegendEntry, MapConfig, MapFigure, PointLayer, PointRecord,
    Viewport,
};
pub use reader::{BoundaryReader, PointReader, Reader};
pub use writer::{OutputFormat, PlottersWriter, Writer};

/// Crate version, used by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while producing a map
#[derive(Error, Debug)]
pub enum MapError {
    /// An input file is missing, malformed, or lacks required columns
    #[error("Load error: {0}")]
    LoadError(String),

    /// There are no plottable points to bound the map with
    #[error("Empty dataset: {0}")]
    EmptyDatasetError(String),

    /// The output could not be encoded or persisted
    #[error("Write error: {0}")]
    WriteError(String),

    /// The drawing backend failed while composing the figure
    #[error("Render error: {0}")]
    RenderError(String),

    /// Invalid style or size configuration
    #[error("Config error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Render the boundary and point records to `output_path` using the default style.
pub fn render(
    boundary_path: impl AsRef<Path>,
    points_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    render_with_config(
        boundary_path,
        points_path,
        output_path,
        &MapConfig::default(),
    )
}

/// Render the boundary and point records to `output_path` with an explicit config.
///
/// The image is composed fully in memory; `output_path` is only touched once
/// encoding has succeeded, so a failed run never leaves a partial file behind.
pub fn render_with_config(
    boundary_path: impl AsRef<Path>,
    points_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &MapConfig,
) -> Result<()> {
    let output_path = output_path.as_ref();
    // Resolve the format up front so a bad extension fails before any loading
    let format = OutputFormat::from_path(output_path)?;

    let boundary = BoundaryReader.read(boundary_path.as_ref())?;
    let records = PointReader.read(points_path.as_ref())?;

    let figure = MapFigure::new(boundary, records, config)?;
    let bytes = PlottersWriter::new(format).write(&figure)?;

    std::fs::write(output_path, &bytes).map_err(|e| {
        MapError::WriteError(format!(
            "Failed to write '{}': {}",
            output_path.display(),
            e
        ))
    })?;
    info!(
        path = %output_path.display(),
        bytes = bytes.len(),
        "map written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BOUNDARY: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "North Atlantic"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-60.0, 0.0], [0.0, 0.0], [0.0, 60.0], [-60.0, 60.0], [-60.0, 0.0]]]
            }
        }]
    }"#;

    fn write_inputs(dir: &Path, csv: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let boundary = dir.join("boundary.geojson");
        let points = dir.join("points.csv");
        fs::write(&boundary, BOUNDARY).unwrap();
        fs::write(&points, csv).unwrap();
        (boundary, points)
    }

    #[test]
    fn test_render_svg_smoke() {
        let dir = tempfile::tempdir().unwrap();
        let (boundary, points) = write_inputs(
            dir.path(),
            "Name,latitude,longitude\nM2,53.48,-5.43\nM3,51.22,-10.55\nM6,53.07,-15.88\n",
        );
        let output = dir.path().join("map.svg");

        render(&boundary, &points, &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.is_empty());
        assert!(written.contains("<svg"));
        assert!(written.contains("1: M2"));
        assert!(written.contains("3: M6"));
    }

    #[test]
    fn test_render_empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (boundary, points) = write_inputs(dir.path(), "Name,latitude,longitude\n");
        let output = dir.path().join("map.svg");

        let err = render(&boundary, &points, &output).unwrap_err();
        assert!(matches!(err, MapError::EmptyDatasetError(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_render_missing_boundary_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let (_, points) = write_inputs(dir.path(), "Name,latitude,longitude\nA,10.0,-40.0\n");
        let output = dir.path().join("map.svg");

        let err = render(dir.path().join("nope.geojson"), &points, &output).unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_render_unsupported_extension_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let (boundary, points) =
            write_inputs(dir.path(), "Name,latitude,longitude\nA,10.0,-40.0\n");
        let output = dir.path().join("map.tiff");

        let err = render(&boundary, &points, &output).unwrap_err();
        assert!(matches!(err, MapError::WriteError(_)));
    }

    #[test]
    fn test_render_unwritable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let (boundary, points) =
            write_inputs(dir.path(), "Name,latitude,longitude\nA,10.0,-40.0\n");
        let output = dir.path().join("missing_dir").join("map.svg");

        let err = render(&boundary, &points, &output).unwrap_err();
        assert!(matches!(err, MapError::WriteError(_)));
    }
}
