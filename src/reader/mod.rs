//! Input layer for buoymap
//!
//! The reader module loads the two inputs of a map from disk and converts
//! them into typed values.
//!
//! # Architecture
//!
//! All readers implement the `Reader` trait:
//! - `BoundaryReader` - GeoJSON file -> `BoundaryShape`
//! - `PointReader` - CSV file -> `Vec<PointRecord>`
//!
//! Any failure (missing file, malformed content, absent columns) is reported
//! as `MapError::LoadError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use buoymap::reader::{Reader, BoundaryReader, PointReader};
//!
//! let boundary = BoundaryReader.read(Path::new("data/north_atlantic.geojson"))?;
//! let records = PointReader.read(Path::new("data/buoy_data.csv"))?;
//! ```

use std::path::Path;

use crate::Result;

pub mod boundary;
pub mod points;

pub use boundary::BoundaryReader;
pub use points::PointReader;

/// Trait for file readers
pub trait Reader {
    /// Value produced from a file
    type Output;

    /// Read and convert the file at `path`
    ///
    /// # Errors
    ///
    /// Returns `MapError::LoadError` if:
    /// - The file does not exist or cannot be read
    /// - The content cannot be parsed
    /// - Required structure (columns, geometries) is missing
    fn read(&self, path: &Path) -> Result<Self::Output>;
}
