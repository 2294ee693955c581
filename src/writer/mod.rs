//! Output writers for buoymap
//!
//! A writer takes a fully resolved `MapFigure` and encodes it into bytes.
//! Persisting those bytes is left to the caller, so a failing writer never
//! leaves a partial file on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use buoymap::writer::{OutputFormat, PlottersWriter, Writer};
//!
//! let format = OutputFormat::from_path(Path::new("map.png"))?;
//! let bytes = PlottersWriter::new(format).write(&figure)?;
//! ```

use std::path::Path;

use crate::plot::MapFigure;
use crate::{MapError, Result};

pub mod canvas;
pub mod layout;

pub use canvas::PlottersWriter;

/// Trait for figure writers
pub trait Writer {
    /// Encoded output type
    type Output;

    /// Encode the figure
    ///
    /// # Errors
    ///
    /// Returns `MapError::RenderError` if drawing fails and
    /// `MapError::WriteError` if the result cannot be encoded.
    fn write(&self, figure: &MapFigure) -> Result<Self::Output>;
}

/// Image format of the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl OutputFormat {
    /// Infer the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| {
                MapError::WriteError(format!(
                    "Cannot infer image format of '{}': no file extension",
                    path.display()
                ))
            })?;

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(MapError::WriteError(format!(
                "Unsupported image format '{}'. Supported formats: png, jpg, jpeg, bmp, svg",
                other
            ))),
        }
    }

    /// Raster encoding for bitmap formats, `None` for vector output
    pub fn image_format(&self) -> Option<image::ImageFormat> {
        match self {
            OutputFormat::Png => Some(image::ImageFormat::Png),
            OutputFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            OutputFormat::Bmp => Some(image::ImageFormat::Bmp),
            OutputFormat::Svg => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Svg => "svg",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("bouys_plot.png")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/MAP.JPG")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("map.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert!(OutputFormat::Svg.image_format().is_none());
    }

    #[test]
    fn test_format_errors() {
        let err = OutputFormat::from_path(Path::new("map")).unwrap_err();
        assert!(matches!(err, MapError::WriteError(_)));

        let err = OutputFormat::from_path(Path::new("map.pdf")).unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }
}
