//! Plot types for buoymap figures
//!
//! This module contains the typed data model a map is built from and the
//! `MapFigure` that carries everything a writer needs to draw it.
//!
//! # Architecture
//!
//! The module is organized into submodules:
//!
//! - `types` - Input values: PointRecord, BoundaryShape, Crs, PointLayer
//! - `viewport` - Padded bounding box around the plotted points
//! - `legend` - Numbered legend entries
//! - `config` - Size and style configuration
//! - `figure` - The composed MapFigure

pub mod config;
pub mod figure;
pub mod legend;
pub mod types;
pub mod viewport;

// Re-export all types for convenience
pub use config::*;
pub use figure::*;
pub use legend::*;
pub use types::*;
pub use viewport::*;
