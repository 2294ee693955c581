//! Figure size and style configuration
//!
//! Colors are CSS color strings (`"red"`, `"#1f77b4"`, `"rgb(0, 0, 0)"`),
//! parsed with `csscolorparser` when the figure is built.

use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};

use super::viewport::DEFAULT_MARGIN;
use crate::{MapError, Result};

/// Size and style of a rendered map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Padding around the point bounds, in degrees
    pub margin: f64,
    pub background: String,
    pub boundary_color: String,
    pub boundary_edge_color: String,
    pub point_color: String,
    pub text_color: String,
    /// Marker radius in pixels
    pub marker_radius: u32,
    /// Font size of the index labels next to markers, in pixels
    pub label_font_size: f64,
    /// Font size of the legend text, in pixels
    pub legend_font_size: f64,
    /// Font size of the axis tick labels, in pixels
    pub tick_font_size: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: DEFAULT_MARGIN,
            background: "white".to_string(),
            boundary_color: "#1f77b4".to_string(),
            boundary_edge_color: "#1f77b4".to_string(),
            point_color: "red".to_string(),
            text_color: "black".to_string(),
            marker_radius: 4,
            label_font_size: 14.0,
            legend_font_size: 11.0,
            tick_font_size: 12.0,
        }
    }
}

/// Resolved colors, ready for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: RGBAColor,
    pub boundary: RGBAColor,
    pub boundary_edge: RGBAColor,
    pub point: RGBAColor,
    pub text: RGBAColor,
}

impl MapConfig {
    /// Check sizes and parse every color
    pub fn validate(&self) -> Result<Palette> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::ConfigError(format!(
                "Image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.margin.is_finite() || self.margin <= 0.0 {
            return Err(MapError::ConfigError(format!(
                "Margin must be a positive number of degrees, got {}",
                self.margin
            )));
        }
        for (name, size) in [
            ("label_font_size", self.label_font_size),
            ("legend_font_size", self.legend_font_size),
            ("tick_font_size", self.tick_font_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(MapError::ConfigError(format!(
                    "'{}' must be positive, got {}",
                    name, size
                )));
            }
            if size > self.height as f64 {
                return Err(MapError::ConfigError(format!(
                    "'{}' of {} exceeds the image height of {}",
                    name, size, self.height
                )));
            }
        }
        if self.marker_radius > self.height {
            return Err(MapError::ConfigError(format!(
                "'marker_radius' of {} exceeds the image height of {}",
                self.marker_radius, self.height
            )));
        }

        Ok(Palette {
            background: parse_color("background", &self.background)?,
            boundary: parse_color("boundary_color", &self.boundary_color)?,
            boundary_edge: parse_color("boundary_edge_color", &self.boundary_edge_color)?,
            point: parse_color("point_color", &self.point_color)?,
            text: parse_color("text_color", &self.text_color)?,
        })
    }
}

fn parse_color(field: &str, value: &str) -> Result<RGBAColor> {
    let color = csscolorparser::parse(value).map_err(|e| {
        MapError::ConfigError(format!("Invalid color '{}' for '{}': {}", value, field, e))
    })?;
    let [r, g, b, a] = color.to_rgba8();
    Ok(RGBAColor(r, g, b, a as f64 / 255.0))
}
