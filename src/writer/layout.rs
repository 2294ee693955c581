//! Pixel layout of a map figure
//!
//! Everything here is plain arithmetic on pixel sizes so the placement of the
//! axes and the legend box can be tested without a drawing backend.

use crate::plot::{Legend, Viewport};

/// Outer padding around the figure content, in pixels
pub const FIGURE_PAD: u32 = 10;
/// Height reserved under the axes for x tick labels
pub const X_LABEL_AREA: u32 = 28;
/// Width reserved left of the axes for y tick labels
pub const Y_LABEL_AREA: u32 = 48;
/// Space between the axes and the legend box
pub const LEGEND_GAP: u32 = 4;
/// Inner padding of the legend box
pub const LEGEND_PAD: u32 = 5;

/// Approximate advance of one glyph relative to the font size.
///
/// Text metrics are estimated instead of measured so layout does not depend
/// on which system fonts are installed.
const CHAR_WIDTH_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.3;

/// Pixel rectangle, origin at the top-left of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// Size and text metrics of the legend box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendBox {
    pub width: u32,
    pub height: u32,
    pub line_height: u32,
}

impl LegendBox {
    pub fn measure(legend: &Legend, font_size: f64) -> Self {
        let longest = legend
            .entries
            .iter()
            .map(|e| e.to_string().chars().count())
            .max()
            .unwrap_or(0);
        let line_height = (font_size * LINE_HEIGHT_RATIO).ceil() as u32;
        let text_width = (longest as f64 * font_size * CHAR_WIDTH_RATIO).ceil() as u32;

        Self {
            width: text_width.saturating_add(2 * LEGEND_PAD),
            height: line_height
                .saturating_mul(legend.len() as u32)
                .saturating_add(2 * LEGEND_PAD),
            line_height,
        }
    }

    /// Corner radius of the rounded border
    pub fn corner_radius(font_size: f64) -> u32 {
        ((font_size * 0.2).round() as u32).max(3)
    }
}

/// Where the parts of the figure go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureLayout {
    /// Chart area including tick label areas
    pub chart: PixelRect,
    /// Plotting area (the axes box) inside `chart`
    pub plot: PixelRect,
    /// Legend box; its lower-left corner sits next to the axes' lower-right corner
    pub legend: PixelRect,
}

impl FigureLayout {
    /// Fit the axes into the image next to the legend.
    ///
    /// The axes keep the display aspect of the viewport (data height times
    /// `Viewport::geographic_aspect` over data width) and the whole block of
    /// axes plus legend is centered in the image.
    pub fn compute(width: u32, height: u32, viewport: &Viewport, legend: &LegendBox) -> Self {
        let reserved_w = (2 * FIGURE_PAD + Y_LABEL_AREA + LEGEND_GAP).saturating_add(legend.width);
        let avail_w = width.saturating_sub(reserved_w).max(1) as f64;
        let avail_h = height.saturating_sub(2 * FIGURE_PAD + X_LABEL_AREA).max(1) as f64;

        let ratio = viewport.height() * viewport.geographic_aspect() / viewport.width();
        let (plot_w, plot_h) = if avail_w * ratio <= avail_h {
            (avail_w, avail_w * ratio)
        } else {
            (avail_h / ratio, avail_h)
        };
        let plot_w = (plot_w.round() as u32).max(1);
        let plot_h = (plot_h.round() as u32).max(1);

        let block_w = (Y_LABEL_AREA + plot_w + LEGEND_GAP).saturating_add(legend.width);
        let chart_h = plot_h + X_LABEL_AREA;
        let left = (width as i64 - block_w as i64) / 2;
        let top = (height as i64 - chart_h as i64) / 2;
        let (left, top) = (clamp_i32(left), clamp_i32(top));

        let chart = PixelRect {
            x: left,
            y: top,
            width: Y_LABEL_AREA + plot_w,
            height: chart_h,
        };
        let plot = PixelRect {
            x: left + Y_LABEL_AREA as i32,
            y: top,
            width: plot_w,
            height: plot_h,
        };
        let legend = PixelRect {
            x: plot.right().saturating_add(LEGEND_GAP as i32),
            y: clamp_i32(plot.bottom() as i64 - legend.height as i64),
            width: legend.width,
            height: legend.height,
        };

        Self {
            chart,
            plot,
            legend,
        }
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Closed outline of a rectangle with rounded corners
pub fn rounded_rect_path(rect: &PixelRect, radius: u32) -> Vec<(i32, i32)> {
    const ARC_STEPS: usize = 6;

    let r = radius.min(rect.width / 2).min(rect.height / 2) as f64;
    let (x0, y0) = (rect.x as f64, rect.y as f64);
    let (x1, y1) = (rect.right() as f64, rect.bottom() as f64);

    // Corner centers with the starting angle of each quarter arc, clockwise
    // on screen from the top-right corner
    let corners = [
        (x1 - r, y0 + r, -90.0_f64),
        (x1 - r, y1 - r, 0.0),
        (x0 + r, y1 - r, 90.0),
        (x0 + r, y0 + r, 180.0),
    ];

    let mut path = Vec::with_capacity(4 * (ARC_STEPS + 1) + 1);
    for (cx, cy, start) in corners {
        for step in 0..=ARC_STEPS {
            let angle = (start + 90.0 * step as f64 / ARC_STEPS as f64).to_radians();
            path.push((
                (cx + r * angle.cos()).round() as i32,
                (cy + r * angle.sin()).round() as i32,
            ));
        }
    }
    if let Some(&first) = path.first() {
        path.push(first);
    }
    path
}
