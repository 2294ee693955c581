//! Map image writer using plotters
//!
//! Draws a `MapFigure` in this order: background, boundary polygons, point
//! markers, index annotations, axes frame with tick labels, legend box.
//! Bitmaps are drawn into an in-memory RGB buffer and encoded with `image`;
//! SVG is drawn into a string.

use std::io::Cursor;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use super::layout::{
    rounded_rect_path, FigureLayout, LegendBox, LEGEND_PAD, X_LABEL_AREA, Y_LABEL_AREA,
};
use super::{OutputFormat, Writer};
use crate::plot::MapFigure;
use crate::{MapError, Result};

const FONT_FAMILY: &str = "sans-serif";
/// Offset of an index annotation from its marker, in pixels
const LABEL_OFFSET: i32 = 3;

/// Plotters-based image writer
#[derive(Debug, Clone, Copy)]
pub struct PlottersWriter {
    format: OutputFormat,
}

impl PlottersWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        figure: &MapFigure,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let config = &figure.config;
        let palette = &figure.palette;
        let viewport = &figure.viewport;

        root.fill(&palette.background).map_err(render_error)?;

        let legend_box = LegendBox::measure(&figure.legend, config.legend_font_size);
        let layout = FigureLayout::compute(config.width, config.height, viewport, &legend_box);
        debug!(?layout, "figure layout");

        let chart_area = root.clone().shrink(
            (layout.chart.x, layout.chart.y),
            (layout.chart.width, layout.chart.height),
        );
        let mut chart = ChartBuilder::on(&chart_area)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(viewport.x_range(), viewport.y_range())
            .map_err(render_error)?;

        // Base layer: boundary polygons, holes punched out with the background
        for polygon in &figure.boundary {
            let exterior: Vec<(f64, f64)> =
                polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
            chart
                .draw_series(std::iter::once(Polygon::new(
                    exterior,
                    palette.boundary.filled(),
                )))
                .map_err(render_error)?;
            chart
                .draw_series(viewport.edge_runs(polygon.exterior()).into_iter().map(|run| {
                    PathElement::new(run, palette.boundary_edge.stroke_width(1))
                }))
                .map_err(render_error)?;

            for interior in polygon.interiors() {
                let hole: Vec<(f64, f64)> = interior.coords().map(|c| (c.x, c.y)).collect();
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        hole,
                        palette.background.filled(),
                    )))
                    .map_err(render_error)?;
            }
        }

        // Points on top of the boundary
        chart
            .draw_series(figure.points.points.iter().map(|p| {
                Circle::new(
                    (p.point.x(), p.point.y()),
                    config.marker_radius,
                    palette.point.filled(),
                )
            }))
            .map_err(render_error)?;

        // Index annotations, anchored above-right of each marker
        let label_style = (FONT_FAMILY, config.label_font_size)
            .into_font()
            .color(&palette.text)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        chart
            .draw_series(figure.points.points.iter().map(|p| {
                EmptyElement::at((p.point.x(), p.point.y()))
                    + Text::new(
                        p.index.to_string(),
                        (LABEL_OFFSET, -LABEL_OFFSET),
                        label_style.clone(),
                    )
            }))
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(6)
            .y_labels(6)
            .x_label_formatter(&|v| format!("{:.1}", v))
            .y_label_formatter(&|v| format!("{:.1}", v))
            .label_style(
                (FONT_FAMILY, config.tick_font_size)
                    .into_font()
                    .color(&palette.text),
            )
            .axis_style(palette.text)
            .draw()
            .map_err(render_error)?;

        // Axes frame
        chart
            .plotting_area()
            .draw(&Rectangle::new(
                [(viewport.xmin, viewport.ymin), (viewport.xmax, viewport.ymax)],
                palette.text.stroke_width(1),
            ))
            .map_err(render_error)?;

        self.draw_legend(root, figure, &layout, &legend_box)
    }

    fn draw_legend<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        figure: &MapFigure,
        layout: &FigureLayout,
        legend_box: &LegendBox,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        if figure.legend.is_empty() {
            return Ok(());
        }
        let config = &figure.config;
        let palette = &figure.palette;

        let border = rounded_rect_path(
            &layout.legend,
            LegendBox::corner_radius(config.legend_font_size),
        );
        root.draw(&Polygon::new(border.clone(), palette.background.filled()))
            .map_err(render_error)?;
        root.draw(&PathElement::new(border, palette.text.stroke_width(1)))
            .map_err(render_error)?;

        let style = (FONT_FAMILY, config.legend_font_size)
            .into_font()
            .color(&palette.text);
        let pad = LEGEND_PAD as i32;
        for (i, line) in figure.legend.lines().into_iter().enumerate() {
            let y = layout.legend.y + pad + (i as u32 * legend_box.line_height) as i32;
            root.draw(&Text::new(line, (layout.legend.x + pad, y), &style))
                .map_err(render_error)?;
        }
        Ok(())
    }

    fn write_bitmap(&self, figure: &MapFigure, format: image::ImageFormat) -> Result<Vec<u8>> {
        let (width, height) = (figure.config.width, figure.config.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root, figure)?;
            root.present().map_err(render_error)?;
        }
        encode_raster(buffer, width, height, format)
    }

    fn write_svg(&self, figure: &MapFigure) -> Result<Vec<u8>> {
        let mut svg = String::new();
        {
            let size = (figure.config.width, figure.config.height);
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            self.draw(&root, figure)?;
            root.present().map_err(render_error)?;
        }
        Ok(svg.into_bytes())
    }
}

impl Writer for PlottersWriter {
    type Output = Vec<u8>;

    fn write(&self, figure: &MapFigure) -> Result<Vec<u8>> {
        debug!(format = %self.format, "rendering figure");
        match self.format.image_format() {
            Some(format) => self.write_bitmap(figure, format),
            None => self.write_svg(figure),
        }
    }
}

/// Encode a packed RGB buffer
pub fn encode_raster(
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    format: image::ImageFormat,
) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        MapError::WriteError(format!(
            "Pixel buffer does not match image size {}x{}",
            width, height
        ))
    })?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| MapError::WriteError(format!("Failed to encode {:?} image: {}", format, e)))?;
    Ok(bytes)
}

fn render_error<E: std::fmt::Debug>(e: E) -> MapError {
    MapError::RenderError(format!("{:?}", e))
}
