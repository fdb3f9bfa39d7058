//! Scene rendering to SVG and PNG through plotters.

use crate::mapper::Point;
use crate::scene::{Rgb, Scene, SceneElement, Stroke};
use calcviz_common::{CalcVizError, Result};
use calcviz_config::OutputFormat;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use tracing::{debug, instrument};

/// Turns a [`Scene`] into encoded file contents.
pub trait SceneRenderer: Send + Sync {
    /// Short renderer name for logs.
    fn name(&self) -> &'static str;

    /// File extension of the produced bytes, without the dot.
    fn extension(&self) -> &'static str;

    /// Renders `scene` into an encoded document.
    fn render(&self, scene: &Scene) -> Result<Vec<u8>>;
}

/// Renderer for the configured output format.
pub fn renderer_for(format: OutputFormat) -> Box<dyn SceneRenderer> {
    match format {
        OutputFormat::Svg => Box::new(SvgRenderer),
        OutputFormat::Png => Box::new(PngRenderer),
    }
}

/// Writes scenes as standalone SVG documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRenderer;

impl SceneRenderer for SvgRenderer {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    #[instrument(skip_all, fields(scene = %scene.name))]
    fn render(&self, scene: &Scene) -> Result<Vec<u8>> {
        let mut document = String::new();
        {
            let root = SVGBackend::with_string(&mut document, scene.viewport.pixel_size())
                .into_drawing_area();
            draw_scene(&root, scene)?;
        }
        debug!(bytes = document.len(), "rendered svg");
        Ok(document.into_bytes())
    }
}

/// Rasterises scenes and encodes them as RGB PNG images.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngRenderer;

impl SceneRenderer for PngRenderer {
    fn name(&self) -> &'static str {
        "png"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    #[instrument(skip_all, fields(scene = %scene.name))]
    fn render(&self, scene: &Scene) -> Result<Vec<u8>> {
        let (width, height) = scene.viewport.pixel_size();
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            draw_scene(&root, scene)?;
        }

        let mut encoded = Vec::new();
        PngEncoder::new(&mut encoded)
            .write_image(&pixels, width, height, ColorType::Rgb8)
            .map_err(|e| CalcVizError::render_with_source("PNG encoding failed", e))?;
        debug!(bytes = encoded.len(), "rendered png");
        Ok(encoded)
    }
}

/// Paints every element of `scene` onto `root` in order and presents it.
pub fn draw_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let fail = |e: DrawingAreaErrorKind<DB::ErrorType>| {
        CalcVizError::render_with_source(format!("drawing scene '{}'", scene.name), e)
    };

    root.fill(&color(scene.background)).map_err(fail)?;

    for element in &scene.elements {
        match element {
            SceneElement::Curve { path, stroke } => {
                for polyline in path.segments() {
                    draw_polyline(root, &polyline, stroke).map_err(fail)?;
                }
            }
            SceneElement::Segment { from, to, stroke } => match stroke.dash {
                Some(dash) => {
                    let ends = [pixel(*from), pixel(*to)];
                    root.draw(&DashedPathElement::new(ends, dash.length, dash.gap, style(stroke)))
                        .map_err(fail)?;
                }
                None => draw_polyline(root, &[*from, *to], stroke).map_err(fail)?,
            },
            SceneElement::Marker {
                at,
                radius,
                fill,
                outline,
            } => {
                let centre = pixel(*at);
                let r = pixel_length(*radius);
                root.draw(&Circle::new(centre, r, color(*fill).filled()))
                    .map_err(fail)?;
                if let Some(outline) = outline {
                    root.draw(&Circle::new(centre, r, style(outline))).map_err(fail)?;
                }
            }
        }
    }

    root.present().map_err(fail)
}

fn draw_polyline<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[Point],
    stroke: &Stroke,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    // A lone point after a break has nothing to connect to.
    if points.len() < 2 {
        return Ok(());
    }
    let coords: Vec<(i32, i32)> = points.iter().copied().map(pixel).collect();
    root.draw(&PathElement::new(coords, style(stroke)))
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn style(stroke: &Stroke) -> ShapeStyle {
    color(stroke.color)
        .mix(stroke.opacity.clamp(0.0, 1.0))
        .stroke_width(stroke_width(stroke.width))
}

#[allow(clippy::cast_possible_truncation)]
fn pixel(point: Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

#[allow(clippy::cast_possible_truncation)]
fn pixel_length(length: f64) -> i32 {
    length.round().max(1.0) as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke_width(width: f64) -> u32 {
    width.round().max(1.0) as u32
}
