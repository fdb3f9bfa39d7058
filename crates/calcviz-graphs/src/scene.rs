//! Backend-independent description of one rendered plot.

use crate::mapper::{CoordinateMapper, Point, Viewport};
use crate::path::Path;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self(0, 0, 0);

    /// Parses `#rrggbb`.
    pub fn try_from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parses `#rrggbb`, falling back to black.
    pub fn from_hex(hex: &str) -> Self {
        Self::try_from_hex(hex).unwrap_or_else(|| {
            warn!(color = hex, "unparseable colour, using black");
            Self::BLACK
        })
    }
}

/// Line appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Line colour.
    pub color: Rgb,
    /// Line width in drawing units.
    pub width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Dash pattern; `None` draws a solid line.
    pub dash: Option<Dash>,
}

/// Dash pattern of a stroke, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dash {
    /// Length of each dash.
    pub length: f64,
    /// Gap between dashes.
    pub gap: f64,
}

impl Stroke {
    /// Fully opaque stroke.
    pub const fn new(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }

    /// Same stroke with a different opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Same stroke drawn as dashes of `length` separated by `gap`.
    #[must_use]
    pub const fn dashed(mut self, length: f64, gap: f64) -> Self {
        self.dash = Some(Dash { length, gap });
        self
    }
}

/// A drawable item, in viewport coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneElement {
    /// A sampled curve; each sub-path is drawn as its own polyline.
    Curve {
        /// Commands to draw.
        path: Path,
        /// Appearance.
        stroke: Stroke,
    },
    /// A straight segment.
    Segment {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Appearance.
        stroke: Stroke,
    },
    /// A filled circle, optionally outlined.
    Marker {
        /// Centre.
        at: Point,
        /// Radius in drawing units.
        radius: f64,
        /// Fill colour.
        fill: Rgb,
        /// Outline.
        outline: Option<Stroke>,
    },
}

/// One plot ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// File-friendly name.
    pub name: String,
    /// Drawing surface.
    pub viewport: Viewport,
    /// Fill behind everything.
    pub background: Rgb,
    /// Items in painting order.
    pub elements: Vec<SceneElement>,
}

impl Scene {
    /// Creates an empty scene with a white background.
    pub fn new(name: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            name: name.into(),
            viewport,
            background: Rgb::WHITE,
            elements: Vec::new(),
        }
    }

    /// Sets the background colour.
    #[must_use]
    pub const fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Appends a curve; empty paths are skipped.
    pub fn curve(&mut self, path: Path, stroke: Stroke) -> &mut Self {
        if !path.is_empty() {
            self.elements.push(SceneElement::Curve { path, stroke });
        }
        self
    }

    /// Appends a segment.
    pub fn segment(&mut self, from: Point, to: Point, stroke: Stroke) -> &mut Self {
        self.elements.push(SceneElement::Segment { from, to, stroke });
        self
    }

    /// Appends a marker.
    pub fn marker(&mut self, at: Point, radius: f64, fill: Rgb, outline: Option<Stroke>) -> &mut Self {
        self.elements.push(SceneElement::Marker {
            at,
            radius,
            fill,
            outline,
        });
        self
    }

    /// Appends the lines of [`axes_through_origin`].
    pub fn axes(&mut self, mapper: &CoordinateMapper, stroke: Stroke) -> &mut Self {
        let axes = axes_through_origin(mapper);
        self.segment(axes.horizontal.0, axes.horizontal.1, stroke)
            .segment(axes.vertical.0, axes.vertical.1, stroke)
    }

    /// Number of elements of each kind as `(curves, segments, markers)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.elements
            .iter()
            .fold((0, 0, 0), |(c, s, m), element| match element {
                SceneElement::Curve { .. } => (c + 1, s, m),
                SceneElement::Segment { .. } => (c, s + 1, m),
                SceneElement::Marker { .. } => (c, s, m + 1),
            })
    }
}

/// Full-width and full-height lines through the mapped origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLines {
    /// `(0, oy)` to `(W, oy)`.
    pub horizontal: (Point, Point),
    /// `(ox, 0)` to `(ox, H)`.
    pub vertical: (Point, Point),
}

/// Axis lines crossing at the viewport position of `(0, 0)`.
pub fn axes_through_origin(mapper: &CoordinateMapper) -> AxisLines {
    let origin = mapper.origin();
    let Viewport { width, height } = mapper.viewport();
    AxisLines {
        horizontal: (Point::new(0.0, origin.y), Point::new(width, origin.y)),
        vertical: (Point::new(origin.x, 0.0), Point::new(origin.x, height)),
    }
}

/// A labelled position on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Mathematical value.
    pub value: f64,
    /// Viewport position on the horizontal axis.
    pub at: Point,
}

/// Horizontal-axis ticks for `values`, keeping only those at least `inset` away from either edge.
pub fn tick_positions(mapper: &CoordinateMapper, values: &[f64], inset: f64) -> Vec<Tick> {
    let width = mapper.viewport().width;
    values
        .iter()
        .map(|&value| Tick {
            value,
            at: mapper.to_viewport(value, 0.0),
        })
        .filter(|tick| tick.at.x >= inset && tick.at.x <= width - inset)
        .collect()
}

/// Full-height lines at each of `xs` and full-width lines at each of `ys`.
pub fn grid_lines(mapper: &CoordinateMapper, xs: &[f64], ys: &[f64]) -> Vec<(Point, Point)> {
    let Viewport { width, height } = mapper.viewport();
    let vertical = xs.iter().map(|&x| {
        let px = mapper.to_viewport(x, 0.0).x;
        (Point::new(px, 0.0), Point::new(px, height))
    });
    let horizontal = ys.iter().map(|&y| {
        let py = mapper.to_viewport(0.0, y).y;
        (Point::new(0.0, py), Point::new(width, py))
    });
    vertical.chain(horizontal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::MathRange;
    use calcviz_common::test_utils::assert_approx_eq;

    fn sine_mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            MathRange::new(-3.5, 3.5, -1.5, 1.5),
            Viewport::new(480.0, 220.0),
        )
    }

    #[test]
    fn test_hex_colours() {
        assert_eq!(Rgb::try_from_hex("#f5c842"), Some(Rgb(0xf5, 0xc8, 0x42)));
        assert_eq!(Rgb::try_from_hex("#80CBC4"), Some(Rgb(0x80, 0xcb, 0xc4)));
        assert_eq!(Rgb::try_from_hex("f5c842"), None);
        assert_eq!(Rgb::try_from_hex("#f5c84"), None);
        assert_eq!(Rgb::try_from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::from_hex("#éé"), Rgb::BLACK);
    }

    #[test]
    fn test_axes_cross_at_origin() {
        let axes = axes_through_origin(&sine_mapper());
        assert_eq!(axes.horizontal.0, Point::new(0.0, 110.0));
        assert_eq!(axes.horizontal.1, Point::new(480.0, 110.0));
        assert_eq!(axes.vertical.0, Point::new(240.0, 0.0));
        assert_eq!(axes.vertical.1, Point::new(240.0, 220.0));
    }

    #[test]
    fn test_ticks_near_edges_are_dropped() {
        // x = ±3 maps to 480 * (0.5 ± 3/7), well inside; a range of ±3.02 pushes them to the edge.
        let ticks = tick_positions(&sine_mapper(), &[-3.0, -2.0, -1.0, 1.0, 2.0, 3.0], 8.0);
        assert_eq!(ticks.len(), 6);

        let tight = CoordinateMapper::new(
            MathRange::new(-3.02, 3.02, -1.0, 1.0),
            Viewport::new(480.0, 220.0),
        );
        let ticks = tick_positions(&tight, &[-3.0, -2.0, -1.0, 1.0, 2.0, 3.0], 8.0);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![-2.0, -1.0, 1.0, 2.0]);
        assert_approx_eq(ticks[0].at.y, 110.0, 1e-9);
    }

    #[test]
    fn test_grid_lines() {
        let lines = grid_lines(&sine_mapper(), &[0.0], &[1.5]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (Point::new(240.0, 0.0), Point::new(240.0, 220.0)));
        assert_eq!(lines[1], (Point::new(0.0, 0.0), Point::new(480.0, 0.0)));
    }

    #[test]
    fn test_scene_builder_counts() {
        let mut scene = Scene::new("demo", Viewport::new(480.0, 220.0));
        let stroke = Stroke::new(Rgb::BLACK, 1.0);
        scene
            .axes(&sine_mapper(), stroke.with_opacity(0.25))
            .curve(Path::new(), stroke)
            .curve(Path::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)), stroke)
            .marker(Point::new(1.0, 1.0), 6.0, Rgb::WHITE, Some(stroke));

        assert_eq!(scene.counts(), (1, 2, 1));
    }
}
