//! Mapping between mathematical coordinates and viewport coordinates.
//!
//! The viewport origin is the top-left corner while the mathematical origin is
//! conventionally bottom-left, so the mapping flips the vertical axis and
//! leaves the horizontal one alone.

use calcviz_common::{CalcVizError, Result};
use calcviz_config::ViewportConfig;
use serde::{Deserialize, Serialize};

/// A point, either in mathematical or in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Fixed-size drawing surface in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width of the surface.
    pub width: f64,
    /// Height of the surface.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions for raster and SVG backends, at least 1×1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

impl From<ViewportConfig> for Viewport {
    fn from(config: ViewportConfig) -> Self {
        Self::new(f64::from(config.width), f64::from(config.height))
    }
}

/// Visible window of function-input/output space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MathRange {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

impl MathRange {
    /// Creates a range from constants.
    ///
    /// `x_max > x_min` and `y_max > y_min` are the caller's responsibility.
    /// Use [`MathRange::try_new`] for values that did not come from code.
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Creates a range, rejecting empty, inverted or non-finite bounds.
    pub fn try_new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let range = Self::new(x_min, x_max, y_min, y_max);
        if !range.is_valid() {
            return Err(CalcVizError::validation(format!(
                "invalid range x:[{x_min}, {x_max}] y:[{y_min}, {y_max}]"
            )));
        }
        Ok(range)
    }

    /// Whether both spans are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
            && self.x_max > self.x_min
            && self.y_max > self.y_min
    }

    /// Horizontal span.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical span.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Same horizontal span with a different vertical window.
    pub const fn with_y(self, y_min: f64, y_max: f64) -> Self {
        Self::new(self.x_min, self.x_max, y_min, y_max)
    }

    /// Whether `y` is finite and lies within the vertical window widened by `margin`.
    pub fn admits_y(&self, y: f64, margin: f64) -> bool {
        y.is_finite() && y >= self.y_min - margin && y <= self.y_max + margin
    }
}

/// Maps mathematical points into a viewport for one fixed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    range: MathRange,
    viewport: Viewport,
}

impl CoordinateMapper {
    /// Creates a mapper. Debug builds assert that the range is valid.
    pub fn new(range: MathRange, viewport: Viewport) -> Self {
        debug_assert!(
            range.x_max > range.x_min && range.y_max > range.y_min,
            "degenerate plot range: {range:?}"
        );
        Self { range, viewport }
    }

    /// The mathematical window.
    pub const fn range(&self) -> MathRange {
        self.range
    }

    /// The drawing surface.
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Maps `(mx, my)` to viewport coordinates.
    pub fn to_viewport(&self, mx: f64, my: f64) -> Point {
        to_viewport(mx, my, &self.range, self.viewport)
    }

    /// Maps a mathematical point to viewport coordinates.
    pub fn map(&self, point: Point) -> Point {
        self.to_viewport(point.x, point.y)
    }

    /// Maps viewport coordinates back to mathematical space.
    pub fn to_math(&self, px: f64, py: f64) -> Point {
        let r = &self.range;
        Point::new(
            r.x_min + (px / self.viewport.width) * r.width(),
            r.y_min + ((self.viewport.height - py) / self.viewport.height) * r.height(),
        )
    }

    /// Viewport position of the mathematical origin.
    pub fn origin(&self) -> Point {
        self.to_viewport(0.0, 0.0)
    }
}

/// Maps `(mx, my)` into `viewport` for the visible `range`.
///
/// The result is undefined (infinite or NaN) for degenerate ranges.
pub fn to_viewport(mx: f64, my: f64, range: &MathRange, viewport: Viewport) -> Point {
    Point {
        x: ((mx - range.x_min) / range.width()) * viewport.width,
        y: viewport.height - ((my - range.y_min) / range.height()) * viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcviz_common::test_utils::assert_approx_eq;

    const SQUARE: MathRange = MathRange::new(-2.5, 2.5, -0.5, 6.5);
    const VIEW: Viewport = Viewport::new(480.0, 220.0);

    #[test]
    fn test_origin_of_square_plot() {
        let p = CoordinateMapper::new(SQUARE, VIEW).to_viewport(0.0, 0.0);
        assert_approx_eq(p.x, 240.0, 1e-9);
        assert_approx_eq(p.y, 220.0 - 220.0 / 14.0, 1e-9);
        assert_approx_eq(p.y, 204.3, 0.05);
    }

    #[test]
    fn test_corners() {
        let mapper = CoordinateMapper::new(SQUARE, VIEW);
        assert_eq!(mapper.to_viewport(-2.5, -0.5), Point::new(0.0, 220.0));
        assert_eq!(mapper.to_viewport(2.5, 6.5), Point::new(480.0, 0.0));
    }

    #[test]
    fn test_points_outside_range_are_not_clamped() {
        let mapper = CoordinateMapper::new(SQUARE, VIEW);
        let p = mapper.to_viewport(5.0, 13.5);
        assert!(p.x > 480.0);
        assert!(p.y < 0.0);
    }

    #[test]
    fn test_try_new_rejects_bad_ranges() {
        assert!(MathRange::try_new(-1.0, 1.0, -1.0, 1.0).is_ok());
        assert!(MathRange::try_new(1.0, 1.0, -1.0, 1.0).is_err());
        assert!(MathRange::try_new(-1.0, 1.0, 2.0, 1.0).is_err());
        assert!(MathRange::try_new(f64::NEG_INFINITY, 1.0, -1.0, 1.0).is_err());
        assert!(MathRange::try_new(-1.0, 1.0, -1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_admits_y() {
        assert!(SQUARE.admits_y(6.25, 5.0));
        assert!(SQUARE.admits_y(11.5, 5.0));
        assert!(!SQUARE.admits_y(11.6, 5.0));
        assert!(!SQUARE.admits_y(-5.6, 5.0));
        assert!(!SQUARE.admits_y(f64::NAN, 5.0));
        assert!(!SQUARE.admits_y(f64::INFINITY, f64::INFINITY));
        assert!(!SQUARE.admits_y(6.6, 0.0));
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(VIEW.pixel_size(), (480, 220));
        assert_eq!(Viewport::new(0.2, 10.4).pixel_size(), (1, 10));
        assert_eq!(
            Viewport::from(ViewportConfig {
                width: 500,
                height: 340
            }),
            Viewport::new(500.0, 340.0)
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "degenerate plot range")]
    fn test_degenerate_range_asserts_in_debug() {
        let _ = CoordinateMapper::new(MathRange::new(1.0, 1.0, 0.0, 1.0), VIEW);
    }
}
