//! Limit explorer: secants of f(x) = x² through P = (1, 1) closing in on the tangent.

use crate::error::{ExplorerError, ExplorerResult};
use crate::theme::{self, accent};
use calcviz_config::Config;
use calcviz_graphs::{
    grid_lines, CoordinateMapper, MathRange, PathMemo, PathOptions, Point, Scene, Stroke, Viewport,
};
use serde::Serialize;
use std::fmt;

/// Horizontal position of the fixed point P.
pub const X0: f64 = 1.0;

/// f'(1) for f(x) = x².
pub const EXACT_SLOPE: f64 = 2.0;

/// Plot window.
pub const RANGE: MathRange = MathRange::new(-0.2, 2.8, -0.2, 4.5);

/// Slider bounds for Δx.
pub const DELTA_X_BOUNDS: (f64, f64) = (0.05, 1.6);

/// Initial Δx.
pub const DEFAULT_DELTA_X: f64 = 1.4;

/// Below this |Δx| the difference quotient is treated as 0/0.
pub const MIN_DELTA_X: f64 = 0.001;

/// |Δx| below which the secant counts as close.
pub const CLOSE_THRESHOLD: f64 = 0.15;

/// |Δx| below which the secant is replaced by the tangent.
pub const VERY_CLOSE_THRESHOLD: f64 = 0.04;

/// Δx values of the approach table.
pub const TABLE_STEPS: [f64; 6] = [2.0, 1.0, 0.5, 0.1, 0.01, 0.001];

/// Sampling steps of the curve, one every 0.04 across the window.
pub const CURVE_SAMPLES: usize = 75;

const GRID_X: [f64; 5] = [0.5, 1.0, 1.5, 2.0, 2.5];
const GRID_Y: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

/// f(x) = x²
pub fn f(x: f64) -> f64 {
    x * x
}

/// Slope of the secant through P and Q = (1 + Δx, f(1 + Δx)); `None` when Δx is too small to divide by.
pub fn secant_slope(delta_x: f64) -> Option<f64> {
    if delta_x.abs() < MIN_DELTA_X {
        return None;
    }
    Some((f(X0 + delta_x) - f(X0)) / delta_x)
}

/// The secant for one Δx.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Secant {
    /// Horizontal distance from P to Q.
    pub delta_x: f64,
}

impl Secant {
    /// Secant for `delta_x`.
    pub const fn new(delta_x: f64) -> Self {
        Self { delta_x }
    }

    /// Its slope, if defined.
    pub fn slope(&self) -> Option<f64> {
        secant_slope(self.delta_x)
    }

    /// Whether Q is close to P.
    pub fn is_close(&self) -> bool {
        self.delta_x.abs() < CLOSE_THRESHOLD
    }

    /// Whether Q is so close that the secant is indistinguishable from the tangent.
    pub fn is_very_close(&self) -> bool {
        self.delta_x.abs() < VERY_CLOSE_THRESHOLD
    }

    /// |slope - f'(1)|, if the slope is defined.
    pub fn error(&self) -> Option<f64> {
        self.slope().map(|m| (m - EXACT_SLOPE).abs())
    }

    /// The fixed point.
    pub fn p(&self) -> Point {
        Point::new(X0, f(X0))
    }

    /// The moving point.
    pub fn q(&self) -> Point {
        let x = X0 + self.delta_x;
        Point::new(x, f(x))
    }

    /// Secant through P across the window, if the slope is defined.
    pub fn line(&self) -> Option<(Point, Point)> {
        self.slope().map(line_through_p)
    }
}

/// Tangent at P across the window.
pub fn tangent() -> (Point, Point) {
    line_through_p(EXACT_SLOPE)
}

fn line_through_p(m: f64) -> (Point, Point) {
    let at = |x: f64| Point::new(x, f(X0) + m * (x - X0));
    (at(RANGE.x_min), at(RANGE.x_max))
}

/// One row of the approach table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Approach {
    /// Δx.
    pub delta_x: f64,
    /// Secant slope at that Δx.
    pub slope: f64,
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} {:.6}", self.delta_x, self.slope)
    }
}

/// Secant slopes for [`TABLE_STEPS`], tending to [`EXACT_SLOPE`].
pub fn approach_table() -> Vec<Approach> {
    TABLE_STEPS
        .iter()
        .map(|&delta_x| Approach {
            delta_x,
            slope: (f(X0 + delta_x) - f(X0)) / delta_x,
        })
        .collect()
}

/// State of the limit explorer.
#[derive(Debug)]
pub struct LimitExplorer {
    secant: Secant,
    reveal_tangent: bool,
    viewport: Viewport,
    curve: PathMemo,
}

impl LimitExplorer {
    /// Starts at the default Δx with the tangent hidden.
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            secant: Secant::new(DEFAULT_DELTA_X),
            reveal_tangent: false,
            viewport,
            curve: PathMemo::new(),
        }
    }

    /// Builds the explorer described by `config`.
    pub fn from_config(config: &Config) -> ExplorerResult<Self> {
        let mut explorer = Self::new(config.limit.viewport.into());
        explorer.set_delta_x(config.limit.delta_x)?;
        explorer.reveal_tangent(config.limit.reveal_tangent);
        Ok(explorer)
    }

    /// Moves the Δx slider, clamped to [`DELTA_X_BOUNDS`]; returns the applied value.
    pub fn set_delta_x(&mut self, delta_x: f64) -> ExplorerResult<f64> {
        let delta_x = ExplorerError::check_finite("delta_x", delta_x)?;
        self.secant = Secant::new(delta_x.clamp(DELTA_X_BOUNDS.0, DELTA_X_BOUNDS.1));
        Ok(self.secant.delta_x)
    }

    /// Shows the tangent regardless of Δx.
    pub fn reveal_tangent(&mut self, reveal: bool) {
        self.reveal_tangent = reveal;
    }

    /// Current secant.
    pub const fn secant(&self) -> Secant {
        self.secant
    }

    /// Scene for the current secant.
    pub fn scene(&mut self) -> Scene {
        self.scene_for(self.secant)
    }

    /// Scene for an arbitrary secant, bypassing the slider bounds.
    pub fn scene_for(&mut self, secant: Secant) -> Scene {
        let mapper = CoordinateMapper::new(RANGE, self.viewport);
        let mut scene = theme::board("limit", &mapper);

        let grid = Stroke::new(theme::CHALK, 1.0).with_opacity(0.05);
        for (from, to) in grid_lines(&mapper, &GRID_X, &GRID_Y) {
            scene.segment(from, to, grid);
        }
        scene.axes(&mapper, Stroke::new(theme::CHALK, 1.5).with_opacity(0.35));

        let very_close = secant.is_very_close();
        if very_close || self.reveal_tangent {
            let (from, to) = tangent();
            scene.segment(
                mapper.map(from),
                mapper.map(to),
                Stroke::new(accent::YELLOW, 2.5).with_opacity(0.9),
            );
        }

        let p = mapper.map(secant.p());
        let q = mapper.map(secant.q());
        if let Some((from, to)) = secant.line().filter(|_| !very_close) {
            scene
                .segment(
                    mapper.map(from),
                    mapper.map(to),
                    Stroke::new(accent::BLUE, 2.0).with_opacity(0.85),
                )
                .segment(
                    p,
                    Point::new(q.x, p.y),
                    Stroke::new(accent::TEAL, 1.5).dashed(4.0, 3.0),
                )
                .segment(
                    Point::new(q.x, p.y),
                    q,
                    Stroke::new(accent::ROSE, 1.5).dashed(4.0, 3.0),
                );
        }

        // The window keeps x² well inside the break margin, but the curve must never split.
        let options = PathOptions::default()
            .with_samples(CURVE_SAMPLES)
            .with_break_margin(f64::INFINITY);
        let curve = self.curve.plot("x2", f, &mapper, &options).clone();
        scene.curve(curve, Stroke::new(theme::CHALK, 2.5).with_opacity(0.8));

        if !very_close {
            scene.marker(q, 5.0, accent::BLUE, Some(Stroke::new(theme::CHALK, 1.5)));
        }
        scene.marker(p, theme::MARKER_RADIUS, accent::YELLOW, Some(theme::marker_outline()));
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcviz_common::test_utils::assert_approx_eq;
    use calcviz_config::ViewportConfig;
    use calcviz_graphs::SceneElement;

    fn explorer() -> LimitExplorer {
        LimitExplorer::new(ViewportConfig::LIMIT.into())
    }

    #[test]
    fn test_secant_slope() {
        assert_approx_eq(secant_slope(1.4).unwrap(), 3.4, 1e-12);
        assert_approx_eq(secant_slope(-0.5).unwrap(), 1.5, 1e-12);
        assert!(secant_slope(0.0009).is_none());
        assert!(secant_slope(-0.0009).is_none());
        assert!(secant_slope(0.001).is_some());
    }

    #[test]
    fn test_closeness_flags() {
        let s = Secant::new(0.1);
        assert!(s.is_close() && !s.is_very_close());
        assert_approx_eq(s.error().unwrap(), 0.1, 1e-9);

        let s = Secant::new(0.03);
        assert!(s.is_close() && s.is_very_close());
        assert!(!Secant::new(0.15).is_close());
        assert!(Secant::new(0.0).error().is_none());
    }

    #[test]
    fn test_approach_table() {
        let rows = approach_table();
        let slopes: Vec<String> = rows.iter().map(|r| format!("{:.6}", r.slope)).collect();
        assert_eq!(
            slopes,
            vec!["4.000000", "3.000000", "2.500000", "2.100000", "2.010000", "2.001000"]
        );
        assert!(rows.windows(2).all(|w| w[1].slope < w[0].slope));
    }

    #[test]
    fn test_delta_x_is_clamped() {
        let mut e = explorer();
        assert_eq!(e.secant().delta_x, DEFAULT_DELTA_X);
        assert_eq!(e.set_delta_x(0.0).unwrap(), 0.05);
        assert_eq!(e.set_delta_x(3.0).unwrap(), 1.6);
        assert!(e.set_delta_x(f64::NAN).is_err());
    }

    #[test]
    fn test_default_scene_shows_secant_not_tangent() {
        let scene = explorer().scene();
        // grid (9) + axes (2) + secant + two guides
        assert_eq!(scene.counts(), (1, 14, 2));
    }

    #[test]
    fn test_very_close_swaps_secant_for_tangent() {
        let mut e = explorer();
        let scene = e.scene_for(Secant::new(0.01));
        // grid (9) + axes (2) + tangent, only P marked
        assert_eq!(scene.counts(), (1, 12, 1));

        let tangent_stroke = scene.elements.iter().find_map(|el| match el {
            SceneElement::Segment { stroke, .. } if stroke.color == accent::YELLOW => Some(*stroke),
            _ => None,
        });
        assert!(tangent_stroke.is_some());
    }

    #[test]
    fn test_revealed_tangent_alongside_secant() {
        let mut e = explorer();
        e.reveal_tangent(true);
        assert_eq!(e.scene().counts(), (1, 15, 2));
    }

    #[test]
    fn test_negative_delta_puts_q_left_of_p() {
        let mut e = explorer();
        let secant = Secant::new(-0.5);
        let scene = e.scene_for(secant);
        assert_eq!(scene.counts(), (1, 14, 2));
        assert!(secant.q().x < secant.p().x);
    }

    #[test]
    fn test_curve_is_one_sub_path() {
        let scene = explorer().scene();
        let path = scene
            .elements
            .iter()
            .find_map(|el| match el {
                SceneElement::Curve { path, .. } => Some(path),
                _ => None,
            })
            .unwrap();
        assert_eq!(path.move_count(), 1);
        assert_eq!(path.len(), CURVE_SAMPLES + 1);
    }
}
