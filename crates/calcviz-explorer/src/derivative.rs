//! Derivative explorer: a function with its tangent line beside the derivative.
//!
//! The probe sits on the function plot; the derivative plot shows the slope at
//! the probe as a point on f'(x), with both markers aligned vertically.

use crate::catalog::{self, PlotFunction};
use crate::error::{ExplorerError, ExplorerResult};
use crate::theme;
use calcviz_config::{Config, DerivativeConfig};
use calcviz_graphs::{CoordinateMapper, PathMemo, PathOptions, Point, Rgb, Scene, Stroke, Viewport};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Distance kept between the probe and either end of the horizontal range.
pub const PROBE_INSET: f64 = 0.1;

/// Slopes within this distance of zero count as a critical point.
pub const TREND_TOLERANCE: f64 = 0.05;

/// Direction of the function at the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// f'(x) > 0.
    Rising,
    /// f'(x) ≈ 0: a maximum, minimum or inflection.
    Critical,
    /// f'(x) < 0.
    Falling,
}

impl Trend {
    /// Classifies a slope.
    pub fn of_slope(slope: f64) -> Self {
        if slope > TREND_TOLERANCE {
            Self::Rising
        } else if slope < -TREND_TOLERANCE {
            Self::Falling
        } else {
            Self::Critical
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rising => "rising",
            Self::Critical => "critical",
            Self::Falling => "falling",
        })
    }
}

/// State of the derivative explorer.
#[derive(Debug)]
pub struct DerivativeExplorer {
    function: &'static PlotFunction,
    probe: f64,
    viewport: Viewport,
    options: PathOptions,
    curve: PathMemo,
    derivative: PathMemo,
}

impl DerivativeExplorer {
    /// Starts on the first catalogue function with its initial probe.
    pub fn new(viewport: Viewport, options: PathOptions) -> Self {
        let function = &catalog::FUNCTIONS[0];
        Self {
            function,
            probe: function.initial_probe,
            viewport,
            options,
            curve: PathMemo::new(),
            derivative: PathMemo::new(),
        }
    }

    /// Builds the explorer described by `config`.
    pub fn from_config(config: &Config) -> ExplorerResult<Self> {
        let DerivativeConfig {
            viewport,
            function,
            probe,
            ..
        } = &config.derivative;

        let mut explorer = Self::new((*viewport).into(), PathOptions::from(&config.plot));
        explorer.select(function)?;
        if let Some(probe) = probe {
            explorer.set_probe(*probe)?;
        }
        Ok(explorer)
    }

    /// Switches to the function `id` and resets the probe to its initial position.
    pub fn select(&mut self, id: &str) -> ExplorerResult<()> {
        self.function = catalog::lookup(id)?;
        self.probe = self.function.initial_probe;
        debug!(function = id, probe = self.probe, "selected function");
        Ok(())
    }

    /// Moves the probe, clamped to [`DerivativeExplorer::probe_bounds`]; returns the applied position.
    pub fn set_probe(&mut self, x: f64) -> ExplorerResult<f64> {
        let x = ExplorerError::check_finite("probe", x)?;
        let (lo, hi) = self.probe_bounds();
        self.probe = x.clamp(lo, hi);
        Ok(self.probe)
    }

    /// Selected function.
    pub const fn function(&self) -> &'static PlotFunction {
        self.function
    }

    /// Probe position.
    pub const fn probe(&self) -> f64 {
        self.probe
    }

    /// Allowed probe interval.
    pub fn probe_bounds(&self) -> (f64, f64) {
        let range = self.function.range;
        (range.x_min + PROBE_INSET, range.x_max - PROBE_INSET)
    }

    /// f'(probe).
    pub fn slope(&self) -> f64 {
        (self.function.df)(self.probe)
    }

    /// Direction of the function at the probe.
    pub fn trend(&self) -> Trend {
        Trend::of_slope(self.slope())
    }

    /// `(probe, f(probe))` in mathematical coordinates.
    pub fn point(&self) -> Point {
        Point::new(self.probe, (self.function.f)(self.probe))
    }

    /// Tangent at the probe, evaluated at both ends of the horizontal range.
    pub fn tangent(&self) -> (Point, Point) {
        let Point { x: px, y: py } = self.point();
        let m = self.slope();
        let range = self.function.range;
        let at = |x: f64| Point::new(x, py + m * (x - px));
        (at(range.x_min), at(range.x_max))
    }

    /// Mapper of the function plot.
    pub fn function_mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.function.range, self.viewport)
    }

    /// Mapper of the derivative plot.
    pub fn derivative_mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.function.derivative_range(), self.viewport)
    }

    /// Function plot: axes, tangent, curve and probe marker.
    pub fn function_scene(&mut self) -> Scene {
        let function = self.function;
        let color = Rgb::from_hex(function.color);
        let mapper = self.function_mapper();

        let mut scene = theme::board("function", &mapper);
        theme::axes_with_ticks(&mut scene, &mapper);

        let (from, to) = self.tangent();
        scene.segment(
            mapper.map(from),
            mapper.map(to),
            Stroke::new(color, 2.0).with_opacity(0.7),
        );

        let curve = self
            .curve
            .plot(function.id, function.f, &mapper, &self.options)
            .clone();
        scene
            .curve(curve, Stroke::new(theme::CHALK, 2.5).with_opacity(0.85))
            .marker(
                mapper.map(self.point()),
                theme::MARKER_RADIUS,
                color,
                Some(theme::marker_outline()),
            );
        scene
    }

    /// Derivative plot: axes, f'(x), a guide through the probe and the `(probe, slope)` marker.
    pub fn derivative_scene(&mut self) -> Scene {
        let function = self.function;
        let color = Rgb::from_hex(function.color);
        let mapper = self.derivative_mapper();

        let mut scene = theme::board("derivative", &mapper);
        theme::axes_with_ticks(&mut scene, &mapper);

        let curve = self
            .derivative
            .plot(function.id, function.df, &mapper, &self.options)
            .clone();
        scene.curve(curve, Stroke::new(color, 2.5).with_opacity(0.9));

        // Same horizontal span as the function plot, so the guide lines the markers up.
        let guide_x = mapper.to_viewport(self.probe, 0.0).x;
        scene
            .segment(
                Point::new(guide_x, 0.0),
                Point::new(guide_x, self.viewport.height),
                Stroke::new(color, 1.0).with_opacity(0.3).dashed(4.0, 3.0),
            )
            .marker(
                mapper.to_viewport(self.probe, self.slope()),
                theme::MARKER_RADIUS,
                color,
                Some(theme::marker_outline()),
            );
        scene
    }

    /// Memo hits and misses summed over both curve slots.
    pub const fn memo_stats(&self) -> (u64, u64) {
        (
            self.curve.hits() + self.derivative.hits(),
            self.curve.misses() + self.derivative.misses(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcviz_common::test_utils::assert_approx_eq;
    use calcviz_config::ViewportConfig;

    fn explorer() -> DerivativeExplorer {
        DerivativeExplorer::new(ViewportConfig::DERIVATIVE.into(), PathOptions::default())
    }

    #[test]
    fn test_trend_thresholds() {
        assert_eq!(Trend::of_slope(0.051), Trend::Rising);
        assert_eq!(Trend::of_slope(0.05), Trend::Critical);
        assert_eq!(Trend::of_slope(-0.05), Trend::Critical);
        assert_eq!(Trend::of_slope(-0.051), Trend::Falling);
        assert_eq!(Trend::Falling.to_string(), "falling");
    }

    #[test]
    fn test_select_resets_probe() {
        let mut e = explorer();
        e.set_probe(-1.7).unwrap();
        e.select("sin").unwrap();
        assert_eq!(e.probe(), 0.5);
        e.select("x3").unwrap();
        assert_eq!(e.probe(), 1.0);
        assert!(e.select("cos").is_err());
        assert_eq!(e.function().id, "x3");
    }

    #[test]
    fn test_probe_is_clamped() {
        let mut e = explorer();
        assert_approx_eq(e.set_probe(10.0).unwrap(), 2.4, 1e-12);
        assert_approx_eq(e.set_probe(-10.0).unwrap(), -2.4, 1e-12);
        assert!(e.set_probe(f64::NAN).is_err());
        assert_approx_eq(e.probe(), -2.4, 1e-12);
    }

    #[test]
    fn test_slope_and_tangent_for_square() {
        let mut e = explorer();
        e.set_probe(1.0).unwrap();
        assert_eq!(e.slope(), 2.0);
        assert_eq!(e.trend(), Trend::Rising);

        let (from, to) = e.tangent();
        assert_eq!(from, Point::new(-2.5, 1.0 + 2.0 * -3.5));
        assert_eq!(to, Point::new(2.5, 1.0 + 2.0 * 1.5));
    }

    #[test]
    fn test_sine_is_critical_at_half_pi() {
        let mut e = explorer();
        e.select("sin").unwrap();
        e.set_probe(std::f64::consts::FRAC_PI_2).unwrap();
        assert_eq!(e.trend(), Trend::Critical);
        e.set_probe(3.0).unwrap();
        assert_eq!(e.trend(), Trend::Falling);
    }

    #[test]
    fn test_moving_probe_reuses_curves() {
        let mut e = explorer();
        e.function_scene();
        e.derivative_scene();
        e.set_probe(0.3).unwrap();
        e.function_scene();
        e.derivative_scene();
        assert_eq!(e.memo_stats(), (2, 2));

        e.select("sin").unwrap();
        e.function_scene();
        assert_eq!(e.memo_stats(), (2, 3));
    }

    #[test]
    fn test_markers_share_horizontal_position() {
        let mut e = explorer();
        e.set_probe(-0.75).unwrap();
        let function = e.function_scene();
        let derivative = e.derivative_scene();

        let marker_x = |scene: &Scene| {
            scene.elements.iter().rev().find_map(|el| match el {
                calcviz_graphs::SceneElement::Marker { at, .. } => Some(at.x),
                _ => None,
            })
        };
        let a = marker_x(&function).unwrap();
        let b = marker_x(&derivative).unwrap();
        assert_approx_eq(a, b, 1e-9);
        assert_approx_eq(a, 480.0 * (1.75 / 5.0), 1e-9);
    }
}
