//! Projectile example: velocity is the derivative of position.

use crate::error::{ExplorerError, ExplorerResult};
use crate::theme::{self, accent};
use calcviz_graphs::{CoordinateMapper, MathRange, PathMemo, PathOptions, Rgb, Scene, Stroke, Viewport};
use serde::Serialize;
use std::fmt;

/// Time at which the projectile turns around.
pub const PEAK_TIME: f64 = 3.0;

/// Window of the position plot, with time on the horizontal axis.
pub const POSITION_RANGE: MathRange = MathRange::new(0.0, 6.0, -0.5, 5.5);

/// Window of the velocity plot.
pub const VELOCITY_RANGE: MathRange = MathRange::new(0.0, 6.0, -3.5, 3.5);

const PEAK_TOLERANCE: f64 = 1e-9;

/// s(t) = -½(t - 3)² + 4.5
pub fn position(t: f64) -> f64 {
    -0.5 * (t - PEAK_TIME) * (t - PEAK_TIME) + 4.5
}

/// v(t) = s'(t) = -(t - 3)
pub fn velocity(t: f64) -> f64 {
    -(t - PEAK_TIME)
}

/// Stage of the flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Moving up, v > 0.
    Ascending,
    /// Turning around, v = 0.
    Peak,
    /// Falling, v < 0.
    Descending,
}

impl Phase {
    /// Phase at time `t`.
    pub fn at(t: f64) -> Self {
        let v = velocity(t);
        if v.abs() <= PEAK_TOLERANCE {
            Self::Peak
        } else if v > 0.0 {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "ascending",
            Self::Peak => "peak",
            Self::Descending => "descending",
        })
    }
}

/// Position and velocity plots sharing one time slider.
#[derive(Debug)]
pub struct MotionExample {
    time: f64,
    viewport: Viewport,
    options: PathOptions,
    position: PathMemo,
    velocity: PathMemo,
}

impl MotionExample {
    /// Starts at `t = 0`.
    pub const fn new(viewport: Viewport, options: PathOptions) -> Self {
        Self {
            time: 0.0,
            viewport,
            options,
            position: PathMemo::new(),
            velocity: PathMemo::new(),
        }
    }

    /// Moves the time slider, clamped to the plotted interval; returns the applied time.
    pub fn set_time(&mut self, t: f64) -> ExplorerResult<f64> {
        let t = ExplorerError::check_finite("time", t)?;
        self.time = t.clamp(POSITION_RANGE.x_min, POSITION_RANGE.x_max);
        Ok(self.time)
    }

    /// Current time.
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::at(self.time)
    }

    /// Position plot with the current position marked.
    pub fn position_scene(&mut self) -> Scene {
        let mapper = CoordinateMapper::new(POSITION_RANGE, self.viewport);
        let path = self
            .position
            .plot("position", position, &mapper, &self.options)
            .clone();
        self.scene("position", &mapper, path, accent::TEAL, position(self.time))
    }

    /// Velocity plot with the current velocity marked.
    pub fn velocity_scene(&mut self) -> Scene {
        let mapper = CoordinateMapper::new(VELOCITY_RANGE, self.viewport);
        let path = self
            .velocity
            .plot("velocity", velocity, &mapper, &self.options)
            .clone();
        self.scene("velocity", &mapper, path, accent::LILAC, velocity(self.time))
    }

    fn scene(
        &self,
        name: &str,
        mapper: &CoordinateMapper,
        path: calcviz_graphs::Path,
        color: Rgb,
        value: f64,
    ) -> Scene {
        let mut scene = theme::board(name, mapper);
        theme::axes_with_ticks(&mut scene, mapper);
        scene
            .curve(path, Stroke::new(color, 2.5))
            .marker(
                mapper.to_viewport(self.time, value),
                theme::MARKER_RADIUS,
                color,
                Some(theme::marker_outline()),
            );
        scene
    }
}
