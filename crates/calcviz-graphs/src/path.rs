//! Uniform function sampling into move/line drawing commands.

use crate::mapper::{CoordinateMapper, MathRange, Point};
use calcviz_config::{PlotConfig, DEFAULT_BREAK_MARGIN, DEFAULT_SAMPLES};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One drawing instruction in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Starts a new sub-path.
    MoveTo(Point),
    /// Extends the current sub-path.
    LineTo(Point),
}

impl PathCommand {
    /// Target point of the command.
    pub const fn point(&self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => *p,
        }
    }

    /// Whether the command starts a new sub-path.
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::MoveTo(_))
    }
}

/// Ordered drawing commands forming one or more disjoint polylines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Creates an empty path.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// A single straight segment.
    pub fn line(from: Point, to: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(from), PathCommand::LineTo(to)],
        }
    }

    /// Starts a new sub-path at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    /// Extends the current sub-path to `point`; starts one if the path is empty.
    pub fn line_to(&mut self, point: Point) {
        if self.commands.is_empty() {
            self.move_to(point);
        } else {
            self.commands.push(PathCommand::LineTo(point));
        }
    }

    /// All commands in drawing order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of sub-paths.
    pub fn move_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_move()).count()
    }

    /// Number of line commands.
    pub fn line_count(&self) -> usize {
        self.len() - self.move_count()
    }

    /// Every command's point in drawing order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().map(PathCommand::point)
    }

    /// Points grouped per sub-path.
    pub fn segments(&self) -> Vec<Vec<Point>> {
        let mut segments: Vec<Vec<Point>> = Vec::new();
        for command in &self.commands {
            match (command, segments.last_mut()) {
                (PathCommand::LineTo(p), Some(current)) => current.push(*p),
                (c, _) => segments.push(vec![c.point()]),
            }
        }
        segments
    }
}

/// Sampling parameters for [`build_path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    /// Number of equal steps across the interval; `samples + 1` points are evaluated.
    pub samples: usize,
    /// How far, in mathematical units, a sample may lie outside the vertical
    /// window and still be drawn.
    pub break_margin: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            break_margin: DEFAULT_BREAK_MARGIN,
        }
    }
}

impl PathOptions {
    /// Same options with a different sample count.
    pub const fn with_samples(self, samples: usize) -> Self {
        Self {
            samples,
            break_margin: self.break_margin,
        }
    }

    /// Same options with a different break margin.
    pub const fn with_break_margin(self, break_margin: f64) -> Self {
        Self {
            samples: self.samples,
            break_margin,
        }
    }
}

impl From<&PlotConfig> for PathOptions {
    fn from(config: &PlotConfig) -> Self {
        Self {
            samples: config.samples,
            break_margin: config.break_margin,
        }
    }
}

/// One evaluated `(x, f(x))` pair in mathematical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Input.
    pub x: f64,
    /// Output, possibly non-finite.
    pub y: f64,
}

/// Evaluates `f` at `samples + 1` evenly spaced inputs across `[x_min, x_max]`.
///
/// A sample count of zero is treated as one, so both interval ends are always evaluated.
pub fn sample<F>(f: F, x_min: f64, x_max: f64, samples: usize) -> impl Iterator<Item = Sample>
where
    F: Fn(f64) -> f64,
{
    let steps = samples.max(1);
    #[allow(clippy::cast_precision_loss)]
    let n = steps as f64;
    (0..=steps).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let x = x_min + (i as f64 / n) * (x_max - x_min);
        Sample { x, y: f(x) }
    })
}

/// Samples `f` across the mapper's horizontal range and emits a path in viewport coordinates.
///
/// Samples that are non-finite or fall outside the vertical range widened by
/// `options.break_margin` are dropped, and the next visible sample starts a new
/// sub-path.
pub fn build_path<F>(f: F, mapper: &CoordinateMapper, options: &PathOptions) -> Path
where
    F: Fn(f64) -> f64,
{
    let range: MathRange = mapper.range();
    let mut path = Path::new();
    let mut broken = true;
    let mut dropped = 0usize;

    for Sample { x, y } in sample(f, range.x_min, range.x_max, options.samples) {
        if !range.admits_y(y, options.break_margin) {
            broken = true;
            dropped += 1;
            continue;
        }

        let point = mapper.to_viewport(x, y);
        if broken {
            path.move_to(point);
            broken = false;
        } else {
            path.line_to(point);
        }
    }

    trace!(
        commands = path.len(),
        sub_paths = path.move_count(),
        dropped,
        "built function path"
    );
    path
}
