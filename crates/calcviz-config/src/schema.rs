//! Configuration schema definitions using serde.

use calcviz_common::{CalcVizError, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound for the number of decimals written into SVG path data.
pub const MAX_PRECISION: u8 = 6;

/// Main configuration structure for calcviz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sampling configuration shared by every plot.
    pub plot: PlotConfig,
    /// Derivative explorer configuration.
    pub derivative: DerivativeConfig,
    /// Limit explorer configuration.
    pub limit: LimitConfig,
    /// Rendered output configuration.
    pub output: OutputConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Sampling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Number of sampling steps per curve.
    pub samples: usize,
    /// Distance, in mathematical units, a sample may stray outside the
    /// visible vertical range before the curve is broken.
    pub break_margin: f64,
    /// Decimals written into SVG path data. `None` keeps full precision.
    pub precision: Option<u8>,
}

/// Drawing surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Width in drawing units.
    pub width: u32,
    /// Height in drawing units.
    pub height: u32,
}

/// Derivative explorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivativeConfig {
    /// Size of the function and derivative plots.
    pub viewport: ViewportConfig,
    /// Identifier of the initially selected function.
    pub function: String,
    /// Initial probe position; the function's own default when absent.
    pub probe: Option<f64>,
    /// Initial time of the motion example, in seconds.
    pub time: f64,
}

/// Limit explorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Size of the secant plot.
    pub viewport: ViewportConfig,
    /// Initial horizontal distance between P and Q.
    pub delta_x: f64,
    /// Always draw the tangent line, not only when Q is very close to P.
    pub reveal_tangent: bool,
}

/// Rendered output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving rendered scenes.
    pub directory: PathBuf,
    /// Image format of rendered scenes.
    pub format: OutputFormat,
}

/// Image format of rendered scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalable vector graphics.
    #[default]
    Svg,
    /// Portable network graphics.
    Png,
}

impl OutputFormat {
    /// File extension for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CalcVizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(CalcVizError::validation_field(
                format!("unknown output format '{other}'"),
                "output.format",
            )),
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CalcVizError> {
        if self.plot.samples == 0 {
            return Err(CalcVizError::validation_field(
                "sample count must be at least 1",
                "plot.samples",
            ));
        }

        if !self.plot.break_margin.is_finite() || self.plot.break_margin < 0.0 {
            return Err(CalcVizError::validation_field(
                "break margin must be a finite, non-negative number",
                "plot.break_margin",
            ));
        }

        if let Some(precision) = self.plot.precision {
            if precision > MAX_PRECISION {
                return Err(CalcVizError::validation_field(
                    format!("precision must not exceed {MAX_PRECISION} decimals"),
                    "plot.precision",
                ));
            }
        }

        self.derivative.viewport.validate("derivative.viewport")?;
        self.limit.viewport.validate("limit.viewport")?;

        if self.derivative.function.trim().is_empty() {
            return Err(CalcVizError::validation_field(
                "function identifier cannot be empty",
                "derivative.function",
            ));
        }

        if self.derivative.probe.is_some_and(|probe| !probe.is_finite()) {
            return Err(CalcVizError::validation_field(
                "probe must be finite",
                "derivative.probe",
            ));
        }

        if !self.derivative.time.is_finite() {
            return Err(CalcVizError::validation_field(
                "time must be finite",
                "derivative.time",
            ));
        }

        if !self.limit.delta_x.is_finite() {
            return Err(CalcVizError::validation_field(
                "delta_x must be finite",
                "limit.delta_x",
            ));
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(CalcVizError::validation_field(
                "output directory cannot be empty",
                "output.directory",
            ));
        }

        Ok(())
    }
}

impl ViewportConfig {
    fn validate(&self, field: &str) -> Result<(), CalcVizError> {
        if self.width == 0 || self.height == 0 {
            return Err(CalcVizError::validation_field(
                format!("viewport must be non-empty, got {}x{}", self.width, self.height),
                field,
            ));
        }
        Ok(())
    }
}
