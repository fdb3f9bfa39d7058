//! Default values matching the explorers' built-in plots.

use crate::schema::*;
use calcviz_common::LoggingConfig;
use std::path::PathBuf;

/// Sampling steps per curve.
pub const DEFAULT_SAMPLES: usize = 200;
/// Out-of-range tolerance before a curve is broken.
pub const DEFAULT_BREAK_MARGIN: f64 = 5.0;
/// Decimals in serialized path data.
pub const DEFAULT_PRECISION: u8 = 1;

impl Default for Config {
    fn default() -> Self {
        Self {
            plot: PlotConfig::default(),
            derivative: DerivativeConfig::default(),
            limit: LimitConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            break_margin: DEFAULT_BREAK_MARGIN,
            precision: Some(DEFAULT_PRECISION),
        }
    }
}

impl ViewportConfig {
    /// Size of the derivative explorer plots.
    pub const DERIVATIVE: Self = Self {
        width: 480,
        height: 220,
    };

    /// Size of the limit explorer plot.
    pub const LIMIT: Self = Self {
        width: 500,
        height: 340,
    };
}

impl Default for DerivativeConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::DERIVATIVE,
            function: "x2".to_string(),
            probe: None,
            time: 0.0,
        }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::LIMIT,
            delta_x: 1.4,
            reveal_tangent: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("out"),
            format: OutputFormat::Svg,
        }
    }
}
