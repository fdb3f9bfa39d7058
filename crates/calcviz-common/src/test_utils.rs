//! Test utilities and shared test helpers for calcviz.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
#[track_caller]
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Assert that two points are approximately equal component-wise.
#[track_caller]
pub fn assert_point_approx_eq(left: (f64, f64), right: (f64, f64), tolerance: f64) {
    assert_approx_eq(left.0, right.0, tolerance);
    assert_approx_eq(left.1, right.1, tolerance);
}

/// Plot ranges and functions used across test suites.
pub mod plot_fixtures {
    /// `(x_min, x_max, y_min, y_max)` of the x² plot in the derivative explorer.
    pub const SQUARE_RANGE: (f64, f64, f64, f64) = (-2.5, 2.5, -0.5, 6.5);

    /// `(x_min, x_max, y_min, y_max)` of the limit explorer plot.
    pub const LIMIT_RANGE: (f64, f64, f64, f64) = (-0.2, 2.8, -0.2, 4.5);

    /// Viewport of the derivative explorer plots.
    pub const DERIVATIVE_VIEWPORT: (f64, f64) = (480.0, 220.0);

    /// Viewport of the limit explorer plot.
    pub const LIMIT_VIEWPORT: (f64, f64) = (500.0, 340.0);

    /// f(x) = x²
    pub fn square(x: f64) -> f64 {
        x * x
    }

    /// f(x) = 1/x, undefined at zero.
    pub fn reciprocal(x: f64) -> f64 {
        1.0 / x
    }

    /// A function with no finite value anywhere.
    pub fn nowhere_defined(_x: f64) -> f64 {
        f64::NAN
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal TOML configuration overriding only the sampling section.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[plot]
samples = 100
break_margin = 2.5
"#
    }

    /// A full configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "plot:\n",
            "  samples: 300\n",
            "  break_margin: 1.0\n",
            "  precision: 2\n",
            "\n",
            "derivative:\n",
            "  viewport:\n",
            "    width: 640\n",
            "    height: 320\n",
            "  function: \"sin\"\n",
            "  probe: 0.25\n",
            "  time: 1.5\n",
            "\n",
            "limit:\n",
            "  viewport:\n",
            "    width: 500\n",
            "    height: 340\n",
            "  delta_x: 0.5\n",
            "  reveal_tangent: true\n",
            "\n",
            "output:\n",
            "  directory: \"plots\"\n",
            "  format: \"png\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n"
        )
    }

    /// The same shape as [`full_config_yaml`] in JSON, with a smaller override set.
    pub fn partial_config_json() -> &'static str {
        r#"{ "output": { "directory": "json-out", "format": "svg" }, "limit": { "delta_x": 1.0 } }"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for `(x_min, x_max, y_min, y_max)` with strictly positive, non-degenerate spans.
    pub fn range_bounds_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
        (-100.0f64..100.0, 0.1f64..50.0, -100.0f64..100.0, 0.1f64..50.0)
            .prop_map(|(x_min, x_span, y_min, y_span)| (x_min, x_min + x_span, y_min, y_min + y_span))
    }

    /// Strategy for viewport sizes in drawing units.
    pub fn viewport_strategy() -> impl Strategy<Value = (f64, f64)> {
        (16.0f64..2048.0, 16.0f64..2048.0)
    }

    /// Strategy for a fraction within the unit interval, used to place points inside a range.
    pub fn unit_fraction_strategy() -> impl Strategy<Value = f64> {
        0.0f64..=1.0
    }
}
