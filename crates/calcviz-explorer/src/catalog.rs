//! Functions offered by the derivative explorer.

use crate::error::{ExplorerError, ExplorerResult};
use calcviz_graphs::MathRange;

/// A plottable function together with its derivative and display settings.
#[derive(Debug, Clone, Copy)]
pub struct PlotFunction {
    /// Stable identity, also used as the memo key.
    pub id: &'static str,
    /// Label of the function plot.
    pub label: &'static str,
    /// Label of the derivative plot.
    pub derivative_label: &'static str,
    /// The function.
    pub f: fn(f64) -> f64,
    /// Its derivative.
    pub df: fn(f64) -> f64,
    /// Accent colour as `#rrggbb`.
    pub color: &'static str,
    /// Window of the function plot.
    pub range: MathRange,
    /// Vertical window of the derivative plot; shares the horizontal span of `range`.
    pub derivative_y: (f64, f64),
    /// Probe position right after the function is selected.
    pub initial_probe: f64,
}

impl PlotFunction {
    /// Window of the derivative plot.
    pub const fn derivative_range(&self) -> MathRange {
        self.range.with_y(self.derivative_y.0, self.derivative_y.1)
    }
}

fn square(x: f64) -> f64 {
    x * x
}

fn double(x: f64) -> f64 {
    2.0 * x
}

fn cube(x: f64) -> f64 {
    x * x * x
}

fn triple_square(x: f64) -> f64 {
    3.0 * x * x
}

/// Every selectable function, in display order.
pub static FUNCTIONS: [PlotFunction; 3] = [
    PlotFunction {
        id: "x2",
        label: "f(x) = x²",
        derivative_label: "f'(x) = 2x",
        f: square,
        df: double,
        color: "#f5c842",
        range: MathRange::new(-2.5, 2.5, -0.5, 6.5),
        derivative_y: (-5.5, 5.5),
        initial_probe: 1.0,
    },
    PlotFunction {
        id: "x3",
        label: "f(x) = x³",
        derivative_label: "f'(x) = 3x²",
        f: cube,
        df: triple_square,
        color: "#80cbc4",
        range: MathRange::new(-2.2, 2.2, -9.0, 9.0),
        derivative_y: (-0.5, 13.0),
        initial_probe: 1.0,
    },
    PlotFunction {
        id: "sin",
        label: "f(x) = sin(x)",
        derivative_label: "f'(x) = cos(x)",
        f: f64::sin,
        df: f64::cos,
        color: "#ce93d8",
        range: MathRange::new(-3.5, 3.5, -1.5, 1.5),
        derivative_y: (-1.5, 1.5),
        initial_probe: 0.5,
    },
];

/// Looks a function up by id.
pub fn find(id: &str) -> Option<&'static PlotFunction> {
    FUNCTIONS.iter().find(|function| function.id == id)
}

/// Looks a function up by id, failing with the list of known ids.
pub fn lookup(id: &str) -> ExplorerResult<&'static PlotFunction> {
    find(id).ok_or_else(|| ExplorerError::UnknownFunction {
        id: id.to_string(),
        known: ids().join(", "),
    })
}

/// All catalogue ids, in display order.
pub fn ids() -> Vec<&'static str> {
    FUNCTIONS.iter().map(|function| function.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(find("x3").map(|f| f.color), Some("#80cbc4"));
        assert!(find("tan").is_none());

        let err = lookup("tan").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown function 'tan', expected one of: x2, x3, sin"
        );
    }

    #[test]
    fn test_derivatives_match_difference_quotient() {
        let h = 1e-6;
        for function in &FUNCTIONS {
            for x in [-1.3, 0.0, 0.7, 1.9] {
                let numeric = ((function.f)(x + h) - (function.f)(x - h)) / (2.0 * h);
                assert!(
                    (numeric - (function.df)(x)).abs() < 1e-5,
                    "{} at {x}",
                    function.id
                );
            }
        }
    }

    #[test]
    fn test_derivative_range_keeps_horizontal_span() {
        let x3 = lookup("x3").unwrap();
        let range = x3.derivative_range();
        assert_eq!((range.x_min, range.x_max), (-2.2, 2.2));
        assert_eq!((range.y_min, range.y_max), (-0.5, 13.0));
    }
}
