//! Application-wide error types using thiserror.

use calcviz_common::CalcVizError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    /// Configuration, validation or rendering error from the core crates.
    #[error("Core error: {0}")]
    Core(#[from] CalcVizError),

    /// A function id that is not in the catalogue.
    #[error("Unknown function '{id}', expected one of: {known}")]
    UnknownFunction {
        /// The requested id.
        id: String,
        /// Comma-separated catalogue ids.
        known: String,
    },

    /// A non-finite slider value.
    #[error("Invalid {control} value: {value}")]
    InvalidInput {
        /// Name of the control.
        control: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error.
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for the explorer application.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

impl ExplorerError {
    pub(crate) fn check_finite(control: &'static str, value: f64) -> ExplorerResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::InvalidInput { control, value })
        }
    }
}
