//! Error types and utilities for calcviz

use thiserror::Error;

/// Result type alias for calcviz operations
pub type Result<T> = std::result::Result<T, CalcVizError>;

/// Main error type for calcviz operations
#[derive(Error, Debug)]
pub enum CalcVizError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// What went wrong
        message: String,
        /// Document format involved, such as `json`
        format: Option<String>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Scene rendering and image encoding errors
    #[error("Render error: {message}")]
    Render {
        /// What went wrong
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for configuration values or plot inputs
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
        /// Dotted path of the offending setting
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// What went wrong
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CalcVizError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new serialization error tagged with the document format
    pub fn serialization(
        msg: impl Into<String>,
        format: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            message: msg.into(),
            format: Some(format.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Whether this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is a render error
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// Field name attached to a validation error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CalcVizError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON parsing error", "json", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = CalcVizError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = CalcVizError::config("config issue");
        assert!(config_error.is_config());
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let render_error = CalcVizError::render("backend closed");
        assert!(render_error.is_render());
        assert_eq!(render_error.to_string(), "Render error: backend closed");

        let validation_error = CalcVizError::validation_field("must be positive", "plot.samples");
        assert!(validation_error.is_validation());
        assert_eq!(validation_error.field(), Some("plot.samples"));
        assert_eq!(
            validation_error.to_string(),
            "Validation error: must be positive"
        );
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = CalcVizError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let render_error = CalcVizError::render_with_source(
            "encode failed",
            io::Error::new(io::ErrorKind::Other, "short write"),
        );
        assert!(render_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: CalcVizError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#)
            .unwrap_err();
        let error: CalcVizError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
        match error {
            CalcVizError::Serialization { format, .. } => assert_eq!(format.as_deref(), Some("json")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = CalcVizError::config_with_source("Middle layer", root_error);
        let top_error = CalcVizError::with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
        assert_eq!(current_error.to_string(), "Root cause");
    }
}
