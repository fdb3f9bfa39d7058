//! Runtime validation of loaded configuration.

use crate::schema::Config;
use calcviz_common::{CalcVizError, Result};
use tracing::warn;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate()
    }

    /// Validates a configuration and checks that the selected function is one of `known`.
    pub fn validate_with_functions(config: &Config, known: &[&str]) -> Result<()> {
        Self::validate(config)?;

        if !known.contains(&config.derivative.function.as_str()) {
            warn!(
                function = %config.derivative.function,
                ?known,
                "configured function is not in the catalogue"
            );
            return Err(CalcVizError::validation_field(
                format!(
                    "unknown function '{}', expected one of: {}",
                    config.derivative.function,
                    known.join(", ")
                ),
                "derivative.function",
            ));
        }

        Ok(())
    }
}
