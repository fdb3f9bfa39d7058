//! # calcviz common
//!
//! Shared error type, logging setup and test helpers for calcviz.
//!
//! This crate provides the foundational pieces used across
//! all other crates in the calcviz workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{CalcVizError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
