//! # calcviz explorer
//!
//! Limit and derivative explorers for teaching the derivative, rendered as
//! static scenes.
//!
//! This is the main binary crate: it loads configuration, drives the explorer
//! state machines and writes every scene through the configured renderer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod catalog;
pub mod derivative;
pub mod error;
pub mod limit;
pub mod motion;
pub mod theme;

pub use app::*;
pub use catalog::{PlotFunction, FUNCTIONS};
pub use derivative::{DerivativeExplorer, Trend};
pub use error::*;
pub use limit::{LimitExplorer, Secant};
pub use motion::{MotionExample, Phase};
