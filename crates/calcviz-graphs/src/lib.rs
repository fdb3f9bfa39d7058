//! # calcviz graphs
//!
//! Plotting geometry for calcviz: mapping mathematical coordinates into a
//! fixed viewport, sampling functions into broken polylines, serializing them
//! as SVG path data, and rendering whole scenes through plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod mapper;
pub mod memo;
pub mod path;
pub mod path_data;
pub mod renderer;
pub mod scene;

pub use mapper::{to_viewport, CoordinateMapper, MathRange, Point, Viewport};
pub use memo::{PathKey, PathMemo};
pub use path::{build_path, sample, Path, PathCommand, PathOptions, Sample};
pub use path_data::{to_svg_path, PathData};
pub use renderer::{draw_scene, renderer_for, PngRenderer, SceneRenderer, SvgRenderer};
pub use scene::{
    axes_through_origin, grid_lines, tick_positions, AxisLines, Dash, Rgb, Scene, SceneElement,
    Stroke, Tick,
};
