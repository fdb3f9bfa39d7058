//! Chalkboard palette shared by every explorer scene.

use calcviz_graphs::{CoordinateMapper, Point, Rgb, Scene, Stroke};

/// Board background.
pub const BACKGROUND: Rgb = Rgb(0x1a, 0x3a, 0x2a);
/// Chalk white.
pub const CHALK: Rgb = Rgb::WHITE;

/// Accent colours.
pub mod accent {
    use calcviz_graphs::Rgb;

    /// Yellow, the point of tangency.
    pub const YELLOW: Rgb = Rgb(0xf5, 0xc8, 0x42);
    /// Teal, horizontal change and rising values.
    pub const TEAL: Rgb = Rgb(0x80, 0xcb, 0xc4);
    /// Blue, the secant and its moving point.
    pub const BLUE: Rgb = Rgb(0x64, 0xb5, 0xf6);
    /// Rose, vertical change and falling values.
    pub const ROSE: Rgb = Rgb(0xef, 0x9a, 0x9a);
    /// Lilac, velocity.
    pub const LILAC: Rgb = Rgb(0xce, 0x93, 0xd8);
}

/// Values at which the horizontal axis gets tick marks.
pub const TICK_VALUES: [f64; 6] = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];
/// Ticks closer than this to either edge are dropped.
pub const TICK_INSET: f64 = 8.0;
const TICK_HALF_LENGTH: f64 = 4.0;

/// Radius of a probe marker.
pub const MARKER_RADIUS: f64 = 6.0;

/// Axis lines.
pub fn axis_stroke() -> Stroke {
    Stroke::new(CHALK, 1.5).with_opacity(0.25)
}

/// White outline around markers.
pub fn marker_outline() -> Stroke {
    Stroke::new(CHALK, 2.0)
}

/// An empty scene on the board background.
pub fn board(name: &str, mapper: &CoordinateMapper) -> Scene {
    Scene::new(name, mapper.viewport()).with_background(BACKGROUND)
}

/// Adds axes through the origin plus short tick marks at [`TICK_VALUES`].
pub fn axes_with_ticks(scene: &mut Scene, mapper: &CoordinateMapper) {
    let tick = Stroke::new(CHALK, 1.0).with_opacity(0.3);
    scene.axes(mapper, axis_stroke());
    for t in calcviz_graphs::tick_positions(mapper, &TICK_VALUES, TICK_INSET) {
        scene.segment(
            Point::new(t.at.x, t.at.y - TICK_HALF_LENGTH),
            Point::new(t.at.x, t.at.y + TICK_HALF_LENGTH),
            tick,
        );
    }
}
