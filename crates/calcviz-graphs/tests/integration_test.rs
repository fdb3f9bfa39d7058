//! Integration tests for calcviz-graphs crate.
//!
//! These tests check the mapping and path-building guarantees end to end,
//! plus scene rendering through both backends.

use calcviz_common::test_utils::{
    assert_approx_eq, init_test_logging, plot_fixtures, property_testing::*,
};
use calcviz_graphs::*;
use proptest::prelude::*;

fn mapper_from(bounds: (f64, f64, f64, f64), size: (f64, f64)) -> CoordinateMapper {
    let (x_min, x_max, y_min, y_max) = bounds;
    CoordinateMapper::new(
        MathRange::new(x_min, x_max, y_min, y_max),
        Viewport::new(size.0, size.1),
    )
}

fn square_mapper() -> CoordinateMapper {
    mapper_from(plot_fixtures::SQUARE_RANGE, plot_fixtures::DERIVATIVE_VIEWPORT)
}

proptest! {
    #[test]
    fn prop_round_trip(
        bounds in range_bounds_strategy(),
        size in viewport_strategy(),
        fx in unit_fraction_strategy(),
        fy in unit_fraction_strategy(),
    ) {
        let mapper = mapper_from(bounds, size);
        let range = mapper.range();
        let mx = range.x_min + fx * range.width();
        let my = range.y_min + fy * range.height();

        let p = mapper.to_viewport(mx, my);
        let back = mapper.to_math(p.x, p.y);
        let tolerance = 1e-9 * (1.0 + mx.abs().max(my.abs()));
        prop_assert!((back.x - mx).abs() <= tolerance);
        prop_assert!((back.y - my).abs() <= tolerance);
    }

    #[test]
    fn prop_monotonic(
        bounds in range_bounds_strategy(),
        size in viewport_strategy(),
        a in unit_fraction_strategy(),
        b in unit_fraction_strategy(),
    ) {
        prop_assume!(b - a > 1e-6);
        let mapper = mapper_from(bounds, size);
        let range = mapper.range();
        let lo = mapper.to_viewport(range.x_min + a * range.width(), range.y_min + a * range.height());
        let hi = mapper.to_viewport(range.x_min + b * range.width(), range.y_min + b * range.height());

        // Larger x moves right, larger y moves up (smaller viewport y).
        prop_assert!(lo.x < hi.x);
        prop_assert!(lo.y > hi.y);
    }

    #[test]
    fn prop_boundaries(bounds in range_bounds_strategy(), size in viewport_strategy()) {
        let mapper = mapper_from(bounds, size);
        let r = mapper.range();
        let (w, h) = size;

        let bottom_left = mapper.to_viewport(r.x_min, r.y_min);
        let top_right = mapper.to_viewport(r.x_max, r.y_max);
        prop_assert!(bottom_left.x.abs() < 1e-9 * w);
        prop_assert!((bottom_left.y - h).abs() < 1e-9 * h);
        prop_assert!((top_right.x - w).abs() < 1e-9 * w);
        prop_assert!(top_right.y.abs() < 1e-9 * h);
    }

    #[test]
    fn prop_idempotent_build(samples in 1usize..400, margin in 0.0f64..10.0) {
        let mapper = square_mapper();
        let options = PathOptions { samples, break_margin: margin };
        let first = build_path(plot_fixtures::square, &mapper, &options);
        let second = build_path(plot_fixtures::square, &mapper, &options);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(to_svg_path(&first, Some(1)), to_svg_path(&second, Some(1)));
    }
}

#[test]
fn test_continuous_function_is_one_sub_path() {
    init_test_logging();
    let path = build_path(plot_fixtures::square, &square_mapper(), &PathOptions::default());

    assert_eq!(path.len(), 201);
    assert_eq!(path.move_count(), 1);
    assert_eq!(path.line_count(), 200);
    assert!(path.commands()[0].is_move());
}

#[test]
fn test_reciprocal_breaks_at_pole() {
    init_test_logging();
    let mapper = mapper_from((-2.0, 2.0, -3.0, 3.0), (400.0, 300.0));
    let options = PathOptions::default().with_samples(100);
    let path = build_path(plot_fixtures::reciprocal, &mapper, &options);

    assert!(path.move_count() > 1);

    // No command sits at a sample the window rejects.
    let range = mapper.range();
    for sample in sample(plot_fixtures::reciprocal, range.x_min, range.x_max, options.samples) {
        if !range.admits_y(sample.y, options.break_margin) {
            let rejected = mapper.to_viewport(sample.x, 0.0).x;
            assert!(path.points().all(|p| (p.x - rejected).abs() > 1e-9));
        }
    }
}

#[test]
fn test_first_command_of_square_plot() {
    let mapper = square_mapper();
    let path = build_path(plot_fixtures::square, &mapper, &PathOptions::default());
    let expected = mapper.to_viewport(-2.5, 6.25);

    assert_eq!(path.commands()[0], PathCommand::MoveTo(expected));
    assert_approx_eq(expected.x, 0.0, 1e-12);
    assert_approx_eq(expected.y, 220.0 - (6.75 / 7.0) * 220.0, 1e-9);
    assert!(to_svg_path(&path, Some(1)).starts_with("M0.0,7.9 L"));
}

#[test]
fn test_origin_of_derivative_plot() {
    let origin = square_mapper().origin();
    assert_approx_eq(origin.x, 240.0, 1e-9);
    assert_approx_eq(origin.y, 204.3, 0.05);
}

#[test]
fn test_memo_skips_resampling_on_equal_inputs() {
    init_test_logging();
    let mut memo = PathMemo::new();
    let mapper = square_mapper();
    let options = PathOptions::default();

    let first = memo.plot("x2", plot_fixtures::square, &mapper, &options).clone();
    let again = memo.plot("x2", plot_fixtures::square, &mapper, &options).clone();
    assert_eq!(first, again);
    assert_eq!((memo.hits(), memo.misses()), (1, 1));

    memo.plot("x2", plot_fixtures::square, &mapper, &options.with_samples(100));
    assert_eq!(memo.misses(), 2);
}

#[test]
fn test_scene_renders_in_both_formats() {
    init_test_logging();
    let mapper = square_mapper();
    let mut scene = Scene::new("square", mapper.viewport());
    let axis = Stroke::new(Rgb::BLACK, 1.0).with_opacity(0.3);
    scene
        .axes(&mapper, axis)
        .curve(
            build_path(plot_fixtures::square, &mapper, &PathOptions::default()),
            Stroke::new(Rgb::from_hex("#f5c842"), 2.5),
        )
        .marker(mapper.to_viewport(1.0, 1.0), 6.0, Rgb::from_hex("#f5c842"), None);

    let svg = SvgRenderer.render(&scene).unwrap();
    assert!(String::from_utf8_lossy(&svg).contains("<svg"));

    let png = PngRenderer.render(&scene).unwrap();
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn test_scene_serializes_to_json() {
    let mut scene = Scene::new("segment", Viewport::new(10.0, 10.0));
    scene.segment(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Stroke::new(Rgb::BLACK, 1.0).dashed(4.0, 3.0),
    );

    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["name"], "segment");
    assert_eq!(json["elements"][0]["Segment"]["stroke"]["dash"]["length"], 4.0);
    assert_eq!(json["elements"][0]["Segment"]["stroke"]["dash"]["gap"], 3.0);

    let back: Scene = serde_json::from_value(json).unwrap();
    assert_eq!(back, scene);
}
