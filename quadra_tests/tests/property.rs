// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple property tests of the coverage evaluator and the renderers.

#![allow(
    clippy::missing_assert_message,
    clippy::allow_attributes_without_reason
)]

use quadra::kurbo::Affine;
use quadra::{cpu, Curve, CurveSet, Point, RenderParams, RendererOptions, Transform};
use quadra_shaders::cpu::{coverage, evaluate, pixel_fraction, winding_number, Axis};
use quadra_tests::TestParams;

fn lens() -> Vec<Curve> {
    vec![
        Curve::new((0.3, 0.3), (0.5, 0.5), (0.3, 0.7)),
        Curve::new((0.3, 0.7), (1.0, 0.5), (0.3, 0.3)),
    ]
}

fn square(min: f32, max: f32) -> Vec<Curve> {
    vec![
        Curve::line((min, min), (max, min)),
        Curve::line((max, min), (max, max)),
        Curve::line((max, max), (min, max)),
        Curve::line((min, max), (min, min)),
    ]
}

/// A grid which avoids the endpoints and turning points of the test shapes.
fn samples() -> impl Iterator<Item = Point> {
    let at = |i: i32| i as f32 / 25.0 + 0.013;
    (0..25).flat_map(move |y| (0..25).map(move |x| Point::new(at(x), at(y))))
}

#[test]
fn reversing_negates_each_axis() {
    let reversed: Vec<Curve> = lens().iter().map(Curve::reversed).collect();
    for sample in samples() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let forward = evaluate(&lens(), sample, 20.0, axis);
            let backward = evaluate(&reversed, sample, 20.0, axis);
            assert!((forward + backward).abs() < 1e-4, "{sample:?} {axis:?}");
        }
    }
}

#[test]
fn coverage_is_in_unit_range() {
    let mut curves = lens();
    curves.extend(square(0.05, 0.95));
    for sample in samples() {
        for ppem in [1.0, 20.0, 400.0] {
            let value = coverage(&curves, sample, [ppem, ppem]);
            assert!((0.0..=1.0).contains(&value), "{value} at {sample:?}");
        }
    }
}

#[test]
fn empty_set_covers_nothing() {
    for sample in samples() {
        assert_eq!(coverage(&[], sample, [10.0, 10.0]), 0.0);
        assert_eq!(winding_number(&[], sample), 0);
    }
}

#[test]
fn line_square_matches_inside_test() {
    // Far from the edges, coverage is exactly the inside test.
    let curves = square(0.2, 0.8);
    for sample in samples() {
        let distance = [
            sample.x - 0.2,
            0.8 - sample.x,
            sample.y - 0.2,
            0.8 - sample.y,
        ]
        .into_iter()
        .map(f32::abs)
        .fold(f32::INFINITY, f32::min);
        if distance < 0.01 {
            continue;
        }
        let inside = (0.2..0.8).contains(&sample.x) && (0.2..0.8).contains(&sample.y);
        let expected = if inside { 1.0 } else { 0.0 };
        assert_eq!(coverage(&curves, sample, [400.0, 400.0]), expected, "{sample:?}");
        assert_eq!(winding_number(&curves, sample) != 0, inside, "{sample:?}");
    }
}

#[test]
fn coincident_points_contribute_nothing() {
    for point in [(0.5, 0.5), (0.0, 0.0), (0.3, 0.7)] {
        let dot = [Curve::new(point, point, point)];
        let on_point = Point::new(point.0, point.1);
        for sample in samples().chain([on_point]) {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                assert_eq!(evaluate(&dot, sample, 100.0, axis), 0.0, "{sample:?}");
            }
            assert_eq!(winding_number(&dot, sample), 0);
        }
    }
}

#[test]
fn non_finite_curves_leave_the_rest_unchanged() {
    let interior = [
        Point::new(0.5, 0.5),
        Point::new(0.4, 0.5),
        Point::new(0.6, 0.45),
        Point::new(0.1, 0.5),
    ];
    for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let mut curves = lens();
        curves.insert(1, Curve::new((bad, bad), (bad, bad), (bad, bad)));
        for sample in interior.into_iter().chain(samples()) {
            assert_eq!(
                coverage(&curves, sample, [100.0, 100.0]),
                coverage(&lens(), sample, [100.0, 100.0]),
                "{bad} at {sample:?}"
            );
        }
    }
}

#[test]
fn axis_sum_is_bounded_by_curve_count() {
    let mut curves = lens();
    curves.extend(square(0.05, 0.95));
    curves.extend(square(0.35, 0.45));
    let bound = curves.len() as f32;
    for sample in samples() {
        for ppem in [1.0, 20.0, 400.0] {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let value = evaluate(&curves, sample, ppem, axis);
                assert!(value.abs() <= bound, "{value} at {sample:?}");
            }
        }
    }
}

#[test]
fn straight_edges_match_half_plane_in_the_band() {
    let ppem = 100.0;
    let vertical = [Curve::line((0.2, 0.0), (0.2, 1.0))];
    let diagonal = [Curve::line((0.0, 0.0), (1.0, 1.0))];
    let square = square(0.2, 0.8);
    // Half a pixel either side of the edge, plus a little beyond.
    for i in -14..=14 {
        let offset = i as f32 * 0.0005;
        let sample = Point::new(0.2 + offset, 0.537);
        let expected = pixel_fraction(0.2 - sample.x, ppem);
        let value = evaluate(&vertical, sample, ppem, Axis::Horizontal);
        assert!((value.abs() - expected).abs() < 1e-4, "{value} at {sample:?}");

        // Only the left edge of the square is inside the band.
        let value = evaluate(&square, sample, ppem, Axis::Horizontal);
        let inside = pixel_fraction(sample.x - 0.2, ppem);
        assert!((value.abs() - inside).abs() < 1e-4, "{value} at {sample:?}");

        let sample = Point::new(0.5 + offset, 0.5);
        let expected = pixel_fraction(0.5 - sample.x, ppem);
        let value = evaluate(&diagonal, sample, ppem, Axis::Horizontal);
        assert!((value.abs() - expected).abs() < 1e-4, "{value} at {sample:?}");
    }
}

#[test]
fn coverage_grows_across_an_edge() {
    let curves = square(0.2, 0.8);
    let mut last = 0.0;
    for i in 0..=40 {
        let sample = Point::new(0.19 + i as f32 * 0.0005, 0.5);
        let value = coverage(&curves, sample, [100.0, 100.0]);
        assert!(value >= last, "{value} < {last} at {sample:?}");
        last = value;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn higher_density_sharpens() {
    let interior = Point::new(0.5, 0.5);
    let exterior = Point::new(0.0, 0.0);
    for ppem in [100.0, 800.0] {
        assert!(coverage(&lens(), interior, [ppem, ppem]) > 0.9);
        assert!(coverage(&lens(), exterior, [ppem, ppem]) < 0.05);
    }
}

#[test]
fn rotated_render_stays_in_range() {
    let curves = CurveSet::new(lens());
    let params = TestParams::new("rotated_render_stays_in_range", 64, 64);
    let fit = params.render_params().transform;
    let rotate = Affine::rotate_about(0.7, (32.0, 32.0));
    let render_params = RenderParams {
        transform: Transform::from_kurbo(&(fit.to_kurbo() * rotate)),
        ..params.render_params()
    };
    let mut renderer = cpu::Renderer::new(RendererOptions::default()).unwrap();
    let values = renderer.render_coverage(&curves, &render_params);
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    assert!(values.iter().any(|&v| v == 1.0));
}

#[test]
fn winding_render_agrees_with_coverage_far_from_edges() {
    let curves = CurveSet::new(square(0.2, 0.8));
    let params = TestParams::new("winding_render_agrees", 50, 50).render_params();
    let mut renderer = cpu::Renderer::new(RendererOptions::default()).unwrap();
    let aliased = renderer.render_winding(&curves, &params);
    let smooth = renderer.render_to_pixmap(&curves, &params);
    // Edges fall on pixel 10 and pixel 40; stay two pixels away.
    for y in (0..50).filter(|y| !(8..13).contains(y) && !(38..43).contains(y)) {
        for x in (0..50).filter(|x| !(8..13).contains(x) && !(38..43).contains(x)) {
            assert_eq!(aliased.sample(x, y), smooth.sample(x, y), "({x}, {y})");
        }
    }
}
