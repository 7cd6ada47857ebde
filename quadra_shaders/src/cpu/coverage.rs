// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use quadra_encoding::{eval_quadratic, pixel_center, Curve, Point, Transform};

/// Below this magnitude of `a` the root equation is solved as linear.
pub const LINEAR_EPSILON: f32 = 1e-4;

/// Two bits per sign pattern of the curve's y coordinates.
///
/// See [`root_code`].
pub const ROOT_CODES: u32 = 0x2E74;

/// Direction of the ray cast from the sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Towards +x, scaled by the horizontal pixels per unit.
    Horizontal,
    /// Towards +y, scaled by the vertical pixels per unit.
    Vertical,
}

/// Returns which roots of a curve cross the ray.
///
/// Bit 0 selects the first root and bit 1 the second. The code is looked up
/// from [`ROOT_CODES`] by the pattern of which coordinates are strictly
/// positive, so a curve lying entirely on one side contributes nothing.
#[inline]
pub fn root_code(y1: f32, y2: f32, y3: f32) -> u32 {
    let num = 2 * u32::from(y1 > 0.0) + 4 * u32::from(y2 > 0.0) + 8 * u32::from(y3 > 0.0);
    (ROOT_CODES >> num) & 3
}

/// Maps a signed distance along the ray to the covered fraction of a pixel.
///
/// A NaN distance covers nothing.
#[inline]
#[allow(clippy::manual_clamp, reason = "clamp would propagate NaN")]
pub fn pixel_fraction(x: f32, ppem: f32) -> f32 {
    (x * ppem + 0.5).max(0.0).min(1.0)
}

/// Parameters where a curve crosses the x axis, for the roots selected by
/// [`root_code`].
///
/// Returns `None` for a flat curve whose ends sit at the same height, which
/// never crosses.
#[inline]
fn ray_roots(y1: f32, y2: f32, y3: f32) -> Option<(f32, f32)> {
    let a = y1 - 2.0 * y2 + y3;
    let b = y1 - y2;
    let c = y1;
    if a.abs() < LINEAR_EPSILON {
        if b == 0.0 {
            return None;
        }
        let t = c / (2.0 * b);
        Some((t, t))
    } else {
        let root = (b * b - a * c).max(0.0).sqrt();
        Some(((b - root) / a, (b + root) / a))
    }
}

/// Signed coverage one curve contributes to a ray from the origin towards +x.
///
/// The points must already be relative to the sample position.
pub fn trace_ray(p1: Point, p2: Point, p3: Point, ppem: f32) -> f32 {
    let code = root_code(p1.y, p2.y, p3.y);
    if code == 0 {
        return 0.0;
    }
    let Some((t1, t2)) = ray_roots(p1.y, p2.y, p3.y) else {
        return 0.0;
    };
    let mut coverage = 0.0;
    if code & 1 != 0 {
        coverage += pixel_fraction(eval_quadratic(p1.x, p2.x, p3.x, t1), ppem);
    }
    if code & 2 != 0 {
        coverage -= pixel_fraction(eval_quadratic(p1.x, p2.x, p3.x, t2), ppem);
    }
    coverage
}

/// Winding number of `sample` with respect to the curves.
///
/// Counts the crossings of a ray towards +x, with the sign of the crossing
/// curve's direction. A crossing exactly at the sample counts. This is the
/// aliased inside test: nonzero means inside.
pub fn winding_number(curves: &[Curve], sample: Point) -> i32 {
    let mut winding = 0;
    for curve in curves {
        let Curve { p1, p2, p3 } = curve.relative_to(sample);
        let code = root_code(p1.y, p2.y, p3.y);
        if code == 0 {
            continue;
        }
        let Some((t1, t2)) = ray_roots(p1.y, p2.y, p3.y) else {
            continue;
        };
        if code & 1 != 0 && eval_quadratic(p1.x, p2.x, p3.x, t1) >= 0.0 {
            winding += 1;
        }
        if code & 2 != 0 && eval_quadratic(p1.x, p2.x, p3.x, t2) >= 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Sums the signed coverage of every curve along one axis.
pub fn evaluate(curves: &[Curve], sample: Point, ppem: f32, axis: Axis) -> f32 {
    curves
        .iter()
        .map(|curve| {
            let rel = curve.relative_to(sample);
            let rel = match axis {
                Axis::Horizontal => rel,
                Axis::Vertical => rel.transpose(),
            };
            trace_ray(rel.p1, rel.p2, rel.p3, ppem)
        })
        .sum()
}

/// Coverage of `sample` in `[0, 1]`.
///
/// Averages the clamped magnitudes of the horizontal and vertical ray sums,
/// which makes the result independent of curve orientation.
pub fn coverage(curves: &[Curve], sample: Point, ppem: [f32; 2]) -> f32 {
    let h = evaluate(curves, sample, ppem[0], Axis::Horizontal);
    let v = evaluate(curves, sample, ppem[1], Axis::Vertical);
    (h.abs().min(1.0) + v.abs().min(1.0)) * 0.5
}

/// Fills `out` with the coverage of each pixel in row `y`.
///
/// Pixel centers are mapped to curve space through `transform`.
pub fn coverage_row(transform: &Transform, curves: &[Curve], y: u32, out: &mut [f32]) {
    let ppem = transform.ppem();
    for (x, value) in out.iter_mut().enumerate() {
        let sample = transform.apply(pixel_center(x as u32, y));
        *value = coverage(curves, sample, ppem);
    }
}
