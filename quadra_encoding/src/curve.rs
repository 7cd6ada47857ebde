// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::{Deref, Sub};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

/// A point in curve space.
///
/// This must be kept in sync with the `vec2<f32>` points in `shader/shared/curve.wgsl`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point with its coordinates swapped.
    #[must_use]
    pub const fn transpose(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Returns the point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// One quadratic Bézier segment.
///
/// `p1` and `p3` are the endpoints and `p2` is the control point. The control
/// point may lie anywhere; straight lines are encoded with the control point
/// at the midpoint of the endpoints (see [`Curve::line`]).
///
/// The layout matches `struct Curve` in `shader/shared/curve.wgsl`, so a slice
/// of curves can be uploaded to the GPU as-is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct Curve {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

static_assertions::const_assert_eq!(std::mem::size_of::<Curve>(), 24);

impl Curve {
    pub fn new(p1: impl Into<Point>, p2: impl Into<Point>, p3: impl Into<Point>) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Creates the degenerate quadratic which traces the straight line from `from` to `to`.
    pub fn line(from: impl Into<Point>, to: impl Into<Point>) -> Self {
        let (from, to) = (from.into(), to.into());
        Self {
            p1: from,
            p2: from.midpoint(to),
            p3: to,
        }
    }

    /// Returns the same curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            p1: self.p3,
            p2: self.p2,
            p3: self.p1,
        }
    }

    /// Returns the curve with x and y swapped in every point.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            p1: self.p1.transpose(),
            p2: self.p2.transpose(),
            p3: self.p3.transpose(),
        }
    }

    /// Returns the curve translated so that `origin` becomes the zero point.
    #[must_use]
    pub fn relative_to(&self, origin: Point) -> Self {
        Self {
            p1: self.p1 - origin,
            p2: self.p2 - origin,
            p3: self.p3 - origin,
        }
    }

    /// Evaluates the curve at parameter `t`.
    pub fn eval(&self, t: f32) -> Point {
        Point::new(
            eval_quadratic(self.p1.x, self.p2.x, self.p3.x, t),
            eval_quadratic(self.p1.y, self.p2.y, self.p3.y, t),
        )
    }

    /// Bounding box of the three control points.
    pub fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::EMPTY;
        bbox.add_point(self.p1);
        bbox.add_point(self.p2);
        bbox.add_point(self.p3);
        bbox
    }
}

/// Evaluates one coordinate of a quadratic Bézier in Bernstein form.
#[inline]
pub fn eval_quadratic(y1: f32, y2: f32, y3: f32, t: f32) -> f32 {
    let it = 1.0 - t;
    it * it * y1 + 2.0 * t * it * y2 + t * t * y3
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bbox {
    pub min: Point,
    pub max: Point,
}

impl Bbox {
    /// A box containing nothing; adding any point makes it non-empty.
    pub const EMPTY: Self = Self {
        min: Point::new(f32::MAX, f32::MAX),
        max: Point::new(f32::MIN, f32::MIN),
    };

    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn add_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    pub fn height(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }
}

impl Default for Bbox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// An ordered, immutable collection of quadratic curves.
///
/// The curves of one shape (one or more contours) are stored together. The
/// set is never mutated after construction, so clones share storage and the
/// set can be read from any number of threads at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveSet {
    curves: Arc<[Curve]>,
}

static_assertions::assert_impl_all!(CurveSet: Send, Sync);

impl CurveSet {
    pub fn new(curves: impl Into<Arc<[Curve]>>) -> Self {
        Self {
            curves: curves.into(),
        }
    }

    pub fn as_slice(&self) -> &[Curve] {
        &self.curves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Bounding box of every control point in the set.
    pub fn bbox(&self) -> Bbox {
        self.curves
            .iter()
            .fold(Bbox::EMPTY, |bbox, curve| bbox.union(&curve.bbox()))
    }
}

impl Deref for CurveSet {
    type Target = [Curve];

    fn deref(&self) -> &[Curve] {
        &self.curves
    }
}

impl FromIterator<Curve> for CurveSet {
    fn from_iter<T: IntoIterator<Item = Curve>>(iter: T) -> Self {
        Self {
            curves: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}
