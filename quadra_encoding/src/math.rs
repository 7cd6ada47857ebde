// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use peniko::kurbo;

use crate::{Bbox, Point};

/// Affine transformation matrix.
///
/// Renderers use this to map pixel coordinates into curve space:
/// `x' = m0 * x + m2 * y + t0` and `y' = m1 * x + m3 * y + t1`.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// 2x2 matrix.
    pub matrix: [f32; 4],
    /// Translation.
    pub translation: [f32; 2],
}

impl Transform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        matrix: [1.0, 0.0, 0.0, 1.0],
        translation: [0.0; 2],
    };

    /// Creates a non-uniform scale.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy],
            translation: [0.0; 2],
        }
    }

    /// Creates a translation.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0],
            translation: [tx, ty],
        }
    }

    /// Returns the pixel to curve space transform which shows `bbox` in a
    /// `width` by `height` target.
    ///
    /// Both axes share one scale, the larger of the two the box needs, and
    /// the box is centered along the other axis. The y axis is flipped: pixel
    /// rows grow downwards while curve space (font units in particular) grows
    /// upwards, so the top row samples `bbox.max.y` when the box is taller
    /// than the target.
    pub fn fit_bbox(bbox: &Bbox, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1) as f32, height.max(1) as f32);
        let (bw, bh) = (bbox.width(), bbox.height());
        let s = (bw / width).max(bh / height);
        let (tx, ty) = if bbox.is_empty() {
            (0.0, 0.0)
        } else {
            // Slack is the curve-space margin left over on each axis.
            let slack_x = width * s - bw;
            let slack_y = height * s - bh;
            (bbox.min.x - 0.5 * slack_x, bbox.max.y + 0.5 * slack_y)
        };
        Self {
            matrix: [s, 0.0, 0.0, -s],
            translation: [tx, ty],
        }
    }

    /// Creates a transform from a kurbo affine matrix.
    pub fn from_kurbo(transform: &kurbo::Affine) -> Self {
        let c = transform.as_coeffs().map(|x| x as f32);
        Self {
            matrix: [c[0], c[1], c[2], c[3]],
            translation: [c[4], c[5]],
        }
    }

    /// Converts the transform to a kurbo affine matrix.
    pub fn to_kurbo(&self) -> kurbo::Affine {
        kurbo::Affine::new(
            [
                self.matrix[0],
                self.matrix[1],
                self.matrix[2],
                self.matrix[3],
                self.translation[0],
                self.translation[1],
            ]
            .map(|x| x as f64),
        )
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.matrix[0] * p.x + self.matrix[2] * p.y + self.translation[0],
            self.matrix[1] * p.x + self.matrix[3] * p.y + self.translation[1],
        )
    }

    /// Pixels per curve-space unit along each axis.
    ///
    /// This is the reciprocal of the screen-space derivative width
    /// (`fwidth`) of the transformed coordinate, so the CPU evaluators
    /// scale coverage the same way the fragment shader does.
    pub fn ppem(&self) -> [f32; 2] {
        [
            1.0 / (self.matrix[0].abs() + self.matrix[2].abs()),
            1.0 / (self.matrix[1].abs() + self.matrix[3].abs()),
        ]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self {
            matrix: [
                self.matrix[0] * other.matrix[0] + self.matrix[2] * other.matrix[1],
                self.matrix[1] * other.matrix[0] + self.matrix[3] * other.matrix[1],
                self.matrix[0] * other.matrix[2] + self.matrix[2] * other.matrix[3],
                self.matrix[1] * other.matrix[2] + self.matrix[3] * other.matrix[3],
            ],
            translation: [
                self.matrix[0] * other.translation[0]
                    + self.matrix[2] * other.translation[1]
                    + self.translation[0],
                self.matrix[1] * other.translation[0]
                    + self.matrix[3] * other.translation[1]
                    + self.translation[1],
            ],
        }
    }
}

/// Position of the center of pixel (`x`, `y`).
///
/// Every backend samples coverage here, which matches the fragment
/// position the rasterizer hands to the shader.
#[inline]
pub fn pixel_center(x: u32, y: u32) -> Point {
    Point::new(x as f32 + 0.5, y as f32 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn mul_matches_kurbo() {
        let a = kurbo::Affine::rotate(0.3).then_translate((4.0, -2.0).into());
        let b = kurbo::Affine::scale_non_uniform(2.0, 0.5);
        let ours = Transform::from_kurbo(&a) * Transform::from_kurbo(&b);
        let theirs = Transform::from_kurbo(&(a * b));
        for (x, y) in ours.matrix.iter().zip(theirs.matrix) {
            assert!((x - y).abs() < 1e-6);
        }
        for (x, y) in ours.translation.iter().zip(theirs.translation) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn fit_bbox_flips_y() {
        let bbox = Bbox::new((10.0, -20.0), (110.0, 80.0));
        let t = Transform::fit_bbox(&bbox, 100, 100);
        assert!(close(t.apply(Point::ZERO), Point::new(10.0, 80.0)));
        assert!(close(
            t.apply(Point::new(100.0, 100.0)),
            Point::new(110.0, -20.0)
        ));
        assert_eq!(t.ppem(), [1.0, 1.0]);
    }

    #[test]
    fn fit_bbox_keeps_aspect_and_centers() {
        // Wide target: the box fills the height and is centered horizontally.
        let bbox = Bbox::new((10.0, -20.0), (110.0, 80.0));
        let t = Transform::fit_bbox(&bbox, 50, 25);
        assert_eq!(t.ppem(), [0.25, 0.25]);
        assert!(close(t.apply(Point::new(25.0, 12.5)), Point::new(60.0, 30.0)));
        assert!(close(t.apply(Point::ZERO), Point::new(-40.0, 80.0)));
        assert!(close(t.apply(Point::new(50.0, 25.0)), Point::new(160.0, -20.0)));

        // Tall glyph in a square target.
        let tall = Bbox::new((0.0, 0.0), (100.0, 200.0));
        let t = Transform::fit_bbox(&tall, 800, 800);
        assert_eq!(t.ppem(), [4.0, 4.0]);
        assert!(close(t.apply(Point::new(400.0, 400.0)), Point::new(50.0, 100.0)));
        assert!(close(t.apply(Point::new(200.0, 0.0)), Point::new(0.0, 200.0)));
    }

    #[test]
    fn ppem_of_rotation() {
        let t = Transform::from_kurbo(&kurbo::Affine::rotate(std::f64::consts::FRAC_PI_2))
            * Transform::scale(0.01, 0.01);
        let [x, y] = t.ppem();
        assert!((x - 100.0).abs() < 1e-2);
        assert!((y - 100.0).abs() < 1e-2);
    }

    #[test]
    fn identity_is_default() {
        let p = Point::new(3.5, -1.25);
        assert_eq!(Transform::default().apply(p), p);
        assert_eq!(Transform::IDENTITY.ppem(), [1.0, 1.0]);
        assert_eq!(pixel_center(0, 2), Point::new(0.5, 2.5));
    }
}
