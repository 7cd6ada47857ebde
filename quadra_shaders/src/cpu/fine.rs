// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fragment stage.

use quadra_encoding::{pixel_center, ConfigUniform, Curve, Point};

use super::{coverage, winding_number};

/// Premultiplied color of one fragment, as `fs_main` computes it.
pub fn fragment_main(config: &ConfigUniform, curves: &[Curve], frag: Point) -> [f32; 4] {
    let coord = config.transform.apply(frag);
    let alpha = coverage(curves, coord, config.transform.ppem());
    config.color.map(|c| c * alpha)
}

/// Composites premultiplied `fg` over premultiplied `base`.
#[inline]
pub fn blend_over(fg: [f32; 4], base: [f32; 4]) -> [f32; 4] {
    let inv = 1.0 - fg[3];
    [
        fg[0] + base[0] * inv,
        fg[1] + base[1] * inv,
        fg[2] + base[2] * inv,
        fg[3] + base[3] * inv,
    ]
}

/// Shades row `y` over `base` and writes packed RGBA8 pixels to `out`.
///
/// Only the first `config.n_curves` curves are drawn.
pub fn fine_row(config: &ConfigUniform, curves: &[Curve], base: [f32; 4], y: u32, out: &mut [u32]) {
    let curves = &curves[..(config.n_curves as usize).min(curves.len())];
    for (x, pixel) in out.iter_mut().enumerate() {
        let fg = fragment_main(config, curves, pixel_center(x as u32, y));
        *pixel = pack4x8unorm(blend_over(fg, base));
    }
}

/// Like [`fine_row`], but fills every pixel whose center has a nonzero
/// winding number with the full color and leaves the rest at `base`.
pub fn winding_row(
    config: &ConfigUniform,
    curves: &[Curve],
    base: [f32; 4],
    y: u32,
    out: &mut [u32],
) {
    let curves = &curves[..(config.n_curves as usize).min(curves.len())];
    let inside = pack4x8unorm(blend_over(config.color, base));
    let outside = pack4x8unorm(base);
    for (x, pixel) in out.iter_mut().enumerate() {
        let coord = config.transform.apply(pixel_center(x as u32, y));
        *pixel = if winding_number(curves, coord) != 0 {
            inside
        } else {
            outside
        };
    }
}

pub fn unpack4x8unorm(x: u32) -> [f32; 4] {
    let mut result = [0.0; 4];
    for (i, channel) in result.iter_mut().enumerate() {
        *channel = ((x >> (i * 8)) & 0xff) as f32 * (1.0 / 255.0);
    }
    result
}

/// Packs four channels into a `u32` with the first channel in the low byte.
pub fn pack4x8unorm(x: [f32; 4]) -> u32 {
    let mut result = 0;
    for (i, channel) in x.iter().enumerate() {
        let byte = (channel.clamp(0.0, 1.0) * 255.0).round() as u32;
        result |= byte << (i * 8);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_encoding::{Bbox, Transform};

    fn lens() -> [Curve; 2] {
        [
            Curve::new((0.3, 0.3), (0.5, 0.5), (0.3, 0.7)),
            Curve::new((0.3, 0.7), (1.0, 0.5), (0.3, 0.3)),
        ]
    }

    #[test]
    fn pack_puts_red_in_low_byte() {
        assert_eq!(pack4x8unorm([1.0, 0.0, 0.0, 1.0]), 0xff00_00ff);
        assert_eq!(pack4x8unorm([2.0, -1.0, 0.5, 0.0]), 0x0080_00ff);
        assert_eq!(unpack4x8unorm(0xff00_00ff), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn covered_pixel_takes_fill_color() {
        let transform = Transform::fit_bbox(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 10, 10);
        let config = ConfigUniform::new(&transform, 2, &peniko_red());
        // Pixel (5, 4) maps to (0.55, 0.55).
        let fg = fragment_main(&config, &lens(), pixel_center(5, 4));
        assert_eq!(fg, [1.0, 0.0, 0.0, 1.0]);
        let bg = fragment_main(&config, &lens(), pixel_center(0, 0));
        assert_eq!(bg, [0.0; 4]);
    }

    #[test]
    fn row_composites_over_base() {
        let transform = Transform::fit_bbox(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 10, 10);
        let config = ConfigUniform::new(&transform, 2, &peniko_red());
        let mut row = [0; 10];
        fine_row(&config, &lens(), [0.0, 0.0, 0.0, 1.0], 4, &mut row);
        assert_eq!(row[0], 0xff00_0000);
        assert_eq!(row[5], 0xff00_00ff);
    }

    #[test]
    fn n_curves_limits_the_set() {
        let transform = Transform::fit_bbox(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 10, 10);
        let config = ConfigUniform::new(&transform, 0, &peniko_red());
        let mut row = [0; 10];
        fine_row(&config, &lens(), [1.0; 4], 4, &mut row);
        assert!(row.iter().all(|&p| p == u32::MAX));
    }

    #[test]
    fn winding_row_is_aliased() {
        let transform = Transform::fit_bbox(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 10, 10);
        let config = ConfigUniform::new(&transform, 2, &peniko_red());
        let mut row = [0; 10];
        winding_row(&config, &lens(), [0.0, 0.0, 0.0, 1.0], 4, &mut row);
        assert!(row.iter().all(|&p| p == 0xff00_0000 || p == 0xff00_00ff));
        assert_eq!(row[0], 0xff00_0000);
        assert_eq!(row[5], 0xff00_00ff);
    }

    fn peniko_red() -> peniko::Color {
        peniko::Color::from_rgb8(255, 0, 0)
    }
}
