// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};

use crate::Transform;

/// Uniform render configuration data used by the coverage shader.
///
/// This must be kept in sync with `struct Config` in `shader/coverage.wgsl`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct ConfigUniform {
    /// Pixel to curve space transform.
    pub transform: Transform,
    /// Number of curves in the curve buffer.
    pub n_curves: u32,
    pub padding: u32,
    /// Fill color, premultiplied.
    pub color: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<ConfigUniform>(), 48);

impl ConfigUniform {
    pub fn new(transform: &Transform, n_curves: usize, color: &peniko::Color) -> Self {
        Self {
            transform: *transform,
            n_curves: n_curves as u32,
            padding: 0,
            color: color.premultiply().components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_premultiplied() {
        let color = peniko::Color::new([1.0, 0.5, 0.0, 0.5]);
        let config = ConfigUniform::new(&Transform::IDENTITY, 6, &color);
        assert_eq!(config.color, [0.5, 0.25, 0.0, 0.5]);
        assert_eq!(config.n_curves, 6);
    }

    #[test]
    fn matrix_leads_the_uniform() {
        let config = ConfigUniform::new(
            &Transform::scale(2.0, 3.0),
            0,
            &peniko::Color::WHITE,
        );
        let words: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&config));
        assert_eq!(&words[..6], &[2.0, 0.0, 0.0, 3.0, 0.0, 0.0]);
        assert_eq!(&words[8..], &[1.0; 4]);
    }
}
