// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple pixmap type.

/// A pixmap backed by u8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    /// Width of the pixmap in pixels.
    pub width: u32,
    /// Height of the pixmap in pixels.
    pub height: u32,
    /// Buffer of the pixmap in premultiplied RGBA format.
    pub buf: Vec<u8>,
}

impl Pixmap {
    /// Create a new transparent pixmap with the given width and height in pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let buf = vec![0; width as usize * height as usize * 4];
        Self { width, height, buf }
    }

    /// Create a pixmap from pixels packed with the red channel in the low byte.
    pub fn from_packed(width: u32, height: u32, packed: &[u32]) -> Self {
        debug_assert_eq!(packed.len(), width as usize * height as usize);
        Self {
            width,
            height,
            buf: packed.iter().flat_map(|p| p.to_le_bytes()).collect(),
        }
    }

    /// Returns a reference to the underlying data as premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// Sample a pixel from the pixmap.
    #[inline(always)]
    pub fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = 4 * (self.width as usize * y as usize + x as usize);
        [
            self.buf[idx],
            self.buf[idx + 1],
            self.buf[idx + 2],
            self.buf[idx + 3],
        ]
    }

    /// Convert from premultiplied to separate alpha.
    ///
    /// Not fast, but useful for saving to PNG etc.
    pub fn unpremultiply(&mut self) {
        for rgba in self.buf.chunks_exact_mut(4) {
            if rgba[3] != 0 {
                let alpha = 255.0 / rgba[3] as f32;
                for c in &mut rgba[..3] {
                    *c = (*c as f32 * alpha + 0.5).min(255.0) as u8;
                }
            }
        }
    }
}
