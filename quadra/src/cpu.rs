// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The CPU renderer.
//!
//! This runs the Rust port of the coverage shader from `quadra_shaders` once
//! per pixel. With [`Dispatch::Parallel`] the rows of the target are spread
//! over a rayon thread pool owned by the renderer.

use quadra_encoding::CurveSet;
use quadra_shaders::cpu::{coverage_row, fine_row, winding_row};

use crate::{Dispatch, Pixmap, RenderParams, RendererOptions, Result};

/// Renders curve sets into coverage buffers and pixmaps.
pub struct Renderer {
    options: RendererOptions,
    #[cfg(feature = "multithreading")]
    pool: Option<rayon::ThreadPool>,
    /// Packed pixels, reused across frames.
    packed: Vec<u32>,
}

static_assertions::assert_impl_all!(Renderer: Send);

impl Renderer {
    /// Creates a new renderer.
    ///
    /// For [`Dispatch::Parallel`] this starts the worker threads.
    pub fn new(options: RendererOptions) -> Result<Self> {
        #[cfg(feature = "multithreading")]
        let pool = match options.dispatch {
            Dispatch::Parallel => {
                let mut builder =
                    rayon::ThreadPoolBuilder::new().thread_name(|i| format!("quadra-worker-{i}"));
                if let Some(num_threads) = options.num_threads {
                    builder = builder.num_threads(num_threads.get());
                }
                let pool = builder.build()?;
                log::debug!("started {} render threads", pool.current_num_threads());
                Some(pool)
            }
            Dispatch::Sequential => None,
        };
        #[cfg(not(feature = "multithreading"))]
        if options.dispatch == Dispatch::Parallel {
            log::warn!("the `multithreading` feature is disabled, rendering sequentially");
        }
        Ok(Self {
            options,
            #[cfg(feature = "multithreading")]
            pool,
            packed: Vec::new(),
        })
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// Computes the coverage of every pixel, row by row.
    ///
    /// The result has `params.width * params.height` values in `[0, 1]`.
    /// Colors in `params` are ignored.
    pub fn render_coverage(&mut self, curves: &CurveSet, params: &RenderParams) -> Vec<f32> {
        let width = params.width as usize;
        let mut out = vec![0.0; width * params.height as usize];
        let transform = params.transform;
        let curves = curves.as_slice();
        self.run_rows(&mut out, width, |y, row| {
            coverage_row(&transform, curves, y, row);
        });
        out
    }

    /// Renders the curve set filled with `params.color` over `params.base_color`.
    pub fn render_to_pixmap(&mut self, curves: &CurveSet, params: &RenderParams) -> Pixmap {
        log::debug!(
            "rendering {} curves at {}x{} ({:?})",
            curves.len(),
            params.width,
            params.height,
            self.options.dispatch
        );
        let width = params.width as usize;
        let config = params.config(curves.len());
        let base = params.base_color.premultiply().components;
        let curves = curves.as_slice();
        let mut packed = std::mem::take(&mut self.packed);
        packed.clear();
        packed.resize(width * params.height as usize, 0);
        self.run_rows(&mut packed, width, |y, row| {
            fine_row(&config, curves, base, y, row);
        });
        let pixmap = Pixmap::from_packed(params.width, params.height, &packed);
        self.packed = packed;
        pixmap
    }

    /// Renders the curve set without anti-aliasing.
    ///
    /// A pixel takes `params.color` when the winding number at its center is
    /// nonzero, and `params.base_color` otherwise.
    pub fn render_winding(&mut self, curves: &CurveSet, params: &RenderParams) -> Pixmap {
        let width = params.width as usize;
        let config = params.config(curves.len());
        let base = params.base_color.premultiply().components;
        let curves = curves.as_slice();
        let mut packed = std::mem::take(&mut self.packed);
        packed.clear();
        packed.resize(width * params.height as usize, 0);
        self.run_rows(&mut packed, width, |y, row| {
            winding_row(&config, curves, base, y, row);
        });
        let pixmap = Pixmap::from_packed(params.width, params.height, &packed);
        self.packed = packed;
        pixmap
    }

    fn run_rows<T, F>(&self, buf: &mut [T], width: usize, f: F)
    where
        T: Send,
        F: Fn(u32, &mut [T]) + Sync,
    {
        if width == 0 {
            return;
        }
        #[cfg(feature = "multithreading")]
        if let Some(pool) = &self.pool {
            use rayon::prelude::*;
            pool.install(|| {
                buf.par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| f(y as u32, row));
            });
            return;
        }
        for (y, row) in buf.chunks_mut(width).enumerate() {
            f(y as u32, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_encoding::{Bbox, Curve};

    fn lens() -> CurveSet {
        CurveSet::new(vec![
            Curve::new((0.3, 0.3), (0.5, 0.5), (0.3, 0.7)),
            Curve::new((0.3, 0.7), (1.0, 0.5), (0.3, 0.3)),
        ])
    }

    fn renderer(dispatch: Dispatch) -> Renderer {
        Renderer::new(RendererOptions {
            dispatch,
            num_threads: std::num::NonZeroUsize::new(3),
        })
        .unwrap()
    }

    #[test]
    fn dispatch_modes_agree() {
        let params = RenderParams::fit(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 37, 23);
        let sequential = renderer(Dispatch::Sequential).render_to_pixmap(&lens(), &params);
        let parallel = renderer(Dispatch::Parallel).render_to_pixmap(&lens(), &params);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn coverage_has_one_value_per_pixel() {
        let params = RenderParams::fit(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 16, 8);
        let coverage = renderer(Dispatch::Sequential).render_coverage(&lens(), &params);
        assert_eq!(coverage.len(), 16 * 8);
        assert!(coverage.iter().all(|c| (0.0..=1.0).contains(c)));
        assert!(coverage.iter().any(|&c| c > 0.9));
        assert_eq!(coverage[0], 0.0);
    }

    #[test]
    fn empty_target() {
        let params = RenderParams::fit(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 0, 5);
        let pixmap = renderer(Dispatch::Parallel).render_to_pixmap(&lens(), &params);
        assert!(pixmap.buf.is_empty());
    }

    #[test]
    fn reused_renderer_is_stable() {
        let mut renderer = renderer(Dispatch::Parallel);
        let params = RenderParams::fit(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 12, 12);
        let first = renderer.render_to_pixmap(&lens(), &params);
        let empty = renderer.render_to_pixmap(&CurveSet::default(), &params);
        assert!(empty.buf.chunks(4).all(|p| p == [0, 0, 0, 255]));
        assert_eq!(renderer.render_to_pixmap(&lens(), &params), first);
    }

    #[test]
    fn winding_render_has_two_colors() {
        let params = RenderParams::fit(&Bbox::new((0.0, 0.0), (1.0, 1.0)), 20, 20);
        let pixmap = renderer(Dispatch::Parallel).render_winding(&lens(), &params);
        assert!(pixmap
            .buf
            .chunks(4)
            .all(|p| p == [0, 0, 0, 255] || p == [255, 255, 255, 255]));
        assert_eq!(pixmap.sample(10, 10), [255, 255, 255, 255]);
        assert_eq!(pixmap.sample(1, 1), [0, 0, 0, 255]);
    }
}
