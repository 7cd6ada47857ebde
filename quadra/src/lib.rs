// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadra renders shapes described as quadratic Bézier curves straight to
//! anti-aliased pixel coverage.
//!
//! Each pixel casts one ray along x and one along y against every curve,
//! solves for the crossings analytically and turns the distance to each
//! crossing into a fractional pixel coverage. There is no tessellation and no
//! intermediate distance field.
//!
//! Curve sets come from hand-written geometry ([`CurveSet::new`]) or from font
//! outlines ([`glyph::GlyphContext`]). They can be rendered with the CPU
//! [`cpu::Renderer`], either sequentially or across a thread pool, or with the
//! GPU renderer behind the `wgpu` feature. Both backends evaluate the same
//! kernel from `quadra_shaders`.
//!
//! ```rust,ignore
//! use quadra::{cpu::Renderer, CurveSet, RenderParams, RendererOptions};
//!
//! let mut renderer = Renderer::new(RendererOptions::default())?;
//! let params = RenderParams::fit(&curves.bbox(), 512, 512);
//! let pixmap = renderer.render_to_pixmap(&curves, &params);
//! ```

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(missing_docs, reason = "We have many as-yet undocumented items.")]
#![allow(
    missing_debug_implementations,
    clippy::cast_possible_truncation,
    clippy::missing_assert_message,
    reason = "Deferred, only apply in some feature sets so not expect"
)]

pub mod cpu;
pub mod glyph;
mod pixmap;
#[cfg(feature = "wgpu")]
pub mod util;
#[cfg(feature = "wgpu")]
mod wgpu_engine;

/// Styling primitives.
pub use peniko;
/// 2D geometry, with a focus on curves.
pub use peniko::kurbo;
pub use skrifa;

#[cfg(feature = "wgpu")]
pub use wgpu;

pub use pixmap::Pixmap;
pub use quadra_encoding::{
    decompose, Bbox, Curve, CurveSet, DecomposeError, Outline, OutlineBuilder, OutlineEvent, Point,
    Transform,
};
#[cfg(feature = "wgpu")]
pub use wgpu_engine::GpuRenderer;

use std::num::NonZeroUsize;

use thiserror::Error;

/// Errors that can occur in Quadra.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The font data couldn't be parsed.
    #[error("Couldn't read font: {0}")]
    Font(#[from] skrifa::raw::ReadError),
    /// The font has no glyph for a character.
    #[error("No glyph for character {0:?}")]
    MissingGlyph(char),
    /// The font has no outline for a glyph id.
    #[error("No outline for glyph {0}")]
    MissingOutline(u32),
    /// The font scaler failed to draw an outline.
    #[error("Couldn't draw outline of glyph {gid}: {message}")]
    OutlineDraw { gid: u32, message: String },
    /// The outline couldn't be reduced to quadratic curves.
    #[error(transparent)]
    Decompose(#[from] DecomposeError),
    /// The worker thread pool couldn't be started.
    #[cfg(feature = "multithreading")]
    #[error("Couldn't build thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// There is no available device with the features required by Quadra.
    #[cfg(feature = "wgpu")]
    #[error("Couldn't find suitable device")]
    NoCompatibleDevice,
    /// Failed to async map a buffer.
    /// See [`wgpu::BufferAsyncError`] for more information.
    #[cfg(feature = "wgpu")]
    #[error("Failed to async map a buffer")]
    BufferAsyncError(#[from] wgpu::BufferAsyncError),
    /// Waiting for the device failed.
    #[cfg(feature = "wgpu")]
    #[error("Failed to poll device")]
    DevicePoll(#[from] wgpu::PollError),
    /// A readback finished without delivering a result.
    #[cfg(feature = "wgpu")]
    #[error("Failed to download texture")]
    DownloadError,
    #[cfg(feature = "wgpu")]
    #[error("wgpu Error from scope")]
    WgpuErrorFromScope(#[from] wgpu::Error),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// How the CPU renderer walks the pixels of a frame.
///
/// Both produce identical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// One loop in raster order on the calling thread.
    Sequential,
    /// Rows are shared out over a thread pool.
    ///
    /// Without the `multithreading` feature this renders sequentially.
    Parallel,
}

impl Default for Dispatch {
    fn default() -> Self {
        if cfg!(feature = "multithreading") {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }
}

/// Options which are set at renderer creation time, used in [`cpu::Renderer::new`].
#[derive(Clone, Debug, Default)]
pub struct RendererOptions {
    pub dispatch: Dispatch,

    /// How many worker threads to use for [`Dispatch::Parallel`].
    ///
    /// Set to `None` to let rayon pick, which is usually one per core.
    pub num_threads: Option<NonZeroUsize>,
}

/// Parameters used in a single render that are configurable by the client.
#[derive(Clone, Debug)]
pub struct RenderParams {
    /// Dimensions of the rasterization target.
    pub width: u32,
    pub height: u32,

    /// Maps pixel coordinates to curve space.
    ///
    /// The per-axis pixel density used for anti-aliasing is derived from this.
    pub transform: Transform,

    /// Fill color of the shape.
    pub color: peniko::Color,

    /// The background color applied to the target before the shape.
    pub base_color: peniko::Color,
}

impl RenderParams {
    /// White shape on black, framing `bbox` in a `width` by `height` target
    /// with the y axis pointing up.
    ///
    /// The box keeps its aspect ratio and is centered, see
    /// [`Transform::fit_bbox`].
    pub fn fit(bbox: &Bbox, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: Transform::fit_bbox(bbox, width, height),
            color: peniko::Color::WHITE,
            base_color: peniko::Color::BLACK,
        }
    }

    /// The uniform block for drawing `n_curves` curves with these parameters.
    pub fn config(&self, n_curves: usize) -> quadra_encoding::ConfigUniform {
        quadra_encoding::ConfigUniform::new(&self.transform, n_curves, &self.color)
    }
}
