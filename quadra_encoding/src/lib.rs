// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve data model for the Quadra coverage rasterizer.
//!
//! Shapes are sets of quadratic Bézier curves ([`CurveSet`]). Outlines made
//! of move, line, quadratic and close commands are reduced into a curve set
//! with [`decompose`]. [`Transform`] maps pixel positions into curve space
//! and [`ConfigUniform`] is the uniform block shared with the shaders.

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
    reason = "Deferred"
)]

mod config;
mod curve;
pub mod math;
mod outline;

pub use config::ConfigUniform;
pub use curve::{eval_quadratic, Bbox, Curve, CurveSet, Point};
pub use math::{pixel_center, Transform};
pub use outline::{decompose, DecomposeError, Outline, OutlineBuilder, OutlineEvent};
