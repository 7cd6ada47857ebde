// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU implementations of the coverage shader.
//!
//! These follow `shader/coverage.wgsl` and `shader/shared/curve.wgsl` step by
//! step, so a CPU rendering can stand in for a GPU rendering and the two can
//! be compared in tests.

mod coverage;
mod fine;

pub use coverage::{
    coverage, coverage_row, evaluate, pixel_fraction, root_code, trace_ray, winding_number, Axis,
    LINEAR_EPSILON, ROOT_CODES,
};
pub use fine::{blend_over, fine_row, fragment_main, pack4x8unorm, unpack4x8unorm, winding_row};
