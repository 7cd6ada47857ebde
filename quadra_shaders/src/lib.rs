// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Quadra coverage shader, packaged for any renderer.
//!
//! The WGSL sources under `shader/` are preprocessed and validated with naga at
//! build time. [`SHADERS`] holds the result together with the binding layout
//! each render pipeline needs, leaving all GPU API interaction to the client.
//!
//! The `compile` feature exposes the same preprocessing and validation at
//! runtime, which is useful while editing the shaders. The `cpu` feature
//! provides Rust ports of the shader stages that produce the same coverage
//! without a GPU.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs, reason = "We have many as-yet undocumented items.")]
#![allow(
    missing_debug_implementations,
    unnameable_types,
    clippy::cast_possible_truncation,
    clippy::missing_assert_message,
    reason = "Deferred, only apply in some feature sets so not expect"
)]

mod types;

#[cfg(feature = "compile")]
pub mod compile;
#[cfg(feature = "cpu")]
pub mod cpu;

pub use types::{BindType, BindingInfo};

use std::borrow::Cow;

/// A vertex and fragment shader pair sharing one module.
#[derive(Clone, Debug)]
pub struct RenderShader<'a> {
    pub name: Cow<'a, str>,
    pub vertex_entry: Cow<'a, str>,
    pub fragment_entry: Cow<'a, str>,
    /// Resources used by either stage, in binding order.
    pub bindings: Cow<'a, [BindType]>,

    #[cfg(feature = "wgsl")]
    pub wgsl: WgslSource<'a>,
}

#[cfg(feature = "wgsl")]
#[derive(Clone, Debug)]
pub struct WgslSource<'a> {
    pub code: Cow<'a, str>,

    /// Contains the binding index of each resource listed in `RenderShader::bindings`.
    /// This is guaranteed to have the same element count as `RenderShader::bindings`.
    ///
    /// Each index is the value of the corresponding `@binding(..)` declaration
    /// in the shader source. The bind group index is always 0.
    pub binding_indices: Cow<'a, [u8]>,
}

include!(concat!(env!("OUT_DIR"), "/shaders.rs"));

pub use generated::SHADERS;
