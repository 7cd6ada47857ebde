// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Types that are shared between the main crate and build.

/// The type of resource that will be bound to a slot in a shader.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BindType {
    /// A storage buffer with read/write access.
    Buffer,
    /// A storage buffer with read only access.
    BufReadOnly,
    /// A small buffer bound as uniforms.
    Uniform,
}

impl BindType {
    pub fn is_mutable(self) -> bool {
        matches!(self, Self::Buffer)
    }
}

#[derive(Clone, Debug)]
pub struct BindingInfo {
    pub name: Option<String>,
    pub location: (u32, u32),
    pub ty: BindType,
}
