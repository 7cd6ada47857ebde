// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadra tests.

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
#![allow(
    missing_debug_implementations,
    unreachable_pub,
    missing_docs,
    clippy::missing_assert_message,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::allow_attributes_without_reason
)]

// Only used by the integration tests.
use quadra_shaders as _;

use std::env;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;
use quadra::peniko::Color;
use quadra::{cpu, CurveSet, Dispatch, Pixmap, RenderParams, RendererOptions, Transform};
use scenes::{ExampleScene, SceneParams};

mod compare;

pub use compare::{compare_backends, BackendComparison, Statistics};
#[cfg(feature = "gpu")]
pub use compare::compare_gpu_cpu;

/// Which renderer a test image comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    Sequential,
    Parallel,
    #[cfg(feature = "gpu")]
    Gpu,
}

impl Backend {
    fn is_cpu(self) -> bool {
        match self {
            Self::Sequential | Self::Parallel => true,
            #[cfg(feature = "gpu")]
            Self::Gpu => false,
        }
    }

    /// Suffix of the debug image names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Sequential => "cpu",
            Self::Parallel => "parallel",
            #[cfg(feature = "gpu")]
            Self::Gpu => "gpu",
        }
    }
}

pub struct TestParams {
    pub width: u32,
    pub height: u32,
    pub base_color: Option<Color>,
    pub color: Option<Color>,
    pub backend: Backend,
    pub name: String,
    /// Pixel to curve space transform. Defaults to showing the unit square.
    pub transform: Option<Transform>,
}

impl TestParams {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            base_color: None,
            color: None,
            backend: Backend::Sequential,
            name: name.into(),
            transform: None,
        }
    }

    pub fn render_params(&self) -> RenderParams {
        let mut params = RenderParams::fit(&scenes::viewport(), self.width, self.height);
        if let Some(transform) = self.transform {
            params.transform = transform;
        }
        if let Some(color) = self.color {
            params.color = color;
        }
        if let Some(base_color) = self.base_color {
            params.base_color = base_color;
        }
        params
    }
}

/// Renders `curves`, writing the result to `debug_outputs` when the test is
/// selected by `QUADRA_DEBUG_TEST`.
pub fn render_then_debug(curves: &CurveSet, params: &TestParams) -> Result<Pixmap> {
    let image = get_image(params, curves)?;
    let name = format!("{}_{}", &params.name, params.backend.suffix());
    let out_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("debug_outputs")
        .join(name)
        .with_extension("png");
    if env_var_relates_to("QUADRA_DEBUG_TEST", &params.name, params.backend) {
        write_png_to_file(&out_path, &image)?;
        let (width, height) = (image.width, image.height);
        println!("Wrote debug result ({width}x{height}) to {out_path:?}");
    } else {
        match std::fs::remove_file(&out_path) {
            Ok(()) => (),
            Err(e) if e.kind() == ErrorKind::NotFound => (),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(image)
}

/// Renders `curves` with the backend selected in `params`.
pub fn get_image(params: &TestParams, curves: &CurveSet) -> Result<Pixmap> {
    let render_params = params.render_params();
    let dispatch = match params.backend {
        Backend::Sequential => Dispatch::Sequential,
        Backend::Parallel => Dispatch::Parallel,
        #[cfg(feature = "gpu")]
        Backend::Gpu => return get_gpu_image(&render_params, curves),
    };
    let mut renderer = cpu::Renderer::new(RendererOptions {
        dispatch,
        num_threads: None,
    })?;
    Ok(renderer.render_to_pixmap(curves, &render_params))
}

#[cfg(feature = "gpu")]
fn get_gpu_image(params: &RenderParams, curves: &CurveSet) -> Result<Pixmap> {
    use anyhow::anyhow;

    let mut context = quadra::util::RenderContext::new();
    let device_id = pollster::block_on(context.device())
        .ok_or_else(|| anyhow!("No compatible device found"))?;
    let device_handle = &context.devices[device_id];
    let renderer = quadra::GpuRenderer::new(&device_handle.device)?;
    Ok(renderer.render_to_pixmap(
        &device_handle.device,
        &device_handle.queue,
        curves,
        params,
    )?)
}

/// Whether a wgpu adapter can be found on this machine.
#[cfg(feature = "gpu")]
pub fn gpu_available() -> bool {
    let mut context = quadra::util::RenderContext::new();
    pollster::block_on(context.device()).is_some()
}

/// Writes the pixmap as a PNG with separate alpha.
pub fn write_png_to_file(out_path: &Path, image: &Pixmap) -> Result<()> {
    let mut image = image.clone();
    image.unpremultiply();
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut data = Vec::new();
    let mut encoder = png::Encoder::new(&mut data, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.data())?;
    writer.finish()?;
    std::fs::write(out_path, &data)?;
    Ok(())
}

/// Determine whether the value of the environment variable `env_var`
/// includes a specific test.
/// This is used when dumping the debug output
fn env_var_relates_to(env_var: &'static str, name: &str, backend: Backend) -> bool {
    if let Ok(val) = env::var(env_var) {
        if val.eq_ignore_ascii_case("all")
            || val.eq_ignore_ascii_case("cpu") && backend.is_cpu()
            || val.eq_ignore_ascii_case("gpu") && !backend.is_cpu()
        {
            return true;
        }
        let suffix = format!("_{}", backend.suffix());
        for test in val.split(',') {
            let test_name = test.trim().trim_end_matches(&*suffix);
            if test_name.eq_ignore_ascii_case(name) {
                return true;
            }
        }
    }
    false
}

/// Builds a test scene, taking its colors unless `test_params` already has
/// them.
pub fn encode_test_scene(test_scene: &ExampleScene, test_params: &mut TestParams) -> CurveSet {
    let mut scene_params = SceneParams::default();
    let curves = test_scene.build(&mut scene_params);
    if test_params.base_color.is_none() {
        test_params.base_color = scene_params.base_color;
    }
    if test_params.color.is_none() {
        test_params.color = scene_params.color;
    }
    curves
}
