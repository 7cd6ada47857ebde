// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless

#![allow(
    clippy::cast_possible_truncation,
    clippy::allow_attributes_without_reason
)]

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use quadra::glyph::{CubicPolicy, GlyphContext};
use quadra::kurbo::{Affine, Point, Vec2};
use quadra::skrifa::FontRef;
use quadra::{cpu, Bbox, CurveSet, Dispatch, Pixmap, RenderParams, RendererOptions, Transform};
use scenes::SceneParams;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let scenes = scenes::test_scenes();
    if args.print_scenes {
        println!("Available scenes:");
        for (idx, scene) in scenes.scenes.iter().enumerate() {
            println!("{idx}: {}", scene.config.name);
        }
        return Ok(());
    }

    let mut scene_params = SceneParams::default();
    let (name, curves, bbox) = match &args.font {
        Some(font) => {
            let (curves, bbox) = load_glyph(font, &args)?;
            (format!("glyph_U+{:04X}", args.glyph as u32), curves, bbox)
        }
        None => {
            let scene = scenes.find(&args.scene)?;
            let curves = scene.build(&mut scene_params);
            (scene.config.name.clone(), curves, scenes::viewport())
        }
    };

    let (width, height) = (args.x_resolution, args.y_resolution);
    let mut params = RenderParams::fit(&bbox, width, height);
    params.transform = view_transform(&args, &params.transform, width, height);
    if let Some(color) = scene_params.color {
        params.color = color;
    }
    if let Some(base_color) = scene_params.base_color {
        params.base_color = base_color;
    }

    let mut pixmap = match args.backend {
        Backend::Sequential | Backend::Parallel => {
            let dispatch = if args.backend == Backend::Sequential {
                Dispatch::Sequential
            } else {
                Dispatch::Parallel
            };
            let mut renderer = cpu::Renderer::new(RendererOptions {
                dispatch,
                num_threads: None,
            })?;
            if args.aliased {
                renderer.render_winding(&curves, &params)
            } else {
                renderer.render_to_pixmap(&curves, &params)
            }
        }
        Backend::Gpu => {
            if args.aliased {
                bail!("--aliased is only available on the CPU backends");
            }
            render_gpu(&curves, &params)?
        }
    };
    pixmap.unpremultiply();

    std::fs::create_dir_all(&args.out_directory)
        .with_context(|| format!("creating {}", args.out_directory.display()))?;
    let out_path = args.out_directory.join(&name).with_extension("png");
    write_png(&pixmap, &out_path)?;
    println!("Wrote result ({width}x{height}) to {out_path:?}");
    Ok(())
}

/// Loads the requested glyph as a curve set in font units.
fn load_glyph(path: &Path, args: &Args) -> Result<(CurveSet, Bbox)> {
    let data =
        std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let font = FontRef::from_index(&data, args.font_index)?;
    let variations: Vec<(&str, f32)> = args
        .variations
        .iter()
        .map(|(tag, value)| (tag.as_str(), *value))
        .collect();
    let cubic_policy = match args.cubic_accuracy {
        Some(accuracy) => CubicPolicy::Approximate { accuracy },
        None => CubicPolicy::Reject,
    };
    let mut context = GlyphContext::new();
    let provider = context
        .new_provider(&font, variations)
        .with_cubic_policy(cubic_policy);
    let outline = provider
        .char_outline(args.glyph)
        .with_context(|| format!("loading glyph for {:?}", args.glyph))?;
    log::info!(
        "{:?}: {} curves, {} units per em",
        args.glyph,
        outline.curves.len(),
        provider.units_per_em()
    );
    Ok((outline.curves, outline.bbox))
}

/// Applies the user's view on top of the fitted pixel to curve transform.
///
/// Scale and rotation are about the center of the image, the translation is
/// in pixels.
fn view_transform(args: &Args, fit: &Transform, width: u32, height: u32) -> Transform {
    let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
    let view = Affine::translate(Vec2::new(args.translate.0, args.translate.1))
        * Affine::rotate_about(args.rotate.to_radians(), center)
        * Affine::scale_about(args.scale, center);
    Transform::from_kurbo(&(fit.to_kurbo() * view.inverse()))
}

#[cfg(feature = "gpu")]
fn render_gpu(curves: &CurveSet, params: &RenderParams) -> Result<Pixmap> {
    use anyhow::anyhow;
    use quadra::util::RenderContext;

    let mut context = RenderContext::new();
    let device_id = pollster::block_on(context.device())
        .ok_or_else(|| anyhow!("No compatible device found"))?;
    let device_handle = &context.devices[device_id];
    let device = &device_handle.device;
    let queue = &device_handle.queue;
    let renderer = quadra::GpuRenderer::new(device)?;
    Ok(renderer.render_to_pixmap(device, queue, curves, params)?)
}

#[cfg(not(feature = "gpu"))]
fn render_gpu(_: &CurveSet, _: &RenderParams) -> Result<Pixmap> {
    bail!("the GPU backend needs the `gpu` feature: cargo run -p headless --features gpu")
}

fn write_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut png_encoder = png::Encoder::new(&mut file, pixmap.width, pixmap.height);
    png_encoder.set_color(png::ColorType::Rgba);
    png_encoder.set_depth(png::BitDepth::Eight);
    let mut writer = png_encoder.write_header()?;
    writer.write_image_data(pixmap.data())?;
    writer.finish()?;
    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// The CPU renderer on the calling thread
    Sequential,
    /// The CPU renderer on a thread pool
    Parallel,
    /// The wgpu renderer
    Gpu,
}

#[derive(Parser, Debug)]
#[command(about, long_about = None, bin_name="cargo run -p headless --")]
struct Args {
    #[arg(long = "width", short, default_value_t = 800)]
    x_resolution: u32,
    #[arg(long = "height", short, default_value_t = 800)]
    y_resolution: u32,
    /// Which scene (name) to render
    /// If no scenes have that name, an index can be specified instead
    #[arg(long, short, default_value = "0")]
    scene: String,
    /// Render a glyph from this font file instead of a scene
    #[arg(long)]
    font: Option<PathBuf>,
    /// Index of the font in a collection file
    #[arg(long, default_value_t = 0)]
    font_index: u32,
    /// The character whose glyph is rendered
    #[arg(long, default_value_t = 'g')]
    glyph: char,
    /// Variation axis settings such as `wght=700`
    #[arg(long = "variation", value_parser = parse_variation)]
    variations: Vec<(String, f32)>,
    /// Convert cubic outlines to quadratics within this tolerance, in font units
    ///
    /// Fonts with cubic outlines are rejected without it.
    #[arg(long)]
    cubic_accuracy: Option<f64>,
    /// Zoom factor about the center of the image
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Rotation in degrees about the center of the image
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotate: f64,
    /// Offset in pixels, as `x,y`
    #[arg(long, default_value = "0,0", value_parser = parse_offset, allow_hyphen_values = true)]
    translate: (f64, f64),
    #[arg(long, value_enum, default_value_t = Backend::Parallel)]
    backend: Backend,
    /// Fill pixels by their winding number, without anti-aliasing
    #[arg(long)]
    aliased: bool,
    /// Directory to store the result into
    #[arg(long, default_value_os_t = default_directory())]
    out_directory: PathBuf,
    #[arg(long, short)]
    /// Display a list of all scene names
    print_scenes: bool,
}

fn default_directory() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("outputs")
}

fn parse_variation(arg: &str) -> Result<(String, f32)> {
    let (tag, value) = arg
        .split_once('=')
        .context("expected a setting like `wght=700`")?;
    Ok((tag.trim().to_owned(), value.trim().parse()?))
}

fn parse_offset(arg: &str) -> Result<(f64, f64)> {
    let (x, y) = arg.split_once(',').context("expected an offset like `10,-4`")?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}
