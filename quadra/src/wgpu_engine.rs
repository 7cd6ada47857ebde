// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The GPU renderer.
//!
//! The curve set is uploaded as a runtime sized storage buffer and a single
//! full-screen triangle runs the coverage fragment shader once per pixel.

use quadra_encoding::{Curve, CurveSet};
use quadra_shaders::{BindType, SHADERS};
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::{
    BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, BlendState, BufferBindingType, BufferUsages,
    ColorTargetState, ColorWrites, CommandEncoderDescriptor, Device, Extent3d, FragmentState,
    LoadOp, MultisampleState, Operations, PipelineLayoutDescriptor, PrimitiveState, Queue,
    RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor,
    ShaderModuleDescriptor, ShaderSource, ShaderStages, StoreOp, TextureDescriptor,
    TextureDimension, TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
    VertexState,
};

use crate::util::{block_on_wgpu, download_texture};
use crate::{Error, Pixmap, RenderParams, Result};

/// Renders curve sets with the coverage shader on a wgpu device.
pub struct GpuRenderer {
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
}

static_assertions::assert_impl_all!(GpuRenderer: Send);

impl GpuRenderer {
    /// Format of the textures this renderer draws into.
    pub const TARGET_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;

    /// Creates the render pipeline on `device`.
    pub fn new(device: &Device) -> Result<Self> {
        let shader = &SHADERS.coverage;
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some(&*shader.name),
            source: ShaderSource::Wgsl(shader.wgsl.code.clone()),
        });
        let entries = shader
            .bindings
            .iter()
            .zip(shader.wgsl.binding_indices.iter())
            .map(|(ty, &binding)| BindGroupLayoutEntry {
                binding: binding.into(),
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: match ty {
                        BindType::Uniform => BufferBindingType::Uniform,
                        BindType::BufReadOnly => BufferBindingType::Storage { read_only: true },
                        BindType::Buffer => BufferBindingType::Storage { read_only: false },
                    },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            })
            .collect::<Vec<_>>();
        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("coverage"),
            entries: &entries,
        });
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("coverage"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(&*shader.name),
            layout: Some(&layout),
            vertex: VertexState {
                module: &module,
                entry_point: Some(&*shader.vertex_entry),
                compilation_options: Default::default(),
                buffers: &[],
            },
            primitive: PrimitiveState::default(),
            depth_stencil: None,
            multisample: MultisampleState::default(),
            fragment: Some(FragmentState {
                module: &module,
                entry_point: Some(&*shader.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(ColorTargetState {
                    format: Self::TARGET_FORMAT,
                    blend: Some(BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = block_on_wgpu(device, device.pop_error_scope())? {
            return Err(err.into());
        }
        Ok(Self {
            pipeline,
            bind_group_layout,
        })
    }

    /// Clears `view` to `params.base_color` and draws the curve set over it.
    ///
    /// The view must have [`Self::TARGET_FORMAT`] and the size given in `params`.
    pub fn render_to_texture(
        &self,
        device: &Device,
        queue: &Queue,
        curves: &CurveSet,
        view: &TextureView,
        params: &RenderParams,
    ) {
        let config = params.config(curves.len());
        let config_buf = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("config"),
            contents: bytemuck::bytes_of(&config),
            usage: BufferUsages::UNIFORM,
        });
        // Zero sized bindings aren't allowed, the shader reads `n_curves` anyway.
        let padding = [Curve::default()];
        let curve_data = if curves.is_empty() {
            &padding[..]
        } else {
            curves.as_slice()
        };
        let curve_buf = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("curves"),
            contents: bytemuck::cast_slice(curve_data),
            usage: BufferUsages::STORAGE,
        });
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("coverage"),
            layout: &self.bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: config_buf.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: curve_buf.as_entire_binding(),
                },
            ],
        });
        let [r, g, b, a] = params.base_color.premultiply().components.map(f64::from);
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("coverage"),
        });
        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("coverage"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
        queue.submit([encoder.finish()]);
    }

    /// Renders into a fresh texture and reads the result back.
    pub fn render_to_pixmap(
        &self,
        device: &Device,
        queue: &Queue,
        curves: &CurveSet,
        params: &RenderParams,
    ) -> Result<Pixmap> {
        if params.width == 0 || params.height == 0 {
            return Ok(Pixmap::new(params.width, params.height));
        }
        log::debug!(
            "rendering {} curves at {}x{} on the GPU",
            curves.len(),
            params.width,
            params.height
        );
        let target = device.create_texture(&TextureDescriptor {
            label: Some("Target texture"),
            size: Extent3d {
                width: params.width,
                height: params.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: Self::TARGET_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&TextureViewDescriptor::default());
        self.render_to_texture(device, queue, curves, &view, params);
        let buf = download_texture(device, queue, &target, params.width, params.height)?;
        if buf.len() != params.width as usize * params.height as usize * 4 {
            return Err(Error::DownloadError);
        }
        Ok(Pixmap {
            width: params.width,
            height: params.height,
            buf,
        })
    }
}
