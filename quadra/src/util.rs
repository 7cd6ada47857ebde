// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple helpers for managing wgpu state and reading results back.

use std::future::Future;

use wgpu::{
    Adapter, BufferDescriptor, BufferUsages, CommandEncoderDescriptor, Device, Extent3d, Instance,
    Limits, Queue, TexelCopyBufferInfo, TexelCopyBufferLayout, Texture,
};

use crate::{Error, Result};

/// Simple render context that maintains wgpu state for rendering.
pub struct RenderContext {
    pub instance: Instance,
    pub devices: Vec<DeviceHandle>,
}

pub struct DeviceHandle {
    adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
}

impl DeviceHandle {
    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }
}

impl RenderContext {
    #[expect(
        clippy::new_without_default,
        reason = "Creating a wgpu Instance is something which should only be done rarely"
    )]
    pub fn new() -> Self {
        let backends = wgpu::Backends::from_env().unwrap_or_default();
        let flags = wgpu::InstanceFlags::from_build_config().with_env();
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends,
            flags,
            ..Default::default()
        });
        Self {
            instance,
            devices: Vec::new(),
        }
    }

    /// Finds or creates a device handle id.
    pub async fn device(&mut self) -> Option<usize> {
        if self.devices.is_empty() {
            return self.new_device().await;
        }
        Some(0)
    }

    /// Creates a device handle id.
    async fn new_device(&mut self) -> Option<usize> {
        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::from_env().unwrap_or_default(),
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok()?;
        log::debug!("using adapter {:?}", adapter.get_info());
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: Limits::downlevel_defaults().using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .ok()?;
        let device_handle = DeviceHandle {
            adapter,
            device,
            queue,
        };
        self.devices.push(device_handle);
        Some(self.devices.len() - 1)
    }
}

struct NullWake;

impl std::task::Wake for NullWake {
    fn wake(self: std::sync::Arc<Self>) {}
}

/// Block on a future, polling the device as needed.
///
/// This will deadlock if the future is awaiting anything other than GPU progress.
#[cfg_attr(docsrs, doc(hidden))]
pub fn block_on_wgpu<F: Future>(device: &Device, fut: F) -> Result<F::Output> {
    if cfg!(target_arch = "wasm32") {
        panic!("Blocking can't work on WASM, so don't try");
    }
    let waker = std::task::Waker::from(std::sync::Arc::new(NullWake));
    let mut context = std::task::Context::from_waker(&waker);
    let mut fut = std::pin::pin!(fut);
    loop {
        match fut.as_mut().poll(&mut context) {
            std::task::Poll::Pending => {
                device.poll(wgpu::PollType::Wait)?;
            }
            std::task::Poll::Ready(item) => break Ok(item),
        }
    }
}

/// Copies an RGBA8 texture back to the CPU, without row padding.
pub fn download_texture(
    device: &Device,
    queue: &Queue,
    texture: &Texture,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let padded_byte_width = (width * 4).next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
    let buffer = device.create_buffer(&BufferDescriptor {
        label: Some("readback"),
        size: padded_byte_width as u64 * height as u64,
        usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
        label: Some("Copy out buffer"),
    });
    encoder.copy_texture_to_buffer(
        texture.as_image_copy(),
        TexelCopyBufferInfo {
            buffer: &buffer,
            layout: TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_byte_width),
                rows_per_image: None,
            },
        },
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit([encoder.finish()]);
    let buf_slice = buffer.slice(..);
    let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
    buf_slice.map_async(wgpu::MapMode::Read, move |v| {
        // The receiver only goes away if the download was abandoned.
        let _ = sender.send(v);
    });
    block_on_wgpu(device, receiver.receive())?.ok_or(Error::DownloadError)??;
    let data = buf_slice.get_mapped_range();
    let row_bytes = (width * 4) as usize;
    let mut result = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * padded_byte_width as usize;
        result.extend_from_slice(&data[start..start + row_bytes]);
    }
    drop(data);
    buffer.unmap();
    Ok(result)
}
