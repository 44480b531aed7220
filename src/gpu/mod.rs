mod shader;

use std::ops::Range;
use std::sync::Arc;

use glam::{Mat4, Vec2};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::GpuError;
use crate::field::{RenderItem, MAX_PARTICLES};
use crate::textures::{FilterMode, FoodTexture};

pub use shader::{QuadInstance, Uniforms, QUAD_SHADER};

/// Orthographic projection that shows the whole field box at any window aspect.
///
/// `margin` is added around the box so quads on the edge are not cut off.
pub fn view_projection(extents: Vec2, margin: f32, width: u32, height: u32) -> Mat4 {
    let half = extents + Vec2::splat(margin);
    let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
    let (hw, hh) = if aspect >= half.x / half.y {
        (half.y * aspect, half.y)
    } else {
        (half.x, half.x / aspect)
    };
    Mat4::orthographic_rh(-hw, hw, -hh, hh, -10.0, 10.0)
}

/// Split depth-sorted items into runs sharing a texture slot.
///
/// Each run becomes one instanced draw, so draw order stays back to front.
pub fn draw_runs(items: &[RenderItem]) -> Vec<(usize, Range<u32>)> {
    let mut runs: Vec<(usize, Range<u32>)> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let i = i as u32;
        match runs.last_mut() {
            Some((texture, range)) if *texture == item.texture => range.end = i + 1,
            _ => runs.push((item.texture, i..i + 1)),
        }
    }
    runs
}

/// wgpu state for drawing the particle field.
pub struct QuadRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_groups: Vec<wgpu::BindGroup>,
    instance_buffer: wgpu::Buffer,
    extents: Vec2,
    margin: f32,
    clear_color: wgpu::Color,
}

impl QuadRenderer {
    pub async fn new(
        window: Arc<Window>,
        textures: &[FoodTexture],
        extents: Vec2,
        margin: f32,
        clear_color: [f64; 4],
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        tracing::info!(adapter = %adapter.get_info().name, "gpu ready");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoAdapter)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            view_proj: view_projection(extents, margin, config.width, config.height).to_cols_array_2d(),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Icon Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let texture_bind_groups = textures
            .iter()
            .map(|t| create_icon_bind_group(&device, &queue, &texture_bind_group_layout, t))
            .collect();

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (MAX_PARTICLES * std::mem::size_of::<QuadInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(QUAD_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[QuadInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Items arrive sorted back to front; no depth buffer needed.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let [r, g, b, a] = clear_color;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_groups,
            instance_buffer,
            extents,
            margin,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Projection used for the current surface size.
    pub fn view_projection(&self) -> Mat4 {
        view_projection(self.extents, self.margin, self.config.width, self.config.height)
    }

    fn update_uniforms(&self) {
        let uniforms = Uniforms {
            view_proj: self.view_projection().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Draw one frame. `items` must be sorted back to front.
    pub fn render(&mut self, items: &[RenderItem]) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms();

        let items = &items[..items.len().min(MAX_PARTICLES)];
        let instances: Vec<QuadInstance> = items.iter().map(QuadInstance::from).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));

            for (texture, range) in draw_runs(items) {
                let Some(bind_group) = self.texture_bind_groups.get(texture) else {
                    continue;
                };
                render_pass.set_bind_group(1, bind_group, &[]);
                render_pass.draw(0..6, range);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_icon_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    icon: &FoodTexture,
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width: icon.width,
        height: icon.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(&icon.name),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &icon.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * icon.width),
            rows_per_image: Some(icon.height),
        },
        size,
    );

    let filter = match icon.filter {
        FilterMode::Linear => wgpu::FilterMode::Linear,
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
    };
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(&icon.name),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&icon.name),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    fn item(texture: usize) -> RenderItem {
        RenderItem {
            position: Vec3::ZERO,
            rotation: 0.0,
            size: 0.8,
            texture,
        }
    }

    #[test]
    fn test_draw_runs_group_contiguous_textures() {
        let items = [item(0), item(0), item(1), item(0)];
        let runs = draw_runs(&items);
        assert_eq!(runs, vec![(0, 0..2), (1, 2..3), (0, 3..4)]);
        assert!(draw_runs(&[]).is_empty());
    }

    #[test]
    fn test_projection_keeps_field_visible() {
        let extents = Vec2::new(4.0, 3.0);
        for (w, h) in [(1280, 720), (600, 900), (800, 600)] {
            let m = view_projection(extents, 0.0, w, h);
            for corner in [Vec2::new(4.0, 3.0), Vec2::new(-4.0, -3.0)] {
                let clip = m * Vec4::new(corner.x, corner.y, 0.0, 1.0);
                assert!(clip.x.abs() <= 1.0 + 1e-5, "{}x{}", w, h);
                assert!(clip.y.abs() <= 1.0 + 1e-5, "{}x{}", w, h);
            }
        }
    }

    #[test]
    fn test_instance_from_item() {
        let mut it = item(2);
        it.position = Vec3::new(1.0, 2.0, 0.1);
        it.rotation = 0.3;
        let q = QuadInstance::from(&it);
        assert_eq!(q.position, [1.0, 2.0, 0.1]);
        assert_eq!(q.rotation, 0.3);
        assert_eq!(q.size, 0.8);
    }
}
