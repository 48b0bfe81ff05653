use std::ops::Range;

use glam::UVec2;
use wgpu::util::DeviceExt;
use whack_core::{
    uv_sphere, DrawItem, Eye, EyeTransform, FrameError, InstanceRaw, StereoLayout,
    StereoPresenter, Style, Viewport, CLEAR_COLOR, PREVIEW_WGSL, SCENE_WGSL, SPHERE_RINGS,
    SPHERE_SEGMENTS,
};
use winit::window::Window;

mod helpers;
mod targets;

use targets::EyeTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// Instances of one style drawn with one pipeline.
struct Batch {
    style: Style,
    instances: Range<u32>,
}

/// wgpu implementation of the stereo presenter.
///
/// Both eyes render into one offscreen target; the window shows that target
/// scaled down to the preview size.
pub struct GpuPresenter<'w> {
    window: &'w Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    highlight_pipeline: wgpu::RenderPipeline,
    unhighlight_pipeline: wgpu::RenderPipeline,
    preview_pipeline: wgpu::RenderPipeline,
    eye_uniforms: [wgpu::Buffer; 2],
    eye_bind_groups: [wgpu::BindGroup; 2],
    preview_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    targets: EyeTargets,
    batches: Vec<Batch>,
    encoder: Option<wgpu::CommandEncoder>,
}

impl<'w> GpuPresenter<'w> {
    pub async fn new(window: &'w Window, layout: &StereoLayout) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;
        log::info!("gpu adapter: {}", adapter.get_info().name);

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            // preview must not throttle the headset loop
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let targets = EyeTargets::new(&device, layout.target_size());

        // Scene: one uniform buffer per eye so both eyes can be encoded before submit.
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let eye_uniforms = Eye::BOTH.map(|eye| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(match eye {
                    Eye::Left => "uniforms_left",
                    Eye::Right => "uniforms_right",
                }),
                size: std::mem::size_of::<Uniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });
        let eye_bind_groups = Eye::BOTH.map(|eye| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("scene_bg"),
                layout: &scene_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: eye_uniforms[eye.index()].as_entire_binding(),
                }],
            })
        });
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let highlight_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_layout,
            &scene_shader,
            "fs_highlight",
            EyeTargets::COLOR_FORMAT,
        );
        let unhighlight_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_layout,
            &scene_shader,
            "fs_unhighlight",
            EyeTargets::COLOR_FORMAT,
        );

        // Preview: sample the eye target into the window.
        let preview_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("preview_shader"),
            source: wgpu::ShaderSource::Wgsl(PREVIEW_WGSL.into()),
        });
        let preview_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("preview_bgl"),
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
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("preview_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let preview_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("preview_bg"),
            layout: &preview_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        let preview_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("preview_pl"),
            bind_group_layouts: &[&preview_bgl],
            push_constant_ranges: &[],
        });
        let preview_pipeline =
            helpers::make_preview_pipeline(&device, &preview_layout, &preview_shader, format);

        let mesh = uv_sphere(SPHERE_RINGS, SPHERE_SEGMENTS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_vb"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_capacity = 128;
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            highlight_pipeline,
            unhighlight_pipeline,
            preview_pipeline,
            eye_uniforms,
            eye_bind_groups,
            preview_bind_group,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            instance_buffer,
            instance_capacity,
            targets,
            batches: Vec::new(),
            encoder: None,
        })
    }

    pub fn window(&self) -> &'w Window {
        self.window
    }

    pub fn target_size(&self) -> UVec2 {
        self.targets.size
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn upload_instances(&mut self, draws: &[DrawItem]) {
        let mut instances: Vec<InstanceRaw> = Vec::with_capacity(draws.len());
        self.batches.clear();
        for style in [Style::Highlighted, Style::Unhighlighted] {
            let start = instances.len() as u32;
            instances.extend(draws.iter().filter(|d| d.style == style).map(InstanceRaw::from));
            let end = instances.len() as u32;
            if end > start {
                self.batches.push(Batch {
                    style,
                    instances: start..end,
                });
            }
        }
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
    }
}

impl StereoPresenter for GpuPresenter<'_> {
    fn begin_frame(&mut self, draws: &[DrawItem]) {
        self.upload_instances(draws);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("eye_encoder"),
            });
        {
            // clear the whole shared target once; eyes then load into their viewports
            let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("clear_eyes"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: CLEAR_COLOR[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }
        self.encoder = Some(encoder);
    }

    fn draw_eye(&mut self, eye: Eye, viewport: Viewport, transform: &EyeTransform) {
        let Some(encoder) = self.encoder.as_mut() else {
            return;
        };
        self.queue.write_buffer(
            &self.eye_uniforms[eye.index()],
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: transform.view_projection().to_cols_array_2d(),
            }),
        );

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("eye_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.targets.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        rpass.set_scissor_rect(viewport.x, viewport.y, viewport.width, viewport.height);
        rpass.set_bind_group(0, &self.eye_bind_groups[eye.index()], &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for batch in &self.batches {
            let pipeline = match batch.style {
                Style::Highlighted => &self.highlight_pipeline,
                Style::Unhighlighted => &self.unhighlight_pipeline,
            };
            rpass.set_pipeline(pipeline);
            rpass.draw_indexed(0..self.index_count, 0, batch.instances.clone());
        }
    }

    fn end_frame(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.queue.submit(Some(encoder.finish()));
        }
    }

    fn present_preview(&mut self) -> Result<(), FrameError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.window.inner_size());
                return Err(FrameError::SurfaceLost);
            }
            Err(err) => return Err(FrameError::SurfaceUnavailable(err.to_string())),
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("preview_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("preview_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.preview_pipeline);
            rpass.set_bind_group(0, &self.preview_bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<InstanceRaw>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
