use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use app_core::{
    BodyInstance, FrameTransforms, GestureSampler, PointInstance, SceneState, ScriptedClassifier,
    FOLIAGE_COUNT, ORNAMENT_COUNT, TILE_COUNT,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
}

// Window title doubles as the status overlay; refresh it on a coarse cadence.
const OVERLAY_REFRESH_FRAMES: u32 = 15;

// Two triangles spanning +-half_x / +-half_y.
fn quad_vertices(half_x: f32, half_y: f32) -> [f32; 12] {
    [
        -half_x, -half_y, half_x, -half_y, half_x, half_y, -half_x, -half_y, half_x, half_y,
        -half_x, half_y,
    ]
}

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 2) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 0,
        }],
    }
}

fn point_instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 12,
                shader_location: 2,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3,
            },
        ],
    }
}

fn body_instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<BodyInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 12,
                shader_location: 2,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 3,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 32,
                shader_location: 4,
            },
        ],
    }
}

// Additive glow for the foliage points.
const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    tile_pipeline: wgpu::RenderPipeline,
    ornament_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    point_quad_vb: wgpu::Buffer,
    ornament_quad_vb: wgpu::Buffer,
    tile_quad_vb: wgpu::Buffer,
    foliage_ib: wgpu::Buffer,
    ornament_ib: wgpu::Buffer,
    tile_ib: wgpu::Buffer,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
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

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Foliage billboards span half a view unit before attenuation;
        // ornament discs span their full scale; tiles carry a 1.2 x 1.5
        // aspect so they read as hanging cards.
        let point_quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices(0.5, 0.5)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ornament_quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ornament_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices(1.0, 1.0)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let tile_quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tile_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices(0.6, 0.75)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let foliage_ib = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("foliage_ib"),
            size: (std::mem::size_of::<PointInstance>() * FOLIAGE_COUNT) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ornament_ib = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ornament_ib"),
            size: (std::mem::size_of::<BodyInstance>() * ORNAMENT_COUNT) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let tile_ib = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tile_ib"),
            size: (std::mem::size_of::<BodyInstance>() * TILE_COUNT) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str,
                             vs: &str,
                             fs: &str,
                             instance_layout: wgpu::VertexBufferLayout<'static>,
                             blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers: &[quad_layout(), instance_layout],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };

        let tile_pipeline = make_pipeline(
            "tile_pipeline",
            "vs_body",
            "fs_body",
            body_instance_layout(),
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let ornament_pipeline = make_pipeline(
            "ornament_pipeline",
            "vs_body",
            "fs_ornament",
            body_instance_layout(),
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let point_pipeline = make_pipeline(
            "point_pipeline",
            "vs_point",
            "fs_point",
            point_instance_layout(),
            ADDITIVE_BLEND,
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            tile_pipeline,
            ornament_pipeline,
            point_pipeline,
            uniform_buffer,
            bind_group,
            point_quad_vb,
            ornament_quad_vb,
            tile_quad_vb,
            foliage_ib,
            ornament_ib,
            tile_ib,
            width: size.width,
            height: size.height,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(
        &mut self,
        scene: &SceneState,
        transforms: &FrameTransforms,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = scene.camera(aspect);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                proj: camera.projection_matrix().to_cols_array_2d(),
                view: camera.view_matrix().to_cols_array_2d(),
            }),
        );

        self.queue
            .write_buffer(&self.foliage_ib, 0, bytemuck::cast_slice(&transforms.foliage));
        self.queue.write_buffer(
            &self.ornament_ib,
            0,
            bytemuck::cast_slice(&transforms.ornaments),
        );
        self.queue
            .write_buffer(&self.tile_ib, 0, bytemuck::cast_slice(&transforms.tiles));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            rpass.set_pipeline(&self.tile_pipeline);
            rpass.set_vertex_buffer(0, self.tile_quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.tile_ib.slice(..));
            rpass.draw(0..6, 0..transforms.tiles.len() as u32);

            rpass.set_pipeline(&self.ornament_pipeline);
            rpass.set_vertex_buffer(0, self.ornament_quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.ornament_ib.slice(..));
            rpass.draw(0..6, 0..transforms.ornaments.len() as u32);

            rpass.set_pipeline(&self.point_pipeline);
            rpass.set_vertex_buffer(0, self.point_quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.foliage_ib.slice(..));
            rpass.draw(0..6, 0..transforms.foliage.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut scene = SceneState::new();
    log::info!(
        "generated populations: {FOLIAGE_COUNT} foliage, {ORNAMENT_COUNT} ornaments, {TILE_COUNT} tiles"
    );

    // Scripted gestures stand in for the live vision classifier; the
    // manual override (Space) works the same either way.
    let sampler = GestureSampler::start(ScriptedClassifier::default());

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Golden Spruce")
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");

    let start = Instant::now();
    let mut last_frame = Instant::now();
    let mut last_seen = 0u64;
    let mut transforms = FrameTransforms::default();
    let mut frame_count: u32 = 0;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event: key, .. },
                ..
            } => {
                if key.state == ElementState::Pressed && !key.repeat {
                    match key.physical_key {
                        PhysicalKey::Code(KeyCode::Space) => {
                            scene.toggle_mode();
                            log::info!("manual override -> {}", scene.mode().label());
                        }
                        PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - last_frame).as_secs_f32();
                last_frame = now;

                if let Some(sample) = sampler.poll(&mut last_seen) {
                    let before = scene.mode();
                    scene.apply_sample(sample);
                    if scene.mode() != before {
                        log::info!("gesture -> {}", scene.mode().label());
                    }
                }
                scene.tick(dt);
                scene.write_transforms(start.elapsed().as_secs_f32(), &mut transforms);

                frame_count = frame_count.wrapping_add(1);
                if frame_count % OVERLAY_REFRESH_FRAMES == 0 {
                    let overlay = scene.overlay(sampler.in_flight());
                    state.window.set_title(&format!(
                        "Golden Spruce — {} | hand {} | pos [{:+.2}, {:+.2}] | {}",
                        overlay.mode_label,
                        if overlay.hand_open { "open" } else { "closed" },
                        overlay.pointing.x,
                        overlay.pointing.y,
                        if overlay.sampling { "sampling" } else { "idle" },
                    ));
                }

                match state.render(&scene, &transforms) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}
