use glam::{DMat4, DVec3};
use image::RgbaImage;
use ray_casting_lib::{
    application::{AppState, Application, Layer, Screen},
    blit::{IndexBuffer, Vertex, VertexBuffer, QUAD_INDICES, QUAD_VERTICES},
    camera::{Camera, CameraController, Viewport},
    light::{PhongConstants, PointLight},
    renderer,
    scene::Scene,
    texture::Texture,
};
use wgpu::{
    include_wgsl, CommandEncoderDescriptor, PipelineLayoutDescriptor, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipelineDescriptor, TextureViewDescriptor,
};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
};

const IMAGE_WIDTH: u32 = 300;
const IMAGE_HEIGHT: u32 = 300;

struct RayCaster {
    scene: Scene,
    light: PointLight,
    camera: Camera,
    camera_controller: CameraController,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    texture: Texture,
    frame: RgbaImage,
    frame_bind_group: wgpu::BindGroup,
}

fn reference_scene() -> Scene {
    let mut scene = Scene::new(IMAGE_WIDTH, IMAGE_HEIGHT);
    scene.background = DVec3::ZERO;
    scene.ambient = 1.2;

    scene.add_sphere(
        DVec3::new(150.0, 150.0, 0.0),
        40.0,
        0.3,
        0.3,
        DVec3::new(0.0, 0.0, 254.0),
        DVec3::new(0.0, 0.0, 255.0),
    );
    scene.add_sphere(
        DVec3::new(150.0, 100.0, 0.0),
        60.0,
        0.3,
        0.3,
        DVec3::new(0.0, 254.0, 0.0),
        DVec3::new(0.0, 255.0, 0.0),
    );
    scene.add_sphere(
        DVec3::new(150.0, 200.0, 0.0),
        60.0,
        0.3,
        0.3,
        DVec3::new(254.0, 0.0, 0.0),
        DVec3::new(255.0, 0.0, 0.0),
    );
    scene
}

// The light borrows its reflectance coefficients from the first sphere.
fn reference_light(scene: &Scene) -> PointLight {
    let material = scene.spheres()[0].material;
    PointLight::new(
        DVec3::new(3.0, 3.0, 3.0),
        PhongConstants {
            ka: 0.4,
            ks: material.ks,
            kd: material.kd,
            ambient_intensity: 200.0,
            intensity: DVec3::splat(192.0),
            attenuation: 1.0,
            shininess: 2.0,
        },
    )
}

fn reference_camera() -> Camera {
    Camera::new(
        DVec3::new(155.0, 150.0, -150.0),
        DVec3::new(2.0, 1.0, 0.0),
        DMat4::IDENTITY,
        DMat4::orthographic_rh_gl(
            0.0,
            IMAGE_WIDTH as f64,
            0.0,
            IMAGE_HEIGHT as f64,
            -1.0,
            1.0,
        ),
        Viewport {
            x: 0.0,
            y: 0.0,
            width: IMAGE_WIDTH as f64,
            height: IMAGE_HEIGHT as f64,
        },
    )
}

fn rendered_frame(scene: &Scene, light: &PointLight, camera: &Camera) -> RgbaImage {
    let start = std::time::Instant::now();
    match renderer::render(scene, light, camera) {
        Ok(frame) => {
            tracing::info!(
                "frame rendered in {:.3}s",
                start.elapsed().as_secs_f64()
            );
            image::DynamicImage::ImageRgb8(frame).to_rgba8()
        }
        Err(err) => {
            tracing::error!("frame aborted: {err}");
            RgbaImage::new(scene.width, scene.height)
        }
    }
}

impl Layer for RayCaster {
    type LayerErr = ();

    fn start(screen: &mut Screen, _app: &AppState) -> Self {
        let scene = reference_scene();
        let light = reference_light(&scene);
        let camera = reference_camera();

        let frame = rendered_frame(&scene, &light, &camera);
        let texture = Texture::from_image(
            &screen.device,
            &screen.queue,
            &frame,
            IMAGE_WIDTH,
            IMAGE_HEIGHT,
            Some("Frame texture"),
        );

        let shader = screen
            .device
            .create_shader_module(include_wgsl!("asset/shader/blit.wgsl"));

        let vertex_buffer = VertexBuffer::init_immediate(
            &screen.device,
            bytemuck::cast_slice(QUAD_VERTICES),
            Some("Vertex Buffer"),
        );
        let index_buffer =
            IndexBuffer::init_immediate_u16(&screen.device, QUAD_INDICES, Some("Index Buffer"));

        let frame_bind_group_layout =
            screen
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                multisampled: false,
                                view_dimension: wgpu::TextureViewDimension::D2,
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
                    label: Some("frame_bind_group_layout"),
                });

        let frame_bind_group = screen.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let render_pipeline_layout =
            screen
                .device
                .create_pipeline_layout(&PipelineLayoutDescriptor {
                    label: Some("Render Pipeline Layout"),
                    bind_group_layouts: &[&frame_bind_group_layout],
                    push_constant_ranges: &[],
                });

        let render_pipeline = screen
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("Render Pipeline"),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[Vertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: screen.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            });

        Self {
            scene,
            light,
            camera,
            camera_controller: CameraController::new(5.0),
            render_pipeline,
            vertex_buffer,
            index_buffer,
            texture,
            frame,
            frame_bind_group,
        }
    }

    fn resize(&mut self, _new_size: PhysicalSize<u32>, _app: &AppState, _screen: &mut Screen) {
        // The cast image has fixed dimensions; the quad stretches with the
        // surface, which Screen already reconfigured.
    }

    fn process_event(&mut self, event: &Event<()>, screen: &mut Screen) {
        if let Event::WindowEvent { ref event, .. } = event {
            let moved = self
                .camera_controller
                .process_events(&mut self.camera, event);

            let refresh_requested = matches!(
                event,
                WindowEvent::KeyboardInput {
                    input: KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(VirtualKeyCode::F5),
                        ..
                    },
                    ..
                }
            );

            if moved || refresh_requested {
                self.frame = rendered_frame(&self.scene, &self.light, &self.camera);
                self.texture
                    .update_data(&screen.queue, &self.frame, IMAGE_WIDTH, IMAGE_HEIGHT);
            }
        }
    }

    fn update(&mut self, _app: &AppState, _screen: &mut Screen) {}

    fn render(&mut self, _app: &AppState, screen: &mut Screen) -> Result<(), wgpu::SurfaceError> {
        let output = screen.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let mut encoder = screen
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
            render_pass.set_index_buffer(
                self.index_buffer.buffer().slice(..),
                self.index_buffer.format(),
            );
            render_pass.draw_indexed(0..self.index_buffer.count(), 0, 0..1);
        }

        screen.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn shutdown(&mut self, _app: &AppState, _screen: &mut Screen) -> Result<(), Self::LayerErr> {
        tracing::info!("exiting");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    pollster::block_on(Application::<RayCaster>::init("ray-casting"));
}
