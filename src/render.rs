use crate::core::{
    layout, Camera, Color, InteractiveObject, Mesh, FOG_COLOR, INITIAL_BACKGROUND_COLOR,
    INITIAL_TUBE_COLOR,
};
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

pub mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye_fog: [f32; 4],
    tube_color: [f32; 4],
    fog_color: [f32; 4],
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Some(Self {
            vertex,
            index,
            index_count: mesh.indices.len() as u32,
        })
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex.slice(..));
        rpass.set_index_buffer(self.index.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// One loaded picture: its panel and the image bound to group 1.
struct PictureDraw {
    mesh: MeshBuffers,
    bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    texture: wgpu::Texture,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    picture_bgl: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,
    #[allow(dead_code)]
    plain_tex: wgpu::Texture,
    plain_bind_group: wgpu::BindGroup,

    tube: Option<MeshBuffers>,
    markers: Option<MeshBuffers>,
    pictures: Vec<PictureDraw>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    tube_color: [f32; 4],
    fog_density: f32,
    view_proj: Mat4,
    eye: Vec3,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        tube: &Mesh,
        fog_density: f32,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let picture_bgl = helpers::picture_bind_group_layout(&device);
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl, &picture_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_scene_pipeline(&device, &pl, &shader, format);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let (depth_tex, depth_view) = helpers::create_depth_texture_device(&device, width, height);
        let tube = MeshBuffers::upload(&device, "tube", tube);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let (plain_tex, plain_view) = helpers::create_plain_texture(&device, &queue);
        let plain_bind_group = helpers::picture_bind_group(
            &device,
            &picture_bgl,
            &plain_view,
            &linear_sampler,
            "plain_bg",
        );

        let mut state = Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            depth_tex,
            depth_view,
            picture_bgl,
            linear_sampler,
            plain_tex,
            plain_bind_group,
            tube,
            markers: None,
            pictures: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color::BLACK,
            tube_color: [1.0; 4],
            fog_density,
            view_proj: Mat4::IDENTITY,
            eye: Vec3::ZERO,
        };
        state.set_tube_color(Color(INITIAL_TUBE_COLOR));
        state.set_clear_color(Color(INITIAL_BACKGROUND_COLOR));
        Ok(state)
    }

    pub fn set_tube_color(&mut self, color: Color) {
        self.tube_color = color.linear_rgba(1.0);
    }

    /// Background colour; the surface is sRGB so the clear value is linear.
    pub fn set_clear_color(&mut self, color: Color) {
        let [r, g, b] = color.linear();
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection();
        self.eye = camera.eye;
    }

    pub fn set_markers(&mut self, mesh: &Mesh) {
        self.markers = MeshBuffers::upload(&self.device, "markers", mesh);
    }

    /// Copy a decoded image into its own texture and add its panel.
    pub fn add_picture(
        &mut self,
        object: &InteractiveObject,
        image: &web::HtmlImageElement,
    ) -> anyhow::Result<()> {
        let (width, height) = (image.natural_width(), image.natural_height());
        let max = self.device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max || height > max {
            anyhow::bail!("picture {} is {}x{}, limit {}", object.id, width, height, max);
        }
        let label = format!("picture_{}", object.id);
        let (texture, view) = helpers::create_color_texture_device(
            &self.device,
            &label,
            width,
            height,
            helpers::PICTURE_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let bind_group = helpers::picture_bind_group(
            &self.device,
            &self.picture_bgl,
            &view,
            &self.linear_sampler,
            &label,
        );
        let mesh = MeshBuffers::upload(&self.device, &label, &layout::picture_mesh(object))
            .ok_or_else(|| anyhow::anyhow!("picture {} has an empty panel", object.id))?;
        self.pictures.push(PictureDraw {
            mesh,
            bind_group,
            texture,
        });
        Ok(())
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = helpers::create_depth_texture_device(&self.device, width, height);
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let u = SceneUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            eye_fog: self.eye.extend(self.fog_density).to_array(),
            tube_color: self.tube_color,
            fog_color: Color(FOG_COLOR).linear_rgba(1.0),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_bind_group(1, &self.plain_bind_group, &[]);
            if let Some(tube) = &self.tube {
                tube.draw(&mut rpass);
            }
            if let Some(markers) = &self.markers {
                markers.draw(&mut rpass);
            }
            for picture in &self.pictures {
                rpass.set_bind_group(1, &picture.bind_group, &[]);
                picture.mesh.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
