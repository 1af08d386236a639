//! 3D pass: draws every visible `(Transform, RenderMesh)` entity in the
//! shared world, lit by the `(Transform, Light)` entities next to them.
//!
//! # Architecture
//!
//! The mesh pass uses two bind groups:
//! - **Group 0**: scene uniforms (camera, lights, fog, exposure)
//! - **Group 1**: model uniforms, one 256-byte slot per draw, bound with a
//!   dynamic offset
//!
//! The pass renders into its own color and depth target, sized by the
//! context's pixel ratio, and [`MeshPass::blit`] scales the result onto the
//! surface. Tone mapping (ACES filmic) happens in the fragment shader.

use std::collections::HashMap;

use bytemuck::Zeroable;
use glam::{Mat4, Vec3};

use crate::color::Color;
use crate::context::RenderContext;
use crate::ecs::{Light, RenderMesh, Transform};
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};
use crate::resources::{GeometryId, Material, Side};

pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
pub const MAX_POINT_LIGHTS: usize = 8;

/// Distance between model uniform slots. Matches the default
/// `min_uniform_buffer_offset_alignment`.
const MODEL_STRIDE: u64 = 256;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalUniform {
    /// Unit vector pointing toward the light.
    pub direction: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointUniform {
    /// xyz position, w range (0 = unbounded).
    pub position: [f32; 4],
    pub color: [f32; 4],
}

/// Per-frame uniforms shared by every draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz camera position, w exposure.
    pub camera_pos: [f32; 4],
    /// rgb fog color, w 1.0 when fog is enabled.
    pub fog_color: [f32; 4],
    /// x near, y far.
    pub fog_range: [f32; 4],
    pub ambient: [f32; 4],
    pub sky: [f32; 4],
    pub ground: [f32; 4],
    /// Direction the hemisphere's sky color comes from.
    pub hemi_dir: [f32; 4],
    /// x directional count, y point count.
    pub counts: [u32; 4],
    pub directional: [DirectionalUniform; MAX_DIRECTIONAL_LIGHTS],
    pub points: [PointUniform; MAX_POINT_LIGHTS],
}

impl SceneUniforms {
    /// Snapshot the camera, fog and light entities of `ctx`.
    ///
    /// Lights beyond the per-kind limits are dropped with a warning.
    pub fn gather(ctx: &RenderContext) -> Self {
        let mut u = Self::zeroed();
        let camera = &ctx.camera;
        u.view_proj = camera.view_projection().to_cols_array_2d();
        u.camera_pos = camera.position.extend(ctx.settings.tone_mapping_exposure).to_array();
        u.hemi_dir = [0.0, 1.0, 0.0, 0.0];

        if let Some(fog) = ctx.fog {
            let c = fog.color.to_linear();
            u.fog_color = [c.r, c.g, c.b, 1.0];
            u.fog_range = [fog.near, fog.far, 0.0, 0.0];
        }

        let mut ambient = Vec3::ZERO;
        let mut sky = Vec3::ZERO;
        let mut ground = Vec3::ZERO;
        let mut dropped = 0;
        for (_, (transform, light)) in ctx.world.query::<(&Transform, &Light)>().iter() {
            match *light {
                Light::Ambient { color, intensity } => ambient += radiance(color, intensity),
                Light::Hemisphere {
                    sky: s,
                    ground: g,
                    intensity,
                } => {
                    sky += radiance(s, intensity);
                    ground += radiance(g, intensity);
                    u.hemi_dir = toward(transform.position).extend(0.0).to_array();
                }
                Light::Directional { color, intensity } => {
                    let n = u.counts[0] as usize;
                    if n == MAX_DIRECTIONAL_LIGHTS {
                        dropped += 1;
                        continue;
                    }
                    u.directional[n] = DirectionalUniform {
                        direction: toward(transform.position).extend(0.0).to_array(),
                        color: radiance(color, intensity).extend(1.0).to_array(),
                    };
                    u.counts[0] += 1;
                }
                Light::Point {
                    color,
                    intensity,
                    range,
                } => {
                    let n = u.counts[1] as usize;
                    if n == MAX_POINT_LIGHTS {
                        dropped += 1;
                        continue;
                    }
                    u.points[n] = PointUniform {
                        position: transform.position.extend(range.max(0.0)).to_array(),
                        color: radiance(color, intensity).extend(1.0).to_array(),
                    };
                    u.counts[1] += 1;
                }
            }
        }
        if dropped > 0 {
            log::warn!("{dropped} light(s) over the per-frame limit were skipped");
        }

        u.ambient = ambient.extend(1.0).to_array();
        u.sky = sky.extend(1.0).to_array();
        u.ground = ground.extend(1.0).to_array();
        u
    }
}

fn radiance(color: Color, intensity: f32) -> Vec3 {
    let c = color.to_linear();
    Vec3::new(c.r, c.g, c.b) * intensity
}

fn toward(position: Vec3) -> Vec3 {
    let dir = position.normalize_or_zero();
    if dir == Vec3::ZERO { Vec3::Y } else { dir }
}

/// Per-draw uniforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix.
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// rgb emissive radiance, w 1.0 for unlit materials.
    pub emissive: [f32; 4],
    /// x roughness, y metalness.
    pub surface: [f32; 4],
}

impl ModelUniforms {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let color = material.color.to_linear();
        let emissive = material.emissive.to_linear();
        let e = material.emissive_intensity;
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: [color.r, color.g, color.b, material.color.a],
            emissive: [
                emissive.r * e,
                emissive.g * e,
                emissive.b * e,
                if material.unlit { 1.0 } else { 0.0 },
            ],
            surface: [material.roughness, material.metalness, 0.0, 0.0],
        }
    }
}

/// How a material combines with what's already drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Opaque,
    /// Alpha blended, still writes depth.
    Alpha,
    /// Added on top, no depth write.
    Additive,
}

impl BlendMode {
    pub const ALL: [BlendMode; 3] = [BlendMode::Opaque, BlendMode::Alpha, BlendMode::Additive];

    pub fn of(material: &Material) -> Self {
        if material.additive {
            BlendMode::Additive
        } else if material.color.a < 1.0 {
            BlendMode::Alpha
        } else {
            BlendMode::Opaque
        }
    }

    fn state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Opaque => wgpu::BlendState::REPLACE,
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Zero,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// One mesh ready to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub geometry: GeometryId,
    pub material: Material,
    pub model: Mat4,
    /// Distance from the camera to the mesh origin.
    pub distance: f32,
}

impl DrawItem {
    pub fn blend(&self) -> BlendMode {
        BlendMode::of(&self.material)
    }
}

/// Visible meshes in draw order: opaque first, then blended ones back to front.
///
/// Meshes whose material has already been released are skipped.
pub fn collect_draws(ctx: &RenderContext) -> Vec<DrawItem> {
    let eye = ctx.camera.position;
    let (mut opaque, mut blended): (Vec<DrawItem>, Vec<DrawItem>) = ctx
        .world
        .query::<(&Transform, &RenderMesh)>()
        .iter()
        .filter(|(_, (_, mesh))| mesh.visible)
        .filter_map(|(_, (transform, mesh))| {
            let material = *ctx.resources.material(mesh.material)?;
            Some(DrawItem {
                geometry: mesh.geometry,
                material,
                model: transform.matrix(),
                distance: transform.position.distance(eye),
            })
        })
        .partition(|item| item.blend() == BlendMode::Opaque);

    // Opaque order doesn't affect the image; keep it stable for batching.
    opaque.sort_by_key(|item| item.geometry);
    blended.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    opaque.extend(blended);
    opaque
}

/// Offscreen color and depth the scene is rendered into.
struct SceneTarget {
    size: (u32, u32),
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    blit_bind_group: wgpu::BindGroup,
}

/// Handles 3D mesh rendering with depth testing.
pub struct MeshPass {
    pipelines: HashMap<(BlendMode, Side), wgpu::RenderPipeline>,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_capacity: u64,
    model_staging: Vec<u8>,
    blit_pipeline: wgpu::RenderPipeline,
    blit_layout: wgpu::BindGroupLayout,
    blit_sampler: wgpu::Sampler,
    target: Option<SceneTarget>,
}

impl MeshPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        // Scene uniform buffer (group 0)
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
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

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        // Model uniform buffer (group 1), indexed with dynamic offsets
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ModelUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let model_capacity = 64;
        let (model_buffer, model_bind_group) =
            Self::create_model_buffer(gpu, &model_layout, model_capacity);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&scene_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let mut pipelines = HashMap::new();
        for blend in BlendMode::ALL {
            for side in [Side::Front, Side::Back] {
                let pipeline = Self::create_pipeline(gpu, &pipeline_layout, &shader, blend, side);
                pipelines.insert((blend, side), pipeline);
            }
        }

        // Blit pipeline for scaling the offscreen target onto the surface
        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let blit_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blit Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
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

        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipelines,
            scene_buffer,
            scene_bind_group,
            model_layout,
            model_buffer,
            model_bind_group,
            model_capacity,
            model_staging: Vec::new(),
            blit_pipeline,
            blit_layout,
            blit_sampler,
            target: None,
        }
    }

    fn create_pipeline(
        gpu: &GpuContext,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        blend: BlendMode,
        side: Side,
    ) -> wgpu::RenderPipeline {
        gpu.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Pipeline"),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs"),
                    buffers: &[Vertex3d::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.format(),
                        blend: Some(blend.state()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(match side {
                        Side::Front => wgpu::Face::Back,
                        Side::Back => wgpu::Face::Front,
                    }),
                    front_face: wgpu::FrontFace::Ccw,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: blend != BlendMode::Additive,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    fn create_model_buffer(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniforms"),
            size: capacity * MODEL_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn ensure_model_capacity(&mut self, gpu: &GpuContext, count: usize) {
        let count = count as u64;
        if count <= self.model_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        log::debug!("growing model uniforms to {capacity} slots");
        let (buffer, bind_group) = Self::create_model_buffer(gpu, &self.model_layout, capacity);
        self.model_buffer = buffer;
        self.model_bind_group = bind_group;
        self.model_capacity = capacity;
    }

    /// Make sure the offscreen target is `size` physical pixels.
    pub fn ensure_target(&mut self, gpu: &GpuContext, size: (u32, u32)) {
        if self.target.as_ref().is_some_and(|t| t.size == size) {
            return;
        }
        let extent = wgpu::Extent3d {
            width: size.0.max(1),
            height: size.1.max(1),
            depth_or_array_layers: 1,
        };
        let color = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Color"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: gpu.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let depth = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());
        let blit_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: &self.blit_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.blit_sampler),
                },
            ],
        });
        log::debug!("scene target now {}x{}", extent.width, extent.height);
        self.target = Some(SceneTarget {
            size,
            color_view,
            depth_view,
            blit_bind_group,
        });
    }

    /// Draw `draws` into the offscreen target. Call [`Self::ensure_target`] first.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        ctx: &RenderContext,
        meshes: &HashMap<GeometryId, Mesh>,
        draws: &[DrawItem],
    ) {
        let scene = SceneUniforms::gather(ctx);
        gpu.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));

        self.ensure_model_capacity(gpu, draws.len());
        self.model_staging.clear();
        self.model_staging
            .resize(draws.len() * MODEL_STRIDE as usize, 0);
        for (i, draw) in draws.iter().enumerate() {
            let uniforms = ModelUniforms::new(draw.model, &draw.material);
            let start = i * MODEL_STRIDE as usize;
            let bytes = bytemuck::bytes_of(&uniforms);
            self.model_staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        if !self.model_staging.is_empty() {
            gpu.queue
                .write_buffer(&self.model_buffer, 0, &self.model_staging);
        }

        let Some(target) = self.target.as_ref() else {
            return;
        };
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Mesh Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(ctx.clear_color().to_linear().into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
        for (i, draw) in draws.iter().enumerate() {
            let Some(mesh) = meshes.get(&draw.geometry) else {
                continue;
            };
            let Some(pipeline) = self.pipelines.get(&(draw.blend(), draw.material.side)) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, &self.model_bind_group, &[(i as u64 * MODEL_STRIDE) as u32]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    /// Stretch the offscreen target over the whole of `render_pass`.
    pub fn blit(&self, render_pass: &mut wgpu::RenderPass) {
        let Some(target) = self.target.as_ref() else {
            return;
        };
        render_pass.set_pipeline(&self.blit_pipeline);
        render_pass.set_bind_group(0, &target.blit_bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
