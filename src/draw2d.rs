//! Screen-space drawing for overlays: solid panels, vignettes and text.
//!
//! Painting is split in two. [`paint_overlays`] turns the overlay layer into
//! a flat list of [`Shape`]s in pixel space without touching the GPU, and
//! [`Draw2d`] tessellates those shapes into one vertex stream that is drawn
//! in order, so later overlays always cover earlier ones.

use std::collections::HashMap;

use glam::Vec2;

use crate::color::Color;
use crate::font::GlyphSheet;
use crate::gpu::GpuContext;
use crate::overlay::{Background, OverlayLayer, PixelRect, TextAlign};

/// Vertex for 2D panel/text rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2d {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    /// Linear color with straight alpha.
    pub color: [f32; 4],
    /// 1.0 samples glyph coverage from the atlas, 0.0 draws solid color.
    pub textured: f32,
}

impl Vertex2d {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex2d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
            // textured
            wgpu::VertexAttribute {
                offset: 32,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32,
            },
        ],
    };

    fn solid(position: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: position.into(),
            uv: [0.0, 0.0],
            color,
            textured: 0.0,
        }
    }

    fn glyph(position: Vec2, uv: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position: position.into(),
            uv,
            color,
            textured: 1.0,
        }
    }
}

/// One thing to paint, in physical pixels. Colors are sRGB with opacity
/// already folded into alpha.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect {
        rect: PixelRect,
        color: Color,
    },
    Vignette {
        rect: PixelRect,
        edge: Color,
    },
    Text {
        rect: PixelRect,
        lines: Vec<String>,
        /// Glyph size in physical pixels.
        px: u32,
        color: Color,
        align: TextAlign,
    },
}

/// Flatten the drawn overlays into shapes, back to front.
pub fn paint_overlays(layer: &OverlayLayer, viewport: Vec2, scale_factor: f32) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for (_, element) in layer.draw_order() {
        let rect = element.layout.resolve(viewport);
        let opacity = element.opacity.clamp(0.0, 1.0);
        match element.background {
            Background::None => {}
            Background::Solid(color) => shapes.push(Shape::Rect {
                rect,
                color: color.with_alpha(color.a * opacity),
            }),
            Background::Vignette(edge) => shapes.push(Shape::Vignette {
                rect,
                edge: edge.with_alpha(edge.a * opacity),
            }),
        }
        if element.lines.iter().any(|line| !line.trim().is_empty()) {
            let color = element.text_color;
            shapes.push(Shape::Text {
                rect,
                lines: element.lines.clone(),
                px: (element.font_size * scale_factor).round().max(1.0) as u32,
                color: color.with_alpha(color.a * opacity),
                align: element.align,
            });
        }
    }
    shapes
}

/// Vignette coverage at `uv` inside its rectangle: clear in the middle,
/// fully `edge` in the corners.
pub fn vignette_alpha(uv: Vec2) -> f32 {
    let distance = ((uv - Vec2::splat(0.5)) * 2.0).length() / std::f32::consts::SQRT_2;
    smoothstep(0.35, 1.0, distance)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Font measurements needed to place lines of text.
pub trait TextMetrics {
    fn line_height(&self) -> f32;
    fn measure(&self, line: &str) -> f32;
}

impl TextMetrics for GlyphSheet {
    fn line_height(&self) -> f32 {
        GlyphSheet::line_height(self)
    }

    fn measure(&self, line: &str) -> f32 {
        GlyphSheet::measure(self, line)
    }
}

/// Top-left corner of each line's box.
///
/// Left-aligned text starts half an em in from the top-left corner.
/// Centered text is centered on both axes.
pub fn line_origins(
    metrics: &impl TextMetrics,
    px: f32,
    rect: PixelRect,
    lines: &[String],
    align: TextAlign,
) -> Vec<Vec2> {
    let line_height = metrics.line_height();
    match align {
        TextAlign::Left => {
            let pad = px * 0.5;
            (0..lines.len())
                .map(|i| Vec2::new(rect.x + pad, rect.y + pad + i as f32 * line_height))
                .collect()
        }
        TextAlign::Center => {
            let block = line_height * lines.len() as f32;
            let top = rect.y + (rect.height - block) * 0.5;
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let width = metrics.measure(line);
                    Vec2::new(
                        rect.x + (rect.width - width) * 0.5,
                        top + i as f32 * line_height,
                    )
                })
                .collect()
        }
    }
}

/// Uniforms for 2D rendering.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Draw2dUniforms {
    resolution: [f32; 2],
    _padding: [f32; 2],
}

const INITIAL_VERTICES: usize = 16384;
const VIGNETTE_CELLS: usize = 12;

/// A run of vertices that share one atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Batch {
    /// Atlas pixel size, or `None` while only solid shapes are in the run.
    atlas: Option<u32>,
    start: u32,
    end: u32,
}

/// Batched 2D drawing, rendered in one pass at the end of the frame.
pub struct Draw2d {
    pipeline: wgpu::RenderPipeline,

    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    /// Bound for batches without text.
    blank_bind_group: wgpu::BindGroup,
    atlas_bind_groups: HashMap<u32, wgpu::BindGroup>,

    vertices: Vec<Vertex2d>,
    batches: Vec<Batch>,
}

impl Draw2d {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Draw2d Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/draw2d.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw2d Uniforms"),
            size: std::mem::size_of::<Draw2dUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // group 0
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw2d Uniform Layout"),
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
            label: Some("Draw2d Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // group 1
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw2d Texture Layout"),
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
            label: Some("Glyph Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Draw2d Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let blend_state = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Draw2d Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex2d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(blend_state),
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

        let vertex_buffer = Self::create_vertex_buffer(gpu, INITIAL_VERTICES);
        let blank_bind_group = Self::create_blank_bind_group(gpu, &texture_bind_group_layout, &sampler);

        Self {
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTICES,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group_layout,
            sampler,
            blank_bind_group,
            atlas_bind_groups: HashMap::new(),
            vertices: Vec::with_capacity(1024),
            batches: Vec::new(),
        }
    }

    fn create_vertex_buffer(gpu: &GpuContext, capacity: usize) -> wgpu::Buffer {
        gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw2d Vertex Buffer"),
            size: (capacity * std::mem::size_of::<Vertex2d>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// A 1x1 fully covered texel, so solid shapes can share the pipeline.
    fn create_blank_bind_group(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Draw2d Blank Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &[255],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(1),
                rows_per_image: Some(1),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self::texture_bind_group(gpu, layout, sampler, &view)
    }

    fn texture_bind_group(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw2d Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Make sure the `px` atlas has a bind group.
    pub fn register_atlas(&mut self, gpu: &GpuContext, px: u32, view: &wgpu::TextureView) {
        if !self.atlas_bind_groups.contains_key(&px) {
            let bind_group =
                Self::texture_bind_group(gpu, &self.texture_bind_group_layout, &self.sampler, view);
            self.atlas_bind_groups.insert(px, bind_group);
        }
    }

    /// Clear all draw calls for the new frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.batches.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn push(&mut self, atlas: Option<u32>, vertices: &[Vertex2d]) {
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        let end = self.vertices.len() as u32;
        match self.batches.last_mut() {
            Some(batch) if atlas.is_none() || batch.atlas.is_none() || batch.atlas == atlas => {
                batch.atlas = batch.atlas.or(atlas);
                batch.end = end;
            }
            _ => self.batches.push(Batch { atlas, start, end }),
        }
    }

    fn quad(a: Vertex2d, b: Vertex2d, c: Vertex2d, d: Vertex2d) -> [Vertex2d; 6] {
        // a b
        // d c
        [a, b, d, b, c, d]
    }

    /// Draw a solid rectangle.
    pub fn rect(&mut self, rect: PixelRect, color: Color) {
        let c = color.to_linear().to_array();
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
        let quad = Self::quad(
            Vertex2d::solid(Vec2::new(x0, y0), c),
            Vertex2d::solid(Vec2::new(x1, y0), c),
            Vertex2d::solid(Vec2::new(x1, y1), c),
            Vertex2d::solid(Vec2::new(x0, y1), c),
        );
        self.push(None, &quad);
    }

    /// Draw a vignette as a grid whose vertex alpha follows [`vignette_alpha`].
    pub fn vignette(&mut self, rect: PixelRect, edge: Color) {
        let linear = edge.to_linear();
        let corner = |i: usize, j: usize| {
            let uv = Vec2::new(i as f32, j as f32) / VIGNETTE_CELLS as f32;
            let position = Vec2::new(rect.x + uv.x * rect.width, rect.y + uv.y * rect.height);
            let color = linear.with_alpha(edge.a * vignette_alpha(uv));
            Vertex2d::solid(position, color.to_array())
        };
        let mut vertices = Vec::with_capacity(VIGNETTE_CELLS * VIGNETTE_CELLS * 6);
        for j in 0..VIGNETTE_CELLS {
            for i in 0..VIGNETTE_CELLS {
                vertices.extend_from_slice(&Self::quad(
                    corner(i, j),
                    corner(i + 1, j),
                    corner(i + 1, j + 1),
                    corner(i, j + 1),
                ));
            }
        }
        self.push(None, &vertices);
    }

    /// Draw lines of text from the `px` atlas.
    pub fn text(
        &mut self,
        px: u32,
        sheet: &GlyphSheet,
        rect: PixelRect,
        lines: &[String],
        color: Color,
        align: TextAlign,
    ) {
        let c = color.to_linear().to_array();
        let origins = line_origins(sheet, px as f32, rect, lines, align);
        let mut vertices = Vec::new();

        for (line, origin) in lines.iter().zip(origins) {
            let baseline_y = origin.y + sheet.ascent();
            let mut cursor_x = origin.x;
            for ch in line.chars() {
                let Some(glyph) = sheet.glyph(ch) else {
                    cursor_x += sheet.size() * 0.5;
                    continue;
                };

                if glyph.width > 0 && glyph.height > 0 {
                    // ymin is measured up from the baseline to the glyph's bottom edge.
                    let gx = (cursor_x + glyph.offset_x).round();
                    let gy = (baseline_y - glyph.offset_y - glyph.height as f32).round();
                    let (gw, gh) = (glyph.width as f32, glyph.height as f32);

                    let u0 = glyph.uv[0];
                    let v0 = glyph.uv[1];
                    let u1 = u0 + glyph.uv[2];
                    let v1 = v0 + glyph.uv[3];

                    vertices.extend_from_slice(&Self::quad(
                        Vertex2d::glyph(Vec2::new(gx, gy), [u0, v0], c),
                        Vertex2d::glyph(Vec2::new(gx + gw, gy), [u1, v0], c),
                        Vertex2d::glyph(Vec2::new(gx + gw, gy + gh), [u1, v1], c),
                        Vertex2d::glyph(Vec2::new(gx, gy + gh), [u0, v1], c),
                    ));
                }

                cursor_x += glyph.advance;
            }
        }

        if !vertices.is_empty() {
            self.push(Some(px), &vertices);
        }
    }

    /// Upload this frame's vertices and the target resolution.
    pub fn prepare(&mut self, gpu: &GpuContext, resolution: (u32, u32)) {
        let uniforms = Draw2dUniforms {
            resolution: [resolution.0 as f32, resolution.1 as f32],
            _padding: [0.0, 0.0],
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        if self.vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.vertices.len().next_power_of_two();
            log::debug!("growing 2D vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = Self::create_vertex_buffer(gpu, self.vertex_capacity);
        }
        if !self.vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        }
    }

    /// Draw the prepared batches in order.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass) {
        if self.vertices.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for batch in &self.batches {
            let bind_group = batch
                .atlas
                .and_then(|px| self.atlas_bind_groups.get(&px))
                .unwrap_or(&self.blank_bind_group);
            render_pass.set_bind_group(1, bind_group, &[]);
            render_pass.draw(batch.start..batch.end, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{Layout, OverlayElement};

    /// Every glyph is 10px wide, lines are 20px tall.
    struct Mono;

    impl TextMetrics for Mono {
        fn line_height(&self) -> f32 {
            20.0
        }

        fn measure(&self, line: &str) -> f32 {
            line.chars().count() as f32 * 10.0
        }
    }

    #[test]
    fn vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex2d>(), 36);
        assert_eq!(Vertex2d::LAYOUT.attributes[3].offset, 32);
    }

    #[test]
    fn overlays_paint_back_to_front_with_opacity() {
        let mut layer = OverlayLayer::new();
        layer.add(
            OverlayElement::new(Layout::rect(0.0, 0.0, 0.5, 0.1))
                .background(Color::BLACK.with_alpha(0.8))
                .text("Scene: Room")
                .font_size(16.0)
                .z(2),
        );
        layer.add(
            OverlayElement::new(Layout::Fill)
                .vignette(Color::BLACK)
                .opacity(0.5),
        );
        layer.add(OverlayElement::new(Layout::Fill).text("hidden").hidden());

        let shapes = paint_overlays(&layer, Vec2::new(800.0, 600.0), 2.0);
        assert_eq!(shapes.len(), 3);
        match &shapes[0] {
            Shape::Vignette { rect, edge } => {
                assert_eq!(rect.width, 800.0);
                assert_eq!(edge.a, 0.5);
            }
            other => panic!("expected vignette first, got {other:?}"),
        }
        match &shapes[1] {
            Shape::Rect { rect, color } => {
                assert_eq!(rect.height, 60.0);
                assert!((color.a - 0.8).abs() < 1e-6);
            }
            other => panic!("expected panel, got {other:?}"),
        }
        match &shapes[2] {
            Shape::Text { lines, px, .. } => {
                assert_eq!(lines, &vec!["Scene: Room".to_owned()]);
                assert_eq!(*px, 32);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn blank_text_is_not_painted() {
        let mut layer = OverlayLayer::new();
        layer.add(OverlayElement::new(Layout::Fill).text("  \n"));
        assert!(paint_overlays(&layer, Vec2::new(100.0, 100.0), 1.0).is_empty());
    }

    #[test]
    fn vignette_is_clear_in_the_middle_and_solid_in_corners() {
        assert_eq!(vignette_alpha(Vec2::splat(0.5)), 0.0);
        assert!((vignette_alpha(Vec2::ZERO) - 1.0).abs() < 1e-6);
        assert!((vignette_alpha(Vec2::new(1.0, 1.0)) - 1.0).abs() < 1e-6);

        let mut last = 0.0;
        for step in 0..=10 {
            let a = vignette_alpha(Vec2::splat(0.5 - step as f32 * 0.05));
            assert!(a >= last);
            last = a;
        }
    }

    #[test]
    fn centered_lines_sit_in_the_middle() {
        let rect = PixelRect {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
        };
        let lines = vec!["abcd".to_owned(), "ab".to_owned()];
        let origins = line_origins(&Mono, 16.0, rect, &lines, TextAlign::Center);
        assert_eq!(origins, vec![Vec2::new(80.0, 30.0), Vec2::new(90.0, 50.0)]);
    }

    #[test]
    fn left_lines_are_padded_from_the_corner() {
        let rect = PixelRect {
            x: 10.0,
            y: 20.0,
            width: 200.0,
            height: 100.0,
        };
        let lines = vec!["a".to_owned(), "b".to_owned()];
        let origins = line_origins(&Mono, 16.0, rect, &lines, TextAlign::Left);
        assert_eq!(origins, vec![Vec2::new(18.0, 28.0), Vec2::new(18.0, 48.0)]);
    }
}
