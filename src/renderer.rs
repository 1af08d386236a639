//! The wgpu implementation of [`FrameRenderer`].
//!
//! Each frame renders the world into an offscreen target sized by the pixel
//! ratio, stretches it over the window, then draws the overlays at full
//! resolution on top.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use winit::window::Window;

use crate::context::{RenderContext, RendererSettings, Viewport};
use crate::draw2d::{Draw2d, Shape, paint_overlays};
use crate::ecs::RenderMesh;
use crate::error::GpuError;
use crate::font::Fonts;
use crate::frame::FrameRenderer;
use crate::geometry::RawGeometry;
use crate::gpu::GpuContext;
use crate::mesh::Mesh;
use crate::mesh_pass::{MeshPass, collect_draws};
use crate::resources::GeometryId;

/// Size of the offscreen scene target for `viewport`.
///
/// The viewport is in physical pixels; the scene is drawn at
/// `pixel_ratio / device_pixel_ratio` of that, never below one pixel.
pub fn scene_resolution(viewport: &Viewport, settings: &RendererSettings) -> (u32, u32) {
    let device = if settings.device_pixel_ratio > 0.0 {
        settings.device_pixel_ratio
    } else {
        1.0
    };
    let scale = (settings.pixel_ratio / device).clamp(0.05, 4.0);
    let scale = if scale.is_finite() { scale } else { 1.0 };
    (
        ((viewport.width as f32 * scale).round() as u32).max(1),
        ((viewport.height as f32 * scale).round() as u32).max(1),
    )
}

pub struct WgpuRenderer {
    gpu: GpuContext,
    mesh_pass: MeshPass,
    draw2d: Draw2d,
    fonts: Fonts,
    meshes: HashMap<GeometryId, Mesh>,
}

impl WgpuRenderer {
    pub fn new(window: Arc<Window>, vsync: bool, font_path: Option<&Path>) -> Result<Self, GpuError> {
        let gpu = GpuContext::new(window, vsync)?;
        let mesh_pass = MeshPass::new(&gpu);
        let draw2d = Draw2d::new(&gpu);
        Ok(Self {
            gpu,
            mesh_pass,
            draw2d,
            fonts: Fonts::load(font_path),
            meshes: HashMap::new(),
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    /// Drop meshes whose geometry was released and upload new ones.
    fn sync_meshes(&mut self, ctx: &mut RenderContext) {
        for id in ctx.resources.drain_released_geometries() {
            if self.meshes.remove(&id).is_some() {
                log::trace!("freed mesh for {id:?}");
            }
        }
        for (_, mesh) in ctx.world.query::<&RenderMesh>().iter() {
            if self.meshes.contains_key(&mesh.geometry) {
                continue;
            }
            if let Some(geometry) = ctx.resources.geometry(mesh.geometry) {
                let raw = RawGeometry::from_geometry(geometry);
                self.meshes.insert(mesh.geometry, raw.upload(&self.gpu));
            }
        }
    }

    /// Turn this frame's overlays into 2D draw calls.
    fn paint_overlays(&mut self, ctx: &RenderContext) {
        self.draw2d.clear();
        for shape in paint_overlays(&ctx.overlays, ctx.viewport.size(), ctx.viewport.scale_factor) {
            match shape {
                Shape::Rect { rect, color } => self.draw2d.rect(rect, color),
                Shape::Vignette { rect, edge } => self.draw2d.vignette(rect, edge),
                Shape::Text {
                    rect,
                    lines,
                    px,
                    color,
                    align,
                } => {
                    let Some(atlas) = self.fonts.atlas(&self.gpu, px) else {
                        continue;
                    };
                    self.draw2d.register_atlas(&self.gpu, px, &atlas.view);
                    self.draw2d.text(px, &atlas.sheet, rect, &lines, color, align);
                }
            }
        }
    }
}

impl FrameRenderer for WgpuRenderer {
    fn render(&mut self, ctx: &mut RenderContext) {
        self.sync_meshes(ctx);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out; skipping frame");
                return;
            }
            Err(err) => {
                log::error!("couldn't acquire surface texture: {err}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let draws = collect_draws(ctx);
        self.mesh_pass
            .ensure_target(&self.gpu, scene_resolution(&ctx.viewport, &ctx.settings));
        self.mesh_pass
            .render(&self.gpu, &mut encoder, ctx, &self.meshes, &draws);

        self.paint_overlays(ctx);
        self.draw2d
            .prepare(&self.gpu, (self.gpu.width(), self.gpu.height()));

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.mesh_pass.blit(&mut render_pass);
            self.draw2d.render(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn settings(pixel_ratio: f32, device_pixel_ratio: f32) -> RendererSettings {
        RendererSettings {
            clear_color: Color::BLACK,
            tone_mapping_exposure: 1.0,
            pixel_ratio,
            device_pixel_ratio,
        }
    }

    #[test]
    fn capped_pixel_ratio_shrinks_the_scene_target() {
        let viewport = Viewport::new(2000, 1000, 2.0);
        assert_eq!(scene_resolution(&viewport, &settings(1.5, 2.0)), (1500, 750));
    }

    #[test]
    fn full_ratio_matches_the_viewport() {
        let viewport = Viewport::new(1280, 720, 1.0);
        assert_eq!(scene_resolution(&viewport, &settings(1.0, 1.0)), (1280, 720));
    }

    #[test]
    fn degenerate_ratios_stay_usable() {
        let viewport = Viewport::new(10, 10, 0.0);
        assert_eq!(scene_resolution(&viewport, &settings(1.0, 0.0)), (10, 10));
        assert_eq!(scene_resolution(&viewport, &settings(0.0, 1.0)), (1, 1));
    }
}
