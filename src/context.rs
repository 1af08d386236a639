//! The render context shared by every scene.
//!
//! One [`RenderContext`] lives for the whole application. Scenes mutate it
//! freely while they're active (camera pose, fog, exposure, world entities,
//! overlays); the scene manager calls [`RenderContext::reset_to_baseline`]
//! between scenes so the next one starts from the same known state.

use std::fmt;

use glam::Vec3;

use crate::camera::Camera;
use crate::color::Color;
use crate::overlay::OverlayLayer;
use crate::resources::ResourceRegistry;

/// Renderer-wide knobs that scenes may tweak.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererSettings {
    pub clear_color: Color,
    /// Multiplier applied before tone mapping.
    pub tone_mapping_exposure: f32,
    /// Render resolution relative to logical pixels.
    pub pixel_ratio: f32,
    /// Physical pixels per logical pixel reported by the display.
    pub device_pixel_ratio: f32,
}

/// Linear distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// Flags shared between the shell and the scenes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    pub lights_on: bool,
}

/// Drawable area in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale_factor: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The state every scene starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baseline {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: Color,
    pub exposure: f32,
    /// Upper bound for the pixel ratio; the device ratio is used below it.
    pub max_pixel_ratio: f32,
}

impl Baseline {
    pub const PORTFOLIO: Baseline = Baseline {
        camera_position: Vec3::new(0.0, 1.6, 3.0),
        camera_target: Vec3::new(0.0, 1.6, 0.0),
        fov_degrees: 60.0,
        near: 0.05,
        far: 200.0,
        clear_color: Color::hex(0x000000),
        exposure: 1.0,
        max_pixel_ratio: 1.5,
    };
}

impl Default for Baseline {
    fn default() -> Self {
        Self::PORTFOLIO
    }
}

/// Everything a scene can see and touch.
pub struct RenderContext {
    pub settings: RendererSettings,
    pub fog: Option<Fog>,
    /// Overrides the clear color when set.
    pub background: Option<Color>,
    pub camera: Camera,
    pub world: hecs::World,
    pub resources: ResourceRegistry,
    pub overlays: OverlayLayer,
    pub flags: GlobalFlags,
    pub viewport: Viewport,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("settings", &self.settings)
            .field("fog", &self.fog)
            .field("background", &self.background)
            .field("camera", &self.camera)
            .field("entities", &self.world.len())
            .field("resources", &self.resources)
            .field("overlays", &self.overlays)
            .field("flags", &self.flags)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl RenderContext {
    pub fn new(viewport: Viewport, baseline: &Baseline) -> Self {
        let mut ctx = Self {
            settings: RendererSettings {
                clear_color: baseline.clear_color,
                tone_mapping_exposure: baseline.exposure,
                pixel_ratio: 1.0,
                device_pixel_ratio: viewport.scale_factor,
            },
            fog: None,
            background: None,
            camera: Camera::default(),
            world: hecs::World::new(),
            resources: ResourceRegistry::new(),
            overlays: OverlayLayer::new(),
            flags: GlobalFlags::default(),
            viewport,
        };
        ctx.camera.aspect = viewport.aspect();
        ctx.reset_to_baseline(baseline);
        ctx
    }

    /// Put the shared globals back the way every scene expects to find them.
    ///
    /// Leaves the world, resources, overlays and flags alone; those belong
    /// to scenes and the shell respectively.
    pub fn reset_to_baseline(&mut self, baseline: &Baseline) {
        self.fog = None;
        self.background = None;

        self.settings.clear_color = baseline.clear_color;
        self.settings.tone_mapping_exposure = baseline.exposure;
        self.settings.pixel_ratio = self
            .settings
            .device_pixel_ratio
            .min(baseline.max_pixel_ratio);

        self.camera.position = baseline.camera_position;
        self.camera.up = Vec3::Y;
        self.camera.look_at(baseline.camera_target);
        self.camera.set_fov_degrees(baseline.fov_degrees);
        self.camera.near = baseline.near;
        self.camera.far = baseline.far;
    }

    /// Track a new drawable size. Zero-sized viewports are ignored.
    ///
    /// Returns whether anything changed.
    pub fn set_viewport(&mut self, width: u32, height: u32, scale_factor: f32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let next = Viewport::new(width, height, scale_factor);
        if next == self.viewport {
            return false;
        }
        if next.scale_factor != self.viewport.scale_factor {
            self.settings.device_pixel_ratio = scale_factor;
        }
        self.viewport = next;
        self.camera.aspect = next.aspect();
        true
    }

    /// Color the frame is cleared to.
    pub fn clear_color(&self) -> Color {
        self.background.unwrap_or(self.settings.clear_color)
    }
}
