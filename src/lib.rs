//! # Folio
//!
//! **A personal portfolio rendered as a handful of switchable 3D scenes.**
//!
//! One window, one shared render context, and a scene manager that swaps
//! mutually exclusive scenes in and out: an intro that boots into a resume
//! browser, a showroom, a chessboard, and a room you can walk around in.
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{AppConfig, SceneKey};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     folio::run(AppConfig::new().title("Portfolio").start_scene(SceneKey::Room))
//! }
//! ```
//!
//! ## Layout
//!
//! - [`scene`] owns the lifecycle: the [`Scene`](scene::Scene) contract,
//!   the [`SceneManager`](scene::SceneManager), and the table of factories.
//! - [`scenes`] holds the built-in content.
//! - [`RenderContext`] is the state every scene shares. It has no GPU in
//!   it, so everything above can be tested without a window.
//! - [`WgpuRenderer`] puts a context on screen; [`run`] drives it with winit.

mod app;
mod camera;
mod color;
mod config;
mod context;
mod draw2d;
mod ecs;
mod error;
mod font;
mod frame;
mod geometry;
mod gpu;
mod input;
mod mesh;
mod mesh_pass;
mod overlay;
mod renderer;
mod resources;
pub mod scene;
pub mod scenes;
mod switcher;

pub use app::{Portfolio, run};
pub use camera::Camera;
pub use color::Color;
pub use config::AppConfig;
pub use context::{Baseline, Fog, GlobalFlags, RenderContext, RendererSettings, Viewport};
pub use draw2d::{Draw2d, Shape, paint_overlays, vignette_alpha};
pub use ecs::{Light, RenderMesh, Transform};
pub use error::{ConfigError, GpuError, ResourceError, SceneError};
pub use font::{FontAtlas, Fonts, GlyphInfo, GlyphSheet};
pub use frame::{FrameClock, FrameDriver, FrameRenderer};
pub use geometry::RawGeometry;
pub use gpu::GpuContext;
pub use input::Input;
pub use mesh::{Mesh, Vertex3d};
pub use mesh_pass::MeshPass;
pub use overlay::{Background, Layout, OverlayElement, OverlayId, OverlayLayer, PixelRect, TextAlign};
pub use renderer::{WgpuRenderer, scene_resolution};
pub use resources::{Geometry, GeometryId, Material, MaterialId, ResourceRegistry, Side};
pub use scene::SceneKey;
pub use switcher::{SwitchAction, SwitchBindings};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

pub use hecs::{Entity, World};
