//! The application shell: wires input, scenes and a renderer together and
//! hands the result to winit.

use std::error::Error;
use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::color::Color;
use crate::config::AppConfig;
use crate::context::{Baseline, RenderContext, Viewport};
use crate::frame::{FrameDriver, FrameRenderer};
use crate::input::Input;
use crate::overlay::{Layout, OverlayElement, OverlayId, OverlayLayer};
use crate::renderer::WgpuRenderer;
use crate::scene::{SceneManager, SceneTable};
use crate::switcher::{SwitchAction, SwitchBindings};

/// The always-on labels in the top-left corner. Clicking them does what
/// the matching key does.
#[derive(Debug)]
struct Hud {
    scene: OverlayId,
    lights: OverlayId,
}

impl Hud {
    const Z: i32 = 1000;

    fn new(overlays: &mut OverlayLayer) -> Self {
        let label = |y: f32| {
            OverlayElement::new(Layout::rect(0.01, y, 0.26, 0.045))
                .background(Color::hex(0x0b0d12).with_alpha(0.65))
                .text_color(Color::hex(0xe6e8ee))
                .font_size(15.0)
                .z(Self::Z)
                .interactive()
        };
        Self {
            scene: overlays.add(label(0.012)),
            lights: overlays.add(label(0.062)),
        }
    }

    fn refresh(&self, overlays: &mut OverlayLayer, scene_name: Option<&str>, lights_on: bool) {
        if let Some(element) = overlays.get_mut(self.scene) {
            element.set_text(&format!("Scene: {}", scene_name.unwrap_or("none")));
        }
        if let Some(element) = overlays.get_mut(self.lights) {
            element.set_text(if lights_on { "Lights: On" } else { "Lights: Off" });
        }
    }

    fn clicked(&self, overlays: &OverlayLayer, input: &Input, viewport: &Viewport) -> Option<SwitchAction> {
        if !input.mouse_pressed(MouseButton::Left) {
            return None;
        }
        let hit = overlays.hit_test(input.mouse_position(), viewport.size())?;
        if hit == self.scene {
            Some(SwitchAction::Cycle)
        } else if hit == self.lights {
            Some(SwitchAction::ToggleLights)
        } else {
            None
        }
    }
}

/// A running portfolio: the render context, the scenes in it, and the
/// renderer that shows them.
pub struct Portfolio<R: FrameRenderer> {
    renderer: R,
    ctx: RenderContext,
    manager: SceneManager,
    driver: FrameDriver,
    input: Input,
    bindings: SwitchBindings,
    hud: Hud,
}

impl<R: FrameRenderer> Portfolio<R> {
    /// Bring the portfolio up on `mount` and activate the configured scene.
    ///
    /// Without a mount nothing is created and `None` comes back.
    pub fn start(mount: Option<R>, config: &AppConfig, table: SceneTable) -> Option<Self> {
        let Some(renderer) = mount else {
            warn!("no display to render into; portfolio not started");
            return None;
        };

        let viewport = Viewport::new(config.width, config.height, 1.0);
        let mut ctx = RenderContext::new(viewport, &Baseline::PORTFOLIO);
        let hud = Hud::new(&mut ctx.overlays);
        let mut manager = SceneManager::new(table);
        manager.set_active_scene(config.start_scene, &mut ctx);

        let mut portfolio = Self {
            renderer,
            ctx,
            manager,
            driver: FrameDriver::new().with_max_dt(config.max_frame_dt),
            input: Input::new(),
            bindings: SwitchBindings::default(),
            hud,
        };
        portfolio.refresh_hud();
        info!("portfolio started on {}", config.start_scene);
        Some(portfolio)
    }

    pub fn with_bindings(mut self, bindings: SwitchBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.input.handle_event(event);
    }

    /// Run one frame on the wall clock.
    pub fn frame(&mut self) {
        self.apply_switches();
        self.driver
            .tick(&mut self.manager, &mut self.ctx, &self.input, &mut self.renderer);
        self.finish_frame();
    }

    /// Run one frame with a fixed `dt`.
    pub fn frame_with_dt(&mut self, dt: f32) {
        self.apply_switches();
        self.driver.tick_with_dt(
            dt,
            &mut self.manager,
            &mut self.ctx,
            &self.input,
            &mut self.renderer,
        );
        self.finish_frame();
    }

    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f32) -> bool {
        self.driver
            .resize(&mut self.ctx, &mut self.renderer, width, height, scale_factor)
    }

    /// Dispose the active scene. The portfolio stays usable; the next
    /// switch starts a scene again.
    pub fn shutdown(&mut self) {
        debug!("shutting down after {} frames", self.driver.frames());
        self.manager.shutdown(&mut self.ctx);
        self.refresh_hud();
    }

    pub fn ctx(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn manager(&self) -> &SceneManager {
        &self.manager
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// Current HUD lines, scene label first.
    pub fn hud_text(&self) -> Vec<String> {
        [self.hud.scene, self.hud.lights]
            .into_iter()
            .filter_map(|id| self.ctx.overlays.get(id))
            .flat_map(|element| element.lines.iter().cloned())
            .collect()
    }

    fn apply_switches(&mut self) {
        let action = self
            .bindings
            .resolve(&self.input)
            .or_else(|| self.hud.clicked(&self.ctx.overlays, &self.input, &self.ctx.viewport));
        if let Some(action) = action {
            action.apply(&mut self.manager, &mut self.ctx);
            self.refresh_hud();
        }
    }

    fn finish_frame(&mut self) {
        // Scenes may flip the lights themselves.
        self.refresh_hud();
        self.input.begin_frame();
    }

    fn refresh_hud(&mut self) {
        self.hud.refresh(
            &mut self.ctx.overlays,
            self.manager.active_name(),
            self.ctx.flags.lights_on,
        );
    }
}

enum FolioApp {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        portfolio: Portfolio<WgpuRenderer>,
    },
    /// Startup failed or the window closed.
    Stopped,
}

impl FolioApp {
    fn mount(config: &AppConfig, event_loop: &ActiveEventLoop) -> Option<(Arc<Window>, WgpuRenderer)> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("couldn't create a window: {err}");
                return None;
            }
        };
        match WgpuRenderer::new(window.clone(), config.vsync, config.font_path.as_deref()) {
            Ok(renderer) => Some((window, renderer)),
            Err(err) => {
                error!("couldn't set up the GPU: {err}");
                None
            }
        }
    }
}

impl ApplicationHandler for FolioApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let FolioApp::Pending { config } = self else {
            return;
        };

        let mounted = Self::mount(config, event_loop);
        let window = mounted.as_ref().map(|(window, _)| window.clone());
        let table = SceneTable::from_config(config);
        let started = Portfolio::start(mounted.map(|(_, renderer)| renderer), config, table);

        match (window, started) {
            (Some(window), Some(mut portfolio)) => {
                let size = window.inner_size();
                portfolio.resize(size.width, size.height, window.scale_factor() as f32);
                window.request_redraw();
                *self = FolioApp::Running { window, portfolio };
            }
            _ => {
                *self = FolioApp::Stopped;
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let FolioApp::Running { window, portfolio } = self else {
            return;
        };

        portfolio.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                portfolio.shutdown();
                *self = FolioApp::Stopped;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                portfolio.resize(size.width, size.height, window.scale_factor() as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = window.inner_size();
                portfolio.resize(size.width, size.height, scale_factor as f32);
            }
            WindowEvent::RedrawRequested => {
                portfolio.frame();
                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Open a window and run the portfolio until it closes.
pub fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = FolioApp::Pending { config };
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;
    use winit::keyboard::KeyCode;

    use super::*;
    use crate::scene::SceneKey;

    #[derive(Default)]
    struct Recording {
        renders: u32,
        resizes: Vec<(u32, u32)>,
    }

    impl FrameRenderer for Recording {
        fn render(&mut self, _ctx: &mut RenderContext) {
            self.renders += 1;
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }
    }

    fn start(config: &AppConfig) -> Portfolio<Recording> {
        Portfolio::start(Some(Recording::default()), config, SceneTable::from_config(config))
            .expect("mounted portfolio starts")
    }

    #[test]
    fn no_mount_means_no_side_effects() {
        let built = Rc::new(Cell::new(false));
        let probe = built.clone();
        let table = SceneTable::empty().with(SceneKey::Intro, move |_ctx| {
            probe.set(true);
            Err(crate::error::SceneError::Construction("should not run".into()))
        });

        let started = Portfolio::<Recording>::start(None, &AppConfig::default(), table);
        assert!(started.is_none());
        assert!(!built.get());
    }

    #[test]
    fn start_activates_the_configured_scene() {
        let portfolio = start(&AppConfig::new().start_scene(SceneKey::Room));
        assert_eq!(portfolio.manager().active_name(), Some("Room"));
        assert_eq!(portfolio.ctx().overlays.scene_overlay_count(), 0);
        assert_eq!(portfolio.hud_text(), vec!["Scene: Room", "Lights: Off"]);
        assert_eq!(portfolio.renderer().renders, 0);
    }

    #[test]
    fn digit_keys_switch_scenes_on_the_next_frame() {
        let mut portfolio = start(&AppConfig::new().start_scene(SceneKey::Room));
        portfolio.input_mut().press_key(KeyCode::Digit3);
        portfolio.frame_with_dt(0.016);

        assert_eq!(portfolio.manager().active_key(), Some(SceneKey::Chess));
        assert_eq!(portfolio.hud_text()[0], "Scene: Chessboard");
        assert_eq!(portfolio.renderer().renders, 1);

        // Still held: no second switch.
        portfolio.frame_with_dt(0.016);
        assert_eq!(portfolio.manager().stats().switches, 2);
    }

    #[test]
    fn lights_toggle_shows_in_the_hud() {
        let mut portfolio = start(&AppConfig::new().start_scene(SceneKey::Chess));
        portfolio.input_mut().press_key(KeyCode::KeyL);
        portfolio.frame_with_dt(0.016);

        assert!(portfolio.ctx().flags.lights_on);
        assert_eq!(portfolio.hud_text()[1], "Lights: On");
        assert_eq!(portfolio.manager().stats().switches, 1);
    }

    #[test]
    fn clicking_the_hud_cycles_and_toggles() {
        let mut portfolio = start(&AppConfig::new().start_scene(SceneKey::Room).size(1000, 1000));

        portfolio.input_mut().move_cursor(Vec2::new(50.0, 30.0));
        portfolio.input_mut().press_mouse(MouseButton::Left);
        portfolio.frame_with_dt(0.016);
        assert_eq!(portfolio.manager().active_key(), Some(SceneKey::Chess));

        portfolio.input_mut().release_mouse(MouseButton::Left);
        portfolio.input_mut().move_cursor(Vec2::new(50.0, 80.0));
        portfolio.input_mut().press_mouse(MouseButton::Left);
        portfolio.frame_with_dt(0.016);
        assert!(portfolio.ctx().flags.lights_on);
        assert_eq!(portfolio.manager().active_key(), Some(SceneKey::Chess));
    }

    #[test]
    fn open_resume_keeps_clicks_off_the_hud() {
        let mut portfolio = start(&AppConfig::new().start_scene(SceneKey::Intro).size(1000, 1000));
        portfolio.frame_with_dt(2.0);
        portfolio.input_mut().press_key(KeyCode::Space);
        portfolio.frame_with_dt(7.0);
        portfolio.input_mut().release_key(KeyCode::Space);

        // Same spot as the "Scene" label, now under the resume panel.
        portfolio.input_mut().move_cursor(Vec2::new(50.0, 30.0));
        portfolio.input_mut().press_mouse(MouseButton::Left);
        portfolio.frame_with_dt(0.016);
        assert_eq!(portfolio.manager().active_key(), Some(SceneKey::Intro));
        assert_eq!(portfolio.hud_text()[0], "Scene: Intro → Resume");
    }

    #[test]
    fn resize_reaches_the_renderer_once() {
        let mut portfolio = start(&AppConfig::default());
        assert!(portfolio.resize(1920, 1080, 2.0));
        assert!(!portfolio.resize(1920, 1080, 2.0));
        assert!(!portfolio.resize(0, 0, 2.0));
        assert_eq!(portfolio.renderer().resizes, vec![(1920, 1080)]);
        assert_eq!(portfolio.ctx().settings.device_pixel_ratio, 2.0);
    }

    #[test]
    fn shutdown_releases_the_scene() {
        let mut portfolio = start(&AppConfig::new().start_scene(SceneKey::Walk));
        assert!(portfolio.ctx().resources.live_geometries() > 0);

        portfolio.shutdown();
        assert!(!portfolio.manager().has_active());
        assert_eq!(portfolio.ctx().resources.live_geometries(), 0);
        assert_eq!(portfolio.ctx().resources.live_materials(), 0);
        assert_eq!(portfolio.hud_text()[0], "Scene: none");
        assert_eq!(portfolio.ctx().overlays.len(), 2);
    }
}
