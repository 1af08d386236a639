//! The landing scene: a dark room with a sleeping monitor that boots into
//! a resume browser.
//!
//! The sequence runs through four states:
//!
//! - **Asleep**: the blackout overlay fades away.
//! - **Ready**: a prompt asks for any key or click.
//! - **Booting**: the camera pushes in on the monitor, the field of view
//!   narrows, the power LED blinks red a few times and settles on green.
//! - **Resume**: the resume browser covers the view. Left/Right or a click
//!   switches tabs; Escape closes it.

use std::path::PathBuf;

use glam::Vec3;
use hecs::Entity;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::color::Color;
use crate::context::RenderContext;
use crate::ecs::{Light, RenderMesh, Transform};
use crate::error::SceneError;
use crate::input::Input;
use crate::overlay::{Background, Layout, OverlayElement, OverlayId};
use crate::resources::{Geometry, Material, MaterialId, Side};
use crate::scene::{Frame, Scene, SceneGroup};

use super::resume::ResumeTab;

const FADE_SECONDS: f32 = 1.4;
const ZOOM_SECONDS: f32 = 6.5;
const START_FOV: f32 = 55.0;
const FOV_NARROWING: f32 = 23.0;
const MAX_PIXEL_RATIO: f32 = 1.2;

const START_POSITION: Vec3 = Vec3::new(-0.18, 1.25, 0.55);
const END_POSITION: Vec3 = Vec3::new(0.12, 1.18, -0.15);
const LOOK_TARGET: Vec3 = Vec3::new(0.12, 1.18, -0.72);

const LED_POSITION: Vec3 = Vec3::new(0.86, 0.78, -0.70);
const LED_OFF: Color = Color::hex(0x111111);
const LED_RED: Color = Color::hex(0xff3b3b);
const LED_GREEN: Color = Color::hex(0x2cff6a);

const SCREEN_WAKING: Color = Color::hex(0x141a22);
const SCREEN_ON: Color = Color::hex(0x1a2230);
const SCREEN_FINAL_GLOW: f32 = 1.05;

const VIGNETTE_BASE: f32 = 0.65;
const VIGNETTE_DEEPEN: f32 = 0.20;

const OVERLAY_Z: i32 = 9998;

const TAB_ACTIVE_BG: Color = Color::rgba(90.0 / 255.0, 170.0 / 255.0, 1.0, 0.12);
const TAB_IDLE_BG: Color = Color::rgba(0.0, 0.0, 0.0, 0.22);
const TAB_ACTIVE_TEXT: Color = Color::rgba(1.0, 1.0, 1.0, 0.92);
const TAB_IDLE_TEXT: Color = Color::rgba(1.0, 1.0, 1.0, 0.70);

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroState {
    Asleep,
    Ready,
    Booting,
    Resume,
}

/// One step of the power LED's boot cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LedStep {
    on: bool,
    color: Color,
    seconds: f32,
}

/// Three red blinks with wide gaps, then green for good.
const LED_SEQUENCE: [LedStep; 7] = [
    LedStep { on: true, color: LED_RED, seconds: 0.35 },
    LedStep { on: false, color: LED_OFF, seconds: 0.85 },
    LedStep { on: true, color: LED_RED, seconds: 0.35 },
    LedStep { on: false, color: LED_OFF, seconds: 0.85 },
    LedStep { on: true, color: LED_RED, seconds: 0.35 },
    LedStep { on: false, color: LED_OFF, seconds: 0.70 },
    LedStep { on: true, color: LED_GREEN, seconds: f32::INFINITY },
];

/// Walks [`LED_SEQUENCE`]; the last step holds forever.
#[derive(Clone, Copy, Debug, Default)]
struct LedCadence {
    step: usize,
    elapsed: f32,
}

impl LedCadence {
    /// Advance by `dt` and return the step the LED should show this frame.
    ///
    /// Moves at most one step per call, like a frame-driven blinker does.
    fn tick(&mut self, dt: f32) -> LedStep {
        let current = LED_SEQUENCE[self.step];
        self.elapsed += dt;
        if self.elapsed >= current.seconds && self.step < LED_SEQUENCE.len() - 1 {
            self.elapsed = 0.0;
            self.step += 1;
        }
        current
    }
}

/// Overlay handles for the resume browser.
struct ResumeBrowser {
    panel: OverlayId,
    tab_bar: OverlayId,
    tabs: Vec<(ResumeTab, OverlayId)>,
    body: OverlayId,
    active: ResumeTab,
    open: bool,
    resume_pdf: Option<PathBuf>,
}

impl ResumeBrowser {
    fn new(group: &mut SceneGroup, ctx: &mut RenderContext, resume_pdf: Option<PathBuf>) -> Self {
        let panel = group.overlay(
            ctx,
            OverlayElement::new(Layout::Fill)
                .background(Color::hex(0x06070b))
                .z(OVERLAY_Z + 3)
                .blocking()
                .hidden()
                .scene_overlay(),
        );
        let tab_bar = group.overlay(
            ctx,
            OverlayElement::new(Layout::rect(0.04, 0.05, 0.92, 0.08))
                .background(Color::rgba(1.0, 1.0, 1.0, 0.035))
                .z(OVERLAY_Z + 4)
                .blocking()
                .hidden()
                .scene_overlay(),
        );
        let tabs = ResumeTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let id = group.overlay(
                    ctx,
                    OverlayElement::new(Layout::rect(0.055 + i as f32 * 0.125, 0.065, 0.115, 0.05))
                        .text(tab.title())
                        .font_size(13.0)
                        .centered()
                        .z(OVERLAY_Z + 5)
                        .interactive()
                        .hidden()
                        .scene_overlay(),
                );
                (*tab, id)
            })
            .collect();
        let body = group.overlay(
            ctx,
            OverlayElement::new(Layout::rect(0.04, 0.16, 0.92, 0.78))
                .background(Color::rgba(1.0, 1.0, 1.0, 0.035))
                .text_color(Color::rgba(1.0, 1.0, 1.0, 0.85))
                .font_size(15.0)
                .z(OVERLAY_Z + 4)
                .blocking()
                .hidden()
                .scene_overlay(),
        );

        Self {
            panel,
            tab_bar,
            tabs,
            body,
            active: ResumeTab::About,
            open: false,
            resume_pdf,
        }
    }

    fn ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        [self.panel, self.tab_bar, self.body]
            .into_iter()
            .chain(self.tabs.iter().map(|(_, id)| *id))
    }

    fn set_open(&mut self, ctx: &mut RenderContext, open: bool) {
        self.open = open;
        for id in self.ids() {
            if let Some(element) = ctx.overlays.get_mut(id) {
                element.visible = open;
            }
        }
    }

    fn show(&mut self, ctx: &mut RenderContext, tab: ResumeTab) {
        self.active = tab;
        for (candidate, id) in &self.tabs {
            if let Some(element) = ctx.overlays.get_mut(*id) {
                let active = *candidate == tab;
                element.background = Background::Solid(if active {
                    TAB_ACTIVE_BG
                } else {
                    TAB_IDLE_BG
                });
                element.text_color = if active { TAB_ACTIVE_TEXT } else { TAB_IDLE_TEXT };
            }
        }
        let mut text = tab.body(self.resume_pdf.as_deref());
        text.push_str("\n\n\nLeft/Right: switch tabs    Esc: close");
        if let Some(body) = ctx.overlays.get_mut(self.body) {
            body.set_text(&text);
        }
    }

    fn handle_input(&mut self, ctx: &mut RenderContext, input: &Input) {
        if !self.open {
            return;
        }
        if input.key_pressed(KeyCode::Escape) {
            self.set_open(ctx, false);
            return;
        }
        if input.key_pressed(KeyCode::ArrowRight) {
            self.show(ctx, self.active.next());
        } else if input.key_pressed(KeyCode::ArrowLeft) {
            self.show(ctx, self.active.previous());
        }
        if input.mouse_pressed(MouseButton::Left) {
            let hit = ctx
                .overlays
                .hit_test(input.mouse_position(), ctx.viewport.size());
            let clicked = self
                .tabs
                .iter()
                .find(|(_, id)| Some(*id) == hit)
                .map(|(tab, _)| *tab);
            if let Some(tab) = clicked {
                self.show(ctx, tab);
            }
        }
    }
}

/// Intro sequence that ends in the resume browser.
pub struct IntroResumeScene {
    group: SceneGroup,
    state: IntroState,
    time: f32,
    fade: f32,
    zoom: f32,
    led: Entity,
    led_material: MaterialId,
    led_cadence: LedCadence,
    screen_material: MaterialId,
    blackout: OverlayId,
    vignette: OverlayId,
    prompt: OverlayId,
    browser: ResumeBrowser,
    previous_pixel_ratio: f32,
    previous_exposure: f32,
}

impl IntroResumeScene {
    pub const NAME: &'static str = "Intro → Resume";

    pub fn new(ctx: &mut RenderContext, resume_pdf: Option<PathBuf>) -> Result<Self, SceneError> {
        let previous_pixel_ratio = ctx.settings.pixel_ratio;
        let previous_exposure = ctx.settings.tone_mapping_exposure;
        ctx.settings.pixel_ratio = ctx.settings.device_pixel_ratio.min(MAX_PIXEL_RATIO);

        let mut group = SceneGroup::new("intro_resume");

        let blackout = group.overlay(
            ctx,
            OverlayElement::new(Layout::Fill)
                .background(Color::BLACK)
                .z(OVERLAY_Z + 1)
                .scene_overlay(),
        );
        let vignette = group.overlay(
            ctx,
            OverlayElement::new(Layout::Fill)
                .vignette(Color::rgba(0.0, 0.0, 0.0, 0.85))
                .opacity(VIGNETTE_BASE)
                .z(OVERLAY_Z)
                .scene_overlay(),
        );
        let prompt = group.overlay(
            ctx,
            OverlayElement::new(Layout::rect(0.0, 0.45, 1.0, 0.1))
                .text("Press any key to wake the screen")
                .text_color(Color::rgba(1.0, 1.0, 1.0, 0.78))
                .font_size(18.0)
                .centered()
                .opacity(0.0)
                .z(OVERLAY_Z + 2)
                .scene_overlay(),
        );
        let mut browser = ResumeBrowser::new(&mut group, ctx, resume_pdf);
        browser.show(ctx, ResumeTab::About);

        group.mesh(
            ctx,
            Geometry::cuboid(8.0, 4.0, 8.0),
            Material::standard(Color::hex(0x070a12), 0.98, 0.0).side(Side::Back),
            Transform::from_position(Vec3::new(0.0, 1.6, 0.0)),
        );
        group.mesh(
            ctx,
            Geometry::cuboid(2.6, 0.12, 1.2),
            Material::standard(Color::hex(0x0a1020), 0.9, 0.05),
            Transform::from_position(Vec3::new(0.1, 0.72, -0.1)),
        );
        group.mesh(
            ctx,
            Geometry::cuboid(1.75, 1.05, 0.09),
            Material::standard(Color::hex(0x05060a), 0.65, 0.22),
            Transform::from_position(Vec3::new(0.12, 1.18, -0.75)),
        );

        let screen_material = group.material(
            ctx,
            Material::standard(Color::hex(0x05060a), 0.35, 0.0).emissive(Color::BLACK, 0.0),
        );
        let screen = group.geometry(ctx, Geometry::plane(1.52, 0.86));
        group.spawn_mesh(
            ctx,
            screen,
            screen_material,
            Transform::from_position(Vec3::new(0.12, 1.18, -0.70)),
        );

        let led_material = group.material(ctx, Material::basic(LED_RED));
        let led_geometry = group.geometry(ctx, Geometry::sphere(0.012, 10, 10));
        let led = group.spawn_mesh(
            ctx,
            led_geometry,
            led_material,
            Transform::from_position(LED_POSITION),
        );

        group.light(
            ctx,
            Light::Ambient {
                color: Color::WHITE,
                intensity: 0.06,
            },
            Transform::new(),
        );
        group.light(
            ctx,
            Light::Directional {
                color: Color::hex(0x9db7ff),
                intensity: 0.12,
            },
            Transform::from_position(Vec3::new(-2.5, 3.2, 2.0)),
        );

        ctx.camera.set_fov_degrees(START_FOV);
        ctx.camera.position = START_POSITION;
        ctx.camera.look_at(LOOK_TARGET);

        Ok(Self {
            group,
            state: IntroState::Asleep,
            time: 0.0,
            fade: 0.0,
            zoom: 0.0,
            led,
            led_material,
            led_cadence: LedCadence::default(),
            screen_material,
            blackout,
            vignette,
            prompt,
            browser,
            previous_pixel_ratio,
            previous_exposure,
        })
    }

    pub fn state(&self) -> IntroState {
        self.state
    }

    pub fn active_tab(&self) -> ResumeTab {
        self.browser.active
    }

    pub fn is_resume_open(&self) -> bool {
        self.browser.open
    }

    fn set_opacity(ctx: &mut RenderContext, id: OverlayId, opacity: f32) {
        if let Some(element) = ctx.overlays.get_mut(id) {
            element.opacity = opacity;
        }
    }

    fn set_screen(&self, ctx: &mut RenderContext, emissive: Color, intensity: f32) {
        if let Some(material) = ctx.resources.material_mut(self.screen_material) {
            material.emissive = emissive;
            material.emissive_intensity = intensity;
        }
    }

    fn set_led(&self, ctx: &mut RenderContext, on: bool, color: Color) {
        if let Ok(mut mesh) = ctx.world.get::<&mut RenderMesh>(self.led) {
            mesh.visible = on;
        }
        if let Some(material) = ctx.resources.material_mut(self.led_material) {
            material.color = color;
        }
    }

    /// Idle camera: a tiny breathing sway around the start position.
    fn idle_camera(&self, ctx: &mut RenderContext) {
        let breathe = (self.time * 0.9).sin() * 0.0025;
        let sway = (self.time * 0.35).sin() * 0.003;
        ctx.camera.position = START_POSITION + Vec3::new(sway, breathe, 0.0);
        ctx.camera.look_at(LOOK_TARGET);
    }

    fn pulse_led(&self, ctx: &mut RenderContext) {
        let p = 0.55 + ((self.time * 2.1).sin() * 0.5 + 0.5) * 0.45;
        if let Ok(mut transform) = ctx.world.get::<&mut Transform>(self.led) {
            transform.scale = Vec3::splat(0.75 + p * 0.25);
        }
    }
}

impl Scene for IntroResumeScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, frame: &mut Frame<'_>) {
        let dt = frame.dt;
        let ctx = &mut *frame.ctx;
        let input = frame.input;
        self.time += dt;
        self.pulse_led(ctx);

        // Presses only count if the prompt was already up when they happened.
        let activate = self.state == IntroState::Ready
            && (input.any_key_pressed() || input.any_mouse_pressed());

        if self.state == IntroState::Asleep {
            self.fade = (self.fade + dt / FADE_SECONDS).clamp(0.0, 1.0);
            Self::set_opacity(ctx, self.blackout, 1.0 - smoothstep(self.fade));
            self.idle_camera(ctx);

            if self.fade >= 1.0 {
                log::debug!("intro: ready");
                self.state = IntroState::Ready;
                Self::set_opacity(ctx, self.prompt, 1.0);
            }
        }

        if self.state == IntroState::Ready {
            self.idle_camera(ctx);

            if activate {
                log::debug!("intro: booting");
                self.state = IntroState::Booting;
                Self::set_opacity(ctx, self.prompt, 0.0);
                self.set_screen(ctx, SCREEN_WAKING, 0.55);
                self.zoom = 0.0;
                self.led_cadence = LedCadence::default();
                self.set_led(ctx, true, LED_RED);
            }
        }

        if self.state == IntroState::Booting {
            self.zoom = (self.zoom + dt / ZOOM_SECONDS).clamp(0.0, 1.0);
            let t = smoothstep(self.zoom);

            ctx.camera.position = START_POSITION.lerp(END_POSITION, t);
            ctx.camera.set_fov_degrees(START_FOV - t * FOV_NARROWING);
            ctx.camera.look_at(LOOK_TARGET);
            Self::set_opacity(ctx, self.vignette, VIGNETTE_BASE + t * VIGNETTE_DEEPEN);

            let step = self.led_cadence.tick(dt);
            self.set_led(ctx, step.on, step.color);
            self.set_screen(ctx, SCREEN_ON, 0.55 + t * 0.55);

            if self.zoom >= 1.0 {
                log::debug!("intro: showing resume");
                self.state = IntroState::Resume;
                self.set_led(ctx, true, LED_GREEN);
                self.set_screen(ctx, SCREEN_ON, SCREEN_FINAL_GLOW);
                self.browser.set_open(ctx, true);
                self.browser.show(ctx, ResumeTab::About);
                // The opening press shouldn't also count as a tab action.
                return;
            }
        }

        if self.state == IntroState::Resume {
            ctx.camera.look_at(LOOK_TARGET);
            self.browser.handle_input(ctx, input);
        }
    }

    fn dispose(self: Box<Self>, ctx: &mut RenderContext) -> Result<(), SceneError> {
        ctx.settings.pixel_ratio = self.previous_pixel_ratio;
        ctx.settings.tone_mapping_exposure = self.previous_exposure;
        self.group.dispose(ctx)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::context::{Baseline, Viewport};

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(1000, 800, 2.0), &Baseline::PORTFOLIO)
    }

    fn step(intro: &mut IntroResumeScene, ctx: &mut RenderContext, input: &Input, dt: f32) {
        let mut frame = Frame {
            ctx,
            input,
            dt,
            time: 0.0,
        };
        intro.update(&mut frame);
    }

    fn run_to_resume(intro: &mut IntroResumeScene, ctx: &mut RenderContext) {
        let idle = Input::new();
        step(intro, ctx, &idle, FADE_SECONDS);
        let mut press = Input::new();
        press.press_key(KeyCode::Enter);
        step(intro, ctx, &press, 0.0);
        for _ in 0..70 {
            step(intro, ctx, &idle, 0.1);
        }
        assert_eq!(intro.state(), IntroState::Resume);
    }

    #[test]
    fn led_blinks_red_then_stays_green() {
        let mut cadence = LedCadence::default();
        let mut seen = Vec::new();
        for _ in 0..400 {
            let step = cadence.tick(0.01);
            if seen.last() != Some(&(step.on, step.color)) {
                seen.push((step.on, step.color));
            }
        }
        assert_eq!(
            seen,
            vec![
                (true, LED_RED),
                (false, LED_OFF),
                (true, LED_RED),
                (false, LED_OFF),
                (true, LED_RED),
                (false, LED_OFF),
                (true, LED_GREEN),
            ]
        );
    }

    #[test]
    fn fades_in_then_waits_for_a_press() {
        let mut ctx = ctx();
        let mut intro = IntroResumeScene::new(&mut ctx, None).unwrap();
        let mut press = Input::new();
        press.press_key(KeyCode::KeyX);

        // A press while still asleep is ignored.
        step(&mut intro, &mut ctx, &press, 0.7);
        assert_eq!(intro.state(), IntroState::Asleep);
        let blackout = ctx.overlays.get(intro.blackout).unwrap().opacity;
        assert!(blackout > 0.0 && blackout < 1.0);

        step(&mut intro, &mut ctx, &Input::new(), 1.0);
        assert_eq!(intro.state(), IntroState::Ready);
        assert_eq!(ctx.overlays.get(intro.blackout).unwrap().opacity, 0.0);
        assert_eq!(ctx.overlays.get(intro.prompt).unwrap().opacity, 1.0);

        step(&mut intro, &mut ctx, &press, 0.016);
        assert_eq!(intro.state(), IntroState::Booting);
        assert_eq!(ctx.overlays.get(intro.prompt).unwrap().opacity, 0.0);
    }

    #[test]
    fn boot_ends_zoomed_in_with_the_resume_open() {
        let mut ctx = ctx();
        let mut intro = IntroResumeScene::new(&mut ctx, None).unwrap();
        run_to_resume(&mut intro, &mut ctx);

        assert!((ctx.camera.position - END_POSITION).length() < 1e-5);
        assert!((ctx.camera.fov_degrees() - 32.0).abs() < 1e-3);
        let vignette = ctx.overlays.get(intro.vignette).unwrap().opacity;
        assert!((vignette - 0.85).abs() < 1e-5);

        let screen = ctx.resources.material(intro.screen_material).unwrap();
        assert_eq!(screen.emissive_intensity, SCREEN_FINAL_GLOW);
        let led = ctx.resources.material(intro.led_material).unwrap();
        assert_eq!(led.color, LED_GREEN);

        assert!(intro.is_resume_open());
        assert_eq!(intro.active_tab(), ResumeTab::About);
        assert!(ctx.overlays.get(intro.browser.panel).unwrap().visible);
    }

    #[test]
    fn resume_tabs_follow_keys_and_clicks() {
        let mut ctx = ctx();
        let mut intro = IntroResumeScene::new(&mut ctx, Some(PathBuf::from("cv.pdf"))).unwrap();
        run_to_resume(&mut intro, &mut ctx);

        let mut input = Input::new();
        input.press_key(KeyCode::ArrowLeft);
        step(&mut intro, &mut ctx, &input, 0.016);
        assert_eq!(intro.active_tab(), ResumeTab::Resume);
        let body = ctx.overlays.get(intro.browser.body).unwrap();
        assert!(body.lines.iter().any(|line| line.contains("cv.pdf")));

        // Click in the middle of the "Skills" tab.
        let (_, skills) = intro.browser.tabs[ResumeTab::Skills.index()];
        let rect = ctx.overlays.get(skills).unwrap().layout.resolve(ctx.viewport.size());
        let mut input = Input::new();
        input.move_cursor(Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0));
        input.press_mouse(MouseButton::Left);
        step(&mut intro, &mut ctx, &input, 0.016);
        assert_eq!(intro.active_tab(), ResumeTab::Skills);

        let mut input = Input::new();
        input.press_key(KeyCode::Escape);
        step(&mut intro, &mut ctx, &input, 0.016);
        assert!(!intro.is_resume_open());
        assert!(!ctx.overlays.get(intro.browser.panel).unwrap().visible);
    }

    #[test]
    fn dispose_restores_renderer_settings_and_overlays() {
        let mut ctx = ctx();
        ctx.settings.tone_mapping_exposure = 1.3;
        let before_ratio = ctx.settings.pixel_ratio;
        assert_eq!(before_ratio, 1.5);

        let intro = IntroResumeScene::new(&mut ctx, None).unwrap();
        assert_eq!(ctx.settings.pixel_ratio, MAX_PIXEL_RATIO);
        assert!(ctx.overlays.scene_overlay_count() >= 5);
        ctx.settings.tone_mapping_exposure = 0.4;

        Box::new(intro).dispose(&mut ctx).unwrap();
        assert_eq!(ctx.settings.pixel_ratio, before_ratio);
        assert_eq!(ctx.settings.tone_mapping_exposure, 1.3);
        assert!(ctx.overlays.is_empty());
        assert_eq!(ctx.world.len(), 0);
        assert_eq!(ctx.resources.live_materials(), 0);
    }
}
