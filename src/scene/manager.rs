//! The scene manager: one active scene at a time, cleanly swapped.

use log::{debug, error, info, warn};

use crate::context::{Baseline, RenderContext};

use super::contract::{ErrorScene, Frame, Scene, SceneTable};
use super::key::SceneKey;

/// Running totals, mostly for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchStats {
    pub switches: u32,
    pub construct_failures: u32,
    pub dispose_failures: u32,
    /// Marker overlays the sweep had to remove because their scene didn't.
    pub swept_overlays: u32,
}

/// Owns the active scene and arbitrates every switch.
///
/// A switch always runs the same straight-line sequence:
///
/// 1. dispose the old scene (a failure is logged, never propagated)
/// 2. reset the render context to the [`Baseline`]
/// 3. sweep leftover marker overlays
/// 4. construct the new scene, or install an [`ErrorScene`] if that fails
///
/// so the new scene never observes anything the old one left behind, and the
/// frame loop never sees an error from a switch.
pub struct SceneManager {
    table: SceneTable,
    baseline: Baseline,
    active_key: Option<SceneKey>,
    active: Option<Box<dyn Scene>>,
    stats: SwitchStats,
}

impl SceneManager {
    pub fn new(table: SceneTable) -> Self {
        Self::with_baseline(table, Baseline::PORTFOLIO)
    }

    pub fn with_baseline(table: SceneTable, baseline: Baseline) -> Self {
        Self {
            table,
            baseline,
            active_key: None,
            active: None,
            stats: SwitchStats::default(),
        }
    }

    /// Key of the scene most recently requested, even if it failed to build.
    pub fn active_key(&self) -> Option<SceneKey> {
        self.active_key
    }

    /// Name of the active scene, or the error sentinel's name.
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref().map(Scene::name)
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn stats(&self) -> SwitchStats {
        self.stats
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Tear down the active scene (if any) and bring up `key` in its place.
    ///
    /// Switching to the already-active key rebuilds it from scratch.
    pub fn set_active_scene(&mut self, key: SceneKey, ctx: &mut RenderContext) {
        info!("switching to {key}");
        self.stats.switches += 1;

        self.dispose_active(ctx);

        ctx.reset_to_baseline(&self.baseline);
        self.sweep_overlays(ctx);

        self.active_key = Some(key);
        match self.table.construct(key, ctx) {
            Ok(scene) => {
                debug!("constructed {}", scene.name());
                self.active = Some(scene);
            }
            Err(err) => {
                error!("creating {key} failed: {err}");
                self.stats.construct_failures += 1;
                self.active = Some(Box::new(ErrorScene));
            }
        }
    }

    /// Advance to the next key in [`SceneKey::CYCLE`].
    ///
    /// Starts from [`SceneKey::Intro`] when nothing has been activated yet.
    pub fn cycle_next(&mut self, ctx: &mut RenderContext) -> SceneKey {
        let next = self.active_key.map_or(SceneKey::Intro, SceneKey::next);
        debug!(
            "cycling from {} to {next}",
            self.active_key.map_or("nothing", SceneKey::as_str)
        );
        self.set_active_scene(next, ctx);
        next
    }

    /// Forward one frame to the active scene.
    pub fn update(&mut self, frame: &mut Frame<'_>) {
        if let Some(scene) = self.active.as_mut() {
            scene.update(frame);
        }
    }

    /// Dispose the active scene and sweep overlays, leaving nothing active.
    pub fn shutdown(&mut self, ctx: &mut RenderContext) {
        self.dispose_active(ctx);
        self.sweep_overlays(ctx);
        self.active_key = None;
    }

    fn dispose_active(&mut self, ctx: &mut RenderContext) {
        let Some(scene) = self.active.take() else {
            return;
        };
        let name = scene.name().to_owned();
        debug!("disposing {name}");
        if let Err(err) = scene.dispose(ctx) {
            error!("disposing {name} failed (continuing): {err}");
            self.stats.dispose_failures += 1;
        }
    }

    fn sweep_overlays(&mut self, ctx: &mut RenderContext) {
        let swept = ctx.overlays.sweep_scene_overlays();
        if swept > 0 {
            warn!("removed {swept} overlay element(s) left behind by the previous scene");
            self.stats.swept_overlays += swept as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::color::Color;
    use crate::context::{Fog, Viewport};
    use crate::error::SceneError;
    use crate::input::Input;
    use crate::overlay::{Layout, OverlayElement, OverlayId};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Construct(u32),
        Update(u32),
        Dispose(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    /// Scene that records its lifecycle and scribbles over the shared globals.
    struct Probe {
        id: u32,
        name: &'static str,
        log: Log,
        overlays: Vec<OverlayId>,
        fail_dispose: bool,
    }

    impl Scene for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn update(&mut self, frame: &mut Frame<'_>) {
            self.log.borrow_mut().push(Event::Update(self.id));
            frame.ctx.fog = Some(Fog {
                color: Color::WHITE,
                near: 0.1,
                far: 2.0,
            });
            frame.ctx.background = Some(Color::hex(0x336699));
            frame.ctx.settings.tone_mapping_exposure = 4.0;
            frame.ctx.camera.position = Vec3::splat(42.0);
            frame.ctx.camera.set_fov_degrees(10.0);
        }

        fn dispose(self: Box<Self>, ctx: &mut RenderContext) -> Result<(), SceneError> {
            self.log.borrow_mut().push(Event::Dispose(self.id));
            if self.fail_dispose {
                return Err(SceneError::Disposal("probe refused".into()));
            }
            for id in self.overlays {
                ctx.overlays.remove(id);
            }
            Ok(())
        }
    }

    struct ProbeFactory {
        log: Log,
        next_id: Rc<RefCell<u32>>,
        baseline_seen: Rc<RefCell<Vec<bool>>>,
    }

    impl ProbeFactory {
        fn new() -> Self {
            Self {
                log: Rc::default(),
                next_id: Rc::default(),
                baseline_seen: Rc::default(),
            }
        }

        fn make(
            &self,
            name: &'static str,
            overlays: usize,
            fail_dispose: bool,
        ) -> impl Fn(&mut RenderContext) -> Result<Box<dyn Scene>, SceneError> + use<> {
            let log = self.log.clone();
            let next_id = self.next_id.clone();
            let baseline_seen = self.baseline_seen.clone();
            move |ctx: &mut RenderContext| {
                baseline_seen.borrow_mut().push(at_baseline(ctx));
                let id = {
                    let mut next = next_id.borrow_mut();
                    *next += 1;
                    *next
                };
                log.borrow_mut().push(Event::Construct(id));
                let overlays = (0..overlays)
                    .map(|_| {
                        ctx.overlays
                            .add(OverlayElement::new(Layout::Fill).scene_overlay())
                    })
                    .collect();
                let scene: Box<dyn Scene> = Box::new(Probe {
                    id,
                    name,
                    log: log.clone(),
                    overlays,
                    fail_dispose,
                });
                Ok(scene)
            }
        }

        fn events(&self) -> Vec<Event> {
            self.log.borrow().clone()
        }
    }

    fn at_baseline(ctx: &RenderContext) -> bool {
        let b = Baseline::PORTFOLIO;
        ctx.fog.is_none()
            && ctx.background.is_none()
            && ctx.settings.clear_color == b.clear_color
            && ctx.settings.tone_mapping_exposure == b.exposure
            && ctx.camera.position == b.camera_position
            && (ctx.camera.fov_degrees() - b.fov_degrees).abs() < 1e-4
    }

    fn ctx() -> RenderContext {
        RenderContext::new(Viewport::new(1280, 720, 1.0), &Baseline::PORTFOLIO)
    }

    fn tick(manager: &mut SceneManager, ctx: &mut RenderContext, dt: f32) {
        let input = Input::new();
        let mut frame = Frame {
            ctx,
            input: &input,
            dt,
            time: 0.0,
        };
        manager.update(&mut frame);
    }

    fn failing(_: &mut RenderContext) -> Result<Box<dyn Scene>, SceneError> {
        Err(SceneError::Construction("boom".into()))
    }

    #[test]
    fn only_one_scene_is_ever_live() {
        let probes = ProbeFactory::new();
        let table = SceneTable::empty()
            .with(SceneKey::Room, probes.make("Room", 0, false))
            .with(SceneKey::Chess, probes.make("Chessboard", 0, false));
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        for key in [SceneKey::Room, SceneKey::Chess, SceneKey::Room] {
            manager.set_active_scene(key, &mut ctx);
        }

        // Every construct but the last is followed by its dispose before the next construct.
        assert_eq!(
            probes.events(),
            vec![
                Event::Construct(1),
                Event::Dispose(1),
                Event::Construct(2),
                Event::Dispose(2),
                Event::Construct(3),
            ]
        );
        assert_eq!(manager.active_name(), Some("Room"));
    }

    #[test]
    fn marked_overlays_are_gone_even_if_dispose_fails() {
        let probes = ProbeFactory::new();
        let table = SceneTable::empty()
            .with(SceneKey::Intro, probes.make("Intro", 3, true))
            .with(SceneKey::Room, probes.make("Room", 0, false));
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();
        let hud = ctx
            .overlays
            .add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.3, 0.05)).text("Scene"));

        manager.set_active_scene(SceneKey::Intro, &mut ctx);
        assert_eq!(ctx.overlays.scene_overlay_count(), 3);

        manager.set_active_scene(SceneKey::Room, &mut ctx);
        assert_eq!(ctx.overlays.scene_overlay_count(), 0);
        assert!(ctx.overlays.get(hud).is_some(), "unmarked overlays survive");
        assert_eq!(manager.stats().dispose_failures, 1);
        assert_eq!(manager.stats().swept_overlays, 3);
        assert_eq!(manager.active_name(), Some("Room"));
    }

    #[test]
    fn factories_always_see_the_baseline() {
        let probes = ProbeFactory::new();
        let table = SceneTable::empty()
            .with(SceneKey::Room, probes.make("Room", 0, false))
            .with(SceneKey::Walk, probes.make("Walk", 0, false));
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        manager.set_active_scene(SceneKey::Room, &mut ctx);
        tick(&mut manager, &mut ctx, 0.016);
        assert!(!at_baseline(&ctx), "probe should have dirtied the context");

        manager.set_active_scene(SceneKey::Walk, &mut ctx);
        tick(&mut manager, &mut ctx, 0.016);
        manager.set_active_scene(SceneKey::Walk, &mut ctx);

        assert_eq!(*probes.baseline_seen.borrow(), vec![true, true, true]);
    }

    #[test]
    fn construction_failure_installs_sentinel_and_recovers() {
        let probes = ProbeFactory::new();
        let table = SceneTable::empty()
            .with(SceneKey::Room, probes.make("Room", 0, false))
            .with(SceneKey::Intro, failing);
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        manager.set_active_scene(SceneKey::Room, &mut ctx);
        manager.set_active_scene(SceneKey::Intro, &mut ctx);

        assert_eq!(manager.active_name(), Some(ErrorScene::NAME));
        assert_eq!(manager.active_key(), Some(SceneKey::Intro));
        assert_eq!(probes.events(), vec![Event::Construct(1), Event::Dispose(1)]);
        assert_eq!(manager.stats().construct_failures, 1);

        // The sentinel updates and disposes quietly.
        tick(&mut manager, &mut ctx, 0.016);
        manager.set_active_scene(SceneKey::Room, &mut ctx);
        assert_eq!(manager.active_name(), Some("Room"));
        assert_eq!(manager.stats().dispose_failures, 0);
    }

    #[test]
    fn missing_factory_is_a_construction_failure() {
        let mut manager = SceneManager::new(SceneTable::empty());
        let mut ctx = ctx();
        manager.set_active_scene(SceneKey::Chess, &mut ctx);
        assert_eq!(manager.active_name(), Some(ErrorScene::NAME));
        assert_eq!(manager.stats().construct_failures, 1);
    }

    #[test]
    fn same_key_switch_builds_a_fresh_instance() {
        let probes = ProbeFactory::new();
        let table = SceneTable::empty().with(SceneKey::Chess, probes.make("Chessboard", 0, false));
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        manager.set_active_scene(SceneKey::Chess, &mut ctx);
        manager.set_active_scene(SceneKey::Chess, &mut ctx);
        tick(&mut manager, &mut ctx, 0.016);

        assert_eq!(
            probes.events(),
            vec![
                Event::Construct(1),
                Event::Dispose(1),
                Event::Construct(2),
                Event::Update(2),
            ]
        );
    }

    #[test]
    fn room_scene_starts_without_overlays() {
        let mut manager = SceneManager::new(SceneTable::portfolio());
        let mut ctx = ctx();
        manager.set_active_scene(SceneKey::Room, &mut ctx);
        assert_eq!(manager.active_name(), Some("Room"));
        assert_eq!(ctx.overlays.scene_overlay_count(), 0);
    }

    #[test]
    fn failing_intro_after_room_disposes_room_first() {
        let table = SceneTable::portfolio().with(SceneKey::Intro, failing);
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        manager.set_active_scene(SceneKey::Room, &mut ctx);
        assert!(ctx.resources.live_geometries() > 0);

        manager.set_active_scene(SceneKey::Intro, &mut ctx);
        assert_eq!(manager.active_name(), Some(ErrorScene::NAME));
        assert_eq!(ctx.world.len(), 0);
        assert_eq!(ctx.resources.live_geometries(), 0);
        assert_eq!(ctx.resources.live_materials(), 0);
    }

    #[test]
    fn broken_intro_dispose_still_reaches_walk_room() {
        let probes = ProbeFactory::new();
        let table = SceneTable::portfolio().with(SceneKey::Intro, probes.make("Intro", 3, true));
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        manager.set_active_scene(SceneKey::Intro, &mut ctx);
        assert_eq!(ctx.overlays.scene_overlay_count(), 3);

        manager.set_active_scene(SceneKey::Walk, &mut ctx);
        assert!(
            manager
                .active_name()
                .is_some_and(|name| name.starts_with("Walk Room"))
        );
        assert_eq!(ctx.overlays.scene_overlay_count(), 0);
    }

    #[test]
    fn built_in_scenes_clean_up_after_themselves() {
        let mut manager = SceneManager::new(SceneTable::portfolio());
        let mut ctx = ctx();

        for key in SceneKey::CYCLE {
            manager.set_active_scene(key, &mut ctx);
            tick(&mut manager, &mut ctx, 0.5);
        }
        manager.shutdown(&mut ctx);

        assert!(!manager.has_active());
        assert_eq!(ctx.world.len(), 0);
        assert_eq!(ctx.resources.live_geometries(), 0);
        assert_eq!(ctx.resources.live_materials(), 0);
        assert!(ctx.overlays.is_empty());
        let stats = manager.stats();
        assert_eq!(stats.dispose_failures, 0);
        assert_eq!(stats.construct_failures, 0);
        assert_eq!(stats.swept_overlays, 0);
    }

    #[test]
    fn cycle_starts_at_intro_and_wraps() {
        let probes = ProbeFactory::new();
        let mut table = SceneTable::empty();
        for key in SceneKey::CYCLE {
            table = table.with(key, probes.make("probe", 0, false));
        }
        let mut manager = SceneManager::new(table);
        let mut ctx = ctx();

        let visited: Vec<_> = (0..5).map(|_| manager.cycle_next(&mut ctx)).collect();
        assert_eq!(
            visited,
            vec![
                SceneKey::Intro,
                SceneKey::Room,
                SceneKey::Chess,
                SceneKey::Walk,
                SceneKey::Intro,
            ]
        );
    }
}
