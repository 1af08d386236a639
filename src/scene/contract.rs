//! What a scene is, and how one gets built.

use std::collections::BTreeMap;

use crate::config::AppConfig;
use crate::context::RenderContext;
use crate::error::SceneError;
use crate::input::Input;
use crate::scenes;

use super::key::SceneKey;

/// Per-frame data handed to [`Scene::update`].
pub struct Frame<'a> {
    pub ctx: &'a mut RenderContext,
    pub input: &'a Input,
    /// Seconds since the previous frame. Never negative.
    pub dt: f32,
    /// Seconds since the frame driver started.
    pub time: f32,
}

/// A self-contained piece of content living in the shared render context.
///
/// A scene is built by its factory, updated once per frame while active, and
/// disposed exactly once when the manager switches away. `dispose` takes the
/// box by value, so a disposed scene can't be touched again.
pub trait Scene {
    /// Label shown in the HUD.
    fn name(&self) -> &str;

    fn update(&mut self, frame: &mut Frame<'_>);

    /// Remove every entity, resource and overlay element this scene created,
    /// and undo any renderer setting it overrode.
    fn dispose(self: Box<Self>, ctx: &mut RenderContext) -> Result<(), SceneError>;
}

/// Builds a scene into the shared context.
pub type SceneFactory = Box<dyn Fn(&mut RenderContext) -> Result<Box<dyn Scene>, SceneError>>;

/// Maps every [`SceneKey`] to the factory that builds it.
#[derive(Default)]
pub struct SceneTable {
    factories: BTreeMap<SceneKey, SceneFactory>,
}

impl SceneTable {
    /// A table with no factories at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The four built-in scenes with default settings.
    pub fn portfolio() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// The four built-in scenes, with config-driven details filled in.
    pub fn from_config(config: &AppConfig) -> Self {
        let resume_pdf = config.resume_pdf.clone();
        Self::empty()
            .with(SceneKey::Intro, move |ctx| {
                scenes::IntroResumeScene::new(ctx, resume_pdf.clone()).map(boxed)
            })
            .with(SceneKey::Room, |ctx| scenes::RoomScene::new(ctx).map(boxed))
            .with(SceneKey::Chess, |ctx| scenes::ChessScene::new(ctx).map(boxed))
            .with(SceneKey::Walk, |ctx| scenes::WalkRoomScene::new(ctx).map(boxed))
    }

    /// Register (or replace) the factory for `key`.
    pub fn with<F>(mut self, key: SceneKey, factory: F) -> Self
    where
        F: Fn(&mut RenderContext) -> Result<Box<dyn Scene>, SceneError> + 'static,
    {
        self.factories.insert(key, Box::new(factory));
        self
    }

    pub fn contains(&self, key: SceneKey) -> bool {
        self.factories.contains_key(&key)
    }

    /// Run the factory for `key`.
    ///
    /// A key without a factory fails with [`SceneError::UnknownKey`], which
    /// the manager handles like any other construction failure.
    pub fn construct(
        &self,
        key: SceneKey,
        ctx: &mut RenderContext,
    ) -> Result<Box<dyn Scene>, SceneError> {
        let factory = self
            .factories
            .get(&key)
            .ok_or(SceneError::UnknownKey(key))?;
        factory(ctx)
    }
}

fn boxed<S: Scene + 'static>(scene: S) -> Box<dyn Scene> {
    Box::new(scene)
}

/// Stand-in installed when a factory fails, so the frame loop keeps going.
#[derive(Debug, Default)]
pub struct ErrorScene;

impl ErrorScene {
    pub const NAME: &'static str = "ERROR (see console)";
}

impl Scene for ErrorScene {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn update(&mut self, _frame: &mut Frame<'_>) {}

    fn dispose(self: Box<Self>, _ctx: &mut RenderContext) -> Result<(), SceneError> {
        Ok(())
    }
}
