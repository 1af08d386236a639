//! Keyboard controls for switching scenes and toggling the lights.

use log::info;
use winit::keyboard::KeyCode;

use crate::context::RenderContext;
use crate::input::Input;
use crate::scene::{SceneKey, SceneManager};

/// What a key press asks the shell to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchAction {
    Activate(SceneKey),
    /// Advance to the next scene in [`SceneKey::CYCLE`].
    Cycle,
    ToggleLights,
}

impl SwitchAction {
    /// Carry the action out. Returns the key that became active, if any.
    pub fn apply(self, manager: &mut SceneManager, ctx: &mut RenderContext) -> Option<SceneKey> {
        match self {
            SwitchAction::Activate(key) => {
                manager.set_active_scene(key, ctx);
                Some(key)
            }
            SwitchAction::Cycle => Some(manager.cycle_next(ctx)),
            SwitchAction::ToggleLights => {
                ctx.flags.lights_on = !ctx.flags.lights_on;
                info!(
                    "lights {}",
                    if ctx.flags.lights_on { "on" } else { "off" }
                );
                None
            }
        }
    }
}

/// Which keys do what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchBindings {
    pub scenes: Vec<(KeyCode, SceneKey)>,
    pub cycle: KeyCode,
    pub toggle_lights: KeyCode,
}

impl Default for SwitchBindings {
    fn default() -> Self {
        Self {
            scenes: vec![
                (KeyCode::Digit1, SceneKey::Intro),
                (KeyCode::Digit2, SceneKey::Room),
                (KeyCode::Digit3, SceneKey::Chess),
                (KeyCode::Digit4, SceneKey::Walk),
            ],
            cycle: KeyCode::Tab,
            toggle_lights: KeyCode::KeyL,
        }
    }
}

impl SwitchBindings {
    /// The action for this frame's key presses, if any.
    ///
    /// Only fresh presses count, so holding a key switches once. When several
    /// bound keys go down in the same frame, direct scene keys win over the
    /// cycle key, which wins over the lights toggle.
    pub fn resolve(&self, input: &Input) -> Option<SwitchAction> {
        if let Some((_, key)) = self.scenes.iter().find(|(code, _)| input.key_pressed(*code)) {
            return Some(SwitchAction::Activate(*key));
        }
        if input.key_pressed(self.cycle) {
            return Some(SwitchAction::Cycle);
        }
        if input.key_pressed(self.toggle_lights) {
            return Some(SwitchAction::ToggleLights);
        }
        None
    }
}
