//! Scene lifecycle for the portfolio.
//!
//! A scene is one self-contained interactive mode: it builds entities into
//! the shared [`RenderContext`](crate::RenderContext), animates them every
//! frame, and removes them again when it's switched away from. Exactly one
//! scene is alive at a time; the [`SceneManager`] enforces that and makes
//! sure nothing one scene leaves behind is visible to the next.
//!
//! # Example
//!
//! ```
//! use folio::scene::{SceneKey, SceneManager, SceneTable};
//! use folio::{Baseline, RenderContext, Viewport};
//!
//! let mut ctx = RenderContext::new(Viewport::new(1280, 720, 1.0), &Baseline::PORTFOLIO);
//! let mut manager = SceneManager::new(SceneTable::portfolio());
//!
//! manager.set_active_scene(SceneKey::Chess, &mut ctx);
//! assert_eq!(manager.active_name(), Some("Chessboard"));
//!
//! manager.cycle_next(&mut ctx);
//! assert_eq!(manager.active_key(), Some(SceneKey::Walk));
//! ```

mod contract;
mod group;
mod key;
mod manager;

pub use contract::{ErrorScene, Frame, Scene, SceneFactory, SceneTable};
pub use group::SceneGroup;
pub use key::{ParseSceneKeyError, SceneKey};
pub use manager::{SceneManager, SwitchStats};
