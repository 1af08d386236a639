//! The built-in portfolio scenes.
//!
//! Each one builds its content through a [`SceneGroup`](crate::scene::SceneGroup)
//! and hands that group back on dispose, so switching away leaves nothing
//! behind in the shared world.

mod chess;
mod intro_resume;
mod resume;
mod room;
mod walk_room;

pub use chess::ChessScene;
pub use intro_resume::{IntroResumeScene, IntroState};
pub use resume::ResumeTab;
pub use room::RoomScene;
pub use walk_room::{WalkRoomScene, clamp_to_room};
