use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Identifies one of the built-in scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum SceneKey {
    Intro,
    Room,
    Chess,
    Walk,
}

impl SceneKey {
    /// Order used by the cycle control.
    pub const CYCLE: [SceneKey; 4] = [
        SceneKey::Intro,
        SceneKey::Room,
        SceneKey::Chess,
        SceneKey::Walk,
    ];

    /// The key after this one in [`SceneKey::CYCLE`], wrapping around.
    pub fn next(self) -> SceneKey {
        let index = Self::CYCLE.iter().position(|k| *k == self).unwrap_or(0);
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SceneKey::Intro => "INTRO",
            SceneKey::Room => "ROOM",
            SceneKey::Chess => "CHESS",
            SceneKey::Walk => "WALK",
        }
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scene key `{0}` (expected one of INTRO, ROOM, CHESS, WALK)")]
pub struct ParseSceneKeyError(pub String);

impl FromStr for SceneKey {
    type Err = ParseSceneKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKey::CYCLE
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSceneKeyError(s.to_owned()))
    }
}

impl TryFrom<String> for SceneKey {
    type Error = ParseSceneKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around() {
        assert_eq!(SceneKey::Intro.next(), SceneKey::Room);
        assert_eq!(SceneKey::Chess.next(), SceneKey::Walk);
        assert_eq!(SceneKey::Walk.next(), SceneKey::Intro);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("chess".parse(), Ok(SceneKey::Chess));
        assert_eq!("WALK".parse(), Ok(SceneKey::Walk));
        assert_eq!(" Intro ".parse(), Ok(SceneKey::Intro));
        assert_eq!(
            "ATTIC".parse::<SceneKey>(),
            Err(ParseSceneKeyError("ATTIC".to_owned()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for key in SceneKey::CYCLE {
            assert_eq!(key.to_string().parse(), Ok(key));
        }
    }
}
