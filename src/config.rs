//! Engine configuration: participant limits and set score cap.

use crate::logic::MAX_FIELD;
use log::warn;

/// Smallest field a bracket is generated for.
pub const DEFAULT_MIN_PARTICIPANTS: usize = 16;
/// Largest field the round catalog covers (round of 128).
pub const DEFAULT_MAX_PARTICIPANTS: usize = MAX_FIELD;
/// Highest score a side can post in one set.
pub const DEFAULT_MAX_SET_SCORE: u32 = 11;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub min_participants: usize,
    pub max_participants: usize,
    pub max_set_score: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_participants: DEFAULT_MIN_PARTICIPANTS,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            max_set_score: DEFAULT_MAX_SET_SCORE,
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by `BRACKET_MIN_PARTICIPANTS`, `BRACKET_MAX_PARTICIPANTS`
    /// and `BRACKET_MAX_SET_SCORE` when set to valid numbers.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_participants: env_or("BRACKET_MIN_PARTICIPANTS", defaults.min_participants),
            max_participants: env_or("BRACKET_MAX_PARTICIPANTS", defaults.max_participants),
            max_set_score: env_or("BRACKET_MAX_SET_SCORE", defaults.max_set_score),
        }
        .clamped()
    }

    /// Cap `max_participants` at the largest field the round catalog can lay out.
    pub fn clamped(mut self) -> Self {
        if self.max_participants > MAX_FIELD {
            warn!(
                "Ignoring max_participants={}: brackets hold at most {} participants",
                self.max_participants, MAX_FIELD
            );
            self.max_participants = MAX_FIELD;
        }
        self
    }
}

fn env_or<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            default
        }),
        Err(_) => default,
    }
}
