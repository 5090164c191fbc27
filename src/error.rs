//! Error types
//!
//! Nothing here is fatal to a running game: every variant has a playable
//! fallback (default orientation, tap mode, default tuning) or is dropped.

use std::fmt;

use crate::sim::{Intent, Phase};

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Device rotation angle outside {0, 90, 180, 270, -90}
    UnsupportedOrientation(i32),
    /// The user declined motion access
    PermissionDenied,
    /// The motion permission request itself failed
    PermissionError(String),
    /// An intent arrived in a phase that does not accept it
    InvalidGestureInPhase { intent: Intent, phase: Phase },
    /// A bite timer fired that is no longer pending
    StaleTimer,
    /// Tuning JSON could not be parsed or has out-of-range values
    InvalidTuning(String),
    /// Host setup failed (no window, insecure context, no GPU, ...)
    Platform(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOrientation(angle) => {
                write!(f, "unsupported orientation angle {angle}°")
            }
            Self::PermissionDenied => write!(f, "motion permission denied"),
            Self::PermissionError(detail) => write!(f, "motion permission error: {detail}"),
            Self::InvalidGestureInPhase { intent, phase } => {
                write!(f, "{intent:?} ignored while {phase:?}")
            }
            Self::StaleTimer => write!(f, "stale bite timer"),
            Self::InvalidTuning(msg) => write!(f, "invalid tuning: {msg}"),
            Self::Platform(msg) => write!(f, "platform: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidTuning(e.to_string())
    }
}
