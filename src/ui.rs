//! Player-facing status text

use std::fmt;

/// Message shown in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    /// Motion controls are live
    FlickToCast,
    /// Tap mode (no motion API)
    TapToCast,
    /// Waiting for the user to allow motion access
    EnableMotion,
    MotionDenied,
    MotionError,
    Waiting,
    PullBack,
    Caught { score: u64, tap_mode: bool },
    GotAway,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlickToCast => write!(f, "🎣 Flick to cast"),
            Self::TapToCast => write!(f, "✋ Tap to cast"),
            Self::EnableMotion => write!(f, "📱 Enable motion controls to play"),
            Self::MotionDenied => write!(f, "🚫 Motion denied – tap to play"),
            Self::MotionError => write!(f, "⚠️ Motion error – tap to play"),
            Self::Waiting => write!(f, "🎣 Waiting…"),
            Self::PullBack => write!(f, "🐟 Pull back!"),
            Self::Caught { score, tap_mode } => {
                let verb = if *tap_mode { "tap" } else { "flick" };
                write!(f, "✅ Caught! Fish: {score} – {verb} again")
            }
            Self::GotAway => write!(f, "❌ It got away – try again"),
        }
    }
}
