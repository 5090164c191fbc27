//! Flick Fish - a motion-controlled fishing mini-game
//!
//! Core modules:
//! - `sim`: Deterministic game core (orientation, gestures, state machine)
//! - `input`: Motion/tap input source selection
//! - `frame_loop`: Render loop that only runs while a round is in progress
//! - `game`: Event dispatcher tying the core to a host
//! - `platform`: Host capabilities (browser and headless)
//! - `renderer`: WebGPU scene rendering
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod frame_loop;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::GameError;
pub use game::{Game, HostEvent};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Primary-axis acceleration (m/s²) below which a flick casts
    pub const FLICK_THRESHOLD: f32 = -15.0;
    /// Primary-axis acceleration (m/s²) above which a pull reels
    pub const PULL_THRESHOLD: f32 = 12.0;
    /// Minimum time between two accepted gestures of the same kind
    pub const GESTURE_COOLDOWN_MS: f64 = 700.0;
    /// Acceleration that maps to a full-power cast
    pub const MAX_FLICK_ACCEL: f32 = 25.0;

    /// Bite delay range [min, max) after a cast
    pub const BITE_DELAY_MIN_MS: f64 = 1500.0;
    pub const BITE_DELAY_MAX_MS: f64 = 5000.0;

    /// Catch chance for a zero-power cast
    pub const BASE_CATCH_CHANCE: f64 = 0.3;
    /// Extra catch chance scaled by cast power
    pub const POWER_CATCH_BONUS: f64 = 0.7;

    /// Cast power used for a tap
    pub const TAP_CAST_POWER: f32 = 1.0;

    /// Water stripe scroll per frame (logical pixels)
    pub const WAVE_STEP: f32 = 0.3;
    /// Water stripe height (logical pixels); stripes repeat every two
    pub const STRIPE_HEIGHT: f32 = 6.0;
    /// Wave counter period (one light + one dark stripe)
    pub const WAVE_PERIOD: f32 = STRIPE_HEIGHT * 2.0;

    /// Fallback beep when vibration is unavailable
    pub const TONE_FREQUENCY_HZ: f32 = 440.0;
    pub const TONE_DURATION_MS: u32 = 200;

    /// Device pixel ratio cap (avoids huge surfaces on older phones)
    pub const MAX_DPR: f64 = 2.0;
}
