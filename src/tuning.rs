//! Data-driven game balance
//!
//! Every gameplay constant lives here so it can be overridden from JSON
//! without a rebuild. Missing fields fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Gestures ===
    /// Flick fires below this primary-axis value (negative)
    pub flick_threshold: f32,
    /// Pull fires above this primary-axis value (positive)
    pub pull_threshold: f32,
    /// Refractory period per gesture kind
    pub cooldown_ms: f64,
    /// Acceleration mapped to magnitude 1.0
    pub max_flick_accel: f32,

    // === Bite timer ===
    pub bite_delay_min_ms: f64,
    pub bite_delay_max_ms: f64,

    // === Catch roll ===
    pub base_catch_chance: f64,
    pub power_catch_bonus: f64,

    // === Tap mode ===
    pub tap_cast_power: f32,

    // === Cosmetics ===
    pub wave_step: f32,
    pub wave_period: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flick_threshold: FLICK_THRESHOLD,
            pull_threshold: PULL_THRESHOLD,
            cooldown_ms: GESTURE_COOLDOWN_MS,
            max_flick_accel: MAX_FLICK_ACCEL,

            bite_delay_min_ms: BITE_DELAY_MIN_MS,
            bite_delay_max_ms: BITE_DELAY_MAX_MS,

            base_catch_chance: BASE_CATCH_CHANCE,
            power_catch_bonus: POWER_CATCH_BONUS,

            tap_cast_power: TAP_CAST_POWER,

            wave_step: WAVE_STEP,
            wave_period: WAVE_PERIOD,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |msg: &str| Err(GameError::InvalidTuning(msg.to_string()));

        if self.flick_threshold >= 0.0 {
            return fail("flick_threshold must be negative");
        }
        if self.pull_threshold <= 0.0 {
            return fail("pull_threshold must be positive");
        }
        if self.cooldown_ms < 0.0 {
            return fail("cooldown_ms must not be negative");
        }
        if self.max_flick_accel <= 0.0 {
            return fail("max_flick_accel must be positive");
        }
        if !(self.bite_delay_min_ms >= 0.0 && self.bite_delay_min_ms < self.bite_delay_max_ms) {
            return fail("bite delay range must satisfy 0 <= min < max");
        }
        if !(0.0..=1.0).contains(&self.base_catch_chance)
            || !(0.0..=1.0).contains(&self.power_catch_bonus)
        {
            return fail("catch chances must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.tap_cast_power) {
            return fail("tap_cast_power must be within [0, 1]");
        }
        if self.wave_period <= 0.0 {
            return fail("wave_period must be positive");
        }
        Ok(())
    }
}
