//! Gesture classification
//!
//! Raw accelerometer streams ring around a real peak, so a single flick
//! crosses the threshold many times. Each gesture kind gets its own
//! refractory period instead of filtering the signal.

use super::machine::Intent;
use super::state::Phase;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Forward cast (strongly negative primary axis)
    Flick,
    /// Reel back (strongly positive primary axis)
    Pull,
    None,
}

/// Result of classifying one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Gesture strength (0-1)
    pub magnitude: f32,
}

impl GestureEvent {
    pub const NONE: GestureEvent = GestureEvent {
        kind: GestureKind::None,
        magnitude: 0.0,
    };

    /// Game intent carried by this gesture, if any
    pub fn intent(&self) -> Option<Intent> {
        match self.kind {
            GestureKind::Flick => Some(Intent::Cast {
                power: self.magnitude,
            }),
            GestureKind::Pull => Some(Intent::Reel),
            GestureKind::None => None,
        }
    }
}

/// Timestamps of the last accepted gesture of each kind
#[derive(Debug, Clone, Copy, Default)]
pub struct CooldownTracker {
    pub last_cast_ms: Option<f64>,
    pub last_pull_ms: Option<f64>,
}

fn elapsed(last: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    last.is_none_or(|t| now_ms - t > cooldown_ms)
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    flick_threshold: f32,
    pull_threshold: f32,
    cooldown_ms: f64,
    max_accel: f32,
    cooldown: CooldownTracker,
}

impl GestureClassifier {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            flick_threshold: tuning.flick_threshold,
            pull_threshold: tuning.pull_threshold,
            cooldown_ms: tuning.cooldown_ms,
            max_accel: tuning.max_flick_accel,
            cooldown: CooldownTracker::default(),
        }
    }

    pub fn cooldown(&self) -> &CooldownTracker {
        &self.cooldown
    }

    fn magnitude(&self, primary: f32) -> f32 {
        (primary.abs() / self.max_accel).clamp(0.0, 1.0)
    }

    /// Classify one normalized sample. Flick and Pull need disjoint phases,
    /// so at most one can fire.
    pub fn classify(&mut self, primary: f32, now_ms: f64, phase: Phase) -> GestureEvent {
        if phase == Phase::Idle
            && primary < self.flick_threshold
            && elapsed(self.cooldown.last_cast_ms, now_ms, self.cooldown_ms)
        {
            self.cooldown.last_cast_ms = Some(now_ms);
            return GestureEvent {
                kind: GestureKind::Flick,
                magnitude: self.magnitude(primary),
            };
        }

        if phase == Phase::FishOn
            && primary > self.pull_threshold
            && elapsed(self.cooldown.last_pull_ms, now_ms, self.cooldown_ms)
        {
            self.cooldown.last_pull_ms = Some(now_ms);
            return GestureEvent {
                kind: GestureKind::Pull,
                magnitude: self.magnitude(primary),
            };
        }

        GestureEvent::NONE
    }
}
