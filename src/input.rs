//! Input source selection
//!
//! Exactly one of two input modes drives the game for the whole session:
//! motion (accelerometer gestures) or tap. The mode is picked once from the
//! device's motion support; devices that need permission wait for a single
//! asynchronous answer and fall back to tap if it is anything but a grant.

use glam::Vec3;

use crate::error::GameError;
use crate::platform::{MotionSupport, PermissionOutcome};
use crate::sim::{GestureClassifier, Intent, Phase, primary_axis};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    AwaitingPermission,
    Motion,
    Tap,
}

/// Accelerometer gestures
#[derive(Debug, Clone)]
pub struct MotionSource {
    classifier: GestureClassifier,
}

impl MotionSource {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            classifier: GestureClassifier::new(tuning),
        }
    }

    pub fn on_sample(&mut self, accel: Vec3, angle: i32, now_ms: f64, phase: Phase) -> Option<Intent> {
        let primary = primary_axis(accel, angle);
        self.classifier.classify(primary, now_ms, phase).intent()
    }
}

/// Single taps, interpreted by phase
#[derive(Debug, Clone, Copy)]
pub struct TapSource {
    cast_power: f32,
}

impl TapSource {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            cast_power: tuning.tap_cast_power,
        }
    }

    /// A tap casts from idle and reels a hooked fish; waiting cannot be
    /// cut short.
    pub fn on_tap(&self, phase: Phase) -> Option<Intent> {
        match phase {
            Phase::Idle => Some(Intent::Cast {
                power: self.cast_power,
            }),
            Phase::FishOn => Some(Intent::Reel),
            Phase::WaitingForBite => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum InputSource {
    AwaitingPermission { tuning: Tuning },
    Motion(MotionSource),
    Tap(TapSource),
}

impl InputSource {
    pub fn select(support: MotionSupport, tuning: &Tuning) -> Self {
        let source = match support {
            MotionSupport::Available => InputSource::Motion(MotionSource::new(tuning)),
            MotionSupport::Absent => InputSource::Tap(TapSource::new(tuning)),
            MotionSupport::NeedsPermission => InputSource::AwaitingPermission {
                tuning: tuning.clone(),
            },
        };
        log::info!("input mode: {:?} ({support:?})", source.mode());
        source
    }

    pub fn mode(&self) -> InputMode {
        match self {
            InputSource::AwaitingPermission { .. } => InputMode::AwaitingPermission,
            InputSource::Motion(_) => InputMode::Motion,
            InputSource::Tap(_) => InputMode::Tap,
        }
    }

    /// Settle the mode from the permission answer. Only the first answer
    /// counts; later ones are ignored. Denial and failure still switch to tap
    /// mode but are returned so the caller can tell the player.
    pub fn resolve(&mut self, outcome: PermissionOutcome) -> Result<(), GameError> {
        let InputSource::AwaitingPermission { tuning } = self else {
            log::warn!("permission answer {outcome:?} after mode was settled, ignoring");
            return Ok(());
        };

        let (next, result) = match outcome {
            PermissionOutcome::Granted => (InputSource::Motion(MotionSource::new(tuning)), Ok(())),
            PermissionOutcome::Denied => (
                InputSource::Tap(TapSource::new(tuning)),
                Err(GameError::PermissionDenied),
            ),
            PermissionOutcome::Error(detail) => (
                InputSource::Tap(TapSource::new(tuning)),
                Err(GameError::PermissionError(detail)),
            ),
        };
        *self = next;
        log::info!("input mode: {:?}", self.mode());
        result
    }

    pub fn on_motion(&mut self, accel: Vec3, angle: i32, now_ms: f64, phase: Phase) -> Option<Intent> {
        match self {
            InputSource::Motion(source) => source.on_sample(accel, angle, now_ms, phase),
            _ => None,
        }
    }

    pub fn on_tap(&self, phase: Phase) -> Option<Intent> {
        match self {
            InputSource::Tap(source) => source.on_tap(phase),
            _ => None,
        }
    }
}
