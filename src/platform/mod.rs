//! Platform abstraction layer
//!
//! The game core never calls the browser directly. Everything it needs from
//! the outside world is one of these capabilities:
//! - Time and device rotation
//! - One-shot timers and display-frame callbacks
//! - Haptic/audio feedback
//! - Scene rendering and status text
//!
//! `web` implements them on top of `web-sys`; `headless` implements them
//! with a virtual clock for tests and the native demo.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::renderer::FrameState;

/// Handle to a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// Handle to a scheduled display-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Feedback cue played on a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPattern {
    /// A fish took the bait
    Bite,
    /// The line was reeled in
    Reel,
}

impl FeedbackPattern {
    /// Vibration pattern (on, off, on, ... in ms)
    pub fn vibration_ms(&self) -> &'static [u32] {
        match self {
            FeedbackPattern::Bite => &[200],
            FeedbackPattern::Reel => &[100, 60, 100],
        }
    }
}

/// What the motion-sensor API looks like on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSupport {
    /// No motion events at all
    Absent,
    /// Motion events need an explicit, user-initiated permission (iOS 13+)
    NeedsPermission,
    /// Motion events arrive without asking
    Available,
}

/// Result of the one-shot motion permission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    Error(String),
}

pub trait Clock {
    /// Monotonic milliseconds
    fn now_ms(&self) -> f64;
}

pub trait OrientationSensor {
    /// Screen rotation in degrees; 0 when unknown
    fn orientation_angle(&self) -> i32;
}

pub trait Timers {
    /// Fire `TimerFired(handle)` once after `delay_ms`
    fn schedule_once(&mut self, delay_ms: f64) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

pub trait FrameClock {
    /// Fire `Frame(handle)` on the next display refresh
    fn schedule_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Feedback {
    /// Best effort; must never fail the caller
    fn notify(&mut self, pattern: FeedbackPattern);
}

pub trait Renderer {
    fn render(&mut self, frame: &FrameState);
}

pub trait StatusSink {
    fn set_status(&mut self, text: &str);
}

/// Everything a game host provides
pub trait Host:
    Clock + OrientationSensor + Timers + FrameClock + Feedback + Renderer + StatusSink
{
}

impl<T> Host for T where
    T: Clock + OrientationSensor + Timers + FrameClock + Feedback + Renderer + StatusSink
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibration_patterns() {
        assert_eq!(FeedbackPattern::Bite.vibration_ms(), &[200]);
        assert_eq!(FeedbackPattern::Reel.vibration_ms(), &[100, 60, 100]);
    }
}
