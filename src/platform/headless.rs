//! Headless host with a virtual clock
//!
//! Records every capability call instead of touching a device. Used by the
//! tests and by the native demo session.

use crate::game::{Game, HostEvent};
use crate::renderer::FrameState;

use super::{
    Clock, Feedback, FeedbackPattern, FrameClock, FrameHandle, OrientationSensor, Renderer,
    StatusSink, TimerHandle, Timers,
};

/// Virtual display refresh interval (~60 Hz)
pub const FRAME_MS: f64 = 16.0;

/// Call counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub timers_scheduled: u32,
    pub timers_cancelled: u32,
    pub frames_scheduled: u32,
    pub frames_cancelled: u32,
    pub frames_rendered: u32,
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    now_ms: f64,
    angle: i32,
    next_handle: u32,
    /// Pending timers and their due times
    timers: Vec<(TimerHandle, f64)>,
    /// Frames waiting for the next refresh
    frames: Vec<FrameHandle>,
    stats: HostStats,
    notifications: Vec<FeedbackPattern>,
    statuses: Vec<String>,
    last_frame: Option<FrameState>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_angle(&mut self, angle: i32) {
        self.angle = angle;
    }

    /// Move the virtual clock (never backwards)
    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    pub fn notifications(&self) -> &[FeedbackPattern] {
        &self.notifications
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    pub fn status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }

    pub fn last_frame(&self) -> Option<&FrameState> {
        self.last_frame.as_ref()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Remove and return everything due at the current time: expired timers
    /// in due order, then one refresh for every pending frame.
    pub fn due_events(&mut self) -> Vec<HostEvent> {
        let now = self.now_ms;
        let mut due: Vec<_> = self.timers.iter().copied().filter(|(_, t)| *t <= now).collect();
        self.timers.retain(|(_, t)| *t > now);
        due.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut events: Vec<_> = due
            .into_iter()
            .map(|(handle, _)| HostEvent::TimerFired(handle))
            .collect();
        events.extend(self.frames.drain(..).map(HostEvent::Frame));
        events
    }

    fn next_id(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Clock for HeadlessHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl OrientationSensor for HeadlessHost {
    fn orientation_angle(&self) -> i32 {
        self.angle
    }
}

impl Timers for HeadlessHost {
    fn schedule_once(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((handle, self.now_ms + delay_ms));
        self.stats.timers_scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
        self.stats.timers_cancelled += 1;
    }
}

impl FrameClock for HeadlessHost {
    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        self.stats.frames_scheduled += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
        self.stats.frames_cancelled += 1;
    }
}

impl Feedback for HeadlessHost {
    fn notify(&mut self, pattern: FeedbackPattern) {
        log::debug!("feedback: {pattern:?}");
        self.notifications.push(pattern);
    }
}

impl Renderer for HeadlessHost {
    fn render(&mut self, frame: &FrameState) {
        self.stats.frames_rendered += 1;
        self.last_frame = Some(*frame);
    }
}

impl StatusSink for HeadlessHost {
    fn set_status(&mut self, text: &str) {
        log::info!("status: {text}");
        self.statuses.push(text.to_string());
    }
}

impl Game<HeadlessHost> {
    /// Advance virtual time by `ms`, delivering due timers and refreshing
    /// pending frames every [`FRAME_MS`].
    pub fn advance(&mut self, ms: f64) {
        let end = self.host().now_ms() + ms;
        loop {
            let next = (self.host().now_ms() + FRAME_MS).min(end);
            self.host_mut().set_now(next);
            let events = self.host_mut().due_events();
            for event in events {
                self.dispatch(event);
            }
            if next >= end {
                break;
            }
        }
    }

    /// Advance until the current round's bite timer has fired
    pub fn advance_until_bite(&mut self) {
        while self.state().pending_bite.is_some() {
            self.advance(FRAME_MS);
        }
    }
}
