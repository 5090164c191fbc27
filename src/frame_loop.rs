//! Render loop that sleeps while idle
//!
//! Frames are only requested while a round is in progress. The frame that
//! observes `Idle` draws the settled scene and requests nothing further, so
//! an idle game costs no CPU until the next cast restarts the loop.

use crate::platform::{FrameClock, FrameHandle, Renderer};
use crate::renderer::FrameState;
use crate::sim::GameState;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
    /// Cosmetic water scroll; may restart from anywhere
    wave_offset: f32,
    wave_step: f32,
    wave_period: f32,
}

impl FrameLoop {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pending: None,
            wave_offset: 0.0,
            wave_step: tuning.wave_step,
            wave_period: tuning.wave_period,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn wave_offset(&self) -> f32 {
        self.wave_offset
    }

    /// Request a frame unless one is already pending
    pub fn start<H: FrameClock>(&mut self, frames: &mut H) {
        if self.pending.is_none() {
            self.pending = Some(frames.schedule_frame());
        }
    }

    /// Draw one frame and decide whether to keep going
    pub fn on_frame<H: FrameClock + Renderer>(
        &mut self,
        handle: FrameHandle,
        state: &GameState,
        host: &mut H,
    ) {
        if self.pending != Some(handle) {
            log::debug!("ignoring stale frame {handle:?}");
            return;
        }

        self.wave_offset = (self.wave_offset + self.wave_step) % self.wave_period;
        host.render(&FrameState {
            phase: state.phase,
            cast_progress: state.cast_power,
            wave_offset: self.wave_offset,
        });

        if state.phase.is_active() {
            self.pending = Some(host.schedule_frame());
        } else if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }
}
