//! Event dispatcher
//!
//! `Game` owns the whole core (state, state machine, input source, frame
//! loop) plus the host. The host turns every callback it receives into a
//! [`HostEvent`] and hands it to [`Game::dispatch`], one at a time; each
//! event is fully processed (transition, feedback, status, render loop)
//! before the next one is looked at.

use glam::Vec3;

use crate::error::GameError;
use crate::frame_loop::FrameLoop;
use crate::input::{InputMode, InputSource};
use crate::platform::{FrameHandle, Host, MotionSupport, PermissionOutcome, TimerHandle};
use crate::sim::{GameState, Intent, StateMachine, Transition};
use crate::tuning::Tuning;
use crate::ui::StatusMessage;

/// Everything the host can tell the game
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Gravity-inclusive acceleration sample (m/s², device axes)
    Motion(Vec3),
    /// Screen tap
    Tap,
    /// A one-shot timer fired
    TimerFired(TimerHandle),
    /// A requested display frame is due
    Frame(FrameHandle),
    /// The motion permission request settled
    Permission(PermissionOutcome),
}

pub struct Game<H: Host> {
    state: GameState,
    machine: StateMachine,
    input: InputSource,
    frames: FrameLoop,
    host: H,
}

impl<H: Host> Game<H> {
    pub fn new(host: H, support: MotionSupport, tuning: &Tuning, seed: u64) -> Self {
        log::info!("game created with seed {seed}");
        Self {
            state: GameState::new(),
            machine: StateMachine::new(seed, tuning),
            input: InputSource::select(support, tuning),
            frames: FrameLoop::new(tuning),
            host,
        }
    }

    /// Show the opening prompt and draw the idle scene once
    pub fn start(&mut self) {
        let prompt = match self.input.mode() {
            InputMode::Motion => StatusMessage::FlickToCast,
            InputMode::Tap => StatusMessage::TapToCast,
            InputMode::AwaitingPermission => StatusMessage::EnableMotion,
        };
        self.status(prompt);
        self.frames.start(&mut self.host);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn is_rendering(&self) -> bool {
        self.frames.is_running()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Motion(accel) => {
                let now = self.host.now_ms();
                let angle = self.host.orientation_angle();
                if let Some(intent) = self.input.on_motion(accel, angle, now, self.state.phase) {
                    self.apply(intent);
                }
            }
            HostEvent::Tap => match self.input.on_tap(self.state.phase) {
                Some(intent) => self.apply(intent),
                None => log::debug!("tap ignored while {:?}", self.state.phase),
            },
            HostEvent::TimerFired(handle) => {
                match self.machine.bite(&mut self.state, handle, &mut self.host) {
                    Ok(transition) => self.announce(transition),
                    Err(e) => log::debug!("{e}"),
                }
            }
            HostEvent::Frame(handle) => self.frames.on_frame(handle, &self.state, &mut self.host),
            HostEvent::Permission(outcome) => self.resolve_permission(outcome),
        }
    }

    fn apply(&mut self, intent: Intent) {
        match self.machine.handle(&mut self.state, intent, &mut self.host) {
            Ok(transition) => self.announce(transition),
            // Upstream gating should already have dropped these
            Err(e) => log::debug!("{e}"),
        }
    }

    fn announce(&mut self, transition: Transition) {
        log::info!("{transition:?}");
        let message = match transition {
            Transition::Cast { .. } => {
                self.frames.start(&mut self.host);
                StatusMessage::Waiting
            }
            Transition::Bite => StatusMessage::PullBack,
            Transition::Reeled { caught: true, score, .. } => StatusMessage::Caught {
                score,
                tap_mode: self.input.mode() == InputMode::Tap,
            },
            Transition::Reeled { caught: false, .. } => StatusMessage::GotAway,
        };
        self.status(message);
    }

    fn resolve_permission(&mut self, outcome: PermissionOutcome) {
        let was_waiting = self.input.mode() == InputMode::AwaitingPermission;
        match self.input.resolve(outcome) {
            Ok(()) if was_waiting => self.status(StatusMessage::FlickToCast),
            Ok(()) => {}
            Err(GameError::PermissionDenied) => self.status(StatusMessage::MotionDenied),
            Err(e) => {
                log::warn!("{e}");
                self.status(StatusMessage::MotionError);
            }
        }
    }

    fn status(&mut self, message: StatusMessage) {
        self.host.set_status(&message.to_string());
    }
}
