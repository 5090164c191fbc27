//! Game state and core round types
//!
//! One `GameState` exists per game; the state machine is the only writer.

use crate::platform::TimerHandle;

/// Current phase of a fishing round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Line is in, waiting for a cast
    #[default]
    Idle,
    /// Bobber is out, bite timer is running
    WaitingForBite,
    /// A fish is hooked, waiting for a pull
    FishOn,
}

impl Phase {
    /// Whether a round is in progress (the scene animates)
    pub fn is_active(&self) -> bool {
        *self != Phase::Idle
    }
}

/// Complete game state
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Current phase
    pub phase: Phase,
    /// Strength of the current cast (0-1), 0 while idle
    pub cast_power: f32,
    /// Fish caught so far
    pub score: u64,
    /// Bite timer, set only while waiting for a bite
    pub pending_bite: Option<TimerHandle>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the phase/timer/power invariants (used by tests and debug asserts)
    pub fn is_consistent(&self) -> bool {
        let timer_ok = self.pending_bite.is_some() == (self.phase == Phase::WaitingForBite);
        let power_ok = self.phase.is_active() || self.cast_power == 0.0;
        timer_ok && power_ok
    }
}
