//! Round state machine
//!
//! `Idle -> WaitingForBite -> FishOn -> Idle`, forever. Casting schedules a
//! randomized bite timer; reeling rolls the catch against the cast power.
//! Feedback for a transition is emitted before the phase changes, so anyone
//! who observes the new phase can assume the cue already fired.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameState, Phase};
use crate::error::GameError;
use crate::platform::{Feedback, FeedbackPattern, TimerHandle, Timers};
use crate::tuning::Tuning;

/// Discrete player intent, from a gesture or a tap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Cast with the given power (0-1)
    Cast { power: f32 },
    /// Reel the line in
    Reel,
}

/// A transition that actually happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Cast { power: f32, delay_ms: f64 },
    Bite,
    Reeled {
        caught: bool,
        probability: f64,
        score: u64,
    },
}

pub struct StateMachine {
    rng: Pcg32,
    bite_delay_min_ms: f64,
    bite_delay_max_ms: f64,
    base_catch_chance: f64,
    power_catch_bonus: f64,
}

impl StateMachine {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            bite_delay_min_ms: tuning.bite_delay_min_ms,
            bite_delay_max_ms: tuning.bite_delay_max_ms,
            base_catch_chance: tuning.base_catch_chance,
            power_catch_bonus: tuning.power_catch_bonus,
        }
    }

    /// Chance that reeling after a cast of `power` lands the fish
    pub fn catch_probability(&self, power: f32) -> f64 {
        (self.base_catch_chance + self.power_catch_bonus * power as f64).clamp(0.0, 1.0)
    }

    /// Apply a player intent. Intents the current phase does not accept are
    /// rejected without touching state.
    pub fn handle<H: Timers + Feedback>(
        &mut self,
        state: &mut GameState,
        intent: Intent,
        host: &mut H,
    ) -> Result<Transition, GameError> {
        let transition = match (state.phase, intent) {
            (Phase::Idle, Intent::Cast { power }) => self.cast(state, power, host),
            (Phase::FishOn, Intent::Reel) => self.reel(state, host),
            (phase, intent) => return Err(GameError::InvalidGestureInPhase { intent, phase }),
        };
        debug_assert!(state.is_consistent());
        Ok(transition)
    }

    /// The bite timer fired
    pub fn bite<H: Feedback>(
        &mut self,
        state: &mut GameState,
        handle: TimerHandle,
        host: &mut H,
    ) -> Result<Transition, GameError> {
        if state.phase != Phase::WaitingForBite || state.pending_bite != Some(handle) {
            return Err(GameError::StaleTimer);
        }

        host.notify(FeedbackPattern::Bite);
        // Already fired, nothing to cancel
        state.pending_bite = None;
        state.phase = Phase::FishOn;

        debug_assert!(state.is_consistent());
        Ok(Transition::Bite)
    }

    fn cast<H: Timers>(&mut self, state: &mut GameState, power: f32, timers: &mut H) -> Transition {
        let power = if power.is_finite() {
            power.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let delay_ms = self
            .rng
            .random_range(self.bite_delay_min_ms..self.bite_delay_max_ms);

        enter(state, Phase::WaitingForBite, timers);
        state.cast_power = power;
        state.pending_bite = Some(timers.schedule_once(delay_ms));

        Transition::Cast { power, delay_ms }
    }

    fn reel<H: Timers + Feedback>(&mut self, state: &mut GameState, host: &mut H) -> Transition {
        host.notify(FeedbackPattern::Reel);

        let probability = self.catch_probability(state.cast_power);
        let caught = self.rng.random_bool(probability);
        if caught {
            state.score = state.score.saturating_add(1);
        }

        state.cast_power = 0.0;
        enter(state, Phase::Idle, host);

        Transition::Reeled {
            caught,
            probability,
            score: state.score,
        }
    }
}

/// Change phase, cancelling a bite timer that is still pending
fn enter<H: Timers>(state: &mut GameState, next: Phase, timers: &mut H) {
    if let Some(handle) = state.pending_bite.take() {
        timers.cancel(handle);
    }
    state.phase = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessHost;
    use proptest::prelude::*;

    fn setup(seed: u64) -> (StateMachine, GameState, HeadlessHost) {
        (
            StateMachine::new(seed, &Tuning::default()),
            GameState::new(),
            HeadlessHost::new(),
        )
    }

    /// Cast, force the bite, return the reel transition
    fn play_round(
        machine: &mut StateMachine,
        state: &mut GameState,
        host: &mut HeadlessHost,
        power: f32,
    ) -> Transition {
        machine
            .handle(state, Intent::Cast { power }, host)
            .unwrap();
        let handle = state.pending_bite.unwrap();
        machine.bite(state, handle, host).unwrap();
        machine.handle(state, Intent::Reel, host).unwrap()
    }

    #[test]
    fn test_cast_schedules_bite_timer() {
        let (mut machine, mut state, mut host) = setup(1);
        let transition = machine
            .handle(&mut state, Intent::Cast { power: 0.8 }, &mut host)
            .unwrap();

        let Transition::Cast { power, delay_ms } = transition else {
            panic!("expected cast, got {transition:?}");
        };
        assert_eq!(power, 0.8);
        assert!((1500.0..5000.0).contains(&delay_ms));
        assert_eq!(state.phase, Phase::WaitingForBite);
        assert_eq!(state.cast_power, 0.8);
        assert!(state.pending_bite.is_some());
        assert_eq!(host.stats().timers_scheduled, 1);
    }

    #[test]
    fn test_cast_power_is_clamped() {
        let (mut machine, mut state, mut host) = setup(1);
        machine
            .handle(&mut state, Intent::Cast { power: 3.0 }, &mut host)
            .unwrap();
        assert_eq!(state.cast_power, 1.0);
    }

    #[test]
    fn test_bite_notifies_before_fish_on() {
        let (mut machine, mut state, mut host) = setup(1);
        machine
            .handle(&mut state, Intent::Cast { power: 0.5 }, &mut host)
            .unwrap();
        let handle = state.pending_bite.unwrap();

        assert_eq!(machine.bite(&mut state, handle, &mut host), Ok(Transition::Bite));
        assert_eq!(state.phase, Phase::FishOn);
        assert_eq!(state.pending_bite, None);
        assert_eq!(host.notifications(), &[FeedbackPattern::Bite]);
    }

    #[test]
    fn test_stale_bite_timer_is_ignored() {
        let (mut machine, mut state, mut host) = setup(1);
        machine
            .handle(&mut state, Intent::Cast { power: 0.5 }, &mut host)
            .unwrap();
        let result = machine.bite(&mut state, TimerHandle(999), &mut host);
        assert_eq!(result, Err(GameError::StaleTimer));
        assert_eq!(state.phase, Phase::WaitingForBite);
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_reel_while_waiting_is_rejected() {
        let (mut machine, mut state, mut host) = setup(1);
        machine
            .handle(&mut state, Intent::Cast { power: 0.5 }, &mut host)
            .unwrap();
        let before = state.clone();

        let result = machine.handle(&mut state, Intent::Reel, &mut host);
        assert!(matches!(
            result,
            Err(GameError::InvalidGestureInPhase {
                phase: Phase::WaitingForBite,
                ..
            })
        ));
        assert_eq!(state.phase, before.phase);
        assert_eq!(state.pending_bite, before.pending_bite);
        assert_eq!(host.stats().timers_cancelled, 0);
    }

    #[test]
    fn test_cast_while_not_idle_is_rejected() {
        let (mut machine, mut state, mut host) = setup(1);
        machine
            .handle(&mut state, Intent::Cast { power: 0.5 }, &mut host)
            .unwrap();
        let result = machine.handle(&mut state, Intent::Cast { power: 1.0 }, &mut host);
        assert!(result.is_err());
        assert_eq!(state.cast_power, 0.5);
        assert_eq!(host.stats().timers_scheduled, 1);
    }

    #[test]
    fn test_reel_from_idle_is_rejected() {
        let (mut machine, mut state, mut host) = setup(1);
        assert!(machine.handle(&mut state, Intent::Reel, &mut host).is_err());
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_zero_power_catch_probability() {
        let (mut machine, mut state, mut host) = setup(7);
        let transition = play_round(&mut machine, &mut state, &mut host, 0.0);
        let Transition::Reeled { probability, .. } = transition else {
            panic!("expected reel, got {transition:?}");
        };
        assert_eq!(probability, 0.3);
    }

    #[test]
    fn test_full_power_always_catches() {
        let (mut machine, mut state, mut host) = setup(42);
        for round in 1..=1000u64 {
            let transition = play_round(&mut machine, &mut state, &mut host, 1.0);
            assert_eq!(
                transition,
                Transition::Reeled {
                    caught: true,
                    probability: 1.0,
                    score: round,
                }
            );
        }
        assert_eq!(state.score, 1000);
    }

    #[test]
    fn test_zero_power_rate_near_thirty_percent() {
        let (mut machine, mut state, mut host) = setup(2024);
        for _ in 0..2000 {
            play_round(&mut machine, &mut state, &mut host, 0.0);
        }
        let rate = state.score as f64 / 2000.0;
        assert!((rate - 0.3).abs() < 0.05, "rate {rate}");
    }

    #[test]
    fn test_reel_notifies_and_resets() {
        let (mut machine, mut state, mut host) = setup(3);
        play_round(&mut machine, &mut state, &mut host, 0.6);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.cast_power, 0.0);
        assert_eq!(state.pending_bite, None);
        assert_eq!(
            host.notifications(),
            &[FeedbackPattern::Bite, FeedbackPattern::Reel]
        );
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let run = |seed| {
            let (mut machine, mut state, mut host) = setup(seed);
            (0..50)
                .map(|_| play_round(&mut machine, &mut state, &mut host, 0.4))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99999), run(99999));
    }

    proptest! {
        #[test]
        fn prop_score_monotonic(seed in any::<u64>(), powers in prop::collection::vec(0.0f32..=1.0, 1..40)) {
            let (mut machine, mut state, mut host) = setup(seed);
            for power in powers {
                let before = state.score;
                let transition = play_round(&mut machine, &mut state, &mut host, power);
                let Transition::Reeled { caught, score, .. } = transition else {
                    return Err(TestCaseError::fail("expected reel"));
                };
                prop_assert_eq!(score, before + caught as u64);
                prop_assert_eq!(state.phase, Phase::Idle);
                prop_assert_eq!(state.cast_power, 0.0);
                prop_assert!(state.is_consistent());
            }
        }
    }
}
