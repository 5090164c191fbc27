//! Integration tests: host events → Game → state machine → host capabilities.

use flick_fish::platform::headless::HeadlessHost;
use flick_fish::platform::{FeedbackPattern, MotionSupport, PermissionOutcome};
use flick_fish::sim::Phase;
use flick_fish::{Game, HostEvent, Tuning};
use glam::Vec3;

// ── Helpers ───────────────────────────────────────────────────

fn new_game(support: MotionSupport, seed: u64) -> Game<HeadlessHost> {
    let mut game = Game::new(HeadlessHost::new(), support, &Tuning::default(), seed);
    game.start();
    game
}

fn flick(game: &mut Game<HeadlessHost>, z: f32) {
    game.dispatch(HostEvent::Motion(Vec3::new(0.0, 0.0, z)));
}

/// Flick, wait for the bite, pull. Leaves a second between rounds so both
/// gesture cooldowns have lapsed.
fn motion_round(game: &mut Game<HeadlessHost>, z: f32) {
    game.advance(1000.0);
    flick(game, z);
    game.advance_until_bite();
    game.advance(100.0);
    flick(game, 15.0);
}

fn tap_round(game: &mut Game<HeadlessHost>) {
    game.dispatch(HostEvent::Tap);
    game.advance_until_bite();
    game.dispatch(HostEvent::Tap);
}

// ── Motion rounds ─────────────────────────────────────────────

#[test]
fn flick_wait_bite_pull() {
    let mut game = new_game(MotionSupport::Available, 7);
    game.host_mut().set_now(1000.0);

    flick(&mut game, -20.0);
    assert_eq!(game.state().phase, Phase::WaitingForBite);
    assert_eq!(game.state().cast_power, 0.8);
    assert!(game.state().pending_bite.is_some());

    // Pulling before the bite does nothing
    flick(&mut game, 15.0);
    assert_eq!(game.state().phase, Phase::WaitingForBite);

    game.advance_until_bite();
    assert_eq!(game.state().phase, Phase::FishOn);
    assert_eq!(game.host().status(), Some("🐟 Pull back!"));
    assert_eq!(game.state().cast_power, 0.8);

    game.advance(100.0);
    flick(&mut game, 15.0);
    assert_eq!(game.state().phase, Phase::Idle);
    assert_eq!(game.state().cast_power, 0.0);
    assert!(game.state().pending_bite.is_none());
    assert!(game.state().score <= 1);

    let status = game.host().status().unwrap_or_default().to_string();
    match game.state().score {
        1 => assert_eq!(status, "✅ Caught! Fish: 1 – flick again"),
        _ => assert_eq!(status, "❌ It got away – try again"),
    }
    assert_eq!(
        game.host().notifications(),
        &[FeedbackPattern::Bite, FeedbackPattern::Reel]
    );
}

#[test]
fn bite_arrives_within_delay_range() {
    let mut game = new_game(MotionSupport::Available, 99);
    let tuning = Tuning::default();

    for _ in 0..20 {
        game.advance(1000.0);
        let cast_at = game.host().stats().timers_scheduled;
        flick(&mut game, -20.0);
        assert_eq!(game.host().stats().timers_scheduled, cast_at + 1);

        // Nothing may bite before the minimum delay
        game.advance(tuning.bite_delay_min_ms - 20.0);
        assert_eq!(game.state().phase, Phase::WaitingForBite);

        // Everything has bitten once the maximum has passed
        game.advance(tuning.bite_delay_max_ms - tuning.bite_delay_min_ms + 40.0);
        assert_eq!(game.state().phase, Phase::FishOn);

        game.advance(100.0);
        flick(&mut game, 15.0);
        assert_eq!(game.state().phase, Phase::Idle);
    }
}

#[test]
fn render_loop_sleeps_between_rounds() {
    let mut game = new_game(MotionSupport::Available, 3);
    game.advance(100.0);
    assert!(!game.is_rendering());
    assert_eq!(game.host().stats().frames_rendered, 1);

    motion_round(&mut game, -20.0);
    game.advance(100.0);
    assert!(!game.is_rendering());
    assert_eq!(game.host().pending_frames(), 0);

    // An idle game schedules nothing, however long it sits
    let settled = game.host().stats();
    game.advance(10_000.0);
    assert_eq!(game.host().stats(), settled);

    // The next cast wakes it up again
    flick(&mut game, -20.0);
    assert!(game.is_rendering());
    assert_eq!(
        game.host().stats().frames_scheduled,
        settled.frames_scheduled + 1
    );
}

#[test]
fn frames_show_the_round_in_progress() {
    let mut game = new_game(MotionSupport::Available, 11);
    flick(&mut game, -25.0);
    game.advance(32.0);

    let frame = game.host().last_frame().copied();
    let frame = frame.expect("frame rendered while waiting");
    assert_eq!(frame.phase, Phase::WaitingForBite);
    assert_eq!(frame.cast_progress, 1.0);

    game.advance_until_bite();
    game.advance(32.0);
    let frame = game.host().last_frame().copied().expect("frame rendered while hooked");
    assert_eq!(frame.phase, Phase::FishOn);
}

#[test]
fn landscape_flicks_use_the_x_axis() {
    let mut game = new_game(MotionSupport::Available, 5);

    game.host_mut().set_angle(90);
    // Portrait-style flick is not a flick when held sideways
    flick(&mut game, -20.0);
    assert_eq!(game.state().phase, Phase::Idle);

    game.dispatch(HostEvent::Motion(Vec3::new(-20.0, 0.0, 5.0)));
    assert_eq!(game.state().phase, Phase::WaitingForBite);
    assert_eq!(game.state().cast_power, 0.8);

    game.advance_until_bite();
    game.host_mut().set_angle(270);
    game.dispatch(HostEvent::Motion(Vec3::new(-13.0, 0.0, 0.0)));
    assert_eq!(game.state().phase, Phase::Idle);
}

#[test]
fn unknown_angle_uses_portrait_mapping() {
    let mut game = new_game(MotionSupport::Available, 5);
    game.host_mut().set_angle(45);
    flick(&mut game, -20.0);
    assert_eq!(game.state().phase, Phase::WaitingForBite);
}

#[test]
fn cooldowns_are_tracked_per_gesture() {
    let mut game = new_game(MotionSupport::Available, 21);
    game.host_mut().set_now(5000.0);
    flick(&mut game, -20.0);
    game.advance_until_bite();
    game.advance(100.0);
    flick(&mut game, 15.0);
    assert_eq!(game.state().phase, Phase::Idle);

    // A second pull right after is still inside the pull cooldown, and a
    // flick right after a reel is fine: casting has its own cooldown.
    flick(&mut game, 15.0);
    assert_eq!(game.state().phase, Phase::Idle);
    flick(&mut game, -20.0);
    assert_eq!(game.state().phase, Phase::WaitingForBite);
}

// ── Tap rounds ────────────────────────────────────────────────

#[test]
fn full_power_taps_always_catch() {
    let mut game = new_game(MotionSupport::Absent, 42);
    for round in 1..=200 {
        tap_round(&mut game);
        assert_eq!(game.state().score, round);
    }
    assert_eq!(game.host().status(), Some("✅ Caught! Fish: 200 – tap again"));
}

#[test]
fn every_bite_timer_fires_or_is_cancelled() {
    let mut game = new_game(MotionSupport::Absent, 8);
    for _ in 0..25 {
        tap_round(&mut game);
    }
    let stats = game.host().stats();
    assert_eq!(stats.timers_scheduled, 25);
    assert_eq!(stats.timers_cancelled, 0);
    assert_eq!(game.host().pending_timers(), 0);
    assert_eq!(game.host().notifications().len(), 50);
}

#[test]
fn motion_samples_are_ignored_in_tap_mode() {
    let mut game = new_game(MotionSupport::Absent, 8);
    flick(&mut game, -24.0);
    assert_eq!(game.state().phase, Phase::Idle);
    assert_eq!(game.host().status(), Some("✋ Tap to cast"));
}

// ── Permission flow ───────────────────────────────────────────

#[test]
fn nothing_plays_until_permission_settles() {
    let mut game = new_game(MotionSupport::NeedsPermission, 1);
    assert_eq!(game.host().status(), Some("📱 Enable motion controls to play"));

    flick(&mut game, -20.0);
    game.dispatch(HostEvent::Tap);
    assert_eq!(game.state().phase, Phase::Idle);

    game.dispatch(HostEvent::Permission(PermissionOutcome::Granted));
    flick(&mut game, -20.0);
    assert_eq!(game.state().phase, Phase::WaitingForBite);
}

#[test]
fn denied_permission_plays_with_taps() {
    let mut game = new_game(MotionSupport::NeedsPermission, 1);
    game.dispatch(HostEvent::Permission(PermissionOutcome::Denied));

    // Only the first answer counts
    game.dispatch(HostEvent::Permission(PermissionOutcome::Granted));

    flick(&mut game, -20.0);
    assert_eq!(game.state().phase, Phase::Idle);
    tap_round(&mut game);
    assert_eq!(game.state().score, 1);
}

// ── Determinism ───────────────────────────────────────────────

#[test]
fn same_seed_same_session() {
    let play = |seed| {
        let mut game = new_game(MotionSupport::Available, seed);
        let mut scores = Vec::new();
        for _ in 0..30 {
            motion_round(&mut game, -16.0);
            scores.push(game.state().score);
        }
        scores
    };
    assert_eq!(play(2024), play(2024));
}
