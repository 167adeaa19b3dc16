use std::cell::Cell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use reactor_core::{
    Ease, LoopType, PlayDirection, Reaction, ReactionSettings, ReactionState, TickDelta, Timescale,
};

fn bound(from: f32, to: f32, settings: ReactionSettings) -> (Reaction<f32>, Rc<Cell<f32>>) {
    let host = Rc::new(Cell::new(from));
    let mut r = Reaction::between(from, to, settings).expect("valid settings");
    let (get, set) = (Rc::clone(&host), Rc::clone(&host));
    r.bind(move || get.get(), move |v| set.set(v));
    (r, host)
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut(()) + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    (count, move |_| c.set(c.get() + 1))
}

#[test]
fn half_second_of_linear_second_is_halfway() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(1.0));
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.5));
    assert_abs_diff_eq!(r.current_value(), 5.0, epsilon = 1e-5);
    assert_abs_diff_eq!(host.get(), 5.0, epsilon = 1e-5);
}

#[test]
fn progress_endpoints_match_operands() {
    let (mut r, _host) = bound(2.0, 8.0, ReactionSettings::new(1.0).with_ease(Ease::InOutCubic));
    r.set_progress_at(0.0);
    assert_eq!(r.current_value(), r.from_value());
    r.set_progress_at(1.0);
    assert_eq!(r.current_value(), r.to_value());
    assert_eq!(r.state(), ReactionState::Idle);
}

#[test]
fn forward_then_reverse_returns_to_from() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(1.0));
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(1.0));
    assert_eq!(r.state(), ReactionState::Idle);
    assert_abs_diff_eq!(host.get(), 10.0);

    r.play(PlayDirection::Reverse);
    assert_abs_diff_eq!(r.progress(), 1.0);
    r.advance(&TickDelta::uniform(1.0));
    assert_eq!(r.state(), ReactionState::Idle);
    assert_abs_diff_eq!(host.get(), 0.0);
}

#[test]
fn stop_twice_equals_once() {
    let (mut r, _host) = bound(0.0, 10.0, ReactionSettings::new(1.0));
    let (stops, on_stop) = counter();
    let (finishes, on_finish) = counter();
    r.callbacks.on_stop.add(on_stop);
    r.callbacks.on_finish.add(on_finish);

    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.3));
    r.stop();
    r.stop();
    assert_eq!(stops.get(), 1);
    assert_eq!(finishes.get(), 0);
    assert_eq!(r.state(), ReactionState::Idle);

    r.advance(&TickDelta::uniform(1.0));
    assert_abs_diff_eq!(r.progress(), 0.3, epsilon = 1e-5);
}

#[test]
fn timescale_selects_clock() {
    let paused_game = TickDelta::new(0.0, 0.5);

    let (mut real, _) = bound(
        0.0,
        1.0,
        ReactionSettings::new(1.0).with_timescale(Timescale::Independent),
    );
    real.play(PlayDirection::Forward);
    real.advance(&paused_game);
    assert_abs_diff_eq!(real.progress(), 0.5, epsilon = 1e-5);

    let (mut game, _) = bound(0.0, 1.0, ReactionSettings::new(1.0));
    game.play(PlayDirection::Forward);
    game.advance(&paused_game);
    assert_eq!(game.progress(), 0.0);
}

#[test]
fn start_delay_carries_time_into_play() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(1.0).with_start_delay(0.5));
    let (plays, on_play) = counter();
    r.callbacks.on_play.add(on_play);

    r.play(PlayDirection::Forward);
    assert_eq!(r.state(), ReactionState::InStartDelay);
    assert_eq!(host.get(), 0.0);
    assert_eq!(plays.get(), 0);

    r.advance(&TickDelta::uniform(0.75));
    assert_eq!(r.state(), ReactionState::Playing);
    assert_eq!(plays.get(), 1);
    assert_abs_diff_eq!(r.progress(), 0.25, epsilon = 1e-5);
}

#[test]
fn two_loops_mean_three_play_throughs() {
    let (mut r, _) = bound(0.0, 10.0, ReactionSettings::new(1.0).with_loops(2));
    let (loops, on_loop) = counter();
    let (finishes, on_finish) = counter();
    r.callbacks.on_loop.add(on_loop);
    r.callbacks.on_finish.add(on_finish);

    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(2.5));
    assert_eq!(loops.get(), 2);
    assert_eq!(r.loops_completed(), 2);
    assert!(r.is_active());
    assert_abs_diff_eq!(r.progress(), 0.5, epsilon = 1e-5);

    r.advance(&TickDelta::uniform(0.5));
    assert_eq!(finishes.get(), 1);
    assert_eq!(r.state(), ReactionState::Idle);
    assert_abs_diff_eq!(r.current_value(), 10.0);
}

#[test]
fn ping_pong_flips_direction_each_iteration() {
    let settings = ReactionSettings::new(1.0)
        .with_loops(1)
        .with_loop_type(LoopType::PingPong);
    let (mut r, host) = bound(0.0, 10.0, settings);
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(1.5));
    assert_eq!(r.direction(), PlayDirection::Reverse);
    assert_abs_diff_eq!(host.get(), 5.0, epsilon = 1e-4);

    r.advance(&TickDelta::uniform(0.5));
    assert!(!r.is_active());
    assert_abs_diff_eq!(host.get(), 0.0);
}

#[test]
fn infinite_loops_never_finish() {
    let (mut r, _) = bound(0.0, 1.0, ReactionSettings::new(1.0).with_loops(-1));
    let (finishes, on_finish) = counter();
    r.callbacks.on_finish.add(on_finish);
    r.play(PlayDirection::Forward);
    for _ in 0..10 {
        r.advance(&TickDelta::uniform(1.0));
    }
    assert!(r.is_active());
    assert_eq!(r.loops_completed(), 10);
    assert_eq!(finishes.get(), 0);
}

#[test]
fn loop_delay_holds_between_iterations() {
    let settings = ReactionSettings::new(1.0).with_loops(1).with_loop_delay(0.5);
    let (mut r, _) = bound(0.0, 1.0, settings);
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(1.25));
    assert_eq!(r.state(), ReactionState::InLoopDelay);
    r.advance(&TickDelta::uniform(0.5));
    assert_eq!(r.state(), ReactionState::Playing);
    assert_abs_diff_eq!(r.progress(), 0.25, epsilon = 1e-5);
}

#[test]
fn pause_freezes_progress_until_resume() {
    let (mut r, _) = bound(0.0, 1.0, ReactionSettings::new(1.0));
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.25));
    r.pause();
    r.advance(&TickDelta::uniform(1.0));
    assert_eq!(r.state(), ReactionState::Paused);
    assert_abs_diff_eq!(r.progress(), 0.25, epsilon = 1e-5);

    r.toggle_pause();
    assert_eq!(r.state(), ReactionState::Playing);
    r.advance(&TickDelta::uniform(0.25));
    assert_abs_diff_eq!(r.progress(), 0.5, epsilon = 1e-5);

    // resume while not paused is a no-op
    let (resumes, on_resume) = counter();
    r.callbacks.on_resume.add(on_resume);
    r.resume();
    assert_eq!(resumes.get(), 0);
}

#[test]
fn reverse_mid_flight_and_when_idle() {
    let (mut r, _) = bound(0.0, 1.0, ReactionSettings::new(1.0));
    r.reverse();
    assert_eq!(r.direction(), PlayDirection::Forward);

    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.6));
    r.reverse();
    r.advance(&TickDelta::uniform(0.2));
    assert_eq!(r.direction(), PlayDirection::Reverse);
    assert_abs_diff_eq!(r.progress(), 0.4, epsilon = 1e-5);
}

#[test]
fn rewind_returns_to_cycle_start() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(1.0));
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.5));
    r.rewind();
    assert_eq!(r.state(), ReactionState::Idle);
    assert_eq!(r.progress(), 0.0);
    assert_eq!(host.get(), 0.0);
}

#[test]
fn play_to_progress_runs_a_single_leg() {
    let settings = ReactionSettings::new(1.0).with_start_delay(1.0).with_loops(3);
    let (mut r, host) = bound(0.0, 10.0, settings);
    let (finishes, on_finish) = counter();
    r.callbacks.on_finish.add(on_finish);

    r.play_to_progress(0.5);
    assert_eq!(r.state(), ReactionState::Playing);
    r.advance(&TickDelta::uniform(1.0));
    assert_eq!(r.state(), ReactionState::Idle);
    assert_eq!(finishes.get(), 1);
    assert_abs_diff_eq!(r.progress(), 0.5);
    assert_abs_diff_eq!(host.get(), 5.0);
}

#[test]
fn play_from_progress_skips_start_delay() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(1.0).with_start_delay(1.0));
    let (starts, on_start) = counter();
    r.callbacks.on_start.add(on_start);

    r.play_from_progress(0.5);
    assert_eq!(r.state(), ReactionState::Playing);
    assert_abs_diff_eq!(host.get(), 5.0);

    // retargeting an active reaction does not begin a new cycle
    r.play_from_progress(0.25);
    assert_eq!(starts.get(), 1);

    r.advance(&TickDelta::uniform(0.75));
    assert!(!r.is_active());
    assert_abs_diff_eq!(host.get(), 10.0);
}

#[test]
fn finish_jumps_to_end() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(1.0));
    let (stops, on_stop) = counter();
    let (finishes, on_finish) = counter();
    r.callbacks.on_stop.add(on_stop);
    r.callbacks.on_finish.add(on_finish);
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.2));
    r.finish();
    assert_eq!(host.get(), 10.0);
    assert_eq!((stops.get(), finishes.get()), (1, 1));
}

#[test]
fn zero_duration_completes_on_next_tick() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(0.0).with_loops(2));
    r.play(PlayDirection::Forward);
    assert!(r.is_active());
    for _ in 0..3 {
        r.advance(&TickDelta::uniform(0.016));
    }
    assert!(!r.is_active());
    assert_eq!(host.get(), 10.0);
}

#[test]
fn ease_shapes_progress() {
    let (mut r, _) = bound(0.0, 10.0, ReactionSettings::new(1.0).with_ease(Ease::InQuad));
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.5));
    assert_abs_diff_eq!(r.current_value(), 2.5, epsilon = 1e-5);
}

#[test]
fn int_channel_rounds_to_nearest() {
    let mut r = Reaction::<i32>::between(0, 10, ReactionSettings::new(1.0)).unwrap();
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.26));
    assert_eq!(r.current_value(), 3);
}

#[test]
fn update_observer_sees_every_write() {
    let (mut r, _) = bound(0.0, 1.0, ReactionSettings::new(1.0));
    let seen = Rc::new(Cell::new(0u32));
    let s = Rc::clone(&seen);
    r.callbacks.on_update.add(move |_progress| s.set(s.get() + 1));
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(0.5));
    r.advance(&TickDelta::uniform(0.5));
    assert_eq!(seen.get(), 3);
}

/// Runs `f` on its own thread and fails if it does not return promptly.
fn within_a_second<R: Send + 'static>(f: impl FnOnce() -> R + Send + 'static) -> R {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(std::time::Duration::from_secs(1))
        .expect("advance returned")
}

#[test]
fn huge_delta_on_infinite_loop_returns() {
    let (loops, active) = within_a_second(|| {
        let mut r =
            Reaction::between(0.0f32, 1.0, ReactionSettings::new(0.001).with_loops(-1)).unwrap();
        r.play(PlayDirection::Forward);
        r.advance(&TickDelta::uniform(100_000.0));
        (r.loops_completed(), r.is_active())
    });
    assert!(active);
    assert!(loops > 1_000_000, "skipped iterations are counted: {loops}");
}

#[test]
fn huge_delta_on_ping_pong_with_loop_delay_returns() {
    let active = within_a_second(|| {
        let settings = ReactionSettings::new(0.001)
            .with_loops(-1)
            .with_loop_type(LoopType::PingPong)
            .with_loop_delay(0.0005);
        let mut r = Reaction::between(0.0f32, 1.0, settings).unwrap();
        r.play(PlayDirection::Forward);
        r.advance(&TickDelta::uniform(100_000.0));
        let progress = r.progress();
        (r.is_active(), (0.0..=1.0).contains(&progress))
    });
    assert_eq!(active, (true, true));
}

#[test]
fn one_tick_spanning_every_loop_finishes_once() {
    let (mut r, host) = bound(0.0, 10.0, ReactionSettings::new(0.01).with_loops(1000));
    let (finishes, on_finish) = counter();
    r.callbacks.on_finish.add(on_finish);
    r.play(PlayDirection::Forward);
    r.advance(&TickDelta::uniform(100.0));
    assert!(!r.is_active());
    assert_eq!(r.loops_completed(), 1000);
    assert_eq!(finishes.get(), 1);
    assert_abs_diff_eq!(host.get(), 10.0);
}

#[test]
fn ping_pong_parity_survives_skipped_iterations() {
    let settings = ReactionSettings::new(1.0)
        .with_loops(-1)
        .with_loop_type(LoopType::PingPong);
    let (mut r, host) = bound(0.0, 10.0, settings);
    r.play(PlayDirection::Forward);
    // 100 legs (alternating F, R) then a quarter into the 101st, forward
    r.advance(&TickDelta::uniform(100.25));
    assert_eq!(r.loops_completed(), 100);
    assert_eq!(r.direction(), PlayDirection::Forward);
    assert_abs_diff_eq!(r.progress(), 0.25, epsilon = 1e-4);
    assert_abs_diff_eq!(host.get(), 2.5, epsilon = 1e-3);

    // another 100 legs land on the same direction
    r.advance(&TickDelta::uniform(100.0));
    assert_eq!(r.loops_completed(), 200);
    assert_eq!(r.direction(), PlayDirection::Forward);
    assert_abs_diff_eq!(r.progress(), 0.25, epsilon = 1e-4);
}

#[test]
fn many_loops_in_one_tick_are_counted_exactly() {
    let (mut r, _) = bound(0.0, 1.0, ReactionSettings::new(0.5).with_loops(-1));
    let (loops, on_loop) = counter();
    r.callbacks.on_loop.add(on_loop);
    r.play(PlayDirection::Forward);
    // 20 boundaries: short enough to be stepped one at a time
    r.advance(&TickDelta::uniform(10.25));
    assert_eq!(r.loops_completed(), 20);
    assert_eq!(loops.get(), 20);
    assert_abs_diff_eq!(r.progress(), 0.5, epsilon = 1e-4);
}
