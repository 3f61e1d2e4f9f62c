use super::*;

fn cfg() -> Config {
    Config {
        speed: 1.0,
        max_delta_time: 1.0 / 30.0,
        eps: 1e-4,
        ..Config::default()
    }
}

fn running(direction: Direction, t_end: f64) -> AnimState {
    AnimState {
        running: true,
        direction,
        t_end,
        last_time_ms: Some(0.0),
        run_id: RunId(7),
        has_started_lifecycle: true,
        has_completed_forward_run: direction == Direction::Backward,
        ..AnimState::new()
    }
}

#[test]
fn initial_state_is_idle_at_zero() {
    let s = AnimState::new();
    assert!(!s.running);
    assert_eq!(s.t_end, 0.0);
    assert_eq!(s.run_id, RunId(0));
    assert!(s.can_start());
    assert_eq!(s.orb_phase(&cfg()), OrbPhase::Hidden);
}

#[test]
fn run_id_strictly_increases_across_starts_and_stops() {
    let cfg = cfg();
    let mut s = AnimState::new();
    let mut seen = vec![s.run_id];
    for i in 0..10 {
        s = if i % 3 == 0 {
            stop_run(&s)
        } else {
            start_run(&cfg, &s)
        };
        assert!(s.run_id > *seen.last().unwrap());
        seen.push(s.run_id);
    }
    let mut dedup = seen.clone();
    dedup.dedup();
    assert_eq!(dedup, seen);
}

#[test]
fn start_run_nudges_off_the_departing_boundary() {
    let cfg = cfg();

    let fwd = start_run(&cfg, &AnimState::new());
    assert_eq!(fwd.t_end, cfg.eps);
    assert!(fwd.running);
    assert!(fwd.has_started_lifecycle);
    assert_eq!(fwd.last_time_ms, None);

    let back = start_run(
        &cfg,
        &AnimState {
            direction: Direction::Backward,
            t_end: 1.0,
            ..AnimState::new()
        },
    );
    assert_eq!(back.t_end, 1.0 - cfg.eps);

    let resumed = start_run(
        &cfg,
        &AnimState {
            t_end: 0.4,
            ..AnimState::new()
        },
    );
    assert_eq!(resumed.t_end, 0.4);
}

#[test]
fn stop_run_clears_the_clock() {
    let s = stop_run(&running(Direction::Forward, 0.3));
    assert!(!s.running);
    assert_eq!(s.last_time_ms, None);
    assert_eq!(s.run_id, RunId(8));
    assert_eq!(s.t_end, 0.3);
}

#[test]
fn tick_while_idle_is_a_stopping_no_op() {
    let s = AnimState {
        t_end: 0.5,
        ..AnimState::new()
    };
    let r = tick_step(&cfg(), &s, 1000.0);
    assert_eq!(r.state, s);
    assert!(r.did_stop);
    assert!(!r.did_complete_forward);
    assert!(!r.did_complete_lifecycle);
}

#[test]
fn first_tick_of_a_run_does_not_move() {
    let cfg = cfg();
    let s = start_run(&cfg, &AnimState::new());
    let r = tick_step(&cfg, &s, 5_000.0);
    assert!(!r.did_stop);
    assert_eq!(r.state.t_end, cfg.eps);
    assert_eq!(r.state.last_time_ms, Some(5_000.0));
    assert_eq!(r.state.run_id, s.run_id);
}

#[test]
fn progress_accumulates_over_a_tenth_of_a_second() {
    let cfg = cfg();
    let mut s = start_run(&cfg, &AnimState::new());
    let mut last = tick_step(&cfg, &s, 0.0);
    for i in 1..=10u32 {
        s = last.state;
        last = tick_step(&cfg, &s, f64::from(i) * 10.0);
    }
    assert!((last.state.t_end - 0.1).abs() < 1e-3);
    assert!(last.state.running);
    assert!(!last.did_stop);
}

#[test]
fn a_single_tick_is_capped_by_max_delta_time() {
    let cfg = cfg();
    let s = running(Direction::Forward, 0.2);
    let r = tick_step(&cfg, &s, 100.0);
    assert!((r.state.t_end - (0.2 + 1.0 / 30.0)).abs() < 1e-12);
}

#[test]
fn progress_stays_in_unit_range_for_any_speed() {
    for speed in [1e-3, 1.0, 50.0, 1e9] {
        let cfg = Config {
            speed,
            max_delta_time: 10.0,
            ..cfg()
        };
        for (dir, t) in [(Direction::Forward, 0.99), (Direction::Backward, 0.01)] {
            let r = tick_step(&cfg, &running(dir, t), 10_000.0);
            assert!((0.0..=1.0).contains(&r.state.t_end));
        }
    }
}

#[test]
fn forward_completion_snaps_and_stops() {
    let cfg = cfg();
    let s = running(Direction::Forward, 1.0 - cfg.eps / 2.0);
    let r = tick_step(&cfg, &s, 16.0);
    assert_eq!(r.state.t_end, 1.0);
    assert!(!r.state.running);
    assert!(r.state.has_completed_forward_run);
    assert!(!r.state.lifecycle_completed);
    assert_eq!(r.state.last_time_ms, None);
    assert_eq!(r.state.run_id, RunId(8));
    assert!(r.did_stop);
    assert!(r.did_complete_forward);
    assert!(!r.did_complete_lifecycle);
}

#[test]
fn backward_completion_ends_the_lifecycle() {
    let cfg = cfg();
    let s = running(Direction::Backward, cfg.eps / 2.0);
    let r = tick_step(&cfg, &s, 16.0);
    assert_eq!(r.state.t_end, 0.0);
    assert!(!r.state.running);
    assert!(r.state.lifecycle_completed);
    assert!(!r.state.can_start());
    assert!(r.did_stop);
    assert!(!r.did_complete_forward);
    assert!(r.did_complete_lifecycle);
    assert_eq!(r.state.orb_phase(&cfg), OrbPhase::Gone);
}

#[test]
fn direction_alternates_after_a_forward_completion() {
    let cfg = cfg();
    let s = AnimState::new();
    assert_eq!(choose_direction(&s), Direction::Forward);

    let done = tick_step(&cfg, &running(Direction::Forward, 0.99995), 0.0).state;
    assert!(done.has_completed_forward_run);
    assert_eq!(choose_direction(&done), Direction::Backward);
}

#[test]
fn orb_phase_tracks_progress() {
    let cfg = cfg();
    let entering = AnimState {
        t_end: 0.5,
        forward_start_t: 0.2,
        ..running(Direction::Forward, 0.5)
    };
    assert_eq!(entering.orb_phase(&cfg), OrbPhase::Entering);

    let arrived = AnimState {
        t_end: 1.0,
        ..entering
    };
    assert_eq!(arrived.orb_phase(&cfg), OrbPhase::Visible);

    let exiting = running(Direction::Backward, 0.9);
    assert_eq!(exiting.orb_phase(&cfg), OrbPhase::Exiting);

    let faded = running(Direction::Backward, 0.3);
    assert_eq!(faded.orb_phase(&cfg), OrbPhase::Gone);
}
