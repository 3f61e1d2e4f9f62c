use super::*;

#[test]
fn first_tick_of_a_run_is_zero() {
    assert_eq!(frame_delta(None, 12_345.0, 1.0 / 30.0), 0.0);
}

#[test]
fn milliseconds_become_seconds() {
    let dt = frame_delta(Some(1000.0), 1016.0, 1.0);
    assert!((dt - 0.016).abs() < 1e-12);
}

#[test]
fn long_pauses_are_capped() {
    assert_eq!(frame_delta(Some(0.0), 60_000.0, 1.0 / 30.0), 1.0 / 30.0);
}

#[test]
fn backwards_timestamps_do_not_rewind() {
    assert_eq!(frame_delta(Some(500.0), 400.0, 1.0), 0.0);
}

#[test]
fn unvalidated_bounds_do_not_panic() {
    assert_eq!(frame_delta(Some(0.0), 100.0, -1.0), 0.0);
    let dt = frame_delta(Some(0.0), 100.0, f64::NAN);
    assert!((dt - 0.1).abs() < 1e-12);
}
