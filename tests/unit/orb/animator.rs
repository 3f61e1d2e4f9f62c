use super::*;

const DEPTH_FAR: f64 = 10.0;

#[test]
fn forward_entrance_is_normalized_to_the_run_start() {
    for start in [0.0, 1e-4, 0.25, 0.6, 0.99] {
        let first = compute_orb_forward(start, start, DEPTH_FAR);
        assert_eq!(first.phase, OrbPhase::Entering);
        assert_eq!(first.opacity, 0.0);
        assert_eq!(first.scale, ORB_MIN_SCALE);
        assert_eq!(first.depth, Some(DEPTH_FAR + 2.0));

        let last = compute_orb_forward(1.0, start, DEPTH_FAR);
        assert_eq!(last.phase, OrbPhase::Visible);
        assert_eq!(last.opacity, 1.0);
        assert_eq!(last.scale, 1.0);
        assert_eq!(last.rotation, 0.0);
        assert_eq!(last.depth, Some(0.0));
    }
}

#[test]
fn forward_entrance_eases_out() {
    let mid = compute_orb_forward(0.5, 0.0, DEPTH_FAR);
    // ease-out-cubic of 0.5
    assert!((mid.opacity - 0.875).abs() < 1e-12);
    assert!(mid.visible);
    assert!(mid.rotation > 0.0 && mid.rotation < ENTER_ROTATION);
}

#[test]
fn backward_fade_consumes_only_the_leading_fraction() {
    let start = compute_orb_backward(1.0, 0.4);
    assert_eq!(start.phase, OrbPhase::Exiting);
    assert!(start.visible);
    assert_eq!(start.opacity, 1.0);
    assert_eq!(start.depth, None);

    let gone = compute_orb_backward(0.5, 0.4);
    assert_eq!(gone.phase, OrbPhase::Gone);
    assert!(!gone.visible);
    assert_eq!(gone.opacity, 0.0);
    assert_eq!(gone.scale, ORB_MIN_SCALE);
    assert_eq!(gone.rotation, EXIT_ROTATION);

    let later = compute_orb_backward(0.1, 0.4);
    assert_eq!(later, gone);
}

#[test]
fn backward_fade_eases_in() {
    let f = compute_orb_backward(0.8, 0.4);
    // (0.2 / 0.4)^3 = 0.125
    assert!((f.opacity - 0.875).abs() < 1e-12);
    assert!(f.visible);
}

#[test]
fn setup_frames_match_the_animation_endpoints() {
    let enter = orb_entering_setup(DEPTH_FAR);
    let first = compute_orb_forward(0.3, 0.3, DEPTH_FAR);
    assert_eq!(enter, first);

    let exit = orb_exiting_setup();
    let start = compute_orb_backward(1.0, 0.4);
    assert_eq!(exit.opacity, start.opacity);
    assert_eq!(exit.scale, start.scale);
    assert_eq!(exit.rotation, start.rotation);
}
