use crate::animation::ease::Ease;
use crate::foundation::math::{SPAN_EPSILON, clamp01, lerp};

/// Scale the orb starts its entrance from and ends its exit at.
const ORB_MIN_SCALE: f64 = 0.92;
/// Rotation (radians) the orb starts its entrance from.
const ENTER_ROTATION: f64 = 0.08;
/// Rotation (radians) the orb ends its exit at.
const EXIT_ROTATION: f64 = -0.12;
/// Extra depth behind the far plane the entrance starts from.
const ENTER_DEPTH_OFFSET: f64 = 2.0;

/// Display phase of the orb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbPhase {
    /// Not shown yet.
    Hidden,
    /// Dropping in during a forward run.
    Entering,
    /// Fully arrived.
    Visible,
    /// Fading during the leading part of a backward run.
    Exiting,
    /// Faded out for good.
    Gone,
}

/// Visual transform of the orb for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbFrame {
    /// Phase this frame belongs to.
    pub phase: OrbPhase,
    /// Whether the orb should be drawn at all.
    pub visible: bool,
    /// Depth along the view axis; `None` leaves the current depth untouched.
    pub depth: Option<f64>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation about the view axis, in radians.
    pub rotation: f64,
}

/// Entrance progress of a forward run that began at `forward_start_t`.
///
/// Reaches 1 exactly when `t_end` reaches 1, wherever the run resumed from. Defined for
/// `forward_start_t < 1`; a forward run always starts below `1 - eps`.
pub fn forward_local_progress(t_end: f64, forward_start_t: f64) -> f64 {
    clamp01((t_end - forward_start_t) / (1.0 - forward_start_t).max(SPAN_EPSILON))
}

/// Exit progress of a backward run; completes after the leading `fade_fraction` of the run.
pub fn backward_local_progress(t_end: f64, fade_fraction: f64) -> f64 {
    clamp01((1.0 - t_end) / fade_fraction)
}

/// Drop-in transform for a forward run.
///
/// See [`forward_local_progress`] for the domain of `forward_start_t`.
pub fn compute_orb_forward(t_end: f64, forward_start_t: f64, depth_far: f64) -> OrbFrame {
    let p = forward_local_progress(t_end, forward_start_t);
    let e = Ease::OutCubic.apply(p);
    OrbFrame {
        phase: if p >= 1.0 {
            OrbPhase::Visible
        } else {
            OrbPhase::Entering
        },
        visible: true,
        depth: Some(lerp(depth_far + ENTER_DEPTH_OFFSET, 0.0, e)),
        opacity: e,
        scale: lerp(ORB_MIN_SCALE, 1.0, e),
        rotation: lerp(ENTER_ROTATION, 0.0, e),
    }
}

/// Fade-out transform for a backward run. Depth stays where the entrance left it.
pub fn compute_orb_backward(t_end: f64, fade_fraction: f64) -> OrbFrame {
    let p = backward_local_progress(t_end, fade_fraction);
    let e = Ease::InCubic.apply(p);
    OrbFrame {
        phase: if p >= 1.0 {
            OrbPhase::Gone
        } else {
            OrbPhase::Exiting
        },
        visible: p < 1.0,
        depth: None,
        opacity: 1.0 - e,
        scale: lerp(1.0, ORB_MIN_SCALE, e),
        rotation: lerp(0.0, EXIT_ROTATION, e),
    }
}

/// Transform applied when a forward run is armed, before its first tick.
pub fn orb_entering_setup(depth_far: f64) -> OrbFrame {
    OrbFrame {
        phase: OrbPhase::Entering,
        visible: true,
        depth: Some(depth_far + ENTER_DEPTH_OFFSET),
        opacity: 0.0,
        scale: ORB_MIN_SCALE,
        rotation: ENTER_ROTATION,
    }
}

/// Transform applied when a backward run is armed: at the front, fully opaque.
pub fn orb_exiting_setup() -> OrbFrame {
    OrbFrame {
        phase: OrbPhase::Exiting,
        visible: true,
        depth: Some(0.0),
        opacity: 1.0,
        scale: 1.0,
        rotation: 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orb/animator.rs"]
mod tests;
