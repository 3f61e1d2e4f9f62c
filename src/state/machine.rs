use crate::foundation::config::Config;
use crate::orb::animator::{OrbPhase, backward_local_progress, forward_local_progress};
use crate::state::clock::frame_delta;

/// Generation counter identifying the authoritative run.
///
/// Bumped on every run start and stop; a scheduled frame carrying an older value is stale.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct RunId(pub u64);

impl RunId {
    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Traversal direction of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Progress grows towards 1.
    #[default]
    Forward,
    /// Progress shrinks towards 0.
    Backward,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Snapshot of the animation lifecycle.
///
/// Every transition returns a new snapshot; nothing here is updated in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimState {
    /// A run is being ticked.
    pub running: bool,
    /// Direction of the current (or last) run.
    pub direction: Direction,
    /// Progress in `[0, 1]`.
    pub t_end: f64,
    /// Host timestamp (ms) of the previous tick of the current run.
    pub last_time_ms: Option<f64>,
    /// Current run token.
    pub run_id: RunId,
    /// `t_end` the latest forward run started from.
    pub forward_start_t: f64,
    /// Set on the first run start and never cleared.
    pub has_started_lifecycle: bool,
    /// Set once a forward run reached 1; the next run must go backward.
    pub has_completed_forward_run: bool,
    /// Set once a backward run reached 0. Terminal.
    pub lifecycle_completed: bool,
}

impl AnimState {
    /// Initial state: idle at `t_end = 0`, nothing started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a start trigger may begin a run from this state.
    pub fn can_start(&self) -> bool {
        !self.running && !self.lifecycle_completed
    }

    /// Orb display phase derived from progress, direction and lifecycle flags.
    pub fn orb_phase(&self, cfg: &Config) -> OrbPhase {
        if self.lifecycle_completed {
            return OrbPhase::Gone;
        }
        match self.direction {
            Direction::Forward if self.t_end <= 0.0 => OrbPhase::Hidden,
            Direction::Forward => {
                if forward_local_progress(self.t_end, self.forward_start_t) >= 1.0 {
                    OrbPhase::Visible
                } else {
                    OrbPhase::Entering
                }
            }
            Direction::Backward => {
                if backward_local_progress(self.t_end, cfg.backward_fade_fraction) >= 1.0 {
                    OrbPhase::Gone
                } else {
                    OrbPhase::Exiting
                }
            }
        }
    }
}

/// Outcome of one [`tick_step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickResult {
    /// State after the tick.
    pub state: AnimState,
    /// The run is no longer active; no further tick should be scheduled.
    pub did_stop: bool,
    /// This tick finished a forward run.
    pub did_complete_forward: bool,
    /// This tick finished the backward run and with it the lifecycle.
    pub did_complete_lifecycle: bool,
}

impl TickResult {
    fn continuing(state: AnimState) -> Self {
        Self {
            state,
            did_stop: false,
            did_complete_forward: false,
            did_complete_lifecycle: false,
        }
    }

    fn stopped(state: AnimState) -> Self {
        Self {
            state,
            did_stop: true,
            did_complete_forward: false,
            did_complete_lifecycle: false,
        }
    }
}

/// Direction the next run must take.
pub fn choose_direction(s: &AnimState) -> Direction {
    if s.has_completed_forward_run {
        Direction::Backward
    } else {
        Direction::Forward
    }
}

/// Begin a run in `s.direction`.
///
/// The caller checks [`AnimState::can_start`] first. Progress sitting on the boundary the run
/// departs from is nudged `eps` inwards, since the first tick of a run advances by zero.
pub fn start_run(cfg: &Config, s: &AnimState) -> AnimState {
    let t_end = match s.direction {
        Direction::Forward if s.t_end <= cfg.eps => cfg.eps,
        Direction::Backward if s.t_end >= 1.0 - cfg.eps => 1.0 - cfg.eps,
        _ => s.t_end,
    };
    AnimState {
        running: true,
        run_id: s.run_id.next(),
        last_time_ms: None,
        has_started_lifecycle: true,
        t_end,
        ..*s
    }
}

/// End the current run, invalidating any frame scheduled for it.
pub fn stop_run(s: &AnimState) -> AnimState {
    AnimState {
        running: false,
        run_id: s.run_id.next(),
        last_time_ms: None,
        ..*s
    }
}

/// Advance progress by the time elapsed since the previous tick of the run.
pub fn tick_step(cfg: &Config, s: &AnimState, now_ms: f64) -> TickResult {
    if !s.running {
        return TickResult::stopped(*s);
    }

    let dt = frame_delta(s.last_time_ms, now_ms, cfg.max_delta_time);
    let t_end = (s.t_end + s.direction.sign() * dt * cfg.speed).clamp(0.0, 1.0);

    match s.direction {
        Direction::Forward if t_end >= 1.0 - cfg.eps => {
            let state = AnimState {
                t_end: 1.0,
                has_completed_forward_run: true,
                ..stop_run(s)
            };
            TickResult {
                did_complete_forward: true,
                ..TickResult::stopped(state)
            }
        }
        Direction::Backward if t_end <= cfg.eps => {
            let state = AnimState {
                t_end: 0.0,
                lifecycle_completed: true,
                ..stop_run(s)
            };
            TickResult {
                did_complete_lifecycle: true,
                ..TickResult::stopped(state)
            }
        }
        _ => TickResult::continuing(AnimState {
            t_end,
            last_time_ms: Some(now_ms),
            ..*s
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/machine.rs"]
mod tests;
