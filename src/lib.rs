//! orbdraw drives a two-curve "draw-in/draw-out" effect: a pair of mirrored bezier curves with
//! teardrop caps converge on an orb, then retract while the orb fades.
//!
//! # Architecture
//!
//! 1. **Clock**: host timestamps (ms) become bounded per-tick deltas (s).
//! 2. **State machine**: [`AnimState`] snapshots move through
//!    `Idle -> Forward -> Idle -> Backward -> Completed` via [`start_run`], [`stop_run`] and
//!    [`tick_step`]. A [`RunId`] generation counter invalidates frames scheduled for older runs.
//! 3. **Orb sub-animator**: [`compute_orb_forward`] and [`compute_orb_backward`] map progress
//!    to an [`OrbFrame`].
//! 4. **Frame driver**: [`FrameDriver`] owns the state, talks to a host [`Scheduler`] and a
//!    [`VisualSink`], and tears the sink down once the lifecycle completes.
//!
//! Rendering is left to [`VisualSink`] implementations. [`TimelineSink`] is a headless one that
//! records curve geometry per frame; [`simulate_lifecycle`] runs a whole lifecycle with it.
//!
//! The crate is single-threaded and deterministic: the same config and timestamps always yield
//! the same frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod curve;
mod driver;
mod foundation;
mod orb;
mod sim;
mod state;

pub use animation::ease::Ease;
pub use curve::progress::{
    CapPose, CurveInstance, CurveParams, InstanceFrame, cap_pose, draw_count,
};
pub use driver::frame::{FrameDriver, FrameOutcome, TriggerOutcome};
pub use driver::host::{FrameToken, ManualScheduler, ScheduledFrame, Scheduler, VisualSink};
pub use foundation::config::{Config, ScreenWidth};
pub use foundation::error::{OrbdrawError, OrbdrawResult};
pub use orb::animator::{
    OrbFrame, OrbPhase, backward_local_progress, compute_orb_backward, compute_orb_forward,
    forward_local_progress, orb_entering_setup, orb_exiting_setup,
};
pub use sim::timeline::{SimOpts, Timeline, TimelineFrame, TimelineSink, simulate_lifecycle};
pub use state::clock::frame_delta;
pub use state::machine::{
    AnimState, Direction, RunId, TickResult, choose_direction, start_run, stop_run, tick_step,
};
