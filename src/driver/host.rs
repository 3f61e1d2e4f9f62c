use crate::foundation::error::OrbdrawResult;
use crate::orb::animator::OrbFrame;
use crate::state::machine::RunId;
use std::collections::VecDeque;

/// Handle for one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameToken(pub u64);

/// A frame callback waiting for the host to fire it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledFrame {
    /// Token returned by [`Scheduler::request_frame`].
    pub token: FrameToken,
    /// Run token captured when the frame was requested.
    pub run: RunId,
}

/// Host per-frame scheduling primitive.
///
/// Requests are fire-once. When a scheduled frame fires, the host calls
/// [`crate::FrameDriver::on_frame`] with the captured [`RunId`]. Cancellation is best effort:
/// hosts may still deliver a cancelled frame, which the driver then discards as stale.
pub trait Scheduler {
    /// Schedule one frame callback for `run`.
    fn request_frame(&mut self, run: RunId) -> FrameToken;
    /// Cancel a previously scheduled frame.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Consumer of the visual side effects the driver computes.
///
/// Implementations own all geometry and rendering; the driver makes no assumptions about them.
pub trait VisualSink {
    /// Redraw both curve instances up to `progress` in `[0, 1]`.
    fn update_visual(&mut self, progress: f64) -> OrbdrawResult<()>;
    /// Apply an orb transform.
    fn apply_orb(&mut self, orb: &OrbFrame) -> OrbdrawResult<()>;
    /// Show or hide the curve instances.
    fn set_visible(&mut self, visible: bool) -> OrbdrawResult<()>;
    /// Present the current frame.
    fn render(&mut self) -> OrbdrawResult<()>;
    /// Release visual resources and input listeners. Called once, when the lifecycle completes.
    fn release(&mut self) -> OrbdrawResult<()>;
}

/// FIFO scheduler for headless hosts and tests.
///
/// The host pops frames with [`ManualScheduler::next_frame`] and forwards them to the driver.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: VecDeque<ScheduledFrame>,
    next_token: u64,
    lossy: bool,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// A scheduler that honors cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler that ignores cancellation and still delivers cancelled frames.
    pub fn lossy() -> Self {
        Self {
            lossy: true,
            ..Self::default()
        }
    }

    /// Pop the oldest pending frame.
    pub fn next_frame(&mut self) -> Option<ScheduledFrame> {
        self.queue.pop_front()
    }

    /// Number of frames waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total `request_frame` calls seen.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total `cancel_frame` calls seen, honored or not.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self, run: RunId) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.requested += 1;
        self.queue.push_back(ScheduledFrame { token, run });
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.cancelled += 1;
        if !self.lossy {
            self.queue.retain(|f| f.token != token);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/host.rs"]
mod tests;
