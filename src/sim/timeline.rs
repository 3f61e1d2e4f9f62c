use crate::curve::progress::{CurveInstance, InstanceFrame};
use crate::driver::frame::{FrameDriver, TriggerOutcome};
use crate::driver::host::{ManualScheduler, VisualSink};
use crate::foundation::config::Config;
use crate::foundation::error::{OrbdrawError, OrbdrawResult};
use crate::orb::animator::OrbFrame;
use crate::state::machine::AnimState;

/// One presented frame captured by [`TimelineSink`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineFrame {
    /// 0-based presentation index.
    pub index: u64,
    /// Curve progress at presentation.
    pub progress: f64,
    /// Curve instances shown.
    pub visible: bool,
    /// Last orb transform applied, if any.
    pub orb: Option<OrbFrame>,
    /// Left instance geometry.
    pub left: InstanceFrame,
    /// Right instance geometry.
    pub right: InstanceFrame,
}

/// Recorded result of a headless lifecycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Configuration the frames were produced with, including the pixel sizes a renderer
    /// needs to replay them.
    pub config: Config,
    /// Presented frames in order.
    pub frames: Vec<TimelineFrame>,
    /// The sink was released.
    pub released: bool,
    /// Driver state after the last frame.
    pub final_state: AnimState,
    /// Simulated host time at the end, in milliseconds.
    pub elapsed_ms: f64,
}

/// Headless [`VisualSink`] that samples the mirrored curve pair on every `render`.
#[derive(Debug)]
pub struct TimelineSink {
    left: CurveInstance,
    right: CurveInstance,
    cfg: Config,
    progress: f64,
    visible: bool,
    orb: Option<OrbFrame>,
    frames: Vec<TimelineFrame>,
    released: bool,
}

impl TimelineSink {
    /// Sink over the default mirrored instances.
    pub fn new(cfg: &Config) -> Self {
        Self::with_instances(cfg, CurveInstance::left(), CurveInstance::right())
    }

    /// Sink over custom instances.
    pub fn with_instances(cfg: &Config, left: CurveInstance, right: CurveInstance) -> Self {
        Self {
            left,
            right,
            cfg: cfg.clone(),
            progress: 0.0,
            visible: false,
            orb: None,
            frames: Vec::new(),
            released: false,
        }
    }

    /// Frames captured so far.
    pub fn frames(&self) -> &[TimelineFrame] {
        &self.frames
    }

    /// Whether `release` ran.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Finish recording.
    pub fn into_timeline(self, final_state: AnimState, elapsed_ms: f64) -> Timeline {
        Timeline {
            config: self.cfg,
            frames: self.frames,
            released: self.released,
            final_state,
            elapsed_ms,
        }
    }

    fn ensure_live(&self) -> OrbdrawResult<()> {
        if self.released {
            return Err(OrbdrawError::collaborator("timeline sink used after release"));
        }
        Ok(())
    }
}

impl VisualSink for TimelineSink {
    fn update_visual(&mut self, progress: f64) -> OrbdrawResult<()> {
        self.ensure_live()?;
        self.progress = progress;
        Ok(())
    }

    fn apply_orb(&mut self, orb: &OrbFrame) -> OrbdrawResult<()> {
        self.ensure_live()?;
        self.orb = Some(*orb);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> OrbdrawResult<()> {
        self.ensure_live()?;
        self.visible = visible;
        Ok(())
    }

    fn render(&mut self) -> OrbdrawResult<()> {
        self.ensure_live()?;
        self.frames.push(TimelineFrame {
            index: self.frames.len() as u64,
            progress: self.progress,
            visible: self.visible,
            orb: self.orb,
            left: self.left.sample(self.progress, self.cfg.line_segments),
            right: self.right.sample(self.progress, self.cfg.line_segments),
        });
        Ok(())
    }

    fn release(&mut self) -> OrbdrawResult<()> {
        self.ensure_live()?;
        self.released = true;
        Ok(())
    }
}

/// Host cadence for [`simulate_lifecycle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimOpts {
    /// Time between fired frames, in milliseconds.
    pub frame_interval_ms: f64,
    /// Idle time between the end of the forward run and the second trigger.
    pub idle_between_runs_ms: f64,
    /// Upper bound on fired frames.
    pub max_frames: u64,
}

impl Default for SimOpts {
    fn default() -> Self {
        Self::at_fps(60)
    }
}

impl SimOpts {
    /// Cadence of a display refreshing at `fps`.
    pub fn at_fps(fps: u32) -> Self {
        Self {
            frame_interval_ms: 1000.0 / f64::from(fps.max(1)),
            idle_between_runs_ms: 500.0,
            max_frames: 100_000,
        }
    }

    fn validate(&self) -> OrbdrawResult<()> {
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return Err(OrbdrawError::validation(
                "frame_interval_ms must be finite and > 0",
            ));
        }
        if !(self.idle_between_runs_ms.is_finite() && self.idle_between_runs_ms >= 0.0) {
            return Err(OrbdrawError::validation(
                "idle_between_runs_ms must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Drive a full forward-then-backward lifecycle headlessly and record every frame.
#[tracing::instrument(skip(cfg))]
pub fn simulate_lifecycle(cfg: &Config, opts: SimOpts) -> OrbdrawResult<Timeline> {
    opts.validate()?;
    let sink = TimelineSink::new(cfg);
    let mut driver = FrameDriver::new(cfg.clone(), ManualScheduler::new(), sink)?;
    let mut now = 0.0;
    let mut fired = 0u64;

    while !driver.is_terminated() {
        match driver.on_trigger()? {
            TriggerOutcome::Started { .. } => {}
            other => {
                return Err(OrbdrawError::validation(format!(
                    "trigger not accepted: {other:?}"
                )));
            }
        }
        while let Some(frame) = driver.scheduler_mut().next_frame() {
            if fired >= opts.max_frames {
                return Err(OrbdrawError::validation(format!(
                    "lifecycle did not finish within {} frames",
                    opts.max_frames
                )));
            }
            driver.on_frame(now, frame.run)?;
            fired += 1;
            now += opts.frame_interval_ms;
        }
        if !driver.is_terminated() {
            now += opts.idle_between_runs_ms;
        }
    }

    tracing::debug!(fired, elapsed_ms = now, "simulation finished");
    let final_state = *driver.state();
    let (_, sink) = driver.into_parts();
    Ok(sink.into_timeline(final_state, now))
}

#[cfg(test)]
#[path = "../../tests/unit/sim/timeline.rs"]
mod tests;
