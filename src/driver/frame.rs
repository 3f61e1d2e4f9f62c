use crate::driver::host::{FrameToken, Scheduler, VisualSink};
use crate::foundation::config::Config;
use crate::foundation::error::OrbdrawResult;
use crate::orb::animator::{
    compute_orb_backward, compute_orb_forward, orb_entering_setup, orb_exiting_setup,
};
use crate::state::machine::{
    AnimState, Direction, RunId, choose_direction, start_run, stop_run, tick_step,
};

/// What a start trigger did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A run began and its first frame is scheduled.
    Started {
        /// Direction of the new run.
        direction: Direction,
        /// Token of the new run.
        run: RunId,
    },
    /// A run is already active.
    IgnoredRunning,
    /// The lifecycle is over; no further runs.
    IgnoredCompleted,
}

/// What a fired frame did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame belonged to an older run (or arrived after teardown) and was discarded.
    Stale,
    /// Progress advanced and the next frame is scheduled.
    Continued,
    /// The state was not running; nothing is scheduled.
    Idle,
    /// The forward run reached 1. The next trigger runs backward.
    ForwardComplete,
    /// The backward run reached 0; the sink has been released.
    LifecycleComplete,
}

/// Scheduling loop around the progress state machine.
///
/// The driver is the only component that talks to the [`Scheduler`] and the [`VisualSink`].
/// It owns the single [`AnimState`] and replaces it on every transition.
#[derive(Debug)]
pub struct FrameDriver<S, V> {
    cfg: Config,
    state: AnimState,
    scheduler: S,
    sink: V,
    pending: Option<FrameToken>,
    released: bool,
}

impl<S: Scheduler, V: VisualSink> FrameDriver<S, V> {
    /// Create a driver in the initial idle state.
    ///
    /// Fails when `cfg` does not validate.
    pub fn new(cfg: Config, scheduler: S, sink: V) -> OrbdrawResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            state: AnimState::new(),
            scheduler,
            sink,
            pending: None,
            released: false,
        })
    }

    /// Handle the start/toggle input.
    ///
    /// Ignored while a run is active and after the lifecycle completed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn on_trigger(&mut self) -> OrbdrawResult<TriggerOutcome> {
        if self.state.running {
            return Ok(TriggerOutcome::IgnoredRunning);
        }
        if self.state.lifecycle_completed {
            return Ok(TriggerOutcome::IgnoredCompleted);
        }

        let direction = choose_direction(&self.state);
        if !self.state.has_started_lifecycle {
            self.sink.set_visible(true)?;
        }
        match direction {
            Direction::Forward => self
                .sink
                .apply_orb(&orb_entering_setup(self.cfg.orb_depth_far))?,
            Direction::Backward => self.sink.apply_orb(&orb_exiting_setup())?,
        }

        let started = start_run(
            &self.cfg,
            &AnimState {
                direction,
                ..self.state
            },
        );
        self.state = match direction {
            Direction::Forward => AnimState {
                forward_start_t: started.t_end,
                ..started
            },
            Direction::Backward => started,
        };

        let run = self.state.run_id;
        self.reschedule(run);
        tracing::debug!(?direction, run = run.0, t_end = self.state.t_end, "run started");
        Ok(TriggerOutcome::Started { direction, run })
    }

    /// Handle a fired frame carrying the run token captured when it was scheduled.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_frame(&mut self, now_ms: f64, run: RunId) -> OrbdrawResult<FrameOutcome> {
        if self.released || run != self.state.run_id {
            tracing::trace!(
                run = run.0,
                current = self.state.run_id.0,
                "discarding stale frame"
            );
            return Ok(FrameOutcome::Stale);
        }
        self.pending = None;

        let step = tick_step(&self.cfg, &self.state, now_ms);
        self.state = step.state;
        let presented = self.present();

        if step.did_complete_lifecycle {
            let torn_down = self.teardown();
            presented.and(torn_down)?;
            return Ok(FrameOutcome::LifecycleComplete);
        }
        if let Err(err) = presented {
            if self.state.running {
                self.state = stop_run(&self.state);
            }
            tracing::warn!(run = run.0, t_end = self.state.t_end, "frame failed, run stopped");
            return Err(err);
        }
        if step.did_complete_forward {
            tracing::debug!(run = run.0, "forward run complete");
            return Ok(FrameOutcome::ForwardComplete);
        }
        if step.did_stop {
            return Ok(FrameOutcome::Idle);
        }

        self.reschedule(run);
        Ok(FrameOutcome::Continued)
    }

    /// Pause the active run in place. A later trigger resumes in the same direction.
    ///
    /// Returns `false` when nothing was running.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state = stop_run(&self.state);
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
        tracing::debug!(t_end = self.state.t_end, "run paused");
        true
    }

    /// Current lifecycle snapshot.
    pub fn state(&self) -> &AnimState {
        &self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// `true` once the sink has been released.
    pub fn is_terminated(&self) -> bool {
        self.released
    }

    /// Borrow the visual sink.
    pub fn sink(&self) -> &V {
        &self.sink
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler, e.g. to pop due frames in a headless host.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Give back the collaborators.
    pub fn into_parts(self) -> (S, V) {
        (self.scheduler, self.sink)
    }

    fn reschedule(&mut self, run: RunId) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
        self.pending = Some(self.scheduler.request_frame(run));
    }

    fn present(&mut self) -> OrbdrawResult<()> {
        self.sink.update_visual(self.state.t_end)?;
        if !self.state.lifecycle_completed {
            let orb = match self.state.direction {
                Direction::Forward => compute_orb_forward(
                    self.state.t_end,
                    self.state.forward_start_t,
                    self.cfg.orb_depth_far,
                ),
                Direction::Backward => {
                    compute_orb_backward(self.state.t_end, self.cfg.backward_fade_fraction)
                }
            };
            self.sink.apply_orb(&orb)?;
        }
        self.sink.render()
    }

    /// Runs once. Every step is attempted and `release` always runs; the first error wins.
    fn teardown(&mut self) -> OrbdrawResult<()> {
        let hidden = self.sink.set_visible(false);
        let faded = self.sink.apply_orb(&compute_orb_backward(
            0.0,
            self.cfg.backward_fade_fraction,
        ));
        let rendered = self.sink.render();
        let released = self.sink.release();
        self.released = true;
        tracing::info!(run = self.state.run_id.0, "lifecycle complete, sink released");
        hidden.and(faded).and(rendered).and(released)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/frame.rs"]
mod tests;
