//! Render-loop state machine.
//!
//! The loop goes `Idle → Running` once and stays there. Every frame runs the
//! same serial pipeline: time-driven mutations, control easing, render.
//! A render error is logged and the frame counted as failed; the next frame
//! runs normally.

use crate::clock::FrameTime;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    Failed,
    /// The loop has not been started yet.
    Skipped,
}

/// The three per-frame stages, run in this order.
pub trait FrameStages {
    type Error: Display;

    fn animate(&mut self, time: &FrameTime);
    fn update_controls(&mut self);
    fn render(&mut self) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
    failed: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Transition to `Running`. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        log::info!("[loop] running");
        true
    }

    pub fn step<S: FrameStages + ?Sized>(&mut self, stages: &mut S, time: FrameTime) -> FrameOutcome {
        if self.state != LoopState::Running {
            return FrameOutcome::Skipped;
        }
        self.frames += 1;
        stages.animate(&time);
        stages.update_controls();
        match stages.render() {
            Ok(()) => FrameOutcome::Rendered,
            Err(e) => {
                self.failed += 1;
                log::warn!("[loop] frame {} failed: {}", self.frames, e);
                FrameOutcome::Failed
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed
    }
}
