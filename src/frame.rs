//! Frame driver and frame scheduling
//!
//! `FrameDriver` owns the game state and runs one complete frame at a time:
//! elapsed time, simulation, then drawing. `FrameLoop` keeps exactly one
//! frame request outstanding and guarantees it is cancelled on teardown.

use crate::input::{InputAction, InputState};
use crate::render::{Painter, draw_scene};
use crate::settings::Settings;
use crate::sim::{GameMode, GameState, tick};

/// Owns all mutable game state for a session
#[derive(Debug, Clone)]
pub struct FrameDriver {
    pub state: GameState,
    pub input: InputState,
    /// Timestamp of the previous frame (ms); `None` before the first frame
    last_timestamp: Option<f64>,
}

impl FrameDriver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: GameState::new(settings),
            input: InputState::new(),
            last_timestamp: None,
        }
    }

    /// Handle a key press by name; returns false for keys the game ignores
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.input.key_down(key) {
            Some(InputAction::Reset) => {
                self.reset();
                true
            }
            Some(InputAction::Move) => {
                self.refresh_velocity();
                true
            }
            None => false,
        }
    }

    /// Handle a key release by name; returns false for keys the game ignores
    pub fn key_up(&mut self, key: &str) -> bool {
        let handled = self.input.key_up(key).is_some();
        if handled {
            self.refresh_velocity();
        }
        handled
    }

    /// Back to a fresh session, without touching the frame clock
    pub fn reset(&mut self) {
        self.state.reset();
        self.input.clear();
        self.refresh_velocity();
        log::info!("Game reset");
    }

    fn refresh_velocity(&mut self) {
        self.state.player.vel = self.input.velocity(self.state.player.speed);
    }

    /// Milliseconds since the previous frame; 0 on the first frame
    fn elapsed(&mut self, timestamp: f64) -> f64 {
        let last = self.last_timestamp.replace(timestamp).unwrap_or(timestamp);
        timestamp - last
    }

    /// Run one frame at `timestamp` (ms, monotonic)
    ///
    /// Without a painter the frame is skipped: the clock moves on but the
    /// game does not. Returns the new mode if the light/dark timer switched.
    pub fn frame(&mut self, timestamp: f64, painter: Option<&mut dyn Painter>) -> Option<GameMode> {
        let dt = self.elapsed(timestamp);

        let Some(painter) = painter else {
            log::trace!("No drawing surface, skipping frame at {timestamp:.1}");
            return None;
        };

        let switched = tick(&mut self.state, timestamp, dt);
        draw_scene(&self.state, painter);
        switched
    }
}

/// Source of "call me on the next frame" requests
pub trait FrameScheduler {
    type Handle;

    /// Ask for the next frame; `None` if the host cannot schedule one
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Keeps one frame request in flight until torn down
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    running: bool,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
        }
    }

    /// Request the first frame
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.schedule();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Called when a requested frame fires
    ///
    /// Runs `work` to completion, then requests the next frame if the loop
    /// is still running. Frames never overlap.
    pub fn on_frame<R>(&mut self, work: impl FnOnce() -> R) -> Option<R> {
        // The request that fired is spent
        self.pending = None;
        if !self.running {
            return None;
        }
        let result = work();
        self.schedule();
        Some(result)
    }

    /// Stop the loop and cancel the outstanding request
    ///
    /// Safe to call more than once; the request is cancelled exactly once.
    pub fn teardown(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request failed, stopping loop");
            self.running = false;
        }
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Scheduler for hosts that step frames themselves (headless runs, tests)
///
/// Handles are sequence numbers; the host fires them by calling
/// `FrameLoop::on_frame`.
#[derive(Debug, Default)]
pub struct SteppedScheduler {
    next_handle: u64,
    /// Number of requests made so far
    pub requested: u64,
    /// Handles that were cancelled, in order
    pub cancelled: Vec<u64>,
}

impl FrameScheduler for SteppedScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        self.cancelled.push(handle);
    }
}
