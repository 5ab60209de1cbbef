//! Light/dark cycle
//!
//! The maze starts lit. When the countdown runs out the lights go off for a
//! shorter stretch, then come back, forever.

use serde::{Deserialize, Serialize};

/// Which phase of the cycle is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Walls and player are drawn
    #[default]
    Light,
    /// Only the trail and the overlay are drawn
    Dark,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Light => "LIGHT",
            GameMode::Dark => "DARK",
        }
    }

    /// What the countdown is counting toward, for the overlay
    pub fn upcoming_label(&self) -> &'static str {
        match self {
            GameMode::Light => "Darkness",
            GameMode::Dark => "Light",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, GameMode::Dark)
    }
}

/// Countdown clock for the current mode
#[derive(Debug, Clone, Serialize)]
pub struct ModeTimer {
    mode: GameMode,
    remaining_ms: f64,
    light_ms: f64,
    dark_ms: f64,
}

impl ModeTimer {
    pub fn new(light_ms: f64, dark_ms: f64) -> Self {
        Self {
            mode: GameMode::Light,
            remaining_ms: light_ms,
            light_ms,
            dark_ms,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    /// Count down by `dt_ms`; returns the new mode if a switch happened
    ///
    /// At most one switch per call. Any overshoot past zero is dropped, so the
    /// next phase always starts with its full duration.
    pub fn advance(&mut self, dt_ms: f64) -> Option<GameMode> {
        self.remaining_ms -= dt_ms;
        if self.remaining_ms > 0.0 {
            return None;
        }

        let (mode, duration) = match self.mode {
            GameMode::Light => (GameMode::Dark, self.dark_ms),
            GameMode::Dark => (GameMode::Light, self.light_ms),
        };
        self.mode = mode;
        self.remaining_ms = duration;
        Some(mode)
    }

    /// Back to the start of a light phase
    pub fn reset(&mut self) {
        self.mode = GameMode::Light;
        self.remaining_ms = self.light_ms;
    }
}
