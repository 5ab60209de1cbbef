//! Echo Maze - navigate a maze that goes dark every thirty seconds
//!
//! Core modules:
//! - `sim`: Simulation core (movement, collisions, trail, light/dark timer)
//! - `input`: Held keys to velocity
//! - `render`: Drawing primitives and the per-frame scene
//! - `frame`: Frame driver and cancellable frame scheduling
//! - `renderer`: WebGPU backend
//! - `platform`: Browser glue (canvas, keyboard, animation frames)
//! - `settings`: Tunable game configuration

pub mod frame;
pub mod input;
pub mod platform;
pub mod render;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use frame::{FrameDriver, FrameLoop, FrameScheduler};
pub use input::{InputAction, InputState, Key};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Drawable region in canvas pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Pixels per frame, not scaled by elapsed time
    pub const PLAYER_SPEED: f32 = 3.0;

    /// Trail lifetime in milliseconds
    pub const TRAIL_DURATION_MS: f64 = 4000.0;
    /// Max trail points (4s at 60fps)
    pub const TRAIL_MAX_LENGTH: usize = 240;

    /// Light/dark cycle in milliseconds
    pub const LIGHT_MODE_DURATION_MS: f64 = 30000.0;
    pub const DARK_MODE_DURATION_MS: f64 = 10000.0;
}

/// Straight (non-premultiplied) RGBA colour, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x000000);
    pub const WHITE: Color = Color::rgb(0xFFFFFF);

    /// Opaque colour from `0xRRGGBB`
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
