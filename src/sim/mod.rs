//! Simulation module
//!
//! All gameplay logic lives here:
//! - Geometry for circle vs rectangle overlap
//! - Per-frame movement with wall blocking
//! - The fading trail and the light/dark clock
//! - No rendering or platform dependencies

pub mod geometry;
pub mod mode;
pub mod motion;
pub mod state;
pub mod tick;
pub mod trail;

pub use geometry::{Circle, Rect, circle_intersects_rect};
pub use mode::{GameMode, ModeTimer};
pub use motion::{Blocked, blocked_axes, clamp_to_arena, next_position, step_player};
pub use state::{GameState, Player, WALL_COLOR, Wall, default_walls};
pub use tick::tick;
pub use trail::{Trail, TrailPoint, opacity_at};
