//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in `GameState`. It is a plain
//! owned struct mutated in place by the frame driver; nothing else holds it.

use glam::Vec2;
use serde::Serialize;

use super::geometry::Rect;
use super::mode::{GameMode, ModeTimer};
use super::trail::Trail;
use crate::Color;
use crate::settings::Settings;

/// Wall colour (medium gray)
pub const WALL_COLOR: Color = Color::rgb(0x888888);

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Centre, canvas coordinates
    pub pos: Vec2,
    /// Pixels per frame, set from held keys
    pub vel: Vec2,
    pub radius: f32,
    /// Axial speed in pixels per frame
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            speed,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// A static obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub rect: Rect,
    pub color: Color,
}

impl Wall {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            color: WALL_COLOR,
        }
    }
}

/// The fixed maze layout
///
/// Two walls hang off the bottom/right edges, so they follow the arena size.
pub fn default_walls(arena: Vec2) -> Vec<Wall> {
    vec![
        Wall::new(100.0, 100.0, 200.0, 20.0),
        Wall::new(100.0, 120.0, 20.0, 180.0),
        Wall::new(500.0, 100.0, 20.0, 250.0),
        Wall::new(100.0, arena.y - 120.0, 300.0, 20.0),
        Wall::new(arena.x - 300.0, arena.y - 250.0, 20.0, 200.0),
        Wall::new(300.0, 250.0, 150.0, 20.0),
    ]
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Canvas size the player is confined to
    pub arena: Vec2,
    pub player: Player,
    /// Fixed for the session
    pub walls: Vec<Wall>,
    pub trail: Trail,
    pub mode: ModeTimer,
}

impl GameState {
    pub fn new(settings: &Settings) -> Self {
        let arena = Vec2::new(settings.canvas_width, settings.canvas_height);
        Self {
            arena,
            player: Player::new(arena / 2.0, settings.player_radius, settings.player_speed),
            walls: default_walls(arena),
            trail: Trail::new(settings.trail_duration_ms, settings.trail_max_length),
            mode: ModeTimer::new(settings.light_duration_ms, settings.dark_duration_ms),
        }
    }

    /// Where the player starts and respawns
    pub fn spawn_point(&self) -> Vec2 {
        self.arena / 2.0
    }

    /// Put every transient value back to its initial state
    ///
    /// Walls are left alone; they never change.
    pub fn reset(&mut self) {
        self.player = Player::new(self.spawn_point(), self.player.radius, self.player.speed);
        self.trail.clear();
        self.mode.reset();
    }

    pub fn game_mode(&self) -> GameMode {
        self.mode.mode()
    }
}
