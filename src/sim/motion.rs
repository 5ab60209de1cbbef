//! Player movement with boundary clamping and wall blocking
//!
//! Velocity is applied once per frame, not scaled by elapsed time, so the
//! player's speed follows the display refresh rate.

use glam::Vec2;

use super::geometry::{Circle, circle_intersects_rect};
use super::state::{Player, Wall};

/// Keep a circle of `radius` inside an `arena`-sized canvas
pub fn clamp_to_arena(mut pos: Vec2, radius: f32, arena: Vec2) -> Vec2 {
    if pos.x - radius < 0.0 {
        pos.x = radius;
    }
    if pos.x + radius > arena.x {
        pos.x = arena.x - radius;
    }
    if pos.y - radius < 0.0 {
        pos.y = radius;
    }
    if pos.y + radius > arena.y {
        pos.y = arena.y - radius;
    }
    pos
}

/// Which axes of a move are blocked by walls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub x: bool,
    pub y: bool,
}

/// Test each axis of a move on its own against every wall
///
/// The horizontal move is checked at the old `y`, the vertical move at the
/// old `x`. A wall the player already overlaps blocks whichever axes still
/// overlap it; nothing pushes the player back out.
pub fn blocked_axes(from: Vec2, to: Vec2, radius: f32, walls: &[Wall]) -> Blocked {
    let x_pose = Circle::new(Vec2::new(to.x, from.y), radius);
    let y_pose = Circle::new(Vec2::new(from.x, to.y), radius);

    walls.iter().fold(Blocked::default(), |blocked, wall| Blocked {
        x: blocked.x || circle_intersects_rect(x_pose, &wall.rect),
        y: blocked.y || circle_intersects_rect(y_pose, &wall.rect),
    })
}

/// Where the player ends up after one frame
pub fn next_position(player: &Player, walls: &[Wall], arena: Vec2) -> Vec2 {
    let from = player.pos;
    let candidate = clamp_to_arena(from + player.vel, player.radius, arena);
    let blocked = blocked_axes(from, candidate, player.radius, walls);

    Vec2::new(
        if blocked.x { from.x } else { candidate.x },
        if blocked.y { from.y } else { candidate.y },
    )
}

/// Move the player one frame along its velocity
pub fn step_player(player: &mut Player, walls: &[Wall], arena: Vec2) {
    player.pos = next_position(player, walls, arena);
}
