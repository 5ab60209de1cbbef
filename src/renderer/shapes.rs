//! Triangle generation for the display list

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{CanvasTransform, Vertex};
use crate::Color;
use crate::render::{DisplayList, DrawCommand};
use crate::sim::Rect;

/// Segments used for circles of the player's size
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled rectangle (two triangles)
pub fn rect(t: &CanvasTransform, rect: &Rect, color: Color) -> [Vertex; 6] {
    let min = rect.min();
    let max = rect.max();
    let top_left = t.vertex(min, color);
    let top_right = t.vertex(Vec2::new(max.x, min.y), color);
    let bottom_left = t.vertex(Vec2::new(min.x, max.y), color);
    let bottom_right = t.vertex(max, color);

    [
        top_left,
        bottom_left,
        top_right,
        top_right,
        bottom_left,
        bottom_right,
    ]
}

/// Generate vertices for a filled circle
pub fn circle(
    t: &CanvasTransform,
    center: Vec2,
    radius: f32,
    color: Color,
    segments: u32,
    out: &mut Vec<Vertex>,
) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(t.vertex(center, color));
        out.push(t.vertex(
            center + Vec2::new(radius * theta1.cos(), radius * theta1.sin()),
            color,
        ));
        out.push(t.vertex(
            center + Vec2::new(radius * theta2.cos(), radius * theta2.sin()),
            color,
        ));
    }
}

/// Fewer segments for small circles (trail dots)
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 2.4) as u32).clamp(8, CIRCLE_SEGMENTS)
}

/// Everything a GPU pass needs from a display list
#[derive(Debug, Default)]
pub struct Tessellation {
    pub clear: Option<Color>,
    pub vertices: Vec<Vertex>,
}

/// Turn recorded commands into triangles, in draw order
///
/// Text is skipped; the platform layer shows it outside the canvas.
pub fn tessellate(list: &DisplayList, t: &CanvasTransform) -> Tessellation {
    let mut out = Tessellation::default();

    for cmd in list.commands() {
        match cmd {
            DrawCommand::Clear(color) => {
                out.clear = Some(*color);
                out.vertices.clear();
            }
            DrawCommand::Rect { rect: r, color } => {
                out.vertices.extend_from_slice(&rect(t, r, *color));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                circle(
                    t,
                    *center,
                    *radius,
                    *color,
                    segments_for(*radius),
                    &mut out.vertices,
                );
            }
            DrawCommand::Text { .. } => {}
        }
    }

    out
}
