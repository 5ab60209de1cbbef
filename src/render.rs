//! Scene drawing on top of a minimal 2D surface
//!
//! The game only needs four primitives. Backends implement `Painter`; the
//! scene code below decides what to draw and in which order.

use glam::Vec2;

use crate::Color;
use crate::sim::{GameState, Rect};

/// Colours used by the scene
pub mod palette {
    use crate::Color;

    /// Electric indigo
    pub const PLAYER: Color = Color::rgb(0x6200EA);
    /// Saturated purple
    pub const TRAIL: Color = Color::rgb(0x9C27B0);
    pub const OVERLAY_TEXT: Color = Color::WHITE;
    pub const BACKGROUND_LIGHT: Color = Color::rgb(0x181818);
    pub const BACKGROUND_DARK: Color = Color::BLACK;
}

/// Trail dots are half the player's size
pub const TRAIL_DOT_SCALE: f32 = 0.5;

/// Overlay text position and line spacing
const OVERLAY_ORIGIN: Vec2 = Vec2::new(10.0, 20.0);
const OVERLAY_LINE_HEIGHT: f32 = 20.0;

/// A 2D drawing surface in canvas coordinates
pub trait Painter {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Left-aligned text with its baseline at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);
}

/// Milliseconds to seconds rounded to tenths, halves up
fn tenths_of_seconds(ms: f64) -> f64 {
    (ms / 100.0).round() / 10.0
}

/// The debug overlay, one entry per line
pub fn overlay_lines(state: &GameState) -> [String; 4] {
    let mode = state.game_mode();
    [
        format!(
            "Time until {}: {:.1}s",
            mode.upcoming_label(),
            tenths_of_seconds(state.mode.remaining_ms())
        ),
        format!("Trail Segments: {}", state.trail.len()),
        format!("Mode: {}", mode.as_str()),
        "Press 'R' to Reset".to_string(),
    ]
}

/// Paint one frame: background, walls, trail, player, overlay
///
/// Walls and the player are left out entirely in dark mode.
pub fn draw_scene(state: &GameState, painter: &mut dyn Painter) {
    let dark = state.game_mode().is_dark();

    painter.clear(if dark {
        palette::BACKGROUND_DARK
    } else {
        palette::BACKGROUND_LIGHT
    });

    if !dark {
        for wall in &state.walls {
            painter.fill_rect(wall.rect, wall.color);
        }
    }

    let dot_radius = state.player.radius * TRAIL_DOT_SCALE;
    for point in state.trail.points() {
        painter.fill_circle(point.pos, dot_radius, palette::TRAIL.with_alpha(point.opacity));
    }

    if !dark {
        painter.fill_circle(state.player.pos, state.player.radius, palette::PLAYER);
    }

    for (i, line) in overlay_lines(state).iter().enumerate() {
        let pos = OVERLAY_ORIGIN + Vec2::new(0.0, i as f32 * OVERLAY_LINE_HEIGHT);
        painter.draw_text(line, pos, palette::OVERLAY_TEXT);
    }
}

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, pos: Vec2, color: Color },
}

/// Painter that records commands for a backend to replay
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop everything recorded so far, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Colour of the last clear, if any
    pub fn background(&self) -> Option<Color> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DrawCommand::Clear(color) => Some(*color),
            _ => None,
        })
    }

    /// Text lines in draw order
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Painter for DisplayList {
    fn clear(&mut self, color: Color) {
        // Anything drawn before a clear is invisible
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::tick;

    fn count(list: &DisplayList, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|c| pred(*c)).count()
    }

    #[test]
    fn test_light_scene_order() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, 0.0, 0.0);

        let mut list = DisplayList::new();
        draw_scene(&state, &mut list);
        let cmds = list.commands();

        assert_eq!(cmds[0], DrawCommand::Clear(palette::BACKGROUND_LIGHT));
        assert!(cmds[1..7].iter().all(|c| matches!(c, DrawCommand::Rect { .. })));
        // One trail dot, then the player
        assert!(matches!(cmds[7], DrawCommand::Circle { radius, .. } if radius == 5.0));
        assert_eq!(
            cmds[8],
            DrawCommand::Circle {
                center: Vec2::new(400.0, 300.0),
                radius: 10.0,
                color: palette::PLAYER
            }
        );
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Text { .. })), 4);
    }

    #[test]
    fn test_dark_scene_hides_walls_and_player() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, 0.0, 0.0);
        state.mode.advance(30000.0);

        let mut list = DisplayList::new();
        draw_scene(&state, &mut list);

        assert_eq!(list.background(), Some(palette::BACKGROUND_DARK));
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Rect { .. })), 0);
        // Only the trail dot is left
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Circle { .. })), 1);
        assert_eq!(list.text_lines().nth(2), Some("Mode: DARK"));
    }

    #[test]
    fn test_trail_alpha_follows_opacity() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, 0.0, 0.0);
        tick(&mut state, 1000.0, 1000.0);

        let mut list = DisplayList::new();
        draw_scene(&state, &mut list);
        let alpha = list.commands().iter().find_map(|c| match c {
            DrawCommand::Circle { color, radius, .. } if *radius == 5.0 => Some(color.a),
            _ => None,
        });
        assert_eq!(alpha, Some(0.75));
    }

    #[test]
    fn test_overlay_text() {
        let mut state = GameState::new(&Settings::default());
        state.mode.advance(17660.0);
        let lines = overlay_lines(&state);
        assert_eq!(lines[0], "Time until Darkness: 12.3s");
        assert_eq!(lines[1], "Trail Segments: 0");
        assert_eq!(lines[2], "Mode: LIGHT");
        assert_eq!(lines[3], "Press 'R' to Reset");

        state.mode.advance(20000.0);
        assert_eq!(overlay_lines(&state)[0], "Time until Light: 10.0s");
    }

    #[test]
    fn test_countdown_rounds_halves_up() {
        let mut state = GameState::new(&Settings::default());
        state.mode.advance(30000.0 - 12250.0);
        assert_eq!(overlay_lines(&state)[0], "Time until Darkness: 12.3s");

        state.mode.advance(12250.0 - 50.0);
        assert_eq!(overlay_lines(&state)[0], "Time until Darkness: 0.1s");

        state.mode.advance(49.0);
        assert_eq!(overlay_lines(&state)[0], "Time until Darkness: 0.0s");
    }

    #[test]
    fn test_clear_discards_earlier_commands() {
        let mut list = DisplayList::new();
        list.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);
        list.clear(Color::BLACK);
        assert_eq!(list.commands(), &[DrawCommand::Clear(Color::BLACK)]);
    }
}
