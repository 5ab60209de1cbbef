//! Whole-session behaviour through the public frame driver

use echo_maze::frame::SteppedScheduler;
use echo_maze::render::{DisplayList, DrawCommand, palette};
use echo_maze::sim::GameMode;
use echo_maze::{FrameDriver, FrameLoop, Settings};
use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Steps frames at 60 Hz through a stepped frame loop
struct Session {
    driver: FrameDriver,
    frames: FrameLoop<SteppedScheduler>,
    display: DisplayList,
    frame_index: u64,
}

impl Session {
    fn new() -> Self {
        let mut frames = FrameLoop::new(SteppedScheduler::default());
        frames.start();
        Self {
            driver: FrameDriver::new(&Settings::default()),
            frames,
            display: DisplayList::new(),
            frame_index: 0,
        }
    }

    fn run(&mut self, count: u64) {
        for _ in 0..count {
            let timestamp = self.frame_index as f64 * FRAME_MS;
            self.frame_at(timestamp);
        }
    }

    fn frame_at(&mut self, timestamp: f64) -> Option<GameMode> {
        let Self {
            driver,
            frames,
            display,
            frame_index,
        } = self;
        *frame_index += 1;
        frames
            .on_frame(|| driver.frame(timestamp, Some(display)))
            .flatten()
    }

    fn pos(&self) -> Vec2 {
        self.driver.state.player.pos
    }
}

#[test]
fn test_walking_right_stops_at_wall() {
    let mut session = Session::new();
    session.driver.key_down("d");
    session.run(100);
    assert_eq!(session.pos(), Vec2::new(487.0, 300.0));
}

#[test]
fn test_walking_up_stops_under_wall() {
    let mut session = Session::new();
    session.driver.key_down("ArrowUp");
    session.run(30);
    assert_eq!(session.pos(), Vec2::new(400.0, 282.0));
}

#[test]
fn test_diagonal_slides_along_wall() {
    let mut session = Session::new();
    session.driver.key_down("w");
    session.driver.key_down("d");
    session.run(11);
    let before = session.pos();
    session.run(1);
    let after = session.pos();

    assert_eq!(after.y, before.y);
    assert!(after.x > before.x);
}

#[test]
fn test_light_dark_cycle() {
    let mut session = Session::new();
    assert_eq!(session.frame_at(0.0), None);
    assert_eq!(session.frame_at(30000.0), Some(GameMode::Dark));
    assert_eq!(session.display.background(), Some(palette::BACKGROUND_DARK));
    assert!(
        !session
            .display
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { .. }))
    );
    assert_eq!(session.frame_at(40000.0), Some(GameMode::Light));
    assert_eq!(session.display.background(), Some(palette::BACKGROUND_LIGHT));
}

#[test]
fn test_reset_mid_session() {
    let mut session = Session::new();
    session.driver.key_down("s");
    session.run(60);
    assert_ne!(session.pos(), Vec2::new(400.0, 300.0));

    session.driver.key_down("r");
    assert_eq!(session.pos(), Vec2::new(400.0, 300.0));
    assert!(session.driver.state.trail.is_empty());

    // Held keys were dropped with the reset
    session.run(10);
    assert_eq!(session.pos(), Vec2::new(400.0, 300.0));
    assert_eq!(session.driver.state.trail.len(), 1);
}

#[test]
fn test_trail_stays_bounded_on_long_walks() {
    let mut session = Session::new();
    for (i, key) in ["d", "s", "a", "w"].iter().cycle().take(40).enumerate() {
        session.driver.key_down(key);
        session.run(25 + i as u64 % 7);
        session.driver.key_up(key);
        assert!(session.driver.state.trail.len() <= 240);
    }
    let segments = session
        .display
        .text_lines()
        .nth(1)
        .map(str::to_string)
        .unwrap_or_default();
    assert_eq!(
        segments,
        format!("Trail Segments: {}", session.driver.state.trail.len())
    );
}

#[test]
fn test_teardown_stops_frames() {
    let mut session = Session::new();
    session.run(3);
    session.frames.teardown();
    session.driver.key_down("d");
    session.run(3);
    assert_eq!(session.pos(), Vec2::new(400.0, 300.0));
    assert_eq!(session.frames.scheduler().cancelled, vec![3]);
}
