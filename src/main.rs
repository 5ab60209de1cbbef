//! Echo Maze entry point
//!
//! The browser build starts through `echo_maze::platform::web::start`. The
//! native binary plays a headless session: a seeded random wanderer holds
//! keys while frames are stepped at 60 Hz, and a summary is logged.
//!
//! Usage: `echo-maze [FRAMES] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use echo_maze::frame::SteppedScheduler;
    use echo_maze::render::DisplayList;
    use echo_maze::sim::{ModeTimer, Player};
    use echo_maze::{FrameDriver, FrameLoop, Key, Settings};

    /// Synthetic frame interval (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    pub const DEFAULT_FRAMES: u64 = 3600;
    pub const DEFAULT_SEED: u64 = 0x5EED;

    const MOVE_KEYS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    /// Presses and releases movement keys at random intervals
    struct Wanderer {
        rng: Pcg32,
        held: Vec<&'static str>,
        frames_left: u32,
    }

    impl Wanderer {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                held: Vec::new(),
                frames_left: 0,
            }
        }

        fn step(&mut self, driver: &mut FrameDriver) {
            if self.frames_left > 0 {
                self.frames_left -= 1;
                return;
            }

            for name in self.held.drain(..) {
                driver.key_up(name);
            }

            // Mostly one key, sometimes a diagonal, sometimes standing still
            let count = match self.rng.random_range(0..10) {
                0 => 0,
                1..=2 => 2,
                _ => 1,
            };
            for _ in 0..count {
                let key = MOVE_KEYS[self.rng.random_range(0..MOVE_KEYS.len())];
                let bindings = key.bindings();
                let name = bindings[self.rng.random_range(0..bindings.len())];
                driver.key_down(name);
                self.held.push(name);
            }

            self.frames_left = self.rng.random_range(20..=90);
        }
    }

    #[derive(Serialize)]
    struct Summary<'a> {
        frames: u64,
        seed: u64,
        mode_switches: u32,
        trail_points: usize,
        player: &'a Player,
        mode: &'a ModeTimer,
    }

    /// Play up to `frame_count` frames
    ///
    /// Returns the final driver, the last frame's display list, the frames
    /// stepped and how often the light/dark mode switched.
    fn play(frame_count: u64, seed: u64) -> (FrameDriver, DisplayList, u64, u32) {
        let settings = Settings::load();
        log::debug!("Settings: {}", settings.to_json());
        let mut driver = FrameDriver::new(&settings);
        let mut wanderer = Wanderer::new(seed);
        let mut display = DisplayList::new();
        let mut frames = FrameLoop::new(SteppedScheduler::default());
        let mut mode_switches = 0;

        log::info!("Headless session: {frame_count} frames, seed {seed:#x}");

        frames.start();
        let mut stepped = 0;
        while stepped < frame_count && frames.has_pending() {
            let timestamp = stepped as f64 * FRAME_MS;
            frames.on_frame(|| {
                wanderer.step(&mut driver);
                if driver.frame(timestamp, Some(&mut display)).is_some() {
                    mode_switches += 1;
                }
            });
            stepped += 1;
        }
        frames.teardown();

        (driver, display, stepped, mode_switches)
    }

    pub fn run(frame_count: u64, seed: u64) -> Result<(), serde_json::Error> {
        let (driver, display, stepped, mode_switches) = play(frame_count, seed);

        for line in display.text_lines() {
            log::info!("{line}");
        }

        let summary = Summary {
            frames: stepped,
            seed,
            mode_switches,
            trail_points: driver.state.trail.len(),
            player: &driver.state.player,
            mode: &driver.state.mode,
        };
        log::info!("Summary: {}", serde_json::to_string(&summary)?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_same_seed_same_session() {
            let (a, _, _, _) = play(600, 7);
            let (b, _, _, _) = play(600, 7);
            assert_eq!(a.state.player, b.state.player);
            assert_eq!(a.state.trail.len(), b.state.trail.len());
        }

        #[test]
        fn test_wanderer_moves_the_player() {
            let (driver, _, stepped, _) = play(600, DEFAULT_SEED);
            assert_eq!(stepped, 600);
            assert_ne!(driver.state.player.pos, driver.state.spawn_point());
        }

        #[test]
        fn test_long_session_sees_both_modes() {
            // 41 s at 60 Hz covers one light and one dark phase
            let (driver, display, _, switches) = play(60 * 41, DEFAULT_SEED);
            assert_eq!(switches, 2);
            assert_eq!(driver.state.game_mode(), echo_maze::sim::GameMode::Light);
            assert_eq!(display.text_lines().count(), 4);
        }

        #[test]
        fn test_wanderer_only_presses_bindings() {
            let mut wanderer = Wanderer::new(3);
            let mut driver = FrameDriver::new(&Settings::default());
            for _ in 0..2000 {
                wanderer.step(&mut driver);
                assert!(wanderer.held.len() <= 2);
                assert!(
                    wanderer
                        .held
                        .iter()
                        .all(|name| Key::from_name(name).is_some_and(|k| k != Key::Reset))
                );
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Echo Maze (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in a browser");

    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(arg) => arg.parse()?,
        None => headless::DEFAULT_FRAMES,
    };
    let seed = match args.next() {
        Some(arg) => arg.parse()?,
        None => headless::DEFAULT_SEED,
    };

    headless::run(frames, seed)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `platform::web::start`, this is just to satisfy the compiler
}
