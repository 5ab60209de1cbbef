//! One frame of simulation
//!
//! Order is fixed: move the player, update the trail, then run the clock.

use super::mode::GameMode;
use super::motion::step_player;
use super::state::GameState;

/// Advance the game by one frame
///
/// `now_ms` is the frame clock used to stamp trail points; `dt_ms` is the
/// time since the previous frame and only drives the light/dark timer.
/// Returns the new mode when the timer switched this frame.
pub fn tick(state: &mut GameState, now_ms: f64, dt_ms: f64) -> Option<GameMode> {
    step_player(&mut state.player, &state.walls, state.arena);

    state.trail.record(&state.player, now_ms);
    state.trail.decay(now_ms);

    let switched = state.mode.advance(dt_ms);
    if let Some(mode) = switched {
        log::info!(
            "Mode switched to {} ({:.1}s)",
            mode.as_str(),
            state.mode.remaining_ms() / 1000.0
        );
    }

    log::trace!(
        "tick now={:.1} dt={:.2} pos=({:.2}, {:.2}) trail={}",
        now_ms,
        dt_ms,
        state.player.pos.x,
        state.player.pos.y,
        state.trail.len()
    );

    switched
}
