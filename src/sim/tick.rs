//! Fixed timestep simulation tick
//!
//! Core loop that advances the round deterministically: countdown, shrink,
//! synchronous fan-out to the tiles, then gravity for whatever is falling.

use super::state::{ArenaPhase, ArenaState};
use super::timer::TimerPhase;

/// Advance the arena by one fixed timestep.
///
/// Shrink delivery is synchronous: when the timer fires, every tile named in
/// the payload has released its constraint before this function returns.
pub fn tick(state: &mut ArenaState, dt: f32) {
    if state.phase != ArenaPhase::Running {
        return;
    }

    state.time_ticks += 1;

    if state.timer.tick(dt) {
        let payload = state.map.shrink_map(&mut state.rng);
        if !payload.is_empty() {
            state.bus.raise(&payload);
        }
    }

    for tile in &state.tiles {
        tile.borrow_mut().integrate(dt);
    }

    // Round is over once the clock has run out and nothing is still falling
    if state.timer.phase == TimerPhase::Expired {
        let settled = state
            .tiles
            .iter()
            .all(|t| {
                let t = t.borrow();
                !t.released() || t.fallen
            });
        if settled {
            state.phase = ArenaPhase::Finished;
            log::info!(
                "Round finished: {} of {} tiles dropped",
                state.map.dropped_count(),
                state.map.tile_count()
            );
        }
    }
}
