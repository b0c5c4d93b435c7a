//! Demo-mode player
//!
//! Steers the bot under the visitor message closest to the chat bar. Used by
//! the headless runner and handy for soak tests.

use super::input::Key;
use super::state::GameState;

/// Distance within which the bot stops chasing its target
const DEAD_ZONE: f32 = 4.0;

/// The movement key the autopilot wants held this frame, if any
pub fn choose_key(state: &GameState) -> Option<Key> {
    let target = state
        .visitor_messages
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let dx = target.pos.x - state.bot.pos.x;
    if dx > DEAD_ZONE {
        Some(Key::Right)
    } else if dx < -DEAD_ZONE {
        Some(Key::Left)
    } else {
        None
    }
}
