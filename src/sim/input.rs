//! Keyboard input
//!
//! Key presses only record intent; the bot actually moves during the tick,
//! driven by whichever movement key is still held.

use super::state::{GameState, KeyHeld};

/// Logical key carried by a keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            _ => Key::Other,
        }
    }
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The press started a new episode; the host must kick off the frame loop
    Started,
    Handled,
}

/// Handle a key press
pub fn key_down(state: &mut GameState, key: Key) -> KeyOutcome {
    if state.start() {
        return KeyOutcome::Started;
    }
    let speed = state.tuning.bot_speed;
    match key {
        Key::Left => {
            state.bot.key_held = KeyHeld::Left;
            state.bot.vel_x = -speed;
        }
        Key::Right => {
            state.bot.key_held = KeyHeld::Right;
            state.bot.vel_x = speed;
        }
        Key::Other => {}
    }
    KeyOutcome::Handled
}

/// Handle a key release
pub fn key_up(state: &mut GameState, key: Key) {
    if matches!(key, Key::Left | Key::Right) {
        state.bot.key_held = KeyHeld::None;
    }
}

/// Move the bot one frame according to the held key.
///
/// A step that would leave `(0, width - icon)` is dropped entirely rather
/// than clamped.
pub fn update_bot(state: &mut GameState) {
    let next_x = state.bot.pos.x + state.bot.vel_x;
    let allowed = match state.bot.key_held {
        KeyHeld::Left => next_x > 0.0,
        KeyHeld::Right => next_x < state.board.bot_max_x(),
        KeyHeld::None => false,
    };
    if allowed {
        state.bot.pos.x = next_x;
    }
}
