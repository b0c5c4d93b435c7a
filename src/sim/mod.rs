//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Wall-clock time is passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (insertion order, unique entity IDs)
//! - No rendering or browser dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{first_hit, overlaps, register_hit};
pub use input::{Key, KeyOutcome, key_down, key_up};
pub use state::{
    Bot, BotMessage, Difficulty, ExplosionParticle, GameBoard, GameEvent, GamePhase, GameState,
    KeyHeld, VisitorMessage,
};
pub use tick::tick;
