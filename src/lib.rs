//! Bot Intercept - a chat-themed arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, input)
//! - `render`: Draw-surface abstraction and scene drawing
//! - `overlay`: Scripted start/end chat sequences
//! - `timers`: Deadline list for delayed one-shot actions
//! - `session`: Page lifecycle (game over pause, resize debounce, reinit)
//! - `settings` / `tuning`: Display names and data-driven game balance
//! - `headless`: Browserless autopilot runs

pub mod headless;
pub mod overlay;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod timers;
pub mod tuning;

pub use session::{Session, Viewport};
pub use settings::Settings;
pub use tuning::Tuning;

use std::fmt;

/// Fixed geometry shared by the simulation and the renderer
pub mod consts {
    /// Width of the bot glyph; the bot's x never exceeds `board.width - BOT_ICON_WIDTH`
    pub const BOT_ICON_WIDTH: f32 = 22.0;
    /// Offset from the bot's centre spawn x (half the glyph, rounded)
    pub const BOT_SPAWN_OFFSET_X: f32 = 10.0;
    /// Distance of the bot and newly fired messages above the chat bar
    pub const BOT_ROW_OFFSET: f32 = 16.0;

    /// Collision half-extents around a visitor message
    pub const HIT_HALF_WIDTH: f32 = 16.0;
    pub const HIT_HALF_HEIGHT: f32 = 5.0;

    /// Bot messages above this y are gone
    pub const BOT_MESSAGE_EXIT_Y: f32 = -10.0;
    /// Visitor messages start above the visible board
    pub const VISITOR_SPAWN_Y: f32 = -20.0;
    /// Horizontal margin for visitor spawns
    pub const VISITOR_SPAWN_MARGIN: i32 = 30;

    /// Icon glyph size in pixels
    pub const ICON_SIZE: f32 = 16.0;
    /// Baseline offset applied when drawing glyphs
    pub const ICON_BASELINE: f32 = 12.0;
}

/// Failure to bring the game up in the browser.
///
/// Only startup can fail; once running, every frame is a total function of
/// the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    NoWindow,
    NoDocument,
    NoCanvas,
    NoContext,
    FontLoad(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::NoWindow => write!(f, "no window"),
            StartupError::NoDocument => write!(f, "no document"),
            StartupError::NoCanvas => write!(f, "no #gameboard canvas element"),
            StartupError::NoContext => write!(f, "canvas has no 2d context"),
            StartupError::FontLoad(reason) => write!(f, "icon font failed to load: {reason}"),
        }
    }
}

impl std::error::Error for StartupError {}
