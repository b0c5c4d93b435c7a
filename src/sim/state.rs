//! Game state and core simulation types
//!
//! One `GameState` exists per episode; `GameState::new` is the reset used at
//! startup, after the game-over overlay and after every resize.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start overlay showing, waiting for any key
    AwaitingStart,
    /// Active gameplay
    Playing,
    /// A visitor message reached the chat bar
    Over,
}

/// Movement key currently held down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyHeld {
    #[default]
    None,
    Left,
    Right,
}

/// Playable area above the chat bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameBoard {
    pub width: f32,
    pub height: f32,
}

impl GameBoard {
    /// Board for a canvas of the given size; the chat bar takes the bottom strip
    pub fn from_canvas(canvas_width: f32, canvas_height: f32, chat_bar_height: f32) -> Self {
        Self {
            width: canvas_width,
            height: (canvas_height - chat_bar_height).max(0.0),
        }
    }

    /// Rightmost x the bot may occupy
    pub fn bot_max_x(&self) -> f32 {
        self.width - BOT_ICON_WIDTH
    }

    /// y at which bot messages are fired and past which visitors end the game
    pub fn bot_row_y(&self) -> f32 {
        self.height - BOT_ROW_OFFSET
    }
}

/// The player's bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub pos: Vec2,
    /// Horizontal velocity set by the last movement key press
    pub vel_x: f32,
    pub key_held: KeyHeld,
}

/// A reply fired upward by the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotMessage {
    pub id: u32,
    pub pos: Vec2,
}

/// A falling visitor message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorMessage {
    pub id: u32,
    pub pos: Vec2,
}

/// A fading fragment of an interception
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionParticle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 when spawned; removed once it reaches 0
    pub alpha: f32,
}

/// Difficulty ratchets; each only rises, up to its own ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Bot messages per second
    pub bot_fire_rate: f32,
    /// Visitor messages per second
    pub visitor_spawn_rate: f32,
    /// Visitor fall speed (px per frame)
    pub visitor_fall_speed: f32,
}

impl Difficulty {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            bot_fire_rate: tuning.bot_fire_rate,
            visitor_spawn_rate: tuning.visitor_spawn_rate,
            visitor_fall_speed: tuning.visitor_fall_speed,
        }
    }

    /// Raise every parameter by one step, clamped at its ceiling.
    ///
    /// A parameter already at (or above) its ceiling is left untouched so a
    /// lowered ceiling in tuning never drags a value down.
    pub fn ratchet(&mut self, tuning: &Tuning) {
        self.bot_fire_rate = step_up(
            self.bot_fire_rate,
            tuning.bot_fire_rate_step,
            tuning.bot_fire_rate_max,
        );
        self.visitor_spawn_rate = step_up(
            self.visitor_spawn_rate,
            tuning.visitor_spawn_rate_step,
            tuning.visitor_spawn_rate_max,
        );
        self.visitor_fall_speed = step_up(
            self.visitor_fall_speed,
            tuning.visitor_fall_speed_step,
            tuning.visitor_fall_speed_max,
        );
    }
}

fn step_up(value: f32, step: f32, max: f32) -> f32 {
    if value >= max {
        value
    } else {
        (value + step).min(max)
    }
}

/// Something that happened during a tick; the session and tests observe these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BotMessageFired { id: u32 },
    /// Bot message left the top of the board without hitting anything
    BotMessageExited { id: u32 },
    VisitorSpawned { id: u32, x: f32 },
    Intercepted {
        visitor_id: u32,
        bot_message_id: u32,
        pos: Vec2,
        score: u32,
    },
    DifficultyRaised(Difficulty),
    ParticleFaded { id: u32 },
    GameOver {
        score: u32,
        highscore: u32,
        new_highscore: bool,
    },
}

/// Complete state of one episode
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: GameBoard,
    pub tuning: Tuning,
    pub bot: Bot,
    pub difficulty: Difficulty,
    pub score: u32,
    /// Best score this session; survives `new` via the caller
    pub highscore: u32,
    pub phase: GamePhase,
    /// Timestamps (ms) of the last spawns
    pub last_bot_message_at: f64,
    pub last_visitor_message_at: f64,
    /// Live entities in insertion order
    pub bot_messages: Vec<BotMessage>,
    pub visitor_messages: Vec<VisitorMessage>,
    pub particles: Vec<ExplosionParticle>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh episode awaiting the start key
    pub fn new(board: GameBoard, tuning: Tuning, highscore: u32, now_ms: f64, seed: u64) -> Self {
        // Boards narrower than the glyph pin the bot to the left edge
        let max_x = board.bot_max_x().max(0.0);
        let spawn_x = (board.width / 2.0 - BOT_SPAWN_OFFSET_X).clamp(0.0, max_x);
        let bot = Bot {
            pos: Vec2::new(spawn_x, board.bot_row_y()),
            vel_x: 0.0,
            key_held: KeyHeld::None,
        };
        Self {
            board,
            difficulty: Difficulty::initial(&tuning),
            bot,
            score: 0,
            highscore,
            phase: GamePhase::AwaitingStart,
            last_bot_message_at: now_ms,
            last_visitor_message_at: now_ms - tuning.first_visitor_head_start_ms,
            bot_messages: Vec::new(),
            visitor_messages: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            next_id: 1,
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::AwaitingStart
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// AwaitingStart -> Playing; returns false if already started
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::AwaitingStart {
            return false;
        }
        self.phase = GamePhase::Playing;
        log::info!("Episode started");
        true
    }

    /// Playing -> Over, settling the highscore exactly once
    pub fn finish(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::Over;
        let new_highscore = self.score > self.highscore;
        self.highscore = self.highscore.max(self.score);
        log::info!(
            "Game over: score {} (highscore {}{})",
            self.score,
            self.highscore,
            if new_highscore { ", new" } else { "" }
        );
        Some(GameEvent::GameOver {
            score: self.score,
            highscore: self.highscore,
            new_highscore,
        })
    }

    /// Add a bot message at `pos`
    pub fn spawn_bot_message(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.bot_messages.push(BotMessage { id, pos });
        id
    }

    /// Add a visitor message at `pos`
    pub fn spawn_visitor_message(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.visitor_messages.push(VisitorMessage { id, pos });
        id
    }

    /// Add a particle
    pub fn spawn_particle(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.particles.push(ExplosionParticle {
            id,
            pos,
            vel,
            alpha: 1.0,
        });
        id
    }
}
