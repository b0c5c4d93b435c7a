//! Data-driven game balance
//!
//! Every number that shapes difficulty or pacing lives here so it can be
//! overridden from JSON without touching the simulation.

use serde::{Deserialize, Serialize};

/// Balance and timing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bot ===
    /// Horizontal bot speed (px per frame)
    pub bot_speed: f32,
    /// Upward speed of bot messages (px per frame)
    pub bot_message_speed: f32,

    // === Difficulty (start values) ===
    /// Bot messages per second
    pub bot_fire_rate: f32,
    /// Visitor messages per second
    pub visitor_spawn_rate: f32,
    /// Visitor fall speed (px per frame)
    pub visitor_fall_speed: f32,

    // === Difficulty ratchets ===
    /// Difficulty rises every time the score hits a multiple of this
    pub score_step: u32,
    pub bot_fire_rate_step: f32,
    pub bot_fire_rate_max: f32,
    pub visitor_spawn_rate_step: f32,
    pub visitor_spawn_rate_max: f32,
    pub visitor_fall_speed_step: f32,
    pub visitor_fall_speed_max: f32,

    // === Explosions ===
    pub particles_per_hit: usize,
    /// Alpha lost per frame
    pub particle_fade: f32,
    /// Particle speed is drawn from `[min, max)` per axis
    pub particle_speed_min: i32,
    pub particle_speed_max: i32,

    // === Board ===
    pub chat_bar_height: f32,
    pub max_board_width: f32,
    pub min_canvas_height: f32,

    // === Delays (ms) ===
    /// Head start for the first visitor message after init
    pub first_visitor_head_start_ms: f64,
    pub resize_debounce_ms: f64,
    pub resize_settle_ms: f64,
    pub game_over_pause_ms: f64,
    pub chat_stagger_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bot_speed: 5.0,
            bot_message_speed: 5.0,

            bot_fire_rate: 1.1,
            visitor_spawn_rate: 1.0,
            visitor_fall_speed: 0.3,

            score_step: 10,
            bot_fire_rate_step: 0.1,
            bot_fire_rate_max: 3.0,
            visitor_spawn_rate_step: 0.05,
            visitor_spawn_rate_max: 2.5,
            visitor_fall_speed_step: 0.05,
            visitor_fall_speed_max: 1.0,

            particles_per_hit: 10,
            particle_fade: 0.05,
            particle_speed_min: 1,
            particle_speed_max: 3,

            chat_bar_height: 40.0,
            max_board_width: 580.0,
            min_canvas_height: 600.0,

            first_visitor_head_start_ms: 1500.0,
            resize_debounce_ms: 500.0,
            resize_settle_ms: 50.0,
            game_over_pause_ms: 1000.0,
            chat_stagger_ms: 1500.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an override, falling back to defaults on malformed input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning overrides: {e}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bot_speed": 8.0, "score_step": 5 }"#).unwrap();
        assert_eq!(tuning.bot_speed, 8.0);
        assert_eq!(tuning.score_step, 5);
        assert_eq!(tuning.visitor_fall_speed_max, 1.0);
        assert_eq!(tuning.game_over_pause_ms, 1000.0);
    }

    #[test]
    fn test_malformed_override_falls_back() {
        let tuning = Tuning::from_json_or_default(Some("{ not json"));
        assert_eq!(tuning, Tuning::default());
        assert_eq!(Tuning::from_json_or_default(None), Tuning::default());
    }
}
