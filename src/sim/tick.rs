//! Per-frame simulation tick
//!
//! One call advances every entity by one animation frame. Spawning is paced
//! by wall-clock timestamps, motion by frames.

use glam::Vec2;

use super::collision::{first_hit, register_hit};
use super::input::update_bot;
use super::rng::random_range;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one frame at wall-clock time `now_ms`.
///
/// Does nothing unless the episode is `Playing`. Order matters: the bot moves
/// before it fires, bot messages move before visitors are tested against
/// them, and particles spawned by this frame's hits already fade once.
pub fn tick(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    update_bot(state);
    fire_bot_message(state, now_ms, &mut events);
    update_bot_messages(state, &mut events);
    spawn_visitor_message(state, now_ms, &mut events);
    update_visitor_messages(state, &mut events);
    update_particles(state, &mut events);

    events
}

/// Fire from the bot's position if the fire interval has elapsed
fn fire_bot_message(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    let interval = 1.0 / state.difficulty.bot_fire_rate as f64;
    if (now_ms - state.last_bot_message_at) / 1000.0 < interval {
        return;
    }
    state.last_bot_message_at = now_ms;
    let pos = Vec2::new(state.bot.pos.x, state.board.bot_row_y());
    let id = state.spawn_bot_message(pos);
    events.push(GameEvent::BotMessageFired { id });
}

/// Move bot messages up; drop the ones already past the top
fn update_bot_messages(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let speed = state.tuning.bot_message_speed;
    state.bot_messages.retain_mut(|message| {
        if message.pos.y < BOT_MESSAGE_EXIT_Y {
            events.push(GameEvent::BotMessageExited { id: message.id });
            return false;
        }
        message.pos.y -= speed;
        true
    });
}

/// Drop a new visitor message above the board if the spawn interval has elapsed
fn spawn_visitor_message(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) {
    let interval = 1.0 / state.difficulty.visitor_spawn_rate as f64;
    if (now_ms - state.last_visitor_message_at) / 1000.0 <= interval {
        return;
    }
    let max_x = state.board.width as i32 - VISITOR_SPAWN_MARGIN;
    let x = random_range(&mut state.rng, VISITOR_SPAWN_MARGIN, max_x) as f32;
    let id = state.spawn_visitor_message(Vec2::new(x, VISITOR_SPAWN_Y));
    state.last_visitor_message_at = now_ms;
    log::debug!("Visitor message {id} at x={x}");
    events.push(GameEvent::VisitorSpawned { id, x });
}

/// Advance visitor messages, ending the game or resolving interceptions.
///
/// Entities are removed by index as they are resolved, so each visitor is
/// visited exactly once and a consumed bot message cannot hit twice.
fn update_visitor_messages(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fall = state.difficulty.visitor_fall_speed;
    let limit = state.board.bot_row_y();

    let mut i = 0;
    while i < state.visitor_messages.len() {
        state.visitor_messages[i].pos.y += fall;
        let visitor = state.visitor_messages[i].clone();

        if visitor.pos.y > limit {
            state.visitor_messages.remove(i);
            events.extend(state.finish());
            // Nothing else may score once the episode is over
            return;
        }

        if let Some(hit) = first_hit(&visitor, &state.bot_messages) {
            let bot_message = state.bot_messages.remove(hit);
            state.visitor_messages.remove(i);
            let ratchets = register_hit(state, visitor.pos);
            log::debug!(
                "Visitor {} intercepted by {} (score {})",
                visitor.id,
                bot_message.id,
                state.score
            );
            events.push(GameEvent::Intercepted {
                visitor_id: visitor.id,
                bot_message_id: bot_message.id,
                pos: visitor.pos,
                score: state.score,
            });
            events.extend(ratchets);
            continue;
        }

        i += 1;
    }
}

/// Fade and drift explosion particles
fn update_particles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fade = state.tuning.particle_fade;
    state.particles.retain_mut(|particle| {
        particle.alpha -= fade;
        if particle.alpha <= 0.0 {
            events.push(GameEvent::ParticleFaded { id: particle.id });
            return false;
        }
        particle.pos += particle.vel;
        true
    });
}
