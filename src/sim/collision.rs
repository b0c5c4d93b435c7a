//! Interception tests and scoring

use glam::Vec2;

use super::rng::{random_range, random_sign};
use super::state::{BotMessage, GameEvent, GameState, VisitorMessage};
use crate::consts::{HIT_HALF_HEIGHT, HIT_HALF_WIDTH};

/// Does the bot message sit inside the visitor message's hit box?
///
/// The box is open: a bot message exactly on the edge misses.
pub fn overlaps(visitor: &VisitorMessage, bot_message: &BotMessage) -> bool {
    let d = bot_message.pos - visitor.pos;
    d.x.abs() < HIT_HALF_WIDTH && d.y.abs() < HIT_HALF_HEIGHT
}

/// Index of the first bot message (in insertion order) hitting the visitor
pub fn first_hit(visitor: &VisitorMessage, bot_messages: &[BotMessage]) -> Option<usize> {
    bot_messages.iter().position(|b| overlaps(visitor, b))
}

/// Spawn an explosion at `pos`, bump the score and ratchet difficulty on
/// every `score_step`-th point. Returns the events produced.
pub fn register_hit(state: &mut GameState, pos: Vec2) -> Vec<GameEvent> {
    explode(state, pos);

    state.score += 1;
    let step = state.tuning.score_step.max(1);
    if state.score % step == 0 {
        state.difficulty.ratchet(&state.tuning);
        log::info!(
            "Score {}: difficulty now fire {:.2}/s spawn {:.2}/s fall {:.2}",
            state.score,
            state.difficulty.bot_fire_rate,
            state.difficulty.visitor_spawn_rate,
            state.difficulty.visitor_fall_speed
        );
        return vec![GameEvent::DifficultyRaised(state.difficulty)];
    }
    Vec::new()
}

/// Burst of particles flying out from `pos` with random per-axis speeds
pub fn explode(state: &mut GameState, pos: Vec2) {
    let (min, max) = (
        state.tuning.particle_speed_min,
        state.tuning.particle_speed_max,
    );
    for _ in 0..state.tuning.particles_per_hit {
        let dx = random_sign(&mut state.rng) * random_range(&mut state.rng, min, max) as f32;
        let dy = random_sign(&mut state.rng) * random_range(&mut state.rng, min, max) as f32;
        state.spawn_particle(pos, Vec2::new(dx, dy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameBoard;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let board = GameBoard::from_canvas(580.0, 640.0, 40.0);
        GameState::new(board, Tuning::default(), 0, 0.0, 42)
    }

    fn visitor(x: f32, y: f32) -> VisitorMessage {
        VisitorMessage {
            id: 1,
            pos: Vec2::new(x, y),
        }
    }

    fn bot(x: f32, y: f32) -> BotMessage {
        BotMessage {
            id: 2,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_overlap_inside_box() {
        let v = visitor(100.0, 200.0);
        assert!(overlaps(&v, &bot(100.0, 200.0)));
        assert!(overlaps(&v, &bot(115.9, 204.9)));
        assert!(overlaps(&v, &bot(84.1, 195.1)));
    }

    #[test]
    fn test_overlap_edges_are_open() {
        let v = visitor(100.0, 200.0);
        assert!(!overlaps(&v, &bot(116.0, 200.0)));
        assert!(!overlaps(&v, &bot(84.0, 200.0)));
        assert!(!overlaps(&v, &bot(100.0, 205.0)));
        assert!(!overlaps(&v, &bot(100.0, 195.0)));
    }

    #[test]
    fn test_first_hit_wins() {
        let v = visitor(100.0, 200.0);
        let bots = vec![
            BotMessage {
                id: 5,
                pos: Vec2::new(300.0, 200.0),
            },
            BotMessage {
                id: 6,
                pos: Vec2::new(110.0, 203.0),
            },
            BotMessage {
                id: 7,
                pos: Vec2::new(100.0, 200.0),
            },
        ];
        // The exact match comes later; insertion order decides
        assert_eq!(first_hit(&v, &bots), Some(1));
        assert_eq!(first_hit(&v, &bots[..1]), None);
    }

    #[test]
    fn test_explosion_spawns_particles_at_hit() {
        let mut s = state();
        explode(&mut s, Vec2::new(50.0, 60.0));
        assert_eq!(s.particles.len(), 10);
        for p in &s.particles {
            assert_eq!(p.pos, Vec2::new(50.0, 60.0));
            assert_eq!(p.alpha, 1.0);
            assert!((1.0..3.0).contains(&p.vel.x.abs()));
            assert!((1.0..3.0).contains(&p.vel.y.abs()));
        }
    }

    #[test]
    fn test_register_hit_ratchets_every_tenth_point() {
        let mut s = state();
        let start = s.difficulty;
        for _ in 0..9 {
            assert!(register_hit(&mut s, Vec2::ZERO).is_empty());
        }
        assert_eq!(s.difficulty, start);

        let events = register_hit(&mut s, Vec2::ZERO);
        assert_eq!(s.score, 10);
        assert_eq!(events, vec![GameEvent::DifficultyRaised(s.difficulty)]);
        assert!((s.difficulty.bot_fire_rate - 1.2).abs() < 1e-5);
        assert!((s.difficulty.visitor_spawn_rate - 1.05).abs() < 1e-5);
        assert!((s.difficulty.visitor_fall_speed - 0.35).abs() < 1e-5);
    }
}
