//! End-to-end gameplay scenarios through the public API

use bot_intercept::headless::run_autopilot;
use bot_intercept::render::CommandRecorder;
use bot_intercept::render::glyphs;
use bot_intercept::sim::{GameBoard, GameEvent, GamePhase, GameState, Key, key_down, tick};
use bot_intercept::{Session, Settings, Tuning, Viewport};
use glam::Vec2;

/// Playing episode at t=0 whose spawn timers will not fire before t=500
fn quiet_playing_state() -> GameState {
    let board = GameBoard::from_canvas(580.0, 640.0, 40.0);
    let mut state = GameState::new(board, Tuning::default(), 0, 0.0, 3);
    key_down(&mut state, Key::Other);
    state.last_visitor_message_at = 0.0;
    state.last_bot_message_at = 0.0;
    state
}

/// Bot message and visitor placed so they meet after this frame's moves
fn stage_collision(state: &mut GameState, x: f32, y: f32) {
    let fall = state.difficulty.visitor_fall_speed;
    let rise = state.tuning.bot_message_speed;
    state.spawn_bot_message(Vec2::new(x, y + rise));
    state.spawn_visitor_message(Vec2::new(x, y - fall));
}

#[test]
fn test_fresh_game_without_input_survives_a_while() {
    let board = GameBoard::from_canvas(580.0, 640.0, 40.0);
    let mut state = GameState::new(board, Tuning::default(), 0, 0.0, 3);
    key_down(&mut state, Key::Other);
    let bot_x = state.bot.pos.x;

    for frame in 1..=100 {
        tick(&mut state, frame as f64 * 16.0);
        assert!(!state.is_over(), "frame {frame}");
    }

    assert_eq!(state.score, 0);
    assert_eq!(state.bot.pos.x, bot_x);
    // The first visitor spawns at once and falls
    assert!(!state.visitor_messages.is_empty());
    assert!(state.visitor_messages[0].pos.y > -20.0);
}

#[test]
fn test_coincident_hit_scores_and_explodes() {
    let mut state = quiet_playing_state();
    stage_collision(&mut state, 200.0, 300.0);

    let events = tick(&mut state, 100.0);

    assert_eq!(state.score, 1);
    assert!(state.bot_messages.is_empty());
    assert!(state.visitor_messages.is_empty());
    assert_eq!(state.particles.len(), 10);
    // Particles spawned this frame already faded once
    assert!(state.particles.iter().all(|p| (p.alpha - 0.95).abs() < 1e-6));
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Intercepted { score: 1, .. }))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn test_tenth_point_raises_difficulty_once() {
    let mut state = quiet_playing_state();
    state.score = 9;
    stage_collision(&mut state, 200.0, 300.0);

    let events = tick(&mut state, 100.0);

    assert_eq!(state.score, 10);
    let raised: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DifficultyRaised(_)))
        .collect();
    assert_eq!(raised.len(), 1);
    assert!((state.difficulty.bot_fire_rate - 1.2).abs() < 1e-5);
    assert!((state.difficulty.visitor_spawn_rate - 1.05).abs() < 1e-5);
    assert!((state.difficulty.visitor_fall_speed - 0.35).abs() < 1e-5);

    // The eleventh point does not ratchet again
    stage_collision(&mut state, 400.0, 200.0);
    let events = tick(&mut state, 116.0);
    assert_eq!(state.score, 11);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::DifficultyRaised(_)))
    );
}

#[test]
fn test_visitor_reaching_chat_bar_ends_game() {
    let mut state = quiet_playing_state();
    state.score = 4;
    state.highscore = 2;
    let limit = state.board.bot_row_y();
    state.spawn_visitor_message(Vec2::new(150.0, limit));

    let events = tick(&mut state, 100.0);

    assert_eq!(state.phase, GamePhase::Over);
    assert_eq!(state.highscore, 4);
    assert!(events.contains(&GameEvent::GameOver {
        score: 4,
        highscore: 4,
        new_highscore: true,
    }));

    // Over is terminal for the tick
    assert!(tick(&mut state, 200.0).is_empty());
}

#[test]
fn test_session_resize_resets_episode_and_keeps_highscore() {
    let mut surface = CommandRecorder::new();
    let mut session = Session::new(
        Settings::from_params(Some("Acme".to_string()), Some("Robo".to_string())),
        Tuning::default(),
        Viewport::new(1024.0, 768.0),
        0.0,
        11,
    );
    session.poll_timers(500.0, &mut surface);
    session.poll_timers(550.0, &mut surface);
    assert_eq!(session.canvas_size(), Viewport::new(580.0, 768.0));

    assert!(session.key_down(Key::Other));
    session.state_mut().highscore = 12;
    session.state_mut().score = 3;
    assert!(session.frame(600.0, &mut surface));

    session.resize(Viewport::new(360.0, 640.0), 700.0);
    // Play continues during the debounce window
    assert!(session.frame(716.0, &mut surface));
    session.poll_timers(1200.0, &mut surface);
    assert!(!session.frame(1216.0, &mut surface));
    session.poll_timers(1250.0, &mut surface);

    let state = session.state();
    assert_eq!(state.phase, GamePhase::AwaitingStart);
    assert_eq!(state.score, 0);
    assert_eq!(state.highscore, 12);
    assert_eq!(state.board, GameBoard::from_canvas(360.0, 640.0, 40.0));
    assert_eq!(state.bot.pos.x, 360.0 / 2.0 - 10.0);

    // Start overlay was redrawn on a clean board
    let texts = surface.texts_since_clear();
    assert!(texts.contains(&glyphs::SEND));
    assert!(texts.contains(&"Acme"));
}

#[test]
fn test_game_over_overlay_then_restart() {
    let mut surface = CommandRecorder::new();
    let mut session = Session::new(
        Settings::default(),
        Tuning::default(),
        Viewport::new(580.0, 640.0),
        0.0,
        5,
    );
    session.poll_timers(500.0, &mut surface);
    session.poll_timers(550.0, &mut surface);
    assert!(!session.is_suspended());
    assert!(session.key_down(Key::Other));
    session.state_mut().score = 60;
    let limit = session.state().board.bot_row_y();
    session
        .state_mut()
        .spawn_visitor_message(Vec2::new(100.0, limit));
    assert!(!session.frame(1000.0, &mut surface));

    session.poll_timers(2000.0, &mut surface);
    assert_eq!(session.state().phase, GamePhase::AwaitingStart);
    assert_eq!(session.state().highscore, 60);
    assert!(surface.texts_since_clear().contains(&"You answered 60 messages"));

    // Any key starts the next episode
    assert!(session.key_down(Key::Right));
    assert!(session.frame(2016.0, &mut surface));
}

#[test]
fn test_autopilot_runs_are_reproducible() {
    let a = run_autopilot(77, 3_000, Tuning::default());
    let b = run_autopilot(77, 3_000, Tuning::default());

    assert_eq!(a.frames, b.frames);
    assert_eq!(a.score, b.score);
    assert_eq!(a.game_over, b.game_over);
    assert_eq!(a.difficulty, b.difficulty);
    // The highscore only settles when an episode ends
    if a.game_over {
        assert_eq!(a.highscore, a.score);
    } else {
        assert_eq!(a.highscore, 0);
    }
}
