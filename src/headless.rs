//! Headless demo runs
//!
//! Plays a session without a browser: the autopilot holds the movement keys,
//! frames are drawn into a `CommandRecorder`, and time advances at 60 Hz.

use serde::Serialize;

use crate::render::CommandRecorder;
use crate::session::{Session, Viewport};
use crate::settings::Settings;
use crate::sim::autopilot;
use crate::sim::{Difficulty, Key};
use crate::tuning::Tuning;

/// Simulated frame length (60 Hz)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u32,
    pub score: u32,
    pub highscore: u32,
    pub game_over: bool,
    pub difficulty: Difficulty,
}

/// Play one autopilot episode of at most `max_frames` frames
pub fn run_autopilot(seed: u64, max_frames: u32, tuning: Tuning) -> RunSummary {
    let mut surface = CommandRecorder::new();
    let mut now = 0.0;
    let viewport = Viewport::new(tuning.max_board_width, tuning.min_canvas_height);
    let mut session = Session::new(Settings::default(), tuning, viewport, now, seed);

    // Let the initial resize settle
    while session.is_suspended() {
        match session.next_deadline() {
            Some(deadline) => {
                now = deadline;
                session.poll_timers(now, &mut surface);
            }
            None => break,
        }
    }

    session.key_down(Key::Other);
    let mut held: Option<Key> = None;
    let mut frames = 0;
    while frames < max_frames {
        now += FRAME_MS;
        session.poll_timers(now, &mut surface);

        let wanted = autopilot::choose_key(session.state());
        if wanted != held {
            if let Some(key) = held {
                session.key_up(key);
            }
            if let Some(key) = wanted {
                session.key_down(key);
            }
            held = wanted;
        }

        surface.clear_commands();
        frames += 1;
        if !session.frame(now, &mut surface) {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Autopilot run (seed {seed}): {frames} frames, score {}, over={}",
        state.score,
        state.is_over()
    );
    RunSummary {
        seed,
        frames,
        score: state.score,
        highscore: state.highscore,
        game_over: state.is_over(),
        difficulty: state.difficulty,
    }
}
