//! Page session lifecycle
//!
//! Owns the current episode plus everything around it: the pause before the
//! end overlay, staggered chat bubbles, and the debounced resize that rebuilds
//! the board. The host drives it with key events, animation frames and
//! timer polls; all timestamps are wall-clock milliseconds.

use crate::overlay::{self, ChatMessage};
use crate::render::DrawSurface;
use crate::render::scene::{clear_board, draw_chat_message, draw_chat_section, draw_frame};
use crate::settings::Settings;
use crate::sim::{self, GameBoard, GameEvent, GameState, Key, KeyOutcome};
use crate::timers::Scheduler;
use crate::tuning::Tuning;

/// Browser viewport (or canvas) size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas size for this viewport: capped width, floored height
    pub fn canvas_size(&self, tuning: &Tuning) -> Viewport {
        Viewport {
            width: self.width.min(tuning.max_board_width),
            height: self.height.max(tuning.min_canvas_height),
        }
    }
}

/// Delayed actions the session schedules for itself
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Game-over pause elapsed
    ShowEndOverlay,
    /// Next bubble of an overlay script
    RevealChat(ChatMessage),
    /// Viewport stopped changing
    ResizeSettled(Viewport),
    /// Reflow done; rebuild the board
    ApplyResize(Viewport),
}

/// One page's worth of play
pub struct Session {
    state: GameState,
    settings: Settings,
    tuning: Tuning,
    timers: Scheduler<TimerAction>,
    canvas: Viewport,
    /// Frames and input are ignored until a pending resize is applied
    suspended: bool,
    seed: u64,
    episodes: u64,
}

impl Session {
    /// Create a session and queue the initial resize, exactly as if the
    /// viewport had just changed to `viewport`.
    pub fn new(
        settings: Settings,
        tuning: Tuning,
        viewport: Viewport,
        now_ms: f64,
        seed: u64,
    ) -> Self {
        let canvas = viewport.canvas_size(&tuning);
        let board = GameBoard::from_canvas(canvas.width, canvas.height, tuning.chat_bar_height);
        let state = GameState::new(board, tuning.clone(), 0, now_ms, seed);
        let mut session = Self {
            state,
            settings,
            tuning,
            timers: Scheduler::new(),
            canvas,
            suspended: true,
            seed,
            episodes: 0,
        };
        session.resize(viewport, now_ms);
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that inject entities
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn canvas_size(&self) -> Viewport {
        self.canvas
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Earliest pending timer; the host should call `poll_timers` then
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    /// Key press. Returns true when it started an episode and the host must
    /// begin requesting frames.
    pub fn key_down(&mut self, key: Key) -> bool {
        if self.suspended {
            return false;
        }
        sim::key_down(&mut self.state, key) == KeyOutcome::Started
    }

    pub fn key_up(&mut self, key: Key) {
        sim::key_up(&mut self.state, key);
    }

    /// Run and draw one animation frame. Returns whether another frame
    /// should be requested.
    pub fn frame(&mut self, now_ms: f64, surface: &mut impl DrawSurface) -> bool {
        if self.suspended || !self.state.is_started() || self.state.is_over() {
            return false;
        }

        let events = sim::tick(&mut self.state, now_ms);
        draw_frame(surface, &self.state);

        for event in &events {
            if let GameEvent::GameOver { .. } = event {
                self.timers.schedule_after(
                    now_ms,
                    self.tuning.game_over_pause_ms,
                    TimerAction::ShowEndOverlay,
                );
            }
        }

        !self.state.is_over()
    }

    /// Viewport changed; restarts the debounce window
    pub fn resize(&mut self, viewport: Viewport, now_ms: f64) {
        self.timers
            .cancel_where(|a| matches!(a, TimerAction::ResizeSettled(_)));
        self.timers.schedule_after(
            now_ms,
            self.tuning.resize_debounce_ms,
            TimerAction::ResizeSettled(viewport),
        );
    }

    /// Fire every timer due at `now_ms`, including ones queued while firing
    pub fn poll_timers(&mut self, now_ms: f64, surface: &mut impl DrawSurface) {
        loop {
            let due = self.timers.poll(now_ms);
            if due.is_empty() {
                break;
            }
            for action in due {
                self.fire(action, now_ms, surface);
            }
        }
    }

    fn fire(&mut self, action: TimerAction, now_ms: f64, surface: &mut impl DrawSurface) {
        match action {
            TimerAction::ShowEndOverlay => {
                let score = self.state.score;
                clear_board(surface, &self.state.board, self.tuning.chat_bar_height);
                draw_chat_section(surface, &self.state.board, self.tuning.chat_bar_height);
                self.stagger_chat(overlay::end_script(&self.settings, score), now_ms);
                self.reinit(now_ms);
            }
            TimerAction::RevealChat(message) => {
                if !self.state.is_started() {
                    draw_chat_message(surface, &self.state.board, &message);
                }
            }
            TimerAction::ResizeSettled(viewport) => {
                // Stop the frame loop while the page reflows
                self.suspended = true;
                self.timers.schedule_after(
                    now_ms,
                    self.tuning.resize_settle_ms,
                    TimerAction::ApplyResize(viewport),
                );
            }
            TimerAction::ApplyResize(viewport) => {
                self.canvas = viewport.canvas_size(&self.tuning);
                surface.resize(self.canvas.width, self.canvas.height);
                // A resize abandons the episode, including its pending end overlay
                self.timers
                    .cancel_where(|a| matches!(a, TimerAction::ShowEndOverlay));
                self.reinit(now_ms);
                log::info!(
                    "Board resized to {}x{}",
                    self.state.board.width,
                    self.state.board.height
                );
                clear_board(surface, &self.state.board, self.tuning.chat_bar_height);
                draw_chat_section(surface, &self.state.board, self.tuning.chat_bar_height);
                self.stagger_chat(overlay::start_script(&self.settings), now_ms);
                self.suspended = false;
            }
        }
    }

    /// Queue `script` one bubble per stagger interval, first one immediately
    fn stagger_chat(&mut self, script: Vec<ChatMessage>, now_ms: f64) {
        for (i, message) in script.into_iter().enumerate() {
            self.timers.schedule_after(
                now_ms,
                i as f64 * self.tuning.chat_stagger_ms,
                TimerAction::RevealChat(message),
            );
        }
    }

    /// Fresh episode on the current canvas; the highscore carries over
    fn reinit(&mut self, now_ms: f64) {
        self.episodes += 1;
        let board = GameBoard::from_canvas(
            self.canvas.width,
            self.canvas.height,
            self.tuning.chat_bar_height,
        );
        self.state = GameState::new(
            board,
            self.tuning.clone(),
            self.state.highscore,
            now_ms,
            self.seed.wrapping_add(self.episodes),
        );
    }
}
