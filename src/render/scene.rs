//! Scene drawing: board, chat bar, score and chat bubbles

use super::{DrawSurface, TextStyle, colors, fonts, glyphs};
use crate::consts::ICON_BASELINE;
use crate::overlay::{ChatMessage, Side};
use crate::sim::{GameBoard, GameState};

/// Horizontal inset of chat bubbles
const CHAT_INDENT: f32 = 10.0;
const CHAT_BUBBLE_HEIGHT: f32 = 35.0;

/// Draw a glyph of the icon font at `(x, y)` (top-left of the glyph row)
pub fn draw_icon(surface: &mut impl DrawSurface, glyph: &str, x: f32, y: f32, color: &'static str) {
    surface.fill_text(glyph, x, y + ICON_BASELINE, TextStyle::opaque(fonts::ICON, color));
}

/// Wipe the board and the chat bar
pub fn clear_board(surface: &mut impl DrawSurface, board: &GameBoard, chat_bar_height: f32) {
    surface.clear(board.width, board.height + chat_bar_height);
}

/// Input box outline with its send icon
pub fn draw_chat_section(surface: &mut impl DrawSurface, board: &GameBoard, chat_bar_height: f32) {
    surface.stroke_rect(
        5.0,
        board.height,
        board.width - 10.0,
        chat_bar_height - 10.0,
        colors::MUTED,
    );
    draw_icon(
        surface,
        glyphs::SEND,
        board.width - 30.0,
        board.height + 8.0,
        colors::MUTED,
    );
}

/// Score counter, plus the session highscore once there is one
pub fn draw_score(surface: &mut impl DrawSurface, score: u32, highscore: u32) {
    draw_icon(surface, glyphs::SCORE, 10.0, 12.0, colors::INK);
    let style = TextStyle::opaque(fonts::SCORE, colors::INK);
    surface.fill_text(&score.to_string(), 39.0, 25.0, style);
    if highscore > 0 {
        surface.fill_text(&format!("HI {highscore}"), 10.0, 45.0, style);
    }
}

/// Full frame: clear, chat bar, score, then every live entity
pub fn draw_frame(surface: &mut impl DrawSurface, state: &GameState) {
    let chat_bar_height = state.tuning.chat_bar_height;
    clear_board(surface, &state.board, chat_bar_height);
    draw_chat_section(surface, &state.board, chat_bar_height);
    draw_score(surface, state.score, state.highscore);

    draw_icon(surface, glyphs::BOT, state.bot.pos.x, state.bot.pos.y, colors::INK);
    for message in &state.bot_messages {
        draw_icon(surface, glyphs::BOT_MESSAGE, message.pos.x, message.pos.y, colors::INK);
    }
    for message in &state.visitor_messages {
        draw_icon(
            surface,
            glyphs::VISITOR_MESSAGE,
            message.pos.x,
            message.pos.y,
            colors::INK,
        );
    }
    for particle in &state.particles {
        surface.fill_text(
            glyphs::PARTICLE,
            particle.pos.x,
            particle.pos.y + ICON_BASELINE,
            TextStyle {
                font: fonts::PARTICLE,
                color: colors::INK,
                alpha: particle.alpha,
            },
        );
    }
}

/// One chat bubble: sender line above a boxed message
pub fn draw_chat_message(surface: &mut impl DrawSurface, board: &GameBoard, message: &ChatMessage) {
    let left = message.side == Side::Left;
    let y = message.y as f32;

    let from = surface.measure_text(&message.from, fonts::CHAT_FROM);
    let from_x = if left {
        CHAT_INDENT
    } else {
        board.width - from.width - CHAT_INDENT
    };
    surface.fill_text(
        &message.from,
        from_x,
        y + from.ascent,
        TextStyle::opaque(fonts::CHAT_FROM, colors::INK),
    );

    let text = surface.measure_text(&message.text, fonts::CHAT_TEXT);
    let text_x = if left {
        CHAT_INDENT * 2.0
    } else {
        board.width - text.width - CHAT_INDENT * 2.0
    };
    surface.fill_text(
        &message.text,
        text_x,
        y + text.ascent + CHAT_INDENT * 2.0 + 4.0,
        TextStyle::opaque(fonts::CHAT_TEXT, colors::INK),
    );

    let box_x = if left {
        CHAT_INDENT
    } else {
        board.width - text.width - 30.0
    };
    surface.stroke_rect(
        box_x,
        y + 12.0,
        text.width + 20.0,
        CHAT_BUBBLE_HEIGHT,
        colors::MUTED,
    );
}
