//! Start and end chat overlays
//!
//! Short scripted conversations between the organisation and the bot, shown
//! one bubble at a time before a game and after it ends.

use crate::settings::Settings;

/// Which side of the board a bubble hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Organisation messages
    Left,
    /// Bot messages
    Right,
}

/// One bubble of an overlay script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: String,
    pub text: String,
    /// Top of the bubble
    pub y: u32,
    pub side: Side,
}

impl ChatMessage {
    fn left(from: &str, text: impl Into<String>, y: u32) -> Self {
        Self {
            from: from.to_string(),
            text: text.into(),
            y,
            side: Side::Left,
        }
    }

    fn right(from: &str, text: impl Into<String>, y: u32) -> Self {
        Self {
            from: from.to_string(),
            text: text.into(),
            y,
            side: Side::Right,
        }
    }
}

/// Conversation shown while waiting for the first key press
pub fn start_script(settings: &Settings) -> Vec<ChatMessage> {
    let org = settings.org_name.as_str();
    let bot = settings.bot_name.as_str();
    vec![
        ChatMessage::left(org, format!("Hey, {bot}!"), 10),
        ChatMessage::right(bot, "What's up?", 70),
        ChatMessage::left(org, "We need help answering messages!", 130),
        ChatMessage::right(bot, "Sure thing!", 200),
        ChatMessage::left(org, "Press any key when ready!", 260),
    ]
}

/// Conversation shown after a game ends
pub fn end_script(settings: &Settings, score: u32) -> Vec<ChatMessage> {
    let org = settings.org_name.as_str();
    let bot = settings.bot_name.as_str();
    vec![
        ChatMessage::left(org, format!("You answered {score} messages"), 10),
        ChatMessage::left("", score_feedback(score), 50),
        ChatMessage::right(bot, "Got it!", 110),
        ChatMessage::left(org, "Press any key to play again!", 170),
    ]
}

/// Verdict on a final score
pub fn score_feedback(score: u32) -> &'static str {
    match score {
        0..50 => "You can do better!",
        50..150 => "Not bad!",
        150..300 => "Great work!",
        300..600 => "Awesome!",
        _ => "Impossible!",
    }
}
