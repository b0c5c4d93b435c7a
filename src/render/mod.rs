//! Rendering module
//!
//! The game draws through the small `DrawSurface` trait: clear, filled text
//! (icons are glyphs of the icon font), stroked rectangles and text
//! measurement. The browser backend wraps a Canvas 2D context; tests and the
//! headless runner record commands instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// Icon font family; the game must not start before it is loaded
pub const ICON_FONT_FAMILY: &str = "FontAwesome";
pub const ICON_FONT_URL: &str = concat!(
    "url(\"https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.5.0/",
    "fonts/fontawesome-webfont.woff2?v=4.5.0\")"
);

/// Glyphs of the icon font
pub mod glyphs {
    pub const BOT: &str = "\u{f215}";
    pub const BOT_MESSAGE: &str = "\u{f075}";
    pub const VISITOR_MESSAGE: &str = "\u{f0e5}";
    pub const SEND: &str = "\u{f1d9}";
    pub const SCORE: &str = "\u{f0e6}";
    pub const PARTICLE: &str = "\u{f164}";
}

/// CSS font strings
pub mod fonts {
    pub const ICON: &str = "600 16px FontAwesome";
    pub const PARTICLE: &str = "8px FontAwesome";
    pub const SCORE: &str = "400 16px monospace";
    pub const CHAT_FROM: &str = "600 10px monospace";
    pub const CHAT_TEXT: &str = "12px monospace";
}

/// CSS colours
pub mod colors {
    pub const BACKGROUND: &str = "#fff";
    pub const INK: &str = "black";
    pub const MUTED: &str = "#999";
}

/// How a run of text is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: &'static str,
    /// Global opacity, 1.0 = opaque
    pub alpha: f32,
}

impl TextStyle {
    pub const fn opaque(font: &'static str, color: &'static str) -> Self {
        Self {
            font,
            color,
            alpha: 1.0,
        }
    }
}

/// Size of a measured run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    /// Distance from the baseline to the top of the glyphs
    pub ascent: f32,
}

/// Anything the game can draw on
pub trait DrawSurface {
    /// Change the pixel size of the surface (clears it)
    fn resize(&mut self, width: f32, height: f32);
    /// Paint the whole surface with the background colour
    fn clear(&mut self, width: f32, height: f32);
    /// Fill `text` with its baseline-left corner at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
    /// Stroke a rectangle outline
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &'static str);
    fn measure_text(&mut self, text: &str, font: &'static str) -> TextMetrics;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: f32,
        height: f32,
    },
    Clear {
        width: f32,
        height: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &'static str,
    },
}

/// Surface that remembers what was drawn instead of rasterising it
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts drawn since the last clear
    pub fn texts_since_clear(&self) -> Vec<&str> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of glyphs/texts equal to `text` drawn since the last clear
    pub fn count_since_clear(&self, text: &str) -> usize {
        self.texts_since_clear()
            .into_iter()
            .filter(|t| *t == text)
            .count()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for CommandRecorder {
    fn resize(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &'static str) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    /// Monospace approximation: each char is 0.6em wide, ascent is 0.7em
    fn measure_text(&mut self, text: &str, font: &'static str) -> TextMetrics {
        let px = font_px(font);
        TextMetrics {
            width: text.chars().count() as f32 * px * 0.6,
            ascent: px * 0.7,
        }
    }
}

/// Pixel size out of a CSS font string such as `"600 10px monospace"`
fn font_px(font: &str) -> f32 {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px").and_then(|n| n.parse().ok()))
        .unwrap_or(16.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_px() {
        assert_eq!(font_px(fonts::CHAT_FROM), 10.0);
        assert_eq!(font_px(fonts::PARTICLE), 8.0);
        assert_eq!(font_px("serif"), 16.0);
    }

    #[test]
    fn test_recorder_texts_since_clear() {
        let mut r = CommandRecorder::new();
        r.fill_text("old", 0.0, 0.0, TextStyle::opaque(fonts::SCORE, colors::INK));
        r.clear(10.0, 10.0);
        r.fill_text("a", 0.0, 0.0, TextStyle::opaque(fonts::SCORE, colors::INK));
        r.fill_text("a", 1.0, 0.0, TextStyle::opaque(fonts::SCORE, colors::INK));
        assert_eq!(r.texts_since_clear(), vec!["a", "a"]);
        assert_eq!(r.count_since_clear("a"), 2);
        assert_eq!(r.count_since_clear("old"), 0);
    }
}
