//! Canvas 2D backend (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawSurface, TextMetrics, TextStyle, colors};
use crate::StartupError;

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, StartupError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(StartupError::NoContext)?;
        ctx.set_line_join("round");
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        // Setting the size resets the context state
        self.ctx.set_line_join("round");
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.set_fill_style_str(colors::BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        if style.alpha < 1.0 {
            self.ctx.save();
            self.ctx.set_global_alpha(style.alpha.max(0.0) as f64);
            let _ = self.ctx.fill_text(text, x as f64, y as f64);
            self.ctx.restore();
        } else {
            let _ = self.ctx.fill_text(text, x as f64, y as f64);
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &'static str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx
            .stroke_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn measure_text(&mut self, text: &str, font: &'static str) -> TextMetrics {
        self.ctx.set_font(font);
        match self.ctx.measure_text(text) {
            Ok(m) => TextMetrics {
                width: m.width() as f32,
                ascent: m.actual_bounding_box_ascent() as f32,
            },
            Err(e) => {
                log::warn!("measureText failed: {:?}", e);
                TextMetrics {
                    width: 0.0,
                    ascent: 0.0,
                }
            }
        }
    }
}
