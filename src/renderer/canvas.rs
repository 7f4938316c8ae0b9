//! Canvas 2D surface (browser only)

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{AngleRange, Color, Surface};

const BACKGROUND: &str = "#fff";
const SCORE_STYLE: &str = "hsla(0, 0%, 25%, 60%)";
const SCORE_FONT: &str = "400 500px sans-serif";

/// [`Surface`] drawing straight into a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font(SCORE_FONT);
        Self { canvas, ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, fill: Color) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&fill.to_string());
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Color) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&stroke.to_string());
        self.ctx.stroke();
    }

    fn draw_circle(
        &mut self,
        pos: Vec2,
        radius: f32,
        angles: AngleRange,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: Option<f32>,
    ) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            pos.x as f64,
            pos.y as f64,
            radius as f64,
            angles.start as f64,
            angles.end as f64,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(&fill.to_string());
            self.ctx.fill();
        }
        if let Some(stroke) = stroke {
            if let Some(width) = stroke_width {
                self.ctx.set_line_width(width as f64);
            }
            self.ctx.set_stroke_style_str(&stroke.to_string());
            self.ctx.stroke();
        }
    }

    fn draw_text(&mut self, value: &str, pos: Vec2) {
        self.ctx.set_fill_style_str(SCORE_STYLE);
        if let Err(e) = self.ctx.fill_text(value, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
