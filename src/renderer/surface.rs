//! Drawing surface abstraction
//!
//! The simulation never touches pixels. Each tick it emits primitive draw calls
//! to a [`Surface`]; the wasm frontend backs it with a canvas 2D context, tests
//! and the native binary record into a [`CommandBuffer`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A fill or stroke color.
///
/// `Display` renders CSS color strings (`#rrggbb` / `hsl(h, s%, l%)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// 0xRRGGBB
    Hex(u32),
    Hsl { hue: u16, saturation: u8, lightness: u8 },
}

impl Color {
    pub const WHITE: Color = Color::Hex(0xffffff);
    pub const RED: Color = Color::Hex(0xff0000);

    /// Fully saturated, mid-lightness hue
    pub fn hue(hue: u16) -> Self {
        Color::Hsl {
            hue,
            saturation: 100,
            lightness: 50,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hex(rgb) => write!(f, "#{:06x}", rgb & 0xffffff),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({}, {}%, {}%)", hue, saturation, lightness),
        }
    }
}

/// Start/end angles of an arc in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub start: f32,
    pub end: f32,
}

impl AngleRange {
    /// A full circle
    pub const FULL: AngleRange = AngleRange {
        start: 0.0,
        end: std::f32::consts::TAU,
    };
}

/// Drawing capability supplied by the host
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, fill: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Color);

    /// Draw an arc; a `None` fill/stroke is skipped
    fn draw_circle(
        &mut self,
        pos: Vec2,
        radius: f32,
        angles: AngleRange,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: Option<f32>,
    );

    fn draw_text(&mut self, value: &str, pos: Vec2);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear,
    Rect {
        pos: Vec2,
        size: Vec2,
        fill: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        stroke: Color,
    },
    Circle {
        pos: Vec2,
        radius: f32,
        angles: AngleRange,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: Option<f32>,
    },
    Text {
        value: String,
        pos: Vec2,
    },
}

/// Surface that records commands for the current frame.
///
/// `clear()` drops everything recorded so far, so after a tick the buffer holds
/// exactly that tick's frame.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Circles drawn with the given radius, in draw order
    pub fn circles_with_radius(&self, radius: f32) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| {
            matches!(c, DrawCommand::Circle { radius: r, .. } if (*r - radius).abs() < f32::EPSILON)
        })
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, fill: Color) {
        self.commands.push(DrawCommand::Rect { pos, size, fill });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, stroke: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            stroke,
        });
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
        self.commands.push(DrawCommand::Circle {
            pos,
            radius,
            angles,
            fill,
            stroke,
            stroke_width,
        });
    }

    fn draw_text(&mut self, value: &str, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            value: value.to_string(),
            pos,
        });
    }
}
