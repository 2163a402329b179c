//! Drawing backend contract and a recording implementation of it
//!
//! The renderer only ever talks to a [`Canvas`]. [`DisplayList`] records the
//! calls as [`PaintCommand`]s so they can be inspected in tests or replayed onto
//! a real raster later.

use serde::{Deserialize, Serialize};

use super::layout::Point;
use super::style::{Font, Rgba};

/// Primitive 2D drawing operations the renderer needs.
pub trait Canvas {
    /// Flood the whole surface with one color.
    fn fill(&mut self, color: Rgba);

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    /// Filled circle.
    fn draw_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Draw `text` with its baseline starting at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &Font);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintCommand {
    Fill {
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Rgba,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
    },
}

/// A canvas that only records what was drawn on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Issue every recorded command, in order, against another canvas.
    pub fn replay<C: Canvas + ?Sized>(&self, target: &mut C) {
        for cmd in &self.commands {
            match cmd {
                PaintCommand::Fill { color } => target.fill(*color),
                PaintCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => target.draw_line(*from, *to, *color, *width),
                PaintCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.draw_circle(*center, *radius, *color),
                PaintCommand::Text { x, y, text, font } => target.draw_text(text, *x, *y, font),
            }
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &PaintCommand> {
        self.commands.iter().filter(|c| matches!(c, PaintCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &PaintCommand> {
        self.commands.iter().filter(|c| matches!(c, PaintCommand::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &PaintCommand> {
        self.commands.iter().filter(|c| matches!(c, PaintCommand::Text { .. }))
    }
}

impl Canvas for DisplayList {
    fn fill(&mut self, color: Rgba) {
        self.commands.push(PaintCommand::Fill { color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.commands.push(PaintCommand::Line { from, to, color, width });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.commands.push(PaintCommand::Circle { center, radius, color });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &Font) {
        self.commands.push(PaintCommand::Text {
            x,
            y,
            text: text.to_string(),
            font: font.clone(),
        });
    }
}
