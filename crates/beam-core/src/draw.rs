use glam::Vec2;

use crate::color::Rgba;
use crate::geom::Rect;

/// A host-agnostic draw primitive. The host paints these in order, clipped
/// to the display list's clip rect; beam strokes expect additive blending.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Straight beam segment with butt caps.
    Stroke {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    /// Filled convex polygon.
    Polygon { points: Vec<Vec2>, color: Rgba },
    /// Caption text anchored at `pos` (baseline-left).
    Text {
        pos: Vec2,
        size: f32,
        color: Rgba,
        text: String,
    },
}

/// One render frame's output: draw commands plus the clip rect they belong
/// inside.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub clip: Rect,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(clip: Rect) -> Self {
        Self {
            clip,
            commands: Vec::new(),
        }
    }

    pub fn stroke(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Stroke {
            from,
            to,
            color,
            width,
        });
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, color: Rgba) {
        self.commands.push(DrawCommand::Polygon { points, color });
    }

    pub fn text(&mut self, pos: Vec2, size: f32, color: Rgba, text: impl Into<String>) {
        self.commands.push(DrawCommand::Text {
            pos,
            size,
            color,
            text: text.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate only the beam stroke segments.
    pub fn strokes(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke {
                from,
                to,
                color,
                width,
            } => Some((*from, *to, *color, *width)),
            _ => None,
        })
    }
}
