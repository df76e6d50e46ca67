use serde::{Deserialize, Serialize};

use super::{lerp, Size, Vec2};

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from position and size
    pub fn from_pos_size(pos: Vec2, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Rectangle covering a viewport of the given size
    pub fn from_size(size: Size) -> Self {
        Self::from_pos_size(Vec2::ZERO, size)
    }

    /// True when the rectangle has no drawable area
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.x.is_finite()
            || !self.y.is_finite()
    }

    /// Linear interpolation between two rectangles
    pub fn lerp(from: &Rect, to: &Rect, t: f32) -> Rect {
        Rect::new(
            lerp(from.x, to.x, t),
            lerp(from.y, to.y, t),
            lerp(from.width, to.width, t),
            lerp(from.height, to.height, t),
        )
    }
}
