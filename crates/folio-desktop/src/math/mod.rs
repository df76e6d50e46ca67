//! Screen-space geometry for window surfaces
//!
//! All coordinates are CSS pixels relative to the browser viewport,
//! origin at the top-left corner.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
