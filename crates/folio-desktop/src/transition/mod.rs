//! Window geometry animation
//!
//! Surfaces never rely on CSS transitions. Each animated change is a
//! [`GeometryAnimation`] between two [`Keyframe`]s, sampled by the host on
//! every animation frame with the current time in milliseconds.
//!
//! - Opening: card rectangle -> window geometry, [`Easing::Window`]
//! - Closing: current geometry -> card rectangle, fading and shrinking
//! - Snap: fullscreen toggle and restore, short [`Easing::EaseOut`]

mod animation;
mod easing;

pub use animation::{GeometryAnimation, Keyframe};
pub use easing::{CubicBezier, Easing};

/// Duration of the open animation in milliseconds
pub const OPEN_DURATION_MS: f32 = 800.0;

/// Duration of the close animation in milliseconds
pub const CLOSE_DURATION_MS: f32 = 600.0;

/// Duration of fullscreen and restore snaps in milliseconds
pub const SNAP_DURATION_MS: f32 = 150.0;
