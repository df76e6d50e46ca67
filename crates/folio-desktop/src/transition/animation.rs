use crate::math::{lerp, Rect};

use super::Easing;

/// Visual state of a window surface at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Screen rectangle
    pub rect: Rect,
    /// 0.0 = invisible, 1.0 = opaque
    pub opacity: f32,
    /// Uniform scale around the rectangle's center
    pub scale: f32,
    /// Corner radius in pixels
    pub corner_radius: f32,
}

impl Keyframe {
    /// Fully visible, unscaled keyframe
    pub fn solid(rect: Rect, corner_radius: f32) -> Self {
        Self {
            rect,
            opacity: 1.0,
            scale: 1.0,
            corner_radius,
        }
    }

    /// Interpolate every channel
    pub fn lerp(from: &Keyframe, to: &Keyframe, t: f32) -> Keyframe {
        Keyframe {
            rect: Rect::lerp(&from.rect, &to.rect, t),
            opacity: lerp(from.opacity, to.opacity, t),
            scale: lerp(from.scale, to.scale, t),
            corner_radius: lerp(from.corner_radius, to.corner_radius, t),
        }
    }
}

/// Time-based interpolation between two keyframes
#[derive(Clone, Debug)]
pub struct GeometryAnimation {
    /// Starting keyframe
    pub from: Keyframe,
    /// Target keyframe
    pub to: Keyframe,
    /// Start time (ms)
    pub start_time: f64,
    /// Duration (ms)
    pub duration_ms: f32,
    /// Timing curve
    pub easing: Easing,
}

impl GeometryAnimation {
    /// Create a new animation starting at `now`
    pub fn new(from: Keyframe, to: Keyframe, now: f64, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_time: now,
            duration_ms,
            easing,
        }
    }

    /// Get progress (0.0 to 1.0)
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start_time) as f32;
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Check if animation is complete
    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Get interpolated keyframe at current time
    pub fn current(&self, now: f64) -> Keyframe {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        Keyframe::lerp(&self.from, &self.to, self.easing.apply(progress))
    }
}
