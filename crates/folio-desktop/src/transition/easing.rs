//! Easing functions for animations

/// CSS-style cubic Bézier timing curve with fixed endpoints (0,0) and (1,1)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Create a curve from its two control points
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    fn sample(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    #[inline]
    fn slope(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Evaluate the curve's output for time fraction `t`
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        // Newton-Raphson on x(s) = t, falling back to bisection
        let mut s = t;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - t;
            if err.abs() < 1e-5 {
                return Self::sample(self.y1, self.y2, s);
            }
            let d = Self::slope(self.x1, self.x2, s);
            if d.abs() < 1e-6 {
                break;
            }
            s = (s - err / d).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = t;
        for _ in 0..32 {
            let x = Self::sample(self.x1, self.x2, s);
            if (x - t).abs() < 1e-5 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        Self::sample(self.y1, self.y2, s)
    }
}

/// Timing curves used by window surfaces
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// No easing
    Linear,
    /// CSS `ease-out`
    EaseOut,
    /// `cubic-bezier(0.22, 1, 0.36, 1)`: fast start, long settle
    Window,
}

impl Easing {
    const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    const WINDOW: CubicBezier = CubicBezier::new(0.22, 1.0, 0.36, 1.0);

    /// Map linear progress in [0,1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::EaseOut => Self::EASE_OUT.apply(t),
            Easing::Window => Self::WINDOW.apply(t),
        }
    }
}
