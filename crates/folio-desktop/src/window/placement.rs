//! Random initial placement of new windows

use crate::math::{Size, Vec2};

/// Source of uniformly distributed values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// Operating system randomness via `getrandom`
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_unit(&mut self) -> f32 {
        let mut buf = [0u8; 4];
        match getrandom::getrandom(&mut buf) {
            // 24 random bits fit an f32 mantissa exactly
            Ok(()) => (u32::from_le_bytes(buf) >> 8) as f32 / (1u32 << 24) as f32,
            Err(err) => {
                tracing::warn!(%err, "random source unavailable, placing at origin");
                0.0
            }
        }
    }
}

/// Always returns the same value; for deterministic layouts and tests
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(pub f32);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f32 {
        self.0.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Random top-left corner biased toward the upper-left of the viewport
///
/// Each axis is drawn from `[0, bias * (viewport - window))`. A window
/// larger than the viewport on an axis is placed at 0 on that axis.
pub fn initial_position(
    viewport: Size,
    window: Size,
    bias: f32,
    rng: &mut dyn RandomSource,
) -> Vec2 {
    let span_x = (viewport.width - window.width).max(0.0) * bias;
    let span_y = (viewport.height - window.height).max(0.0) * bias;
    Vec2::new(rng.next_unit() * span_x, rng.next_unit() * span_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_random_placement() {
        let pos = initial_position(
            Size::new(1920.0, 1080.0),
            Size::new(1200.0, 800.0),
            0.3,
            &mut FixedRandom(0.5),
        );
        assert!((pos.x - 108.0).abs() < 0.001);
        assert!((pos.y - 42.0).abs() < 0.001);
    }

    #[test]
    fn test_oversized_window_placed_at_origin() {
        let pos = initial_position(
            Size::new(1000.0, 700.0),
            Size::new(1200.0, 800.0),
            0.3,
            &mut FixedRandom(0.9),
        );
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_os_random_in_unit_range() {
        let mut rng = OsRandom;
        for _ in 0..64 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    proptest! {
        #[test]
        fn placement_within_biased_region(
            u in 0.0f32..1.0,
            vw in 600.0f32..4000.0,
            vh in 400.0f32..3000.0,
        ) {
            let window = Size::new(1200.0, 800.0);
            let pos = initial_position(Size::new(vw, vh), window, 0.3, &mut FixedRandom(u));
            prop_assert!(pos.x >= 0.0 && pos.y >= 0.0);
            prop_assert!(pos.x <= (vw - window.width).max(0.0) * 0.3);
            prop_assert!(pos.y <= (vh - window.height).max(0.0) * 0.3);
        }
    }
}
