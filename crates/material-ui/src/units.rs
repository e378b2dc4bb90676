use std::ops::{Add, Mul};

/// Density-independent length. One `Dp` is one physical pixel at a scale
/// factor of 1.0.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts to physical pixels for a window scale factor.
    #[inline]
    pub fn to_px(self, scale_factor: f32) -> f32 {
        self.0 * scale_factor
    }
}

impl Add for Dp {
    type Output = Dp;

    #[inline]
    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl Mul<f32> for Dp {
    type Output = Dp;

    #[inline]
    fn mul(self, rhs: f32) -> Dp {
        Dp(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_pixels() {
        assert_eq!(Dp(56.0).to_px(1.0), 56.0);
        assert_eq!(Dp(56.0).to_px(2.0), 112.0);
        assert_eq!((Dp(8.0) + Dp(16.0)) * 2.0, Dp(48.0));
    }
}
