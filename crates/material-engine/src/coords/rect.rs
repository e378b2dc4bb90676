use glam::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    /// Closed containment: `[min, max]` on both axes.
    ///
    /// Widgets use closed bounds so a point on the shared edge of two abutting
    /// widgets hits both; callers resolve that by draw order.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        self.origin.x <= p.x && p.x <= max.x && self.origin.y <= p.y && p.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_is_closed_on_both_edges() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.contains(Vec2::new(-0.01, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 10.01)));
    }
}
