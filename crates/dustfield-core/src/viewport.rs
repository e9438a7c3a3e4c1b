//! Viewport dimensions.

/// Size of the visible drawing area in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Area in square pixels. Degenerate or negative viewports have no area.
    pub fn area(&self) -> f32 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        self.width * self.height
    }

    /// Whether a point lies inside the viewport rectangle (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_includes_edges() {
        let viewport = Viewport::new(100.0, 50.0);
        assert!(viewport.contains(0.0, 0.0));
        assert!(viewport.contains(100.0, 50.0));
        assert!(!viewport.contains(-0.1, 10.0));
        assert!(!viewport.contains(10.0, 50.1));
    }

    #[test]
    fn test_area_of_degenerate_viewport() {
        assert_eq!(Viewport::new(0.0, 100.0).area(), 0.0);
        assert_eq!(Viewport::new(-5.0, 100.0).area(), 0.0);
        assert_eq!(Viewport::new(1000.0, 1000.0).area(), 1_000_000.0);
    }
}
