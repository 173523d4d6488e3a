use super::rect::{Axis, Rect};

/// Quadratic height field of one tile (van Wijk & van de Wetering 1999):
///
/// `z(x, y) = xx2·x² + xx1·x + yy2·y² + yy1·y`
///
/// Each ridge is a downward parabola spanning a rectangle along one axis, so
/// the quadratic coefficients only ever decrease. The field is used for
/// shading only; it never influences geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CushionSurface {
    pub xx2: f64,
    pub xx1: f64,
    pub yy2: f64,
    pub yy1: f64,
    /// Height of the most recently added ridge
    pub height: f64,
}

impl CushionSurface {
    /// Flat surface whose first ridge will have `height`.
    pub fn new(height: f64) -> Self {
        Self {
            xx2: 0.0,
            xx1: 0.0,
            yy2: 0.0,
            yy1: 0.0,
            height,
        }
    }

    /// Add a parabolic ridge of `height` spanning `rect` along `axis`.
    ///
    /// The current height always becomes `height`; the coefficients are left
    /// untouched when the rect has no extent along `axis`.
    pub fn add_ridge(&mut self, axis: Axis, height: f64, rect: &Rect) {
        self.height = height;

        let (x1, x2) = rect.bounds(axis);
        if x1 == x2 {
            return;
        }
        let (x1, x2) = (x1 as f64, x2 as f64);
        let (square, linear) = match axis {
            Axis::Horizontal => (&mut self.xx2, &mut self.xx1),
            Axis::Vertical => (&mut self.yy2, &mut self.yy1),
        };
        *square -= 4.0 * height / (x2 - x1);
        *linear += 4.0 * height * (x2 + x1) / (x2 - x1);
    }

    /// Copy of this surface with one more ridge.
    pub fn with_ridge(mut self, axis: Axis, height: f64, rect: &Rect) -> Self {
        self.add_ridge(axis, height, rect);
        self
    }

    /// Height at `(x, y)`.
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        self.xx2 * x * x + self.xx1 * x + self.yy2 * y * y + self.yy1 * y
    }

    /// Gradient `(∂z/∂x, ∂z/∂y)`. The renderer treats it as the (unnormalized)
    /// surface normal `(nx, ny, 1)`.
    pub fn normal(&self, x: f64, y: f64) -> (f64, f64) {
        (2.0 * self.xx2 * x + self.xx1, 2.0 * self.yy2 * y + self.yy1)
    }

    /// `[xx2, xx1, yy2, yy1]`
    pub fn coefficients(&self) -> [f64; 4] {
        [self.xx2, self.xx1, self.yy2, self.yy1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ridge_peaks_at_rect_center() {
        let rect = Rect::new(10, 0, 20, 5);
        let s = CushionSurface::new(0.5).with_ridge(Axis::Horizontal, 0.5, &rect);

        // Parabola is zero-slope at the middle of [10, 30]
        let (nx, ny) = s.normal(20.0, 0.0);
        assert!(nx.abs() < 1e-12);
        assert_eq!(ny, 0.0);

        // Edge slope is 4·height whatever the width; both edges sit at the same level
        let (edge_slope, _) = s.normal(10.0, 0.0);
        assert!((edge_slope - 2.0).abs() < 1e-9);
        assert!(s.height_at(20.0, 0.0) > s.height_at(10.0, 0.0));
        assert!((s.height_at(10.0, 0.0) - s.height_at(30.0, 0.0)).abs() < 1e-9);
    }

    #[test]
    fn ridge_coefficients_match_closed_form() {
        let rect = Rect::new(0, 4, 10, 6);
        let s = CushionSurface::new(1.0).with_ridge(Axis::Vertical, 2.0, &rect);
        // x1 = 4, x2 = 10
        assert!((s.yy2 - (-8.0 / 6.0)).abs() < 1e-12);
        assert!((s.yy1 - (8.0 * 14.0 / 6.0)).abs() < 1e-12);
        assert_eq!((s.xx2, s.xx1), (0.0, 0.0));
        assert_eq!(s.height, 2.0);
    }

    #[test]
    fn degenerate_rect_leaves_coefficients_alone() {
        let base =
            CushionSurface::new(0.5).with_ridge(Axis::Horizontal, 0.5, &Rect::new(0, 0, 8, 8));
        let mut s = base;
        s.add_ridge(Axis::Horizontal, 0.25, &Rect::new(3, 0, 0, 8));
        s.add_ridge(Axis::Vertical, 0.25, &Rect::new(3, 7, 8, 0));
        assert_eq!(s.coefficients(), base.coefficients());
        assert_eq!(s.height, 0.25);
    }

    #[test]
    fn ridges_accumulate() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(0, 0, 50, 100);
        let s = CushionSurface::new(0.5)
            .with_ridge(Axis::Horizontal, 0.5, &outer)
            .with_ridge(Axis::Horizontal, 0.375, &inner);
        assert!((s.xx2 - (-0.02 - 0.03)).abs() < 1e-12);
    }
}
