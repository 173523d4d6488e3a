/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along x (widths)
    Horizontal,
    /// Along y (heights)
    Vertical,
}

impl Axis {
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Split direction requested for the simple strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Split along the longer side of each rectangle
    #[default]
    Auto,
}

impl Orientation {
    /// Concrete axis for `rect`. Auto picks horizontal only for strictly wider rects.
    pub fn resolve(self, rect: &Rect) -> Axis {
        match self {
            Orientation::Horizontal => Axis::Horizontal,
            Orientation::Vertical => Axis::Vertical,
            Orientation::Auto if rect.width > rect.height => Axis::Horizontal,
            Orientation::Auto => Axis::Vertical,
        }
    }

    /// Orientation handed to the next nesting level. Auto stays Auto.
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Auto => Orientation::Auto,
        }
    }
}

/// Axis-aligned rectangle in integer layout space. Right and bottom edges
/// are exclusive: `right() == x + width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// `(start, end)` bounds along `axis`.
    pub fn bounds(&self, axis: Axis) -> (i64, i64) {
        match axis {
            Axis::Horizontal => (self.x as i64, self.right()),
            Axis::Vertical => (self.y as i64, self.bottom()),
        }
    }

    /// `max(w, h) / min(w, h)`; infinite for empty rects.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = (self.width as f64, self.height as f64);
        if self.is_empty() {
            return f64::INFINITY;
        }
        w.max(h) / w.min(h)
    }

    /// Band of `extent` along `axis`, starting `offset` into this rect, with
    /// the full perpendicular extent.
    pub fn slice(&self, axis: Axis, offset: u32, extent: u32) -> Rect {
        match axis {
            Axis::Horizontal => Rect::new(self.x + offset as i32, self.y, extent, self.height),
            Axis::Vertical => Rect::new(self.x, self.y + offset as i32, self.width, extent),
        }
    }

    /// What is left after cutting a band of `amount` off the leading edge along `axis`.
    pub fn cut_leading(&self, axis: Axis, amount: u32) -> Rect {
        let amount = amount.min(self.extent(axis));
        match axis {
            Axis::Horizontal => {
                Rect::new(self.x + amount as i32, self.y, self.width - amount, self.height)
            }
            Axis::Vertical => {
                Rect::new(self.x, self.y + amount as i32, self.width, self.height - amount)
            }
        }
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x as i64 >= self.x as i64
            && other.y as i64 >= self.y as i64
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True when the interiors overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_orientation_prefers_vertical_for_squares() {
        let square = Rect::new(0, 0, 40, 40);
        let wide = Rect::new(0, 0, 41, 40);
        assert_eq!(Orientation::Auto.resolve(&square), Axis::Vertical);
        assert_eq!(Orientation::Auto.resolve(&wide), Axis::Horizontal);
        assert_eq!(Orientation::Horizontal.resolve(&square), Axis::Horizontal);
        assert_eq!(Orientation::Auto.flipped(), Orientation::Auto);
        assert_eq!(Orientation::Vertical.flipped(), Orientation::Horizontal);
    }

    #[test]
    fn slice_and_cut() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.slice(Axis::Horizontal, 30, 20), Rect::new(40, 20, 20, 50));
        assert_eq!(r.slice(Axis::Vertical, 5, 10), Rect::new(10, 25, 100, 10));
        assert_eq!(r.cut_leading(Axis::Vertical, 40), Rect::new(10, 60, 100, 10));
        assert_eq!(r.cut_leading(Axis::Horizontal, 500), Rect::new(110, 20, 0, 50));
    }

    #[test]
    fn containment_and_overlap() {
        let outer = Rect::new(0, 0, 100, 100);
        let a = Rect::new(0, 0, 50, 100);
        let b = Rect::new(50, 0, 50, 100);
        assert!(outer.contains(&a));
        assert!(outer.contains(&b));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(49, 99, 5, 5)));
        assert!(!outer.contains(&Rect::new(90, 90, 11, 5)));
    }

    #[test]
    fn aspect_ratio_is_orientation_independent() {
        assert_eq!(Rect::new(0, 0, 40, 10).aspect_ratio(), 4.0);
        assert_eq!(Rect::new(0, 0, 10, 40).aspect_ratio(), 4.0);
        assert!(Rect::new(0, 0, 0, 40).aspect_ratio().is_infinite());
    }
}
