use glam::DVec2;

/// Generation index of a level. Age `0` holds the seed node.
pub type Age = usize;

/// A branch between a parent position and a child position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Returns the segment as `(x1, y1, x2, y2)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned rectangle in tree coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// A degenerate rectangle covering a single point.
    pub fn from_point(p: DVec2) -> Self {
        Self { min: p, max: p }
    }

    /// Grows the rectangle so that it contains `p`.
    pub fn include(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the rectangle as `(min_x, min_y, max_x, max_y)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min.x, self.min.y, self.max.x, self.max.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_include_expands_both_corners() {
        let mut r = Rect::from_point(DVec2::new(1.0, 1.0));
        r.include(DVec2::new(-2.0, 4.0));
        r.include(DVec2::new(3.0, 0.5));

        assert_eq!(r.as_tuple(), (-2.0, 0.5, 3.0, 4.0));
        assert_eq!(r.width(), 5.0);
        assert_eq!(r.height(), 3.5);
        assert_eq!(r.center(), DVec2::new(0.5, 2.25));
    }

    #[test]
    fn segment_length_and_tuple() {
        let s = Segment::new(DVec2::new(0.0, 0.0), DVec2::new(3.0, -4.0));
        assert_eq!(s.as_tuple(), (0.0, 0.0, 3.0, -4.0));
        assert_eq!(s.length(), 5.0);
    }
}
