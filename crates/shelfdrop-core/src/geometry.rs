#![forbid(unsafe_code)]

//! Geometric primitives for drop-target math.

/// A point in host layout coordinates (origin at top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Monotonic in true distance, so it is enough for nearest ranking
    /// without paying for a square root per candidate.
    #[inline]
    pub fn distance_squared(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A rectangle in host layout coordinates, as measured for a grid card or
/// dropzone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in layout units.
    pub width: f32,
    /// Height in layout units.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (inclusive).
    #[inline]
    pub const fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (inclusive).
    #[inline]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Arithmetic midpoint of the rectangle.
    #[inline]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the rectangle, edges included.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Shrink the rectangle to `factor` of its width and height, keeping it
    /// centered within the original bounds.
    ///
    /// This is the capture-zone operation: a dragged card's center must land
    /// inside a folder card's shrunken interior, not merely touch its edge,
    /// before a "move into folder" classification applies.
    #[inline]
    pub fn shrink_centered(&self, factor: f32) -> Rect {
        let width = self.width * factor;
        let height = self.height * factor;
        Rect {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn center_is_arithmetic_midpoint() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn contains_includes_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(6.0, 8.0)));
        assert!(rect.contains(Point::new(4.0, 5.0)));
        assert!(!rect.contains(Point::new(6.1, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.1)));
        assert!(!rect.contains(Point::new(1.9, 5.0)));
    }

    #[test]
    fn shrink_centered_keeps_center() {
        let rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let zone = rect.shrink_centered(0.85);
        assert_eq!(zone.left(), 75.0);
        assert_eq!(zone.top(), 75.0);
        assert_eq!(zone.right(), 925.0);
        assert_eq!(zone.bottom(), 925.0);
        assert_eq!(zone.center(), rect.center());
    }

    #[test]
    fn shrink_centered_full_factor_is_identity() {
        let rect = Rect::new(4.0, 8.0, 60.0, 20.0);
        assert_eq!(rect.shrink_centered(1.0), rect);
    }

    #[test]
    fn shrink_centered_zero_factor_collapses_to_center() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let zone = rect.shrink_centered(0.0);
        assert!(zone.is_empty());
        assert_eq!(zone.center(), rect.center());
    }

    #[test]
    fn distance_squared_matches_pythagoras() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(b.distance_squared(a), 25.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }

    #[test]
    fn from_size_sits_at_origin() {
        let rect = Rect::from_size(8.0, 2.0);
        assert_eq!(rect.left(), 0.0);
        assert_eq!(rect.top(), 0.0);
        assert_eq!(rect.right(), 8.0);
        assert_eq!(rect.bottom(), 2.0);
        assert!(!rect.is_empty());
    }

    mod properties {
        use proptest::prelude::*;

        use super::Rect;

        proptest! {
            #[test]
            fn shrink_centered_stays_within_bounds(
                x in -1000.0f32..1000.0,
                y in -1000.0f32..1000.0,
                width in 0.0f32..2000.0,
                height in 0.0f32..2000.0,
                factor in 0.0f32..=1.0,
            ) {
                let rect = Rect::new(x, y, width, height);
                let zone = rect.shrink_centered(factor);

                prop_assert!(zone.left() >= rect.left() - 0.01);
                prop_assert!(zone.right() <= rect.right() + 0.01);
                prop_assert!(zone.top() >= rect.top() - 0.01);
                prop_assert!(zone.bottom() <= rect.bottom() + 0.01);

                prop_assert!((zone.center().x - rect.center().x).abs() < 0.01);
                prop_assert!((zone.center().y - rect.center().y).abs() < 0.01);
            }
        }
    }
}
