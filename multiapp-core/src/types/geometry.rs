//! Integer geometry used to place floating panels.

use serde::{Deserialize, Serialize};

/// A point in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

/// A width/height pair in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    /// Checks if the area is zero (or negative).
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// An axis-aligned rectangle: origin (top-left corner) plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Rect { origin, size }
    }

    pub const fn from_coords(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn left(&self) -> i32 { self.origin.x }
    pub fn top(&self) -> i32 { self.origin.y }
    pub fn right(&self) -> i32 { self.origin.x.saturating_add(self.size.width) }
    pub fn bottom(&self) -> i32 { self.origin.y.saturating_add(self.size.height) }

    /// Edges are inclusive for left/top, exclusive for right/bottom.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left() && point.x < self.right() &&
        point.y >= self.top() && point.y < self.bottom()
    }

    /// Moves the origin by (dx, dy) with saturating arithmetic.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Rect::from_coords(
            self.origin.x.saturating_add(dx),
            self.origin.y.saturating_add(dy),
            self.size.width,
            self.size.height,
        )
    }

    /// Shrinks the rectangle to fit `bounds` and moves it fully inside them.
    ///
    /// A rectangle larger than `bounds` is first reduced to the bounds' size,
    /// so the result always lies within `bounds`.
    pub fn clamp_within(&self, bounds: &Rect) -> Self {
        let width = self.size.width.min(bounds.size.width).max(0);
        let height = self.size.height.min(bounds.size.height).max(0);
        let max_x = bounds.right().saturating_sub(width);
        let max_y = bounds.bottom().saturating_sub(height);
        Rect::from_coords(
            self.origin.x.clamp(bounds.left(), max_x.max(bounds.left())),
            self.origin.y.clamp(bounds.top(), max_y.max(bounds.top())),
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_rect_edges_and_contains() {
        let rect = Rect::from_coords(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert!(rect.contains_point(Point::new(10, 20)));
        assert!(rect.contains_point(Point::new(109, 69)));
        assert!(!rect.contains_point(Point::new(110, 69)));
    }

    #[test]
    fn test_translate_saturates() {
        let rect = Rect::from_coords(i32::MAX - 1, 0, 10, 10);
        assert_eq!(rect.translate(5, -3).origin, Point::new(i32::MAX, -3));
    }

    #[rstest]
    #[case(Rect::from_coords(-50, -10, 100, 100), Rect::from_coords(0, 0, 100, 100))]
    #[case(Rect::from_coords(900, 700, 200, 200), Rect::from_coords(800, 600, 200, 200))]
    #[case(Rect::from_coords(100, 100, 200, 200), Rect::from_coords(100, 100, 200, 200))]
    #[case(Rect::from_coords(10, 10, 2000, 50), Rect::from_coords(0, 10, 1000, 50))]
    fn test_clamp_within(#[case] input: Rect, #[case] expected: Rect) {
        let bounds = Rect::from_coords(0, 0, 1000, 800);
        assert_eq!(input.clamp_within(&bounds), expected);
    }

    #[test]
    fn test_offset_from() {
        assert_eq!(Point::new(15, 40).offset_from(Point::new(10, 20)), Point::new(5, 20));
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0, 10).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
