//! Geometry helpers shared by the widgets and the canvas.
//!
//! Points, sizes and rectangles are kurbo value types. `Point - Point`
//! yields the `Vec2` difference used for local coordinates.

pub use kurbo::{Point, Rect, Size, Vec2};

/// Extra rectangle queries used by hit-testing.
pub trait RectExt {
    /// Containment test that includes all four edges.
    ///
    /// `kurbo::Rect::contains` excludes the right and bottom edges, which
    /// would make the last pixel column of a cell unclickable.
    fn contains_inclusive(&self, point: Point) -> bool;
}

impl RectExt for Rect {
    fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }
}

/// Convert a point in surface coordinates into the local frame of `region`.
///
/// Returns `None` when the point lies outside the region.
pub fn to_local(region: Rect, point: Point) -> Option<Point> {
    if region.contains_inclusive(point) {
        let offset = point - region.origin();
        Some(Point::new(offset.x, offset.y))
    } else {
        None
    }
}

/// Like [`to_local`], but points outside `region` are pulled onto its
/// nearest edge.
pub fn to_local_clamped(region: Rect, point: Point) -> Point {
    Point::new(
        (point.x - region.x0).clamp(0.0, region.width().max(0.0)),
        (point.y - region.y0).clamp(0.0, region.height().max(0.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_containment_covers_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 30.0);
        assert!(r.contains_inclusive(Point::new(10.0, 10.0)));
        assert!(r.contains_inclusive(Point::new(20.0, 30.0)));
        assert!(r.contains_inclusive(Point::new(15.0, 30.0)));
        assert!(!r.contains_inclusive(Point::new(20.01, 15.0)));
        assert!(!r.contains_inclusive(Point::new(15.0, 9.99)));
    }

    #[test]
    fn test_local_coordinates() {
        let region = Rect::new(100.0, 50.0, 300.0, 250.0);
        assert_eq!(to_local(region, Point::new(110.0, 60.0)), Some(Point::new(10.0, 10.0)));
        assert_eq!(to_local(region, Point::new(99.0, 60.0)), None);
    }

    #[test]
    fn test_clamped_local_coordinates() {
        let region = Rect::new(100.0, 50.0, 300.0, 250.0);
        assert_eq!(to_local_clamped(region, Point::new(110.0, 60.0)), Point::new(10.0, 10.0));
        assert_eq!(to_local_clamped(region, Point::new(20.0, 400.0)), Point::new(0.0, 200.0));
        assert_eq!(to_local_clamped(region, Point::new(500.0, -5.0)), Point::new(200.0, 0.0));
    }
}
