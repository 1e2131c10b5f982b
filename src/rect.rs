// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use core::fmt;
use core::ops::{Add, Sub};

use crate::{Point, Vec2};

/// An axis-aligned rectangle, as returned by bounding box queries.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate.
    pub x0: f64,
    /// The minimum y coordinate.
    pub y0: f64,
    /// The maximum x coordinate.
    pub x1: f64,
    /// The maximum y coordinate.
    pub y1: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0., 0., 0., 0.);

    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(
            p0.x.min(p1.x),
            p0.y.min(p1.y),
            p0.x.max(p1.x),
            p0.y.max(p1.y),
        )
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The origin of the rectangle, its minimum corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Compute the union with one point.
    ///
    /// This method includes the perimeter of zero-area rectangles.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Whether `pt` lies inside the rectangle or on its boundary.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x0 && pt.x <= self.x1 && pt.y >= self.y0 && pt.y <= self.y1
    }

    /// Whether every edge is within `epsilon` of `other`'s.
    pub fn is_near(&self, other: Rect, epsilon: f64) -> bool {
        Point::new(self.x0, self.y0).is_near(Point::new(other.x0, other.y0), epsilon)
            && Point::new(self.x1, self.y1).is_near(Point::new(other.x1, other.y1), epsilon)
    }
}

impl From<(Point, Point)> for Rect {
    fn from(points: (Point, Point)) -> Rect {
        Rect::from_points(points.0, points.1)
    }
}

impl Add<Vec2> for Rect {
    type Output = Rect;

    #[inline]
    fn add(self, v: Vec2) -> Rect {
        Rect::new(self.x0 + v.x, self.y0 + v.y, self.x1 + v.x, self.y1 + v.y)
    }
}

impl Sub<Vec2> for Rect {
    type Output = Rect;

    #[inline]
    fn sub(self, v: Vec2) -> Rect {
        Rect::new(self.x0 - v.x, self.y0 - v.y, self.x1 - v.x, self.y1 - v.y)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect {{ {:?} ({:?}×{:?}) }}",
            self.origin(),
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Point, Rect, Vec2};

    #[test]
    fn from_points_normalizes() {
        let r = Rect::from_points((10.0, 2.0), (-1.0, 5.0));
        assert_eq!(r, Rect::new(-1.0, 2.0, 10.0, 5.0));
        assert_eq!(r.width(), 11.0);
        assert_eq!(r.height(), 3.0);
    }

    #[test]
    fn union() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0)
            .union(Rect::new(2.0, -1.0, 3.0, 0.5))
            .union_pt(Point::new(-4.0, 0.0));
        assert_eq!(r, Rect::new(-4.0, -1.0, 3.0, 1.0));
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(0.0, 2.0)));
    }

    #[test]
    fn translate() {
        let r = Rect::new(0.0, 0.0, 1.0, 2.0) + Vec2::new(1.0, 1.0);
        assert_eq!(r, Rect::new(1.0, 1.0, 2.0, 3.0));
        assert_eq!(r - Vec2::new(1.0, 1.0), Rect::new(0.0, 0.0, 1.0, 2.0));
    }
}
