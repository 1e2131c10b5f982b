// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::{Affine, ParamCurve, ParamCurveArclen, ParamCurveExtrema, Point, MAX_EXTREMA};

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Returns a copy of this `Line` with the end points swapped so that it
    /// points in the opposite direction.
    #[must_use]
    #[inline(always)]
    pub fn reversed(&self) -> Line {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// The midpoint of the line.
    #[must_use]
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// The parameter of the point on the line nearest to `p`, and the
    /// squared distance to it.
    pub fn nearest(&self, p: Point) -> (f64, f64) {
        let d = self.p1 - self.p0;
        let dotp = d.dot(p - self.p0);
        let d_squared = d.hypot2();
        let t = if dotp <= 0.0 || d_squared == 0.0 {
            0.0
        } else if dotp >= d_squared {
            1.0
        } else {
            dotp / d_squared
        };
        (t, self.eval(t).distance_squared(p))
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveArclen for Line {
    #[inline]
    fn arclen(&self, _accuracy: f64) -> f64 {
        self.length()
    }

    #[inline]
    fn inv_arclen(&self, arclen: f64, _accuracy: f64) -> f64 {
        let len = self.length();
        if len == 0.0 {
            0.0
        } else {
            (arclen / len).clamp(0.0, 1.0)
        }
    }
}

impl ParamCurveExtrema for Line {
    #[inline]
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        ArrayVec::new()
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Line, ParamCurveArclen, ParamCurveExtrema, Point, Rect};

    #[test]
    fn line_reversed() {
        let l = Line::new((0.0, 0.0), (1.0, 1.0));
        let f = l.reversed();

        assert_eq!(l.p0, f.p1);
        assert_eq!(l.p1, f.p0);
        assert_eq!(l, f.reversed());
    }

    #[test]
    fn line_arclen() {
        let l = Line::new((0.0, 0.0), (1.0, 1.0));
        let true_len = 2.0f64.sqrt();
        let epsilon = 1e-9;
        assert!(l.arclen(epsilon) - true_len < epsilon);

        let t = l.inv_arclen(true_len / 3.0, epsilon);
        assert!((t - 1.0 / 3.0).abs() < epsilon);
    }

    #[test]
    fn line_nearest() {
        let l = Line::new((0.0, 0.0), (10.0, 0.0));
        let (t, d2) = l.nearest(Point::new(4.0, 3.0));
        assert_eq!((t, d2), (0.4, 9.0));
        let (t, d2) = l.nearest(Point::new(-3.0, 4.0));
        assert_eq!((t, d2), (0.0, 25.0));
        // Degenerate line.
        let p = Line::new((1.0, 1.0), (1.0, 1.0));
        assert_eq!(p.nearest(Point::new(1.0, 2.0)), (0.0, 1.0));
    }

    #[test]
    fn line_bounding_box() {
        let l = Line::new((3.0, -1.0), (1.0, 2.0));
        assert_eq!(l.bounding_box(), Rect::new(1.0, -1.0, 3.0, 2.0));
    }
}
