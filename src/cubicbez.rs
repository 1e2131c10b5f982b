// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::{
    Affine, Line, ParamCurve, ParamCurveArclen, ParamCurveDeriv, ParamCurveExtrema, Point,
    QuadBez, MAX_EXTREMA,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct CubicBez {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// Recursion limit for subdivision-based algorithms.
const MAX_DEPTH: usize = 16;

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The same curve traversed from end to start.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> CubicBez {
        CubicBez {
            p0: self.p3,
            p1: self.p2,
            p2: self.p1,
            p3: self.p0,
        }
    }

    /// Whether both control points lie within `tolerance` of the chord.
    ///
    /// A flat curve may be replaced by its chord without visible error.
    pub fn is_flat(&self, tolerance: f64) -> bool {
        let chord = Line::new(self.p0, self.p3);
        let tol2 = tolerance * tolerance;
        chord.nearest(self.p1).1 <= tol2 && chord.nearest(self.p2).1 <= tol2
    }

    /// Approximate the curve by a polyline.
    ///
    /// The curve is subdivided until every piece is flat within `tolerance`;
    /// `callback` receives the end point of each resulting chord, in order.
    /// The start point is not reported.
    pub fn flatten(&self, tolerance: f64, callback: &mut impl FnMut(Point)) {
        fn rec(c: &CubicBez, tolerance: f64, depth: usize, callback: &mut impl FnMut(Point)) {
            if depth == MAX_DEPTH || c.is_flat(tolerance) {
                callback(c.p3);
            } else {
                let (c0, c1) = c.subdivide();
                rec(&c0, tolerance, depth + 1, callback);
                rec(&c1, tolerance, depth + 1, callback);
            }
        }
        rec(self, tolerance, 0, callback);
    }

    /// Is this cubic Bezier curve finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        self.split(0.5)
    }

    /// Split at `t` with de Casteljau's algorithm.
    ///
    /// Both halves share the exact split point.
    fn split(&self, t: f64) -> (CubicBez, CubicBez) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let pm = p012.lerp(p123, t);
        (
            CubicBez::new(self.p0, p01, p012, pm),
            CubicBez::new(pm, p123, p23, self.p3),
        )
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl ParamCurveArclen for CubicBez {
    /// Arc length of a cubic Bézier segment.
    ///
    /// This algorithm is based on "Adaptive subdivision and the length and
    /// energy of Bézier curves" by Jens Gravesen.
    fn arclen(&self, accuracy: f64) -> f64 {
        // Estimate for a single segment.
        fn calc_l0(c: &CubicBez) -> f64 {
            let lc = (c.p3 - c.p0).hypot();
            let lp = (c.p1 - c.p0).hypot() + (c.p2 - c.p1).hypot() + (c.p3 - c.p2).hypot();
            (lc + lp) * 0.5
        }
        fn rec(c: &CubicBez, l0: f64, accuracy: f64, depth: usize) -> f64 {
            let (c0, c1) = c.subdivide();
            let l0_c0 = calc_l0(&c0);
            let l0_c1 = calc_l0(&c1);
            let l1 = l0_c0 + l0_c1;
            let error = (l0 - l1) * (1.0 / 15.0);
            if error.abs() < accuracy || depth == MAX_DEPTH {
                l1 - error
            } else {
                rec(&c0, l0_c0, accuracy * 0.5, depth + 1)
                    + rec(&c1, l0_c1, accuracy * 0.5, depth + 1)
            }
        }
        rec(self, calc_l0(self), accuracy, 0)
    }
}

impl ParamCurveExtrema for CubicBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            let roots = solve_quadratic(c, b, a);
            for &t in &roots {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_by(|a, b| a.total_cmp(b));
        result
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}
