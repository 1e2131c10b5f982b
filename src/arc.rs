// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs, in endpoint and center parameterization.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_8, PI};

use crate::common::{
    angle_between, angle_norm, eigen_symmetric, gauss_legendre, EPSILON, GAUSS_LEGENDRE_COEFFS_16,
};
use crate::{Affine, BezEl, Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// An elliptical arc in endpoint parameterization.
///
/// This is the form used by the SVG `A` command: the arc runs from `from` to
/// `to` along an ellipse with the given radii, whose x axis is rotated by
/// `x_rotation` radians. Of the four candidate arcs, `large_arc` picks the
/// one sweeping more than π and `sweep` picks the one running in the
/// direction of increasing angle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipticArc {
    /// The start point.
    pub from: Point,
    /// The end point.
    pub to: Point,
    /// The radii along the ellipse's own x and y axes.
    pub radii: Vec2,
    /// The rotation of the ellipse's x axis, in radians.
    pub x_rotation: f64,
    /// Whether the arc sweeps more than π.
    pub large_arc: bool,
    /// Whether the arc runs in the direction of increasing angle.
    pub sweep: bool,
}

/// A single elliptical arc segment, in center parameterization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The arc's centre point.
    pub center: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction after applying `x_rotation`.
    pub radii: Vec2,
    /// The start angle in radians.
    pub start_angle: f64,
    /// The angle between the start and end of the arc, in radians.
    pub sweep_angle: f64,
    /// How much the arc is rotated, in radians.
    pub x_rotation: f64,
}

/// Bring an ellipse rotation into `[0, π)`.
///
/// Rotating an ellipse by π gives the same ellipse, so this loses nothing.
pub(crate) fn canonical_rotation(phi: f64) -> f64 {
    let r = angle_norm(phi);
    let r = if r >= PI { r - PI } else { r };
    if PI - r < EPSILON {
        0.0
    } else {
        r
    }
}

impl EllipticArc {
    /// Create a new arc from its endpoint parameterization.
    pub fn new(
        from: impl Into<Point>,
        to: impl Into<Point>,
        radii: impl Into<Vec2>,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) -> EllipticArc {
        EllipticArc {
            from: from.into(),
            to: to.into(),
            radii: radii.into(),
            x_rotation,
            large_arc,
            sweep,
        }
    }

    /// The half-chord in the ellipse's unrotated frame.
    fn half_chord(&self) -> Vec2 {
        rotate_pt(0.5 * (self.from - self.to), -self.x_rotation)
    }

    /// The factor by which the radii must grow to span the chord.
    ///
    /// A value above 1 means the ellipse is too small to reach from `from`
    /// to `to`; scaling both radii by it yields the smallest ellipse of the
    /// same shape that does.
    pub fn radii_correction(&self) -> f64 {
        let p = self.half_chord();
        let (rx, ry) = (self.radii.x, self.radii.y);
        ((p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry)).sqrt()
    }

    /// Whether the arc collapses to a straight line or a point.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() <= EPSILON
            || self.radii.y.abs() <= EPSILON
            || self.from.is_near(self.to, EPSILON)
    }

    /// Convert to center parameterization.
    ///
    /// Radii too small to span the chord are scaled up first. A degenerate
    /// arc yields a zero-sized ellipse at `from`.
    pub fn center_parameterization(&self) -> Arc {
        if self.is_straight_line() {
            return Arc {
                center: self.from,
                radii: Vec2::ZERO,
                start_angle: 0.0,
                sweep_angle: 0.0,
                x_rotation: self.x_rotation,
            };
        }
        let mut rx = self.radii.x.abs();
        let mut ry = self.radii.y.abs();
        let lambda = self.radii_correction();
        if lambda > 1.0 {
            rx *= lambda;
            ry *= lambda;
        }
        let p = self.half_chord();
        let rxy = rx * p.y;
        let ryx = ry * p.x;
        let num = rx * rx * ry * ry - rxy * rxy - ryx * ryx;
        let den = rxy * rxy + ryx * ryx;
        let mut coef = (num / den).max(0.0).sqrt();
        if self.large_arc == self.sweep {
            coef = -coef;
        }
        let c = Vec2::new(coef * rxy / ry, -coef * ryx / rx);
        let center = self.from.midpoint(self.to) + rotate_pt(c, self.x_rotation);

        let u = Vec2::new((p.x - c.x) / rx, (p.y - c.y) / ry);
        let v = Vec2::new((-p.x - c.x) / rx, (-p.y - c.y) / ry);
        let start_angle = u.atan2();
        let mut sweep_angle = u.angle_to(v);
        if self.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        } else if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        }
        Arc {
            center,
            radii: Vec2::new(rx, ry),
            start_angle,
            sweep_angle,
            x_rotation: self.x_rotation,
        }
    }

    /// The same arc traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> EllipticArc {
        EllipticArc {
            from: self.to,
            to: self.from,
            sweep: !self.sweep,
            ..*self
        }
    }

    /// Map the arc through an affine transform.
    ///
    /// The ellipse is written as the quadratic form `xᵀ E x = 1` in its own
    /// frame. Pulling it back through the transform gives `T⁻ᵀ E T⁻¹`, whose
    /// eigenvalues are the inverse squared radii of the mapped ellipse and
    /// whose eigenvectors are its axes. A mirroring transform flips the
    /// sweep direction.
    ///
    /// Returns `None` when the transform is singular, as the ellipse then
    /// collapses onto a line.
    pub fn transformed(&self, affine: Affine) -> Option<EllipticArc> {
        let [a, b, c, d, _, _] = affine.as_coeffs();
        let det = affine.determinant();
        if det.abs() < EPSILON || !det.is_finite() {
            return None;
        }
        let t = Affine::new([a, b, c, d, 0.0, 0.0]) * Affine::rotate(self.x_rotation);
        let [m00, m10, m01, m11, _, _] = t.inverse().as_coeffs();
        let e1 = (self.radii.x * self.radii.x).recip();
        let e2 = (self.radii.y * self.radii.y).recip();
        let q11 = e1 * m00 * m00 + e2 * m10 * m10;
        let q12 = e1 * m00 * m01 + e2 * m10 * m11;
        let q22 = e1 * m01 * m01 + e2 * m11 * m11;
        let (l1, l2, v1, _) = eigen_symmetric(q11, q12, q22);
        Some(EllipticArc {
            from: affine * self.from,
            to: affine * self.to,
            radii: Vec2::new(l1.sqrt().recip(), l2.sqrt().recip()),
            x_rotation: canonical_rotation(v1.atan2()),
            large_arc: self.large_arc,
            sweep: if det < 0.0 { !self.sweep } else { self.sweep },
        })
    }
}

impl Arc {
    /// The point on the ellipse at angle `theta`.
    #[inline]
    pub fn point_at(&self, theta: f64) -> Point {
        self.center + sample_ellipse(self.radii, self.x_rotation, theta)
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> Point {
        self.point_at(self.end_angle())
    }

    /// The angle at the end of the arc.
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// The tangent at angle `theta`, pointing in the direction of travel.
    pub fn tangent_at(&self, theta: f64) -> Vec2 {
        let d = sample_ellipse(self.radii, self.x_rotation, theta + FRAC_PI_2);
        if self.sweep_angle < 0.0 {
            -d
        } else {
            d
        }
    }

    /// The speed `|dp/dθ|` of the ellipse at angle `theta`.
    ///
    /// Rotation does not change the speed, so it is left out.
    #[inline]
    pub fn speed(&self, theta: f64) -> f64 {
        ellipse_speed(self.radii, theta)
    }

    /// Convert back to endpoint parameterization.
    pub fn endpoint_parameterization(&self) -> EllipticArc {
        EllipticArc {
            from: self.start(),
            to: self.end(),
            radii: self.radii,
            x_rotation: self.x_rotation,
            large_arc: self.sweep_angle.abs() > PI,
            sweep: self.sweep_angle > 0.0,
        }
    }

    /// Create an iterator generating Bézier path elements.
    ///
    /// The generated elements can be appended to an existing Bézier path.
    /// `tolerance` must be positive.
    pub fn append_iter(&self, tolerance: f64) -> ArcAppendIter {
        let scaled_err = self.radii.x.max(self.radii.y) / tolerance;
        // Number of subdivisions per ellipse based on error tolerance.
        // Note: this may slightly underestimate the error for quadrants.
        let n_err = (1.1163 * scaled_err).powf(1.0 / 6.0).max(3.999_999);
        let n = (n_err * self.sweep_angle.abs() * (1.0 / (2.0 * PI))).ceil();
        let angle_step = self.sweep_angle / n;
        let n = if n.is_finite() { n as usize } else { 0 };
        let arm_len = (4.0 / 3.0) * (angle_step / 4.0).tan();
        let angle0 = self.start_angle;
        let p0 = sample_ellipse(self.radii, self.x_rotation, angle0);

        ArcAppendIter {
            idx: 0,

            center: self.center,
            radii: self.radii,
            x_rotation: self.x_rotation,
            n,
            arm_len,
            angle_step,

            p0,
            angle0,
        }
    }

    /// Converts an arc into a series of cubic Bézier segments.
    ///
    /// The closure is invoked with the two control points and the end point
    /// of each segment.
    pub fn to_cubic_beziers<P>(&self, tolerance: f64, mut p: P)
    where
        P: FnMut(Point, Point, Point),
    {
        for el in self.append_iter(tolerance) {
            if let BezEl::CurveTo(p1, p2, p3) = el {
                p(p1, p2, p3);
            }
        }
    }

    /// Approximate the arc by chords deviating at most `tolerance`.
    ///
    /// `callback` receives the end point of each chord, in order.
    pub fn flatten(&self, tolerance: f64, callback: &mut impl FnMut(Point)) {
        let r = self.radii.x.abs().max(self.radii.y.abs());
        let max_step = 2.0 * (1.0 - tolerance / r).max(-1.0).acos();
        let n = (self.sweep_angle.abs() / max_step).ceil();
        let n = if n.is_finite() && n >= 1.0 {
            n as usize
        } else {
            1
        };
        let step = self.sweep_angle / n as f64;
        for i in 1..n {
            callback(self.point_at(self.start_angle + step * i as f64));
        }
        callback(self.end());
    }

    /// The arc length, integrated numerically.
    pub fn arclen(&self) -> f64 {
        let n = (self.sweep_angle.abs() / FRAC_PI_8).ceil().max(1.0);
        let step = self.sweep_angle / n;
        let mut sum = 0.0;
        let mut theta = self.start_angle;
        for _ in 0..n as usize {
            sum += gauss_legendre(
                |t| ellipse_speed(self.radii, t),
                theta,
                theta + step,
                GAUSS_LEGENDRE_COEFFS_16,
            );
            theta += step;
        }
        sum.abs()
    }

    /// The smallest rectangle enclosing the arc.
    ///
    /// The extremes of the full ellipse are where its tangent is axis
    /// aligned; those whose angle lies on the arc widen the box.
    pub fn bounding_box(&self) -> Rect {
        let (rx, ry) = (self.radii.x, self.radii.y);
        let (sinphi, cosphi) = self.x_rotation.sin_cos();
        let theta_right = (-ry * sinphi).atan2(rx * cosphi);
        let theta_top = (ry * cosphi).atan2(rx * sinphi);
        let theta_left = theta_right + PI;
        let theta_bottom = theta_top + PI;

        let dx = (rx * rx * cosphi * cosphi + ry * ry * sinphi * sinphi).sqrt();
        let dy = (rx * rx * sinphi * sinphi + ry * ry * cosphi * cosphi).sqrt();
        let (theta1, theta2) = (self.start_angle, self.end_angle());
        let mut bbox = Rect::from_points(self.start(), self.end());
        if angle_between(theta_left, theta1, theta2) {
            bbox.x0 = bbox.x0.min(self.center.x - dx);
        }
        if angle_between(theta_right, theta1, theta2) {
            bbox.x1 = bbox.x1.max(self.center.x + dx);
        }
        if angle_between(theta_bottom, theta1, theta2) {
            bbox.y0 = bbox.y0.min(self.center.y - dy);
        }
        if angle_between(theta_top, theta1, theta2) {
            bbox.y1 = bbox.y1.max(self.center.y + dy);
        }
        bbox
    }

    /// Split the arc at angle `theta`.
    ///
    /// Returns `None` unless `theta` lies strictly inside the arc.
    pub fn split_at_angle(&self, theta: f64) -> Option<(Arc, Arc)> {
        let (lo, hi) = if self.sweep_angle < 0.0 {
            (self.end_angle(), self.start_angle)
        } else {
            (self.start_angle, self.end_angle())
        };
        if !(lo < theta && theta < hi) {
            return None;
        }
        Some((
            Arc {
                sweep_angle: theta - self.start_angle,
                ..*self
            },
            Arc {
                start_angle: theta,
                sweep_angle: self.end_angle() - theta,
                ..*self
            },
        ))
    }
}

#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct ArcAppendIter {
    idx: usize,

    center: Point,
    radii: Vec2,
    x_rotation: f64,
    n: usize,
    arm_len: f64,
    angle_step: f64,

    p0: Vec2,
    angle0: f64,
}

impl Iterator for ArcAppendIter {
    type Item = BezEl;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.n {
            return None;
        }

        let angle1 = self.angle0 + self.angle_step;
        let p0 = self.p0;
        let p1 = p0
            + self.arm_len * sample_ellipse(self.radii, self.x_rotation, self.angle0 + FRAC_PI_2);
        let p3 = sample_ellipse(self.radii, self.x_rotation, angle1);
        let p2 =
            p3 - self.arm_len * sample_ellipse(self.radii, self.x_rotation, angle1 + FRAC_PI_2);

        self.angle0 = angle1;
        self.p0 = p3;
        self.idx += 1;

        Some(BezEl::CurveTo(
            self.center + p1,
            self.center + p2,
            self.center + p3,
        ))
    }
}

fn ellipse_speed(radii: Vec2, theta: f64) -> f64 {
    let (s, c) = theta.sin_cos();
    (radii.x * radii.x * s * s + radii.y * radii.y * c * c).sqrt()
}

fn sample_ellipse(radii: Vec2, x_rotation: f64, angle: f64) -> Vec2 {
    let (angle_sin, angle_cos) = angle.sin_cos();
    let u = radii.x * angle_cos;
    let v = radii.y * angle_sin;
    rotate_pt(Vec2::new(u, v), x_rotation)
}

fn rotate_pt(pt: Vec2, angle: f64) -> Vec2 {
    let (angle_sin, angle_cos) = angle.sin_cos();
    Vec2::new(
        pt.x * angle_cos - pt.y * angle_sin,
        pt.x * angle_sin + pt.y * angle_cos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p1:?} != {p0:?}");
    }

    #[test]
    fn center_of_half_circle() {
        let arc = EllipticArc::new((0.0, 0.0), (10.0, 0.0), (5.0, 5.0), 0.0, false, true);
        let c = arc.center_parameterization();
        assert_near(c.center, Point::new(5.0, 0.0), 1e-12);
        assert!((c.sweep_angle - PI).abs() < 1e-12);
        assert_near(c.start(), arc.from, 1e-12);
        assert_near(c.end(), arc.to, 1e-12);
        // The other direction sweeps the other half.
        let c = EllipticArc { sweep: false, ..arc }.center_parameterization();
        assert!((c.sweep_angle + PI).abs() < 1e-12);
    }

    #[test]
    fn center_parameterization_round_trip() {
        for &(large_arc, sweep) in &[(false, false), (false, true), (true, false), (true, true)] {
            let arc = EllipticArc::new((1.0, 2.0), (4.0, 3.0), (3.0, 2.0), 0.3, large_arc, sweep);
            let c = arc.center_parameterization();
            assert_near(c.start(), arc.from, 1e-9);
            assert_near(c.end(), arc.to, 1e-9);
            assert_eq!(c.sweep_angle.abs() > PI, large_arc);
            assert_eq!(c.sweep_angle > 0.0, sweep);
            assert_eq!(c.endpoint_parameterization().large_arc, large_arc);
        }
    }

    #[test]
    fn radii_correction() {
        let arc = EllipticArc::new((0.0, 0.0), (10.0, 0.0), (1.0, 1.0), 0.0, false, true);
        assert!((arc.radii_correction() - 5.0).abs() < 1e-12);
        let c = arc.center_parameterization();
        assert!((c.radii.x - 5.0).abs() < 1e-12);
        assert_near(c.end(), arc.to, 1e-9);
    }

    #[test]
    fn degenerate_arc() {
        let arc = EllipticArc::new((1.0, 1.0), (1.0, 1.0), (1.0, 1.0), 0.0, false, true);
        assert!(arc.is_straight_line());
        assert_eq!(arc.center_parameterization().sweep_angle, 0.0);
    }

    #[test]
    fn bounding_box_half_circle() {
        let arc = Arc {
            center: Point::ZERO,
            radii: Vec2::new(1.0, 1.0),
            start_angle: 0.0,
            sweep_angle: PI,
            x_rotation: 0.0,
        };
        assert!(arc.bounding_box().is_near(Rect::new(-1.0, 0.0, 1.0, 1.0), 1e-12));
        // Clockwise covers the lower half instead.
        let arc = Arc {
            sweep_angle: -PI,
            ..arc
        };
        assert!(arc.bounding_box().is_near(Rect::new(-1.0, -1.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn bounding_box_rotated_ellipse() {
        let arc = Arc {
            center: Point::new(1.0, 1.0),
            radii: Vec2::new(3.0, 1.0),
            start_angle: 0.0,
            sweep_angle: 2.0 * PI,
            x_rotation: FRAC_PI_4,
        };
        let bb = arc.bounding_box();
        // Compare against dense sampling.
        let mut sampled = Rect::from_points(arc.start(), arc.start());
        for i in 0..=10_000 {
            sampled = sampled.union_pt(arc.point_at(i as f64 * 2.0 * PI / 10_000.0));
        }
        assert!(bb.is_near(sampled, 1e-6), "{bb:?} != {sampled:?}");
        assert!((bb.width() - 2.0 * 5.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn arclen() {
        let circle = Arc {
            center: Point::ZERO,
            radii: Vec2::new(2.0, 2.0),
            start_angle: 0.3,
            sweep_angle: -2.0 * PI,
            x_rotation: 0.0,
        };
        assert!((circle.arclen() - 4.0 * PI).abs() < 1e-9);

        let ellipse = Arc {
            radii: Vec2::new(2.0, 1.0),
            sweep_angle: 2.0 * PI,
            ..circle
        };
        assert!((ellipse.arclen() - 9.688_448_220_547_675).abs() < 1e-9);
    }

    #[test]
    fn append_iter_accuracy() {
        let arc = Arc {
            center: Point::new(3.0, 4.0),
            radii: Vec2::new(10.0, 10.0),
            start_angle: 0.2,
            sweep_angle: -4.0,
            x_rotation: 0.0,
        };
        let tolerance = 0.01;
        let mut p0 = arc.start();
        let mut count = 0;
        arc.to_cubic_beziers(tolerance, |p1, p2, p3| {
            let c = crate::CubicBez::new(p0, p1, p2, p3);
            for i in 0..=20 {
                let p = crate::ParamCurve::eval(&c, i as f64 / 20.0);
                assert!((p.distance(arc.center) - 10.0).abs() < tolerance);
            }
            p0 = p3;
            count += 1;
        });
        assert!(count >= 3);
        assert_near(p0, arc.end(), 1e-12);
    }

    #[test]
    fn append_iter_resumes_from_clone() {
        let arc = Arc {
            center: Point::ZERO,
            radii: Vec2::new(4.0, 2.0),
            start_angle: 0.0,
            sweep_angle: PI,
            x_rotation: 0.0,
        };
        let mut iter = arc.append_iter(0.1);
        assert!(alloc::format!("{iter:?}").starts_with("ArcAppendIter"));
        let first = iter.next();
        assert!(matches!(first, Some(BezEl::CurveTo(..))));
        let rest: alloc::vec::Vec<BezEl> = iter.clone().collect();
        assert_eq!(rest, iter.collect::<alloc::vec::Vec<_>>());
        match rest.last() {
            Some(BezEl::CurveTo(_, _, p3)) => assert_near(*p3, arc.end(), 1e-12),
            other => panic!("unexpected last element {other:?}"),
        }
    }

    #[test]
    fn flatten_deviation() {
        let arc = Arc {
            center: Point::ZERO,
            radii: Vec2::new(20.0, 20.0),
            start_angle: 0.0,
            sweep_angle: 3.0,
            x_rotation: 0.0,
        };
        let tolerance = 0.05;
        let mut points = vec![arc.start()];
        arc.flatten(tolerance, &mut |p| points.push(p));
        assert_near(*points.last().unwrap(), arc.end(), 1e-12);
        for w in points.windows(2) {
            let sagitta = 20.0 - w[0].midpoint(w[1]).distance(arc.center);
            assert!(sagitta <= tolerance, "{sagitta}");
        }
        // Huge tolerance still yields one chord.
        let mut n = 0;
        arc.flatten(1e6, &mut |_| n += 1);
        assert_eq!(n, 1);
    }

    #[test]
    fn split_at_angle() {
        let arc = Arc {
            center: Point::ZERO,
            radii: Vec2::new(2.0, 1.0),
            start_angle: 1.0,
            sweep_angle: -2.0,
            x_rotation: 0.5,
        };
        assert!(arc.split_at_angle(1.5).is_none());
        assert!(arc.split_at_angle(1.0).is_none());
        let (a, b) = arc.split_at_angle(0.0).unwrap();
        assert_near(a.end(), b.start(), 1e-12);
        assert_near(a.start(), arc.start(), 1e-12);
        assert_near(b.end(), arc.end(), 1e-12);
        assert!((a.arclen() + b.arclen() - arc.arclen()).abs() < 1e-9);
    }

    #[test]
    fn transform_scale() {
        let arc = EllipticArc::new((1.0, 0.0), (-1.0, 0.0), (1.0, 1.0), 0.0, false, true);
        let t = arc.transformed(Affine::scale_non_uniform(2.0, 1.0)).unwrap();
        assert!((t.radii.x - 2.0).abs() < 1e-12);
        assert!((t.radii.y - 1.0).abs() < 1e-12);
        assert!(t.x_rotation.abs() < 1e-12);
        assert_eq!(t.to, Point::new(-2.0, 0.0));
        assert!(t.sweep);

        let flipped = arc.transformed(Affine::FLIP_Y).unwrap();
        assert!(!flipped.sweep);

        assert!(arc.transformed(Affine::scale_non_uniform(1.0, 0.0)).is_none());
    }

    #[test]
    fn transform_rotate() {
        let arc = EllipticArc::new((2.0, 0.0), (0.0, 1.0), (2.0, 1.0), 0.0, false, true);
        let t = arc.transformed(Affine::rotate(FRAC_PI_4)).unwrap();
        assert!((t.radii.x - 2.0).abs() < 1e-12);
        assert!((t.radii.y - 1.0).abs() < 1e-12);
        assert!((t.x_rotation - FRAC_PI_4).abs() < 1e-12);
        // The mapped arc passes through the mapped midpoint.
        let mid = arc.center_parameterization().point_at(FRAC_PI_4);
        let c = t.center_parameterization();
        let mapped = Affine::rotate(FRAC_PI_4) * mid;
        assert_near(c.point_at(c.start_angle + 0.5 * c.sweep_angle), mapped, 1e-9);
    }

    #[test]
    fn canonical_rotation_range() {
        assert_eq!(canonical_rotation(PI), 0.0);
        assert!((canonical_rotation(-FRAC_PI_4) - 3.0 * FRAC_PI_4).abs() < 1e-12);
        assert!((canonical_rotation(PI - 1e-12)).abs() < 1e-9);
    }
}
