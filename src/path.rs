// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths of lines, Béziers and elliptical arcs.

use core::f64::consts::PI;
use core::ops::Mul;
use core::{iter, slice};

use alloc::vec::Vec;

use log::{debug, trace, warn};

use crate::arc::canonical_rotation;
use crate::common::EPSILON;
use crate::{
    Affine, Arc, BezPath, CubicBez, EllipticArc, Line, ParamCurveArclen, ParamCurveExtrema,
    PathConfig, Point, QuadBez, Rect, Vec2, DEFAULT_ACCURACY,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A path: a sequence of sub-paths built from lines, Béziers and arcs.
///
/// Builder methods normalize their input. Segments without length are
/// dropped, curves whose control points sit on their end points become
/// lines and arc radii are brought into canonical form. The invariants
/// documented on [`PathEl`] therefore hold for any path built this way.
///
/// A path that does not begin with [`PathEl::MoveTo`] starts at the origin.
///
/// ```
/// use vojo::{Path, Rect};
///
/// let mut path = Path::new();
/// path.move_to((0.0, 0.0)).line_to((10.0, 0.0)).line_to((10.0, 10.0)).close_path();
/// assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
/// assert!(path.is_closed());
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<PathEl>", into = "Vec<PathEl>"))]
pub struct Path {
    pub(crate) els: Vec<PathEl>,
    /// Index of the most recent `MoveTo`, or 0 when there is none.
    pub(crate) start_ix: usize,
}

/// The element of a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Start a new sub-path at the point, drawing nothing.
    MoveTo(Point),
    /// A straight line to the point.
    LineTo(Point),
    /// A quadratic Bézier with a control point and an end point.
    QuadTo(Point, Point),
    /// A cubic Bézier with two control points and an end point.
    CubeTo(Point, Point, Point),
    /// An elliptical arc to `to`, in SVG endpoint parameterization.
    ///
    /// `radii.x >= radii.y` and `x_rotation` lies in `[0, π)`.
    ArcTo {
        /// Radii along the ellipse's major and minor axes.
        radii: Vec2,
        /// Rotation of the major axis in radians.
        x_rotation: f64,
        /// Whether the arc sweeps more than π.
        large_arc: bool,
        /// Whether the arc runs in the direction of increasing angle.
        sweep: bool,
        /// The end point.
        to: Point,
    },
    /// A straight line back to the sub-path's start, which is stored.
    ///
    /// This marks the sub-path as closed, which a line to the same point
    /// does not.
    Close(Point),
}

/// A segment of a [`Path`], with its start point resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSeg {
    /// A line segment. Closing elements yield one as well.
    Line(Line),
    /// A quadratic Bézier segment.
    Quad(QuadBez),
    /// A cubic Bézier segment.
    Cubic(CubicBez),
    /// An elliptical arc segment.
    Arc(EllipticArc),
}

impl PathEl {
    /// The point where the element ends.
    #[inline]
    pub fn end_point(&self) -> Point {
        match *self {
            PathEl::MoveTo(p)
            | PathEl::LineTo(p)
            | PathEl::QuadTo(_, p)
            | PathEl::CubeTo(_, _, p)
            | PathEl::ArcTo { to: p, .. }
            | PathEl::Close(p) => p,
        }
    }

    /// The segment this element draws when the pen is at `last`.
    pub(crate) fn segment(&self, last: Point) -> Option<PathSeg> {
        match *self {
            PathEl::MoveTo(_) => None,
            PathEl::LineTo(p) | PathEl::Close(p) => Some(PathSeg::Line(Line::new(last, p))),
            PathEl::QuadTo(p1, p2) => Some(PathSeg::Quad(QuadBez::new(last, p1, p2))),
            PathEl::CubeTo(p1, p2, p3) => Some(PathSeg::Cubic(CubicBez::new(last, p1, p2, p3))),
            PathEl::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => Some(PathSeg::Arc(EllipticArc {
                from: last,
                to,
                radii,
                x_rotation,
                large_arc,
                sweep,
            })),
        }
    }
}

impl PathSeg {
    /// The start point.
    pub fn start(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.p0,
            PathSeg::Quad(quad) => quad.p0,
            PathSeg::Cubic(cubic) => cubic.p0,
            PathSeg::Arc(arc) => arc.from,
        }
    }

    /// The end point.
    pub fn end(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.p1,
            PathSeg::Quad(quad) => quad.p2,
            PathSeg::Cubic(cubic) => cubic.p3,
            PathSeg::Arc(arc) => arc.to,
        }
    }

    /// The arc length of the segment.
    pub fn arclen(&self, accuracy: f64) -> f64 {
        match self {
            PathSeg::Line(line) => line.length(),
            PathSeg::Quad(quad) => quad.arclen(accuracy),
            PathSeg::Cubic(cubic) => cubic.arclen(accuracy),
            PathSeg::Arc(arc) if arc.is_straight_line() => arc.from.distance(arc.to),
            PathSeg::Arc(arc) => arc.center_parameterization().arclen(),
        }
    }

    /// The smallest rectangle enclosing the segment.
    pub fn bounding_box(&self) -> Rect {
        match self {
            PathSeg::Line(line) => line.bounding_box(),
            PathSeg::Quad(quad) => quad.bounding_box(),
            PathSeg::Cubic(cubic) => cubic.bounding_box(),
            PathSeg::Arc(arc) if arc.is_straight_line() => Rect::from_points(arc.from, arc.to),
            PathSeg::Arc(arc) => arc.center_parameterization().bounding_box(),
        }
    }

    /// The direction of travel at the start.
    ///
    /// Control points coinciding with the start are skipped. The result is
    /// zero only for a segment without extent.
    pub fn start_tangent(&self) -> Vec2 {
        match self {
            PathSeg::Line(line) => line.p1 - line.p0,
            PathSeg::Quad(quad) => first_nonzero(quad.p0, &[quad.p1, quad.p2]),
            PathSeg::Cubic(cubic) => first_nonzero(cubic.p0, &[cubic.p1, cubic.p2, cubic.p3]),
            PathSeg::Arc(arc) if arc.is_straight_line() => arc.to - arc.from,
            PathSeg::Arc(arc) => {
                let c = arc.center_parameterization();
                c.tangent_at(c.start_angle)
            }
        }
    }

    /// The direction of travel at the end.
    pub fn end_tangent(&self) -> Vec2 {
        match self {
            PathSeg::Line(line) => line.p1 - line.p0,
            PathSeg::Quad(quad) => -first_nonzero(quad.p2, &[quad.p1, quad.p0]),
            PathSeg::Cubic(cubic) => -first_nonzero(cubic.p3, &[cubic.p2, cubic.p1, cubic.p0]),
            PathSeg::Arc(arc) if arc.is_straight_line() => arc.to - arc.from,
            PathSeg::Arc(arc) => {
                let c = arc.center_parameterization();
                c.tangent_at(c.end_angle())
            }
        }
    }
}

fn first_nonzero(from: Point, candidates: &[Point]) -> Vec2 {
    candidates
        .iter()
        .map(|&p| p - from)
        .find(|v| v.hypot2() > EPSILON * EPSILON)
        .unwrap_or(Vec2::ZERO)
}

fn all_finite(points: &[Point]) -> bool {
    points.iter().all(|p| p.is_finite())
}

/// Whether `a`, `b` and `c` lie on one line, traversed in one direction.
fn collinear(a: Point, b: Point, c: Point) -> bool {
    let d1 = b - a;
    let d2 = c - b;
    if d1.hypot2() == 0.0 || d2.hypot2() == 0.0 {
        return false;
    }
    d1.angle_to(d2).abs() < EPSILON
}

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// Get the path elements.
    #[inline]
    pub fn elements(&self) -> &[PathEl] {
        &self.els
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.els.len()
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> PathSegs<'_> {
        PathSegs {
            els: self.els.iter(),
            last: Point::ZERO,
        }
    }

    pub(crate) fn push_el(&mut self, el: PathEl) {
        if let PathEl::MoveTo(_) = el {
            self.start_ix = self.els.len();
        }
        self.els.push(el);
    }

    /// Start a new sub-path at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        if !p.is_finite() {
            warn!("move_to: ignoring non-finite point {p:?}");
            return self;
        }
        self.push_el(PathEl::MoveTo(p));
        self
    }

    /// Draw a line to `p`.
    ///
    /// Nothing is added when `p` is the current position.
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        if !p.is_finite() {
            warn!("line_to: ignoring non-finite point {p:?}");
            return self;
        }
        if self.pos().is_near(p, EPSILON) {
            trace!("line_to: dropping zero-length line to {p:?}");
            return self;
        }
        self.push_el(PathEl::LineTo(p));
        self
    }

    /// Draw a quadratic Bézier with control point `c` to `p`.
    ///
    /// A control point on either end point makes the curve a line.
    pub fn quad_to(&mut self, c: impl Into<Point>, p: impl Into<Point>) -> &mut Self {
        let (c, p) = (c.into(), p.into());
        if !all_finite(&[c, p]) {
            warn!("quad_to: ignoring non-finite input {c:?} {p:?}");
            return self;
        }
        let p0 = self.pos();
        if c.is_near(p0, EPSILON) || c.is_near(p, EPSILON) {
            trace!("quad_to: degenerate control point, drawing a line");
            return self.line_to(p);
        }
        self.push_el(PathEl::QuadTo(c, p));
        self
    }

    /// Draw a cubic Bézier with control points `c1` and `c2` to `p`.
    ///
    /// The curve becomes a line only when both control points sit on an
    /// end point.
    pub fn curve_to(
        &mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        p: impl Into<Point>,
    ) -> &mut Self {
        let (c1, c2, p) = (c1.into(), c2.into(), p.into());
        if !all_finite(&[c1, c2, p]) {
            warn!("curve_to: ignoring non-finite input {c1:?} {c2:?} {p:?}");
            return self;
        }
        if is_degenerate_cubic(self.pos(), c1, c2, p) {
            trace!("curve_to: degenerate control points, drawing a line");
            return self.line_to(p);
        }
        self.push_el(PathEl::CubeTo(c1, c2, p));
        self
    }

    /// Draw an elliptical arc to `p`, in SVG endpoint parameterization.
    ///
    /// `x_rotation` is in radians. The radii are made positive and ordered
    /// so the first is the major one, the rotation is brought into `[0, π)`
    /// and radii too small to reach `p` are scaled up. An arc to the current
    /// position is dropped, and one with a zero radius becomes a line.
    pub fn arc_to(
        &mut self,
        radii: impl Into<Vec2>,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        p: impl Into<Point>,
    ) -> &mut Self {
        let (radii, p) = (radii.into(), p.into());
        if !p.is_finite() || !radii.is_finite() || !x_rotation.is_finite() {
            warn!("arc_to: ignoring non-finite input {radii:?} {x_rotation} {p:?}");
            return self;
        }
        let p0 = self.pos();
        if p0.is_near(p, EPSILON) {
            trace!("arc_to: dropping arc ending at its start {p:?}");
            return self;
        }
        if radii.x.abs() <= EPSILON || radii.y.abs() <= EPSILON {
            trace!("arc_to: zero radius, drawing a line");
            return self.line_to(p);
        }
        let (mut rx, mut ry) = (radii.x.abs(), radii.y.abs());
        let mut phi = x_rotation;
        if rx < ry {
            core::mem::swap(&mut rx, &mut ry);
            phi += 0.5 * PI;
        }
        let phi = canonical_rotation(phi);
        let lambda = EllipticArc::new(p0, p, (rx, ry), phi, large_arc, sweep).radii_correction();
        if lambda > 1.0 {
            trace!("arc_to: scaling radii by {lambda} to span the chord");
            rx *= lambda;
            ry *= lambda;
        }
        self.push_el(PathEl::ArcTo {
            radii: Vec2::new(rx, ry),
            x_rotation: phi,
            large_arc,
            sweep,
            to: p,
        });
        self
    }

    /// Draw an elliptical arc from angle `theta0` to `theta1` of an ellipse
    /// positioned so that the arc starts at the current position.
    ///
    /// All angles are in radians. The arc runs towards increasing angles
    /// when `theta0 < theta1`. A difference of more than a full turn draws
    /// the full ellipse once, followed by the remainder. A difference of
    /// exactly one turn ends where it starts and draws nothing.
    pub fn arc(
        &mut self,
        radii: impl Into<Vec2>,
        x_rotation: f64,
        theta0: f64,
        theta1: f64,
    ) -> &mut Self {
        let radii = radii.into();
        let dtheta = (theta1 - theta0).abs();
        let sweep = theta0 < theta1;
        let large_arc = dtheta % (2.0 * PI) > PI;
        let ellipse = Arc {
            center: Point::ZERO,
            radii,
            start_angle: theta0,
            sweep_angle: theta1 - theta0,
            x_rotation,
        };
        let p0 = ellipse.start().to_vec2();
        let p1 = ellipse.end().to_vec2();

        let start = self.pos();
        let center = start - p0;
        if dtheta > 2.0 * PI {
            self.arc_to(radii, x_rotation, large_arc, sweep, center - p0);
            self.arc_to(radii, x_rotation, large_arc, sweep, start);
        }
        self.arc_to(radii, x_rotation, large_arc, sweep, center + p1)
    }

    /// Close the current sub-path with a line back to its start.
    ///
    /// The element is added even when the pen is already at the start.
    pub fn close_path(&mut self) -> &mut Self {
        let start = self.start_pos();
        self.els.push(PathEl::Close(start));
        self
    }

    /// Whether the path draws nothing, holding only moves and closes.
    pub fn is_empty(&self) -> bool {
        self.els
            .iter()
            .all(|el| matches!(el, PathEl::MoveTo(_) | PathEl::Close(_)))
    }

    /// Whether the last element closes its sub-path.
    pub fn is_closed(&self) -> bool {
        matches!(self.els.last(), Some(PathEl::Close(_)))
    }

    /// The current position: the end point of the last element.
    pub fn pos(&self) -> Point {
        self.els.last().map_or(Point::ZERO, PathEl::end_point)
    }

    /// The start of the active sub-path.
    pub fn start_pos(&self) -> Point {
        match self.els.get(self.start_ix) {
            Some(PathEl::MoveTo(p)) => *p,
            _ => Point::ZERO,
        }
    }

    /// The end points of all elements, in order.
    ///
    /// The implicit origin is included when the path does not begin with a
    /// move.
    pub fn coords(&self) -> Vec<Point> {
        let mut coords = Vec::with_capacity(self.els.len() + 1);
        if !self.starts_with_move() {
            coords.push(Point::ZERO);
        }
        coords.extend(self.els.iter().map(PathEl::end_point));
        coords
    }

    pub(crate) fn starts_with_move(&self) -> bool {
        matches!(self.els.first(), None | Some(PathEl::MoveTo(_)))
    }

    /// The smallest rectangle enclosing the path.
    ///
    /// Curves contribute their extreme points, not their control points.
    /// The empty path yields [`Rect::ZERO`].
    pub fn bounding_box(&self) -> Rect {
        let mut bbox = if self.starts_with_move() {
            None
        } else {
            Some(Rect::ZERO)
        };
        let mut last = Point::ZERO;
        for el in &self.els {
            let el_bb = match el.segment(last) {
                Some(seg) => seg.bounding_box(),
                None => Rect::from_points(el.end_point(), el.end_point()),
            };
            bbox = Some(bbox.map_or(el_bb, |bb| bb.union(el_bb)));
            last = el.end_point();
        }
        bbox.unwrap_or(Rect::ZERO)
    }

    /// The total length of all segments.
    pub fn arclen(&self) -> f64 {
        self.segments()
            .map(|seg| seg.arclen(DEFAULT_ACCURACY))
            .sum()
    }

    /// Whether the path runs counter-clockwise in y-up coordinates.
    ///
    /// The sign comes from the shoelace sum over the segment end points,
    /// so curves count as their chords. In y-down device coordinates the
    /// same paths appear clockwise.
    pub fn is_ccw(&self) -> bool {
        let mut area = 0.0;
        let mut start = Point::ZERO;
        for el in &self.els {
            let end = el.end_point();
            if !matches!(el, PathEl::MoveTo(_)) {
                area += (end.x - start.x) * (start.y + end.y);
            }
            start = end;
        }
        area < 0.0
    }

    /// Apply an affine transform, returning a new path.
    ///
    /// Arcs are mapped onto the equivalent ellipse of the transformed
    /// space, and mirroring transforms flip their sweep. A path without a
    /// leading move gets `MoveTo(0, 0)` first, so the implicit origin is
    /// transformed too.
    pub fn transform(&self, affine: Affine) -> Path {
        let mut els = Vec::with_capacity(self.els.len() + 1);
        if !self.starts_with_move() {
            els.push(PathEl::MoveTo(affine * Point::ZERO));
        }
        let mut last = Point::ZERO;
        for el in &self.els {
            let mapped = match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(affine * p),
                PathEl::LineTo(p) => PathEl::LineTo(affine * p),
                PathEl::QuadTo(p1, p2) => PathEl::QuadTo(affine * p1, affine * p2),
                PathEl::CubeTo(p1, p2, p3) => {
                    PathEl::CubeTo(affine * p1, affine * p2, affine * p3)
                }
                PathEl::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let arc = EllipticArc {
                        from: last,
                        to,
                        radii,
                        x_rotation,
                        large_arc,
                        sweep,
                    };
                    match arc.transformed(affine) {
                        Some(arc) => PathEl::ArcTo {
                            radii: arc.radii,
                            x_rotation: arc.x_rotation,
                            large_arc: arc.large_arc,
                            sweep: arc.sweep,
                            to: arc.to,
                        },
                        None => {
                            trace!("transform: singular matrix collapses arc to a line");
                            PathEl::LineTo(affine * to)
                        }
                    }
                }
                PathEl::Close(p) => PathEl::Close(affine * p),
            };
            last = el.end_point();
            els.push(mapped);
        }
        Path::from(els)
    }

    /// Translate by `offset`, returning a new path.
    pub fn translate(&self, offset: impl Into<Vec2>) -> Path {
        self.transform(Affine::translate(offset))
    }

    /// Substitute segments in place.
    ///
    /// Each line (including closing lines), Bézier (quadratics are raised to
    /// cubics first) and arc is passed to the matching function. A returned
    /// path takes the segment's place; `None` keeps the segment. A leading
    /// move of the replacement to the current position is dropped, and a
    /// replaced closing line is followed by a close.
    pub fn replace(
        &mut self,
        mut line: impl FnMut(Line) -> Option<Path>,
        mut bezier: impl FnMut(CubicBez) -> Option<Path>,
        mut arc: impl FnMut(EllipticArc) -> Option<Path>,
    ) -> &mut Self {
        let els = core::mem::take(&mut self.els);
        let mut out: Vec<PathEl> = Vec::with_capacity(els.len());
        for el in els {
            let last = out.last().map_or(Point::ZERO, PathEl::end_point);
            let replacement = match el.segment(last) {
                None => None,
                Some(PathSeg::Line(l)) => line(l).map(|mut q| {
                    if let PathEl::Close(start) = el {
                        q.els.push(PathEl::Close(start));
                    }
                    q
                }),
                Some(PathSeg::Quad(q)) => bezier(q.raise()),
                Some(PathSeg::Cubic(c)) => bezier(c),
                Some(PathSeg::Arc(a)) => arc(a),
            };
            match replacement {
                Some(q) => {
                    let skip = match q.els.first() {
                        Some(PathEl::MoveTo(p)) => p.is_near(last, EPSILON),
                        _ => false,
                    };
                    out.extend_from_slice(&q.els[usize::from(skip)..]);
                }
                None => out.push(el),
            }
        }
        *self = Path::from(out);
        self
    }

    /// Replace curves by polylines deviating at most `config.tolerance`.
    pub fn flatten(&self, config: &PathConfig) -> Path {
        let tolerance = config.tolerance;
        let mut path = self.clone();
        path.replace(
            |_| None,
            |c| {
                let mut q = Path::new();
                q.move_to(c.p0);
                c.flatten(tolerance, &mut |p| {
                    q.line_to(p);
                });
                Some(q)
            },
            |a| {
                let mut q = Path::new();
                q.move_to(a.from);
                a.center_parameterization().flatten(tolerance, &mut |p| {
                    q.line_to(p);
                });
                Some(q)
            },
        );
        path
    }

    /// Traverse the path in the opposite direction, returning a new path.
    ///
    /// Every sub-path keeps its closure. Closing lines that coincide with
    /// their sub-path's start disappear.
    pub fn reverse(&self) -> Path {
        let mut ip = Path::new();
        if self.els.is_empty() {
            return ip;
        }
        let mut start = self.pos();
        ip.move_to(start);
        let mut closed = false;
        for k in (0..self.els.len()).rev() {
            let end = if k > 0 {
                self.els[k - 1].end_point()
            } else {
                Point::ZERO
            };
            match self.els[k] {
                PathEl::Close(_) => {
                    if !start.is_near(end, EPSILON) {
                        ip.line_to(end);
                    }
                    closed = true;
                }
                PathEl::MoveTo(_) => {
                    if closed {
                        ip.close_path();
                        closed = false;
                    }
                    if k > 0 {
                        ip.move_to(end);
                    }
                }
                PathEl::LineTo(_) => {
                    let opens_subpath = k == 0 || matches!(self.els[k - 1], PathEl::MoveTo(_));
                    if closed && opens_subpath {
                        ip.close_path();
                        closed = false;
                    } else {
                        ip.line_to(end);
                    }
                }
                PathEl::QuadTo(c, _) => {
                    ip.quad_to(c, end);
                }
                PathEl::CubeTo(c1, c2, _) => {
                    ip.curve_to(c2, c1, end);
                }
                PathEl::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    ..
                } => {
                    ip.arc_to(radii, x_rotation, large_arc, !sweep, end);
                }
            }
            start = end;
        }
        if closed {
            ip.close_path();
        }
        ip
    }

    /// Remove redundant elements in place.
    ///
    /// Dropped are moves without a following segment, closes right after a
    /// close, segments without length and lone move-close pairs. Curves
    /// whose control points sit on their end points become lines, and runs
    /// of lines in one direction merge into one.
    pub fn optimize(&mut self) -> &mut Self {
        fn trim_tail(out: &mut Vec<PathEl>) {
            loop {
                match out.as_slice() {
                    [.., PathEl::MoveTo(_)] => {
                        out.pop();
                    }
                    [.., PathEl::MoveTo(_), PathEl::Close(_)] => {
                        out.truncate(out.len() - 2);
                    }
                    _ => break,
                }
            }
        }
        fn before_last(out: &[PathEl]) -> Point {
            out.len()
                .checked_sub(2)
                .map_or(Point::ZERO, |ix| out[ix].end_point())
        }

        let before = self.els.len();
        let mut out: Vec<PathEl> = Vec::with_capacity(before);
        for &el in &self.els {
            let start = out.last().map_or(Point::ZERO, PathEl::end_point);
            let el = match el {
                PathEl::QuadTo(c, p) if c.is_near(start, EPSILON) || c.is_near(p, EPSILON) => {
                    PathEl::LineTo(p)
                }
                PathEl::CubeTo(c1, c2, p) if is_degenerate_cubic(start, c1, c2, p) => {
                    PathEl::LineTo(p)
                }
                el => el,
            };
            match el {
                PathEl::MoveTo(_) => {
                    trim_tail(&mut out);
                    out.push(el);
                }
                PathEl::LineTo(p) => {
                    if start.is_near(p, EPSILON) {
                        continue;
                    }
                    if let Some(&PathEl::LineTo(q)) = out.last() {
                        if collinear(before_last(&out), q, p) {
                            out.pop();
                        }
                    }
                    out.push(el);
                }
                PathEl::ArcTo { to, .. } => {
                    if !start.is_near(to, EPSILON) {
                        out.push(el);
                    }
                }
                PathEl::Close(p) => {
                    if let Some(PathEl::Close(_)) = out.last() {
                        continue;
                    }
                    while let Some(&PathEl::LineTo(q)) = out.last() {
                        if q.is_near(p, EPSILON) || collinear(before_last(&out), q, p) {
                            out.pop();
                        } else {
                            break;
                        }
                    }
                    out.push(el);
                }
                PathEl::QuadTo(..) | PathEl::CubeTo(..) => out.push(el),
            }
        }
        trim_tail(&mut out);
        if out.len() < before {
            debug!("optimize: {} of {before} path elements removed", before - out.len());
        }
        *self = Path::from(out);
        self
    }

    /// Concatenate `other` after this path, returning a new path.
    ///
    /// `other` starts a new sub-path; when it does not begin with a move,
    /// `MoveTo(0, 0)` is inserted.
    pub fn append(&self, other: &Path) -> Path {
        if other.els.is_empty() {
            return self.clone();
        }
        if self.els.is_empty() {
            return other.clone();
        }
        let mut els = Vec::with_capacity(self.els.len() + other.els.len() + 1);
        els.extend_from_slice(&self.els);
        if !other.starts_with_move() {
            els.push(PathEl::MoveTo(Point::ZERO));
        }
        els.extend_from_slice(&other.els);
        Path::from(els)
    }

    /// Concatenate `other` after this path, continuing the current sub-path
    /// when `other` starts where this path ends. Returns a new path.
    pub fn join(&self, other: &Path) -> Path {
        if other.els.is_empty() {
            return self.clone();
        }
        if self.els.is_empty() {
            return other.clone();
        }
        let skip = match other.els.first() {
            Some(PathEl::MoveTo(p)) => p.is_near(self.pos(), EPSILON),
            _ => false,
        };
        let mut els = Vec::with_capacity(self.els.len() + other.els.len());
        els.extend_from_slice(&self.els);
        els.extend_from_slice(&other.els[usize::from(skip)..]);
        Path::from(els)
    }

    /// Place a copy of a marker at every vertex.
    ///
    /// `start` goes on the first vertex, `end` on the last and `mid` on all
    /// others. With `align`, each marker is rotated to the path direction:
    /// the outgoing tangent at the start, the incoming one at the end and
    /// their bisector in between.
    pub fn markers(&self, start: &Path, mid: &Path, end: &Path, align: bool) -> Vec<Path> {
        let segs: Vec<PathSeg> = self.segments().collect();
        let Some(first) = segs.first() else {
            return Vec::new();
        };
        let place = |marker: &Path, at: Point, dir: Vec2| {
            let mut affine = Affine::translate(at.to_vec2());
            if align && dir.hypot2() > 0.0 {
                affine = affine * Affine::rotate(dir.atan2());
            }
            marker.transform(affine)
        };
        let mut markers = Vec::with_capacity(segs.len() + 1);
        markers.push(place(start, first.start(), first.start_tangent()));
        for (i, seg) in segs.iter().enumerate() {
            let incoming = seg.end_tangent();
            match segs.get(i + 1) {
                Some(next) => {
                    let outgoing = next.start_tangent();
                    let bisector = normalized(incoming) + normalized(outgoing);
                    let dir = if bisector.hypot2() > EPSILON {
                        bisector
                    } else {
                        incoming
                    };
                    markers.push(place(mid, seg.end(), dir));
                }
                None => markers.push(place(end, seg.end(), incoming)),
            }
        }
        markers
    }

    /// Expand arcs into cubic Béziers.
    ///
    /// The result has no arc to trip up consumers without an arc
    /// primitive. It always starts with a move.
    pub fn to_bez_path(&self, config: &PathConfig) -> BezPath {
        let mut bez = BezPath::new();
        if !self.starts_with_move() {
            bez.move_to(Point::ZERO);
        }
        let mut last = Point::ZERO;
        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) => bez.move_to(p),
                PathEl::LineTo(p) => bez.line_to(p),
                PathEl::QuadTo(p1, p2) => bez.quad_to(p1, p2),
                PathEl::CubeTo(p1, p2, p3) => bez.curve_to(p1, p2, p3),
                PathEl::ArcTo { .. } => {
                    if let Some(PathSeg::Arc(arc)) = el.segment(last) {
                        if arc.is_straight_line() {
                            bez.line_to(arc.to);
                        } else {
                            bez.extend(arc.center_parameterization().append_iter(config.tolerance));
                        }
                    }
                }
                PathEl::Close(_) => bez.close_path(),
            }
            last = el.end_point();
        }
        bez
    }
}

fn normalized(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 0.0 {
        v / len
    } else {
        v
    }
}

fn is_degenerate_cubic(p0: Point, c1: Point, c2: Point, p: Point) -> bool {
    let on_end = |c: Point| c.is_near(p0, EPSILON) || c.is_near(p, EPSILON);
    on_end(c1) && on_end(c2)
}

impl From<Vec<PathEl>> for Path {
    /// Take the elements as they are.
    ///
    /// No degeneracy rules are applied, but every close is pointed at the
    /// start of its sub-path.
    fn from(mut els: Vec<PathEl>) -> Path {
        let mut start = Point::ZERO;
        let mut start_ix = 0;
        for (ix, el) in els.iter_mut().enumerate() {
            match el {
                PathEl::MoveTo(p) => {
                    start = *p;
                    start_ix = ix;
                }
                PathEl::Close(p) => *p = start,
                _ => {}
            }
        }
        Path { els, start_ix }
    }
}

impl From<Path> for Vec<PathEl> {
    fn from(path: Path) -> Vec<PathEl> {
        path.els
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = PathEl;
    type IntoIter = iter::Copied<slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.els.iter().copied()
    }
}

impl Mul<&Path> for Affine {
    type Output = Path;

    fn mul(self, other: &Path) -> Path {
        other.transform(self)
    }
}

/// An iterator over the segments of a [`Path`].
#[derive(Clone, Debug)]
pub struct PathSegs<'a> {
    els: slice::Iter<'a, PathEl>,
    last: Point,
}

impl Iterator for PathSegs<'_> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.els {
            let seg = el.segment(self.last);
            self.last = el.end_point();
            if seg.is_some() {
                return seg;
            }
        }
        None
    }
}
