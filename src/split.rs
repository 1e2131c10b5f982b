// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cutting paths into sub-paths, at arc-length offsets, and into dashes.

use core::f64::consts::PI;
use core::mem;

use alloc::vec::Vec;

use log::debug;

use crate::common::InvArclen;
use crate::{
    Arc, CubicBez, Dashes, ParamCurve, ParamCurveArclen, ParamCurveDeriv, Path, PathEl, PathSeg,
    Point, QuadBez, DEFAULT_ACCURACY,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// State of a walk along a path that cuts it at given distances.
struct Cutter<'a> {
    cuts: &'a [f64],
    next: usize,
    /// Distance covered before the current segment.
    covered: f64,
    fragments: Vec<Path>,
    q: Path,
}

impl Cutter<'_> {
    /// The next cut inside a segment of length `len`, relative to its start.
    fn next_cut(&mut self, len: f64) -> Option<f64> {
        let cut = *self.cuts.get(self.next)?;
        if cut <= self.covered + len {
            self.next += 1;
            Some(cut - self.covered)
        } else {
            None
        }
    }

    /// End the current fragment and start the next one where it stopped.
    fn cut(&mut self) {
        let pos = self.q.pos();
        self.fragments.push(mem::take(&mut self.q));
        self.q.move_to(pos);
    }

    fn line(&mut self, from: Point, to: Point) {
        let len = from.distance(to);
        while let Some(s) = self.next_cut(len) {
            self.q.line_to(from.lerp(to, s / len));
            self.cut();
        }
        self.q.line_to(to);
        self.covered += len;
    }

    fn quad(&mut self, quad: QuadBez) {
        let len = quad.arclen(DEFAULT_ACCURACY);
        let deriv = quad.deriv();
        let inv = InvArclen::new(|t| deriv.eval(t).to_vec2().hypot(), 0.0, 1.0);
        let scale = arclen_scale(&inv, len);
        let (mut rest, mut t0) = (quad, 0.0);
        while let Some(s) = self.next_cut(len) {
            let t = inv.eval(s * scale);
            let (a, b) = rest.split(remaining_param(t0, t));
            t0 = t;
            rest = b;
            self.q.quad_to(a.p1, a.p2);
            self.cut();
        }
        self.q.quad_to(rest.p1, rest.p2);
        self.covered += len;
    }

    fn cubic(&mut self, cubic: CubicBez) {
        let len = cubic.arclen(DEFAULT_ACCURACY);
        let deriv = cubic.deriv();
        let inv = InvArclen::new(|t| deriv.eval(t).to_vec2().hypot(), 0.0, 1.0);
        let scale = arclen_scale(&inv, len);
        let (mut rest, mut t0) = (cubic, 0.0);
        while let Some(s) = self.next_cut(len) {
            let t = inv.eval(s * scale);
            let (a, b) = rest.split(remaining_param(t0, t));
            t0 = t;
            rest = b;
            self.q.curve_to(a.p1, a.p2, a.p3);
            self.cut();
        }
        self.q.curve_to(rest.p1, rest.p2, rest.p3);
        self.covered += len;
    }

    fn arc(&mut self, arc: Arc) {
        let len = arc.arclen();
        let inv = InvArclen::new(|th| arc.speed(th), arc.start_angle, arc.end_angle());
        let scale = arclen_scale(&inv, len);
        let mut rest = arc;
        while let Some(s) = self.next_cut(len) {
            let theta = inv.eval(s * scale);
            match rest.split_at_angle(theta) {
                Some((a, b)) => {
                    self.arc_piece(a);
                    rest = b;
                }
                // The cut falls on an end of the remaining arc.
                None => {
                    if (theta - rest.end_angle()).abs() < (theta - rest.start_angle).abs() {
                        self.arc_piece(rest);
                        rest = Arc {
                            start_angle: rest.end_angle(),
                            sweep_angle: 0.0,
                            ..rest
                        };
                    }
                }
            }
            self.cut();
        }
        self.arc_piece(rest);
        self.covered += len;
    }

    fn arc_piece(&mut self, a: Arc) {
        self.q.arc_to(
            a.radii,
            a.x_rotation,
            a.sweep_angle.abs() > PI,
            a.sweep_angle > 0.0,
            a.end(),
        );
    }
}

/// Factor from true distances to the quadrature's distances.
fn arclen_scale(inv: &InvArclen, len: f64) -> f64 {
    if len > 0.0 {
        inv.length() / len
    } else {
        0.0
    }
}

/// The parameter of `t` within the part of a curve remaining after `t0`.
fn remaining_param(t0: f64, t: f64) -> f64 {
    if t0 < 1.0 {
        ((t - t0) / (1.0 - t0)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

impl Path {
    /// Separate the path into its sub-paths.
    ///
    /// A new sub-path begins at every move and after every close. Sub-paths
    /// continuing after a close get a move to the point they start from,
    /// unless that point is the origin where a path starts anyway.
    pub fn split(&self) -> Vec<Path> {
        let mut out = Vec::new();
        let mut cur: Vec<PathEl> = Vec::new();
        let mut last = Point::ZERO;
        for &el in &self.els {
            let boundary = match el {
                PathEl::MoveTo(_) => !cur.is_empty(),
                _ => matches!(cur.last(), Some(PathEl::Close(_))),
            };
            if boundary {
                out.push(Path::from(mem::take(&mut cur)));
            }
            if cur.is_empty()
                && !out.is_empty()
                && last != Point::ZERO
                && !matches!(el, PathEl::MoveTo(_))
            {
                cur.push(PathEl::MoveTo(last));
            }
            cur.push(el);
            last = el.end_point();
        }
        if !cur.is_empty() {
            out.push(Path::from(cur));
        }
        out
    }

    /// Cut the path at the given distances along it.
    ///
    /// Distances are measured from the start of the path across all of its
    /// sub-paths and may come in any order. Curves are cut exactly at the
    /// point that lies at the requested arc length. Every fragment starts
    /// with a move and is open; closing lines become plain lines. Distances
    /// of zero or less, or at or beyond the end of the path, produce no cut.
    ///
    /// Without distances the result is the path itself.
    pub fn split_at(&self, ts: &[f64]) -> Vec<Path> {
        let mut cuts: Vec<f64> = ts.iter().copied().filter(|&t| t > 0.0).collect();
        if cuts.is_empty() {
            return alloc::vec![self.clone()];
        }
        cuts.sort_by(f64::total_cmp);
        cuts.dedup();
        let mut fragments = self.cut_at(&cuts);
        if fragments.last().is_some_and(Path::is_empty) {
            fragments.pop();
        }
        fragments
    }

    /// Cut at the sorted distances `cuts`, returning one fragment per cut
    /// reached plus the remainder, which may be empty.
    fn cut_at(&self, cuts: &[f64]) -> Vec<Path> {
        let mut cutter = Cutter {
            cuts,
            next: 0,
            covered: 0.0,
            fragments: Vec::with_capacity(cuts.len() + 1),
            q: Path::new(),
        };
        if !self.starts_with_move() {
            cutter.q.move_to(Point::ZERO);
        }
        let mut last = Point::ZERO;
        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) => {
                    if let Some(PathEl::MoveTo(_)) = cutter.q.els.last() {
                        cutter.q.els.pop();
                    }
                    cutter.q.move_to(p);
                }
                PathEl::LineTo(p) | PathEl::Close(p) => cutter.line(last, p),
                PathEl::QuadTo(p1, p2) => cutter.quad(QuadBez::new(last, p1, p2)),
                PathEl::CubeTo(p1, p2, p3) => cutter.cubic(CubicBez::new(last, p1, p2, p3)),
                PathEl::ArcTo { to, .. } => {
                    if let Some(PathSeg::Arc(arc)) = el.segment(last) {
                        if arc.is_straight_line() {
                            cutter.line(last, to);
                        } else {
                            cutter.arc(arc.center_parameterization());
                        }
                    }
                }
            }
            last = el.end_point();
        }
        if cutter.next < cuts.len() {
            debug!(
                "split_at: {} offsets at or beyond the path length {} ignored",
                cuts.len() - cutter.next,
                cutter.covered
            );
        }
        let Cutter {
            mut fragments, q, ..
        } = cutter;
        fragments.push(q);
        fragments
    }

    /// Turn the path into dashes.
    ///
    /// `pattern` alternates dash and gap lengths, starting with a dash; an
    /// odd-length pattern is repeated once to make it even. `offset` shifts
    /// the pattern along the path and wraps around the pattern length, so
    /// negative offsets work too. The pattern runs on across sub-paths: a
    /// sub-path picks it up where the previous one left off. On a closed
    /// sub-path, a dash running over the start is joined with
    /// the dash beginning there.
    ///
    /// A pattern that is empty, has no positive length or holds negative
    /// or non-finite lengths leaves the path unchanged.
    pub fn dash(&self, offset: f64, pattern: &[f64]) -> Path {
        let total: f64 = pattern.iter().sum();
        if pattern.is_empty()
            || total <= 0.0
            || !total.is_finite()
            || pattern.iter().any(|&d| d < 0.0)
        {
            debug!("dash: pattern {pattern:?} draws nothing, path left undashed");
            return self.clone();
        }
        let mut d: Dashes = pattern.iter().copied().collect();
        if d.len() % 2 == 1 {
            d.extend_from_slice(pattern);
        }
        let total: f64 = d.iter().sum();
        let offset = if offset.is_finite() {
            offset.rem_euclid(total)
        } else {
            0.0
        };

        let mut out = Path::new();
        // Pattern entry under the pen, and how much of it is behind us.
        let (mut i, mut consumed) = (0, offset);
        for sub in self.split() {
            if sub.is_empty() {
                continue;
            }
            while consumed >= d[i] {
                consumed -= d[i];
                i = (i + 1) % d.len();
            }
            let starts_on = i % 2 == 0;

            let len = sub.arclen();
            let mut cuts: Vec<f64> = Vec::new();
            let mut pos = d[i] - consumed;
            while pos < len {
                // A zero-length entry toggles twice at the same spot.
                if cuts.last() == Some(&pos) {
                    cuts.pop();
                } else {
                    cuts.push(pos);
                }
                i = (i + 1) % d.len();
                pos += d[i];
            }
            consumed = d[i] - (pos - len);

            if cuts.is_empty() {
                if starts_on {
                    out = out.append(&sub);
                }
                continue;
            }
            let fragments = sub.cut_at(&cuts);
            let is_dash = |k: usize| starts_on == (k % 2 == 0);
            let mut dashes: Vec<Path> = fragments
                .iter()
                .enumerate()
                .filter(|&(k, frag)| is_dash(k) && !frag.is_empty())
                .map(|(_, frag)| frag.clone())
                .collect();
            let last = fragments.len() - 1;
            if sub.is_closed() && is_dash(0) && is_dash(last) && dashes.len() > 1 {
                if let Some(tail) = dashes.pop() {
                    dashes[0] = tail.join(&dashes[0]);
                }
            }
            for dash in &dashes {
                out = out.append(dash);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p1:?} != {p0:?}");
    }

    fn square(size: f64) -> Path {
        let mut p = Path::new();
        p.move_to((0.0, 0.0))
            .line_to((size, 0.0))
            .line_to((size, size))
            .line_to((0.0, size))
            .close_path();
        p
    }

    fn count_moves(p: &Path) -> usize {
        p.elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    #[test]
    fn split_subpaths() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0))
            .line_to((1.0, 0.0))
            .line_to((1.0, 1.0))
            .close_path()
            .line_to((0.0, 2.0))
            .move_to((5.0, 5.0))
            .line_to((6.0, 6.0));
        let parts = p.split();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].is_closed());
        // The piece after the close starts at the origin already.
        assert_eq!(parts[1].elements(), &[PathEl::LineTo(Point::new(0.0, 2.0))]);
        assert_eq!(parts[1].start_pos(), Point::ZERO);
        assert_eq!(parts[2].start_pos(), Point::new(5.0, 5.0));
        let total: f64 = parts.iter().map(Path::arclen).sum();
        assert!((total - p.arclen()).abs() < 1e-12);
    }

    #[test]
    fn split_after_close_away_from_origin() {
        let mut p = Path::new();
        p.move_to((2.0, 3.0))
            .line_to((4.0, 3.0))
            .line_to((4.0, 5.0))
            .close_path()
            .line_to((2.0, 8.0));
        let parts = p.split();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1].elements(),
            &[
                PathEl::MoveTo(Point::new(2.0, 3.0)),
                PathEl::LineTo(Point::new(2.0, 8.0))
            ]
        );
        assert!((parts[1].arclen() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn split_without_leading_move() {
        let mut p = Path::new();
        p.line_to((1.0, 0.0));
        let parts = p.split();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0], p);
        assert!(Path::new().split().is_empty());
    }

    #[test]
    fn split_at_line() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).line_to((10.0, 0.0));
        let parts = p.split_at(&[5.0, 2.5, 0.0, 2.5]);
        assert_eq!(parts.len(), 3);
        let lens: Vec<f64> = parts.iter().map(Path::arclen).collect();
        assert!((lens[0] - 2.5).abs() < 1e-12);
        assert!((lens[1] - 2.5).abs() < 1e-12);
        assert!((lens[2] - 5.0).abs() < 1e-12);
        assert_eq!(parts[1].elements()[0], PathEl::MoveTo(Point::new(2.5, 0.0)));

        // Offsets past the end cut nothing.
        assert_eq!(p.split_at(&[10.0, 20.0]).len(), 1);
        assert_eq!(p.split_at(&[]), alloc::vec![p.clone()]);
    }

    #[test]
    fn split_at_opens_closed_paths() {
        let parts = square(10.0).split_at(&[15.0]);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|part| !part.is_closed()));
        assert_near(parts[0].pos(), Point::new(10.0, 5.0), 1e-12);
        assert_near(parts[1].pos(), Point::ZERO, 1e-12);
        assert!((parts[1].arclen() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn split_at_keeps_subpaths() {
        let mut p = square(10.0);
        p.move_to((20.0, 0.0)).line_to((30.0, 0.0));
        let parts = p.split_at(&[45.0]);
        assert_eq!(parts.len(), 2);
        assert_eq!(count_moves(&parts[0]), 2);
        assert_near(parts[1].start_pos(), Point::new(25.0, 0.0), 1e-12);
    }

    #[test]
    fn split_at_arc() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).arc_to((5.0, 5.0), 0.0, false, true, (10.0, 0.0));
        let half = 2.5 * PI;
        let parts = p.split_at(&[half]);
        assert_eq!(parts.len(), 2);
        assert_near(parts[0].pos(), Point::new(5.0, -5.0), 1e-6);
        assert!((parts[0].arclen() - half).abs() < 1e-6);
        assert!((parts[1].arclen() - half).abs() < 1e-6);
        assert!(matches!(parts[1].elements()[1], PathEl::ArcTo { sweep: true, .. }));
        assert!(parts[1]
            .bounding_box()
            .is_near(Rect::new(5.0, -5.0, 10.0, 0.0), 1e-6));
    }

    #[test]
    fn split_at_cubic() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0))
            .curve_to((10.0, 20.0), (30.0, 20.0), (40.0, 0.0));
        let len = p.arclen();
        let ts = [0.2 * len, 0.5 * len, 0.9 * len];
        let parts = p.split_at(&ts);
        assert_eq!(parts.len(), 4);
        let lens: Vec<f64> = parts.iter().map(Path::arclen).collect();
        assert!((lens.iter().sum::<f64>() - len).abs() < 1e-6);
        assert!((lens[0] - 0.2 * len).abs() < 1e-3 * len);
        assert!((lens[1] - 0.3 * len).abs() < 1e-3 * len);
        // Fragments meet exactly.
        for w in parts.windows(2) {
            assert_eq!(w[0].pos(), w[1].start_pos());
        }
        assert_eq!(parts[3].pos(), Point::new(40.0, 0.0));
    }

    #[test]
    fn split_at_conserves_length_random() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..40 {
            let pt = |rng: &mut StdRng| {
                Point::new(rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0))
            };
            let mut p = Path::new();
            p.move_to(pt(&mut rng))
                .line_to(pt(&mut rng))
                .quad_to(pt(&mut rng), pt(&mut rng))
                .curve_to(pt(&mut rng), pt(&mut rng), pt(&mut rng));
            if rng.random_bool(0.5) {
                p.close_path();
            }
            let len = p.arclen();
            let t = rng.random_range(0.05..0.95) * len;
            let parts = p.split_at(&[t]);
            assert_eq!(parts.len(), 2);
            let sum: f64 = parts.iter().map(Path::arclen).sum();
            assert!((sum - len).abs() < 1e-6 * len.max(1.0), "{sum} != {len}");
            assert_eq!(parts[0].pos(), parts[1].start_pos());
        }
    }

    #[test]
    fn dash_single_line() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).line_to((10.0, 0.0));
        let dashed = p.dash(0.0, &[4.0, 6.0]);
        assert_eq!(count_moves(&dashed), 1);
        assert!((dashed.arclen() - 4.0).abs() < 1e-12);
        assert_eq!(dashed.pos(), Point::new(4.0, 0.0));
    }

    #[test]
    fn dash_odd_pattern() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).line_to((20.0, 0.0));
        let dashed = p.dash(0.0, &[5.0]);
        assert_eq!(count_moves(&dashed), 2);
        assert!((dashed.arclen() - 10.0).abs() < 1e-12);
        assert_eq!(dashed.start_pos(), Point::new(10.0, 0.0));
    }

    #[test]
    fn dash_offset_wraps() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).line_to((10.0, 0.0));
        let a = p.dash(1.0, &[2.0, 2.0]);
        let b = p.dash(-3.0, &[2.0, 2.0]);
        assert_eq!(a, b);
        // Starts half way into the first dash.
        assert_eq!(a.elements()[1], PathEl::LineTo(Point::new(1.0, 0.0)));
        assert!((a.arclen() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn dash_closed_wraps_around() {
        let sq = square(10.0);
        let dashed = sq.dash(0.0, &[6.0, 4.0]);
        assert_eq!(count_moves(&dashed), 4);
        assert!((dashed.arclen() - 24.0).abs() < 1e-12);

        // The dash over the start corner is a single piece.
        let dashed = sq.dash(2.0, &[6.0, 4.0]);
        assert_eq!(count_moves(&dashed), 4);
        assert!((dashed.arclen() - 24.0).abs() < 1e-12);
        let first = &dashed.split()[0];
        assert!((first.arclen() - 6.0).abs() < 1e-12);
        assert_eq!(first.start_pos(), Point::new(0.0, 2.0));
        assert_eq!(first.pos(), Point::new(4.0, 0.0));
    }

    #[test]
    fn dash_phase_carries_across_subpaths() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0))
            .line_to((3.0, 0.0))
            .move_to((0.0, 10.0))
            .line_to((3.0, 10.0));
        let dashed = p.dash(0.0, &[2.0, 2.0]);
        let dashes = dashed.split();
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0].start_pos(), Point::ZERO);
        assert_eq!(dashes[0].pos(), Point::new(2.0, 0.0));
        // One unit of the gap is left over from the first line.
        assert_eq!(dashes[1].start_pos(), Point::new(1.0, 10.0));
        assert_eq!(dashes[1].pos(), Point::new(3.0, 10.0));

        // A sub-path shorter than the current dash continues it.
        let mut p = Path::new();
        p.move_to((0.0, 0.0))
            .line_to((1.0, 0.0))
            .move_to((0.0, 5.0))
            .line_to((3.0, 5.0));
        let dashes = p.dash(0.0, &[3.0, 1.0]).split();
        assert_eq!(dashes.len(), 2);
        assert_eq!(
            dashes[0].elements(),
            &[
                PathEl::MoveTo(Point::ZERO),
                PathEl::LineTo(Point::new(1.0, 0.0))
            ]
        );
        assert_eq!(dashes[1].start_pos(), Point::new(0.0, 5.0));
        assert_eq!(dashes[1].pos(), Point::new(2.0, 5.0));
    }

    #[test]
    fn dash_degenerate_patterns() {
        let sq = square(10.0);
        assert_eq!(sq.dash(0.0, &[]), sq);
        assert_eq!(sq.dash(0.0, &[0.0, 0.0]), sq);
        assert_eq!(sq.dash(0.0, &[1.0, -1.0]), sq);
        // A zero-length gap merges neighboring dashes.
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).line_to((10.0, 0.0));
        let dashed = p.dash(0.0, &[3.0, 0.0, 3.0, 4.0]);
        assert_eq!(count_moves(&dashed), 1);
        assert!((dashed.arclen() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn dash_short_subpath() {
        let mut p = Path::new();
        p.move_to((0.0, 0.0)).line_to((1.0, 0.0));
        assert_eq!(p.dash(0.0, &[5.0, 1.0]), p);
        assert!(p.dash(5.0, &[5.0, 1.0]).is_empty());
        assert!((p.dash(5.5, &[5.0, 1.0]).arclen() - 0.5).abs() < 1e-12);
    }
}
