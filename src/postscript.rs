// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PostScript path construction operators.

use core::fmt::Write;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::common::EPSILON;
use crate::{EllipticArc, Path, PathEl, Point, QuadBez};

/// Writes space-separated operands and operators.
struct PsWriter {
    out: String,
}

impl PsWriter {
    fn op(&mut self, args: &[f64], name: &str) {
        for &a in args {
            self.sep();
            // Writing to a `String` cannot fail.
            let _ = write!(self.out, "{a:.5}");
        }
        self.sep();
        self.out.push_str(name);
    }

    fn sep(&mut self) {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
    }
}

impl Path {
    /// The path as PostScript path construction operators.
    ///
    /// Coordinates use five decimals. Quadratic Béziers are raised to
    /// `curveto`. Arcs use `arc`, or the `ellipse` procedure when the radii
    /// differ, drawn in a coordinate system rotated about the center. The
    /// `n` variants draw towards decreasing angles. An open final sub-path
    /// gets a `closepath`. An empty path gives an empty string.
    pub fn to_ps(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut w = PsWriter { out: String::new() };
        if !self.starts_with_move() {
            w.op(&[0.0, 0.0], "moveto");
        }
        let mut last = Point::ZERO;
        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) => w.op(&[p.x, p.y], "moveto"),
                PathEl::LineTo(p) => w.op(&[p.x, p.y], "lineto"),
                PathEl::QuadTo(p1, p2) => {
                    let c = QuadBez::new(last, p1, p2).raise();
                    w.op(&[c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y], "curveto");
                }
                PathEl::CubeTo(p1, p2, p3) => {
                    w.op(&[p1.x, p1.y, p2.x, p2.y, p3.x, p3.y], "curveto");
                }
                PathEl::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let arc = EllipticArc::new(last, to, radii, x_rotation, large_arc, sweep)
                        .center_parameterization();
                    let c = arc.center;
                    let theta0 = arc.start_angle.to_degrees();
                    let theta1 = (arc.start_angle + arc.sweep_angle).to_degrees();
                    let rot = x_rotation.to_degrees();
                    let rotated = rot.abs() > EPSILON;
                    if rotated {
                        w.op(&[c.x, c.y], "translate");
                        w.op(&[rot], "rotate");
                        w.op(&[-c.x, -c.y], "translate");
                    }
                    let n = if sweep { "" } else { "n" };
                    if (arc.radii.x - arc.radii.y).abs() > EPSILON {
                        let args = [c.x, c.y, arc.radii.x, arc.radii.y, theta0, theta1];
                        w.op(&args, &["ellipse", n].concat());
                    } else {
                        w.op(&[c.x, c.y, arc.radii.x, theta0, theta1], &["arc", n].concat());
                    }
                    if rotated {
                        w.op(&[], "initmatrix");
                    }
                }
                PathEl::Close(_) => w.op(&[], "closepath"),
            }
            last = el.end_point();
        }
        if !self.is_closed() {
            w.op(&[], "closepath");
        }
        w.out
    }
}
