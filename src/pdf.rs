// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PDF path construction operators.

use core::fmt::Write;

use alloc::string::String;

use crate::{BezEl, BezPath, Path, PathConfig, Point, QuadBez};

impl BezPath {
    /// The path as PDF content stream path operators.
    ///
    /// Coordinates use five decimals. Quadratic Béziers are raised to `c`.
    /// A path not starting with a move gets `0 0 m` first. An empty path
    /// gives an empty string.
    pub fn to_pdf(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        // Writing to a `String` cannot fail.
        let _ = self.write_pdf(&mut out);
        out
    }

    fn write_pdf(&self, w: &mut String) -> core::fmt::Result {
        let starts_with_move = matches!(self.elements().first(), Some(BezEl::MoveTo(_)));
        if !starts_with_move {
            w.push_str("0 0 m");
        }
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        for el in self {
            if !w.is_empty() {
                w.push(' ');
            }
            match el {
                BezEl::MoveTo(p) => {
                    write!(w, "{:.5} {:.5} m", p.x, p.y)?;
                    start = p;
                    last = p;
                }
                BezEl::LineTo(p) => {
                    write!(w, "{:.5} {:.5} l", p.x, p.y)?;
                    last = p;
                }
                BezEl::QuadTo(p1, p2) => {
                    let c = QuadBez::new(last, p1, p2).raise();
                    write_cubic(w, c.p1, c.p2, c.p3)?;
                    last = p2;
                }
                BezEl::CurveTo(p1, p2, p3) => {
                    write_cubic(w, p1, p2, p3)?;
                    last = p3;
                }
                BezEl::ClosePath => {
                    w.push('h');
                    last = start;
                }
            }
        }
        Ok(())
    }
}

fn write_cubic(w: &mut String, p1: Point, p2: Point, p3: Point) -> core::fmt::Result {
    write!(
        w,
        "{:.5} {:.5} {:.5} {:.5} {:.5} {:.5} c",
        p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
    )
}

impl Path {
    /// The path as PDF path operators, arcs expanded into cubic Béziers
    /// within `config.tolerance`.
    ///
    /// See [`BezPath::to_pdf`].
    pub fn to_pdf(&self, config: &PathConfig) -> String {
        self.to_bez_path(config).to_pdf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .curve_to((10.0, 5.0), (5.0, 10.0), (0.0, 10.0))
            .close_path();
        assert_eq!(
            path.to_pdf(&PathConfig::default()),
            "0.00000 0.00000 m 10.00000 0.00000 l \
             10.00000 5.00000 5.00000 10.00000 0.00000 10.00000 c h"
        );
        assert_eq!(Path::new().to_pdf(&PathConfig::default()), "");
    }

    #[test]
    fn quads_are_raised() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((3.0, 3.0), (6.0, 0.0));
        assert_eq!(
            path.to_pdf(),
            "0.00000 0.00000 m 2.00000 2.00000 4.00000 2.00000 6.00000 0.00000 c"
        );
    }

    #[test]
    fn implicit_start() {
        let mut path = BezPath::new();
        path.line_to((1.0, 2.0));
        assert_eq!(path.to_pdf(), "0 0 m 1.00000 2.00000 l");
    }

    #[test]
    fn arcs_become_cubics() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0))
            .arc_to((5.0, 5.0), 0.0, false, true, (10.0, 0.0))
            .close_path();
        let pdf = path.to_pdf(&PathConfig::default());
        assert!(pdf.starts_with("0.00000 0.00000 m "), "{pdf}");
        assert!(pdf.ends_with(" c h"), "{pdf}");
        assert!(pdf.contains(" 10.00000 "), "{pdf}");
        assert!(pdf.matches(" c").count() >= 2, "{pdf}");
        assert!(!pdf.contains(" l"), "{pdf}");
    }
}
