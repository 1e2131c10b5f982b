// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Winding numbers and fill tests.

use alloc::vec::Vec;

use crate::common::EPSILON;
use crate::{Path, PathConfig, Point};

/// A closed polygon given by its vertices.
///
/// The edge from the last vertex back to the first is implied.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline from its vertices.
    pub fn new(points: Vec<Point>) -> Polyline {
        Polyline { points }
    }

    /// The end points of the path's elements, curves counting as chords.
    pub fn from_path_coords(path: &Path) -> Polyline {
        Polyline {
            points: path.coords(),
        }
    }

    /// The vertices of the path's flattening within `config.tolerance`.
    pub fn from_path(path: &Path, config: &PathConfig) -> Polyline {
        Polyline::from_path_coords(&path.flatten(config))
    }

    /// The vertices.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The winding number of the polygon around `pt`.
    ///
    /// Counter-clockwise turns, in y-up coordinates, count positive. Points
    /// on a lower edge count as inside and points on an upper edge do not,
    /// so adjacent polygons never both claim a shared edge.
    pub fn winding(&self, pt: Point) -> i32 {
        let n = self.points.len();
        let mut winding = 0;
        for (i, &a) in self.points.iter().enumerate() {
            let b = self.points[(i + 1) % n];
            let side = (b - a).cross(pt - a);
            if a.y <= pt.y {
                if b.y > pt.y && side > 0.0 {
                    winding += 1;
                }
            } else if b.y <= pt.y && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }
}

impl Path {
    /// Whether `pt` is filled under `config.fill_rule`.
    ///
    /// Every sub-path counts as closed. Curves are flattened within
    /// `config.tolerance` first.
    pub fn interior(&self, pt: impl Into<Point>, config: &PathConfig) -> bool {
        let pt = pt.into();
        let winding = self
            .split()
            .iter()
            .map(|sub| Polyline::from_path(sub, config).winding(pt))
            .sum();
        config.fill_rule.fills(winding)
    }

    /// Whether each closed sub-path is filled under `config.fill_rule`.
    ///
    /// A point just inside every closed sub-path, next to its first edge, is
    /// tested against all sub-paths together. A sub-path whose point comes
    /// out unfilled cuts a hole in another one. Open and empty sub-paths
    /// get no entry.
    pub fn filling(&self, config: &PathConfig) -> Vec<bool> {
        let subs = self.split();
        let tests: Vec<Point> = subs
            .iter()
            .filter(|sub| sub.is_closed() && !sub.is_empty())
            .filter_map(|sub| {
                let coords = sub.coords();
                let (&p0, &p1) = (coords.first()?, coords.get(1)?);
                let dir = p1 - p0;
                if dir.hypot2() == 0.0 {
                    return None;
                }
                // Inside is on the right of a clockwise sub-path.
                let mut offset = -dir.turn_90() * (EPSILON / dir.hypot());
                if sub.is_ccw() {
                    offset = -offset;
                }
                Some(p0.midpoint(p1) + offset)
            })
            .collect();

        let polylines: Vec<Polyline> = subs.iter().map(Polyline::from_path_coords).collect();
        tests
            .iter()
            .map(|&pt| {
                let winding = polylines.iter().map(|poly| poly.winding(pt)).sum();
                config.fill_rule.fills(winding)
            })
            .collect()
    }
}
