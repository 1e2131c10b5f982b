// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths (up to cubic), without arcs.

use core::ops::Mul;
use core::{iter, slice};

use alloc::vec::Vec;

use crate::{Affine, Point};

/// A path of Bézier segments up to cubic, possibly with multiple subpaths.
///
/// Unlike [`Path`](crate::Path), a `BezPath` cannot hold elliptical arcs.
/// Output formats and rasterizers without an arc primitive consume this
/// type, so an arc can never reach them. Build one with
/// [`Path::to_bez_path`](crate::Path::to_bez_path), which expands arcs into
/// cubic Béziers.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<BezEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BezEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic Bézier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic Bézier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

impl BezPath {
    /// Create a new path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<BezEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: BezEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(BezEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(BezEl::LineTo(p.into()));
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(BezEl::QuadTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(BezEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(BezEl::ClosePath);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[BezEl] {
        &self.0
    }

    /// Returns `true` if the path contains no segments.
    pub fn is_empty(&self) -> bool {
        self.0
            .iter()
            .all(|el| matches!(el, BezEl::MoveTo(..) | BezEl::ClosePath))
    }

    /// Whether the last element closes its subpath.
    pub fn is_closed(&self) -> bool {
        matches!(self.0.last(), Some(BezEl::ClosePath))
    }

    /// Apply an affine transform to the path.
    pub fn apply_affine(&mut self, affine: Affine) {
        for el in self.0.iter_mut() {
            *el = affine * (*el);
        }
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = BezEl;
    type IntoIter = iter::Copied<slice::Iter<'a, BezEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().copied()
    }
}

impl FromIterator<BezEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = BezEl>>(iter: T) -> Self {
        BezPath(iter.into_iter().collect())
    }
}

impl Extend<BezEl> for BezPath {
    fn extend<I: IntoIterator<Item = BezEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl Mul<BezEl> for Affine {
    type Output = BezEl;

    fn mul(self, other: BezEl) -> BezEl {
        match other {
            BezEl::MoveTo(p) => BezEl::MoveTo(self * p),
            BezEl::LineTo(p) => BezEl::LineTo(self * p),
            BezEl::QuadTo(p1, p2) => BezEl::QuadTo(self * p1, self * p2),
            BezEl::CurveTo(p1, p2, p3) => BezEl::CurveTo(self * p1, self * p2, self * p3),
            BezEl::ClosePath => BezEl::ClosePath,
        }
    }
}

impl Mul<&BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: &BezPath) -> BezPath {
        BezPath(other.0.iter().map(|&el| self * el).collect())
    }
}
