// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feeding paths to a scan converter.

use crate::{BezEl, BezPath, Path, PathConfig, Point};

/// A scan-conversion accumulator that consumes path outlines.
///
/// Coordinates are in device pixels with y pointing down. Coverage
/// computation is up to the implementor.
pub trait Rasterizer {
    /// Begin a new contour at (x, y).
    fn move_to(&mut self, x: f32, y: f32);

    /// Add a line from the current point to (x, y).
    fn line_to(&mut self, x: f32, y: f32);

    /// Add a quadratic Bézier with control point (cx, cy) ending at (x, y).
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);

    /// Add a cubic Bézier with control points (cx0, cy0) and (cx1, cy1)
    /// ending at (x, y).
    fn cube_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32);

    /// Close the current contour.
    fn close_path(&mut self);
}

/// Maps path units to device pixels.
#[derive(Clone, Copy)]
struct Device {
    height: f64,
    dpm: f64,
}

impl Device {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "device coordinates are single precision"
    )]
    fn map(self, p: Point) -> (f32, f32) {
        ((p.x * self.dpm) as f32, (self.height - p.y * self.dpm) as f32)
    }
}

impl BezPath {
    /// Feed the path to a rasterizer.
    ///
    /// `dpm` is the number of device pixels per path unit and `height` the
    /// raster height in pixels. The y axis is flipped so that path y points
    /// up on the raster. The session always ends with a closed contour.
    pub fn to_rasterizer<R: Rasterizer>(&self, ras: &mut R, height: f64, dpm: f64) {
        let dev = Device { height, dpm };
        for el in self {
            match el {
                BezEl::MoveTo(p) => {
                    let (x, y) = dev.map(p);
                    ras.move_to(x, y);
                }
                BezEl::LineTo(p) => {
                    let (x, y) = dev.map(p);
                    ras.line_to(x, y);
                }
                BezEl::QuadTo(p1, p2) => {
                    let (cx, cy) = dev.map(p1);
                    let (x, y) = dev.map(p2);
                    ras.quad_to(cx, cy, x, y);
                }
                BezEl::CurveTo(p1, p2, p3) => {
                    let (cx0, cy0) = dev.map(p1);
                    let (cx1, cy1) = dev.map(p2);
                    let (x, y) = dev.map(p3);
                    ras.cube_to(cx0, cy0, cx1, cy1, x, y);
                }
                BezEl::ClosePath => ras.close_path(),
            }
        }
        if !self.is_closed() {
            ras.close_path();
        }
    }
}

impl Path {
    /// Feed the path to a rasterizer, arcs expanded into cubic Béziers
    /// within `config.tolerance`.
    ///
    /// See [`BezPath::to_rasterizer`].
    pub fn to_rasterizer<R: Rasterizer>(
        &self,
        ras: &mut R,
        height: f64,
        dpm: f64,
        config: &PathConfig,
    ) {
        self.to_bez_path(config).to_rasterizer(ras, height, dpm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Op {
        Move(f32, f32),
        Line(f32, f32),
        Quad(f32, f32, f32, f32),
        Cube(f32, f32, f32, f32, f32, f32),
        Close,
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Rasterizer for Recorder {
        fn move_to(&mut self, x: f32, y: f32) {
            self.0.push(Op::Move(x, y));
        }

        fn line_to(&mut self, x: f32, y: f32) {
            self.0.push(Op::Line(x, y));
        }

        fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
            self.0.push(Op::Quad(cx, cy, x, y));
        }

        fn cube_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
            self.0.push(Op::Cube(cx0, cy0, cx1, cy1, x, y));
        }

        fn close_path(&mut self) {
            self.0.push(Op::Close);
        }
    }

    #[test]
    fn flips_and_scales() {
        let mut path = Path::new();
        path.move_to((1.0, 1.0))
            .line_to((4.0, 1.0))
            .quad_to((4.0, 3.0), (2.0, 4.0))
            .close_path();
        let mut ras = Recorder::default();
        path.to_rasterizer(&mut ras, 100.0, 10.0, &PathConfig::default());
        assert_eq!(
            ras.0,
            [
                Op::Move(10.0, 90.0),
                Op::Line(40.0, 90.0),
                Op::Quad(40.0, 70.0, 20.0, 60.0),
                Op::Close,
            ]
        );
    }

    #[test]
    fn closes_open_paths() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0)).line_to((1.0, 0.0));
        let mut ras = Recorder::default();
        path.to_rasterizer(&mut ras, 10.0, 1.0, &PathConfig::default());
        assert_eq!(ras.0, [Op::Move(0.0, 10.0), Op::Line(1.0, 10.0), Op::Close]);
    }

    #[test]
    fn arcs_arrive_as_cubics() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0))
            .arc_to((5.0, 5.0), 0.0, false, true, (10.0, 0.0))
            .close_path();
        let mut ras = Recorder::default();
        path.to_rasterizer(&mut ras, 10.0, 1.0, &PathConfig::default());
        assert_eq!(ras.0.first(), Some(&Op::Move(0.0, 10.0)));
        assert_eq!(ras.0.last(), Some(&Op::Close));
        let inner = &ras.0[1..ras.0.len() - 1];
        assert!(!inner.is_empty());
        assert!(inner.iter().all(|op| matches!(op, Op::Cube(..))), "{inner:?}");
        // The arc bulges towards negative y, which is down on the raster.
        assert!(inner.iter().any(|op| matches!(*op, Op::Cube(_, _, _, _, _, y) if y > 14.0)));
    }
}
