// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boolean operations on filled paths.

use crate::{FillRule, Path};

/// A boolean operation combining the filled areas of two paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanOp {
    /// The area filled by both paths.
    And,
    /// The area filled by either path.
    Or,
    /// The area filled by exactly one of the paths.
    Xor,
    /// The area filled by the first path but not the second.
    Not,
}

impl BooleanOp {
    /// Whether a point is in the result, given whether it is filled by
    /// each operand.
    #[inline]
    pub fn keeps(self, in_a: bool, in_b: bool) -> bool {
        match self {
            BooleanOp::And => in_a && in_b,
            BooleanOp::Or => in_a || in_b,
            BooleanOp::Xor => in_a != in_b,
            BooleanOp::Not => in_a && !in_b,
        }
    }
}

/// Boolean operations on paths.
///
/// The operands' fills are interpreted under `rule`. The result is a new
/// path whose filled area, under the same rule, is the combination of the
/// operands' filled areas. Neither operand is modified.
pub trait PathBoolean {
    /// Combine `self` with `other`.
    fn boolean(&self, op: BooleanOp, other: &Path, rule: FillRule) -> Path;

    /// The intersection of both filled areas.
    fn and(&self, other: &Path, rule: FillRule) -> Path {
        self.boolean(BooleanOp::And, other, rule)
    }

    /// The union of both filled areas.
    fn or(&self, other: &Path, rule: FillRule) -> Path {
        self.boolean(BooleanOp::Or, other, rule)
    }

    /// The symmetric difference of both filled areas.
    fn xor(&self, other: &Path, rule: FillRule) -> Path {
        self.boolean(BooleanOp::Xor, other, rule)
    }

    /// The filled area of `self` minus that of `other`.
    fn not(&self, other: &Path, rule: FillRule) -> Path {
        self.boolean(BooleanOp::Not, other, rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PathConfig, Rect};

    /// Combines axis-aligned rectangles by their bounding boxes, for the
    /// even-odd rule only.
    struct Boxes(Path);

    fn rect_path(r: Rect) -> Path {
        let mut p = Path::new();
        p.move_to((r.x0, r.y0))
            .line_to((r.x1, r.y0))
            .line_to((r.x1, r.y1))
            .line_to((r.x0, r.y1))
            .close_path();
        p
    }

    impl PathBoolean for Boxes {
        fn boolean(&self, op: BooleanOp, other: &Path, _rule: FillRule) -> Path {
            let (a, b) = (self.0.bounding_box(), other.bounding_box());
            match op {
                BooleanOp::And => {
                    let r = Rect::new(a.x0.max(b.x0), a.y0.max(b.y0), a.x1.min(b.x1), a.y1.min(b.y1));
                    if r.width() > 0.0 && r.height() > 0.0 {
                        rect_path(r)
                    } else {
                        Path::new()
                    }
                }
                // Overlaps cancel under the even-odd rule.
                BooleanOp::Xor => rect_path(a).append(&rect_path(b)),
                BooleanOp::Or => rect_path(a)
                    .append(&rect_path(b))
                    .append(&self.and(other, FillRule::EvenOdd)),
                BooleanOp::Not => self.0.append(&self.and(other, FillRule::EvenOdd)),
            }
        }
    }

    #[test]
    fn truth_tables() {
        let ops = [BooleanOp::And, BooleanOp::Or, BooleanOp::Xor, BooleanOp::Not];
        let expected = [
            [false, false, false, true],
            [false, true, true, true],
            [false, true, true, false],
            [false, false, true, false],
        ];
        let inputs = [(false, false), (false, true), (true, false), (true, true)];
        for (op, row) in ops.iter().zip(expected) {
            for (&(a, b), want) in inputs.iter().zip(row) {
                assert_eq!(op.keeps(a, b), want, "{op:?} {a} {b}");
            }
        }
    }

    #[test]
    fn contract_matches_pointwise_ops() {
        let a = rect_path(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = rect_path(Rect::new(5.0, 5.0, 15.0, 15.0));
        let config = PathConfig::default().with_fill_rule(FillRule::EvenOdd);
        let samples = [(2.0, 2.0), (7.0, 7.0), (12.0, 12.0), (20.0, 2.0)];
        for op in [BooleanOp::And, BooleanOp::Or, BooleanOp::Xor, BooleanOp::Not] {
            let result = Boxes(a.clone()).boolean(op, &b, FillRule::EvenOdd);
            for pt in samples {
                let want = op.keeps(a.interior(pt, &config), b.interior(pt, &config));
                assert_eq!(result.interior(pt, &config), want, "{op:?} at {pt:?}");
            }
        }
    }
}
