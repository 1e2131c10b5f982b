// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings consulted by the approximating and fill-testing operations.

use smallvec::SmallVec;

/// Default maximum deviation, in path units, when flattening curves.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Collection of values representing lengths in a dash pattern.
pub type Dashes = SmallVec<[f64; 4]>;

/// The rule deciding from a winding number whether a point is filled.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    /// Filled where the winding number is not zero.
    #[default]
    NonZero,
    /// Filled where the winding number is odd.
    EvenOdd,
}

impl FillRule {
    /// Whether a point with the given winding number is filled.
    #[inline]
    pub fn fills(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Options for flattening and fill testing.
///
/// ```
/// use vojo::{FillRule, PathConfig};
///
/// let config = PathConfig::default()
///     .with_tolerance(0.1)
///     .with_fill_rule(FillRule::EvenOdd);
/// assert_eq!(config.tolerance, 0.1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Maximum distance between a curve and its flattened polyline.
    ///
    /// Must be positive.
    pub tolerance: f64,
    /// Rule used by interior and filling tests.
    pub fill_rule: FillRule,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            tolerance: DEFAULT_TOLERANCE,
            fill_rule: FillRule::NonZero,
        }
    }
}

impl PathConfig {
    /// Builder method for setting the flattening tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method for setting the fill rule.
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}
