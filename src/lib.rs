// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D vector paths and the geometry behind them.
//!
//! The vojo library represents scalable paths built from lines, quadratic
//! and cubic Béziers and elliptical arcs, and provides the algorithms needed
//! to query, transform, subdivide and emit them. A [`Path`] is built with
//! normalizing builder methods, queried for bounds, length, orientation and
//! fill, reshaped by transforming, flattening, splitting, dashing, reversing
//! and optimizing, and finally written as SVG, PostScript or PDF path data or
//! fed to a [`Rasterizer`].
//!
//! # Examples
//!
//! ```
//! use vojo::{Path, PathConfig, Point, Rect};
//!
//! let mut path = Path::new();
//! path.move_to((0.0, 0.0))
//!     .line_to((10.0, 0.0))
//!     .arc_to((5.0, 5.0), 0.0, false, true, (10.0, 10.0))
//!     .close_path();
//! assert!(path.bounding_box().is_near(Rect::new(0.0, 0.0, 15.0, 10.0), 1e-9));
//!
//! let config = PathConfig::default();
//! assert!(path.interior(Point::new(5.0, 5.0), &config));
//!
//! let dashed = path.dash(0.0, &[2.0, 1.0]);
//! assert!(dashed.arclen() < path.arclen());
//! assert_eq!(Path::from_svg(&path.to_svg()).unwrap().len(), path.len());
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. This crate uses the `alloc` crate regardless.
//!
//! Diagnostics go through the [`log`] facade. No logger is installed.
//!
//! [`libm`]: https://docs.rs/libm
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("vojo requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod arc;
mod bezpath;
mod boolean;
pub mod common;
mod config;
mod cubicbez;
mod fill;
mod line;
mod param_curve;
mod path;
mod pdf;
mod point;
mod postscript;
mod quadbez;
mod raster;
mod rect;
mod split;
mod svg;
mod vec2;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::bezpath::*;
pub use crate::boolean::*;
pub use crate::config::*;
pub use crate::cubicbez::*;
pub use crate::fill::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::raster::*;
pub use crate::rect::*;
pub use crate::svg::*;
pub use crate::vec2::*;
