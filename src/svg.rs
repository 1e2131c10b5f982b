// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data: parsing and formatting.

use core::f64::consts::FRAC_PI_2;
use core::fmt::{self, Write};

use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::common::EPSILON;
use crate::{EllipticArc, Path, PathEl, Point, Vec2};

/// An error which can be returned when parsing SVG path data.
///
/// Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SvgParseError {
    /// The data continues with numbers but no command is active.
    #[error("path data needs a command before position {position}")]
    MissingCommand {
        /// Where the stray number starts.
        position: usize,
    },
    /// A command ran out of arguments.
    #[error("command '{command}' takes {expected} numbers, input ends at position {position}")]
    WrongArgumentCount {
        /// The command letter, as written.
        command: char,
        /// The number of arguments the command takes.
        expected: usize,
        /// Where the missing argument should be.
        position: usize,
    },
    /// A letter that is no path command.
    #[error("unknown command '{command}' at position {position}")]
    UnknownCommand {
        /// The offending character.
        command: char,
        /// Where it is.
        position: usize,
    },
    /// Something that should be a number or arc flag but is neither.
    #[error("malformed number at position {position}")]
    InvalidNumber {
        /// Where the malformed token starts.
        position: usize,
    },
}

impl Path {
    /// Parse SVG path data.
    ///
    /// All commands of the SVG grammar are accepted, in absolute and
    /// relative form. Numbers repeating after a command repeat the command;
    /// after a move they are lines. Arc rotations are in degrees.
    ///
    /// ```
    /// use vojo::Path;
    ///
    /// let path = Path::from_svg("M0 0 L10 0 L10 10 Z").unwrap();
    /// assert_eq!(path.len(), 4);
    /// assert!(path.is_closed());
    /// ```
    pub fn from_svg(data: &str) -> Result<Path, SvgParseError> {
        let mut lexer = SvgLexer::new(data);
        let mut path = Path::new();
        let mut last_cmd = 0;
        let mut start = Point::ZERO;
        // Control points available for reflection by `S` and `T`.
        let mut last_cubic: Option<Point> = None;
        let mut last_quad: Option<Point> = None;
        while let Some(c) = lexer.get_cmd(last_cmd)? {
            let mut cubic = None;
            let mut quad = None;
            match c.to_ascii_uppercase() {
                b'M' => {
                    let pt = lexer.get_maybe_relative(c, 2)?;
                    path.move_to(pt);
                    start = pt;
                    lexer.last_pt = pt;
                    // Further pairs are lines.
                    last_cmd = c - (b'M' - b'L');
                }
                b'L' => {
                    let pt = lexer.get_maybe_relative(c, 2)?;
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'H' => {
                    let mut x = lexer.get_number(c, 1)?;
                    if c == b'h' {
                        x += lexer.last_pt.x;
                    }
                    let pt = Point::new(x, lexer.last_pt.y);
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'V' => {
                    let mut y = lexer.get_number(c, 1)?;
                    if c == b'v' {
                        y += lexer.last_pt.y;
                    }
                    let pt = Point::new(lexer.last_pt.x, y);
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'C' => {
                    let p1 = lexer.get_maybe_relative(c, 6)?;
                    let p2 = lexer.get_maybe_relative(c, 6)?;
                    let p3 = lexer.get_maybe_relative(c, 6)?;
                    path.curve_to(p1, p2, p3);
                    cubic = Some(p2);
                    lexer.last_pt = p3;
                    last_cmd = c;
                }
                b'S' => {
                    let p1 = reflect(last_cubic, lexer.last_pt);
                    let p2 = lexer.get_maybe_relative(c, 4)?;
                    let p3 = lexer.get_maybe_relative(c, 4)?;
                    path.curve_to(p1, p2, p3);
                    cubic = Some(p2);
                    lexer.last_pt = p3;
                    last_cmd = c;
                }
                b'Q' => {
                    let p1 = lexer.get_maybe_relative(c, 4)?;
                    let p2 = lexer.get_maybe_relative(c, 4)?;
                    path.quad_to(p1, p2);
                    quad = Some(p1);
                    lexer.last_pt = p2;
                    last_cmd = c;
                }
                b'T' => {
                    let p1 = reflect(last_quad, lexer.last_pt);
                    let p2 = lexer.get_maybe_relative(c, 2)?;
                    path.quad_to(p1, p2);
                    quad = Some(p1);
                    lexer.last_pt = p2;
                    last_cmd = c;
                }
                b'A' => {
                    let rx = lexer.get_number(c, 7)?;
                    let ry = lexer.get_number(c, 7)?;
                    let rot = lexer.get_number(c, 7)?;
                    let large_arc = lexer.get_flag(c, 7)?;
                    let sweep = lexer.get_flag(c, 7)?;
                    let pt = lexer.get_maybe_relative(c, 7)?;
                    path.arc_to((rx, ry), rot.to_radians(), large_arc, sweep, pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'Z' => {
                    path.close_path();
                    lexer.last_pt = start;
                    last_cmd = 0;
                }
                _ => {
                    return Err(SvgParseError::UnknownCommand {
                        command: char::from(c),
                        position: lexer.ix - 1,
                    })
                }
            }
            last_cubic = cubic;
            last_quad = quad;
        }
        Ok(path)
    }

    /// Format as compact SVG path data.
    ///
    /// Axis-aligned lines use `H` and `V`. A path not starting with a move
    /// gets `M0 0` first. Numbers carry five significant digits.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing to a `String` cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, w: &mut impl Write) -> fmt::Result {
        if !self.starts_with_move() {
            w.write_str("M0 0")?;
        }
        let mut last = Point::ZERO;
        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) => write!(w, "M{} {}", Num(p.x), Num(p.y))?,
                PathEl::LineTo(p) => {
                    if p.is_near(last, EPSILON) {
                    } else if (p.x - last.x).abs() <= EPSILON {
                        write!(w, "V{}", Num(p.y))?;
                    } else if (p.y - last.y).abs() <= EPSILON {
                        write!(w, "H{}", Num(p.x))?;
                    } else {
                        write!(w, "L{} {}", Num(p.x), Num(p.y))?;
                    }
                }
                PathEl::QuadTo(p1, p2) => {
                    write!(w, "Q{} {} {} {}", Num(p1.x), Num(p1.y), Num(p2.x), Num(p2.y))?;
                }
                PathEl::CubeTo(p1, p2, p3) => write!(
                    w,
                    "C{} {} {} {} {} {}",
                    Num(p1.x),
                    Num(p1.y),
                    Num(p2.x),
                    Num(p2.y),
                    Num(p3.x),
                    Num(p3.y)
                )?,
                PathEl::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let (radii, rot) = if x_rotation >= FRAC_PI_2 - EPSILON {
                        (Vec2::new(radii.y, radii.x), (x_rotation - FRAC_PI_2).max(0.0))
                    } else {
                        (radii, x_rotation)
                    };
                    write_arc(w, last, radii, rot, large_arc, sweep, to)?;
                }
                PathEl::Close(_) => w.write_char('z')?,
            }
            last = el.end_point();
        }
        Ok(())
    }
}

impl fmt::Display for Path {
    /// Every element spelled out, without shorthands.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = Point::ZERO;
        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) => write!(f, "M{} {}", Num(p.x), Num(p.y))?,
                PathEl::LineTo(p) => write!(f, "L{} {}", Num(p.x), Num(p.y))?,
                PathEl::QuadTo(p1, p2) => {
                    write!(f, "Q{} {} {} {}", Num(p1.x), Num(p1.y), Num(p2.x), Num(p2.y))?;
                }
                PathEl::CubeTo(p1, p2, p3) => write!(
                    f,
                    "C{} {} {} {} {} {}",
                    Num(p1.x),
                    Num(p1.y),
                    Num(p2.x),
                    Num(p2.y),
                    Num(p3.x),
                    Num(p3.y)
                )?,
                PathEl::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => write_arc(f, last, radii, x_rotation, large_arc, sweep, to)?,
                PathEl::Close(_) => f.write_char('z')?,
            }
            last = el.end_point();
        }
        Ok(())
    }
}

/// Write an arc command, with the rotation converted to degrees.
///
/// Radii that exactly span the chord are rounded down, after fitting them
/// to the end points and rotation as they are written. Reading them back
/// then scales them up to the same half ellipse, where rounding up would
/// give a larger ellipse with its center moved off the chord.
fn write_arc(
    w: &mut impl Write,
    from: Point,
    radii: Vec2,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> fmt::Result {
    let rot_degrees = x_rotation.to_degrees();
    let arc = EllipticArc::new(from, to, radii, x_rotation, large_arc, sweep);
    let radii = if arc.radii_correction() >= 1.0 - 1e-9 {
        let written = EllipticArc::new(
            Point::new(rounded(from.x), rounded(from.y)),
            Point::new(rounded(to.x), rounded(to.y)),
            radii,
            rounded(rot_degrees).to_radians(),
            large_arc,
            sweep,
        );
        let scale = written.radii_correction().min(1.0);
        Vec2::new(truncated(radii.x * scale), truncated(radii.y * scale))
    } else {
        radii
    };
    write!(
        w,
        "A{} {} {} {} {} {} {}",
        Num(radii.x),
        Num(radii.y),
        Num(rot_degrees),
        u8::from(large_arc),
        u8::from(sweep),
        Num(to.x),
        Num(to.y)
    )
}

fn reflect(ctrl: Option<Point>, pt: Point) -> Point {
    match ctrl {
        Some(c) => pt + (pt - c),
        None => pt,
    }
}

/// A number with five significant digits and no trailing zeros.
///
/// Very large and very small magnitudes use exponent notation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Num(pub(crate) f64);

impl fmt::Display for Num {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "decimal exponents of finite doubles fit in an i32"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: i32 = 5;
        let x = self.0;
        if x == 0.0 || !x.is_finite() {
            return if x.is_finite() {
                f.write_char('0')
            } else {
                write!(f, "{x}")
            };
        }
        let exp = x.abs().log10().floor() as i32;
        let mut buf = String::new();
        if !(-4..DIGITS).contains(&exp) {
            write!(buf, "{:.*e}", (DIGITS - 1) as usize, x)?;
            let (mantissa, exponent) = buf.split_once('e').unwrap_or((&buf, "0"));
            let mantissa = trim_zeros(mantissa);
            return write!(f, "{mantissa}e{exponent}");
        }
        let decimals = (DIGITS - 1 - exp).max(0) as usize;
        write!(buf, "{x:.decimals$}")?;
        match trim_zeros(&buf) {
            "-0" => f.write_char('0'),
            s => f.write_str(s),
        }
    }
}

/// The value `x` reads back as after formatting with [`Num`].
fn rounded(x: f64) -> f64 {
    Num(x).to_string().parse().unwrap_or(x)
}

/// `x` cut to five significant digits, rounding toward zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "decimal exponents of finite doubles fit in an i32"
)]
fn truncated(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let exp = x.abs().log10().floor() as i32;
    let scale = 10f64.powi(4 - exp);
    (x * scale).trunc() / scale
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
    last_pt: Point,
}

impl SvgLexer<'_> {
    fn new(data: &str) -> SvgLexer<'_> {
        SvgLexer {
            data,
            ix: 0,
            last_pt: Point::ZERO,
        }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    fn get_cmd(&mut self, last_cmd: u8) -> Result<Option<u8>, SvgParseError> {
        self.skip_ws();
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let position = self.ix;
        if c.is_ascii_alphabetic() {
            self.ix += 1;
            return Ok(Some(c));
        }
        let number_start = c == b'-' || c == b'+' || c == b'.' || c.is_ascii_digit();
        if number_start {
            if last_cmd != 0 {
                return Ok(Some(last_cmd));
            }
            return Err(SvgParseError::MissingCommand { position });
        }
        let command = self.data[position..].chars().next().unwrap_or('?');
        Err(SvgParseError::UnknownCommand { command, position })
    }

    /// The error for a missing or malformed argument at the current position.
    fn arg_error(&self, cmd: u8, expected: usize) -> SvgParseError {
        match self.peek() {
            None => SvgParseError::WrongArgumentCount {
                command: char::from(cmd),
                expected,
                position: self.ix,
            },
            Some(c) if c.is_ascii_alphabetic() && c != b'e' && c != b'E' => {
                SvgParseError::WrongArgumentCount {
                    command: char::from(cmd),
                    expected,
                    position: self.ix,
                }
            }
            Some(_) => SvgParseError::InvalidNumber { position: self.ix },
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.ix;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.ix += 1;
        }
        self.ix - start
    }

    fn get_number(&mut self, cmd: u8, expected: usize) -> Result<f64, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.ix += 1;
        }
        let mut digit_count = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.ix += 1;
            digit_count += self.skip_digits();
        }
        if digit_count == 0 {
            self.ix = start;
            return Err(self.arg_error(cmd, expected));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.ix;
            self.ix += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.ix += 1;
            }
            if self.skip_digits() == 0 {
                self.ix = mark;
            }
        }
        let value = self.data[start..self.ix]
            .parse()
            .map_err(|_| SvgParseError::InvalidNumber { position: start })?;
        self.opt_comma();
        Ok(value)
    }

    /// An arc flag: a single `0` or `1`, which needs no separator.
    fn get_flag(&mut self, cmd: u8, expected: usize) -> Result<bool, SvgParseError> {
        self.skip_ws();
        let flag = match self.peek() {
            Some(b'0') => false,
            Some(b'1') => true,
            _ => return Err(self.arg_error(cmd, expected)),
        };
        self.ix += 1;
        self.opt_comma();
        Ok(flag)
    }

    fn get_maybe_relative(&mut self, cmd: u8, expected: usize) -> Result<Point, SvgParseError> {
        let x = self.get_number(cmd, expected)?;
        let y = self.get_number(cmd, expected)?;
        let pt = Point::new(x, y);
        if cmd.is_ascii_lowercase() {
            Ok(pt + self.last_pt.to_vec2())
        } else {
            Ok(pt)
        }
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if self.peek() == Some(b',') {
            self.ix += 1;
        }
    }
}
