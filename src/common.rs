// Copyright 2026 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

#![allow(missing_docs)]

use core::f64::consts::PI;

use arrayvec::ArrayVec;

use crate::Vec2;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident/$lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f32 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lfname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("vojo requires either the `std` or `libm` feature")
            })+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("vojo requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs/fabsf;
    fn acos(self) -> Self => acos/acosf;
    fn atan2(self, other: Self) -> Self => atan2/atan2f;
    fn ceil(self) -> Self => ceil/ceilf;
    fn copysign(self, sign: Self) -> Self => copysign/copysignf;
    fn cos(self) -> Self => cos/cosf;
    fn floor(self) -> Self => floor/floorf;
    fn hypot(self, other: Self) -> Self => hypot/hypotf;
    fn log10(self) -> Self => log10/log10f;
    fn log2(self) -> Self => log2/log2f;
    fn powf(self, n: Self) -> Self => pow/powf;
    fn powi(self, n: i32) -> Self => pow/powf;
    fn round(self) -> Self => round/roundf;
    fn sin(self) -> Self => sin/sinf;
    fn sin_cos(self) -> (Self, Self) => sincos/sincosf;
    fn sqrt(self) -> Self => sqrt/sqrtf;
    fn tan(self) -> Self => tan/tanf;
    fn trunc(self) -> Self => trunc/truncf;
}

/// Tolerance used for point and scalar equality throughout the crate.
pub const EPSILON: f64 = 1e-10;

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0.
///
/// This function tries to be quite numerically robust. If the equation
/// is nearly linear, it will return the root ignoring the quadratic term;
/// the other root might be out of representable range. In the degenerate
/// case where all coefficients are zero, so that all values of x satisfy
/// the equation, a single `0.0` is returned.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            // Degenerate case
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // Likely, calculation of sc1 * sc1 overflowed. Find one root
        // using sc1 x + x² = 0, other root as sc0 / root1.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// Eigen-decomposition of the symmetric matrix `[[a, b], [b, c]]`.
///
/// Returns `(lambda1, lambda2, v1, v2)` with `lambda1 <= lambda2` and unit
/// eigenvectors `v1`, `v2`. The eigenvectors are always orthogonal, also when
/// the eigenvalues coincide.
pub fn eigen_symmetric(a: f64, b: f64, c: f64) -> (f64, f64, Vec2, Vec2) {
    let mean = 0.5 * (a + c);
    let r = (0.5 * (a - c)).hypot(b);
    // Direction of the eigenvector belonging to the larger eigenvalue.
    let th = 0.5 * (2.0 * b).atan2(a - c);
    let (s, co) = th.sin_cos();
    (
        mean - r,
        mean + r,
        Vec2::new(-s, co),
        Vec2::new(co, s),
    )
}

/// Solve an arbitrary function for a zero-crossing.
///
/// This uses the [ITP method], as described in the paper
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality].
///
/// It is assumed that `ya < 0.0` and `yb > 0.0`, otherwise unexpected
/// results may occur. The `a` and `b` parameters represent the lower and
/// upper bounds of the bracket searched for a solution.
///
/// The `n0` parameter controls the relative impact of the bisection and
/// secant components, and `k1` is the ITP truncation factor; `0.2 / (b - a)`
/// is a good default.
///
/// [ITP method]: https://en.wikipedia.org/wiki/ITP_Method
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality]: https://dl.acm.org/doi/10.1145/3423597
#[allow(clippy::too_many_arguments)]
pub fn solve_itp(
    mut f: impl FnMut(f64) -> f64,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    n0: usize,
    k1: f64,
    mut ya: f64,
    mut yb: f64,
) -> f64 {
    let n1_2 = (((b - a) / epsilon).log2().ceil() - 1.0).max(0.0) as usize;
    let nmax = n0 + n1_2;
    let mut scaled_epsilon = epsilon * (1u64 << nmax) as f64;
    while b - a > 2.0 * epsilon {
        let x1_2 = 0.5 * (a + b);
        let r = scaled_epsilon - 0.5 * (b - a);
        let xf = (yb * a - ya * b) / (yb - ya);
        let sigma = x1_2 - xf;
        // This has k2 = 2 hardwired for efficiency.
        let delta = k1 * (b - a).powi(2);
        let xt = if delta <= (x1_2 - xf).abs() {
            xf + delta.copysign(sigma)
        } else {
            x1_2
        };
        let xitp = if (xt - x1_2).abs() <= r {
            xt
        } else {
            x1_2 - r.copysign(sigma)
        };
        let yitp = f(xitp);
        if yitp > 0.0 {
            b = xitp;
            yb = yitp;
        } else if yitp < 0.0 {
            a = xitp;
            ya = yitp;
        } else {
            return xitp;
        }
        scaled_epsilon *= 0.5;
    }
    0.5 * (a + b)
}

/// Integrate `f` over `[a, b]` with the given Gauss-Legendre table.
///
/// The result is signed: it is negative when `b < a` and `f` is positive.
pub fn gauss_legendre(f: impl Fn(f64) -> f64, a: f64, b: f64, coeffs: &[(f64, f64)]) -> f64 {
    let half = 0.5 * (b - a);
    let mid = 0.5 * (a + b);
    half * coeffs
        .iter()
        .map(|&(wi, xi)| wi * f(mid + half * xi))
        .sum::<f64>()
}

/// Normalize an angle into `[0, 2π)`.
#[inline]
pub fn angle_norm(theta: f64) -> f64 {
    let r = theta % (2.0 * PI);
    let r = if r < 0.0 { r + 2.0 * PI } else { r };
    // `r + 2π` can round up to exactly 2π.
    if r >= 2.0 * PI {
        0.0
    } else {
        r
    }
}

/// Whether `theta` lies on the angular range swept from `lower` to `upper`.
///
/// The range is taken in the direction of travel, so `lower > upper` is a
/// clockwise sweep. Ranges of a full turn or more contain every angle.
pub fn angle_between(theta: f64, lower: f64, upper: f64) -> bool {
    let (lower, upper) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };
    if upper - lower >= 2.0 * PI - EPSILON {
        return true;
    }
    let span = upper - lower;
    let d = angle_norm(theta - lower);
    d <= span + EPSILON || 2.0 * PI - d <= EPSILON
}

/// Number of Chebyshev nodes used by [`InvArclen`].
const CHEBYSHEV_ORDER: usize = 10;

/// Polynomial approximation of the inverse of a cumulative arc length.
///
/// Given the speed `|dp/dt|` of a curve over a parameter range, this
/// computes the forward arc length with 5-point Gauss-Legendre quadrature,
/// inverts it at the Chebyshev nodes of the length range, and fits a
/// Chebyshev series through those samples. Evaluating the series maps a
/// distance along the curve back to a curve parameter.
#[derive(Clone, Debug)]
pub struct InvArclen {
    coeffs: [f64; CHEBYSHEV_ORDER],
    t0: f64,
    t1: f64,
    length: f64,
}

impl InvArclen {
    /// Build the approximation for `speed` over `t0..t1`.
    ///
    /// `t1` may be smaller than `t0`; distances are always measured from `t0`.
    pub fn new(speed: impl Fn(f64) -> f64, t0: f64, t1: f64) -> InvArclen {
        let forward = |u: f64| {
            let t = t0 + u * (t1 - t0);
            gauss_legendre(&speed, t0, t, GAUSS_LEGENDRE_COEFFS_5).abs()
        };
        let length = forward(1.0);
        let mut coeffs = [0.0; CHEBYSHEV_ORDER];
        if !length.is_finite() || length <= 0.0 {
            // Degenerate curve: every distance maps to the start.
            return InvArclen {
                coeffs,
                t0,
                t1,
                length: 0.0,
            };
        }
        let n = CHEBYSHEV_ORDER as f64;
        let mut samples = [0.0; CHEBYSHEV_ORDER];
        for (k, sample) in samples.iter_mut().enumerate() {
            let x = (PI * (k as f64 + 0.5) / n).cos();
            let s = 0.5 * (x + 1.0) * length;
            *sample = solve_itp(
                |u| forward(u) - s,
                0.0,
                1.0,
                1e-12,
                1,
                0.2,
                -s,
                length - s,
            );
        }
        for (j, c) in coeffs.iter_mut().enumerate() {
            let sum: f64 = samples
                .iter()
                .enumerate()
                .map(|(k, &u)| u * (PI * j as f64 * (k as f64 + 0.5) / n).cos())
                .sum();
            *c = 2.0 / n * sum;
        }
        InvArclen {
            coeffs,
            t0,
            t1,
            length,
        }
    }

    /// The total arc length of the range, as measured by the quadrature.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The curve parameter at distance `s` from the start of the range.
    pub fn eval(&self, s: f64) -> f64 {
        let x = if self.length > 0.0 {
            (2.0 * s / self.length - 1.0).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        // Clenshaw recurrence.
        let (mut b1, mut b2) = (0.0, 0.0);
        for &c in self.coeffs[1..].iter().rev() {
            let b0 = 2.0 * x * b1 - b2 + c;
            b2 = b1;
            b1 = b0;
        }
        let u = (x * b1 - b2 + 0.5 * self.coeffs[0]).clamp(0.0, 1.0);
        self.t0 + u * (self.t1 - self.t0)
    }
}

// Tables of Legendre-Gauss quadrature coefficients, adapted from:
// <https://pomax.github.io/bezierinfo/legendre-gauss.html>

pub const GAUSS_LEGENDRE_COEFFS_5: &[(f64, f64)] = &[
    (0.5688888888888889, 0.0000000000000000),
    (0.4786286704993665, -0.5384693101056831),
    (0.4786286704993665, 0.5384693101056831),
    (0.2369268850561891, -0.9061798459386640),
    (0.2369268850561891, 0.9061798459386640),
];

pub const GAUSS_LEGENDRE_COEFFS_16: &[(f64, f64)] = &[
    (0.1894506104550685, -0.0950125098376374),
    (0.1894506104550685, 0.0950125098376374),
    (0.1826034150449236, -0.2816035507792589),
    (0.1826034150449236, 0.2816035507792589),
    (0.1691565193950025, -0.4580167776572274),
    (0.1691565193950025, 0.4580167776572274),
    (0.1495959888165767, -0.6178762444026438),
    (0.1495959888165767, 0.6178762444026438),
    (0.1246289712555339, -0.7554044083550030),
    (0.1246289712555339, 0.7554044083550030),
    (0.0951585116824928, -0.8656312023878318),
    (0.0951585116824928, 0.8656312023878318),
    (0.0622535239386479, -0.9445750230732326),
    (0.0622535239386479, 0.9445750230732326),
    (0.0271524594117541, -0.9894009349916499),
    (0.0271524594117541, 0.9894009349916499),
];

#[cfg(test)]
mod tests {
    use crate::common::*;
    use crate::Vec2;
    use arrayvec::ArrayVec;
    use core::f64::consts::{FRAC_PI_2, PI};

    fn verify<const N: usize>(mut roots: ArrayVec<f64, N>, expected: &[f64]) {
        assert_eq!(expected.len(), roots.len());
        let epsilon = 1e-12;
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for i in 0..expected.len() {
            assert!((roots[i] - expected[i]).abs() < epsilon);
        }
    }

    #[test]
    fn test_solve_quadratic() {
        verify(
            solve_quadratic(-5.0, 0.0, 1.0),
            &[-(5.0f64.sqrt()), 5.0f64.sqrt()],
        );
        verify(solve_quadratic(5.0, 0.0, 1.0), &[]);
        verify(solve_quadratic(5.0, 1.0, 0.0), &[-5.0]);
        verify(solve_quadratic(1.0, 2.0, 1.0), &[-1.0]);
    }

    #[test]
    fn test_solve_itp() {
        let f = |x: f64| x.powi(3) - x - 2.0;
        let x = solve_itp(f, 1., 2., 1e-12, 0, 0.2, f(1.), f(2.));
        assert!(f(x).abs() < 6e-12);
    }

    #[test]
    fn test_eigen_symmetric() {
        let (l1, l2, v1, v2) = eigen_symmetric(2.0, 1.0, 2.0);
        assert!((l1 - 1.0).abs() < 1e-12);
        assert!((l2 - 3.0).abs() < 1e-12);
        // A v = lambda v
        let check = |l: f64, v: Vec2| {
            let av = Vec2::new(2.0 * v.x + v.y, v.x + 2.0 * v.y);
            assert!((av - v * l).hypot() < 1e-12, "{av:?} {v:?}");
        };
        check(l1, v1);
        check(l2, v2);
        assert!(v1.dot(v2).abs() < 1e-12);

        let (l1, l2, v1, _) = eigen_symmetric(4.0, 0.0, 1.0);
        assert_eq!((l1, l2), (1.0, 4.0));
        assert!((v1.y.abs() - 1.0).abs() < 1e-12);

        // Repeated eigenvalue still yields an orthonormal basis.
        let (l1, l2, v1, v2) = eigen_symmetric(3.0, 0.0, 3.0);
        assert_eq!((l1, l2), (3.0, 3.0));
        assert!(v1.dot(v2).abs() < 1e-12);
    }

    #[test]
    fn test_gauss_legendre() {
        // Exact for polynomials up to degree 9.
        let integral = gauss_legendre(|x| x.powi(4) - 2.0 * x, 0.0, 2.0, GAUSS_LEGENDRE_COEFFS_5);
        assert!((integral - (32.0 / 5.0 - 4.0)).abs() < 1e-12);
        let reversed = gauss_legendre(|x| x.powi(4) - 2.0 * x, 2.0, 0.0, GAUSS_LEGENDRE_COEFFS_5);
        assert!((integral + reversed).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between() {
        assert!(angle_between(FRAC_PI_2, 0.0, PI));
        assert!(!angle_between(-FRAC_PI_2, 0.0, PI));
        // Clockwise sweep from π to 0 covers the same angles.
        assert!(angle_between(FRAC_PI_2, PI, 0.0));
        // Wraps around a full turn.
        assert!(angle_between(0.1, 1.5 * PI, 2.5 * PI));
        assert!(angle_between(-0.1, -0.5, 0.5));
        assert!(angle_between(3.0, -10.0, 10.0));
        assert!((angle_norm(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_inv_arclen_linear() {
        // Constant speed: the inverse is linear.
        let inv = InvArclen::new(|_| 2.0, 0.0, 1.0);
        assert!((inv.length() - 2.0).abs() < 1e-12);
        for i in 0..=10 {
            let s = i as f64 * 0.2;
            assert!((inv.eval(s) - s / 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_inv_arclen_nonlinear() {
        // speed 1 + t: s(t) = t + t²/2, so t(s) = sqrt(1 + 2s) - 1.
        let inv = InvArclen::new(|t| 1.0 + t, 0.0, 1.0);
        assert!((inv.length() - 1.5).abs() < 1e-12);
        for i in 0..=15 {
            let s = i as f64 * 0.1;
            assert!((inv.eval(s) - ((1.0 + 2.0 * s).sqrt() - 1.0)).abs() < 1e-6);
        }
        // Decreasing parameter range.
        let inv = InvArclen::new(|_| 1.0, PI, 0.0);
        assert!((inv.length() - PI).abs() < 1e-12);
        assert!((inv.eval(1.0) - (PI - 1.0)).abs() < 1e-9);
    }
}
