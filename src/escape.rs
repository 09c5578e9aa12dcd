// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  A point `c` is iterated through
//! `z = z * z + c` starting from zero until `|z|` exceeds two or the
//! iteration cap is hit.

use num::Complex;

/// Squared escape radius.  Comparing `norm_sqr` against this avoids a
/// square root per step.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// The step at which the orbit left the radius-two circle, or the
    /// cap if it never did.  Always in `[0, max_iter]`.
    pub iterations: usize,
    /// `|z|^2` at the moment iteration stopped.
    pub norm_sqr: f64,
}

impl Escape {
    /// Whether the point is assumed to be a member of the set.
    pub fn is_inside(&self, max_iter: usize) -> bool {
        self.iterations >= max_iter
    }
}

/// Iterate `c` at most `max_iter` times.  A point whose first iterate
/// already lies outside the circle escapes at step 0; a point that
/// never leaves is reported with `iterations == max_iter`.
pub fn escape(c: Complex<f64>, max_iter: usize) -> Escape {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..max_iter {
        z = z * z + c;
        let norm_sqr = z.norm_sqr();
        if norm_sqr > ESCAPE_RADIUS_SQR {
            return Escape {
                iterations: i,
                norm_sqr,
            };
        }
    }
    Escape {
        iterations: max_iter,
        norm_sqr: z.norm_sqr(),
    }
}

/// Just the iteration count for `c`.
#[inline]
pub fn escape_time(c: Complex<f64>, max_iter: usize) -> usize {
    escape(c, max_iter).iterations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 256), 256);
        assert!(escape(Complex::new(0.0, 0.0), 256).is_inside(256));
    }

    #[test]
    fn main_cardioid_and_bulb_never_escape() {
        assert_eq!(escape_time(Complex::new(-0.1, 0.1), 1000), 1000);
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 1000), 1000);
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(escape_time(Complex::new(10.0, 10.0), 256), 0);
        assert_eq!(escape_time(Complex::new(-3.0, 0.0), 256), 0);
    }

    #[test]
    fn boundary_is_strict() {
        // c = 2 lands exactly on |z|^2 == 4 after the first step and
        // goes to 36 after the second.
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 256), 1);
    }

    #[test]
    fn escaped_magnitude_is_outside_the_circle() {
        let e = escape(Complex::new(0.5, 0.5), 256);
        assert!(e.iterations < 256);
        assert!(e.norm_sqr > ESCAPE_RADIUS_SQR);
    }

    #[test]
    fn zero_cap_reports_inside() {
        assert_eq!(escape_time(Complex::new(10.0, 10.0), 0), 0);
        assert!(escape(Complex::new(10.0, 10.0), 0).is_inside(0));
    }
}
