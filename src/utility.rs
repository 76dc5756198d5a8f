pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: f64 = 90.;
    /// Degrees per half turn
    pub const HD: f64 = 2. * QD;
    /// Degrees per turn
    pub const TD: f64 = 2. * HD;
}

/// `x` reduced to [-d/2, d/2], rounding the quotient to nearest.
fn remainder(x: f64, d: f64) -> f64 {
    x - (x / d).round() * d
}

/// Knuth's two-sum: the rounded sum of `u` and `v` with its exact round-off.
fn two_sum(u: f64, v: f64) -> (f64, f64) {
    let sum = u + v;
    let v_virtual = sum - u;
    let u_virtual = sum - v_virtual;
    let err = (u - u_virtual) + (v - v_virtual);

    if sum.is_zero() {
        (sum, sum)
    } else {
        (sum, err)
    }
}

/// `es * atanh(es * x)`, continued to oblate spheroids (`es < 0`) with atan.
fn eatanhe(x: f64, es: f64) -> f64 {
    if es < 0. {
        -es * (es * x).atan()
    } else {
        es * (es * x).atanh()
    }
}

/// Evaluate a polynomial, highest order coefficient first
pub(crate) fn polyval(p: &[f64], x: f64) -> f64 {
    p.iter().fold(0., |acc, coeff| acc * x + coeff)
}

pub(crate) trait GeoMath {
    fn is_zero(&self) -> bool;
    fn eps_eq(&self, other: Self) -> bool;
    fn ang_normalize(&self) -> Self;
    fn ang_diff(&self, other: Self) -> Self;
    fn taupf(&self, es: Self) -> Self;
    fn tauf(&self, es: Self) -> Self;
}

impl GeoMath for f64 {
    fn is_zero(&self) -> bool {
        self.abs() < f64::EPSILON
    }

    fn eps_eq(&self, other: f64) -> bool {
        (*self - other).abs() < f64::EPSILON
    }

    /// Reduce an angle in degrees to [-180, 180], keeping the sign of ±180
    fn ang_normalize(&self) -> f64 {
        match remainder(*self, dms::TD) {
            half if half.abs().eps_eq(dms::HD) => dms::HD.copysign(*self),
            value => value,
        }
    }

    /// Exact difference `other - self` of two angles reduced to [-180, 180]
    fn ang_diff(&self, other: f64) -> f64 {
        let (diff, err) = two_sum(remainder(-*self, dms::TD), remainder(other, dms::TD));
        let (diff, err) = two_sum(remainder(diff, dms::TD), err);

        if !diff.is_zero() && !diff.abs().eps_eq(dms::HD) {
            return diff;
        }

        // A zero round-off leaves the sign to other - self; otherwise diff
        // is ±180 and takes the sign opposite to err
        let sign = if err.is_zero() { other - *self } else { -err };
        diff.copysign(sign)
    }

    /// tan(chi) from tan(phi), chi being the conformal latitude
    fn taupf(&self, es: f64) -> f64 {
        let sec = self.hypot(1.);
        let sig = eatanhe(*self / sec, es).sinh();

        sig.hypot(1.) * *self - sig * sec
    }

    /// tan(phi) from tan(chi) by Newton's method
    fn tauf(&self, es: f64) -> f64 {
        const MAX_ITER: usize = 5;

        let tol = f64::EPSILON.sqrt() / 10. * self.abs().max(1.);
        let tau_max = 2. / f64::EPSILON.sqrt();
        let e2m = 1. - es * es;

        let mut tau = if self.abs() > 70. {
            *self * eatanhe(1., es).exp()
        } else {
            *self / e2m
        };

        if tau.abs() >= tau_max {
            return tau;
        }

        for _ in 0..MAX_ITER {
            let taup = tau.taupf(es);
            let step = (*self - taup) * (1. + e2m * tau * tau)
                / (e2m * tau.hypot(1.) * taup.hypot(1.));
            tau += step;
            if step.abs() < tol {
                break;
            }
        }

        tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ang_diff_wraps_across_antimeridian() {
        assert!((170_f64.ang_diff(-170.) - 20.).abs() < 1e-12);
        assert!((19_f64.ang_diff(21.0122) - 2.0122).abs() < 1e-12);
        assert_eq!(0_f64.ang_diff(180.), 180.);
    }

    #[test]
    fn ang_normalize_keeps_half_turn_sign() {
        assert_eq!(540_f64.ang_normalize(), 180.);
        assert_eq!((-180_f64).ang_normalize(), -180.);
        assert!((370_f64.ang_normalize() - 10.).abs() < 1e-12);
    }

    #[test]
    fn tauf_inverts_taupf() {
        let es = crate::constants::GRS80_F.mul_add(-crate::constants::GRS80_F, 2. * crate::constants::GRS80_F).sqrt();

        for tau in [-3_f64, -0.5, 0., 0.8, 1.2, 40.] {
            let back = tau.taupf(es).tauf(es);
            assert!((back - tau).abs() < 1e-12 * tau.abs().max(1.), "{tau} came back as {back}");
        }
    }
}
