//! Inverse-covariance coefficients for a rotated anisotropic Gaussian.
//!
//! With principal widths `s1`, `s2` and rotation `t` (radians), the exponent of
//! the peak is `-0.5 * (a*dx^2 + b*dx*dy + c*dy^2)` where:
//!
//! - `a = cos²t/s1² + sin²t/s2²`
//! - `b = sin(2t) * (1/s2² - 1/s1²)`
//! - `c = sin²t/s1² + cos²t/s2²`
//!
//! For any nonzero widths the form is positive definite, so the exponent is
//! never positive.

/// Quadratic-form coefficients `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadForm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadForm {
    /// Build the form for widths `s1`, `s2` and rotation `t` in radians.
    pub fn rotated(s1: f64, s2: f64, t: f64) -> Self {
        let inv1 = 1.0 / (s1 * s1);
        let inv2 = 1.0 / (s2 * s2);
        let (sin_t, cos_t) = t.sin_cos();
        Self {
            a: cos_t * cos_t * inv1 + sin_t * sin_t * inv2,
            b: (2.0 * t).sin() * (-inv1 + inv2),
            c: sin_t * sin_t * inv1 + cos_t * cos_t * inv2,
        }
    }

    /// Evaluate `a*dx^2 + b*dx*dy + c*dy^2`.
    #[inline]
    pub fn eval(&self, dx: f64, dy: f64) -> f64 {
        self.a * dx * dx + self.b * dx * dy + self.c * dy * dy
    }
}
