//! Anisotropic 2-D Gaussian peak.
//!
//! The field is renormalized against the *sampled grid*, not the analytic
//! integral `2π·s1·s2`: its discrete sum equals `|A|` on whatever grid it is
//! evaluated on, so a peak cropped by the grid edge still carries its full
//! requested intensity.
//!
//! Degenerate states never fail:
//! - a zero width on either axis returns an all-zero field
//! - a normalization sum that is zero or NaN returns an all-zero field and
//!   reports a [`DegeneratePeak`] to the configured sink

use std::sync::Arc;

use nalgebra::DMatrix;

use crate::domain::{Parameter, ParameterMap, PeakSpec};
use crate::math::QuadForm;
use crate::models::diagnostics::{DegeneratePeak, DiagnosticSink, default_sink};
use crate::models::Field;

pub struct Gaussian {
    name: String,
    amplitude: Parameter,
    xc: Parameter,
    yc: Parameter,
    s1: Parameter,
    s2: Parameter,
    /// Degrees. Positive values rotate the ellipse axes clockwise.
    theta: Parameter,
    sink: Arc<dyn DiagnosticSink>,
}

impl Gaussian {
    /// Create a peak whose parameters are named `{name}A`, `{name}xc`, ...
    pub fn new(name: &str, spec: PeakSpec) -> Self {
        Self {
            name: name.to_string(),
            amplitude: Parameter::new(format!("{name}A"), spec.amplitude),
            xc: Parameter::new(format!("{name}xc"), spec.xc),
            yc: Parameter::new(format!("{name}yc"), spec.yc),
            s1: Parameter::new(format!("{name}s1"), spec.s1),
            s2: Parameter::new(format!("{name}s2"), spec.s2),
            theta: Parameter::new(format!("{name}theta"), spec.theta),
            sink: default_sink(),
        }
    }

    /// Route degeneracy reports to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Current parameter values.
    pub fn spec(&self) -> PeakSpec {
        PeakSpec {
            amplitude: self.amplitude.value(),
            xc: self.xc.value(),
            yc: self.yc.value(),
            s1: self.s1.value(),
            s2: self.s2.value(),
            theta: self.theta.value(),
        }
    }
}

impl Field for Gaussian {
    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, x: &DMatrix<f64>, y: &DMatrix<f64>) -> DMatrix<f64> {
        let PeakSpec {
            amplitude,
            xc,
            yc,
            s1,
            s2,
            theta,
        } = self.spec();
        let zeros = || DMatrix::zeros(x.nrows(), x.ncols());

        if s1 == 0.0 || s2 == 0.0 {
            return zeros();
        }

        let t = -theta.to_radians();
        let form = QuadForm::rotated(s1, s2, t);
        let mut zf = x.zip_map(y, |xi, yi| (-0.5 * form.eval(xi - xc, yi - yc)).exp());
        let total = zf.sum();

        if total.is_nan() || total == 0.0 {
            self.sink.degenerate_peak(&DegeneratePeak {
                component: self.name.clone(),
                amplitude,
                s1,
                s2,
                theta_rad: t,
                xc,
                yc,
                total,
                form,
            });
        }

        if total > 0.0 {
            // Sign of A is dropped: only its magnitude scales the peak.
            let height = amplitude.abs();
            zf.apply(|v| *v = *v / total * height);
            zf
        } else {
            zeros()
        }
    }

    fn parameters(&self) -> ParameterMap {
        ParameterMap::from([
            ("A", self.amplitude.clone()),
            ("xc", self.xc.clone()),
            ("yc", self.yc.clone()),
            ("s1", self.s1.clone()),
            ("s2", self.s2.clone()),
            ("theta", self.theta.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::centered_mesh;
    use crate::models::diagnostics::RecordingSink;

    fn peak(amplitude: f64, xc: f64, yc: f64, s1: f64, s2: f64, theta: f64) -> Gaussian {
        Gaussian::new(
            "p1",
            PeakSpec {
                amplitude,
                xc,
                yc,
                s1,
                s2,
                theta,
            },
        )
    }

    fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        (a - b).abs().max()
    }

    #[test]
    fn discrete_sum_matches_amplitude() {
        let (x, y) = centered_mesh(161, 161, 0.1).unwrap();
        let g = peak(7.5, 0.3, -0.2, 1.0, 1.6, 25.0);
        let z = g.field(&x, &y);
        assert!((z.sum() - 7.5).abs() / 7.5 < 1e-3);
        assert!(z.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn cropped_peak_still_sums_to_amplitude() {
        // Centre on the grid edge: half the analytic mass is outside.
        let (x, y) = centered_mesh(21, 21, 0.5).unwrap();
        let g = peak(3.0, 5.0, 0.0, 1.0, 1.0, 0.0);
        let z = g.field(&x, &y);
        assert!((z.sum() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn negative_amplitude_uses_magnitude() {
        let (x, y) = centered_mesh(11, 11, 1.0).unwrap();
        let pos = peak(4.0, 0.0, 0.0, 1.0, 2.0, 10.0).field(&x, &y);
        let neg = peak(-4.0, 0.0, 0.0, 1.0, 2.0, 10.0).field(&x, &y);
        assert_eq!(pos, neg);
    }

    #[test]
    fn zero_width_returns_zero_field_of_input_shape() {
        let (x, y) = centered_mesh(7, 3, 1.0).unwrap();
        let sink = RecordingSink::new();
        for g in [
            peak(f64::NAN, 0.0, 0.0, 0.0, 1.0, 0.0),
            peak(f64::NAN, 1.0, 2.0, 1.0, 0.0, 45.0),
            peak(5.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        ] {
            let z = g.with_sink(sink.clone()).field(&x, &y);
            assert_eq!(z.shape(), (3, 7));
            assert!(z.iter().all(|v| *v == 0.0));
        }
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn underflowed_sum_reports_and_returns_zeros() {
        let (x, y) = centered_mesh(5, 5, 1.0).unwrap();
        let sink = RecordingSink::new();
        let g = peak(2.0, 1e6, 0.0, 1.0, 1.0, 90.0).with_sink(sink.clone());
        let z = g.field(&x, &y);
        assert!(z.iter().all(|v| *v == 0.0));

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.component, "p1");
        assert_eq!(r.total, 0.0);
        assert_eq!(r.xc, 1e6);
        assert!((r.theta_rad + std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn nan_width_reports_and_returns_zeros() {
        let (x, y) = centered_mesh(4, 4, 1.0).unwrap();
        let sink = RecordingSink::new();
        let g = peak(1.0, 0.0, 0.0, f64::NAN, 1.0, 0.0).with_sink(sink.clone());
        let z = g.field(&x, &y);
        assert!(z.iter().all(|v| *v == 0.0));
        assert_eq!(sink.reports().len(), 1);
        assert!(sink.reports()[0].total.is_nan());
    }

    #[test]
    fn half_turn_leaves_field_unchanged() {
        let (x, y) = centered_mesh(15, 13, 0.5).unwrap();
        let a = peak(1.0, 0.4, -0.3, 0.8, 2.1, 33.0).field(&x, &y);
        let b = peak(1.0, 0.4, -0.3, 0.8, 2.1, 213.0).field(&x, &y);
        assert!(max_abs_diff(&a, &b) < 1e-12);
    }

    #[test]
    fn isotropic_peak_ignores_theta() {
        let (x, y) = centered_mesh(9, 9, 0.5).unwrap();
        let base = peak(2.0, 0.25, 0.5, 1.2, 1.2, 0.0).field(&x, &y);
        for theta in [17.0, 90.0, -135.0, 300.0] {
            let z = peak(2.0, 0.25, 0.5, 1.2, 1.2, theta).field(&x, &y);
            assert!(max_abs_diff(&base, &z) < 1e-12, "theta={theta}");
        }
    }

    #[test]
    fn positive_theta_rotates_clockwise() {
        // s1 (long) lies along x at theta=0; 90 degrees lays it along y.
        let (x, y) = centered_mesh(11, 11, 1.0).unwrap();
        let z = peak(1.0, 0.0, 0.0, 3.0, 0.5, 90.0).field(&x, &y);
        // Row 5 is y=0, column 5 is x=0.
        assert!(z[(5, 8)] < z[(8, 5)]);
        let z0 = peak(1.0, 0.0, 0.0, 3.0, 0.5, 0.0).field(&x, &y);
        assert!(z0[(5, 8)] > z0[(8, 5)]);

        // With rows running downward, 45 degrees turns the s1 axis onto y = x.
        let z45 = peak(1.0, 0.0, 0.0, 3.0, 0.5, 45.0).field(&x, &y);
        assert!(z45[(7, 7)] > z45[(3, 7)]);
    }

    #[test]
    fn parameters_expose_named_handles() {
        let g = peak(1.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        let params = g.parameters();
        assert_eq!(params.len(), 6);
        assert_eq!(params["theta"].name(), "p1theta");
        params["A"].set_value(9.0);
        assert_eq!(g.spec().amplitude, 9.0);
    }

    #[test]
    fn normalization_error_shrinks_with_finer_grid() {
        let g = peak(1.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        let mut prev = f64::INFINITY;
        for (n, step) in [(5, 2.0), (11, 1.0), (81, 0.25)] {
            let (x, y) = centered_mesh(n, n, step).unwrap();
            let z = g.field(&x, &y);
            // Peak value relative to the continuous density at the centre.
            let density = z.max() / (step * step);
            let err = (density - 1.0 / (2.0 * std::f64::consts::PI)).abs();
            assert!(err < prev, "n={n}");
            prev = err;
        }
    }
}
