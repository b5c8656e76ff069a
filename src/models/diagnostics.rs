//! Observability sink for degenerate peak evaluations.
//!
//! A peak whose discrete normalization sum is zero or NaN contributes nothing to
//! the model. That is not an error, but it usually means the optimizer wandered
//! somewhere odd, so the evaluation reports it through a `DiagnosticSink`.

use std::sync::{Arc, Mutex};

use crate::math::QuadForm;

/// Parameter tuple and intermediate values of a degenerate peak evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct DegeneratePeak {
    pub component: String,
    pub amplitude: f64,
    pub s1: f64,
    pub s2: f64,
    /// Rotation actually used in the quadratic form (negated, radians).
    pub theta_rad: f64,
    pub xc: f64,
    pub yc: f64,
    /// Discrete sum of the unnormalized field.
    pub total: f64,
    pub form: QuadForm,
}

pub trait DiagnosticSink: Send + Sync {
    fn degenerate_peak(&self, report: &DegeneratePeak);
}

/// Default sink: one `warn` line per degenerate evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn degenerate_peak(&self, r: &DegeneratePeak) {
        log::warn!(
            "degenerate peak '{}': G(A,s1,s2,t,xc,yc) -> {} ({}, {}, {}, {}, {}, {}); a,b,c = {}, {}, {}",
            r.component,
            r.total,
            r.amplitude,
            r.s1,
            r.s2,
            r.theta_rad,
            r.xc,
            r.yc,
            r.form.a,
            r.form.b,
            r.form.c
        );
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<DegeneratePeak>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reports(&self) -> Vec<DegeneratePeak> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn degenerate_peak(&self, report: &DegeneratePeak) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(report.clone());
    }
}

pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(LogSink)
}
