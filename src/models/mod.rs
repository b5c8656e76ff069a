//! Field components and the composite peak model.
//!
//! Every component implements [`Field`]: evaluate a field over coordinate arrays
//! and expose its named parameters. [`PeakModel`] sums any mix of them over a
//! shared [`crate::domain::Grid`].

use nalgebra::DMatrix;

use crate::domain::ParameterMap;

pub mod background;
pub mod composite;
pub mod diagnostics;
pub mod peak;

pub use background::*;
pub use composite::*;
pub use diagnostics::*;
pub use peak::*;

/// A model term that can be evaluated over a coordinate grid.
///
/// Implementations read their parameters once per call and must not mutate
/// shared state, so several components may be evaluated concurrently.
pub trait Field: Send + Sync {
    /// Component label, used in diagnostics and reports.
    fn name(&self) -> &str;

    /// Evaluate over `x`, `y` (same shape). The result has the shape of `x`.
    fn field(&self, x: &DMatrix<f64>, y: &DMatrix<f64>) -> DMatrix<f64>;

    /// Logical key (`"A"`, `"xc"`, `"C"`, ...) to parameter handle.
    fn parameters(&self) -> ParameterMap;
}
