//! Sample grid: coordinates, observations and per-point uncertainty.

use nalgebra::DMatrix;

use crate::error::ModelError;
use crate::math::linspace;

/// Immutable sample grid.
///
/// All four arrays share one `rows x cols` shape; this is checked once in
/// [`Grid::new`]. `err` holds per-point standard deviations and should be strictly
/// positive: zero entries are not rejected and show up as Inf/NaN residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x: DMatrix<f64>,
    y: DMatrix<f64>,
    data: DMatrix<f64>,
    err: DMatrix<f64>,
}

impl Grid {
    pub fn new(
        x: DMatrix<f64>,
        y: DMatrix<f64>,
        data: DMatrix<f64>,
        err: DMatrix<f64>,
    ) -> Result<Self, ModelError> {
        let expected = x.shape();
        for (array, m) in [("y", &y), ("data", &data), ("err", &err)] {
            if m.shape() != expected {
                return Err(ModelError::ShapeMismatch {
                    array,
                    expected,
                    found: m.shape(),
                });
            }
        }
        Ok(Self { x, y, data, err })
    }

    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    pub fn y(&self) -> &DMatrix<f64> {
        &self.y
    }

    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn err(&self) -> &DMatrix<f64> {
        &self.err
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Same coordinates, new observations and uncertainties.
    pub fn with_observations(
        &self,
        data: DMatrix<f64>,
        err: DMatrix<f64>,
    ) -> Result<Self, ModelError> {
        Grid::new(self.x.clone(), self.y.clone(), data, err)
    }
}

/// `numpy.meshgrid`-style coordinate arrays: rows follow `ys`, columns follow `xs`.
pub fn meshgrid(xs: &[f64], ys: &[f64]) -> (DMatrix<f64>, DMatrix<f64>) {
    let x = DMatrix::from_fn(ys.len(), xs.len(), |_, c| xs[c]);
    let y = DMatrix::from_fn(ys.len(), xs.len(), |r, _| ys[r]);
    (x, y)
}

/// Square-pixel coordinates centred at the origin with `nx` columns and `ny` rows.
pub fn centered_mesh(nx: usize, ny: usize, step: f64) -> Result<(DMatrix<f64>, DMatrix<f64>), ModelError> {
    if nx == 0 || ny == 0 {
        return Err(ModelError::InvalidGrid {
            reason: format!("grid must have at least one row and column (got {nx}x{ny})"),
        });
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(ModelError::InvalidGrid {
            reason: format!("step must be finite and > 0 (got {step})"),
        });
    }
    let half_x = step * (nx as f64 - 1.0) / 2.0;
    let half_y = step * (ny as f64 - 1.0) / 2.0;
    let xs = linspace(-half_x, half_x, nx);
    let ys = linspace(-half_y, half_y, ny);
    Ok(meshgrid(&xs, &ys))
}
