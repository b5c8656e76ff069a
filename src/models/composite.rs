//! Composite model: components summed over a grid and scored against data.
//!
//! Nothing derived is cached. `theory`, `residuals`, `nllf` and `chisq` recompute
//! from the grid and the current parameter values on every call, so an optimizer
//! may interleave parameter writes and evaluations in any order.

use std::path::Path;

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::domain::{Grid, Parameter, ParameterMap, ParameterValue};
use crate::error::{AppError, ModelError};
use crate::io::{NoPersistence, Persistence};
use crate::models::Field;
use crate::plot::{PlotPanels, Plotter};

pub struct PeakModel {
    grid: Grid,
    parts: Vec<Box<dyn Field>>,
    dof: Option<f64>,
    persistence: Box<dyn Persistence>,
}

impl PeakModel {
    pub fn new(grid: Grid, parts: Vec<Box<dyn Field>>) -> Self {
        Self {
            grid,
            parts,
            dof: None,
            persistence: Box::new(NoPersistence),
        }
    }

    /// Configure degrees of freedom for [`PeakModel::chisq`].
    pub fn with_dof(mut self, dof: f64) -> Result<Self, ModelError> {
        self.set_dof(Some(dof))?;
        Ok(self)
    }

    pub fn set_dof(&mut self, dof: Option<f64>) -> Result<(), ModelError> {
        if let Some(d) = dof {
            if !(d.is_finite() && d > 0.0) {
                return Err(ModelError::InvalidDof { dof: d });
            }
        }
        self.dof = dof;
        Ok(())
    }

    pub fn dof(&self) -> Option<f64> {
        self.dof
    }

    /// Same coordinates and components, new observations and uncertainties.
    pub fn with_observations(mut self, data: DMatrix<f64>, err: DMatrix<f64>) -> Result<Self, ModelError> {
        self.grid = self.grid.with_observations(data, err)?;
        Ok(self)
    }

    pub fn with_persistence(mut self, persistence: Box<dyn Persistence>) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn components(&self) -> &[Box<dyn Field>] {
        &self.parts
    }

    pub fn numpoints(&self) -> usize {
        self.grid.len()
    }

    pub fn parameter_count(&self) -> usize {
        self.parts.iter().map(|p| p.parameters().len()).sum()
    }

    /// `numpoints - parameter_count`.
    ///
    /// Never applied implicitly; callers opt in via `set_dof(Some(model.auto_dof()))`.
    pub fn auto_dof(&self) -> f64 {
        self.numpoints() as f64 - self.parameter_count() as f64
    }

    /// One mapping per component, in component order.
    pub fn parameters(&self) -> Vec<ParameterMap> {
        self.parts.iter().map(|p| p.parameters()).collect()
    }

    /// Look a parameter up by its full name (e.g. `"p1xc"`).
    pub fn parameter(&self, name: &str) -> Result<Parameter, ModelError> {
        self.parts
            .iter()
            .flat_map(|p| p.parameters().into_values())
            .find(|p| p.name() == name)
            .ok_or_else(|| ModelError::UnknownParameter {
                name: name.to_string(),
            })
    }

    /// Field of each component, in component order.
    pub fn component_fields(&self) -> Vec<DMatrix<f64>> {
        let (x, y) = (self.grid.x(), self.grid.y());
        self.parts.par_iter().map(|p| p.field(x, y)).collect()
    }

    /// Elementwise sum of every component's field.
    pub fn theory(&self) -> DMatrix<f64> {
        let (rows, cols) = self.grid.shape();
        let mut total = DMatrix::zeros(rows, cols);
        // Fields are computed in parallel but summed in component order, so the
        // result is bit-identical across calls.
        for f in &self.component_fields() {
            total += f;
        }
        total
    }

    /// `(theory - data) / err`.
    ///
    /// `err` must be strictly positive; zero entries give Inf/NaN here and are
    /// not masked.
    pub fn residuals(&self) -> DMatrix<f64> {
        (self.theory() - self.grid.data()).component_div(self.grid.err())
    }

    /// Gaussian negative log-likelihood, `0.5 * sum(residuals^2)`, without the
    /// parameter-independent normalization constant.
    pub fn nllf(&self) -> f64 {
        0.5 * self.residuals().iter().map(|r| r * r).sum::<f64>()
    }

    /// Reduced statistic `2 * nllf / dof`.
    pub fn chisq(&self) -> Result<f64, ModelError> {
        let dof = self.dof.ok_or(ModelError::MissingDof)?;
        Ok(2.0 * self.nllf() / dof)
    }

    /// Current values, grouped per component in key order.
    pub fn parameter_values(&self) -> Vec<Vec<ParameterValue>> {
        self.parameters()
            .into_iter()
            .map(|map| {
                map.into_iter()
                    .map(|(key, p)| ParameterValue {
                        key: key.to_string(),
                        name: p.name().to_string(),
                        value: p.value(),
                    })
                    .collect()
            })
            .collect()
    }

    /// Set parameters by full name. Every name is resolved before any value is
    /// written, so an unknown name leaves the model unchanged.
    pub fn apply_values<'a>(
        &self,
        values: impl IntoIterator<Item = &'a ParameterValue>,
    ) -> Result<usize, ModelError> {
        let resolved = values
            .into_iter()
            .map(|v| Ok((self.parameter(&v.name)?, v.value)))
            .collect::<Result<Vec<_>, ModelError>>()?;
        for (param, value) in &resolved {
            param.set_value(*value);
        }
        Ok(resolved.len())
    }

    pub fn plot(&self, plotter: &dyn Plotter) -> Result<(), AppError> {
        let theory = self.theory();
        plotter.plot(&PlotPanels {
            x: self.grid.x(),
            y: self.grid.y(),
            theory: &theory,
            data: self.grid.data(),
            err: self.grid.err(),
        })
    }

    pub fn save(&self, basename: &Path) -> Result<(), AppError> {
        self.persistence.save(self, basename)
    }

    pub fn update(&self) -> Result<(), AppError> {
        self.persistence.update(self)
    }
}
