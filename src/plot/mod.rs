//! Plotting boundary.
//!
//! The model hands a [`Plotter`] everything it needs to draw three heatmaps:
//! observed data, model theory, and the residual `data - theory`.

use nalgebra::DMatrix;

use crate::error::AppError;

pub mod ascii;

pub use ascii::*;

/// Arrays passed to a plotter. All share the grid's shape.
#[derive(Debug, Clone, Copy)]
pub struct PlotPanels<'a> {
    pub x: &'a DMatrix<f64>,
    pub y: &'a DMatrix<f64>,
    pub theory: &'a DMatrix<f64>,
    pub data: &'a DMatrix<f64>,
    pub err: &'a DMatrix<f64>,
}

pub trait Plotter {
    fn plot(&self, panels: &PlotPanels<'_>) -> Result<(), AppError>;
}
