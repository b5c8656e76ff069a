//! Spatially constant background.

use nalgebra::DMatrix;

use crate::domain::{Parameter, ParameterMap};
use crate::models::Field;

pub struct Background {
    name: String,
    level: Parameter,
}

impl Background {
    /// Create a background whose parameter is named `{name}background`.
    pub fn new(name: &str, level: f64) -> Self {
        Self {
            name: name.to_string(),
            level: Parameter::new(format!("{name}background"), level),
        }
    }

    pub fn level(&self) -> f64 {
        self.level.value()
    }
}

impl Field for Background {
    fn name(&self) -> &str {
        &self.name
    }

    /// `x` only supplies the shape.
    fn field(&self, x: &DMatrix<f64>, _y: &DMatrix<f64>) -> DMatrix<f64> {
        DMatrix::from_element(x.nrows(), x.ncols(), self.level.value())
    }

    fn parameters(&self) -> ParameterMap {
        ParameterMap::from([("C", self.level.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::centered_mesh;

    #[test]
    fn every_entry_equals_level() {
        for &(nx, ny) in &[(1, 1), (5, 5), (7, 2)] {
            let (x, y) = centered_mesh(nx, ny, 0.5).unwrap();
            for &k in &[0.0, -5.2, 1e6] {
                let z = Background::new("", k).field(&x, &y);
                assert_eq!(z.shape(), (ny, nx));
                assert!(z.iter().all(|v| *v == k));
            }
        }
    }

    #[test]
    fn reads_parameter_at_evaluation_time() {
        let (x, y) = centered_mesh(3, 3, 1.0).unwrap();
        let bg = Background::new("bg_", 1.0);
        bg.parameters()["C"].set_value(2.5);
        assert!(bg.field(&x, &y).iter().all(|v| *v == 2.5));
        assert_eq!(bg.parameters()["C"].name(), "bg_background");
    }
}
