//! One-dimensional likelihood profile.
//!
//! Steps a single named parameter across an evenly spaced range and records
//! `nllf` at each value. All other parameters stay fixed. This only queries the
//! objective; it does not move anything towards a minimum.

use crate::error::AppError;
use crate::math::linspace;
use crate::models::PeakModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub value: f64,
    pub nllf: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub parameter: String,
    /// Value the parameter had before (and after) the scan.
    pub original: f64,
    pub points: Vec<ProfilePoint>,
}

impl Profile {
    /// Lowest finite `nllf`; ties go to the earlier point.
    pub fn best(&self) -> Option<&ProfilePoint> {
        let mut best: Option<&ProfilePoint> = None;
        for p in self.points.iter().filter(|p| p.nllf.is_finite()) {
            if best.is_none_or(|b| p.nllf < b.nllf) {
                best = Some(p);
            }
        }
        best
    }
}

/// Scan `name` over `steps` values from `min` to `max` inclusive.
///
/// The parameter is restored to its original value before returning.
pub fn profile_parameter(
    model: &PeakModel,
    name: &str,
    min: f64,
    max: f64,
    steps: usize,
) -> Result<Profile, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::new(
            2,
            format!("Invalid profile range: min={min}, max={max} (must be finite and max>min)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Profile steps must be >= 2."));
    }

    let param = model.parameter(name)?;
    let original = param.value();

    let points = linspace(min, max, steps)
        .into_iter()
        .map(|value| {
            param.set_value(value);
            ProfilePoint {
                value,
                nllf: model.nllf(),
            }
        })
        .collect();

    param.set_value(original);
    log::debug!("profiled {name} over [{min}, {max}] in {steps} steps");

    Ok(Profile {
        parameter: name.to_string(),
        original,
        points,
    })
}
