//! Shared "evaluation pipeline" logic used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! grid -> components -> synthetic observations -> model -> (restore) -> dof
//!
//! The subcommands can then focus on what they report.

use nalgebra::DMatrix;

use crate::data::generate_sample;
use crate::domain::{DofSetting, Grid, RunConfig, centered_mesh};
use crate::error::AppError;
use crate::io::{JsonSnapshot, apply_snapshot, read_snapshot_json};
use crate::models::{Background, Field, Gaussian, PeakModel};

/// All computed outputs of a single `peaks eval` run.
pub struct RunOutput {
    pub model: PeakModel,
    pub nllf: f64,
    pub chisq: Option<f64>,
}

/// Components in evaluation order: peaks `p1`, `p2`, ... then the background.
pub fn build_components(config: &RunConfig) -> Vec<Box<dyn Field>> {
    let mut parts: Vec<Box<dyn Field>> = config
        .peaks
        .iter()
        .enumerate()
        .map(|(i, spec)| Box::new(Gaussian::new(&format!("p{}", i + 1), *spec)) as Box<dyn Field>)
        .collect();
    parts.push(Box::new(Background::new("", config.background)));
    parts
}

/// Build a model whose observations are synthesized from the configured components.
pub fn build_model(config: &RunConfig) -> Result<PeakModel, AppError> {
    let (x, y) = centered_mesh(config.nx, config.ny, config.step)?;
    let placeholder = Grid::new(
        x,
        y,
        DMatrix::zeros(config.ny, config.nx),
        DMatrix::from_element(config.ny, config.nx, 1.0),
    )?;
    let model = PeakModel::new(placeholder, build_components(config));

    let sample = generate_sample(&model.theory(), config.noise, config.seed)?;
    let mut model = model.with_observations(sample.data, sample.err)?;
    if config.save.is_some() {
        model = model.with_persistence(Box::new(JsonSnapshot));
    }

    if let Some(path) = &config.restore {
        let snapshot = read_snapshot_json(path)?;
        let n = apply_snapshot(&model, &snapshot)?;
        log::info!("restored {n} parameter values from {}", path.display());
    }

    let dof = resolve_dof(&model, config.dof)?;
    model.set_dof(dof)?;

    log::debug!(
        "built model: {}x{} grid, {} components, {} parameters",
        config.ny,
        config.nx,
        model.components().len(),
        model.parameter_count()
    );
    Ok(model)
}

fn resolve_dof(model: &PeakModel, setting: DofSetting) -> Result<Option<f64>, AppError> {
    match setting {
        DofSetting::Unset => Ok(None),
        DofSetting::Fixed(d) => Ok(Some(d)),
        DofSetting::Auto => {
            let dof = model.auto_dof();
            if dof <= 0.0 {
                return Err(AppError::new(
                    2,
                    format!(
                        "Automatic dof = {} points - {} parameters = {dof} is not positive; pass --dof explicitly.",
                        model.numpoints(),
                        model.parameter_count()
                    ),
                ));
            }
            log::info!(
                "dof = numpoints - parameters = {} - {} = {dof}",
                model.numpoints(),
                model.parameter_count()
            );
            Ok(Some(dof))
        }
    }
}

/// Execute the evaluation pipeline and return the computed outputs.
pub fn run_eval(config: &RunConfig) -> Result<RunOutput, AppError> {
    let model = build_model(config)?;
    let nllf = model.nllf();
    let chisq = match model.dof() {
        Some(_) => Some(model.chisq()?),
        None => None,
    };

    if let Some(base) = &config.save {
        model.save(base)?;
    }

    Ok(RunOutput { model, nllf, chisq })
}
