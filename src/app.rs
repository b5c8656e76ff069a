//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and starts logging
//! - parses CLI arguments
//! - builds the model and synthetic observations
//! - prints reports/plots
//! - writes optional snapshots

use clap::Parser;

use crate::cli::{Command, ModelArgs, ProfileArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::AsciiHeatmap;

pub mod pipeline;

/// Entry point for the `peaks` binary.
pub fn run() -> Result<(), AppError> {
    let _logger = crate::logging::setup_logging(&crate::logging::log_spec_from_env())?;
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Profile(args) => handle_profile(args),
    }
}

fn handle_eval(args: ModelArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_eval(&config)?;

    println!("{}", crate::report::format_run_summary(&run.model));

    if config.plot {
        run.model.plot(&AsciiHeatmap {
            max_width: config.plot_width,
            max_height: config.plot_height,
        })?;
    }

    log::info!(
        "nllf={:.6} chisq={}",
        run.nllf,
        run.chisq.map(|c| format!("{c:.6}")).unwrap_or_else(|| "n/a".to_string())
    );
    Ok(())
}

fn handle_profile(args: ProfileArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.model);
    let model = pipeline::build_model(&config)?;
    let profile = crate::fit::profile_parameter(&model, &args.param, args.min, args.max, args.steps)?;

    println!("{}", crate::report::format_profile(&profile));
    Ok(())
}

pub fn run_config_from_args(args: &ModelArgs) -> RunConfig {
    RunConfig {
        nx: args.nx,
        ny: args.ny,
        step: args.step,
        peaks: args.peaks.clone(),
        background: args.background,
        noise: args.noise,
        seed: args.seed,
        dof: args.dof,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        save: args.save.clone(),
        restore: args.restore.clone(),
    }
}
