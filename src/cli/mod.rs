//! Command-line parsing for the peak model evaluator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DofSetting, PeakSpec};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "peaks", version, about = "2-D Gaussian peak model evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the model on a synthetic grid, print its fit statistics, and optionally plot/save.
    Eval(ModelArgs),
    /// Scan one parameter over a range and print nllf at each value.
    Profile(ProfileArgs),
}

/// Options that describe the grid, the components and the synthetic observations.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Grid columns.
    #[arg(long, default_value_t = 41)]
    pub nx: usize,

    /// Grid rows.
    #[arg(long, default_value_t = 41)]
    pub ny: usize,

    /// Grid spacing (same on both axes); the grid is centred at the origin.
    #[arg(long, default_value_t = 0.25)]
    pub step: f64,

    /// Peak as `A,xc,yc,s1,s2,theta` (theta in degrees). Repeat for more peaks.
    #[arg(long = "peak", allow_hyphen_values = true, default_value = "10,0,0,1,1,0")]
    pub peaks: Vec<PeakSpec>,

    /// Constant background level.
    #[arg(long, allow_negative_numbers = true, default_value_t = 1.0)]
    pub background: f64,

    /// Noise scale for the synthetic observations (0 = data equals theory).
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the synthetic noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Degrees of freedom for the reduced statistic: a number, `auto`
    /// (points - parameters), or `none`.
    #[arg(long, default_value = "auto")]
    pub dof: DofSetting,

    /// Render data/theory/residual heatmaps.
    #[arg(long, default_value_t = false)]
    pub plot: bool,

    /// Maximum heatmap width (characters).
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Maximum heatmap height (lines).
    #[arg(long, default_value_t = 32)]
    pub height: usize,

    /// Save a snapshot to `<BASENAME>.json`.
    #[arg(long, value_name = "BASENAME")]
    pub save: Option<PathBuf>,

    /// Restore parameter values from a snapshot JSON before evaluating.
    #[arg(long, value_name = "FILE")]
    pub restore: Option<PathBuf>,
}

/// Options for `peaks profile`.
#[derive(Debug, Args, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Full parameter name, e.g. `p1xc` or `background`.
    #[arg(long)]
    pub param: String,

    /// Start of the scan range.
    #[arg(long, allow_negative_numbers = true)]
    pub min: f64,

    /// End of the scan range.
    #[arg(long, allow_negative_numbers = true)]
    pub max: f64,

    /// Number of values to evaluate.
    #[arg(long, default_value_t = 21)]
    pub steps: usize,
}
