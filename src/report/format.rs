//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::fit::Profile;
use crate::models::PeakModel;

/// Format the run summary: grid, parameter table, and fit statistics.
pub fn format_run_summary(model: &PeakModel) -> String {
    let mut out = String::new();
    let (rows, cols) = model.grid().shape();

    out.push_str("=== peaks - 2-D Gaussian peak model ===\n");
    out.push_str(&format!(
        "Grid: {rows}x{cols} | points={} | components={} | parameters={}\n",
        model.numpoints(),
        model.components().len(),
        model.parameter_count()
    ));

    out.push_str("\nParameters:\n");
    out.push_str(&format!("  {:<10} {:<6} {:<16} {:>14}\n", "component", "key", "name", "value"));
    for (part, values) in model.components().iter().zip(model.parameter_values()) {
        let label = if part.name().is_empty() { "-" } else { part.name() };
        for v in values {
            out.push_str(&format!(
                "  {:<10} {:<6} {:<16} {:>14.6}\n",
                label, v.key, v.name, v.value
            ));
        }
    }

    out.push_str("\nFit statistics:\n");
    out.push_str(&format!("  nllf:  {:.6}\n", model.nllf()));
    match (model.dof(), model.chisq()) {
        (Some(dof), Ok(chisq)) => {
            out.push_str(&format!("  dof:   {dof}\n"));
            out.push_str(&format!("  chisq: {chisq:.6}\n"));
        }
        _ => out.push_str("  chisq: n/a (dof not set)\n"),
    }

    out
}

/// Format a profile scan as a two-column table with the minimum marked.
pub fn format_profile(profile: &Profile) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Profile of {} (current value {:.6}):\n",
        profile.parameter, profile.original
    ));
    out.push_str(&format!("  {:>14} {:>18}\n", "value", "nllf"));

    let best = profile.best().map(|b| b.value);
    for p in &profile.points {
        let marker = if Some(p.value) == best { " <- min" } else { "" };
        out.push_str(&format!("  {:>14.6} {:>18.6}{marker}\n", p.value, p.nllf));
    }
    out
}
