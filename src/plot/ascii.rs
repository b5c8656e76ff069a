//! ASCII heatmaps for terminal output.
//!
//! This is intentionally "dumb" (fixed character ramp, nearest-sample
//! downscaling), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Panels, top to bottom: data, theory, residual (`data - theory`). Each panel
//! is scaled to its own value range and drawn with the largest `y` on top.

use nalgebra::DMatrix;

use crate::error::AppError;
use crate::plot::{PlotPanels, Plotter};

/// Low to high intensity.
const RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Non-finite cells.
const NON_FINITE: char = '?';

#[derive(Debug, Clone, Copy)]
pub struct AsciiHeatmap {
    pub max_width: usize,
    pub max_height: usize,
}

impl Default for AsciiHeatmap {
    fn default() -> Self {
        Self {
            max_width: 64,
            max_height: 32,
        }
    }
}

impl AsciiHeatmap {
    pub fn render(&self, panels: &PlotPanels<'_>) -> String {
        render_heatmaps(panels, self.max_width, self.max_height)
    }
}

impl Plotter for AsciiHeatmap {
    fn plot(&self, panels: &PlotPanels<'_>) -> Result<(), AppError> {
        print!("{}", self.render(panels));
        Ok(())
    }
}

/// Render data, theory and residual panels.
pub fn render_heatmaps(panels: &PlotPanels<'_>, max_width: usize, max_height: usize) -> String {
    let residual = panels.data - panels.theory;
    let mut out = String::new();
    for (title, values) in [
        ("data", panels.data),
        ("theory", panels.theory),
        ("residual", &residual),
    ] {
        out.push_str(&render_panel(title, values, panels.x, panels.y, max_width, max_height));
    }
    out
}

fn render_panel(
    title: &str,
    values: &DMatrix<f64>,
    x: &DMatrix<f64>,
    y: &DMatrix<f64>,
    max_width: usize,
    max_height: usize,
) -> String {
    if values.is_empty() {
        return format!("{title}: (empty)\n");
    }

    let (x_min, x_max) = finite_range(x).unwrap_or((0.0, 0.0));
    let (y_min, y_max) = finite_range(y).unwrap_or((0.0, 0.0));
    let (z_min, z_max) = finite_range(values).unwrap_or((0.0, 0.0));

    let mut out = format!(
        "{title}: x=[{x_min:.3}, {x_max:.3}] y=[{y_min:.3}, {y_max:.3}] z=[{z_min:.4}, {z_max:.4}]\n"
    );

    let (rows, cols) = values.shape();
    let out_rows = rows.min(max_height.max(1));
    let out_cols = cols.min(max_width.max(1));

    for i in 0..out_rows {
        // Rows run with increasing y; print the last one first.
        let r = rows - 1 - sample_index(i, out_rows, rows);
        for j in 0..out_cols {
            let c = sample_index(j, out_cols, cols);
            out.push(shade(values[(r, c)], z_min, z_max));
        }
        out.push('\n');
    }

    out
}

fn finite_range(m: &DMatrix<f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in m.iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo.is_finite() && hi.is_finite() {
        Some((lo, hi))
    } else {
        None
    }
}

/// Map output cell `i` of `n_out` onto one of `n_in` source cells.
fn sample_index(i: usize, n_out: usize, n_in: usize) -> usize {
    if n_out <= 1 || n_in <= 1 {
        return 0;
    }
    let u = i as f64 / (n_out as f64 - 1.0);
    (u * (n_in as f64 - 1.0)).round() as usize
}

fn shade(v: f64, min: f64, max: f64) -> char {
    if !v.is_finite() {
        return NON_FINITE;
    }
    if max <= min {
        return RAMP[0];
    }
    let u = ((v - min) / (max - min)).clamp(0.0, 1.0);
    RAMP[(u * (RAMP.len() as f64 - 1.0)).round() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meshgrid;

    #[test]
    fn heatmap_golden_snapshot_small() {
        let (x, y) = meshgrid(&[0.0, 1.0, 2.0], &[10.0, 20.0]);
        let theory = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let err = DMatrix::from_element(2, 3, 1.0);
        let panels = PlotPanels {
            x: &x,
            y: &y,
            theory: &theory,
            data: &theory,
            err: &err,
        };

        let txt = render_heatmaps(&panels, 10, 10);
        let expected = concat!(
            "data: x=[0.000, 2.000] y=[10.000, 20.000] z=[0.0000, 5.0000]\n",
            "+#@\n",
            " :=\n",
            "theory: x=[0.000, 2.000] y=[10.000, 20.000] z=[0.0000, 5.0000]\n",
            "+#@\n",
            " :=\n",
            "residual: x=[0.000, 2.000] y=[10.000, 20.000] z=[0.0000, 0.0000]\n",
            "   \n",
            "   \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn large_grid_is_downsampled() {
        let (x, y) = meshgrid(&vec![0.0; 100], &vec![0.0; 50]);
        let m = DMatrix::from_fn(50, 100, |r, c| (r + c) as f64);
        let out = render_panel("data", &m, &x, &y, 20, 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 20));
        // Top-right is the maximum.
        assert_eq!(lines[1].chars().last(), Some('@'));
        assert_eq!(lines[10].chars().next(), Some(' '));
    }

    #[test]
    fn non_finite_cells_are_marked() {
        assert_eq!(shade(f64::NAN, 0.0, 1.0), '?');
        assert_eq!(shade(f64::INFINITY, 0.0, 1.0), '?');
        assert_eq!(shade(1.0, 0.0, 1.0), '@');
    }
}
