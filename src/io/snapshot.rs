//! Read/write model snapshot JSON files.
//!
//! A snapshot is the portable record of a model state:
//! - parameter names/values per component
//! - grid shape and point count
//! - the fit statistics at save time (nllf, and chisq when dof is set)
//!
//! The schema is defined by `domain::SnapshotFile`.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::SnapshotFile;
use crate::error::AppError;
use crate::models::PeakModel;

/// Extension point behind `PeakModel::save` / `PeakModel::update`.
pub trait Persistence: Send + Sync {
    fn save(&self, model: &PeakModel, basename: &Path) -> Result<(), AppError>;

    fn update(&self, model: &PeakModel) -> Result<(), AppError>;
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl Persistence for NoPersistence {
    fn save(&self, _model: &PeakModel, _basename: &Path) -> Result<(), AppError> {
        Ok(())
    }

    fn update(&self, _model: &PeakModel) -> Result<(), AppError> {
        Ok(())
    }
}

/// Writes `<basename>.json` on save; `update` is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshot;

impl Persistence for JsonSnapshot {
    fn save(&self, model: &PeakModel, basename: &Path) -> Result<(), AppError> {
        let path = snapshot_path(basename);
        write_snapshot_json(&path, &build_snapshot(model))?;
        log::info!("saved snapshot to {}", path.display());
        Ok(())
    }

    fn update(&self, _model: &PeakModel) -> Result<(), AppError> {
        Ok(())
    }
}

/// `<basename>.json`
pub fn snapshot_path(basename: &Path) -> PathBuf {
    let mut name = basename.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

pub fn build_snapshot(model: &PeakModel) -> SnapshotFile {
    let (rows, cols) = model.grid().shape();
    SnapshotFile {
        tool: "peaks".to_string(),
        saved_at: Local::now().to_rfc3339(),
        rows,
        cols,
        numpoints: model.numpoints(),
        nllf: model.nllf(),
        dof: model.dof(),
        chisq: model.chisq().ok(),
        components: model.parameter_values(),
    }
}

pub fn write_snapshot_json(path: &Path, snapshot: &SnapshotFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;

    Ok(())
}

pub fn read_snapshot_json(path: &Path) -> Result<SnapshotFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open snapshot JSON '{}': {e}", path.display())))?;
    let snapshot: SnapshotFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}

/// Restore parameter values from a snapshot into `model`.
pub fn apply_snapshot(model: &PeakModel, snapshot: &SnapshotFile) -> Result<usize, AppError> {
    let n = model.apply_values(snapshot.components.iter().flatten())?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Grid, PeakSpec, centered_mesh};
    use crate::models::{Background, Gaussian};
    use nalgebra::DMatrix;

    fn model() -> PeakModel {
        let (x, y) = centered_mesh(5, 5, 1.0).unwrap();
        let grid = Grid::new(x, y, DMatrix::zeros(5, 5), DMatrix::from_element(5, 5, 1.0)).unwrap();
        PeakModel::new(
            grid,
            vec![
                Box::new(Gaussian::new("p1", PeakSpec::default())),
                Box::new(Background::new("", 0.5)),
            ],
        )
    }

    fn temp_base(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("peaks2d_{tag}_{}", std::process::id()))
    }

    #[test]
    fn snapshot_path_appends_extension() {
        assert_eq!(snapshot_path(Path::new("out/run.1")), PathBuf::from("out/run.1.json"));
    }

    #[test]
    fn save_then_restore_parameters() {
        let base = temp_base("roundtrip");
        let m = model().with_dof(18.0).unwrap().with_persistence(Box::new(JsonSnapshot));
        m.parameter("p1xc").unwrap().set_value(0.75);
        m.save(&base).unwrap();

        let path = snapshot_path(&base);
        let snap = read_snapshot_json(&path).unwrap();
        assert_eq!(snap.numpoints, 25);
        assert_eq!(snap.dof, Some(18.0));
        assert!(snap.chisq.is_some());
        assert_eq!(snap.components.len(), 2);

        m.parameter("p1xc").unwrap().set_value(-2.0);
        let n = apply_snapshot(&m, &snap).unwrap();
        assert_eq!(n, 7);
        assert_eq!(m.parameter("p1xc").unwrap().value(), 0.75);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn non_finite_state_reloads() {
        let base = temp_base("nonfinite");
        let path = snapshot_path(&base);

        let m = model().with_dof(18.0).unwrap().with_persistence(Box::new(JsonSnapshot));
        m.parameter("p1A").unwrap().set_value(f64::NAN);
        m.save(&base).unwrap();
        let snap = read_snapshot_json(&path).unwrap();
        assert!(snap.components[0].iter().any(|v| v.name == "p1A" && v.value.is_nan()));

        m.parameter("p1A").unwrap().set_value(1.0);
        apply_snapshot(&m, &snap).unwrap();
        assert!(m.parameter("p1A").unwrap().value().is_nan());

        let mut err = DMatrix::from_element(5, 5, 1.0);
        err[(0, 0)] = 0.0;
        let zero_err = model()
            .with_observations(DMatrix::zeros(5, 5), err)
            .unwrap()
            .with_dof(18.0)
            .unwrap()
            .with_persistence(Box::new(JsonSnapshot));
        zero_err.save(&base).unwrap();
        let snap = read_snapshot_json(&path).unwrap();
        assert_eq!(snap.nllf, f64::INFINITY);
        assert_eq!(snap.chisq, Some(f64::INFINITY));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn snapshot_without_dof_has_no_chisq() {
        let snap = build_snapshot(&model());
        assert_eq!(snap.dof, None);
        assert_eq!(snap.chisq, None);
        assert_eq!(snap.components[1][0].key, "C");
        assert_eq!(snap.components[1][0].name, "background");
    }

    #[test]
    fn unknown_parameter_in_snapshot_fails() {
        let mut snap = build_snapshot(&model());
        snap.components[0][0].name = "nope".to_string();
        let err = apply_snapshot(&model(), &snap).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn reading_missing_file_fails() {
        assert!(read_snapshot_json(Path::new("/definitely/not/here.json")).is_err());
    }
}
