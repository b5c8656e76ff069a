//! Error types.
//!
//! - `ModelError` is returned by the library (grid construction, reduced statistic,
//!   parameter lookup).
//! - `AppError` is what the `peaks` binary reports; it carries the process exit code.

/// Structural errors raised by the model layer.
///
/// Numerically degenerate parameter states are *not* errors: they are absorbed
/// inside field evaluation (see `models::peak`).
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// One of the grid arrays does not have the shape of `x`.
    ShapeMismatch {
        array: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The reduced statistic was requested but no degrees of freedom were configured.
    MissingDof,
    /// Degrees of freedom must be finite and > 0.
    InvalidDof { dof: f64 },
    /// Grid construction inputs are unusable (empty axes, bad step, ...).
    InvalidGrid { reason: String },
    /// No parameter with this name exists in the model.
    UnknownParameter { name: String },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::ShapeMismatch {
                array,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch: '{array}' is {}x{} but the grid is {}x{}.",
                found.0, found.1, expected.0, expected.1
            ),
            ModelError::MissingDof => write!(
                f,
                "Degrees of freedom are not set; configure dof before computing the reduced statistic."
            ),
            ModelError::InvalidDof { dof } => {
                write!(f, "Invalid degrees of freedom: {dof} (must be finite and > 0).")
            }
            ModelError::InvalidGrid { reason } => write!(f, "Invalid grid: {reason}"),
            ModelError::UnknownParameter { name } => write!(f, "Unknown parameter '{name}'."),
        }
    }
}

impl std::error::Error for ModelError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_maps_to_input_exit_code() {
        let err: AppError = ModelError::MissingDof.into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Degrees of freedom"));
    }

    #[test]
    fn shape_mismatch_message_names_array() {
        let err = ModelError::ShapeMismatch {
            array: "err",
            expected: (5, 5),
            found: (4, 5),
        };
        let msg = err.to_string();
        assert!(msg.contains("'err'"), "{msg}");
        assert!(msg.contains("4x5"), "{msg}");
    }
}
