//! Mathematical utilities: rotated Gaussian quadratic forms and grid spacing.

pub mod quadform;
pub mod spacing;

pub use quadform::*;
pub use spacing::*;
