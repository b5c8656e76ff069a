//! Domain types: parameters, the sample grid, and run/snapshot records.

pub mod grid;
pub mod parameter;
pub mod types;

pub use grid::*;
pub use parameter::*;
pub use types::*;
