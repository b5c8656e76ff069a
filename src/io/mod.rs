//! Input/output helpers.
//!
//! - the persistence extension point and snapshot JSON read/write (`snapshot`)

pub mod snapshot;

pub use snapshot::*;
