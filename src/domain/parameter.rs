//! Shared, named scalar parameters.
//!
//! A `Parameter` is a cheap handle: cloning it shares the same underlying value.
//! Components keep one clone and read it during evaluation; an external optimizer
//! keeps another clone in its own registry and writes to it between evaluations.
//!
//! Values are stored as `f64` bits in an `AtomicU64` so handles are `Send + Sync`
//! and components can be evaluated from a `rayon` pool. The model only ever reads.
//! Callers must not write while an evaluation is in flight; a single field
//! evaluation reads each value once, so it sees one consistent snapshot as long
//! as that rule holds.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct Inner {
    name: String,
    bits: AtomicU64,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    inner: Arc<Inner>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                bits: AtomicU64::new(value.to_bits()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.inner.bits.load(Ordering::Acquire))
    }

    pub fn set_value(&self, value: f64) {
        self.inner.bits.store(value.to_bits(), Ordering::Release);
    }

    /// True when both handles point at the same underlying value.
    pub fn same_as(&self, other: &Parameter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Logical key (`"A"`, `"xc"`, `"C"`, ...) to parameter handle, for one component.
pub type ParameterMap = BTreeMap<&'static str, Parameter>;
