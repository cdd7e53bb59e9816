//! In-memory selection store
//!
//! Holds the services the user last selected, shared between commands.
//! Explicitly constructed and passed to whoever needs it; there is no
//! process-wide singleton. Writers replace the whole collection
//! atomically under the write lock; readers get an independent copy, so
//! no caller can observe or cause a partial mutation.

use crate::manifest::ManifestService;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct ServiceStore {
    inner: RwLock<Vec<ManifestService>>,
}

impl ServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire selection
    pub fn replace_all(&self, services: Vec<ManifestService>) {
        let mut guard = self.inner.write().expect("service store lock poisoned");
        *guard = services;
    }

    /// Independent copy of the current selection
    pub fn snapshot(&self) -> Vec<ManifestService> {
        self.inner
            .read()
            .expect("service store lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("service store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
