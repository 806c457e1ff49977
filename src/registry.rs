//! The concrete registry type.
//!
//! A `Registry` is a plain value: construct one at startup and pass it (or an
//! `Arc` of it) to whatever needs shared instances. The process-wide registry in
//! [`crate::global`] is just one of these behind a `LazyLock`.
//!
//! # Examples
//!
//! ```
//! use singleton_store::{Registry, RegistryApi};
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! registry.store("greeting", Arc::new("Hello, World!".to_string()));
//!
//! let message: Arc<String> = registry.get_as("greeting").unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! ```

use std::fmt;

use crate::registry_trait::{RegistryApi, Storage, TraceSlot};

/// A thread-safe map from string keys to shared, type-erased references.
#[derive(Default)]
pub struct Registry {
    storage: Storage,
    trace: TraceSlot,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryApi for Registry {
    fn storage(&self) -> &Storage {
        &self.storage
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.storage.read();
        let mut keys: Vec<&String> = storage.keys().collect();
        keys.sort();
        f.debug_struct("Registry")
            .field("keys", &keys)
            .field("traced", &self.trace.read().is_some())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
