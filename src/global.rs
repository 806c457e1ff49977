//! The process-wide registry and free functions over it.
//!
//! The registry is created on first use and lives until the process exits.
//! Prefer passing a [`Registry`] explicitly where the call sites allow it; these
//! functions exist for code that genuinely needs one shared map.

use std::any::Any;
use std::sync::{Arc, LazyLock};

use crate::{Destination, Instance, Registry, RegistryApi, RegistryError, RegistryEvent};

/// Global registry, initialized exactly once even under concurrent first access.
static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    tracing::debug!("initializing process-wide singleton registry");
    Registry::new()
});

/// Returns the process-wide registry.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Stores a shared reference under `key` in the global registry.
///
/// # Examples
///
/// ```
/// use singleton_store::{get_into, store};
/// use std::sync::Arc;
///
/// struct AppConfig {
///     api_key: String,
/// }
///
/// store("docs-config", Arc::new(AppConfig { api_key: "test-api-key".into() }));
///
/// let mut config: Option<Arc<AppConfig>> = None;
/// get_into("docs-config", Some(&mut config)).unwrap();
/// assert_eq!(config.unwrap().api_key, "test-api-key");
/// ```
pub fn store<T: Any + Send + Sync>(key: impl Into<String>, value: Arc<T>) {
    global().store(key, value);
}

/// Wraps `value` in an `Arc` and stores it under `key` in the global registry.
pub fn store_value<T: Any + Send + Sync>(key: impl Into<String>, value: T) {
    global().store_value(key, value);
}

/// Looks up `key` in the global registry.
///
/// # Examples
///
/// ```
/// use singleton_store::get;
///
/// let err = get("docs-never-stored").unwrap_err();
/// assert!(err.is_not_found());
/// ```
pub fn get(key: &str) -> Result<Instance, RegistryError> {
    global().get(key)
}

/// Looks up `key` in the global registry and downcasts it to `Arc<T>`.
pub fn get_as<T: Any + Send + Sync>(key: &str) -> Result<Arc<T>, RegistryError> {
    global().get_as(key)
}

/// Looks up `key` in the global registry and writes the reference through `into`.
pub fn get_into<D: Destination>(key: &str, into: Option<&mut D>) -> Result<(), RegistryError> {
    global().get_into(key, into)
}

/// Removes `key` from the global registry; no-op if absent.
pub fn delete(key: &str) {
    global().delete(key);
}

pub fn contains(key: &str) -> bool {
    global().contains(key)
}

/// Sets a tracing callback on the global registry.
pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
    global().set_trace_callback(callback);
}

/// Clears the global tracing callback.
pub fn clear_trace_callback() {
    global().clear_trace_callback();
}

#[doc(hidden)]
pub fn clear() {
    global().clear();
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
