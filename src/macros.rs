//! Macros for creating isolated registries.

/// Creates an isolated, lazily-initialized registry module with a single macro invocation.
///
/// The macro generates a module containing:
/// - A private `LazyLock<Registry>` static
/// - `registry()` returning it, for passing the registry explicitly
/// - Free functions delegating to [`RegistryApi`](crate::RegistryApi)
///
/// # Examples
///
/// ```rust
/// use singleton_store::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(services);
///
/// services::store("db", Arc::new("postgres://localhost".to_string()));
///
/// let mut db: Option<Arc<String>> = None;
/// services::get_into("db", Some(&mut db)).unwrap();
/// assert_eq!(db.as_deref().map(String::as_str), Some("postgres://localhost"));
/// ```
///
/// # Multiple Registries
///
/// Each invocation gets its own map, so the same key can live in several:
///
/// ```rust
/// use singleton_store::define_registry;
///
/// define_registry!(primary);
/// define_registry!(replica);
///
/// primary::store_value("conn", "primary".to_string());
///
/// assert!(primary::contains("conn"));
/// assert!(!replica::contains("conn"));
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::any::Any;
            use std::sync::{Arc, LazyLock};

            use $crate::RegistryApi;

            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// The registry backing this module.
            pub fn registry() -> &'static $crate::Registry {
                &REGISTRY
            }

            /// Store a shared reference under `key`.
            pub fn store<T: Any + Send + Sync>(key: impl Into<String>, value: Arc<T>) {
                REGISTRY.store(key, value)
            }

            /// Wrap `value` in an `Arc` and store it under `key`.
            pub fn store_value<T: Any + Send + Sync>(key: impl Into<String>, value: T) {
                REGISTRY.store_value(key, value)
            }

            /// Look up the reference stored under `key`.
            pub fn get(key: &str) -> Result<$crate::Instance, $crate::RegistryError> {
                REGISTRY.get(key)
            }

            /// Look up `key` and downcast it to `Arc<T>`.
            pub fn get_as<T: Any + Send + Sync>(key: &str) -> Result<Arc<T>, $crate::RegistryError> {
                REGISTRY.get_as(key)
            }

            /// Look up `key` and write the reference through `into`.
            pub fn get_into<D: $crate::Destination>(
                key: &str,
                into: Option<&mut D>,
            ) -> Result<(), $crate::RegistryError> {
                REGISTRY.get_into(key, into)
            }

            /// Remove `key`; no-op if absent.
            pub fn delete(key: &str) {
                REGISTRY.delete(key)
            }

            pub fn contains(key: &str) -> bool {
                REGISTRY.contains(key)
            }

            pub fn keys() -> Vec<String> {
                REGISTRY.keys()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
