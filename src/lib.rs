//! # Singleton Store
//!
//! A thread-safe registry of named singleton instances. Values are stored as
//! shared references under string keys and retrieved either as an opaque
//! [`Instance`] or, with a runtime type check, written into a typed destination.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_store::{delete, get, get_into, store};
//! use std::sync::Arc;
//!
//! struct Config {
//!     api_key: String,
//! }
//!
//! store("cfg", Arc::new(Config { api_key: "abc".into() }));
//!
//! let mut config: Option<Arc<Config>> = None;
//! get_into("cfg", Some(&mut config)).unwrap();
//! assert_eq!(config.unwrap().api_key, "abc");
//!
//! delete("cfg");
//! assert!(get("cfg").unwrap_err().is_not_found());
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: one reader/writer lock per registry, no I/O under the lock
//! - **Shared, not copied**: the registry holds an `Arc` clone of what you stored
//! - **Checked extraction**: type mismatches are errors naming both types
//! - **Tracing support**: `tracing` events plus an optional per-registry callback
//!
//! ## Main Items
//!
//! - [`store`], [`get`], [`get_into`], [`delete`] - the process-wide registry
//! - [`Registry`] - an explicit registry value to inject through call sites
//! - [`define_registry!`] - an isolated registry module
//! - [`RegistryApi`] - the operations, for registries behind your own statics

mod destination;
mod global;
mod instance;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

pub use destination::Destination;
pub use global::{
    clear, clear_trace_callback, contains, delete, get, get_as, get_into, global,
    set_trace_callback, store, store_value,
};
pub use instance::Instance;
pub use registry::Registry;
pub use registry_error::{ErrorKind, RegistryError};
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, Storage, TraceCallback, TraceSlot};
