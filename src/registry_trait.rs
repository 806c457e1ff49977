//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! storing, retrieving and deleting named singleton instances, plus tracing.
//!
//! The registry is key-based: each string key maps to exactly one shared reference.
//! Storing under an existing key replaces the previous reference.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{Destination, Instance, RegistryError, RegistryEvent};

/// The user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Key to reference map guarded by the registry lock.
pub type Storage = RwLock<HashMap<String, Instance>>;

/// Slot holding the optional tracing callback.
pub type TraceSlot = RwLock<Option<Arc<TraceCallback>>>;

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`storage` and `trace`) to be implemented by the implementor.
///
/// Writes (`store`, `delete`, `clear`) take the storage lock exclusively; lookups
/// share it. Trace callbacks run after the storage lock has been released.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------------------------------

    /// Access the key to reference map.
    fn storage(&self) -> &Storage;

    /// Access the trace callback slot.
    fn trace(&self) -> &TraceSlot;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback invoked after every registry operation.
    ///
    /// The callback may call back into the same registry: it is invoked with
    /// neither the storage lock nor the callback slot lock held.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        *self.trace().write() = Some(Arc::new(callback));
    }

    /// Clear the tracing callback. Stored instances are not affected.
    fn clear_trace_callback(&self) {
        *self.trace().write() = None;
    }

    /// Emit a registry event using the current callback, if any.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller.
    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self.trace().read().clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Store a shared reference under `key`, replacing any previous entry.
    ///
    /// The registry keeps a clone of the `Arc`, never a copy of the pointee, so
    /// changes made through interior mutability are visible to every holder.
    fn store<T: Any + Send + Sync>(&self, key: impl Into<String>, value: Arc<T>) {
        let key = key.into();
        let instance = Instance::new(value);
        let type_name = instance.type_name();

        let previous = self.storage().write().insert(key.clone(), instance);
        let replaced = previous.is_some();
        // Drop the old reference outside the lock; its destructor is caller code.
        drop(previous);

        if replaced {
            tracing::debug!(%key, type_name, "replaced singleton instance");
        } else {
            tracing::trace!(%key, type_name, "stored singleton instance");
        }

        self.emit_event(&RegistryEvent::Store {
            key,
            type_name,
            replaced,
        });
    }

    /// Wrap `value` in an `Arc` and store it under `key`.
    ///
    /// Use [`store`](RegistryApi::store) when the caller needs to keep its own
    /// handle to the same object.
    fn store_value<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.store(key, Arc::new(value));
    }

    /// Look up the reference stored under `key`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Instance, RegistryError> {
        let instance = self.storage().read().get(key).cloned();

        tracing::trace!(key, found = instance.is_some(), "singleton lookup");
        self.emit_event(&RegistryEvent::Get {
            key: key.to_owned(),
            found: instance.is_some(),
        });

        instance.ok_or_else(|| RegistryError::not_found(key))
    }

    /// Look up `key` and downcast the stored reference to `Arc<T>`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if nothing is stored under `key`
    /// - [`RegistryError::TypeMismatch`] if the stored pointee is not a `T`
    fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>, RegistryError> {
        let mut slot: Option<Arc<T>> = None;
        self.get_into(key, Some(&mut slot))?;
        slot.ok_or_else(|| RegistryError::not_found(key))
    }

    /// Look up `key` and write the stored reference through `into`.
    ///
    /// The destination is validated before the lookup, so a missing destination is
    /// reported even when `key` is absent.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NullDestination`] if `into` is `None`
    /// - [`RegistryError::NotFound`] if nothing is stored under `key`
    /// - [`RegistryError::TypeMismatch`] if the stored type cannot be written into
    ///   the destination; the destination is left unchanged
    fn get_into<D: Destination>(
        &self,
        key: &str,
        into: Option<&mut D>,
    ) -> Result<(), RegistryError> {
        let Some(into) = into else {
            tracing::debug!(key, "get_into called without a destination");
            return Err(RegistryError::NullDestination);
        };

        let target = into.target_type_name();
        let result = self.get(key).and_then(|instance| into.assign(&instance));

        if let Err(RegistryError::TypeMismatch { stored, .. }) = &result {
            tracing::debug!(key, stored, target, "singleton type mismatch");
        }
        self.emit_event(&RegistryEvent::GetInto {
            key: key.to_owned(),
            target,
            ok: result.is_ok(),
        });

        result
    }

    /// Remove the entry for `key`. Removing an absent key is a no-op.
    ///
    /// Only the registry's own handle is dropped; other holders keep theirs.
    fn delete(&self, key: &str) {
        let removed = self.storage().write().remove(key);
        let existed = removed.is_some();
        drop(removed);

        tracing::trace!(key, existed, "deleted singleton instance");
        self.emit_event(&RegistryEvent::Delete {
            key: key.to_owned(),
            existed,
        });
    }

    /// Check whether an entry exists for `key`.
    fn contains(&self, key: &str) -> bool {
        let found = self.storage().read().contains_key(key);

        self.emit_event(&RegistryEvent::Contains {
            key: key.to_owned(),
            found,
        });

        found
    }

    /// Snapshot of the stored keys, in no particular order.
    fn keys(&self) -> Vec<String> {
        self.storage().read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.storage().read().len()
    }

    fn is_empty(&self) -> bool {
        self.storage().read().is_empty()
    }

    /// Remove every entry. Primarily intended for tests.
    ///
    /// Already-retrieved references remain valid, and the tracing callback is kept.
    #[doc(hidden)]
    fn clear(&self) {
        let drained = std::mem::take(&mut *self.storage().write());
        drop(drained);

        self.emit_event(&RegistryEvent::Clear);
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{RegistryApi, Storage, TraceSlot};
    use crate::{ErrorKind, RegistryError, RegistryEvent};

    use parking_lot::{Mutex, RwLock};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct Api {
        storage: Storage,
        trace: TraceSlot,
    }

    impl RegistryApi for Api {
        fn storage(&self) -> &Storage {
            &self.storage
        }

        fn trace(&self) -> &TraceSlot {
            &self.trace
        }
    }

    #[derive(Debug)]
    struct Config {
        api_key: RwLock<String>,
    }

    #[test]
    fn test_get_missing_key() {
        let api = Api::default();

        let err = api.get("missing").unwrap_err();
        assert_eq!(err, RegistryError::NotFound { key: "missing".into() });
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_store_and_get_same_allocation() {
        let api = Api::default();
        let stored = Arc::new(42i32);

        api.store("answer", stored.clone());

        let instance = api.get("answer").unwrap();
        assert!(instance.points_to(&stored));
        assert_eq!(instance.downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let api = Api::default();

        api.store_value("n", 10i32);
        api.store_value("n", 20i32);

        assert_eq!(*api.get_as::<i32>("n").unwrap(), 20);
        assert_eq!(api.len(), 1);
    }

    #[test]
    fn test_overwrite_with_other_type() {
        let api = Api::default();

        api.store_value("slot", 1u8);
        api.store_value("slot", "text".to_string());

        assert!(api.get_as::<u8>("slot").unwrap_err().is_invalid_type());
        assert_eq!(&*api.get_as::<String>("slot").unwrap(), "text");
    }

    #[test]
    fn test_mutation_after_store_is_visible() {
        let api = Api::default();
        let config = Arc::new(Config {
            api_key: RwLock::new("test".into()),
        });

        api.store("cfg", config.clone());
        *config.api_key.write() = "test-changed".into();

        let fetched = api.get("cfg").unwrap().downcast::<Config>().unwrap();
        assert_eq!(*fetched.api_key.read(), "test-changed");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let api = Api::default();

        api.store_value("k", 1u32);
        api.delete("k");
        api.delete("k");
        api.delete("never-stored");

        assert!(api.get("k").unwrap_err().is_not_found());
        assert!(api.get("never-stored").unwrap_err().is_not_found());
        assert!(api.is_empty());
    }

    #[test]
    fn test_delete_does_not_invalidate_holders() {
        let api = Api::default();
        let value = Arc::new("kept".to_string());

        api.store("k", value.clone());
        let held = api.get_as::<String>("k").unwrap();
        api.delete("k");

        assert_eq!(&*held, "kept");
        assert_eq!(Arc::strong_count(&value), 2);
    }

    #[test]
    fn test_get_into_writes_reference() {
        let api = Api::default();
        let config = Arc::new(Config {
            api_key: RwLock::new("test".into()),
        });
        api.store("cfg", config.clone());

        let mut into: Option<Arc<Config>> = None;
        api.get_into("cfg", Some(&mut into)).unwrap();

        let into = into.unwrap();
        *into.api_key.write() = "test-changed".into();
        assert_eq!(*config.api_key.read(), "test-changed");

        let again = api.get_as::<Config>("cfg").unwrap();
        assert_eq!(*again.api_key.read(), "test-changed");
    }

    #[test]
    fn test_get_into_without_destination() {
        let api = Api::default();
        api.store_value("present", 1i32);

        let err = api
            .get_into::<Option<Arc<i32>>>("present", None)
            .unwrap_err();
        assert_eq!(err, RegistryError::NullDestination);

        let err = api
            .get_into::<Option<Arc<i32>>>("absent", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn test_get_into_absent_key() {
        let api = Api::default();

        let mut into: Option<Arc<i32>> = None;
        let err = api.get_into("absent", Some(&mut into)).unwrap_err();
        assert!(err.is_not_found());
        assert!(into.is_none());
    }

    #[test]
    fn test_get_into_type_mismatch_names_both_types() {
        let api = Api::default();
        api.store_value("cfg", Config {
            api_key: RwLock::new(String::new()),
        });

        let mut into: Arc<i32> = Arc::new(0);
        let err = api.get_into("cfg", Some(&mut into)).unwrap_err();

        assert!(err.is_invalid_type());
        let message = err.to_string();
        assert!(message.contains("Config"), "{message}");
        assert!(message.contains("alloc::sync::Arc<i32>"), "{message}");
        assert_eq!(*into, 0);
    }

    #[test]
    fn test_contains_and_keys() {
        let api = Api::default();
        assert!(!api.contains("a"));

        api.store_value("a", 1u8);
        api.store_value("b", 2u8);

        assert!(api.contains("a"));
        let mut keys = api.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_clear() {
        let api = Api::default();
        api.store_value("a", 1u8);
        api.store_value("b", 2u8);

        api.clear();

        assert!(api.is_empty());
        assert!(api.get("a").is_err());
    }

    #[test]
    fn test_trace_events_in_order() {
        let api = Api::default();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        api.set_trace_callback(move |event| sink.lock().push(event.clone()));

        api.store_value("k", 1u8);
        api.store_value("k", 2u8);
        let _ = api.get("k");
        let mut into: Option<Arc<u16>> = None;
        let _ = api.get_into("k", Some(&mut into));
        api.delete("k");
        api.delete("k");

        let events = events.lock();
        assert_eq!(
            *events,
            vec![
                RegistryEvent::Store {
                    key: "k".into(),
                    type_name: "alloc::sync::Arc<u8>",
                    replaced: false,
                },
                RegistryEvent::Store {
                    key: "k".into(),
                    type_name: "alloc::sync::Arc<u8>",
                    replaced: true,
                },
                RegistryEvent::Get {
                    key: "k".into(),
                    found: true,
                },
                RegistryEvent::Get {
                    key: "k".into(),
                    found: true,
                },
                RegistryEvent::GetInto {
                    key: "k".into(),
                    target: "core::option::Option<alloc::sync::Arc<u16>>",
                    ok: false,
                },
                RegistryEvent::Delete {
                    key: "k".into(),
                    existed: true,
                },
                RegistryEvent::Delete {
                    key: "k".into(),
                    existed: false,
                },
            ]
        );
    }

    #[test]
    fn test_trace_callback_may_reenter() {
        let api = Arc::new(Api::default());
        let seen = Arc::new(Mutex::new(HashMap::new()));

        let weak = Arc::downgrade(&api);
        let sink = seen.clone();
        api.set_trace_callback(move |event| {
            if let (RegistryEvent::Store { key, .. }, Some(api)) = (event, weak.upgrade()) {
                sink.lock().insert(key.clone(), api.contains(key));
            }
        });

        api.store_value("reentrant", 1u8);

        assert_eq!(seen.lock().get("reentrant"), Some(&true));
        api.clear_trace_callback();
    }
}
