//! Writable slots accepted by `get_into`.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::{Instance, RegistryError};

/// A storage location `get_into` can write a stored reference through.
///
/// The assignment is checked at runtime: the stored pointee type must be the
/// slot's pointee type exactly. On mismatch the slot is left untouched.
pub trait Destination {
    /// Type name of the slot, used in mismatch errors and trace events.
    fn target_type_name(&self) -> &'static str;

    /// Writes `instance` into the slot, or reports why it cannot.
    fn assign(&mut self, instance: &Instance) -> Result<(), RegistryError>;
}

fn mismatch<D: Destination + ?Sized>(slot: &D, instance: &Instance) -> RegistryError {
    RegistryError::TypeMismatch {
        stored: instance.type_name(),
        target: slot.target_type_name(),
    }
}

impl<T: Any + Send + Sync> Destination for Arc<T> {
    fn target_type_name(&self) -> &'static str {
        type_name::<Arc<T>>()
    }

    fn assign(&mut self, instance: &Instance) -> Result<(), RegistryError> {
        let value = instance
            .downcast::<T>()
            .ok_or_else(|| mismatch(&*self, instance))?;
        *self = value;
        Ok(())
    }
}

/// `None` is the usual "not yet retrieved" state, like a nil pointer variable.
impl<T: Any + Send + Sync> Destination for Option<Arc<T>> {
    fn target_type_name(&self) -> &'static str {
        type_name::<Option<Arc<T>>>()
    }

    fn assign(&mut self, instance: &Instance) -> Result<(), RegistryError> {
        let value = instance
            .downcast::<T>()
            .ok_or_else(|| mismatch(&*self, instance))?;
        *self = Some(value);
        Ok(())
    }
}
