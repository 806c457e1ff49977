//! Type-erased shared references held by the registry.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// An opaque, shared reference to a stored singleton.
///
/// Cloning an `Instance` clones the handle, not the pointee: every clone and
/// every `Arc<T>` obtained from it points at the same allocation the caller
/// originally stored.
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    pub fn new<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Instance {
            value,
            type_name: type_name::<Arc<T>>(),
        }
    }

    /// Type name of the stored reference, e.g. `alloc::sync::Arc<my_app::Config>`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the stored pointee is exactly `T`.
    pub fn is<T: Any>(&self) -> bool {
        (*self.value).is::<T>()
    }

    /// Returns a new handle to the stored pointee if it is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Returns `true` if both handles refer to the same allocation.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        std::ptr::eq(self.data_ptr(), other.data_ptr())
    }

    /// Returns `true` if this handle refers to the allocation behind `value`.
    pub fn points_to<T: ?Sized>(&self, value: &Arc<T>) -> bool {
        std::ptr::eq(self.data_ptr(), Arc::as_ptr(value) as *const ())
    }

    fn data_ptr(&self) -> *const () {
        Arc::as_ptr(&self.value) as *const ()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("ptr", &self.data_ptr())
            .finish()
    }
}

impl<T: Any + Send + Sync> From<Arc<T>> for Instance {
    fn from(value: Arc<T>) -> Self {
        Instance::new(value)
    }
}
