use std::fmt;

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use singleton_store::RegistryEvent;
///
/// let event = RegistryEvent::Delete { key: "cfg".to_string(), existed: true };
/// assert_eq!(event.to_string(), "delete { key: cfg, existed: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A reference was stored.
    Store {
        key: String,
        /// Type name of the stored reference (e.g. `alloc::sync::Arc<i32>`).
        type_name: &'static str,
        /// Whether an existing entry was overwritten.
        replaced: bool,
    },

    /// A reference was looked up.
    Get { key: String, found: bool },

    /// A typed copy-out was attempted.
    GetInto {
        key: String,
        /// Type name of the destination slot.
        target: &'static str,
        ok: bool,
    },

    /// An entry was removed, or the removal was a no-op.
    Delete { key: String, existed: bool },

    /// A key existence check was performed.
    Contains { key: String, found: bool },

    /// The registry was cleared.
    Clear,
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Store {
                key,
                type_name,
                replaced,
            } => write!(
                f,
                "store {{ key: {key}, type_name: {type_name}, replaced: {replaced} }}"
            ),
            RegistryEvent::Get { key, found } => {
                write!(f, "get {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::GetInto { key, target, ok } => {
                write!(f, "get_into {{ key: {key}, target: {target}, ok: {ok} }}")
            }
            RegistryEvent::Delete { key, existed } => {
                write!(f, "delete {{ key: {key}, existed: {existed} }}")
            }
            RegistryEvent::Contains { key, found } => {
                write!(f, "contains {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Clear => write!(f, "Clearing the Registry"),
        }
    }
}
