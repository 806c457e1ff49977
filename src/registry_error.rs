use thiserror::Error;

/// Errors returned by registry lookups.
///
/// Every variant belongs to one of the two [`ErrorKind`]s. Callers that wrap
/// these errors with extra context should match on [`RegistryError::kind`]
/// rather than on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No entry is stored under the requested key.
    #[error("no singleton instance named '{key}'")]
    NotFound { key: String },

    /// `get_into` was called without a destination to write through.
    #[error("into must be a non-nil destination")]
    NullDestination,

    /// The stored reference cannot be written into the destination.
    #[error("type mismatch: cannot assign instance type {stored} to target type {target}")]
    TypeMismatch {
        stored: &'static str,
        target: &'static str,
    },
}

/// The two failure categories a caller is expected to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidType,
}

impl RegistryError {
    pub(crate) fn not_found(key: &str) -> Self {
        RegistryError::NotFound {
            key: key.to_owned(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::NullDestination | RegistryError::TypeMismatch { .. } => {
                ErrorKind::InvalidType
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_invalid_type(&self) -> bool {
        self.kind() == ErrorKind::InvalidType
    }
}
