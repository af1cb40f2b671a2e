//! Service-level error type.

use pathway_core::DomainError;
use pathway_generator::GeneratorError;
use pathway_storage::StorageError;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Everything a service operation can fail with: a domain outcome the
/// caller should act on, or an infrastructure failure.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain outcome (not found, invalid state, conflict, ...)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage backend failure
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Generation backend failure
    #[error("generation failure: {0}")]
    Generator(#[from] GeneratorError),
}

impl ServiceError {
    /// The domain error, if this is a domain outcome.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}
