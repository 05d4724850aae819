use crate::ability::AbilityId;
use crate::domain::DomainId;
use crate::homie::HomieId;
use crate::soul::SoulId;

/// Alias for `Result<T, SfError>`.
pub type SfResult<T> = Result<T, SfError>;

/// Errors that can occur when manipulating the soul store.
#[derive(Debug, thiserror::Error)]
pub enum SfError {
    /// A required field was missing or malformed on a create operation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested soul ID does not exist in the store.
    #[error("soul not found: {0}")]
    SoulNotFound(SoulId),

    /// The requested homie ID does not exist in the store.
    #[error("homie not found: {0}")]
    HomieNotFound(HomieId),

    /// The requested domain ID does not exist in the store.
    #[error("domain not found: {0}")]
    DomainNotFound(DomainId),

    /// The requested ability ID does not exist in the store.
    #[error("ability not found: {0}")]
    AbilityNotFound(AbilityId),

    /// A create operation named a soul that does not exist.
    #[error("unknown soul reference: {0}")]
    UnknownSoulReference(SoulId),

    /// A create operation named a domain that does not exist.
    #[error("unknown domain reference: {0}")]
    UnknownDomainReference(DomainId),

    /// The operation is not valid in the entity's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
}
