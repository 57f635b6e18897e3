//! Error types for Kinship Core

use crate::limits::ValidationError;
use crate::person::PersonKey;
use thiserror::Error;

/// Result type alias using Kinship's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kinship error types
///
/// Every variant is recoverable. A mutation that returns an error has left
/// the tree untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Person not found: {0}")]
    NotFound(PersonKey),

    #[error("Person already exists: {0}")]
    AlreadyExists(PersonKey),

    #[error("Already linked: {child} is already a child of {parent}")]
    AlreadyLinked { child: PersonKey, parent: PersonKey },

    #[error("{0} already has a mother")]
    AlreadyHasMother(PersonKey),

    #[error("{0} already has a father")]
    AlreadyHasFather(PersonKey),

    #[error("{0} already has a partner")]
    AlreadyPartnered(PersonKey),

    #[error("Not partnered: {first} and {second} are not married to each other")]
    NotPartnered { first: PersonKey, second: PersonKey },

    #[error("{person} is already recorded as a {role}")]
    RoleConflict { person: PersonKey, role: &'static str },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True when the error is a lookup failure rather than a rule violation
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
