//! Application services: stateful hooks over the data gateway and the
//! request-level operations used by the HTTP routes.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod collection;
pub mod entities;
pub mod navigation;
pub mod note;
pub mod optimistic;
#[cfg(feature = "server")]
pub mod proxy;
pub mod workspace;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-supplied data was rejected before reaching the gateway.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("no operator is signed in")]
    Unauthorized,

    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Whether the failure stems from invalid input rather than the gateway.
    pub fn is_validation(&self) -> bool {
        match self {
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => true,
            ServiceError::Repository(err) => err.is_validation(),
            ServiceError::Unauthorized | ServiceError::NotFound => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound | ServiceError::Repository(RepositoryError::NotFound)
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
