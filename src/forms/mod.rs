//! Form definitions backing the JSON API.
//!
//! Forms carry raw operator input. They are validated with `validator` and
//! converted into the domain creation payloads before any repository call.

use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::entity::Entity;

pub mod candidat;
pub mod candidature;
pub mod client;
pub mod mandat;
pub mod note;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid identifier")]
    InvalidId,

    #[error("a candidate must be selected")]
    MissingCandidat,

    #[error("a mandate must be selected")]
    MissingMandat,

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Operator input that creates a record of [`EntityForm::Entity`].
pub trait EntityForm: Validate + DeserializeOwned {
    type Entity: Entity;

    /// Converts the validated input into the creation payload.
    fn into_new(self) -> Result<<Self::Entity as Entity>::New, FormError>;
}
