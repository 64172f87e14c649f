use serde::Deserialize;
use validator::Validate;

use crate::domain::candidat::{Candidat, NewCandidat};
use crate::domain::types::{CandidatStatus, ContactEmail, PersonName, PhoneNumber, optional_text};
use crate::forms::{EntityForm, FormError};

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a candidate to the pool.
pub struct NewCandidatForm {
    #[validate(length(min = 1, max = 128))]
    pub first_name: String,
    #[validate(length(min = 1, max = 128))]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub current_position: Option<String>,
    pub status: Option<CandidatStatus>,
}

impl TryFrom<NewCandidatForm> for NewCandidat {
    type Error = FormError;

    fn try_from(form: NewCandidatForm) -> Result<Self, Self::Error> {
        let first_name = PersonName::new(form.first_name).map_err(|_| FormError::InvalidName)?;
        let last_name = PersonName::new(form.last_name).map_err(|_| FormError::InvalidName)?;
        let email = optional_text(form.email)
            .map(ContactEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = optional_text(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            first_name,
            last_name,
            email,
            phone,
            current_position: optional_text(form.current_position),
            status: form.status,
        })
    }
}

impl EntityForm for NewCandidatForm {
    type Entity = Candidat;

    fn into_new(self) -> Result<NewCandidat, FormError> {
        self.try_into()
    }
}
