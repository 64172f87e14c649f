use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::{ClientName, ClientStatus, ContactEmail, PhoneNumber, optional_text};
use crate::forms::{EntityForm, FormError};

#[derive(Debug, Deserialize, Validate)]
/// Form data for registering a client company.
pub struct NewClientForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 1024))]
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
}

impl TryFrom<NewClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: NewClientForm) -> Result<Self, Self::Error> {
        let name = ClientName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = optional_text(form.email)
            .map(ContactEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = optional_text(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            name,
            industry: optional_text(form.industry),
            email,
            phone,
            address: optional_text(form.address),
            status: form.status,
        })
    }
}

impl EntityForm for NewClientForm {
    type Entity = Client;

    fn into_new(self) -> Result<NewClient, FormError> {
        self.try_into()
    }
}
