use serde::Deserialize;
use validator::Validate;

use crate::domain::mandat::{Mandat, NewMandat};
use crate::domain::types::{ClientId, JobTitle, MandatStatus, optional_text};
use crate::forms::{EntityForm, FormError};

#[derive(Debug, Deserialize, Validate)]
/// Form data for opening a mandate for a client.
pub struct NewMandatForm {
    pub client_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub status: Option<MandatStatus>,
}

impl TryFrom<NewMandatForm> for NewMandat {
    type Error = FormError;

    fn try_from(form: NewMandatForm) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: ClientId::new(form.client_id).map_err(|_| FormError::InvalidId)?,
            title: JobTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
            description: optional_text(form.description),
            location: optional_text(form.location),
            status: form.status,
        })
    }
}

impl EntityForm for NewMandatForm {
    type Entity = Mandat;

    fn into_new(self) -> Result<NewMandat, FormError> {
        self.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_positive_client_id() {
        let form = NewMandatForm {
            client_id: 0,
            title: "Directeur financier".to_string(),
            description: None,
            location: Some(" Lyon ".to_string()),
            status: None,
        };
        assert!(matches!(NewMandat::try_from(form), Err(FormError::InvalidId)));
    }

    #[test]
    fn parses_status_from_json() {
        let form: NewMandatForm = serde_json::from_str(
            r#"{"client_id":3,"title":"Comptable","status":"en_cours"}"#,
        )
        .unwrap();
        let new = form.into_new().unwrap();
        assert_eq!(new.client_id.get(), 3);
        assert_eq!(new.status, Some(MandatStatus::EnCours));
        assert_eq!(new.location, None);
    }
}
