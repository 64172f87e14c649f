use serde::Deserialize;
use validator::Validate;

use crate::domain::candidature::{Candidature, NewCandidature};
use crate::domain::types::{CandidatId, CandidatureStatus, MandatId};
use crate::forms::{EntityForm, FormError};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for submitting a candidate to a mandate.
///
/// Both sides of the application are optional in the payload so that an
/// incomplete selection is reported as a form error instead of a
/// deserialization failure.
pub struct NewCandidatureForm {
    pub candidat_id: Option<i32>,
    pub mandat_id: Option<i32>,
    pub status: Option<CandidatureStatus>,
}

impl TryFrom<NewCandidatureForm> for NewCandidature {
    type Error = FormError;

    fn try_from(form: NewCandidatureForm) -> Result<Self, Self::Error> {
        let candidat_id = form.candidat_id.ok_or(FormError::MissingCandidat)?;
        let mandat_id = form.mandat_id.ok_or(FormError::MissingMandat)?;

        Ok(Self {
            candidat_id: CandidatId::new(candidat_id).map_err(|_| FormError::MissingCandidat)?,
            mandat_id: MandatId::new(mandat_id).map_err(|_| FormError::MissingMandat)?,
            status: form.status,
        })
    }
}

impl EntityForm for NewCandidatureForm {
    type Entity = Candidature;

    fn into_new(self) -> Result<NewCandidature, FormError> {
        self.try_into()
    }
}
