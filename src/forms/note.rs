use serde::Deserialize;
use validator::Validate;

use crate::domain::note::{NewNote, Note, NoteTarget, NoteTargetKind};
use crate::domain::types::NoteBody;
use crate::forms::{EntityForm, FormError};

#[derive(Debug, Deserialize, Validate)]
/// Form data for attaching a note to a client, mandate or candidate.
pub struct NewNoteForm {
    pub entity_type: NoteTargetKind,
    pub entity_id: i32,
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
}

impl TryFrom<NewNoteForm> for NewNote {
    type Error = FormError;

    fn try_from(form: NewNoteForm) -> Result<Self, Self::Error> {
        let target =
            NoteTarget::new(form.entity_type, form.entity_id).map_err(|_| FormError::InvalidId)?;
        let body = NoteBody::new(form.body).map_err(|e| FormError::InvalidValue(e.to_string()))?;

        Ok(Self {
            target,
            body,
            author: None,
        })
    }
}

/// The author is filled in by the note service from the operator session.
impl EntityForm for NewNoteForm {
    type Entity = Note;

    fn into_new(self) -> Result<NewNote, FormError> {
        self.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_sanitized() {
        let form: NewNoteForm = serde_json::from_str(
            r#"{"entity_type":"candidat","entity_id":9,"body":"Relancer <script>x</script>lundi"}"#,
        )
        .unwrap();
        let new = form.into_new().unwrap();
        assert_eq!(new.body.as_str(), "Relancer lundi");
        assert_eq!(new.target.raw_id(), 9);
        assert!(new.author.is_none());
    }

    #[test]
    fn markup_only_body_is_rejected() {
        let form = NewNoteForm {
            entity_type: NoteTargetKind::Client,
            entity_id: 1,
            body: "<script>alert(1)</script>".to_string(),
        };
        assert!(form.validate().is_ok());
        assert!(matches!(
            NewNote::try_from(form),
            Err(FormError::InvalidValue(_))
        ));
    }
}
