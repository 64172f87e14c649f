//! Notes written by the signed-in operator.

use validator::Validate;

use crate::domain::note::Note;
use crate::domain::session::Session;
use crate::forms::EntityForm;
use crate::forms::note::NewNoteForm;
use crate::repository::EntityWriter;
use crate::services::{ServiceError, ServiceResult};

/// Attaches a note authored by the session's operator.
pub fn add_note<R>(repo: &R, session: &Session, form: NewNoteForm) -> ServiceResult<Note>
where
    R: EntityWriter<Note> + ?Sized,
{
    let Some(operator) = session.operator() else {
        return Err(ServiceError::Unauthorized);
    };

    if let Err(err) = form.validate() {
        log::error!("Failed to validate note form: {err}");
        return Err(ServiceError::Form(err.to_string()));
    }

    let mut new = form.into_new()?;
    new.author = Some(operator.name.to_string());

    repo.create(&new).map_err(|err| {
        log::error!("Failed to add a note: {err}");
        err.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::note::{NoteTarget, NoteTargetKind};
    use crate::domain::session::Operator;
    use crate::domain::types::{ClientId, ContactEmail, PersonName};
    use crate::repository::test::InMemoryRepository;

    fn form(body: &str) -> NewNoteForm {
        NewNoteForm {
            entity_type: NoteTargetKind::Client,
            entity_id: 4,
            body: body.to_string(),
        }
    }

    fn session() -> Session {
        Session::signed_in(Operator {
            name: PersonName::new("Camille").unwrap(),
            email: ContactEmail::new("camille@cabinet.fr").unwrap(),
        })
    }

    #[test]
    fn note_is_authored_by_the_operator() {
        let repo = InMemoryRepository::<Note>::empty();

        let note = add_note(&repo, &session(), form("Premier contact positif")).unwrap();

        assert_eq!(note.author.as_deref(), Some("Camille"));
        assert_eq!(note.target, NoteTarget::Client(ClientId::new(4).unwrap()));
        assert_eq!(repo.rows().len(), 1);
    }

    #[test]
    fn signed_out_session_is_refused() {
        let repo = InMemoryRepository::<Note>::empty();
        let mut session = session();
        session.sign_out();

        let result = add_note(&repo, &session, form("Rappeler"));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert!(repo.rows().is_empty());
    }

    #[test]
    fn empty_body_is_a_form_error() {
        let repo = InMemoryRepository::<Note>::empty();
        let result = add_note(&repo, &session(), form(""));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
