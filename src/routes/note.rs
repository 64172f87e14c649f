//! Note creation on behalf of the operator named in the request headers.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::session::{Operator, Session};
use crate::domain::types::{ContactEmail, PersonName};
use crate::forms::note::NewNoteForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::note as note_service;

pub const OPERATOR_NAME_HEADER: &str = "x-operator-name";
pub const OPERATOR_EMAIL_HEADER: &str = "x-operator-email";

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

/// Session of the operator identified by the request, signed out when the
/// headers are missing or invalid.
pub fn operator_session(req: &HttpRequest) -> Session {
    let name = header(req, OPERATOR_NAME_HEADER).and_then(|name| PersonName::new(name).ok());
    let email =
        header(req, OPERATOR_EMAIL_HEADER).and_then(|email| ContactEmail::new(email).ok());

    match name.zip(email) {
        Some((name, email)) => Session::signed_in(Operator { name, email }),
        None => Session::default(),
    }
}

pub async fn create_note(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    form: web::Json<NewNoteForm>,
) -> HttpResponse {
    let session = operator_session(&req);

    match note_service::add_note(repo.get_ref(), &session, form.into_inner()) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(err) => error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn session_requires_both_headers() {
        let req = TestRequest::default()
            .insert_header((OPERATOR_NAME_HEADER, "Camille"))
            .to_http_request();
        assert!(!operator_session(&req).is_signed_in());

        let req = TestRequest::default()
            .insert_header((OPERATOR_NAME_HEADER, "Camille"))
            .insert_header((OPERATOR_EMAIL_HEADER, "Camille@Cabinet.fr"))
            .to_http_request();
        let session = operator_session(&req);
        assert_eq!(
            session.operator().map(|op| op.email.as_str()),
            Some("camille@cabinet.fr")
        );
    }
}
