//! HTTP surface of the back office.

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::dto::api::ErrorBody;
use crate::services::ServiceError;

pub mod entities;
pub mod note;
pub mod proxy;

/// Registers the `/api` scope and the JSON error handlers of its extractors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                .service(proxy::proxy_document)
                .service(web::scope("/v1").configure(entities::configure)),
        );
}

/// Maps a service failure to a JSON error response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorBody::new(err.to_string());
    if err.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else if err.is_validation() {
        HttpResponse::BadRequest().json(body)
    } else if matches!(err, ServiceError::Unauthorized) {
        HttpResponse::Unauthorized().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::NotFound().json(ErrorBody::new("record not found"));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::repository::errors::RepositoryError;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                ServiceError::Repository(RepositoryError::NotFound),
                StatusCode::NOT_FOUND,
            ),
            (ServiceError::Form("x".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::Repository(RepositoryError::ConstraintViolation("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ServiceError::Repository(RepositoryError::ConnectionError("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status, "{err}");
        }
    }
}
