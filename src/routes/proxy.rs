//! Document proxy used by the browser to display remote PDFs.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, post, web};

use crate::dto::api::ErrorBody;
use crate::services::proxy::{ProxyError, fetch_document, parse_proxy_request};

/// Fetch the document named by `{"url": "..."}` and return its bytes.
///
/// Status of a failed request:
/// * 400 when the body is not JSON, `url` is missing or not a string, or the
///   URL does not parse. A malformed URL is rejected here instead of being
///   reported as a 500 transport failure;
/// * the upstream status when the upstream answers with a failure;
/// * 500 when the upstream cannot be reached or its body cannot be read.
#[post("/proxy")]
pub async fn proxy_document(client: web::Data<reqwest::Client>, body: web::Bytes) -> HttpResponse {
    let url = match parse_proxy_request(&body) {
        Ok(url) => url,
        Err(err) => return proxy_error(&err),
    };

    match fetch_document(client.get_ref(), &url).await {
        Ok(document) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .body(document),
        Err(err) => proxy_error(&err),
    }
}

fn proxy_error(err: &ProxyError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorBody::new(err.to_string()))
}
