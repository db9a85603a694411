//! Portfolio pages.

use actix_web::{HttpResponse, http::header, web};
use tera::Context;

use super::render;
use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state.templates, "index.html.tera", &Context::new())
}

pub async fn demos(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state.templates, "demos.html.tera", &Context::new())
}

pub async fn contact(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state.templates, "contact.html.tera", &Context::new())
}

pub async fn about(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state.templates, "about.html.tera", &Context::new())
}

/// Error page showing the request's correlation id. Never cached.
///
/// GET /Error
pub async fn error(state: web::Data<AppState>, request_id: RequestId) -> AppResult<HttpResponse> {
    let mut context = Context::new();
    context.insert("request_id", request_id.as_str());

    let mut response = render(&state.templates, "error.html.tera", &context)?;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache, no-store, max-age=0"),
    );
    headers.insert(header::PRAGMA, header::HeaderValue::from_static("no-cache"));

    Ok(response)
}
