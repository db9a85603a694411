//! Correlation ids for requests.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use tracing::Instrument;
use uuid::Uuid;

use crate::middleware::error::AppError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id sent by the client or a proxy, if any.
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);
        ready(Ok(id))
    }
}

/// Assigns every request a [`RequestId`].
///
/// The id is echoed in `X-Request-ID`, recorded on a `request` span, and
/// written into the problem body of any [`AppError`] response together with
/// the request path.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = RequestId::from_headers(req.headers()).unwrap_or_else(RequestId::generate);
        let path = req.path().to_owned();
        req.extensions_mut().insert(id.clone());

        let span = tracing::info_span!("request", request_id = %id.as_str());
        let fut = span.in_scope(|| {
            tracing::debug!(%path, "Processing request");
            self.service.call(req)
        });

        Box::pin(
            async move {
                let res = fut.await?;
                let mut res = with_problem_context(res, &id, path);

                let header = HeaderValue::from_str(id.as_str())
                    .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), header);

                Ok(res)
            }
            .instrument(span),
        )
    }
}

/// Rebuild an [`AppError`] response so its body names the request.
fn with_problem_context<B>(
    res: ServiceResponse<B>,
    id: &RequestId,
    path: String,
) -> ServiceResponse<EitherBody<B>> {
    let failure = res
        .response()
        .error()
        .and_then(|err| err.as_error::<AppError>())
        .map(|err| (err.status_code(), err.problem()));

    match failure {
        Some((status, problem)) => {
            let body = problem.with_instance(path).with_request_id(id.as_str());
            res.into_response(HttpResponse::build(status).json(body))
                .map_into_right_body()
        }
        None => res.map_into_left_body(),
    }
}
