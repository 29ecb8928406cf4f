//! Origin allow-list middleware.
//!
//! Requests without an `Origin` header pass untouched. Requests from a listed
//! origin pass and have the origin echoed in `Access-Control-Allow-Origin`;
//! their CORS preflights are answered directly with `204 No Content`. Any
//! other origin is refused with an unclassified `Not allowed` failure, which
//! the responder chain answers like every other failure.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::ResponseError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, HeaderMap, HeaderValue, ORIGIN,
    VARY,
};
use actix_web::HttpResponse;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::inbound::http::error::ApiError;

/// Message of the failure raised for refused origins.
pub const ORIGIN_NOT_ALLOWED: &str = "Not allowed";

/// Origins accepted when no list is configured.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:8000", "http://localhost:3000"];

const PREFLIGHT_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// Outcome of inspecting a request's `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginCheck {
    /// No `Origin` header was sent.
    Absent,
    /// The origin is listed; carries the value to echo back.
    Allowed(HeaderValue),
    /// The origin is not listed, repeated, or unreadable.
    Refused,
}

/// Immutable set of accepted origins, compared verbatim.
///
/// # Examples
/// ```
/// use actix_web::http::header::{HeaderMap, HeaderValue, ORIGIN};
/// use store_backend::middleware::origin::{AllowedOrigins, OriginCheck};
///
/// let origins = AllowedOrigins::default();
/// let mut headers = HeaderMap::new();
/// headers.insert(ORIGIN, HeaderValue::from_static("https://example.com"));
/// assert_eq!(origins.check(&headers), OriginCheck::Refused);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigins(Arc<[String]>);

impl AllowedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(origins.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Classify the `Origin` header(s) of a request.
    pub fn check(&self, headers: &HeaderMap) -> OriginCheck {
        let mut values = headers.get_all(ORIGIN);
        let Some(value) = values.next() else {
            return OriginCheck::Absent;
        };
        if values.next().is_some() {
            warn!("refused request carrying multiple Origin headers");
            return OriginCheck::Refused;
        }
        match value.to_str() {
            Ok(origin) if self.contains(origin) => OriginCheck::Allowed(value.clone()),
            Ok(origin) => {
                warn!(origin, "refused request from unlisted origin");
                OriginCheck::Refused
            }
            Err(error) => {
                warn!(%error, "refused request with unreadable Origin header");
                OriginCheck::Refused
            }
        }
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGINS)
    }
}

fn is_preflight(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

fn preflight_response(req: &ServiceRequest, origin: HeaderValue) -> HttpResponse {
    let mut response = HttpResponse::NoContent();
    response
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, origin))
        .insert_header((VARY, HeaderValue::from_static("Origin")))
        .insert_header((
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(PREFLIGHT_METHODS),
        ));
    if let Some(requested) = req.headers().get(ACCESS_CONTROL_REQUEST_HEADERS) {
        response.insert_header((ACCESS_CONTROL_ALLOW_HEADERS, requested.clone()));
    }
    response.finish()
}

/// Middleware enforcing an [`AllowedOrigins`] list.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use store_backend::middleware::{AllowedOrigins, OriginGuard};
///
/// let app = App::new().wrap(OriginGuard::new(AllowedOrigins::default()));
/// ```
#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: AllowedOrigins,
}

impl OriginGuard {
    pub fn new(allowed: AllowedOrigins) -> Self {
        Self { allowed }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OriginGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OriginGuardMiddleware {
            service,
            allowed: self.allowed.clone(),
        }))
    }
}

/// Service wrapper produced by [`OriginGuard`].
pub struct OriginGuardMiddleware<S> {
    service: S,
    allowed: AllowedOrigins,
}

impl<S, B> Service<ServiceRequest> for OriginGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.allowed.check(req.headers()) {
            OriginCheck::Absent => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            OriginCheck::Allowed(origin) if is_preflight(&req) => {
                let response = preflight_response(&req, origin);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
            OriginCheck::Allowed(origin) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                    headers.insert(VARY, HeaderValue::from_static("Origin"));
                    Ok(res.map_into_left_body())
                })
            }
            OriginCheck::Refused => Box::pin(async move {
                let failure = ApiError::unclassified(ORIGIN_NOT_ALLOWED);
                let response = failure.error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
