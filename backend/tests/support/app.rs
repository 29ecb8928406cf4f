//! Shared application harness for HTTP integration tests.
//!
//! Uses the server's own app builder over a fresh seeded catalogue per
//! test.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, web};
use serde_json::Value;
use store_backend::app::build_app;
use store_backend::inbound::http::state::HttpState;
use store_backend::middleware::AllowedOrigins;

/// Application over a seeded in-memory catalogue with the default origins.
pub fn store_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    build_app(
        web::Data::new(HttpState::in_memory()),
        AllowedOrigins::default(),
    )
}

/// Assert `body` is the typed envelope for `status` with `message`.
pub fn assert_envelope(body: &Value, status: StatusCode, message: &str) {
    assert_eq!(body["statusCode"], Value::from(status.as_u16()));
    assert_eq!(
        body["error"],
        Value::from(status.canonical_reason().expect("reason phrase"))
    );
    assert_eq!(body["message"], Value::from(message));
    assert_eq!(body.as_object().map(|o| o.len()), Some(3), "exactly three fields");
}
