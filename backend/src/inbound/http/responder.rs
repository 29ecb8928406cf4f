//! Terminal failure handling.
//!
//! Every [`ApiError`] is answered by the same ordered chain:
//!
//! 1. a [`DiagnosticLog`] records the failure exactly once;
//! 2. [`respond_typed`] answers failures that carry a status with
//!    `{statusCode, error, message}`;
//! 3. [`respond_fallback`] answers everything else with `500` and
//!    `{message}`.
//!
//! Stage 2 returns a [`Step`] so the hand-off to stage 3 is explicit.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tracing::{error, warn};

use crate::inbound::http::error::{ApiError, FallbackEnvelope};
use crate::middleware::trace::TraceId;

/// Message used when an unclassified failure carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Internal Server Error";

/// Sink for failure diagnostics.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticLog {
    /// Record a failure. Must not alter it.
    fn record(&self, failure: &ApiError);
}

/// [`DiagnosticLog`] writing to the `tracing` stream.
///
/// Client failures are logged at `warn`, server failures at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnosticLog;

impl DiagnosticLog for TracingDiagnosticLog {
    fn record(&self, failure: &ApiError) {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let status = failure.status().as_u16();
        match failure {
            ApiError::Validation(rejection) => warn!(
                trace_id = trace_id.as_deref(),
                status,
                kind = "validation",
                part = %rejection.part(),
                schema = rejection.schema(),
                detail = %rejection.summary(),
                "request rejected by validation gate"
            ),
            ApiError::Typed(problem) if problem.status().is_server_error() => error!(
                trace_id = trace_id.as_deref(),
                status,
                kind = "typed",
                detail = problem.message(),
                "request failed"
            ),
            ApiError::Typed(problem) => warn!(
                trace_id = trace_id.as_deref(),
                status,
                kind = "typed",
                detail = problem.message(),
                "request failed"
            ),
            ApiError::Unclassified { message } => error!(
                trace_id = trace_id.as_deref(),
                status,
                kind = "unclassified",
                detail = message.as_str(),
                "unhandled failure"
            ),
        }
    }
}

/// Outcome of a responder stage.
#[derive(Debug)]
pub enum Step<'a> {
    /// The stage declined; hand the failure to the next one.
    Continue(&'a ApiError),
    /// The stage produced the terminal response.
    Respond(HttpResponse),
}

/// Stage 2: answer failures with a declared status.
pub fn respond_typed(failure: &ApiError) -> Step<'_> {
    match failure.problem() {
        Some(problem) => Step::Respond(HttpResponse::build(problem.status()).json(problem.envelope())),
        None => Step::Continue(failure),
    }
}

/// Stage 3: answer anything with `500 Internal Server Error`.
pub fn respond_fallback(failure: &ApiError) -> HttpResponse {
    let message = match failure {
        ApiError::Unclassified { message } if !message.is_empty() => message.clone(),
        ApiError::Unclassified { .. } => DEFAULT_FAILURE_MESSAGE.to_owned(),
        other => other.to_string(),
    };
    HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(FallbackEnvelope { message })
}

/// Run the whole chain for one failure.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use store_backend::inbound::http::error::ApiError;
/// use store_backend::inbound::http::responder::{TracingDiagnosticLog, respond};
///
/// let response = respond(&ApiError::unclassified("boom"), &TracingDiagnosticLog);
/// assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
pub fn respond(failure: &ApiError, log: &dyn DiagnosticLog) -> HttpResponse {
    log.record(failure);
    match respond_typed(failure) {
        Step::Respond(response) => response,
        Step::Continue(failure) => respond_fallback(failure),
    }
}
