//! HTTP failure taxonomy and client-facing error envelopes.
//!
//! Purpose: give every failure that reaches the HTTP boundary one tagged
//! shape, [`ApiError`], so the responder chain can pattern-match on it
//! instead of probing for fields. Domain errors, gate rejections and
//! framework errors are all lifted into this type.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::responder::{TracingDiagnosticLog, respond};
use crate::inbound::http::validation::ValidationFailure;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Envelope for failures with a declared status.
///
/// Example JSON:
/// `{"statusCode":404,"error":"Not Found","message":"Product not found"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ErrorEnvelope {
    /// HTTP status code, repeated in the body.
    #[schema(example = 404)]
    pub status_code: u16,
    /// Canonical reason phrase for the status.
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable explanation.
    #[schema(example = "Product not found")]
    pub message: String,
}

/// Envelope for failures without a declared status; always sent with 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FallbackEnvelope {
    #[schema(example = "Internal Server Error")]
    pub message: String,
}

/// Failure that knows its client-facing meaning.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use store_backend::inbound::http::error::HttpProblem;
///
/// let problem = HttpProblem::not_found("Product not found");
/// assert_eq!(problem.status(), StatusCode::NOT_FOUND);
/// assert_eq!(problem.error(), "Not Found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProblem {
    status: StatusCode,
    error: String,
    message: String,
}

impl HttpProblem {
    /// Problem labelled with the status' canonical reason phrase.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let label = status.canonical_reason().unwrap_or("Unknown Status");
        Self::with_label(status, label, message)
    }

    /// Problem with an explicit label.
    pub fn with_label(
        status: StatusCode,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Short label, e.g. `Not Found`.
    pub fn error(&self) -> &str {
        self.error.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Body sent to the client.
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            status_code: self.status.as_u16(),
            error: self.error.clone(),
            message: self.message.clone(),
        }
    }
}

/// Every failure the HTTP layer can answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A validation gate rejected a request part. Answered as 400.
    Validation(ValidationFailure),
    /// A failure carrying its own status, label and message.
    Typed(HttpProblem),
    /// A failure of unknown origin. Answered as 500 with its message.
    Unclassified { message: String },
}

impl ApiError {
    /// Untyped failure carrying only a message.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    /// The typed view of this failure, if it has one.
    ///
    /// Validation failures are typed as `400 Bad Request` with the joined
    /// violation messages.
    pub fn problem(&self) -> Option<HttpProblem> {
        match self {
            Self::Validation(failure) => Some(HttpProblem::bad_request(failure.summary())),
            Self::Typed(problem) => Some(problem.clone()),
            Self::Unclassified { .. } => None,
        }
    }

    /// Status the responder chain will answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Typed(problem) => problem.status(),
            Self::Unclassified { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(failure) => write!(f, "{failure}"),
            Self::Typed(problem) => f.write_str(problem.message()),
            Self::Unclassified { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationFailure> for ApiError {
    fn from(value: ValidationFailure) -> Self {
        Self::Validation(value)
    }
}

impl From<HttpProblem> for ApiError {
    fn from(value: HttpProblem) -> Self {
        Self::Typed(value)
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        let status = match value.code() {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => return Self::unclassified(value.message()),
        };
        Self::Typed(HttpProblem::new(status, value.message()))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        respond(self, &TracingDiagnosticLog)
    }
}

#[cfg(test)]
mod tests;
