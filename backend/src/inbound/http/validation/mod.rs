//! Validation gates for inbound HTTP requests.
//!
//! A gate takes one request part (path parameters, query string, or JSON
//! body), checks it against a registered [`Schema`], and either hands the
//! handler a typed value or short-circuits with a [`ValidationFailure`].
//!
//! Gates are request extractors. Actix resolves handler arguments in
//! declaration order and stops at the first error, so declaring
//! `Validated<PathDto>` before `Validated<BodyDto>` means a bad path is
//! reported on its own and the body is never inspected. Gates never log;
//! the responder chain records the failure.
//!
//! ```text
//! request ─▶ Validated<A> ─▶ Validated<B> ─▶ handler
//!                 │               │
//!                 └───────┬───────┘
//!                         ▼
//!                 ApiError::Validation ─▶ responder chain
//! ```

mod registry;
mod schema;

pub use registry::{
    CATEGORY_CREATE, CATEGORY_IDENTIFY, CATEGORY_UPDATE, Operation, PRODUCT_CREATE,
    PRODUCT_IDENTIFY, PRODUCT_SEARCH, PRODUCT_UPDATE, Resource, schema_for,
};
pub use schema::{
    Constraint, FieldKind, FieldRule, Presence, ROOT_FIELD, Schema, Violation, ViolationCode,
};

use std::fmt;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, ready};
use serde::de::DeserializeOwned;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::inbound::http::error::ApiError;

/// Request part a gate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPart {
    Params,
    Query,
    Body,
}

impl RequestPart {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for RequestPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request part rejected by its schema, with every violation found.
///
/// ## Invariants
/// - `violations` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    part: RequestPart,
    schema: &'static str,
    violations: Vec<Violation>,
}

impl ValidationFailure {
    fn new(part: RequestPart, schema: &'static str, violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty(), "a failure carries at least one violation");
        Self {
            part,
            schema,
            violations,
        }
    }

    /// Failure for a part that could not be read as a JSON object at all.
    pub fn malformed(part: RequestPart, schema: &'static str, detail: impl fmt::Display) -> Self {
        Self::new(
            part,
            schema,
            vec![Violation::new(
                ROOT_FIELD,
                ViolationCode::MalformedInput,
                format!("\"{ROOT_FIELD}\" could not be parsed: {detail}"),
            )],
        )
    }

    pub fn part(&self) -> RequestPart {
        self.part
    }

    /// Name of the schema that rejected the part.
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation concerns `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }

    /// Client-facing summary: every violation message, `. `-separated.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(Violation::message)
            .collect::<Vec<_>>()
            .join(". ")
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationFailure {}

/// Validate one request part against `schema`.
///
/// Deterministic: the same input always yields the same outcome and the same
/// violations. Re-validating an accepted value accepts it again.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use store_backend::inbound::http::validation::{PRODUCT_IDENTIFY, RequestPart, validate};
///
/// let failure = validate(&PRODUCT_IDENTIFY, RequestPart::Params, &json!({ "id": -1 }))
///     .expect_err("negative ids are rejected");
/// assert!(failure.mentions("id"));
/// assert_eq!(failure.summary(), "\"id\" must be a positive number");
/// ```
pub fn validate(
    schema: &'static Schema,
    part: RequestPart,
    input: &Value,
) -> Result<Value, ValidationFailure> {
    schema
        .check(input)
        .map_err(|violations| ValidationFailure::new(part, schema.name(), violations))
}

/// Binds a handler input type to the request part and schema that gate it.
pub trait Gated: DeserializeOwned {
    /// Part of the request the value is read from.
    const PART: RequestPart;

    /// Schema the raw part must satisfy.
    fn schema() -> &'static Schema;
}

/// Extractor running the gate for `T` before the handler.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, get};
/// use store_backend::inbound::http::products::ProductPath;
/// use store_backend::inbound::http::validation::Validated;
///
/// #[get("/things/{id}")]
/// async fn show(path: Validated<ProductPath>) -> HttpResponse {
///     HttpResponse::Ok().body(path.into_inner().id.to_string())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Unwrap the validated value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

fn pass_gate<T: Gated>(raw: &Value) -> Result<Validated<T>, ApiError> {
    let schema = T::schema();
    let accepted = validate(schema, T::PART, raw)?;
    serde_json::from_value(accepted).map(Validated).map_err(|err| {
        ApiError::unclassified(format!(
            "{} accepted by {} does not fit the handler input: {err}",
            T::PART,
            schema.name()
        ))
    })
}

fn path_params(req: &HttpRequest) -> Value {
    let params: Map<String, Value> = req
        .match_info()
        .iter()
        .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
        .collect();
    Value::Object(params)
}

/// Collect the query string into an object. A repeated key becomes an array
/// of its values so the schema sees every occurrence.
fn query_params<T: Gated>(req: &HttpRequest) -> Result<Value, ApiError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map_err(|err| ValidationFailure::malformed(RequestPart::Query, T::schema().name(), err))?;
    let mut params = Map::new();
    for (name, value) in pairs.into_inner() {
        match params.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(Value::String(value));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(Value::String(value)),
                first => {
                    let earlier = first.take();
                    *first = Value::Array(vec![earlier, Value::String(value)]);
                }
            },
        }
    }
    Ok(Value::Object(params))
}

impl<T: Gated + 'static> FromRequest for Validated<T> {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match T::PART {
            RequestPart::Params => Box::pin(ready(pass_gate(&path_params(req)))),
            RequestPart::Query => {
                Box::pin(ready(query_params::<T>(req).and_then(|raw| pass_gate(&raw))))
            }
            RequestPart::Body => {
                let body = web::Json::<Value>::from_request(req, payload);
                Box::pin(async move {
                    let raw = body.await.map_err(|err| {
                        ValidationFailure::malformed(RequestPart::Body, T::schema().name(), err)
                    })?;
                    pass_gate(&raw)
                })
            }
        }
    }
}
