//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers gate their inputs with [`validation::Validated`] extractors and
//! return [`ApiResult`]; every failure is answered by the
//! [`responder`] chain.

pub mod categories;
pub mod error;
pub mod products;
pub mod responder;
pub mod routing;
pub mod state;
pub mod validation;

pub use error::{ApiError, ApiResult};
