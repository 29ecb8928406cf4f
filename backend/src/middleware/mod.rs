//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler,
//! namely trace identifiers and the origin allow-list.

pub mod origin;
pub mod trace;

pub use origin::{AllowedOrigins, OriginGuard};
pub use trace::Trace;
