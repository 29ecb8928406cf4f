//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local collections seeded at start-up
//!
//! Adapters are thin translators; they contain no business logic.

pub mod memory;
