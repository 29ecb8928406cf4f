//! Server construction.

mod config;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use store_backend::app::build_app;
use store_backend::inbound::http::state::HttpState;

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        allowed_origins,
        state,
    } = config;
    let http_state = web::Data::new(state.unwrap_or_else(HttpState::in_memory));

    let server = HttpServer::new(move || build_app(http_state.clone(), allowed_origins.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "store API listening");
    Ok(server)
}
