//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use store_backend::inbound::http::state::HttpState;
use store_backend::middleware::AllowedOrigins;
use store_backend::settings::{SettingsError, StoreSettings};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origins: AllowedOrigins,
    pub(crate) state: Option<HttpState>,
}

impl ServerConfig {
    /// Construct a configuration binding `bind_addr` with default origins.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            allowed_origins: AllowedOrigins::default(),
            state: None,
        }
    }

    /// Derive the configuration from loaded settings.
    ///
    /// # Errors
    /// Propagates [`SettingsError`] when the bind address is invalid.
    pub fn from_settings(settings: &StoreSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?).with_allowed_origins(settings.allowed_origins()))
    }

    /// Replace the origin allow-list.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: AllowedOrigins) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Serve the given state instead of the seeded in-memory catalogue.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "used by tests to inject prepared catalogues")
    )]
    #[must_use]
    pub fn with_state(mut self, state: HttpState) -> Self {
        self.state = Some(state);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
