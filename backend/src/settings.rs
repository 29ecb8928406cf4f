//! Server settings loaded via OrthoConfig.
//!
//! Values come from the command line, `STORE_*` environment variables, or a
//! configuration file, with defaults matching local development.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::AllowedOrigins;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Errors raised while turning loaded settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid host address {value:?}: {message}")]
    InvalidHost { value: String, message: String },
}

/// Settings controlling the HTTP listener and the origin allow-list.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STORE")]
pub struct StoreSettings {
    /// Interface to bind; defaults to every IPv4 interface.
    pub host: Option<String>,
    /// Port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Origins allowed to call the API; defaults to the local front-ends.
    pub allowed_origins: Option<Vec<String>>,
}

impl StoreSettings {
    /// Socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            None => DEFAULT_HOST,
            Some(value) => value.parse().map_err(|err: std::net::AddrParseError| {
                SettingsError::InvalidHost {
                    value: value.to_owned(),
                    message: err.to_string(),
                }
            })?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Configured origins, falling back to the defaults.
    pub fn allowed_origins(&self) -> AllowedOrigins {
        self.allowed_origins
            .as_ref()
            .map_or_else(AllowedOrigins::default, |origins| {
                AllowedOrigins::new(origins.iter().cloned())
            })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> StoreSettings {
        StoreSettings::load_from_iter([OsString::from("store-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("STORE_HOST", None::<String>),
            ("STORE_PORT", None::<String>),
            ("STORE_ALLOWED_ORIGINS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.port, 3000);
        assert_eq!(
            settings.bind_addr().expect("default host"),
            SocketAddr::from(([0, 0, 0, 0], 3000))
        );
        assert_eq!(settings.allowed_origins(), AllowedOrigins::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STORE_HOST", Some("127.0.0.1".to_owned())),
            ("STORE_PORT", Some("8080".to_owned())),
            ("STORE_ALLOWED_ORIGINS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid host"),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
    }

    #[rstest]
    fn unparseable_host_is_reported() {
        let settings = StoreSettings {
            host: Some("store.local".into()),
            port: 3000,
            allowed_origins: None,
        };
        let err = settings.bind_addr().expect_err("hostname is not an address");
        assert!(matches!(err, SettingsError::InvalidHost { ref value, .. } if value == "store.local"));
    }

    #[rstest]
    fn configured_origins_replace_the_defaults() {
        let settings = StoreSettings {
            host: None,
            port: 3000,
            allowed_origins: Some(vec!["https://shop.example".into()]),
        };
        let origins = settings.allowed_origins();
        assert!(origins.contains("https://shop.example"));
        assert!(!origins.contains("http://localhost:3000"));
    }
}
