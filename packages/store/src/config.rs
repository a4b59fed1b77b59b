//! # Backend configuration
//!
//! Describes where the backend API lives and which OAuth-start routes it
//! serves. The server reads it from the environment (see `api::config`),
//! over an optional TOML file named by `BACKEND_CONFIG`:
//!
//! ```toml
//! [backend]
//! base_url = "https://backend.example.com"
//! oauth_routes = "generic"   # or "per-tool"
//! ```
//!
//! A missing `oauth_routes` key means the generic `/api/tool_oauth_start`
//! route. `base_url` has no default.

use serde::{Deserialize, Serialize};

use crate::tool::OAuthRoutes;

/// Top-level configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API, without the `/api` prefix.
    pub base_url: String,
    #[serde(default)]
    pub oauth_routes: OAuthRoutes,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            oauth_routes: OAuthRoutes::default(),
        }
    }

    /// Builder method to pick the OAuth route style.
    pub fn with_oauth_routes(mut self, routes: OAuthRoutes) -> Self {
        self.oauth_routes = routes;
        self
    }
}

impl AppConfig {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_routes_default_to_generic() {
        let config = AppConfig::from_toml(
            r#"
            [backend]
            base_url = "https://backend.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://backend.example.com");
        assert_eq!(config.backend.oauth_routes, OAuthRoutes::Generic);
    }

    #[test]
    fn test_per_tool_routes_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [backend]
            base_url = "http://localhost:8000"
            oauth_routes = "per-tool"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.oauth_routes, OAuthRoutes::PerTool);
    }

    #[test]
    fn test_base_url_is_required() {
        assert!(AppConfig::from_toml("[backend]\n").is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = AppConfig {
            backend: BackendConfig::new("http://localhost:8000")
                .with_oauth_routes(OAuthRoutes::PerTool),
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("oauth_routes = \"per-tool\""));
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
