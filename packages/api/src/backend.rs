//! # HTTP client for the backend API
//!
//! [`HttpBackend`] implements [`store::Backend`] over reqwest:
//!
//! | Call | Request |
//! |------|---------|
//! | channels | `GET /api/slack_channels?user_id=` |
//! | OAuth start | `GET /api/tool_oauth_start?user_id=&tool=` or the per-tool route, see [`store::OAuthRoutes`] |
//! | AI action | `POST /api/ai-action` with `{"user_id", "prompt"}` |
//!
//! Query values are percent-encoded. The AI endpoint's body is returned with
//! its status whatever that status is; a body that is not JSON is wrapped as a
//! JSON string.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use store::error::{Result, StoreError};
use store::{AiResponse, BackendConfig, Channel, OAuthStart, OAuthRoutes, Tool, UserId};
use tokio::sync::OnceCell;
use url::Url;

use crate::config::{self, ConfigError};

static BACKEND: OnceCell<HttpBackend> = OnceCell::const_new();

/// Get or initialize the process-wide backend client from the environment.
pub fn get_backend() -> std::result::Result<&'static HttpBackend, ConfigError> {
    if let Some(backend) = BACKEND.get() {
        return Ok(backend);
    }
    let backend = HttpBackend::new(config::backend_from_env()?)?;
    // A concurrent initialisation may have won; either instance is equivalent.
    let _ = BACKEND.set(backend);
    BACKEND.get().ok_or(ConfigError::Missing(config::BACKEND_BASE_URL))
}

#[derive(Debug, Serialize)]
struct AiRequest<'a> {
    user_id: &'a str,
    prompt: &'a str,
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    oauth_routes: OAuthRoutes,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> std::result::Result<Self, ConfigError> {
        Url::parse(&config.base_url).map_err(|e| ConfigError::Invalid {
            name: config::BACKEND_BASE_URL,
            message: e.to_string(),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            oauth_routes: config.oauth_routes,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| StoreError::Backend(format!("Invalid endpoint {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub fn channels_url(&self, user: &UserId) -> Result<Url> {
        self.endpoint("/api/slack_channels", &[("user_id", user.as_str())])
    }

    pub fn oauth_url(&self, user: &UserId, tool: Tool) -> Result<Url> {
        let path = self.oauth_routes.path_for(tool);
        match self.oauth_routes {
            OAuthRoutes::Generic => {
                self.endpoint(path, &[("user_id", user.as_str()), ("tool", tool.slug())])
            }
            OAuthRoutes::PerTool => self.endpoint(path, &[("user_id", user.as_str())]),
        }
    }

    pub fn ai_url(&self) -> Result<Url> {
        self.endpoint("/api/ai-action", &[])
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Parse a response body as JSON, falling back to a JSON string.
fn body_to_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

impl store::Backend for HttpBackend {
    async fn list_channels(&self, user: &UserId) -> Result<Vec<Channel>> {
        let url = self.channels_url(user)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        response.json::<Vec<Channel>>().await.map_err(transport)
    }

    async fn start_oauth(&self, user: &UserId, tool: Tool) -> Result<OAuthStart> {
        let url = self.oauth_url(user, tool)?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        let start = serde_json::from_str::<OAuthStart>(&text).unwrap_or_default();
        if start.redirect_url.is_none() {
            tracing::warn!(tool = %tool, status = status.as_u16(), "OAuth start without redirect_url");
        }
        Ok(start)
    }

    async fn run_ai_action(&self, user: &UserId, prompt: &str) -> Result<AiResponse> {
        let url = self.ai_url()?;
        let response = self
            .client
            .post(url)
            .json(&AiRequest {
                user_id: user.as_str(),
                prompt,
            })
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;

        Ok(AiResponse {
            status,
            body: body_to_json(&text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(routes: OAuthRoutes) -> HttpBackend {
        HttpBackend::new(BackendConfig::new("https://backend.example.com").with_oauth_routes(routes))
            .unwrap()
    }

    fn user(name: &str) -> UserId {
        UserId::parse(name).unwrap()
    }

    #[test]
    fn test_channels_url() {
        let url = backend(OAuthRoutes::Generic).channels_url(&user("ada")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/api/slack_channels?user_id=ada"
        );
    }

    #[test]
    fn test_user_id_is_percent_encoded() {
        let url = backend(OAuthRoutes::Generic)
            .channels_url(&user("ada lovelace&co"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/api/slack_channels?user_id=ada+lovelace%26co"
        );
    }

    #[test]
    fn test_generic_oauth_url_carries_tool() {
        let url = backend(OAuthRoutes::Generic)
            .oauth_url(&user("ada"), Tool::Hubspot)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/api/tool_oauth_start?user_id=ada&tool=hubspot"
        );
    }

    #[test]
    fn test_per_tool_oauth_urls() {
        let backend = backend(OAuthRoutes::PerTool);
        let calendly = backend.oauth_url(&user("ada"), Tool::Calendly).unwrap();
        assert_eq!(
            calendly.as_str(),
            "https://backend.example.com/api/oauth_start?user_id=ada"
        );
        let notion = backend.oauth_url(&user("ada"), Tool::Notion).unwrap();
        assert_eq!(
            notion.as_str(),
            "https://backend.example.com/api/notion_oauth_start?user_id=ada"
        );
    }

    #[test]
    fn test_ai_url_has_no_query() {
        let url = backend(OAuthRoutes::Generic).ai_url().unwrap();
        assert_eq!(url.as_str(), "https://backend.example.com/api/ai-action");
    }

    #[test]
    fn test_ai_request_body() {
        let body = serde_json::to_value(AiRequest {
            user_id: "ada",
            prompt: "Create a note",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"user_id": "ada", "prompt": "Create a note"}));
    }

    #[test]
    fn test_non_json_body_becomes_string() {
        assert_eq!(body_to_json(r#"{"ok":true}"#), serde_json::json!({"ok": true}));
        assert_eq!(
            body_to_json("Internal Server Error"),
            Value::String("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let backend = HttpBackend::new(BackendConfig::new("https://example.com/backend/")).unwrap();
        assert_eq!(
            backend.ai_url().unwrap().as_str(),
            "https://example.com/backend/api/ai-action"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpBackend::new(BackendConfig::new("not a url")).is_err());
    }
}
