//! # Backend API seam
//!
//! The backend owns the Slack channel listing, the OAuth flows for every
//! [`Tool`] and the AI action. [`Backend`] abstracts it so the page logic in
//! this module runs unchanged against:
//!
//! - `api::backend::HttpBackend` (server side, talks HTTP to the backend),
//! - `ui::ApiBackend` (browser side, goes through the server functions),
//! - [`crate::MemoryBackend`] (tests).
//!
//! | Operation | On failure |
//! |-----------|------------|
//! | [`sync_channels`] | logged, returns `None` so the current list is kept |
//! | [`connect_tool`] | logged, no navigation |
//! | [`run_ai_action`] | error rendered as `{"error": ...}` in the result pane |

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::models::{Channel, UserId};
use crate::tool::Tool;

/// Async access to the backend API.
pub trait Backend {
    fn list_channels(&self, user: &UserId) -> impl Future<Output = Result<Vec<Channel>>>;

    fn start_oauth(&self, user: &UserId, tool: Tool) -> impl Future<Output = Result<OAuthStart>>;

    fn run_ai_action(
        &self,
        user: &UserId,
        prompt: &str,
    ) -> impl Future<Output = Result<AiResponse>>;
}

/// Where the page should go to continue an OAuth flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthStart {
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Raw answer of the AI endpoint. Error statuses are kept, not raised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub status: u16,
    pub body: Value,
}

impl AiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Pretty-printed JSON body.
    pub fn pretty(&self) -> String {
        pretty_json(&self.body)
    }
}

/// Full-page navigation.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// Fetch the channels offered to `user`. Errors are swallowed.
pub async fn sync_channels<B: Backend>(backend: &B, user: &UserId) -> Option<Vec<Channel>> {
    match backend.list_channels(user).await {
        Ok(channels) => {
            tracing::debug!(user = %user, count = channels.len(), "Fetched channels");
            Some(channels)
        }
        Err(e) => {
            tracing::warn!(user = %user, "Failed to fetch channels: {}", e);
            None
        }
    }
}

/// Navigate to the redirect carried by `start`, if any. Returns whether a
/// navigation happened.
pub fn follow_redirect<N: Navigator>(start: &OAuthStart, navigator: &N) -> bool {
    match start.redirect_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => {
            navigator.navigate(url);
            true
        }
        None => false,
    }
}

/// Begin linking `tool` for `user` and hand the browser over to the
/// provider. Returns whether a navigation happened.
pub async fn connect_tool<B: Backend, N: Navigator>(
    backend: &B,
    navigator: &N,
    user: &UserId,
    tool: Tool,
) -> bool {
    match backend.start_oauth(user, tool).await {
        Ok(start) => {
            let navigated = follow_redirect(&start, navigator);
            if navigated {
                tracing::info!(user = %user, tool = %tool, "Redirecting to OAuth provider");
            } else {
                tracing::warn!(user = %user, tool = %tool, "OAuth start returned no redirect_url");
            }
            navigated
        }
        Err(e) => {
            tracing::warn!(user = %user, tool = %tool, "Failed to start OAuth: {}", e);
            false
        }
    }
}

/// Run a prompt and return the text for the result pane: the pretty JSON
/// body whatever the status.
pub async fn run_ai_action<B: Backend>(backend: &B, user: &UserId, prompt: &str) -> String {
    match backend.run_ai_action(user, prompt).await {
        Ok(response) => {
            if !response.is_success() {
                tracing::warn!(user = %user, status = response.status, "AI action returned an error status");
            }
            response.pretty()
        }
        Err(e) => {
            tracing::warn!(user = %user, "AI action failed: {}", e);
            pretty_json(&serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::StoreError;
    use crate::memory::{BackendCall, MemoryBackend, RecordingNavigator};

    fn ada() -> UserId {
        UserId::parse("ada").unwrap()
    }

    #[tokio::test]
    async fn test_sync_channels_returns_backend_list() {
        let backend = MemoryBackend::new().with_channels(vec![Channel {
            id: "C1".to_string(),
            name: "general".to_string(),
        }]);

        let channels = sync_channels(&backend, &ada()).await.unwrap();

        assert_eq!(channels.len(), 1);
        assert_eq!(backend.calls(), vec![BackendCall::ListChannels("ada".to_string())]);
    }

    #[tokio::test]
    async fn test_sync_channels_swallows_errors() {
        let backend = MemoryBackend::new();
        backend.fail_next("502 Bad Gateway");

        assert!(sync_channels(&backend, &ada()).await.is_none());
    }

    #[tokio::test]
    async fn test_connect_navigates_to_redirect() {
        let backend = MemoryBackend::new().with_redirect(Tool::Notion, "https://notion.example/auth");
        let navigator = RecordingNavigator::default();

        assert!(connect_tool(&backend, &navigator, &ada(), Tool::Notion).await);

        assert_eq!(navigator.visited(), vec!["https://notion.example/auth".to_string()]);
        assert_eq!(
            backend.calls(),
            vec![BackendCall::StartOAuth("ada".to_string(), Tool::Notion)]
        );
    }

    #[tokio::test]
    async fn test_connect_without_redirect_does_not_navigate() {
        let backend = MemoryBackend::new();
        let navigator = RecordingNavigator::default();

        assert!(!connect_tool(&backend, &navigator, &ada(), Tool::Slack).await);
        assert!(navigator.visited().is_empty());

        backend.fail_next("timeout");
        assert!(!connect_tool(&backend, &navigator, &ada(), Tool::Slack).await);
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn test_empty_redirect_is_ignored() {
        let navigator = RecordingNavigator::default();
        let start = OAuthStart {
            redirect_url: Some(String::new()),
        };
        assert!(!follow_redirect(&start, &navigator));
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn test_oauth_start_without_field_deserializes() {
        let start: OAuthStart = serde_json::from_str(r#"{"detail":"Not Found"}"#).unwrap();
        assert_eq!(start, OAuthStart::default());
    }

    #[tokio::test]
    async fn test_ai_result_is_pretty_json_for_success_and_error() {
        let backend = MemoryBackend::new().with_ai_response(AiResponse {
            status: 200,
            body: json!({"result": "done"}),
        });
        let text = run_ai_action(&backend, &ada(), "add a contact").await;
        assert_eq!(text, "{\n  \"result\": \"done\"\n}");
        assert_eq!(
            backend.calls(),
            vec![BackendCall::AiAction("ada".to_string(), "add a contact".to_string())]
        );

        let backend = MemoryBackend::new().with_ai_response(AiResponse {
            status: 500,
            body: json!({"detail": "Internal Server Error"}),
        });
        let text = run_ai_action(&backend, &ada(), "add a contact").await;
        assert_eq!(text, "{\n  \"detail\": \"Internal Server Error\"\n}");
    }

    #[tokio::test]
    async fn test_ai_transport_error_is_rendered() {
        let backend = MemoryBackend::new();
        backend.fail_next("connection refused");

        let text = run_ai_action(&backend, &ada(), "hi").await;

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed["error"],
            json!(StoreError::Backend("connection refused".to_string()).to_string())
        );
    }
}
