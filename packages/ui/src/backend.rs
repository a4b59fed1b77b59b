//! Browser-side implementations of the page seams.
//!
//! [`ApiBackend`] forwards every backend call to the server functions in the
//! `api` crate, so the page never talks to the backend API directly.
//! [`BrowserNavigator`] performs the full-page redirects that continue an
//! OAuth flow.

use store::error::{Result, StoreError};
use store::{AiResponse, Backend, Channel, Navigator, OAuthStart, Tool, UserId};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApiBackend;

fn server_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl Backend for ApiBackend {
    async fn list_channels(&self, user: &UserId) -> Result<Vec<Channel>> {
        api::list_channels(user.to_string())
            .await
            .map_err(server_error)
    }

    async fn start_oauth(&self, user: &UserId, tool: Tool) -> Result<OAuthStart> {
        api::start_oauth(user.to_string(), tool)
            .await
            .map_err(server_error)
    }

    async fn run_ai_action(&self, user: &UserId, prompt: &str) -> Result<AiResponse> {
        api::run_ai_action(user.to_string(), prompt.to_string())
            .await
            .map_err(server_error)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(url) {
                    tracing::error!("Failed to navigate to {}: {:?}", url, e);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::info!("Continue in a browser: {}", url);
        }
    }
}
