//! State of the settings page, independent of any UI toolkit.

use crate::models::{Channel, Settings, UserId};
use crate::session::Session;
use crate::users::LoginOutcome;

/// Text shown in the result pane while an AI action is running.
pub const AI_LOADING_PLACEHOLDER: &str = "Loading...";

/// The AI result pane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AiPane {
    #[default]
    Idle,
    Loading,
    Ready(String),
}

impl AiPane {
    pub fn text(&self) -> &str {
        match self {
            AiPane::Idle => "",
            AiPane::Loading => AI_LOADING_PLACEHOLDER,
            AiPane::Ready(text) => text,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AiPane::Loading)
    }
}

/// Feedback for the last save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Unsaved,
    Saved,
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageState {
    /// Contents of the login name field.
    pub name: String,
    pub session: Session,
    pub channels: Vec<Channel>,
    pub settings: Settings,
    pub prompt: String,
    pub ai: AiPane,
    pub save_status: SaveStatus,
}

impl PageState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.session.user()
    }

    /// Enter the logged-in state and pre-fill the stored preferences.
    pub fn apply_login(&mut self, outcome: LoginOutcome) {
        if let Some(record) = &outcome.record {
            self.settings.overlay_stored(record);
        }
        self.session = Session::LoggedIn(outcome.user);
    }

    /// Replace the channel list wholesale.
    pub fn replace_channels(&mut self, channels: Vec<Channel>) {
        self.channels = channels;
    }

    /// Take a channel list fetched for `user`. A list that arrives after the
    /// page moved on to someone else is dropped; returns whether it was kept.
    pub fn accept_channels(&mut self, user: &UserId, channels: Vec<Channel>) -> bool {
        if self.user() != Some(user) {
            tracing::debug!(user = %user, "Dropping channel list for a user no longer shown");
            return false;
        }
        self.replace_channels(channels);
        true
    }

    pub fn select_channel(&mut self, channel_id: String) {
        self.settings.channel_id = channel_id;
        self.save_status = SaveStatus::Unsaved;
    }

    pub fn set_message_format(&mut self, message_format: String) {
        self.settings.message_format = message_format;
        self.save_status = SaveStatus::Unsaved;
    }

    /// Show the loading placeholder and hand back what to send, or `None`
    /// when logged out.
    pub fn begin_ai(&mut self) -> Option<(UserId, String)> {
        let user = self.session.user()?.clone();
        self.ai = AiPane::Loading;
        Some((user, self.prompt.clone()))
    }

    pub fn finish_ai(&mut self, text: String) {
        self.ai = AiPane::Ready(text);
    }

    /// Name of the channel currently selected, if it is in the list.
    pub fn selected_channel(&self) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|c| c.id == self.settings.channel_id)
    }
}

/// Decides when the channel list must be fetched: once for every distinct
/// logged-in user.
#[derive(Clone, Debug, Default)]
pub struct ChannelSync {
    last: Option<UserId>,
}

impl ChannelSync {
    pub fn should_fetch(&mut self, session: &Session) -> Option<UserId> {
        let user = session.user()?;
        if self.last.as_ref() == Some(user) {
            return None;
        }
        self.last = Some(user.clone());
        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{run_ai_action, sync_channels, AiResponse};
    use crate::memory::{BackendCall, MemoryBackend, MemoryStore};
    use crate::models::UserRecord;
    use crate::users::login;

    fn channel(id: &str, name: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_prefills_stored_settings() {
        let store = MemoryStore::with_users([UserRecord {
            name: "ada".to_string(),
            channel_id: Some("C9".to_string()),
            message_format: Some("Meeting booked".to_string()),
        }]);
        let mut page = PageState::new(Session::from_query(""));
        page.name = "ada".to_string();
        assert!(!page.session.is_logged_in());

        let outcome = login(&store, &page.name).await.unwrap();
        page.apply_login(outcome);

        assert_eq!(page.user().map(UserId::as_str), Some("ada"));
        assert_eq!(page.settings.channel_id, "C9");
        assert_eq!(page.settings.message_format, "Meeting booked");
    }

    #[tokio::test]
    async fn test_late_channel_list_for_previous_user_is_dropped() {
        let mut page = PageState::new(Session::from_query("ada"));
        let ada = page.user().cloned().unwrap();
        let backend = MemoryBackend::new().with_channels(vec![channel("A1", "ada-only")]);
        let pending = sync_channels(&backend, &ada).await.unwrap();

        // The page switched users before the answer for ada came back.
        page.apply_login(LoginOutcome {
            user: UserId::parse("bob").unwrap(),
            record: None,
        });
        page.replace_channels(vec![channel("B1", "bob-only")]);

        assert!(!page.accept_channels(&ada, pending));
        assert_eq!(page.channels, vec![channel("B1", "bob-only")]);

        let bob = UserId::parse("bob").unwrap();
        assert!(page.accept_channels(&bob, vec![channel("B2", "general")]));
        assert_eq!(page.channels, vec![channel("B2", "general")]);
    }

    #[test]
    fn test_logged_out_page_accepts_nothing() {
        let mut page = PageState::default();
        let ada = UserId::parse("ada").unwrap();

        assert!(page.user().is_none());
        assert!(!page.accept_channels(&ada, vec![channel("C1", "general")]));
        assert!(page.channels.is_empty());
        assert!(page.begin_ai().is_none());
    }

    #[test]
    fn test_query_param_starts_logged_in() {
        let page = PageState::new(Session::from_query("grace"));
        assert_eq!(page.user().map(UserId::as_str), Some("grace"));
        assert_eq!(page.settings, Settings::default());
    }

    #[tokio::test]
    async fn test_one_fetch_per_user_change_replaces_list() {
        let mut sync = ChannelSync::default();
        let mut page = PageState::new(Session::LoggedOut);
        page.replace_channels(vec![channel("OLD", "stale")]);

        assert!(sync.should_fetch(&page.session).is_none());

        page.session = Session::from_query("ada");
        let backend = MemoryBackend::new().with_channels(vec![channel("C1", "general")]);
        let user = sync.should_fetch(&page.session).unwrap();
        if let Some(channels) = sync_channels(&backend, &user).await {
            page.replace_channels(channels);
        }
        assert_eq!(page.channels, vec![channel("C1", "general")]);

        // Same user again: no second fetch.
        assert!(sync.should_fetch(&page.session).is_none());
        assert_eq!(backend.calls().len(), 1);

        page.session = Session::from_query("bob");
        assert_eq!(sync.should_fetch(&page.session).unwrap().as_str(), "bob");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_current_list() {
        let mut page = PageState::new(Session::from_query("ada"));
        page.replace_channels(vec![channel("C1", "general")]);
        let backend = MemoryBackend::new();
        backend.fail_next("boom");

        if let Some(channels) = sync_channels(&backend, page.user().unwrap()).await {
            page.replace_channels(channels);
        }

        assert_eq!(page.channels, vec![channel("C1", "general")]);
    }

    #[tokio::test]
    async fn test_ai_shows_placeholder_then_result() {
        let backend = MemoryBackend::new().with_ai_response(AiResponse {
            status: 422,
            body: serde_json::json!({"detail": "prompt missing"}),
        });
        let mut page = PageState::new(Session::from_query("ada"));
        page.prompt = "summarise".to_string();

        let (user, prompt) = page.begin_ai().unwrap();
        assert_eq!(page.ai.text(), AI_LOADING_PLACEHOLDER);
        assert!(page.ai.is_loading());

        let text = run_ai_action(&backend, &user, &prompt).await;
        page.finish_ai(text);

        assert_eq!(page.ai, AiPane::Ready("{\n  \"detail\": \"prompt missing\"\n}".to_string()));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::AiAction("ada".to_string(), "summarise".to_string())]
        );
    }

    #[test]
    fn test_ai_requires_login() {
        let mut page = PageState::default();
        assert!(page.begin_ai().is_none());
        assert_eq!(page.ai, AiPane::Idle);
    }

    #[test]
    fn test_editing_resets_save_status() {
        let mut page = PageState::new(Session::from_query("ada"));
        page.replace_channels(vec![channel("C1", "general"), channel("C2", "random")]);
        page.save_status = SaveStatus::Saved;

        page.select_channel("C2".to_string());

        assert_eq!(page.save_status, SaveStatus::Unsaved);
        assert_eq!(page.selected_channel().map(|c| c.name.as_str()), Some("random"));
    }
}
