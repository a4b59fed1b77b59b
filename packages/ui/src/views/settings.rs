//! # Settings page
//!
//! The whole application is this one page. It renders one of two states:
//!
//! - **Logged out** — only the [`LoginForm`].
//! - **Logged in** — connect buttons for every tool, the channel picker, the
//!   message template editor with its save button, and the [`AiPanel`].
//!
//! The page starts logged in when the router hands it a `user_id` query
//! value; the backend's OAuth callbacks send the browser back that way.
//!
//! Whenever the logged-in user changes, the channel list is fetched once and
//! replaces the previous list. A failed fetch leaves the list as it was.

use dioxus::prelude::*;
use store::{ChannelSync, PageState, SaveStatus, Session};

use crate::activity_log::{log_activity, use_activity_log, LogLevel, Operation};
use crate::activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
use crate::ai_panel::AiPanel;
use crate::backend::ApiBackend;
use crate::channel_picker::ChannelPicker;
use crate::connect_buttons::ConnectButtons;
use crate::icons::FaFloppyDisk;
use crate::login_form::LoginForm;
use crate::template_editor::TemplateEditor;
use crate::Icon;

#[component]
pub fn SettingsPage(
    /// Raw `user_id` query value; empty when absent.
    #[props(default = String::new())]
    user_id: String,
) -> Element {
    let mut page = use_signal(|| PageState::new(Session::from_query(&user_id)));
    let mut channel_sync = use_signal(ChannelSync::default);
    let mut log = use_activity_log();

    let session = use_memo(move || page.read().session.clone());

    use_effect(move || {
        let session = session();
        let Some(user) = channel_sync.write().should_fetch(&session) else {
            return;
        };
        spawn(async move {
            if let Some(channels) = store::sync_channels(&ApiBackend, &user).await {
                page.write().accept_channels(&user, channels);
            }
        });
    });

    let handle_save = move |_| {
        let Some(user) = page.read().user().cloned() else {
            return;
        };
        let settings = page.read().settings.clone();
        spawn(async move {
            match api::save_settings(user.to_string(), settings).await {
                Ok(()) => {
                    page.write().save_status = SaveStatus::Saved;
                    log_activity(&mut log, Operation::Save, LogLevel::Success, "Settings saved");
                }
                Err(e) => {
                    tracing::warn!(user = %user, "Failed to save settings: {}", e);
                    page.write().save_status = SaveStatus::Failed(e.to_string());
                    log_activity(
                        &mut log,
                        Operation::Save,
                        LogLevel::Error,
                        &format!("Save failed: {e}"),
                    );
                }
            }
        });
    };

    let Some(user) = session().user().cloned() else {
        return rsx! {
            main {
                class: "settings-page logged-out",
                h1 { "Sign in" }
                LoginForm { page }
                ActivityLogToggle {}
                ActivityLogPanel {}
            }
        };
    };

    let save_status = page.read().save_status.clone();

    rsx! {
        main {
            class: "settings-page",
            header {
                class: "settings-header",
                h1 { "Settings" }
                span { class: "settings-user", "{user}" }
                ActivityLogToggle {}
            }

            div {
                class: "settings-section",
                h2 { "Integrations" }
                ConnectButtons { user: user.clone() }
            }

            div {
                class: "settings-section",
                h2 { "Notifications" }
                ChannelPicker { page }
                TemplateEditor { page }
                div {
                    class: "form-actions",
                    button {
                        class: "primary",
                        onclick: handle_save,
                        Icon { icon: FaFloppyDisk, width: 14, height: 14 }
                        span { "Save Settings" }
                    }
                    {
                        match save_status {
                            SaveStatus::Unsaved => rsx! {},
                            SaveStatus::Saved => rsx! {
                                span { class: "save-status success", "Saved" }
                            },
                            SaveStatus::Failed(message) => rsx! {
                                span { class: "save-status error", "{message}" }
                            },
                        }
                    }
                }
            }

            AiPanel { page }
            ActivityLogPanel {}
        }
    }
}
