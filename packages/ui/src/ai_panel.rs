//! Prompt box and raw result pane for the backend's AI action.

use dioxus::prelude::*;
use store::PageState;

use crate::activity_log::{log_activity, use_activity_log, LogLevel, Operation};
use crate::backend::ApiBackend;
use crate::Icon;
use crate::icons::FaRobot;

#[component]
pub fn AiPanel(mut page: Signal<PageState>) -> Element {
    let mut log = use_activity_log();
    let loading = page.read().ai.is_loading();
    let result = page.read().ai.text().to_string();

    let handle_run = move |_| {
        let Some((user, prompt)) = page.write().begin_ai() else {
            return;
        };
        spawn(async move {
            let text = store::run_ai_action(&ApiBackend, &user, &prompt).await;
            page.write().finish_ai(text);
            log_activity(&mut log, Operation::Ai, LogLevel::Info, &format!("Ran \"{prompt}\""));
        });
    };

    rsx! {
        div {
            class: "settings-section ai-panel",
            h2 { "AI action" }
            textarea {
                rows: 3,
                placeholder: "e.g. Create a contact for Ada Lovelace in HubSpot",
                value: page.read().prompt.clone(),
                oninput: move |evt| page.write().prompt = evt.value(),
            }
            div {
                class: "form-actions",
                button {
                    class: "primary",
                    disabled: loading,
                    onclick: handle_run,
                    Icon { icon: FaRobot, width: 14, height: 14 }
                    span { if loading { "Running..." } else { "Run" } }
                }
            }
            if !result.is_empty() {
                pre { class: "ai-result", "{result}" }
            }
        }
    }
}
