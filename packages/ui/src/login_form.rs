//! Name-only login shown while the page is logged out.

use dioxus::prelude::*;
use store::{LoginOutcome, PageState, UserId};

use crate::activity_log::{log_activity, use_activity_log, LogLevel, Operation};

#[component]
pub fn LoginForm(mut page: Signal<PageState>) -> Element {
    let mut log = use_activity_log();
    let mut logging_in = use_signal(|| false);

    let handle_login = move |_| {
        spawn(async move {
            let name = page.read().name.clone();
            let user = match UserId::parse(&name) {
                Ok(user) => user,
                Err(e) => {
                    log_activity(&mut log, Operation::Login, LogLevel::Warning, &e.to_string());
                    return;
                }
            };

            logging_in.set(true);
            let outcome = match api::login(user.to_string()).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    // The name is the identity; a failed lookup still logs in.
                    tracing::warn!(user = %user, "Login request failed: {}", e);
                    log_activity(
                        &mut log,
                        Operation::Login,
                        LogLevel::Warning,
                        &format!("Could not load stored settings: {e}"),
                    );
                    LoginOutcome { user, record: None }
                }
            };
            log_activity(
                &mut log,
                Operation::Login,
                LogLevel::Info,
                &format!("Logged in as {}", outcome.user),
            );
            page.write().apply_login(outcome);
            logging_in.set(false);
        });
    };

    rsx! {
        div {
            class: "login-form",
            input {
                r#type: "text",
                placeholder: "Your name",
                value: page.read().name.clone(),
                oninput: move |evt| page.write().name = evt.value(),
            }
            button {
                class: "primary",
                disabled: logging_in(),
                onclick: handle_login,
                if logging_in() { "Logging in..." } else { "Login" }
            }
        }
    }
}
