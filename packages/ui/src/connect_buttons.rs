//! One button per linkable tool. Clicking asks the backend for an OAuth
//! redirect and hands the whole page over to the provider.

use dioxus::prelude::*;
use store::{Tool, UserId};

use crate::activity_log::{log_activity, use_activity_log, LogLevel, Operation};
use crate::backend::{ApiBackend, BrowserNavigator};
use crate::brand_icons::{FaHubspot, FaSlack};
use crate::icons::{FaAddressBook, FaCalendarCheck, FaNoteSticky};
use crate::Icon;

#[component]
pub fn ConnectButtons(user: UserId) -> Element {
    rsx! {
        div {
            class: "connect-buttons",
            for tool in Tool::ALL {
                ConnectButton { key: "{tool}", user: user.clone(), tool }
            }
        }
    }
}

#[component]
fn ConnectButton(user: UserId, tool: Tool) -> Element {
    let mut log = use_activity_log();
    let mut connecting = use_signal(|| false);

    let onclick = move |_| {
        let user = user.clone();
        async move {
            connecting.set(true);
            let navigated =
                store::connect_tool(&ApiBackend, &BrowserNavigator, &user, tool).await;
            if navigated {
                log_activity(
                    &mut log,
                    Operation::Connect(tool),
                    LogLevel::Info,
                    &format!("Redirecting to {}", tool.label()),
                );
            } else {
                log_activity(
                    &mut log,
                    Operation::Connect(tool),
                    LogLevel::Warning,
                    &format!("{} did not return a sign-in link", tool.label()),
                );
                connecting.set(false);
            }
        }
    };

    rsx! {
        button {
            class: "connect-btn connect-btn--{tool}",
            disabled: connecting(),
            onclick: onclick,
            {tool_icon(tool)}
            span { "Connect {tool.label()}" }
        }
    }
}

pub(crate) fn tool_icon(tool: Tool) -> Element {
    match tool {
        Tool::Slack => rsx! { Icon { icon: FaSlack, width: 14, height: 14 } },
        Tool::Calendly => rsx! { Icon { icon: FaCalendarCheck, width: 14, height: 14 } },
        Tool::Attio => rsx! { Icon { icon: FaAddressBook, width: 14, height: 14 } },
        Tool::Hubspot => rsx! { Icon { icon: FaHubspot, width: 14, height: 14 } },
        Tool::Notion => rsx! { Icon { icon: FaNoteSticky, width: 14, height: 14 } },
    }
}
