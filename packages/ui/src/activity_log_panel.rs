use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, OperationKind};
use crate::connect_buttons::tool_icon;

#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log.read().visible {
        return rsx! {};
    }

    let filter = log.read().filter;
    let entries = log.read().shown();
    let unconnected = log.read().unconnected_tools();

    rsx! {
        aside {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                nav {
                    class: "activity-log-filters",
                    button {
                        class: if filter.is_none() { "active" } else { "" },
                        onclick: move |_| log.write().filter = None,
                        "All"
                    }
                    for kind in OperationKind::ALL {
                        FilterTab { key: "{kind.label()}", kind }
                    }
                }
                button {
                    onclick: move |_| log.write().visible = false,
                    "Close"
                }
            }
            if !unconnected.is_empty() {
                div {
                    class: "activity-log-unconnected",
                    span { "Not connected:" }
                    for tool in unconnected {
                        span {
                            key: "{tool}",
                            title: "{tool.label()}",
                            {tool_icon(tool)}
                        }
                    }
                }
            }
            ul {
                class: "activity-log-entries",
                if entries.is_empty() {
                    li { class: "activity-log-empty", "Nothing yet" }
                }
                for (i, entry) in entries.into_iter().enumerate() {
                    li {
                        key: "{i}",
                        class: "activity-log-entry {entry.level.css_class()}",
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { class: "activity-log-op", "{entry.operation.kind().label()}" }
                        {entry.operation.tool().map(tool_icon)}
                        span { "{entry.message}" }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterTab(kind: OperationKind) -> Element {
    let mut log = use_activity_log();
    let active = log.read().filter == Some(kind);
    let failures = log.read().failures(kind);

    rsx! {
        button {
            class: if active { "active" } else { "" },
            onclick: move |_| log.write().filter = Some(kind),
            "{kind.label()}"
            if failures > 0 {
                span { class: "activity-log-badge", "{failures}" }
            }
        }
    }
}

/// Opens the panel; the badge counts failures across all operations.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let failures: usize = OperationKind::ALL
        .iter()
        .map(|kind| log.read().failures(*kind))
        .sum();
    let has_errors = log.read().has_errors();

    rsx! {
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| {
                let visible = log.read().visible;
                log.write().visible = !visible;
            },
            title: "Activity",
            "Activity"
            if failures > 0 {
                span { class: "activity-log-badge", "{failures}" }
            }
        }
    }
}
