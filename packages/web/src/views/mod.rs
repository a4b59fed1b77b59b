use dioxus::prelude::*;

/// The settings page, resumed for `user_id` when one is given.
#[component]
pub fn Home(user_id: String) -> Element {
    rsx! {
        ui::SettingsPage { user_id }
    }
}
