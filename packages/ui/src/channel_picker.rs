use dioxus::prelude::*;
use store::PageState;

/// Drop-down of the channels the backend offered for the current user.
#[component]
pub fn ChannelPicker(mut page: Signal<PageState>) -> Element {
    let channels = page.read().channels.clone();
    let selected = page.read().settings.channel_id.clone();
    let has_selection = channels.iter().any(|c| c.id == selected);

    rsx! {
        div {
            class: "form-field",
            label { "Notification channel" }
            select {
                value: "{selected}",
                onchange: move |evt| page.write().select_channel(evt.value()),
                if !has_selection {
                    option { value: "{selected}", disabled: true, "Select a channel" }
                }
                for channel in channels {
                    option {
                        key: "{channel.id}",
                        value: "{channel.id}",
                        selected: channel.id == selected,
                        "{channel.name}"
                    }
                }
            }
        }
    }
}
