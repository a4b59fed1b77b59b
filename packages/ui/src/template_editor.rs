use dioxus::prelude::*;
use store::PageState;

#[component]
pub fn TemplateEditor(mut page: Signal<PageState>) -> Element {
    rsx! {
        div {
            class: "form-field",
            label { "Message template" }
            textarea {
                rows: 6,
                placeholder: "Text sent before every notification",
                value: page.read().settings.message_format.clone(),
                oninput: move |evt| page.write().set_message_format(evt.value()),
            }
            p {
                class: "form-help",
                "Prepended to each notification posted to the selected channel."
            }
        }
    }
}
