//! Labelled inputs with an inline error line.

use dioxus::prelude::*;

use super::{Input, Label, TextArea};

#[component]
pub fn Field(
    id: String,
    label: String,
    value: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] autocomplete: String,
    #[props(default)] error: Option<String>,
    #[props(default)] disabled: bool,
    oninput: EventHandler<String>,
) -> Element {
    let kind = r#type;
    rsx! {
        div {
            class: "flex flex-col gap-1 mb-4",
            Label { html_for: id.clone(), "{label}" }
            Input {
                id,
                r#type: kind,
                value,
                placeholder,
                autocomplete,
                disabled,
                invalid: error.is_some(),
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}

#[component]
pub fn TextAreaField(
    id: String,
    label: String,
    value: String,
    #[props(default)] placeholder: String,
    #[props(default)] error: Option<String>,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-1 mb-4",
            Label { html_for: id.clone(), "{label}" }
            TextArea {
                id,
                value,
                placeholder,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}
