use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
    Info,
}

/// Banner for a form or page outcome.
#[component]
pub fn Alert(#[props(default)] kind: AlertKind, message: String) -> Element {
    let class = match kind {
        AlertKind::Error => "alert alert-error",
        AlertKind::Success => "alert alert-success",
        AlertKind::Info => "alert alert-info",
    };
    let role = if kind == AlertKind::Error { "alert" } else { "status" };
    rsx! {
        div { class, role, "{message}" }
    }
}

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "p-8 text-center text-neutral-500", role: "status", "{label}" }
    }
}
