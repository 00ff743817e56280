use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};

/// Top bar: brand, the route links passed as children, and the signed-in user.
#[component]
pub fn Navbar(#[props(default = "Family Profile".to_string())] brand: String, children: Element) -> Element {
    let auth = use_auth();
    let name = auth.user().map(|u| u.display_name());

    rsx! {
        nav {
            class: "flex items-center gap-6 px-6 py-3 bg-white border-b border-neutral-200",
            span { class: "font-bold", "{brand}" }
            div { class: "navbar-links flex flex-1 gap-4", {children} }
            div {
                class: "flex items-center gap-3",
                if let Some(name) = name {
                    span { class: "text-sm text-neutral-500", "{name}" }
                }
                LogoutButton { class: "btn btn-outline" }
            }
        }
    }
}
