use dioxus::prelude::*;
use ui::{ChildOwner, ChildrenPanel};

/// Children attached to the signed-in user rather than to a family.
#[component]
pub fn MyChildren() -> Element {
    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            h1 { "My children" }
        }
        ChildrenPanel {
            owner: ChildOwner::CurrentUser,
            extended: true,
            empty_message: "You have not added any children yet",
        }
    }
}
