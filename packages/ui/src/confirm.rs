//! Delete confirmation: a pending target that is either confirmed (handed
//! back exactly once) or cancelled.

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, ModalOverlay};

#[derive(Clone, Debug, PartialEq)]
pub struct PendingDelete<T> {
    target: Option<T>,
}

impl<T> Default for PendingDelete<T> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<T> PendingDelete<T> {
    pub fn request(&mut self, target: T) {
        self.target = Some(target);
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Take the target; a second call returns `None`.
    pub fn confirm(&mut self) -> Option<T> {
        self.target.take()
    }
}

#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            div {
                class: "p-6",
                h2 { class: "m-0 mb-4 text-lg font-semibold", "{title}" }
                p { class: "m-0 mb-5", "{message}" }
                div {
                    class: "flex justify-end gap-2",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
