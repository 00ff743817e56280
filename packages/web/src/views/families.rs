//! Family groups overview and the details page of one family.

use api::{Family, Id};
use dioxus::prelude::*;
use ui::components::{Alert, Button, ButtonVariant, Spinner};
use ui::confirm::{ConfirmDialog, PendingDelete};
use ui::{use_auth, ChildOwner, ChildrenPanel, FamilyFormDialog, FamilyList, InviteDialog, PhotoGallery};

use crate::Route;

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    None,
    Create,
    Edit(Family),
    Invite(Family),
}

#[component]
pub fn FamilyGroups() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut dialog = use_signal(|| Dialog::None);
    let mut pending = use_signal(PendingDelete::<Family>::default);
    let mut action_error = use_signal(|| None::<String>);
    let mut deleting = use_signal(|| false);

    let mut families = use_resource(move || {
        let mut auth = auth;
        async move {
            let result = auth.client().list_families().await;
            auth.observe(&result);
            result
        }
    });

    let confirm_delete = move |_| {
        let Some(family) = pending.peek().target().cloned() else {
            return;
        };
        let mut auth = auth;
        spawn(async move {
            deleting.set(true);
            action_error.set(None);
            let result = auth.client().delete_family(&family.id).await;
            auth.observe(&result);
            deleting.set(false);
            pending.write().cancel();
            match result {
                Ok(()) => families.restart(),
                Err(e) => action_error.set(Some(e.message())),
            }
        });
    };

    let body = match &*families.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { Alert { message: e.message() } },
        Some(Ok(list)) => rsx! {
            FamilyList {
                families: list.clone(),
                on_open: move |id: Id| {
                    nav.push(Route::FamilyDetails { id: id.to_string() });
                },
                on_edit: move |family| dialog.set(Dialog::Edit(family)),
                on_delete: move |family| pending.write().request(family),
                on_invite: move |family| dialog.set(Dialog::Invite(family)),
            }
        },
    };

    let saved = move |_| {
        dialog.set(Dialog::None);
        families.restart();
    };

    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            h1 { "Family groups" }
            Button { onclick: move |_| dialog.set(Dialog::Create), "New family" }
        }
        if let Some(err) = action_error() {
            Alert { message: err }
        }
        {body}

        {
            match dialog() {
                Dialog::None => rsx! {},
                Dialog::Create => rsx! {
                    FamilyFormDialog {
                        initial: None,
                        on_saved: saved,
                        on_cancel: move |_| dialog.set(Dialog::None),
                    }
                },
                Dialog::Edit(family) => rsx! {
                    FamilyFormDialog {
                        initial: Some(family),
                        on_saved: saved,
                        on_cancel: move |_| dialog.set(Dialog::None),
                    }
                },
                Dialog::Invite(family) => rsx! {
                    InviteDialog { family, on_close: move |_| dialog.set(Dialog::None) }
                },
            }
        }

        if let Some(family) = pending.read().target().cloned() {
            ConfirmDialog {
                title: "Delete family",
                message: format!(
                    "Delete the family \"{}\"? Its children and photos will be removed too.",
                    family.name
                ),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending.write().cancel(),
            }
        }
    }
}

#[component]
pub fn FamilyDetails(id: String) -> Element {
    let auth = use_auth();
    let mut editing = use_signal(|| false);

    let mut family = use_resource(use_reactive!(|id| {
        let mut auth = auth;
        async move {
            let result = auth.client().get_family(&Id::new(id)).await;
            auth.observe(&result);
            result
        }
    }));
    let family_id = Id::new(id.clone());

    let current = family.read().clone();
    let Some(result) = current else {
        return rsx! { Spinner {} };
    };
    let family_value = match result {
        Ok(family) => family,
        Err(e) => {
            return rsx! {
                Alert { message: e.message() }
                Link { to: Route::FamilyGroups {}, "Back to family groups" }
            };
        }
    };

    let details = [
        ("Patriarch", family_value.patriarch_name.clone()),
        ("Matriarch", family_value.matriarch_name.clone()),
        ("Location", family_value.location.clone()),
        ("Founded", family_value.founding_day().map(str::to_string)),
    ];

    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            div {
                Link { to: Route::FamilyGroups {}, class: "text-sm text-neutral-500", "← Family groups" }
                h1 { "{family_value.name}" }
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| editing.set(true),
                "Edit"
            }
        }
        if let Some(description) = family_value.description.clone().filter(|d| !d.is_empty()) {
            p { "{description}" }
        }
        dl {
            class: "family-details",
            for (label, value) in details {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    dt { "{label}" }
                    dd { "{value}" }
                }
            }
        }

        ChildrenPanel { owner: ChildOwner::Family(family_id.clone()) }
        PhotoGallery { family_id }

        if editing() {
            FamilyFormDialog {
                initial: Some(family_value.clone()),
                on_saved: move |_| {
                    editing.set(false);
                    family.restart();
                },
                on_cancel: move |_| editing.set(false),
            }
        }
    }
}
