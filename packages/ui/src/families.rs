//! Family group widgets: the list, the create/edit dialog and the invite dialog.

use api::{Family, Id};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPen, FaTrash, FaUserPlus};
use dioxus_free_icons::Icon;

use crate::auth::use_auth;
use crate::browser::copy_to_clipboard;
use crate::components::{Alert, AlertKind, Button, ButtonVariant, Field, ModalOverlay, TextAreaField};
use crate::form::{recheck, submit, FormStatus};
use crate::validation::{validate_form, FamilyForm};

pub fn children_label(count: usize) -> String {
    match count {
        0 => "No children".to_string(),
        1 => "1 child".to_string(),
        n => format!("{n} children"),
    }
}

#[component]
pub fn FamilyList(
    families: Vec<Family>,
    on_open: EventHandler<Id>,
    on_edit: EventHandler<Family>,
    on_delete: EventHandler<Family>,
    on_invite: EventHandler<Family>,
) -> Element {
    if families.is_empty() {
        return rsx! {
            div {
                class: "p-8 text-center",
                p { class: "font-semibold", "No families yet" }
                p { class: "text-sm text-neutral-500", "Create a family group to start adding children and photos." }
            }
        };
    }

    rsx! {
        ul {
            class: "grid grid-cols-[repeat(auto-fill,minmax(240px,1fr))] gap-4 p-0 list-none",
            for family in families {
                FamilyCard {
                    key: "{family.id}",
                    family: family.clone(),
                    on_open,
                    on_edit,
                    on_delete,
                    on_invite,
                }
            }
        }
    }
}

#[component]
fn FamilyCard(
    family: Family,
    on_open: EventHandler<Id>,
    on_edit: EventHandler<Family>,
    on_delete: EventHandler<Family>,
    on_invite: EventHandler<Family>,
) -> Element {
    let count = children_label(family.child_count());
    let id = family.id.clone();
    let (edit, delete, invite) = (family.clone(), family.clone(), family.clone());

    rsx! {
        li {
            class: "family-card flex flex-col gap-1.5 p-4 bg-white border border-neutral-200 rounded-md",
            h3 { class: "m-0 text-base font-semibold", "{family.name}" }
            p { class: "text-sm text-neutral-500", "{count}" }
            if let Some(description) = family.description.as_deref().filter(|d| !d.is_empty()) {
                p { class: "m-0", "{description}" }
            }
            if let Some(location) = family.location.as_deref().filter(|l| !l.is_empty()) {
                p { class: "text-sm text-neutral-500", "{location}" }
            }
            div {
                class: "flex gap-1 mt-auto",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_open.call(id.clone()),
                    "Details"
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Invite",
                    onclick: move |_| on_invite.call(invite.clone()),
                    Icon { width: 14, height: 14, icon: FaUserPlus }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit.clone()),
                    Icon { width: 14, height: 14, icon: FaPen }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete.clone()),
                    Icon { width: 14, height: 14, icon: FaTrash }
                }
            }
        }
    }
}

/// Create (no `initial`) or edit a family.
#[component]
pub fn FamilyFormDialog(
    initial: Option<Family>,
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let editing = initial.as_ref().map(|f| f.id.clone());
    let title = if editing.is_some() { "Edit family" } else { "New family" };
    let mut form = use_signal(move || {
        initial
            .as_ref()
            .map(|f| FamilyForm::from_input(f.to_input()))
            .unwrap_or_default()
    });
    let mut status = use_signal(FormStatus::default);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let editing = editing.clone();
        let mut auth = auth;
        spawn(async move {
            let current = form();
            let input = current.to_input();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                match &editing {
                    Some(id) => client.update_family(id, &input).await,
                    None => client.create_family(&input).await,
                }
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if result.is_ok() {
                    on_saved.call(());
                }
            }
        });
    };

    let st = status();
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            form {
                class: "p-6",
                onsubmit: save,
                h2 { class: "m-0 mb-4 text-lg font-semibold", "{title}" }
                if let Some(err) = st.error.clone() {
                    Alert { message: err }
                }
                Field {
                    id: "family-name",
                    label: "Name",
                    value: form.read().name.clone(),
                    error: st.field("name"),
                    oninput: move |v: String| {
                        form.write().name = v;
                        recheck(&mut status, &*form.peek(), "name");
                    },
                }
                TextAreaField {
                    id: "family-description",
                    label: "Description",
                    value: form.read().description.clone(),
                    oninput: move |v: String| form.write().description = v,
                }
                Field {
                    id: "family-patriarch",
                    label: "Patriarch",
                    value: form.read().patriarch_name.clone(),
                    oninput: move |v: String| form.write().patriarch_name = v,
                }
                Field {
                    id: "family-matriarch",
                    label: "Matriarch",
                    value: form.read().matriarch_name.clone(),
                    oninput: move |v: String| form.write().matriarch_name = v,
                }
                Field {
                    id: "family-location",
                    label: "Location",
                    value: form.read().location.clone(),
                    oninput: move |v: String| form.write().location = v,
                }
                Field {
                    id: "family-founding-date",
                    label: "Founding date",
                    r#type: "date",
                    value: form.read().founding_date.clone(),
                    error: st.field("founding_date"),
                    oninput: move |v: String| {
                        form.write().founding_date = v;
                        recheck(&mut status, &*form.peek(), "founding_date");
                    },
                }
                div {
                    class: "flex justify-end gap-2",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        r#type: "submit",
                        disabled: st.loading,
                        if st.loading { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InviteKind {
    Link,
    Code,
}

/// Generate an invite link or code for a family and copy it.
#[component]
pub fn InviteDialog(family: Family, on_close: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut invite = use_signal(|| None::<(InviteKind, String)>);
    let mut status = use_signal(FormStatus::default);
    let family_id = family.id.clone();

    let generate = move |kind: InviteKind| {
        let id = family_id.clone();
        let mut auth = auth;
        spawn(async move {
            let client = auth.client();
            let outcome = submit(&mut status, Ok(()), || async {
                match kind {
                    InviteKind::Link => client.invite_link(&id).await,
                    InviteKind::Code => client.invite_code(&id).await,
                }
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if let Ok(value) = result {
                    invite.set(Some((kind, value)));
                }
            }
        });
    };
    let generate_code = generate.clone();

    let copy = move |_| {
        let Some((_, value)) = invite() else {
            return;
        };
        spawn(async move {
            if copy_to_clipboard(&value).await {
                status.write().succeed("Copied to clipboard");
            } else {
                status.write().fail("Could not copy, select the text and copy it manually");
            }
        });
    };

    let st = status();
    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "p-6",
                h2 { class: "m-0 mb-4 text-lg font-semibold", "Invite to {family.name}" }
                p { class: "text-sm text-neutral-500", "Share a link, or a code that can be typed on the join page." }
                if let Some(err) = st.error.clone() {
                    Alert { message: err }
                }
                if let Some(msg) = st.success.clone() {
                    Alert { kind: AlertKind::Success, message: msg }
                }
                div {
                    class: "flex justify-end gap-2",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: st.loading,
                        onclick: move |_| generate(InviteKind::Link),
                        "Generate link"
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: st.loading,
                        onclick: move |_| generate_code(InviteKind::Code),
                        "Generate code"
                    }
                }
                if let Some((kind, value)) = invite() {
                    div {
                        class: "block my-3 p-2 bg-neutral-100 rounded-md break-all font-mono",
                        span { class: "text-sm text-neutral-500", if kind == InviteKind::Link { "Invite link" } else { "Invite code" } }
                        code { "{value}" }
                        Button { variant: ButtonVariant::Outline, onclick: copy, "Copy" }
                    }
                }
                div {
                    class: "flex justify-end gap-2",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn families() -> Vec<Family> {
        serde_json::from_value(json!([
            {"_id":"f1","name":"Dupont","children":[
                {"_id":"c1","firstName":"Léa","lastName":"Dupont"},
                {"_id":"c2","firstName":"Hugo","lastName":"Dupont"}
            ]},
            {"_id":"f2","name":"Martin","description":"Lyon branch"}
        ]))
        .unwrap()
    }

    fn render(families: Vec<Family>) -> String {
        #[component]
        fn Harness(families: Vec<Family>) -> Element {
            rsx! {
                FamilyList {
                    families,
                    on_open: |_| {},
                    on_edit: |_| {},
                    on_delete: |_| {},
                    on_invite: |_| {},
                }
            }
        }
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { families });
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_renders_each_family_with_child_count() {
        let html = render(families());
        assert!(html.contains("Dupont"));
        assert!(html.contains("2 children"));
        assert!(html.contains("Martin"));
        assert!(html.contains("No children"));
        assert!(html.contains("Lyon branch"));
        assert!(!html.contains("No families yet"));
        assert_eq!(html.matches("family-card").count(), 2);
    }

    #[test]
    fn test_empty_state_replaces_list() {
        let html = render(Vec::new());
        assert!(html.contains("No families yet"));
        assert!(!html.contains("family-card"));
    }

    #[test]
    fn test_children_label() {
        assert_eq!(children_label(1), "1 child");
        assert_eq!(children_label(3), "3 children");
    }
}
