//! Children widgets, shared by the family details page and "my children".

use api::{Child, Id};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::components::{Alert, Button, ButtonVariant, Field, Label, ModalOverlay, Spinner, TextAreaField};
use crate::confirm::{ConfirmDialog, PendingDelete};
use crate::form::{recheck, submit, FormStatus};
use crate::validation::{validate_form, ChildForm};

/// Which collection a child belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildOwner {
    Family(Id),
    CurrentUser,
}

#[component]
pub fn ChildList(
    items: Vec<Child>,
    #[props(default = "No children in this family".to_string())] empty_message: String,
    #[props(default)] show_details: bool,
    on_edit: EventHandler<Child>,
    on_delete: EventHandler<Child>,
) -> Element {
    if items.is_empty() {
        return rsx! {
            p { class: "p-8 text-center text-sm text-neutral-500", "{empty_message}" }
        };
    }

    rsx! {
        ul {
            class: "p-0 list-none",
            for child in items {
                li {
                    key: "{child.id}",
                    class: "flex items-center justify-between py-2.5 border-b border-neutral-200",
                    div {
                        class: "flex flex-col",
                        span { class: "font-medium", "{child.full_name()}" }
                        span { class: "text-sm text-neutral-500", {child.birth_day().unwrap_or("Birth date unknown").to_string()} }
                        if show_details {
                            if let Some(gender) = child.gender.clone().filter(|g| !g.is_empty()) {
                                span { class: "text-sm text-neutral-500", "{gender}" }
                            }
                            if let Some(notes) = child.notes.clone().filter(|n| !n.is_empty()) {
                                p { class: "mt-1 mb-0 text-sm", "{notes}" }
                            }
                        }
                    }
                    div {
                        class: "flex gap-1",
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: {
                                let child = child.clone();
                                move |_| on_edit.call(child.clone())
                            },
                            "Edit"
                        }
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: {
                                let child = child.clone();
                                move |_| on_delete.call(child.clone())
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

/// Add (no `initial`) or edit a child.
#[component]
pub fn ChildFormDialog(
    owner: ChildOwner,
    initial: Option<Child>,
    #[props(default)] extended: bool,
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let editing = initial.as_ref().map(|c| c.id.clone());
    let title = if editing.is_some() { "Edit child" } else { "Add a child" };
    let mut form = use_signal(move || {
        initial
            .as_ref()
            .map(|c| ChildForm::from_input(c.to_input()))
            .unwrap_or_default()
    });
    let mut status = use_signal(FormStatus::default);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let owner = owner.clone();
        let editing = editing.clone();
        let mut auth = auth;
        spawn(async move {
            let current = form();
            let input = current.to_input();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                match (&owner, &editing) {
                    (ChildOwner::Family(family), Some(id)) => {
                        client.update_child(family, id, &input).await
                    }
                    (ChildOwner::Family(family), None) => client.create_child(family, &input).await,
                    (ChildOwner::CurrentUser, Some(id)) => client.update_my_child(id, &input).await,
                    (ChildOwner::CurrentUser, None) => client.create_my_child(&input).await,
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
                    id: "child-first-name",
                    label: "First name",
                    value: form.read().first_name.clone(),
                    error: st.field("first_name"),
                    oninput: move |v: String| {
                        form.write().first_name = v;
                        recheck(&mut status, &*form.peek(), "first_name");
                    },
                }
                Field {
                    id: "child-last-name",
                    label: "Last name",
                    value: form.read().last_name.clone(),
                    error: st.field("last_name"),
                    oninput: move |v: String| {
                        form.write().last_name = v;
                        recheck(&mut status, &*form.peek(), "last_name");
                    },
                }
                Field {
                    id: "child-birth-date",
                    label: "Birth date",
                    r#type: "date",
                    value: form.read().birth_date.clone(),
                    error: st.field("birth_date"),
                    oninput: move |v: String| {
                        form.write().birth_date = v;
                        recheck(&mut status, &*form.peek(), "birth_date");
                    },
                }
                if extended {
                    div {
                        class: "flex flex-col gap-1 mb-4",
                        Label { html_for: "child-gender", "Gender" }
                        select {
                            id: "child-gender",
                            class: "input",
                            value: form.read().gender.clone(),
                            onchange: move |evt| form.write().gender = evt.value(),
                            option { value: "", "Not specified" }
                            option { value: "M", "Boy" }
                            option { value: "F", "Girl" }
                        }
                    }
                    TextAreaField {
                        id: "child-notes",
                        label: "Notes",
                        value: form.read().notes.clone(),
                        oninput: move |v: String| form.write().notes = v,
                    }
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

#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(Child),
}

/// Loads a child collection and wires up add, edit and delete.
#[component]
pub fn ChildrenPanel(
    owner: ChildOwner,
    #[props(default)] extended: bool,
    #[props(default = "No children in this family".to_string())] empty_message: String,
) -> Element {
    let auth = use_auth();
    let mut editor = use_signal(|| Editor::Closed);
    let mut pending = use_signal(PendingDelete::<Child>::default);
    let mut delete_error = use_signal(|| None::<String>);
    let mut deleting = use_signal(|| false);

    let mut children = use_resource(use_reactive!(|owner| {
        let mut auth = auth;
        async move {
            let client = auth.client();
            let result = match &owner {
                ChildOwner::Family(family) => client.list_children(family).await,
                ChildOwner::CurrentUser => client.my_children().await,
            };
            auth.observe(&result);
            result
        }
    }));

    let delete_owner = owner.clone();
    let confirm_delete = move |_| {
        let Some(child) = pending.write().confirm() else {
            return;
        };
        let owner = delete_owner.clone();
        let mut auth = auth;
        spawn(async move {
            deleting.set(true);
            delete_error.set(None);
            let client = auth.client();
            let result = match &owner {
                ChildOwner::Family(family) => client.delete_child(family, &child.id).await,
                ChildOwner::CurrentUser => client.delete_my_child(&child.id).await,
            };
            auth.observe(&result);
            deleting.set(false);
            match result {
                Ok(()) => children.restart(),
                Err(e) => delete_error.set(Some(e.message())),
            }
        });
    };

    let body = match &*children.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { Alert { message: e.message() } },
        Some(Ok(list)) => rsx! {
            ChildList {
                items: list.clone(),
                empty_message: empty_message.clone(),
                show_details: extended,
                on_edit: move |child| editor.set(Editor::Edit(child)),
                on_delete: move |child| pending.write().request(child),
            }
        },
    };

    rsx! {
        section {
            class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md",
            div {
                class: "flex items-center justify-between mb-4",
                h2 { "Children" }
                Button { onclick: move |_| editor.set(Editor::New), "Add a child" }
            }
            if let Some(err) = delete_error() {
                Alert { message: err }
            }
            {body}
        }

        {
            match editor() {
                Editor::Closed => rsx! {},
                Editor::New => rsx! {
                    ChildFormDialog {
                        owner: owner.clone(),
                        initial: None,
                        extended,
                        on_saved: move |_| {
                            editor.set(Editor::Closed);
                            children.restart();
                        },
                        on_cancel: move |_| editor.set(Editor::Closed),
                    }
                },
                Editor::Edit(child) => rsx! {
                    ChildFormDialog {
                        owner: owner.clone(),
                        initial: Some(child),
                        extended,
                        on_saved: move |_| {
                            editor.set(Editor::Closed);
                            children.restart();
                        },
                        on_cancel: move |_| editor.set(Editor::Closed),
                    }
                },
            }
        }

        if let Some(child) = pending.read().target().cloned() {
            ConfirmDialog {
                title: "Delete child",
                message: format!("Delete {}? This cannot be undone.", child.full_name()),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending.write().cancel(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_shows_name_and_birth_date() {
        #[component]
        fn Harness(items: Vec<Child>) -> Element {
            rsx! {
                ChildList { items, on_edit: |_| {}, on_delete: |_| {} }
            }
        }
        let items: Vec<Child> = serde_json::from_value(json!([
            {"_id":"c1","firstName":"Léa","lastName":"Dupont","birthDate":"2015-04-02T00:00:00Z"}
        ]))
        .unwrap();

        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { items });
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("Léa Dupont"));
        assert!(html.contains("2015-04-02"));

        let mut empty = VirtualDom::new_with_props(Harness, HarnessProps { items: vec![] });
        empty.rebuild_in_place();
        assert!(dioxus_ssr::render(&empty).contains("No children in this family"));
    }
}
