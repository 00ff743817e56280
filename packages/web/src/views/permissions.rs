use api::{ManagedUser, Permissions as Flags};
use dioxus::prelude::*;
use ui::components::{Alert, Button, Spinner};
use ui::form::{submit, FormStatus};
use ui::use_auth;

/// Users the signed-in account may manage, with their permission flags.
#[component]
pub fn Permissions() -> Element {
    let auth = use_auth();
    let users = use_resource(move || {
        let mut auth = auth;
        async move {
            let result = auth.client().list_users().await;
            auth.observe(&result);
            result
        }
    });

    let labels = Flags::default().flags().map(|(label, _)| label);
    let body = match &*users.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { Alert { message: e.message() } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "p-8 text-center text-sm text-neutral-500", "No users to manage" }
        },
        Some(Ok(list)) => rsx! {
            table {
                class: "permissions-table",
                thead {
                    tr {
                        th { "User" }
                        for label in labels {
                            th { "{label}" }
                        }
                        th {}
                    }
                }
                tbody {
                    for user in list.clone() {
                        PermissionRow { key: "{user.id}", user: user.clone() }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            h1 { "Permissions" }
        }
        section { class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md", {body} }
    }
}

#[component]
fn PermissionRow(user: ManagedUser) -> Element {
    let auth = use_auth();
    let mut saved = use_signal(|| user.permissions);
    let mut flags = use_signal(|| user.permissions);
    let mut status = use_signal(FormStatus::default);
    let id = user.id.clone();

    let save = move |_| {
        let id = id.clone();
        let mut auth = auth;
        spawn(async move {
            let wanted = flags();
            let client = auth.client();
            let outcome = submit(&mut status, Ok(()), || async {
                client.update_permissions(&id, &wanted).await
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                match result {
                    Ok(()) => saved.set(wanted),
                    Err(_) => flags.set(saved()),
                }
            }
        });
    };

    let st = status();
    let dirty = flags() != saved();
    rsx! {
        tr {
            td {
                div { "{user.display_name()}" }
                span { class: "text-sm text-neutral-500", "{user.email}" }
                if let Some(err) = st.error.clone() {
                    p { class: "field-error", "{err}" }
                }
            }
            for (index, (label, enabled)) in flags().flags().into_iter().enumerate() {
                td {
                    input {
                        r#type: "checkbox",
                        "aria-label": "{label}",
                        checked: enabled,
                        onchange: move |_| flags.write().toggle(index),
                    }
                }
            }
            td {
                Button {
                    disabled: !dirty || st.loading,
                    onclick: save,
                    if st.loading { "Saving..." } else { "Save" }
                }
            }
        }
    }
}
