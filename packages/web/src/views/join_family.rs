//! Join a family with an invite code, or with the token from an invite link.

use api::InvitePreview;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Button, ButtonVariant, Field, TextAreaField};
use ui::form::{recheck, submit, FormStatus};
use ui::use_auth;
use ui::validation::{validate_form, JoinForm};

use crate::Route;

#[component]
pub fn JoinFamily(code: String, token: String) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut form = use_signal(move || JoinForm {
        code,
        token,
        ..JoinForm::default()
    });
    let mut status = use_signal(FormStatus::default);
    let mut preview = use_signal(|| None::<InvitePreview>);
    let mut checking = use_signal(|| false);

    let verify = move |_| {
        let mut auth = auth;
        spawn(async move {
            let code = form.peek().code.trim().to_string();
            if code.is_empty() {
                status.write().fields.insert("code", "Invite code is required");
                return;
            }
            checking.set(true);
            status.write().error = None;
            let result = auth.client().invite_preview(&code).await;
            auth.observe(&result);
            checking.set(false);
            match result {
                Ok(found) => preview.set(Some(found)),
                Err(e) => {
                    preview.set(None);
                    status.write().fail(e.message());
                }
            }
        });
    };

    let join = move |evt: FormEvent| {
        evt.prevent_default();
        let mut auth = auth;
        spawn(async move {
            let current = form();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                client.join_family(&current.request()).await
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if result.is_ok() {
                    nav.push(Route::FamilyGroups {});
                }
            }
        });
    };

    let st = status();
    let from_link = !form.read().token.trim().is_empty();
    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            h1 { "Join a family" }
        }
        form {
            class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md",
            onsubmit: join,
            if let Some(err) = st.error.clone() {
                Alert { message: err }
            }
            if from_link {
                Alert { kind: AlertKind::Info, message: "You are joining through an invite link." }
            } else {
                Field {
                    id: "join-code",
                    label: "Invite code",
                    value: form.read().code.clone(),
                    error: st.field("code"),
                    oninput: move |v: String| {
                        form.write().code = v;
                        preview.set(None);
                        recheck(&mut status, &*form.peek(), "code");
                    },
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: checking(),
                    onclick: verify,
                    if checking() { "Checking..." } else { "Verify code" }
                }
            }
            if let Some(found) = preview() {
                div {
                    class: "flex flex-col gap-1.5 p-4 bg-white border border-neutral-200 rounded-md",
                    h3 { class: "m-0 text-base font-semibold", {found.family_name.clone().unwrap_or_else(|| "Family found".to_string())} }
                    if let Some(by) = found.invited_by.clone() {
                        p { class: "text-sm text-neutral-500", "Invited by {by}" }
                    }
                    if let Some(expires) = found.expires_at.clone() {
                        p { class: "text-sm text-neutral-500", "Expires {expires}" }
                    }
                }
            }
            Field {
                id: "join-relationship",
                label: "Relationship to the family",
                placeholder: "Cousin, grandparent, friend...",
                value: form.read().relationship.clone(),
                oninput: move |v: String| form.write().relationship = v,
            }
            TextAreaField {
                id: "join-info",
                label: "Additional information",
                value: form.read().additional_info.clone(),
                oninput: move |v: String| form.write().additional_info = v,
            }
            Button {
                r#type: "submit",
                disabled: st.loading,
                if st.loading { "Joining..." } else { "Join family" }
            }
        }
    }
}
