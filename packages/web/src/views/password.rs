//! Password recovery: request a reset email, then set a new password from
//! the emailed link.

use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Button, Field};
use ui::form::{recheck, submit, FormStatus};
use ui::use_auth;
use ui::validation::{validate_form, ForgotPasswordForm, ResetPasswordForm};

use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let auth = use_auth();
    let mut form = use_signal(ForgotPasswordForm::default);
    let mut status = use_signal(FormStatus::default);

    let send = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let current = form();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                client.forgot_password(current.email.trim()).await
            })
            .await;
            if let Some(Ok(())) = outcome {
                status
                    .write()
                    .succeed("If an account exists for this address, a reset link is on its way.");
            }
        });
    };

    let st = status();
    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen p-8",
            form {
                class: "w-full max-w-sm p-8 bg-white border border-neutral-200 rounded-md",
                onsubmit: send,
                h1 { "Forgot password" }
                p { class: "text-sm text-neutral-500", "Enter your email and we will send you a link to reset your password." }
                if let Some(err) = st.error.clone() {
                    Alert { message: err }
                }
                if let Some(message) = st.success.clone() {
                    Alert { kind: AlertKind::Success, message }
                }
                Field {
                    id: "forgot-email",
                    label: "Email",
                    r#type: "email",
                    autocomplete: "email",
                    value: form.read().email.clone(),
                    error: st.field("email"),
                    oninput: move |v: String| {
                        form.write().email = v;
                        recheck(&mut status, &*form.peek(), "email");
                    },
                }
                Button {
                    r#type: "submit",
                    class: "w-full justify-center",
                    disabled: st.loading,
                    if st.loading { "Sending..." } else { "Send reset link" }
                }
                div {
                    class: "flex justify-between mt-4 text-sm",
                    Link { to: Route::Login {}, "Back to sign in" }
                }
            }
        }
    }
}

#[component]
pub fn ResetPassword(token: String) -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut form = use_signal(move || ResetPasswordForm {
        token,
        ..ResetPasswordForm::default()
    });
    let mut status = use_signal(FormStatus::default);

    let reset = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let current = form();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                client.reset_password(&current.reset()).await
            })
            .await;
            if let Some(Ok(())) = outcome {
                auth.set_flash("Your password has been reset. Please sign in.");
                nav.push(Route::Login {});
            }
        });
    };

    let st = status();
    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen p-8",
            form {
                class: "w-full max-w-sm p-8 bg-white border border-neutral-200 rounded-md",
                onsubmit: reset,
                h1 { "Choose a new password" }
                if let Some(err) = st.error.clone().or(st.field("token")) {
                    Alert { message: err }
                }
                Field {
                    id: "reset-password",
                    label: "New password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: form.read().password.clone(),
                    error: st.field("password"),
                    oninput: move |v: String| {
                        form.write().password = v;
                        recheck(&mut status, &*form.peek(), "password");
                    },
                }
                Field {
                    id: "reset-confirm",
                    label: "Confirm password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: form.read().confirm_password.clone(),
                    error: st.field("confirm_password"),
                    oninput: move |v: String| {
                        form.write().confirm_password = v;
                        recheck(&mut status, &*form.peek(), "confirm_password");
                    },
                }
                Button {
                    r#type: "submit",
                    class: "w-full justify-center",
                    disabled: st.loading,
                    if st.loading { "Saving..." } else { "Reset password" }
                }
                div {
                    class: "flex justify-between mt-4 text-sm",
                    Link { to: Route::ForgotPassword {}, "Request a new link" }
                }
            }
        }
    }
}
