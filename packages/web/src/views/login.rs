//! Login page.

use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Button, Field};
use ui::form::{recheck, submit, FormStatus};
use ui::{use_auth, use_flash};
use ui::validation::{validate_form, LoginForm};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut status = use_signal(FormStatus::default);
    let flash = use_flash();

    // Already signed in
    if auth.is_authenticated() {
        nav.replace(Route::FamilyGroups {});
    }

    let login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let current = form();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                client.login(&current.credentials()).await
            })
            .await;
            if let Some(Ok(payload)) = outcome {
                if auth.establish(payload) {
                    nav.push(Route::FamilyGroups {});
                } else {
                    status.write().fail(api::auth::LOGIN_FALLBACK);
                }
            }
        });
    };

    let st = status();
    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen p-8",
            form {
                class: "w-full max-w-sm p-8 bg-white border border-neutral-200 rounded-md",
                onsubmit: login,
                h1 { "Sign in" }
                if let Some(message) = flash() {
                    Alert { kind: AlertKind::Success, message }
                }
                if let Some(err) = st.error.clone() {
                    Alert { message: err }
                }
                Field {
                    id: "login-email",
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
                Field {
                    id: "login-password",
                    label: "Password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: form.read().password.clone(),
                    error: st.field("password"),
                    oninput: move |v: String| {
                        form.write().password = v;
                        recheck(&mut status, &*form.peek(), "password");
                    },
                }
                Button {
                    r#type: "submit",
                    class: "w-full justify-center",
                    disabled: st.loading,
                    if st.loading { "Signing in..." } else { "Sign in" }
                }
                div {
                    class: "flex justify-between mt-4 text-sm",
                    Link { to: Route::Register {}, "Create an account" }
                    Link { to: Route::ForgotPassword {}, "Forgot password?" }
                }
            }
        }
    }
}
