use dioxus::prelude::*;
use ui::components::{Alert, Button, Field};
use ui::form::{recheck, submit, FormStatus};
use ui::use_auth;
use ui::validation::{validate_form, RegisterForm};

use crate::Route;

pub const REGISTERED_MESSAGE: &str = "Registration successful. Please sign in.";

/// Account creation. Signs in directly when the server returns a token.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut form = use_signal(RegisterForm::default);
    let mut status = use_signal(FormStatus::default);

    let register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let current = form();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&current), || async {
                client.register(&current.registration()).await
            })
            .await;
            if let Some(Ok(payload)) = outcome {
                if auth.establish(payload) {
                    nav.push(Route::FamilyGroups {});
                } else {
                    auth.set_flash(REGISTERED_MESSAGE);
                    nav.push(Route::Login {});
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
                onsubmit: register,
                h1 { "Create an account" }
                if let Some(err) = st.error.clone() {
                    Alert { message: err }
                }
                Field {
                    id: "register-first-name",
                    label: "First name",
                    autocomplete: "given-name",
                    value: form.read().first_name.clone(),
                    error: st.field("first_name"),
                    oninput: move |v: String| {
                        form.write().first_name = v;
                        recheck(&mut status, &*form.peek(), "first_name");
                    },
                }
                Field {
                    id: "register-last-name",
                    label: "Last name",
                    autocomplete: "family-name",
                    value: form.read().last_name.clone(),
                    error: st.field("last_name"),
                    oninput: move |v: String| {
                        form.write().last_name = v;
                        recheck(&mut status, &*form.peek(), "last_name");
                    },
                }
                Field {
                    id: "register-email",
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
                    id: "register-password",
                    label: "Password",
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
                    id: "register-confirm",
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
                    if st.loading { "Creating account..." } else { "Create account" }
                }
                div {
                    class: "flex justify-between mt-4 text-sm",
                    Link { to: Route::Login {}, "Already have an account? Sign in" }
                }
            }
        }
    }
}
