//! Two-factor authentication: status, enrolment with a QR code, and disable.

use api::TwoFactorSetup;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Button, ButtonVariant, Field, Spinner};
use ui::form::{recheck, submit, FormStatus};
use ui::use_auth;
use ui::validation::{validate_form, TwoFactorForm};

#[component]
pub fn TwoFactor() -> Element {
    let auth = use_auth();
    let mut setup = use_signal(|| None::<TwoFactorSetup>);
    let mut form = use_signal(TwoFactorForm::default);
    let mut status = use_signal(FormStatus::default);

    let mut current = use_resource(move || {
        let mut auth = auth;
        async move {
            let result = auth.client().two_factor_status().await;
            auth.observe(&result);
            result
        }
    });

    let enable = move |_| {
        let mut auth = auth;
        spawn(async move {
            let client = auth.client();
            let outcome = submit(&mut status, Ok(()), || async { client.enable_two_factor().await }).await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if let Ok(started) = result {
                    form.set(TwoFactorForm::default());
                    setup.set(Some(started));
                }
            }
        });
    };

    let verify = move |evt: FormEvent| {
        evt.prevent_default();
        let mut auth = auth;
        spawn(async move {
            let code = form();
            let client = auth.client();
            let outcome = submit(&mut status, validate_form(&code), || async {
                client.verify_two_factor(&code.code).await
            })
            .await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if result.is_ok() {
                    setup.set(None);
                    status.write().succeed("Two-factor authentication is now enabled.");
                    current.restart();
                }
            }
        });
    };

    let disable = move |_| {
        let mut auth = auth;
        spawn(async move {
            let client = auth.client();
            let outcome = submit(&mut status, Ok(()), || async { client.disable_two_factor().await }).await;
            if let Some(result) = outcome {
                auth.observe(&result);
                if result.is_ok() {
                    status.write().succeed("Two-factor authentication is disabled.");
                    current.restart();
                }
            }
        });
    };

    let st = status();
    let state = match &*current.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { Alert { message: e.message() } },
        Some(Ok(two_factor)) if two_factor.enabled => rsx! {
            p { "Two-factor authentication is " strong { "enabled" } " for your account." }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: st.loading,
                onclick: disable,
                "Disable two-factor authentication"
            }
        },
        Some(Ok(_)) => rsx! {
            p { "Two-factor authentication is " strong { "disabled" } "." }
            if setup.read().is_none() {
                Button {
                    disabled: st.loading,
                    onclick: enable,
                    "Enable two-factor authentication"
                }
            }
        },
    };

    rsx! {
        div {
            class: "flex items-center justify-between mb-4",
            h1 { "Two-factor authentication" }
        }
        section {
            class: "mt-6 px-5 py-4 bg-white border border-neutral-200 rounded-md",
            if let Some(err) = st.error.clone() {
                Alert { message: err }
            }
            if let Some(message) = st.success.clone() {
                Alert { kind: AlertKind::Success, message }
            }
            {state}
            if let Some(pending) = setup() {
                form {
                    onsubmit: verify,
                    p { "Scan this code with your authenticator app, then enter the 6-digit code it shows." }
                    img { class: "block max-w-[220px] mx-auto my-4", src: "{pending.qr_code}", alt: "Two-factor QR code" }
                    if let Some(secret) = pending.secret.clone() {
                        p { class: "text-sm text-neutral-500", "Or enter this key manually: " code { "{secret}" } }
                    }
                    Field {
                        id: "two-factor-code",
                        label: "Verification code",
                        autocomplete: "one-time-code",
                        placeholder: "123456",
                        value: form.read().code.clone(),
                        error: st.field("code"),
                        oninput: move |v: String| {
                            form.write().code = v;
                            recheck(&mut status, &*form.peek(), "code");
                        },
                    }
                    div {
                        class: "flex justify-end gap-2",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| setup.set(None),
                            "Cancel"
                        }
                        Button {
                            r#type: "submit",
                            disabled: st.loading,
                            if st.loading { "Verifying..." } else { "Verify" }
                        }
                    }
                }
            }
        }
    }
}
