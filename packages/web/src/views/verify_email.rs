use api::ApiError;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Spinner};
use ui::use_auth;

use crate::Route;

const MISSING_TOKEN: &str = "The verification link is missing its token";

/// Confirms the address from the emailed link as soon as the page opens.
#[component]
pub fn VerifyEmail(token: String) -> Element {
    let auth = use_auth();
    let outcome = use_resource(move || {
        let token = token.trim().to_string();
        let client = auth.client();
        async move {
            if token.is_empty() {
                return Err(ApiError::Invalid(MISSING_TOKEN.to_string()));
            }
            client.verify_email(&token).await
        }
    });

    let body = match &*outcome.read() {
        None => rsx! { Spinner { label: "Verifying your email..." } },
        Some(Ok(())) => rsx! {
            Alert { kind: AlertKind::Success, message: "Your email address is verified." }
            Link { to: Route::Login {}, "Continue to sign in" }
        },
        Some(Err(e)) => rsx! {
            Alert { message: e.message() }
            Link { to: Route::Login {}, "Back to sign in" }
        },
    };

    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen p-8",
            div {
                class: "w-full max-w-sm p-8 bg-white border border-neutral-200 rounded-md",
                h1 { "Email verification" }
                {body}
            }
        }
    }
}
