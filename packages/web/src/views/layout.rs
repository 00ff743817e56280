use dioxus::prelude::*;
use ui::components::Spinner;
use ui::{use_auth, Gate, Navbar};

use crate::Route;

/// Renders nested routes only for an authenticated session.
#[component]
pub fn Protected() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    match auth.gate() {
        Gate::Loading => rsx! {
            Spinner { label: "Checking your session..." }
        },
        Gate::Render => rsx! {
            Outlet::<Route> {}
        },
        Gate::Redirect => {
            tracing::debug!("no session, redirecting to login");
            nav.replace(Route::Login {});
            rsx! {}
        }
    }
}

#[component]
pub fn AppShell() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::FamilyGroups {}, active_class: "active", "Families" }
            Link { to: Route::MyChildren {}, active_class: "active", "My children" }
            Link { to: Route::JoinFamily { code: String::new(), token: String::new() }, active_class: "active", "Join a family" }
            Link { to: Route::Permissions {}, active_class: "active", "Permissions" }
            Link { to: Route::Profile {}, active_class: "active", "Profile" }
        }
        main {
            class: "max-w-5xl mx-auto p-6",
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen p-8",
            div {
                class: "w-full max-w-sm p-8 bg-white border border-neutral-200 rounded-md",
                h1 { "Page not found" }
                p { class: "text-sm text-neutral-500", "Nothing lives at /{path}." }
                Link { to: Route::FamilyGroups {}, "Back to your families" }
            }
        }
    }
}
