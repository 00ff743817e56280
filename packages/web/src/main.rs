use dioxus::prelude::*;

use store::ClientConfig;
use ui::AuthProvider;
use views::{
    AppShell, FamilyDetails, FamilyGroups, ForgotPassword, JoinFamily, Login, MyChildren, NotFound,
    Permissions, Profile, Protected, Register, ResetPassword, TwoFactor, VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[route("/reset-password?:token")]
    ResetPassword { token: String },
    #[route("/verify-email?:token")]
    VerifyEmail { token: String },

    #[layout(Protected)]
        #[layout(AppShell)]
            #[route("/")]
            Root {},
            #[route("/family-groups")]
            FamilyGroups {},
            #[route("/families/:id")]
            FamilyDetails { id: String },
            #[route("/my-children")]
            MyChildren {},
            #[route("/join-family?:code&:token")]
            JoinFamily { code: String, token: String },
            #[route("/2fa")]
            TwoFactor {},
            #[route("/profile")]
            Profile {},
            #[route("/permissions")]
            Permissions {},
        #[end_layout]
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Embedded at build time; edit before bundling to point at another API.
const CONFIG: &str = include_str!("../family-profile.toml");

fn load_config() -> ClientConfig {
    ClientConfig::from_toml(CONFIG).unwrap_or_else(|e| {
        tracing::error!(error = %e, file = ClientConfig::filename(), "invalid configuration, using defaults");
        ClientConfig::default()
    })
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::TAILWIND_CSS }
        document::Link { rel: "stylesheet", href: ui::COMPONENTS_CSS }

        AuthProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/family-groups`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::FamilyGroups {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = ClientConfig::from_toml(CONFIG).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.session.expiry_check_interval_secs, 30);
    }

    #[test]
    fn test_routes_round_trip() {
        let route: Route = "/join-family?code=ABC123&token=t1".parse().unwrap();
        assert_eq!(
            route,
            Route::JoinFamily {
                code: "ABC123".to_string(),
                token: "t1".to_string()
            }
        );
        assert_eq!(Route::FamilyDetails { id: "42".into() }.to_string(), "/families/42");
        assert!(matches!("/nowhere".parse::<Route>(), Ok(Route::NotFound { .. })));
    }
}
