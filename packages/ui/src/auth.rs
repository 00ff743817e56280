//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] builds the API client from the [`ClientConfig`], restores
//! the session from browser storage once mounted, and re-checks the stored
//! credential's expiry on a timer. Views reach both through [`use_auth`].

use std::sync::Arc;
use std::time::Duration;

use api::{ApiClient, ApiError, AuthPayload, HttpTransport, Session, SessionManager, User};
use dioxus::prelude::*;
use store::{now_unix, ClientConfig, CredentialStore, KeyValueStore};

/// The client every view talks through.
pub type Client = ApiClient<HttpTransport>;

/// What a guarded view should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Loading,
    Render,
    Redirect,
}

pub fn guard(session: &Session) -> Gate {
    match session {
        Session::Initializing => Gate::Loading,
        Session::Authenticated { .. } => Gate::Render,
        Session::Anonymous => Gate::Redirect,
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: Signal<SessionManager>,
    client: Signal<Client>,
    /// One-shot message carried to the next page (e.g. after registration).
    pub flash: Signal<Option<String>>,
}

impl AuthContext {
    pub fn client(&self) -> Client {
        self.client.peek().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn loading(&self) -> bool {
        self.session.read().loading()
    }

    pub fn gate(&self) -> Gate {
        guard(self.session.read().state())
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user().cloned()
    }

    /// Adopt a login or registration response. Returns whether a session was established.
    pub fn establish(&mut self, payload: AuthPayload) -> bool {
        self.session.write().establish(payload)
    }

    pub fn logout(&mut self) {
        self.session.write().logout();
    }

    pub fn set_user(&mut self, user: User) {
        self.session.write().set_user(user);
    }

    /// Let the session react to a call's outcome; a 401 signs the user out.
    pub fn observe<T>(&mut self, result: &Result<T, ApiError>) {
        if let Err(err) = result {
            if err.is_unauthorized() {
                self.session.write().handle_error(err);
            }
        }
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash.set(Some(message.into()));
    }

    pub fn take_flash(&mut self) -> Option<String> {
        if self.flash.peek().is_none() {
            return None;
        }
        self.flash.write().take()
    }
}

/// Get the authentication context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// The flash message left for this page, taken once the component has mounted.
pub fn use_flash() -> Signal<Option<String>> {
    let mut auth = use_auth();
    let mut flash = use_signal(|| None::<String>);
    use_effect(move || {
        if let Some(message) = auth.take_flash() {
            flash.set(Some(message));
        }
    });
    flash
}

fn storage_backend() -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
}

pub fn build_client(config: &ClientConfig) -> Client {
    let credentials = CredentialStore::new(storage_backend(), config.storage_keys());
    ApiClient::new(HttpTransport::new(&config.api), credentials)
}

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let client_config = config.clone();
    let client = use_signal(move || build_client(&client_config));
    let skew = config.session.expiry_skew_secs;
    let mut session =
        use_signal(move || SessionManager::new(client.peek().credentials().clone(), skew));
    let flash = use_signal(|| None::<String>);

    // Leave `Initializing` once mounted.
    use_effect(move || {
        if session.peek().loading() {
            session.write().restore(now_unix());
        }
    });

    // Periodic expiry check
    let interval = config.session.expiry_check_interval_secs;
    use_effect(move || {
        if interval == 0 {
            return;
        }
        spawn(async move {
            loop {
                sleep(Duration::from_secs(u64::from(interval))).await;

                if !session.peek().is_authenticated() {
                    continue;
                }
                let mut checked = session.peek().clone();
                if checked.expire_if_needed(now_unix()) || checked.sync() {
                    tracing::info!("session ended while idle");
                    session.set(checked);
                }
            }
        });
    });

    use_context_provider(|| AuthContext {
        session,
        client,
        flash,
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth = use_auth();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| auth.logout(),
            "{label}"
        }
    }
}
