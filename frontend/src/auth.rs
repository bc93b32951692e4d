//! Authentication state shared through context.
//!
//! The session lives in `localStorage` (through the client's session
//! context); the signals here mirror it so the router and the shell react
//! to sign-in and sign-out.

use crate::web::{BrowserStorage, FetchHttpClient};
use icycon::{AuthScheme, ClientConfig, ClientResult, ResourceClient};
use icycon_shared::{SignupRequest, User};
use leptos::prelude::*;

pub type AppClient = ResourceClient<FetchHttpClient, BrowserStorage>;

/// API origin baked in at build time; unset means same-origin.
fn client_config() -> ClientConfig {
    let base = option_env!("ICYCON_API_BASE").unwrap_or("");
    let config = ClientConfig::new(base);
    match option_env!("ICYCON_AUTH_SCHEME").and_then(AuthScheme::parse) {
        Some(scheme) => config.with_auth_scheme(scheme),
        None => config,
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    client: StoredValue<AppClient, LocalStorage>,
    authenticated: RwSignal<bool>,
    user: RwSignal<Option<User>>,
}

impl AuthContext {
    /// Restores any session persisted by an earlier visit.
    pub fn new() -> Self {
        let client = ResourceClient::new(
            client_config(),
            FetchHttpClient,
            icycon::SessionContext::new(BrowserStorage),
        );
        let authenticated = RwSignal::new(client.is_authenticated());
        let user = RwSignal::new(client.current_user());
        if authenticated.get_untracked() {
            tracing::info!("restored saved session");
        }
        Self {
            client: StoredValue::new_local(client),
            authenticated,
            user,
        }
    }

    pub fn client(&self) -> AppClient {
        self.client.get_value()
    }

    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.authenticated.into()
    }

    pub fn user(&self) -> Signal<Option<User>> {
        self.user.into()
    }

    fn sync(&self) {
        let client = self.client();
        self.authenticated.set(client.is_authenticated());
        self.user.set(client.current_user());
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<()> {
        self.client().login(email, password).await?;
        self.sync();
        Ok(())
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<()> {
        self.client().signup(request).await?;
        self.sync();
        Ok(())
    }

    /// The router's auth effect takes care of leaving private pages.
    pub fn logout(&self) {
        self.client().logout();
        self.sync();
    }

    /// Pick up a user snapshot the client rewrote, e.g. after an email change.
    pub fn refresh_user(&self) {
        self.sync();
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
