//! Router service over the History API.
//!
//! Navigation runs request, guard, then render. The auth state is injected
//! as a signal so the router never depends on how sessions are stored.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Apply the auth guard to a requested route.
fn guard(target: AppRoute, is_auth: bool) -> AppRoute {
    if target.requires_auth() && !is_auth {
        tracing::info!(%target, "access denied, redirecting to login");
        return AppRoute::auth_failure_redirect();
    }
    if target.should_redirect_when_authenticated() && is_auth {
        tracing::debug!(%target, "already signed in, redirecting to dashboard");
        return AppRoute::auth_success_redirect();
    }
    target
}

/// Route for the address bar, rewriting it when the guard or an unknown
/// path sends the user elsewhere.
fn resolve_location(is_auth: bool) -> AppRoute {
    let path = current_path();
    let route = guard(AppRoute::from_path(&path), is_auth);
    let target = route.to_path();
    if target != path.trim_end_matches('/') && target != path {
        replace_history_state(&target);
    }
    route
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = resolve_location(is_authenticated.get_untracked());
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn navigate(&self, path: &str) {
        self.navigate_to(AppRoute::from_path(path));
    }

    pub fn navigate_to(&self, target: AppRoute) {
        let route = guard(target, self.is_authenticated.get_untracked());
        push_history_state(&route.to_path());
        self.set_route.set(route);
    }

    /// Back and forward buttons go through the same guard.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(resolve_location(is_authenticated.get_untracked()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // the listener lives as long as the page
        closure.forget();
    }

    /// Redirect when the user signs in or out.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let redirected = guard(route.clone(), is_auth);
            if redirected != route {
                tracing::info!(signed_in = is_auth, to = %redirected, "auth state changed");
                push_history_state(&redirected.to_path());
                set_route.set(redirected);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// In-app link that navigates without a page load.
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(route.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
