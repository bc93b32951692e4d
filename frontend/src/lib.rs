//! IcyCon browser application.
//!
//! - `web`: fetch transport, localStorage session storage, routing
//! - `auth`: session signals shared through context
//! - `components`: pages and the generic browser/dialog views

mod auth;
mod components {
    pub mod account;
    pub mod analytics;
    pub mod browser_view;
    pub mod dashboard;
    pub mod fields;
    pub mod form_dialog;
    pub mod login;
    pub mod pages;
    pub mod profile;
    pub mod seo_site;
}
pub(crate) mod web;

use crate::auth::AuthContext;
use crate::components::account::AccountPage;
use crate::components::analytics::AnalyticsPage;
use crate::components::dashboard::{DashboardShell, LandingPage};
use crate::components::login::{LoginPage, SignupPage};
use crate::components::pages::{AsoPage, EmailPage, MarketplacePage, SeoPage, SocialPage};
use crate::components::profile::ProfilePage;
use crate::components::seo_site::SiteDetail;
use leptos::prelude::*;
use web::route::{AppRoute, Module};
use web::router::{Router, RouterOutlet};

fn module_view(module: Module) -> AnyView {
    match module {
        Module::Seo => view! { <SeoPage /> }.into_any(),
        Module::Aso => view! { <AsoPage /> }.into_any(),
        Module::Marketplace => view! { <MarketplacePage /> }.into_any(),
        Module::Analytics => view! { <AnalyticsPage /> }.into_any(),
        Module::Social => view! { <SocialPage /> }.into_any(),
        Module::Email => view! { <EmailPage /> }.into_any(),
        Module::Profile => view! { <ProfilePage /> }.into_any(),
        Module::Account => view! { <AccountPage /> }.into_any(),
    }
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Module(module) => {
            view! { <DashboardShell>{module_view(module)}</DashboardShell> }.into_any()
        }
        AppRoute::SeoSite(id) => view! {
            <DashboardShell>
                <SiteDetail id=id />
            </DashboardShell>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
