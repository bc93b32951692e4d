use crate::auth::use_auth;
use crate::web::route::{AppRoute, Module};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// Sidebar, top bar and the active module's content.
#[component]
pub fn DashboardShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let user = auth.user();

    let active = move || router.current_route().get().module();
    let on_logout = move |_| auth.logout();

    view! {
        <div class="drawer lg:drawer-open">
            <input id="sidebar" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-none lg:hidden">
                        <label for="sidebar" class="btn btn-square btn-ghost">"☰"</label>
                    </div>
                    <div class="flex-1">
                        <span class="text-xl font-bold px-2">"IcyCon"</span>
                    </div>
                    <div class="flex-none gap-2">
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {move || user.get().map(|u| u.email).unwrap_or_default()}
                        </span>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                            "Log out"
                        </button>
                    </div>
                </div>
                <main class="p-4 md:p-8 space-y-6">{children()}</main>
            </div>
            <div class="drawer-side">
                <label for="sidebar" class="drawer-overlay"></label>
                <ul class="menu p-4 w-64 min-h-full bg-base-100">
                    {Module::ALL
                        .into_iter()
                        .map(|module| view! {
                            <li>
                                <a
                                    href=AppRoute::Module(module).to_path()
                                    class=move || if active() == Some(module) { "active" } else { "" }
                                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        router.navigate_to(AppRoute::Module(module));
                                    }
                                >
                                    {module.label()}
                                </a>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-xl">
                    <h1 class="text-5xl font-bold">"IcyCon"</h1>
                    <p class="py-6">
                        "SEO, app store optimisation, social scheduling, email and analytics in one dashboard."
                    </p>
                    <div class="flex gap-2 justify-center">
                        <Link route=AppRoute::Signup class="btn btn-primary">"Get started"</Link>
                        <Link route=AppRoute::Login class="btn btn-ghost">"Sign in"</Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
