//! Single SEO site: details, edit and delete.

use super::fields::ErrorAlert;
use super::form_dialog::FormDialog;
use crate::auth::use_auth;
use crate::web::route::{AppRoute, Module};
use crate::web::router::use_router;
use icycon::forms::SeoSiteForm;
use icycon_shared::{RecordId, SeoSite};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

#[component]
pub fn SiteDetail(id: RecordId) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let site = RwSignal::new(Option::<SeoSite>::None);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);
    let editing = RwSignal::new(false);
    let id = StoredValue::new(id);

    let load = move || {
        let client = auth.client();
        let id = id.get_value();
        loading.set(true);
        spawn_local(async move {
            match client.get::<SeoSite>(&id).await {
                Ok(found) => {
                    let _ = site.try_set(Some(found));
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };
    load();

    let on_delete = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Delete this site?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let client = auth.client();
        let id = id.get_value();
        spawn_local(async move {
            match client.remove::<SeoSite>(&id).await {
                Ok(_) => router.navigate_to(AppRoute::Module(Module::Seo)),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let editor = move || {
        if !editing.get() {
            return None;
        }
        let record = site.get_untracked()?;
        let on_success: Rc<dyn Fn()> = Rc::new(load);
        let on_close: Rc<dyn Fn()> = Rc::new(move || editing.set(false));
        Some(view! {
            <FormDialog<SeoSiteForm> record=Some(record) on_success=on_success on_close=on_close />
        })
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h2 class="card-title">
                        {move || site.with(|s| s.as_ref().map(|s| s.domain.clone())).unwrap_or_else(|| "Site".to_string())}
                    </h2>
                    <div class="flex gap-2">
                        <button class="btn btn-ghost btn-sm" on:click=move |_| router.navigate_to(AppRoute::Module(Module::Seo))>
                            "Back"
                        </button>
                        <button class="btn btn-primary btn-sm" disabled=move || site.with(Option::is_none) on:click=move |_| editing.set(true)>
                            "Edit"
                        </button>
                        <button class="btn btn-error btn-outline btn-sm" disabled=move || site.with(Option::is_none) on:click=on_delete>
                            "Delete"
                        </button>
                    </div>
                </div>
                <ErrorAlert message=error />
                <Show when=move || loading.get() && site.with(Option::is_none)>
                    <span class="loading loading-spinner loading-md"></span>
                </Show>
                {move || site.get().map(|s| view! {
                    <dl class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div><dt class="text-sm opacity-60">"Domain"</dt><dd>{s.domain}</dd></div>
                        <div><dt class="text-sm opacity-60">"Default locale"</dt><dd>{s.default_locale.unwrap_or_else(|| "-".into())}</dd></div>
                        <div><dt class="text-sm opacity-60">"Sitemap"</dt><dd>{s.sitemaps_url.unwrap_or_else(|| "-".into())}</dd></div>
                        <div><dt class="text-sm opacity-60">"Rank"</dt><dd>{s.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".into())}</dd></div>
                        <div><dt class="text-sm opacity-60">"Added"</dt><dd>{s.created_at.unwrap_or_else(|| "-".into())}</dd></div>
                    </dl>
                })}
            </div>
        </div>
        {editor}
    }
}

