//! One page per dashboard module, each a [`BrowserView`] over its config.

use super::browser_view::{BrowserView, Detail, Editor, EditorRequest};
use super::form_dialog::FormDialog;
use crate::auth::use_auth;
use crate::web::route::AppRoute;
use icycon::browser::TabKey;
use icycon::forms::{AsoAppForm, EmailTemplateForm, ProductForm, SeoSiteForm, SocialPostForm};
use icycon::modules::{aso, email, marketplace, seo, social};
use icycon::{BrowserConfig, RecordRow, ResourceBrowser};
use leptos::prelude::*;

pub(crate) fn browser_page<K, R>(
    config: BrowserConfig<K, R>,
    editor: Option<Editor<K, R>>,
    detail: Option<Detail<R>>,
) -> AnyView
where
    K: TabKey + Send + Sync,
    R: RecordRow,
{
    match ResourceBrowser::new(config) {
        Ok(browser) => view! { <BrowserView browser=browser editor=editor detail=detail /> }.into_any(),
        Err(e) => view! { <div class="alert alert-error">{e.to_string()}</div> }.into_any(),
    }
}

// =========================================================
// Editors
// =========================================================

fn seo_editor(req: EditorRequest<seo::Tab, seo::Record>) -> AnyView {
    let record = match &req.record {
        Some(seo::Record::Site(site)) => Some(site.clone()),
        _ => None,
    };
    view! { <FormDialog<SeoSiteForm> record=record on_success=req.on_success() on_close=req.close() /> }
        .into_any()
}

fn seo_detail(record: &seo::Record) -> Option<AppRoute> {
    match record {
        seo::Record::Site(site) => Some(AppRoute::SeoSite(site.id.clone())),
        _ => None,
    }
}

fn aso_editor(req: EditorRequest<aso::Tab, aso::Record>) -> AnyView {
    let record = match &req.record {
        Some(aso::Record::App(app)) => Some(app.clone()),
        _ => None,
    };
    view! { <FormDialog<AsoAppForm> record=record on_success=req.on_success() on_close=req.close() /> }
        .into_any()
}

fn marketplace_editor(req: EditorRequest<marketplace::Tab, marketplace::Record>) -> AnyView {
    let record = match &req.record {
        Some(marketplace::Record::Product(product)) => Some(product.clone()),
        _ => None,
    };
    view! { <FormDialog<ProductForm> record=record on_success=req.on_success() on_close=req.close() /> }
        .into_any()
}

fn social_editor(req: EditorRequest<social::Tab, social::Record>) -> AnyView {
    let record = match &req.record {
        Some(social::Record::Post(post)) => Some(post.clone()),
        _ => None,
    };
    view! { <FormDialog<SocialPostForm> record=record on_success=req.on_success() on_close=req.close() /> }
        .into_any()
}

fn email_editor(req: EditorRequest<email::Tab, email::Record>) -> AnyView {
    let record = match &req.record {
        Some(email::Record::Template(template)) => Some(template.clone()),
        _ => None,
    };
    view! { <FormDialog<EmailTemplateForm> record=record on_success=req.on_success() on_close=req.close() /> }
        .into_any()
}

// =========================================================
// Pages
// =========================================================

#[component]
pub fn SeoPage() -> impl IntoView {
    let client = use_auth().client();
    browser_page(seo::config(&client), Some(seo_editor), Some(seo_detail))
}

#[component]
pub fn AsoPage() -> impl IntoView {
    let client = use_auth().client();
    browser_page(aso::config(&client), Some(aso_editor), None)
}

#[component]
pub fn MarketplacePage() -> impl IntoView {
    let client = use_auth().client();
    browser_page(marketplace::config(&client), Some(marketplace_editor), None)
}

#[component]
pub fn SocialPage() -> impl IntoView {
    let client = use_auth().client();
    browser_page(social::config(&client), Some(social_editor), None)
}

#[component]
pub fn EmailPage() -> impl IntoView {
    let client = use_auth().client();
    browser_page(email::config(&client), Some(email_editor), None)
}
