use super::fields::ErrorAlert;
use super::form_dialog::FormDialog;
use crate::auth::use_auth;
use crate::web::read_file;
use icycon::forms::ProfileForm;
use icycon_shared::UserProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use wasm_bindgen::JsCast;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let profile = RwSignal::new(Option::<UserProfile>::None);
    let error = RwSignal::new(Option::<String>::None);
    let editing = RwSignal::new(false);
    let uploading = RwSignal::new(false);

    let load = move || {
        let client = auth.client();
        spawn_local(async move {
            match client.profile().await {
                Ok(found) => {
                    let _ = profile.try_set(Some(found));
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };
    load();

    let on_avatar = move |ev: leptos::web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };
        let client = auth.client();
        uploading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = match read_file(file).await {
                Ok(upload) => client.upload_avatar(upload).await.map_err(|e| e.to_string()),
                Err(e) => Err(e),
            };
            match result {
                Ok(url) => {
                    tracing::info!(%url, "avatar uploaded");
                    let _ = profile.try_update(|p| {
                        if let Some(p) = p {
                            p.avatar_url = Some(url);
                        }
                    });
                }
                Err(message) => {
                    let _ = error.try_set(Some(message));
                }
            }
            let _ = uploading.try_set(false);
        });
    };

    let editor = move || {
        if !editing.get() {
            return None;
        }
        let record = profile.get_untracked()?;
        let on_success: Rc<dyn Fn()> = Rc::new(load);
        let on_close: Rc<dyn Fn()> = Rc::new(move || editing.set(false));
        Some(view! {
            <FormDialog<ProfileForm> record=Some(record) on_success=on_success on_close=on_close />
        })
    };

    let field = move |label: &'static str, value: fn(&UserProfile) -> String| {
        view! {
            <div>
                <dt class="text-sm opacity-60">{label}</dt>
                <dd>{move || profile.with(|p| p.as_ref().map(value)).filter(|v| !v.is_empty()).unwrap_or_else(|| "-".into())}</dd>
            </div>
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h2 class="card-title">"Profile"</h2>
                    <button class="btn btn-primary btn-sm" disabled=move || profile.with(Option::is_none) on:click=move |_| editing.set(true)>
                        "Edit profile"
                    </button>
                </div>
                <ErrorAlert message=error />
                <div class="flex items-center gap-4">
                    <div class="avatar placeholder">
                        <div class="w-20 rounded-full bg-neutral text-neutral-content">
                            {move || match profile.with(|p| p.as_ref().and_then(|p| p.avatar_url.clone())) {
                                Some(url) => view! { <img src=url alt="avatar" /> }.into_any(),
                                None => view! { <span class="text-2xl">"?"</span> }.into_any(),
                            }}
                        </div>
                    </div>
                    <label class="btn btn-outline btn-sm">
                        {move || if uploading.get() { "Uploading..." } else { "Upload avatar" }}
                        <input type="file" accept="image/*" class="hidden" on:change=on_avatar disabled=move || uploading.get() />
                    </label>
                </div>
                <dl class="grid grid-cols-1 md:grid-cols-2 gap-4 mt-4">
                    {field("Email", |p| p.email.clone().unwrap_or_default())}
                    {field("Username", |p| p.username.clone().unwrap_or_default())}
                    {field("First name", |p| p.first_name.clone())}
                    {field("Last name", |p| p.last_name.clone())}
                    {field("Company", |p| p.company.clone())}
                    {field("Location", |p| p.location.clone())}
                    {field("Bio", |p| p.bio.clone())}
                </dl>
            </div>
        </div>
        {editor}
    }
}
