use super::fields::{ErrorAlert, SubmitButton, form_fields};
use super::pages::browser_page;
use crate::auth::use_auth;
use icycon::forms::{ChangeEmailForm, ChangePasswordForm};
use icycon::modules::account;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn Notice(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="status" class="alert alert-success text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
fn ChangePasswordCard() -> impl IntoView {
    let auth = use_auth();
    let form = RwSignal::new(ChangePasswordForm::default());
    let invalid = RwSignal::new(Option::<&'static str>::None);
    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (done, set_done) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_done.set(None);
        invalid.set(None);
        let request = match form.with_untracked(ChangePasswordForm::to_request) {
            Ok(request) => request,
            Err(e) => {
                invalid.set(Some(e.field));
                set_error_msg.set(Some(e.message));
                return;
            }
        };
        set_busy.set(true);
        let client = auth.client();
        spawn_local(async move {
            match client.change_password(&request).await {
                Ok(()) => {
                    let _ = form.try_set(ChangePasswordForm::default());
                    let _ = set_done.try_set(Some("Password updated".to_string()));
                }
                Err(e) => {
                    let _ = set_error_msg.try_set(Some(e.to_string()));
                }
            }
            let _ = set_busy.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Change password"</h2>
                <ErrorAlert message=error_msg />
                <Notice message=done />
                {form_fields(form, invalid)}
                <div class="card-actions justify-end mt-4">
                    <SubmitButton busy=busy label="Update password" busy_label="Updating..." />
                </div>
            </form>
        </div>
    }
}

#[component]
fn ChangeEmailCard() -> impl IntoView {
    let auth = use_auth();
    let form = RwSignal::new(ChangeEmailForm::default());
    let invalid = RwSignal::new(Option::<&'static str>::None);
    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (done, set_done) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_done.set(None);
        invalid.set(None);
        let request = match form.with_untracked(ChangeEmailForm::to_request) {
            Ok(request) => request,
            Err(e) => {
                invalid.set(Some(e.field));
                set_error_msg.set(Some(e.message));
                return;
            }
        };
        set_busy.set(true);
        let client = auth.client();
        spawn_local(async move {
            match client.change_email(&request).await {
                Ok(()) => {
                    // the client rewrote the stored user; mirror it
                    auth.refresh_user();
                    let _ = form.try_set(ChangeEmailForm::default());
                    let _ = set_done.try_set(Some(format!("Email changed to {}", request.new_email)));
                }
                Err(e) => {
                    let _ = set_error_msg.try_set(Some(e.to_string()));
                }
            }
            let _ = set_busy.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Change email"</h2>
                <ErrorAlert message=error_msg />
                <Notice message=done />
                {form_fields(form, invalid)}
                <div class="card-actions justify-end mt-4">
                    <SubmitButton busy=busy label="Update email" busy_label="Updating..." />
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn AccountPage() -> impl IntoView {
    let client = use_auth().client();

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <ChangePasswordCard />
            <ChangeEmailCard />
        </div>
        <div class="mt-8">{browser_page(account::config(&client), None, None)}</div>
    }
}
