use super::fields::{ErrorAlert, SubmitButton, form_fields};
use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use icycon::forms::SignupForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn AuthCard(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-base-content/70">{subtitle}</p>
                </div>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">{children()}</div>
            </div>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // The router redirects to the dashboard once the session is stored.
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            if let Err(e) = auth
                .login(&email.get_untracked(), &password.get_untracked())
                .await
            {
                let _ = set_error_msg.try_set(Some(e.to_string()));
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <AuthCard title="Welcome back" subtitle="Sign in to your IcyCon dashboard">
            <form class="card-body" on:submit=on_submit>
                <ErrorAlert message=error_msg />
                <div class="form-control">
                    <label class="label" for="email">
                        <span class="label-text">"Email"</span>
                    </label>
                    <input
                        id="email"
                        type="email"
                        placeholder="you@example.com"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="password">
                        <span class="label-text">"Password"</span>
                    </label>
                    <input
                        id="password"
                        type="password"
                        placeholder="••••••••"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control mt-6">
                    <SubmitButton busy=is_submitting label="Sign in" busy_label="Signing in..." />
                </div>
                <p class="text-sm text-center mt-2">
                    "No account yet? "
                    <Link route=AppRoute::Signup class="link link-primary">"Sign up"</Link>
                </p>
            </form>
        </AuthCard>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();

    let form = RwSignal::new(SignupForm::default());
    let invalid = RwSignal::new(Option::<&'static str>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        invalid.set(None);

        let request = match form.with_untracked(SignupForm::to_request) {
            Ok(request) => request,
            Err(e) => {
                invalid.set(Some(e.field));
                set_error_msg.set(Some(e.message));
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            if let Err(e) = auth.signup(&request).await {
                let _ = set_error_msg.try_set(Some(e.to_string()));
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <AuthCard title="Create your account" subtitle="Start growing with IcyCon">
            <form class="card-body" on:submit=on_submit>
                <ErrorAlert message=error_msg />
                {form_fields(form, invalid)}
                <div class="form-control mt-6">
                    <SubmitButton busy=is_submitting label="Sign up" busy_label="Creating account..." />
                </div>
                <p class="text-sm text-center mt-2">
                    "Already registered? "
                    <Link route=AppRoute::Login class="link link-primary">"Sign in"</Link>
                </p>
            </form>
        </AuthCard>
    }
}
