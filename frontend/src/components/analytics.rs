use super::fields::{ErrorAlert, SubmitButton, form_fields};
use super::pages::browser_page;
use crate::auth::use_auth;
use crate::web::download_bytes;
use icycon::ApiPayload;
use icycon::forms::ExportForm;
use icycon::modules::analytics;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let client = use_auth().client();
    let (export_open, set_export_open) = signal(false);

    view! {
        <div class="flex justify-end">
            <button class="btn btn-secondary btn-sm" on:click=move |_| set_export_open.set(true)>
                "Export"
            </button>
        </div>
        {browser_page(analytics::config(&client), None, None)}
        <Show when=move || export_open.get()>
            <ExportDialog on_close=move || set_export_open.set(false) />
        </Show>
    }
}

fn file_name(extension: &str) -> String {
    format!("analytics-export.{}", extension)
}

/// Save whatever the export endpoint answered.
fn deliver(payload: ApiPayload, extension: &str) -> Result<(), String> {
    match payload {
        ApiPayload::Binary {
            content_type,
            bytes,
        } => {
            let content_type = content_type.unwrap_or_else(|| "application/octet-stream".into());
            download_bytes(&bytes, &content_type, &file_name(extension))
        }
        ApiPayload::Json(value) => {
            if let Some(url) = value.get("download_url").and_then(|v| v.as_str()) {
                let window = web_sys::window().ok_or("no window")?;
                return window
                    .open_with_url_and_target(url, "_blank")
                    .map(|_| ())
                    .map_err(|e| format!("{:?}", e));
            }
            let text = serde_json::to_vec_pretty(&value).map_err(|e| e.to_string())?;
            download_bytes(&text, "application/json", &file_name("json"))
        }
        ApiPayload::Empty => Err("The export was empty".to_string()),
    }
}

#[component]
pub fn ExportDialog(on_close: impl Fn() + Copy + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let form = RwSignal::new(ExportForm::default());
    let invalid = RwSignal::new(Option::<&'static str>::None);
    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        invalid.set(None);
        let request = match form.with_untracked(ExportForm::to_request) {
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
            let outcome = match client.export_analytics(&request).await {
                Ok(payload) => deliver(payload, request.format.extension()),
                Err(e) => Err(e.to_string()),
            };
            let _ = set_busy.try_set(false);
            match outcome {
                Ok(()) => on_close(),
                Err(message) => {
                    tracing::warn!(%message, "analytics export failed");
                    let _ = set_error_msg.try_set(Some(message));
                }
            }
        });
    };

    view! {
        <div class="modal modal-open">
            <div class="modal-box">
                <h3 class="font-bold text-lg mb-4">"Export analytics"</h3>
                <form class="space-y-3" on:submit=on_submit>
                    <ErrorAlert message=error_msg />
                    {form_fields(form, invalid)}
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| on_close()>
                            "Cancel"
                        </button>
                        <SubmitButton busy=busy label="Download" busy_label="Exporting..." />
                    </div>
                </form>
            </div>
        </div>
    }
}
