//! Create/edit dialog over a [`MutationModal`].

use super::fields::{ErrorAlert, SubmitButton, field_view};
use crate::auth::use_auth;
use icycon::forms::RecordForm;
use icycon::{ModalOptions, MutationModal};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// Saves through the client. A saved record fires `on_success`, then
/// `on_close`; cancelling fires only `on_close`.
#[component]
pub fn FormDialog<F: RecordForm>(
    record: Option<F::Record>,
    on_success: Rc<dyn Fn()>,
    on_close: Rc<dyn Fn()>,
) -> impl IntoView {
    let client = StoredValue::new_local(use_auth().client());
    let options = match record {
        Some(record) => ModalOptions::edit(record),
        None => ModalOptions::create(),
    };
    let modal = StoredValue::new_local(MutationModal::<F>::new(
        options
            .on_success(move |_| on_success())
            .on_close(move || on_close()),
    ));
    let version = RwSignal::new(0u64);
    let bump = move || {
        let _ = version.try_update(|v| *v += 1);
    };

    let title = modal.with_value(|m| m.title());
    let busy = Signal::derive(move || {
        version.track();
        modal.try_with_value(|m| m.is_busy()).unwrap_or(false)
    });
    let error = Signal::derive(move || {
        version.track();
        modal
            .try_with_value(|m| m.error().map(str::to_string))
            .flatten()
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(begun) = modal.try_update_value(|m| m.begin_submit()) else {
            return;
        };
        bump();
        let submission = match begun {
            Ok(submission) => submission,
            Err(e) => {
                tracing::debug!(error = %e, "submission refused");
                return;
            }
        };
        let Some(client) = client.try_get_value() else {
            return;
        };
        spawn_local(async move {
            let result = submission.execute(&client).await;
            modal.try_update_value(|m| {
                let _ = m.finish(result);
            });
            bump();
        });
    };

    let on_cancel = move |_| {
        modal.try_update_value(|m| m.close());
    };

    let fields = F::fields()
        .iter()
        .map(|spec| {
            let name = spec.name;
            field_view(
                *spec,
                move || {
                    version.track();
                    modal.try_with_value(|m| m.form().get(name)).unwrap_or_default()
                },
                move || {
                    version.track();
                    modal.try_with_value(|m| m.form().hint(name)).flatten()
                },
                move || {
                    version.track();
                    modal
                        .try_with_value(|m| m.error_field() == Some(name))
                        .unwrap_or(false)
                },
                move |value| {
                    modal.try_update_value(|m| m.set_field(name, value));
                    bump();
                },
            )
        })
        .collect_view();

    view! {
        <div class="modal modal-open">
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg mb-4">{title}</h3>
                <form class="space-y-3" on:submit=on_submit>
                    <ErrorAlert message=error />
                    {fields}
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=on_cancel disabled=move || busy.get()>
                            "Cancel"
                        </button>
                        <SubmitButton busy=busy label="Save" busy_label="Saving..." />
                    </div>
                </form>
            </div>
        </div>
    }
}
