//! One labelled input per [`FieldSpec`], shared by every form.

use icycon::forms::{FieldKind, FieldSpec, FormFields};
use leptos::prelude::*;

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Password => "password",
        FieldKind::Number => "number",
        FieldKind::DateTime => "datetime-local",
        FieldKind::Date => "date",
        FieldKind::Url => "url",
        _ => "text",
    }
}

pub fn field_view(
    spec: FieldSpec,
    value: impl Fn() -> String + Clone + Send + Sync + 'static,
    hint: impl Fn() -> Option<String> + Send + Sync + 'static,
    invalid: impl Fn() -> bool + Copy + Send + Sync + 'static,
    on_input: impl Fn(String) + Copy + Send + Sync + 'static,
) -> AnyView {
    let control = match spec.kind {
        FieldKind::TextArea => view! {
            <textarea
                id=spec.name
                class=move || if invalid() { "textarea textarea-bordered textarea-error w-full h-32" } else { "textarea textarea-bordered w-full h-32" }
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select
                id=spec.name
                class=move || if invalid() { "select select-bordered select-error w-full" } else { "select select-bordered w-full" }
                on:change=move |ev| on_input(event_target_value(&ev))
            >
                // shown while the stored value is none of the options
                {
                    let value = value.clone();
                    view! {
                        <option
                            value=""
                            disabled=true
                            selected=move || {
                                let current = value();
                                !options.iter().any(|(option, _)| current == *option)
                            }
                        >
                            {format!("Choose {}", spec.label.to_lowercase())}
                        </option>
                    }
                }
                {options
                    .iter()
                    .map(|(option, label)| {
                        let value = value.clone();
                        view! {
                            <option value=*option selected=move || value() == *option>
                                {*label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                id=spec.name
                type=input_type(kind)
                step=if kind == FieldKind::Number { Some("any") } else { None }
                class=move || if invalid() { "input input-bordered input-error w-full" } else { "input input-bordered w-full" }
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-control w-full">
            <label class="label" for=spec.name>
                <span class="label-text">
                    {spec.label}
                    {spec.required.then_some(" *")}
                </span>
            </label>
            {control}
            {move || hint().map(|h| view! {
                <label class="label">
                    <span class="label-text-alt text-base-content/60">{h}</span>
                </label>
            })}
        </div>
    }
    .into_any()
}

/// Inputs for every field of a form held in a signal.
pub fn form_fields<F: FormFields + Send + Sync>(
    form: RwSignal<F>,
    invalid: RwSignal<Option<&'static str>>,
) -> impl IntoView {
    F::fields()
        .iter()
        .map(|spec| {
            let name = spec.name;
            field_view(
                *spec,
                move || form.with(|f| f.get(name)),
                move || form.with(|f| f.hint(name)),
                move || invalid.get() == Some(name),
                move |value| form.update(|f| f.set(name, value)),
            )
        })
        .collect_view()
}

#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn SubmitButton(
    #[prop(into)] busy: Signal<bool>,
    label: &'static str,
    busy_label: &'static str,
) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
            {move || if busy.get() {
                view! { <span class="loading loading-spinner"></span> {busy_label} }.into_any()
            } else {
                label.into_any()
            }}
        </button>
    }
}
