//! Generic tabbed table over a [`ResourceBrowser`].

use super::fields::ErrorAlert;
use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use icycon::browser::TabKey;
use icycon::{BrowserState, ModalSlot, RecordRow, ResourceBrowser, Visible};
use icycon_shared::RecordId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// Renders the create/edit dialog for the record in the browser's modal slot.
pub type Editor<K, R> = fn(EditorRequest<K, R>) -> AnyView;

/// Maps a row to a page of its own, if it has one.
pub type Detail<R> = fn(&R) -> Option<AppRoute>;

pub struct EditorRequest<K, R> {
    /// `None` in create mode.
    pub record: Option<R>,
    key: K,
    browser: ResourceBrowser<K, R>,
}

impl<K: TabKey, R: RecordRow> EditorRequest<K, R> {
    /// Refetch what the invalidation policy marks stale.
    pub fn on_success(&self) -> Rc<dyn Fn()> {
        let browser = self.browser.clone();
        let key = self.key;
        Rc::new(move || {
            let browser = browser.clone();
            spawn_local(async move { browser.invalidate(key).await });
        })
    }

    pub fn close(&self) -> Rc<dyn Fn()> {
        let browser = self.browser.clone();
        Rc::new(move || browser.update(BrowserState::close_modal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RowView {
    id: RecordId,
    cells: Vec<String>,
    managed: bool,
    detail: Option<AppRoute>,
}

#[derive(Debug, Clone, PartialEq)]
enum BodyView {
    Loading,
    Empty(&'static str),
    Rows(Vec<RowView>),
    Failed(String),
}

fn body_view<K: TabKey, R: RecordRow>(
    browser: &ResourceBrowser<K, R>,
    detail: Option<Detail<R>>,
) -> BodyView {
    let state = browser.state();
    match state.visible() {
        Visible::Loading => BodyView::Loading,
        Visible::Empty => BodyView::Empty(
            browser
                .config()
                .spec(state.active_tab())
                .map(|c| c.empty_message)
                .unwrap_or_default(),
        ),
        Visible::Failed(message) => BodyView::Failed(message.to_string()),
        Visible::Records(rows) => BodyView::Rows(
            rows.iter()
                .map(|r| RowView {
                    id: r.id(),
                    cells: r.cells(),
                    managed: r.location().is_some(),
                    detail: detail.and_then(|d| d(r)),
                })
                .collect(),
        ),
    }
}

fn modal_key<R: RecordRow>(slot: &ModalSlot<R>) -> Option<Option<RecordId>> {
    match slot {
        ModalSlot::Closed => None,
        ModalSlot::Create => Some(None),
        ModalSlot::Edit(r) => Some(Some(r.id())),
    }
}

#[component]
pub fn BrowserView<K, R>(
    browser: ResourceBrowser<K, R>,
    editor: Option<Editor<K, R>>,
    detail: Option<Detail<R>>,
) -> impl IntoView
where
    K: TabKey + Send + Sync,
    R: RecordRow,
{
    let auth = use_auth();
    let router = use_router();
    let version = RwSignal::new(0u64);
    let notice = RwSignal::new(Option::<String>::None);

    let browser = browser.with_listener(move || {
        let _ = version.try_update(|v| *v += 1);
    });
    let title = browser.config().title;
    let tabs: Vec<(K, &'static str)> = browser
        .config()
        .collections
        .iter()
        .map(|c| (c.key, c.label))
        .collect();
    let stored = StoredValue::new_local(browser.clone());
    let client = StoredValue::new_local(auth.client());

    let loader = browser.clone();
    spawn_local(async move { loader.load().await });
    on_cleanup(move || {
        stored.try_with_value(|b| b.unmount());
    });

    let active = Signal::derive(move || {
        version.track();
        stored.try_with_value(|b| b.state().active_tab())
    });
    let loading = Signal::derive(move || {
        version.track();
        stored
            .try_with_value(|b| b.state().is_loading())
            .unwrap_or(false)
    });
    let banner = Signal::derive(move || {
        version.track();
        stored
            .try_with_value(|b| b.state().banner().map(str::to_string))
            .flatten()
    });
    let body = Memo::new(move |_| {
        version.track();
        stored
            .try_with_value(|b| body_view(b, detail))
            .unwrap_or(BodyView::Loading)
    });
    let headers = move || {
        active
            .get()
            .and_then(|k| stored.try_with_value(|b| b.config().spec(k).map(|c| c.headers)))
            .flatten()
            .unwrap_or_default()
    };
    let can_create = move || {
        editor.is_some()
            && active
                .get()
                .and_then(|k| stored.try_with_value(|b| b.config().spec(k).map(|c| c.creatable)))
                .flatten()
                .unwrap_or(false)
    };
    let open_modal = Memo::new(move |_| {
        version.track();
        stored
            .try_with_value(|b| modal_key(b.state().modal()))
            .flatten()
    });

    let refresh = move |_| {
        if let Some(b) = stored.try_get_value() {
            spawn_local(async move { b.load().await });
        }
    };
    let open_create = move |_| {
        stored.try_with_value(|b| b.update(BrowserState::open_create));
    };
    let open_edit = move |id: RecordId| {
        stored.try_with_value(|b| {
            b.update(|s| {
                s.open_edit(&id);
            })
        });
    };
    let delete = move |id: RecordId| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Delete this record?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let (Some(b), Some(client)) = (stored.try_get_value(), client.try_get_value()) else {
            return;
        };
        notice.set(None);
        spawn_local(async move {
            let key = b.state().active_tab();
            if let Err(e) = b.remove(&client, key, &id).await {
                let _ = notice.try_set(Some(e.to_string()));
            }
        });
    };

    let modal_view = move || {
        open_modal.get()?;
        let editor = editor?;
        let (record, key) = stored.try_with_value(|b| {
            let state = b.state();
            let record = match state.modal() {
                ModalSlot::Edit(r) => Some(r.clone()),
                _ => None,
            };
            (record, state.active_tab())
        })?;
        Some(editor(EditorRequest {
            record,
            key,
            browser: stored.try_get_value()?,
        }))
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h2 class="card-title">{title}</h2>
                    <div class="flex gap-2">
                        <Show when=can_create>
                            <button class="btn btn-primary btn-sm" on:click=open_create>"New"</button>
                        </Show>
                        <button class="btn btn-ghost btn-sm" on:click=refresh disabled=move || loading.get()>
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                            } else {
                                "Refresh".into_any()
                            }}
                        </button>
                    </div>
                </div>

                <div class="px-6 space-y-2">
                    <ErrorAlert message=banner />
                    <ErrorAlert message=notice />
                </div>

                <div role="tablist" class="tabs tabs-bordered px-6">
                    {tabs
                        .into_iter()
                        .map(|(key, label)| view! {
                            <a
                                role="tab"
                                class=move || if active.get() == Some(key) { "tab tab-active" } else { "tab" }
                                on:click=move |_| {
                                    stored.try_with_value(|b| b.update(|s| s.select_tab(key)));
                                }
                            >
                                {label}
                            </a>
                        })
                        .collect_view()}
                </div>

                <div class="overflow-x-auto w-full">
                    {move || match body.get() {
                        BodyView::Loading => view! {
                            <div class="text-center py-8 text-base-content/50">
                                <span class="loading loading-spinner loading-md"></span> " Loading..."
                            </div>
                        }
                        .into_any(),
                        BodyView::Empty(message) => view! {
                            <div class="text-center py-8 text-base-content/50">{message}</div>
                        }
                        .into_any(),
                        BodyView::Failed(message) => view! {
                            <div class="text-center py-8 text-error">{message}</div>
                        }
                        .into_any(),
                        BodyView::Rows(rows) => view! {
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        {headers().iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || rows.clone()
                                        key=|row| row.clone()
                                        children=move |row| {
                                            let RowView { id, cells, managed, detail } = row;
                                            let edit_id = id.clone();
                                            let delete_id = id;
                                            view! {
                                                <tr>
                                                    {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                                                    <td class="text-right whitespace-nowrap">
                                                        {detail.map(|route| view! {
                                                            <button class="btn btn-ghost btn-xs" on:click=move |_| router.navigate_to(route.clone())>
                                                                "Open"
                                                            </button>
                                                        })}
                                                        <Show when=move || managed && editor.is_some()>
                                                            <button class="btn btn-ghost btn-xs" on:click={
                                                                let id = edit_id.clone();
                                                                move |_| open_edit(id.clone())
                                                            }>"Edit"</button>
                                                        </Show>
                                                        <Show when=move || managed>
                                                            <button class="btn btn-ghost btn-xs text-error" on:click={
                                                                let id = delete_id.clone();
                                                                move |_| delete(id.clone())
                                                            }>"Delete"</button>
                                                        </Show>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>
        {modal_view}
    }
}
