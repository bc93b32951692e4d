//! Resource Browser: a tabbed view over a fixed set of related collections.
//!
//! [`BrowserState`] is a plain state machine with no I/O. [`ResourceBrowser`]
//! drives it: it issues the configured fetches concurrently, applies each
//! result as it arrives and refetches after mutations.

use crate::client::ResourceClient;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::session::KeyValueStorage;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use icycon_shared::{RecordId, Resource};
use std::cell::RefCell;
use std::fmt::Debug;
use std::future::Future;
use std::rc::Rc;

#[cfg(test)]
mod tests;

// =========================================================
// Configuration
// =========================================================

/// A row of a browser table.
pub trait RecordRow: Clone + 'static {
    fn id(&self) -> RecordId;
    /// Display cells, in the order of the collection's headers.
    fn cells(&self) -> Vec<String>;

    /// Item path and collection label of rows the user may edit or delete.
    /// Read-only rows have none.
    fn location(&self) -> Option<(String, &'static str)> {
        None
    }
}

/// Tab identifier of one collection.
pub trait TabKey: Copy + Eq + Debug + 'static {}

impl<T: Copy + Eq + Debug + 'static> TabKey for T {}

pub type Fetcher<R> = Rc<dyn Fn() -> LocalBoxFuture<'static, ClientResult<Vec<R>>>>;

/// Build a fetcher listing `Res` and wrapping each record as a row.
pub fn list_fetcher<Res, R, C, S>(client: &ResourceClient<C, S>, wrap: fn(Res) -> R) -> Fetcher<R>
where
    Res: Resource,
    R: 'static,
    C: HttpClient + Clone + 'static,
    S: KeyValueStorage + Clone + 'static,
{
    let client = client.clone();
    Rc::new(move || {
        let client = client.clone();
        async move {
            let records = client.list::<Res>().await?;
            Ok(records.into_iter().map(wrap).collect())
        }
        .boxed_local()
    })
}

pub struct CollectionSpec<K, R> {
    pub key: K,
    pub label: &'static str,
    pub headers: &'static [&'static str],
    /// Shown instead of an empty table.
    pub empty_message: &'static str,
    /// Whether the tab offers a create action.
    pub creatable: bool,
    pub fetch: Fetcher<R>,
}

/// Which collections a successful mutation refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationPolicy {
    /// Every configured collection.
    #[default]
    All,
    /// Only the collection the mutation targeted.
    Mutated,
}

pub struct BrowserConfig<K, R> {
    pub title: &'static str,
    pub collections: Vec<CollectionSpec<K, R>>,
    pub invalidation: InvalidationPolicy,
}

impl<K: TabKey, R> BrowserConfig<K, R> {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            collections: Vec::new(),
            invalidation: InvalidationPolicy::default(),
        }
    }

    pub fn collection(
        mut self,
        key: K,
        label: &'static str,
        headers: &'static [&'static str],
        fetch: Fetcher<R>,
    ) -> Self {
        self.collections.push(CollectionSpec {
            key,
            label,
            headers,
            empty_message: "No records yet.",
            creatable: false,
            fetch,
        });
        self
    }

    /// Applies to the most recently added collection.
    pub fn empty_message(mut self, message: &'static str) -> Self {
        if let Some(last) = self.collections.last_mut() {
            last.empty_message = message;
        }
        self
    }

    /// Applies to the most recently added collection.
    pub fn creatable(mut self) -> Self {
        if let Some(last) = self.collections.last_mut() {
            last.creatable = true;
        }
        self
    }

    pub fn invalidation(mut self, policy: InvalidationPolicy) -> Self {
        self.invalidation = policy;
        self
    }

    pub fn keys(&self) -> Vec<K> {
        self.collections.iter().map(|c| c.key).collect()
    }

    pub fn spec(&self, key: K) -> Option<&CollectionSpec<K, R>> {
        self.collections.iter().find(|c| c.key == key)
    }
}

// =========================================================
// State machine
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    /// No collection holds records: every fetch that settled failed.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotStatus<R> {
    Pending,
    Loaded(Vec<R>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalSlot<R> {
    Closed,
    Create,
    /// A copy; the collection itself is never edited in place.
    Edit(R),
}

/// What the active tab should render.
#[derive(Debug, PartialEq)]
pub enum Visible<'a, R> {
    Loading,
    /// Completed fetch with no records.
    Empty,
    Records(&'a [R]),
    Failed(&'a str),
}

/// Issued by [`BrowserState::begin_load`]; results carrying an older ticket
/// are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct BrowserState<K, R> {
    phase: Phase,
    active: K,
    slots: Vec<(K, SlotStatus<R>)>,
    /// First failure among the collections, carried over for those a
    /// partial refetch leaves untouched.
    banner: Option<String>,
    modal: ModalSlot<R>,
    generation: u64,
    outstanding: usize,
    mounted: bool,
}

impl<K: TabKey, R: RecordRow> BrowserState<K, R> {
    /// The first key is the initially active tab.
    pub fn new(keys: &[K]) -> Option<Self> {
        let active = *keys.first()?;
        Some(Self {
            phase: Phase::Idle,
            active,
            slots: keys.iter().map(|k| (*k, SlotStatus::Pending)).collect(),
            banner: None,
            modal: ModalSlot::Closed,
            generation: 0,
            outstanding: 0,
            mounted: true,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn active_tab(&self) -> K {
        self.active
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn modal(&self) -> &ModalSlot<R> {
        &self.modal
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn status(&self, key: K) -> Option<&SlotStatus<R>> {
        self.slots.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    pub fn records(&self, key: K) -> &[R] {
        match self.status(key) {
            Some(SlotStatus::Loaded(records)) => records,
            _ => &[],
        }
    }

    /// Pure view switch.
    pub fn select_tab(&mut self, key: K) {
        if self.status(key).is_some() {
            self.active = key;
        }
    }

    pub fn visible(&self) -> Visible<'_, R> {
        match self.status(self.active) {
            Some(SlotStatus::Loaded(records)) if records.is_empty() => Visible::Empty,
            Some(SlotStatus::Loaded(records)) => Visible::Records(records),
            Some(SlotStatus::Failed(message)) => Visible::Failed(message),
            Some(SlotStatus::Pending) | None => Visible::Loading,
        }
    }

    /// Start a load of `keys`, superseding any load still in flight.
    pub fn begin_load(&mut self, keys: &[K]) -> LoadTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.outstanding = 0;
        for (key, status) in &mut self.slots {
            if keys.contains(key) {
                *status = SlotStatus::Pending;
                self.outstanding += 1;
            }
        }
        self.banner = self.slots.iter().find_map(|(_, status)| match status {
            SlotStatus::Failed(message) => Some(message.clone()),
            _ => None,
        });
        if self.outstanding == 0 {
            self.settle();
        }
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Record one fetch result. Returns `false` when it was discarded as
    /// stale or arrived after unmount.
    pub fn apply(&mut self, ticket: LoadTicket, key: K, result: ClientResult<Vec<R>>) -> bool {
        if !self.mounted || ticket.generation != self.generation {
            return false;
        }
        let Some((_, status)) = self.slots.iter_mut().find(|(k, _)| *k == key) else {
            return false;
        };
        if !matches!(status, SlotStatus::Pending) {
            return false;
        }

        *status = match result {
            Ok(records) => SlotStatus::Loaded(records),
            Err(e) => {
                let message = e.to_string();
                if self.banner.is_none() {
                    self.banner = Some(message.clone());
                }
                SlotStatus::Failed(message)
            }
        };

        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            self.settle();
        }
        true
    }

    /// The phase after a load, judged over every collection.
    fn settle(&mut self) {
        let any_loaded = self
            .slots
            .iter()
            .any(|(_, status)| matches!(status, SlotStatus::Loaded(_)));
        let any_failed = self
            .slots
            .iter()
            .any(|(_, status)| matches!(status, SlotStatus::Failed(_)));
        self.phase = if any_failed && !any_loaded {
            Phase::Failed
        } else {
            Phase::Ready
        };
    }

    /// Further results are ignored from here on.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn open_create(&mut self) {
        self.modal = ModalSlot::Create;
    }

    /// Opens the editor on a copy of the record with `id` in the active tab.
    pub fn open_edit(&mut self, id: &RecordId) -> bool {
        let record = self
            .records(self.active)
            .iter()
            .find(|r| r.id() == *id)
            .cloned();
        match record {
            Some(record) => {
                self.modal = ModalSlot::Edit(record);
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalSlot::Closed;
    }
}

// =========================================================
// Driver
// =========================================================

pub type ChangeListener = Rc<dyn Fn()>;

/// Shares its state through `Rc`, so clones drive the same view.
#[derive(Clone)]
pub struct ResourceBrowser<K, R> {
    config: Rc<BrowserConfig<K, R>>,
    state: Rc<RefCell<BrowserState<K, R>>>,
    listener: Option<ChangeListener>,
}

impl<K: TabKey, R: RecordRow> ResourceBrowser<K, R> {
    pub fn new(config: BrowserConfig<K, R>) -> ClientResult<Self> {
        let state = BrowserState::new(&config.keys()).ok_or_else(|| {
            ClientError::Decode(format!("{} has no collections configured", config.title))
        })?;
        Ok(Self {
            config: Rc::new(config),
            state: Rc::new(RefCell::new(state)),
            listener: None,
        })
    }

    /// Called after every state change the driver makes.
    pub fn with_listener(mut self, listener: impl Fn() + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn config(&self) -> &BrowserConfig<K, R> {
        &self.config
    }

    pub fn state(&self) -> std::cell::Ref<'_, BrowserState<K, R>> {
        self.state.borrow()
    }

    /// Apply a synchronous change (tab switch, modal open) and notify.
    pub fn update(&self, f: impl FnOnce(&mut BrowserState<K, R>)) {
        f(&mut self.state.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener();
        }
    }

    /// Fetch every collection.
    pub async fn load(&self) {
        let keys = self.config.keys();
        self.refresh(&keys).await;
    }

    /// Fetch `keys` concurrently; each result lands as soon as it arrives.
    pub async fn refresh(&self, keys: &[K]) {
        if !self.state.borrow().is_mounted() {
            return;
        }
        let ticket = self.state.borrow_mut().begin_load(keys);
        self.notify();
        tracing::debug!(browser = self.config.title, ?keys, "loading collections");

        let mut pending: FuturesUnordered<_> = self
            .config
            .collections
            .iter()
            .filter(|c| keys.contains(&c.key))
            .map(|c| {
                let key = c.key;
                let fetch = (c.fetch)();
                async move { (key, fetch.await) }
            })
            .collect();

        while let Some((key, result)) = pending.next().await {
            if let Err(e) = &result {
                tracing::warn!(browser = self.config.title, ?key, error = %e, "collection fetch failed");
            }
            let applied = self.state.borrow_mut().apply(ticket, key, result);
            if applied {
                self.notify();
            }
        }
    }

    pub fn unmount(&self) {
        self.state.borrow_mut().unmount();
    }

    /// Run one mutation against `key`'s collection. On success the
    /// invalidation policy decides what is refetched, then the modal closes.
    /// On failure nothing changes and the error is returned to the caller.
    pub async fn run_mutation<T, Fut>(&self, key: K, mutation: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let value = mutation.await?;
        if !self.state.borrow().is_mounted() {
            return Ok(value);
        }
        self.invalidate(key).await;
        self.update(BrowserState::close_modal);
        Ok(value)
    }

    /// Refetch what a successful mutation of `key`'s collection made stale.
    pub async fn invalidate(&self, key: K) {
        let keys = match self.config.invalidation {
            InvalidationPolicy::All => self.config.keys(),
            InvalidationPolicy::Mutated => vec![key],
        };
        self.refresh(&keys).await;
    }

    /// Delete the row `id` of `key`'s collection. `Ok(false)` when the row
    /// is unknown or read-only; nothing is sent then.
    pub async fn remove<C, S>(
        &self,
        client: &ResourceClient<C, S>,
        key: K,
        id: &RecordId,
    ) -> ClientResult<bool>
    where
        C: HttpClient,
        S: KeyValueStorage,
    {
        let location = self
            .state
            .borrow()
            .records(key)
            .iter()
            .find(|r| r.id() == *id)
            .and_then(RecordRow::location);
        let Some((path, label)) = location else {
            tracing::warn!(browser = self.config.title, ?key, %id, "row cannot be deleted");
            return Ok(false);
        };
        self.run_mutation(key, client.remove_at(&path, label)).await
    }
}
