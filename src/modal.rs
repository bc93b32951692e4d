//! Mutation Modal: create or edit exactly one record.
//!
//! Submission is split in two so a UI can keep the modal in a cell without
//! holding a borrow across the network call:
//! [`MutationModal::begin_submit`] validates and marks the modal busy, the
//! returned [`Submission`] performs the single client call, and
//! [`MutationModal::finish`] applies the outcome.

use crate::client::{Mutation, ResourceClient};
use crate::error::{ClientError, ClientResult};
use crate::forms::RecordForm;
use crate::request::HttpClient;
use crate::session::KeyValueStorage;
use icycon_shared::{RecordId, Resource, Writable};

pub type SuccessCallback<R> = Box<dyn FnMut(&Mutation<R>)>;
pub type CloseCallback = Box<dyn FnMut()>;

/// How the modal is opened. `record: None` means create mode.
pub struct ModalOptions<R> {
    pub is_open: bool,
    pub record: Option<R>,
    pub on_success: SuccessCallback<R>,
    pub on_close: CloseCallback,
}

impl<R> ModalOptions<R> {
    pub fn create() -> Self {
        Self {
            is_open: true,
            record: None,
            on_success: Box::new(|_| {}),
            on_close: Box::new(|| {}),
        }
    }

    pub fn edit(record: R) -> Self {
        Self {
            record: Some(record),
            ..Self::create()
        }
    }

    pub fn on_success(mut self, f: impl FnMut(&Mutation<R>) + 'static) -> Self {
        self.on_success = Box::new(f);
        self
    }

    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Box::new(f);
        self
    }
}

/// One validated mutation, ready to send.
#[derive(Debug, Clone)]
pub enum Submission<R: Writable> {
    Create(R::Draft),
    Update { id: RecordId, draft: R::Draft },
}

impl<R: Writable> Submission<R> {
    pub async fn execute<C: HttpClient, S: KeyValueStorage>(
        &self,
        client: &ResourceClient<C, S>,
    ) -> ClientResult<Mutation<R>> {
        match self {
            Submission::Create(draft) => client.create::<R>(draft).await,
            Submission::Update { id, draft } => client.update::<R>(id, draft).await,
        }
    }
}

pub struct MutationModal<F: RecordForm> {
    is_open: bool,
    /// Copy of the record being edited; the list state is never touched.
    original: Option<F::Record>,
    form: F,
    error: Option<String>,
    error_field: Option<&'static str>,
    busy: bool,
    on_success: SuccessCallback<F::Record>,
    on_close: CloseCallback,
}

impl<F: RecordForm> MutationModal<F> {
    pub fn new(options: ModalOptions<F::Record>) -> Self {
        let form = options
            .record
            .as_ref()
            .map(F::from_record)
            .unwrap_or_default();
        Self {
            is_open: options.is_open,
            original: options.record,
            form,
            error: None,
            error_field: None,
            busy: false,
            on_success: options.on_success,
            on_close: options.on_close,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn title(&self) -> String {
        let verb = if self.is_edit() { "Edit" } else { "Create" };
        format!("{} {}", verb, F::NOUN)
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn set_field(&mut self, field: &str, value: String) {
        self.form.set(field, value);
    }

    /// Inline error from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_field(&self) -> Option<&'static str> {
        self.error_field
    }

    /// Validate and mark busy. Nothing is sent when this fails.
    pub fn begin_submit(&mut self) -> ClientResult<Submission<F::Record>> {
        if self.busy {
            return Err(ClientError::Busy);
        }
        self.error = None;
        self.error_field = None;

        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.error = Some(e.message.clone());
                self.error_field = Some(e.field);
                return Err(e.into());
            }
        };

        self.busy = true;
        Ok(match &self.original {
            Some(record) => Submission::Update {
                id: record.id(),
                draft,
            },
            None => Submission::Create(draft),
        })
    }

    /// Apply the outcome of the call started by [`Self::begin_submit`].
    pub fn finish(&mut self, result: ClientResult<Mutation<F::Record>>) -> ClientResult<()> {
        self.busy = false;
        match result {
            Ok(mutation) => {
                tracing::info!(noun = F::NOUN, edit = self.is_edit(), "record saved");
                (self.on_success)(&mutation);
                self.close();
                Ok(())
            }
            Err(e) => {
                // Values stay as typed so the user can correct and resubmit.
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn submit<C: HttpClient, S: KeyValueStorage>(
        &mut self,
        client: &ResourceClient<C, S>,
    ) -> ClientResult<()> {
        let submission = self.begin_submit()?;
        let result = submission.execute(client).await;
        self.finish(result)
    }

    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        self.busy = false;
        (self.on_close)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::forms::{ProductForm, SocialPostForm};
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::session::{MemoryStorage, SessionContext};
    use icycon_shared::{MarketplaceProduct, SocialPost};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    const POSTS: &str = "http://api.test/api/social/posts/";

    fn client() -> (ResourceClient<Rc<MockHttpClient>, MemoryStorage>, Rc<MockHttpClient>) {
        let mock = Rc::new(MockHttpClient::new());
        let storage = MemoryStorage::new();
        storage.set("authToken", "T0");
        let client = ResourceClient::new(
            ClientConfig::new("http://api.test"),
            mock.clone(),
            SessionContext::new(storage),
        );
        (client, mock)
    }

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, ModalOptions<SocialPost>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let on_success = events.clone();
        let on_close = events.clone();
        let options = ModalOptions::create()
            .on_success(move |_| on_success.borrow_mut().push("success"))
            .on_close(move || on_close.borrow_mut().push("close"));
        (events, options)
    }

    #[tokio::test]
    async fn over_limit_post_is_rejected_before_any_request() {
        let (client, mock) = client();
        let (events, options) = recorder();
        let mut modal = MutationModal::<SocialPostForm>::new(options);
        modal.set_field("platform", "twitter".into());
        modal.set_field("content", "x".repeat(281));

        let err = modal.submit(&client).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(mock.request_count(), 0);
        assert!(modal.is_open());
        assert!(!modal.is_busy());
        assert_eq!(modal.error_field(), Some("content"));
        assert_eq!(modal.form().content.chars().count(), 281);
        assert!(events.borrow().is_empty());
    }

    #[tokio::test]
    async fn success_notifies_then_closes() {
        let (client, mock) = client();
        mock.mock_json(
            HttpMethod::Post,
            POSTS,
            201,
            json!({"id": 7, "content": "hello", "platform": "twitter"}),
        );
        let (events, options) = recorder();
        let mut modal = MutationModal::<SocialPostForm>::new(options);
        modal.set_field("content", "hello".into());

        modal.submit(&client).await.unwrap();

        assert_eq!(*events.borrow(), vec!["success", "close"]);
        assert!(!modal.is_open());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn server_rejection_stays_open_with_values() {
        let (client, mock) = client();
        mock.mock_json(
            HttpMethod::Post,
            POSTS,
            400,
            json!({"scheduled_time": ["Scheduled time must be in the future."]}),
        );
        let (events, options) = recorder();
        let mut modal = MutationModal::<SocialPostForm>::new(options);
        modal.set_field("content", "hello".into());
        modal.set_field("scheduled_time", "2020-01-01T10:00".into());

        assert!(modal.submit(&client).await.is_err());

        assert!(modal.is_open());
        assert_eq!(
            modal.error(),
            Some("scheduled_time: Scheduled time must be in the future.")
        );
        assert_eq!(modal.form().scheduled_time, "2020-01-01T10:00");
        assert!(events.borrow().is_empty());

        // corrected resubmission goes through
        mock.mock_json(
            HttpMethod::Post,
            POSTS,
            201,
            json!({"id": 8, "content": "hello", "platform": "twitter"}),
        );
        modal.set_field("scheduled_time", String::new());
        assert!(modal.submit(&client).await.is_ok());
        assert_eq!(modal.error(), None);
    }

    #[test]
    fn second_submission_while_in_flight_is_refused() {
        let mut modal = MutationModal::<SocialPostForm>::new(ModalOptions::create());
        modal.set_field("content", "hello".into());

        assert!(modal.begin_submit().is_ok());
        assert!(modal.is_busy());
        assert_eq!(modal.begin_submit().unwrap_err(), ClientError::Busy);
    }

    #[tokio::test]
    async fn edit_mode_patches_the_record_copy() {
        let (client, mock) = client();
        mock.mock_no_content(
            HttpMethod::Patch,
            "http://api.test/api/marketplace/products/3/",
        );
        let product: MarketplaceProduct = serde_json::from_value(json!({
            "id": 3, "title": "Audit pack", "category": "tools", "price": 10.0
        }))
        .unwrap();
        let saw_no_content = Rc::new(RefCell::new(false));
        let flag = saw_no_content.clone();
        let mut modal = MutationModal::<ProductForm>::new(
            ModalOptions::edit(product)
                .on_success(move |m| *flag.borrow_mut() = m.is_no_content()),
        );

        assert_eq!(modal.title(), "Edit Product");
        assert_eq!(modal.form().title, "Audit pack");
        modal.set_field("price", "12".into());
        modal.submit(&client).await.unwrap();

        assert!(*saw_no_content.borrow());
        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert!(matches!(&req.body, crate::request::RequestBody::Json(b) if b.contains("\"price\":12.0")));
    }
}
