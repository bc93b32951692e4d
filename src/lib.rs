//! IcyCon dashboard core.
//!
//! - `client`: Resource Client, one entry point to every backend collection
//! - `session`: persisted token and user snapshot, injected into the client
//! - `browser`: tabbed Resource Browser state machine and its async driver
//! - `modal` / `forms`: create and edit flows with client-side validation
//! - `modules`: per-domain browser configurations
//!
//! Everything here is platform neutral; the transport and the storage are
//! supplied by the caller (reqwest natively, `fetch` and `localStorage` in
//! the browser).

pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod modal;
pub mod modules;
pub mod request;
pub mod session;
pub mod validation;

pub use browser::{
    BrowserConfig, BrowserState, InvalidationPolicy, ModalSlot, Phase, RecordRow, ResourceBrowser,
    Visible,
};
pub use client::{ApiPayload, Mutation, ResourceClient};
pub use config::{AuthScheme, ClientConfig};
pub use error::{ClientError, ClientResult, TransportError, ValidationError};
pub use forms::{FormFields, RecordForm};
pub use modal::{ModalOptions, MutationModal, Submission};
pub use request::{FileUpload, HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::{KeyValueStorage, MemoryStorage, SessionContext};

#[cfg(feature = "native")]
pub use request::ReqwestHttpClient;
