//! Browser glue: transport, storage, file helpers and routing.

mod file;
mod http;
pub mod route;
pub mod router;
mod storage;

pub use file::{download_bytes, read_file};
pub use http::FetchHttpClient;
pub use storage::BrowserStorage;
