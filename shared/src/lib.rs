use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;
pub mod resources;

pub use protocol::*;
pub use resources::*;

// =========================================================
// Constants
// =========================================================

/// Persistent storage key holding the bearer credential.
pub const STORAGE_TOKEN_KEY: &str = "authToken";
/// Persistent storage key holding the serialized user snapshot.
pub const STORAGE_USER_KEY: &str = "user";

pub const PATH_LOGIN: &str = "/api/auth/login/";
pub const PATH_SIGNUP: &str = "/api/auth/signup/";
pub const PATH_CHANGE_PASSWORD: &str = "/api/auth/password/";
pub const PATH_CHANGE_EMAIL: &str = "/api/auth/email/";
pub const PATH_PROFILE: &str = "/api/profile/";
pub const PATH_PROFILE_AVATAR: &str = "/api/profile/avatar/";
pub const PATH_ANALYTICS_EXPORT: &str = "/api/analytics/export/";

/// Multipart field name the avatar upload endpoint expects.
pub const AVATAR_FIELD: &str = "avatar";

// =========================================================
// Identity
// =========================================================

/// Identity of a backend record. The backend mostly hands out integers,
/// but a few collections use string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        match id.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Str(id.to_string()),
        }
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::from(id.as_str())
    }
}

// =========================================================
// Resource traits
// =========================================================

/// A backend-owned record type reachable under a fixed collection path.
pub trait Resource: DeserializeOwned + Clone + 'static {
    /// Collection path, relative to the API base, with the trailing slash
    /// the backend router expects.
    const PATH: &'static str;
    /// Human label used when the server gives no usable error body.
    const LABEL: &'static str;

    fn id(&self) -> RecordId;

    /// Path of a single record in this collection.
    fn item_path(id: &RecordId) -> String {
        format!("{}{}/", Self::PATH, id)
    }
}

/// A resource that the dashboard can create and edit.
pub trait Writable: Resource + Serialize {
    type Draft: Serialize + Clone + fmt::Debug + 'static;
}

// =========================================================
// Collections
// =========================================================

/// Body of a list endpoint. Paginated views wrap the rows in an envelope,
/// plain views return the array directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Plain(Vec<T>),
    Paged(Page<T>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> ListPayload<T> {
    pub fn into_records(self) -> Vec<T> {
        match self {
            ListPayload::Plain(rows) => rows,
            ListPayload::Paged(page) => page.results,
        }
    }
}

// =========================================================
// Session
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Token plus the user snapshot persisted alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "abc"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::Int(7), RecordId::Str("abc".into())]);
        assert_eq!(RecordId::from("42"), RecordId::Int(42));
        assert_eq!(RecordId::Int(42).to_string(), "42");
    }

    #[test]
    fn list_payload_unwraps_pagination_envelope() {
        let plain: ListPayload<serde_json::Value> =
            serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(plain.into_records().len(), 2);

        let paged: ListPayload<serde_json::Value> =
            serde_json::from_str(r#"{"count":3,"next":null,"results":[{"id":3}]}"#).unwrap();
        let rows = paged.into_records();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], 3);
    }

    #[test]
    fn item_path_appends_id_with_trailing_slash() {
        assert_eq!(
            SeoSite::item_path(&RecordId::Int(5)),
            "/api/seo/sites/5/"
        );
    }
}
