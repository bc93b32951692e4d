use serde_json::Value;

// =========================================================
// Client-side validation
// =========================================================

/// A form check that failed before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Form field the message belongs to.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// =========================================================
// Transport
// =========================================================

/// The request never produced an HTTP response (DNS, refused, timeout, CORS).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

// =========================================================
// Client errors
// =========================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// No token stored; nothing was sent.
    #[error("You are not signed in")]
    Unauthenticated,
    #[error("Could not reach the server: {0}")]
    Transport(String),
    #[error("{0}")]
    Validation(ValidationError),
    /// Non-2xx answer. `message` is already user facing.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 2xx answer whose body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// A second submission while the first is still in flight.
    #[error("A submission is already in progress")]
    Busy,
}

impl ClientError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Unauthenticated => "UNAUTHENTICATED",
            ClientError::Transport(_) => "TRANSPORT",
            ClientError::Validation(_) => "INVALID_INPUT",
            ClientError::Server { status: 401, .. } => "UNAUTHORIZED",
            ClientError::Server { status: 403, .. } => "FORBIDDEN",
            ClientError::Server { status: 404, .. } => "RESOURCE_NOT_FOUND",
            ClientError::Server { status, .. } if *status < 500 => "REJECTED",
            ClientError::Server { .. } => "SERVER_ERROR",
            ClientError::Decode(_) => "DECODE",
            ClientError::Busy => "BUSY",
        }
    }

    /// Transport failures are the only ones a plain retry may fix.
    pub fn is_retryable_by_user(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(e: ValidationError) -> Self {
        ClientError::Validation(e)
    }
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        ClientError::Transport(e.0)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// =========================================================
// Server error bodies
// =========================================================

const MESSAGE_KEYS: [&str; 3] = ["detail", "message", "error"];
const NON_FIELD_KEY: &str = "non_field_errors";

/// Pull the first user facing message out of a JSON error body.
///
/// Order: `detail`/`message`/`error`, then `non_field_errors`, then the first
/// field carrying a string or a list of strings, rendered as `field: message`.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match &value {
        Value::Object(map) => {
            for key in MESSAGE_KEYS {
                if let Some(msg) = map.get(key).and_then(first_text) {
                    return Some(msg);
                }
            }
            if let Some(msg) = map.get(NON_FIELD_KEY).and_then(first_text) {
                return Some(msg);
            }
            map.iter()
                .find_map(|(field, v)| first_text(v).map(|msg| format!("{}: {}", field, msg)))
        }
        other => first_text(other),
    }
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}
