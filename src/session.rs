//! Session context.
//!
//! The token and a user snapshot live in a string key-value store (browser
//! `localStorage` in production). The context is handed to the client at
//! construction instead of being looked up globally.

use icycon_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session, User};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Minimal persistent string storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns `false` when the backend refused the write.
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// In-memory storage; clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

/// Reads and writes the persisted session.
///
/// Token presence is the only authorization signal; no expiry is tracked.
#[derive(Clone)]
pub struct SessionContext<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionContext<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// A snapshot that fails to parse is treated as absent.
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(STORAGE_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable user snapshot");
                None
            }
        }
    }

    pub fn session(&self) -> Option<Session> {
        let token = self.token()?;
        Some(Session {
            token,
            user: self.user().unwrap_or_default(),
        })
    }

    pub fn save(&self, session: &Session) {
        let user = serde_json::to_string(&session.user).unwrap_or_else(|_| "{}".to_string());
        if !self.storage.set(STORAGE_TOKEN_KEY, &session.token)
            || !self.storage.set(STORAGE_USER_KEY, &user)
        {
            tracing::warn!("session storage rejected the write");
        }
    }

    /// Replace the user snapshot, keeping the token.
    pub fn update_user(&self, user: &User) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.storage.set(STORAGE_USER_KEY, &raw);
        }
    }

    /// Both keys go together.
    pub fn clear(&self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_USER_KEY);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user: User {
                email: "a@b.com".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn save_writes_both_keys_and_clear_removes_them() {
        let storage = MemoryStorage::new();
        let ctx = SessionContext::new(storage.clone());

        ctx.save(&session("T1"));
        assert_eq!(storage.get("authToken").as_deref(), Some("T1"));
        assert!(storage.get("user").unwrap().contains("a@b.com"));
        assert_eq!(ctx.session(), Some(session("T1")));

        ctx.clear();
        assert_eq!(storage.get("authToken"), None);
        assert_eq!(storage.get("user"), None);
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let storage = MemoryStorage::new();
        storage.set("authToken", "  ");
        let ctx = SessionContext::new(storage);
        assert_eq!(ctx.token(), None);
        assert_eq!(ctx.session(), None);
    }

    #[test]
    fn corrupt_user_snapshot_is_ignored() {
        let storage = MemoryStorage::new();
        storage.set("authToken", "T1");
        storage.set("user", "{not json");
        let ctx = SessionContext::new(storage);
        assert_eq!(ctx.user(), None);
        assert_eq!(ctx.session().unwrap().user, User::default());
    }
}
