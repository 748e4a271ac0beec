//! `localStorage`-backed key/value store.
use credible_fx::KeyValueStore;

use crate::dom;

/// Durable store scoped to the page origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStore;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebStorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl KeyValueStore for WebStore {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = dom::local_storage()
            .map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))?;
        storage
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage()
            .map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_cause() {
        let err = WebStorageError::Storage("QuotaExceededError".into());
        assert_eq!(err.to_string(), "Storage error: QuotaExceededError");
        let err = WebStorageError::Unavailable("localStorage unavailable".into());
        assert!(err.to_string().starts_with("Storage unavailable"));
    }
}
