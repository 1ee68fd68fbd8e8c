//! Session Adapter
//!
//! Whatever holds request state between redirects implements
//! `SessionState`. `ErrorBag::make` reads the error bags from it once.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::bags::BagStore;

/// Key validation errors are flashed under
pub const SESSION_ERRORS_KEY: &str = "errors";

pub trait SessionState {
    fn get(&self, key: &str) -> Option<BagStore>;
}

impl SessionState for HashMap<String, BagStore> {
    fn get(&self, key: &str) -> Option<BagStore> {
        HashMap::get(self, key).cloned()
    }
}

/// Session data held as a JSON object. A malformed entry counts as absent.
impl SessionState for Value {
    fn get(&self, key: &str) -> Option<BagStore> {
        let entry = self.as_object()?.get(key)?;
        match BagStore::deserialize(entry) {
            Ok(bags) => Some(bags),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed session errors");
                None
            }
        }
    }
}
