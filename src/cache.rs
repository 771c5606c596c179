use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Rendered tree listings keyed by `owner/repo@ref`.
///
/// Entries are inserted only after a fully successful fetch and render, and
/// live for the lifetime of the process; there is no invalidation.
#[derive(Clone, Default)]
pub struct ListingCache {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl ListingCache {
    pub fn key(owner: &str, repo: &str, reference: &str) -> String {
        format!("{}/{}@{}", owner, repo, reference)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: String, rendered: String) {
        self.inner.lock().unwrap().insert(key, rendered);
    }
}
