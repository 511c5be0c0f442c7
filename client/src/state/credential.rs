//! Credential context for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! The master key lives in `localStorage` under [`MASTER_KEY`] and is written
//! by the gate page. The HTTP client reads it on every request and the route
//! guard reads it on every navigation, so nothing here caches a value.
//!
//! TRADE-OFFS
//! ==========
//! `Credentials` holds an `Rc<dyn KeyValueStore>`: the browser is
//! single-threaded and every holder must observe the same live value, so a
//! shared owned cell is enough. Native builds (tests, tooling) swap in
//! [`MemoryStore`].

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key holding the master key.
pub const MASTER_KEY: &str = "MASTER_KEY";

const CHANNEL_PASSWORD_PREFIX: &str = "CHANNEL_PASSWORD:";

/// Minimal string key-value store, shaped after the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// `window.localStorage`. Every call re-resolves the storage object; outside
/// the browser build reads return `None` and writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Read/write access to the master key and per-channel passwords.
#[derive(Clone)]
pub struct Credentials {
    store: Rc<dyn KeyValueStore>,
}

impl Credentials {
    #[must_use]
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Credentials backed by `localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStore))
    }

    /// The stored master key, or `None` when unset or empty.
    #[must_use]
    pub fn master_key(&self) -> Option<String> {
        self.store.get_item(MASTER_KEY).filter(|key| !key.is_empty())
    }

    /// Value for the `x-master-key` header: the stored key verbatim, or `""`.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.store.get_item(MASTER_KEY).unwrap_or_default()
    }

    pub fn set_master_key(&self, key: &str) {
        self.store.set_item(MASTER_KEY, key.trim());
    }

    pub fn clear_master_key(&self) {
        self.store.remove_item(MASTER_KEY);
    }

    #[must_use]
    pub fn channel_password(&self, channel: &str) -> Option<String> {
        self.store
            .get_item(&channel_password_key(channel))
            .filter(|password| !password.is_empty())
    }

    /// Remember the password for `channel`. An empty password forgets it.
    pub fn set_channel_password(&self, channel: &str, password: &str) {
        if password.is_empty() {
            self.clear_channel_password(channel);
        } else {
            self.store.set_item(&channel_password_key(channel), password);
        }
    }

    pub fn clear_channel_password(&self, channel: &str) {
        self.store.remove_item(&channel_password_key(channel));
    }
}

fn channel_password_key(channel: &str) -> String {
    format!("{CHANNEL_PASSWORD_PREFIX}{channel}")
}
