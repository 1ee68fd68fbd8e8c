//! Error Bag - Single Entry Point
//!
//! Owns the loaded bags, the injected configuration and the pending
//! one-shot list message. Presence, class and render operations live in
//! their own modules as further `impl ErrorBag` blocks.

use tracing::debug;

use crate::bags::{BagStore, MessageBag};
use crate::config::ErrorsConfig;
use crate::render::ListMessage;
use crate::session::{SessionState, SESSION_ERRORS_KEY};

/// Validation errors for one request, plus how to present them
#[derive(Debug, Clone, Default)]
pub struct ErrorBag {
    pub(crate) bags: BagStore,
    pub(crate) config: ErrorsConfig,
    pub(crate) pending_message: Option<ListMessage>,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ErrorsConfig) -> Self {
        Self::from_bags(BagStore::new(), config)
    }

    pub fn from_bags(bags: BagStore, config: ErrorsConfig) -> Self {
        Self {
            bags,
            config,
            pending_message: None,
        }
    }

    /// Load the bags stored under `"errors"` in the session.
    ///
    /// Present and non-empty bags replace everything held so far; an absent
    /// or empty entry leaves the current bags alone.
    pub fn make<S: SessionState + ?Sized>(&mut self, session: &S) {
        match session.get(SESSION_ERRORS_KEY) {
            Some(bags) if !bags.is_empty() => {
                debug!(
                    bags = bags.names().count(),
                    messages = bags.count(),
                    "loaded error bags from session"
                );
                self.bags = bags;
            }
            _ => debug!("no session errors, keeping current bags"),
        }
    }

    pub fn put(&mut self, name: impl Into<String>, bag: MessageBag) -> &mut Self {
        self.bags.put(name, bag);
        self
    }

    pub fn bag(&self, name: &str) -> Option<&MessageBag> {
        self.bags.get(name)
    }

    pub fn bags(&self) -> &BagStore {
        &self.bags
    }

    /// Messages across every bag
    pub fn count(&self) -> usize {
        self.bags.count()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }

    /// Messages for `key`, bag by bag
    pub fn get(&self, key: &str) -> Vec<&str> {
        self.bags
            .iter()
            .flat_map(|(_, bag)| bag.get(key).iter().map(String::as_str))
            .collect()
    }

    /// First non-empty leading message for `key`, bag by bag. An empty
    /// leading message does not count, same as for `has`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.bags
            .iter()
            .find_map(|(_, bag)| bag.first(key).filter(|m| !m.is_empty()))
    }

    /// Every message in insertion order
    pub fn all(&self) -> Vec<&str> {
        self.bags.iter().flat_map(|(_, bag)| bag.all()).collect()
    }

    // --- Configuration ---

    pub fn config(&self) -> &ErrorsConfig {
        &self.config
    }

    pub fn class(&self, role: &str) -> Option<&str> {
        self.config.class(role)
    }

    pub fn message(&self, role: &str) -> Option<&str> {
        self.config.message(role)
    }

    pub fn set_classes<K, V>(&mut self, classes: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config.set_classes(classes);
        self
    }

    pub fn set_messages<K, V>(&mut self, messages: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config.set_messages(messages);
        self
    }

    pub fn set_class(&mut self, role: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.config.set_class(role, value);
        self
    }

    pub fn set_message(&mut self, role: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.config.set_message(role, value);
        self
    }
}
