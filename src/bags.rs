//! Message Bags - Field-Keyed Error Storage
//!
//! A `MessageBag` maps field keys to the messages reported for them.
//! A `BagStore` maps bag names to bags. Both keep insertion order, which
//! is the order messages are rendered in.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Name of the bag validation errors land in unless told otherwise
pub const DEFAULT_BAG: &str = "default";

pub type MessageList = Vec<String>;

#[derive(Debug, Error)]
pub enum BagError {
    #[error("Invalid error bag payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered collection of field key -> messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBag {
    messages: Vec<(String, MessageList)>,
}

impl MessageBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a key. A message already present for that key is ignored.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        let list = self.entry(key.into());
        if !list.contains(&message) {
            list.push(message);
        }
        self
    }

    fn entry(&mut self, key: String) -> &mut MessageList {
        let pos = match self.messages.iter().position(|(k, _)| *k == key) {
            Some(pos) => pos,
            None => {
                self.messages.push((key, Vec::new()));
                self.messages.len() - 1
            }
        };
        &mut self.messages[pos].1
    }

    /// Messages for a key, empty when the key is unknown
    pub fn get(&self, key: &str) -> &[String] {
        self.messages
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    /// True when the first message for `key` is non-empty
    pub fn has(&self, key: &str) -> bool {
        self.first(key).map_or(false, |m| !m.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages.iter().map(|(k, list)| (k.as_str(), list.as_slice()))
    }

    /// Every message, key by key in insertion order
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .flat_map(|(_, list)| list.iter().map(String::as_str))
    }

    pub fn count(&self) -> usize {
        self.messages.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Fold another bag's messages into this one
    pub fn merge(&mut self, other: &MessageBag) -> &mut Self {
        for (key, list) in other.entries() {
            for message in list {
                self.add(key, message.as_str());
            }
        }
        self
    }
}

impl<K, I, M> FromIterator<(K, I)> for MessageBag
where
    K: Into<String>,
    I: IntoIterator<Item = M>,
    M: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut bag = MessageBag::new();
        for (key, messages) in iter {
            let key = key.into();
            bag.entry(key.clone());
            for message in messages {
                bag.add(key.clone(), message);
            }
        }
        bag
    }
}

/// Named bags, e.g. one per form on a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagStore {
    bags: Vec<(String, MessageBag)>,
}

impl BagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"bag": {"field": ["message", ...]}}`, keeping document order
    pub fn from_json(json: &str) -> Result<Self, BagError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert or replace a bag. A replaced bag keeps its position.
    pub fn put(&mut self, name: impl Into<String>, bag: MessageBag) -> &mut Self {
        let name = name.into();
        match self.bags.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = bag,
            None => self.bags.push((name, bag)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&MessageBag> {
        self.bags.iter().find(|(n, _)| n == name).map(|(_, bag)| bag)
    }

    /// Bag by name, created empty on first use
    pub fn get_or_default(&mut self, name: &str) -> &mut MessageBag {
        let pos = match self.bags.iter().position(|(n, _)| n == name) {
            Some(pos) => pos,
            None => {
                self.bags.push((name.to_string(), MessageBag::new()));
                self.bags.len() - 1
            }
        };
        &mut self.bags[pos].1
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bags.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageBag)> {
        self.bags.iter().map(|(n, bag)| (n.as_str(), bag))
    }

    /// Total messages across every bag
    pub fn count(&self) -> usize {
        self.bags.iter().map(|(_, bag)| bag.count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

// --- Serde (order preserving) ---

struct EntriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map keyed by name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, V>()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl<'de> Deserialize<'de> for MessageBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(EntriesVisitor::<MessageList>(PhantomData))?;
        Ok(entries.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for BagStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(EntriesVisitor::<MessageBag>(PhantomData))?;
        let mut store = BagStore::new();
        for (name, bag) in entries {
            store.put(name, bag);
        }
        Ok(store)
    }
}

impl Serialize for MessageBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.messages.len()))?;
        for (key, list) in &self.messages {
            map.serialize_entry(key, list)?;
        }
        map.end()
    }
}

impl Serialize for BagStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bags.len()))?;
        for (name, bag) in &self.bags {
            map.serialize_entry(name, bag)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_ignores_duplicate_messages() {
        let mut bag = MessageBag::new();
        bag.add("name", "Required").add("name", "Required").add("name", "Too short");
        assert_eq!(bag.get("name"), ["Required", "Too short"]);
        assert_eq!(bag.count(), 2);
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let bag = MessageBag::new();
        assert!(bag.get("biscuit").is_empty());
        assert_eq!(bag.first("biscuit"), None);
        assert!(!bag.has("biscuit"));
    }

    #[test]
    fn test_empty_first_message_is_not_an_error() {
        let bag: MessageBag = [("name", vec![""])].into_iter().collect();
        assert!(!bag.has("name"));
    }

    #[test]
    fn test_json_keeps_document_order() {
        let store = BagStore::from_json(
            r#"{"default": {"zeta": ["z"], "alpha": ["a"]}, "login": {"email": ["e"]}}"#,
        )
        .unwrap();

        assert_eq!(store.names().collect::<Vec<_>>(), ["default", "login"]);
        let default = store.get(DEFAULT_BAG).unwrap();
        assert_eq!(default.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_json_serializes_in_order() {
        let mut store = BagStore::new();
        store.get_or_default(DEFAULT_BAG).add("zeta", "z").add("alpha", "a");
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"default":{"zeta":["z"],"alpha":["a"]}}"#);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = BagStore::from_json(r#"{"default": ["not", "a", "map"]}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid error bag payload"));
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut store = BagStore::new();
        store.put("a", MessageBag::new()).put("b", MessageBag::new());
        store.put("a", [("x", vec!["1"])].into_iter().collect());
        assert_eq!(store.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_merge_appends_new_messages() {
        let mut left: MessageBag = [("name", vec!["a"])].into_iter().collect();
        let right: MessageBag = [("name", vec!["a", "b"]), ("email", vec!["c"])]
            .into_iter()
            .collect();
        left.merge(&right);
        assert_eq!(left.all().collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
