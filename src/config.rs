//! Configuration - Class and Message Dictionaries
//!
//! Both dictionaries map a role name to a value. Defaults are seeded for
//! every known role; overrides merge on top and never remove a role.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Class added to a field whose key has an error
pub const FIELD: &str = "field";
/// Wrapper class for a whole-bag list
pub const LIST: &str = "list";
/// Wrapper class for a single-field list
pub const FIELD_LIST: &str = "fieldList";
/// Class appended to the wrapper when a summary message is shown
pub const WITH_MESSAGE: &str = "with-message";

pub const DEFAULT_LIST_MESSAGE: &str = "There was a problem with your input.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Role name -> value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleMap {
    entries: BTreeMap<String, String>,
}

impl RoleMap {
    pub fn get(&self, role: &str) -> Option<&str> {
        self.entries.get(role).map(String::as_str)
    }

    pub fn set(&mut self, role: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(role.into(), value.into());
    }

    /// Shallow merge: given roles overwrite, the rest keep their value
    pub fn merge<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (role, value) in values {
            self.set(role, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RoleMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RoleMap::default();
        map.merge(iter);
        map
    }
}

/// Class and message dictionaries handed to an `ErrorBag` at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorsConfig {
    pub classes: RoleMap,
    pub messages: RoleMap,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            messages: default_messages(),
        }
    }
}

fn default_classes() -> RoleMap {
    [
        (FIELD, "error-field"),
        (LIST, "error-list"),
        (FIELD_LIST, "error-fieldList"),
        (WITH_MESSAGE, "has-message"),
    ]
    .into_iter()
    .collect()
}

fn default_messages() -> RoleMap {
    [(LIST, DEFAULT_LIST_MESSAGE)].into_iter().collect()
}

/// On-disk shape. Either `{"classes": {..}, "messages": {..}}` or a flat
/// map of class roles.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Classes(BTreeMap<String, String>),
    Sectioned {
        #[serde(default)]
        classes: BTreeMap<String, String>,
        #[serde(default)]
        messages: BTreeMap<String, String>,
    },
}

impl ErrorsConfig {
    /// Parse JSON and merge it over the defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let mut config = Self::default();
        match raw {
            RawConfig::Sectioned { classes, messages } => {
                config.set_classes(classes);
                config.set_messages(messages);
            }
            RawConfig::Classes(classes) => config.set_classes(classes),
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loading errors config");
        Self::from_json_str(&content)
    }

    pub fn class(&self, role: &str) -> Option<&str> {
        self.classes.get(role)
    }

    pub fn message(&self, role: &str) -> Option<&str> {
        self.messages.get(role)
    }

    pub fn set_classes<K, V>(&mut self, classes: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.classes.merge(classes);
        debug!(classes = ?self.classes, "class dictionary updated");
    }

    pub fn set_messages<K, V>(&mut self, messages: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.messages.merge(messages);
        debug!(messages = ?self.messages, "message dictionary updated");
    }

    pub fn set_class(&mut self, role: impl Into<String>, value: impl Into<String>) {
        let role = role.into();
        debug!(role = %role, "class role updated");
        self.classes.set(role, value);
    }

    pub fn set_message(&mut self, role: impl Into<String>, value: impl Into<String>) {
        let role = role.into();
        debug!(role = %role, "message role updated");
        self.messages.set(role, value);
    }
}
