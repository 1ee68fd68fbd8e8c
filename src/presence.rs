//! Presence Checks - has / has_any / has_all

use crate::error_bag::ErrorBag;

/// One field key or an ordered list of them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keys(Vec<String>);

impl Keys {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Keys {
    fn from(key: &str) -> Self {
        Self(vec![key.to_string()])
    }
}

impl From<String> for Keys {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<&String> for Keys {
    fn from(key: &String) -> Self {
        Self(vec![key.clone()])
    }
}

impl From<Vec<String>> for Keys {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl From<Vec<&str>> for Keys {
    fn from(keys: Vec<&str>) -> Self {
        keys.as_slice().into()
    }
}

impl From<&[&str]> for Keys {
    fn from(keys: &[&str]) -> Self {
        Self(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(keys: [&str; N]) -> Self {
        keys.as_slice().into()
    }
}

impl From<&Keys> for Keys {
    fn from(keys: &Keys) -> Self {
        keys.clone()
    }
}

impl ErrorBag {
    /// True when at least one of `keys` has a message in any bag
    pub fn has(&self, keys: impl Into<Keys>) -> bool {
        self.has_any_of(&keys.into())
    }

    /// Same as `has`, reads better with several keys
    pub fn has_any(&self, keys: impl Into<Keys>) -> bool {
        self.has(keys)
    }

    /// True when every one of `keys` has a message. No keys at all is true.
    pub fn has_all(&self, keys: impl Into<Keys>) -> bool {
        let keys = keys.into();
        keys.iter().filter(|key| self.has_key(key)).count() == keys.len()
    }

    pub(crate) fn has_any_of(&self, keys: &Keys) -> bool {
        keys.iter().any(|key| self.has_key(key))
    }

    pub(crate) fn has_key(&self, key: &str) -> bool {
        self.first(key).is_some()
    }
}
