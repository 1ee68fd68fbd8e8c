//! Field Classes
//!
//! A class spec is a list of tokens. The first token is the error token:
//! it is only emitted when the field has an error, and may hold several
//! classes separated by `|`.

use crate::config::FIELD;
use crate::error_bag::ErrorBag;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSpec(Vec<String>);

impl ClassSpec {
    /// Space separated tokens, positions kept (`" field"` has an empty error token)
    pub fn parse(classes: &str) -> Self {
        Self(classes.split(' ').map(str::to_string).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ClassSpec {
    fn from(classes: &str) -> Self {
        Self::parse(classes)
    }
}

impl From<String> for ClassSpec {
    fn from(classes: String) -> Self {
        Self::parse(&classes)
    }
}

impl From<Vec<String>> for ClassSpec {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<Vec<&str>> for ClassSpec {
    fn from(tokens: Vec<&str>) -> Self {
        Self(tokens.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ClassSpec {
    fn from(tokens: [&str; N]) -> Self {
        Self(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl ErrorBag {
    /// ` class="..."` for `key` using the `field` role
    pub fn classes(&self, key: &str) -> Option<String> {
        self.compose_classes(key, None, false)
    }

    pub fn classes_with(&self, key: &str, spec: impl Into<ClassSpec>) -> Option<String> {
        self.compose_classes(key, Some(spec.into()), false)
    }

    /// ` a b` for dropping into an existing class attribute
    pub fn single_class(&self, key: &str) -> Option<String> {
        self.compose_classes(key, None, true)
    }

    pub fn single_class_with(&self, key: &str, spec: impl Into<ClassSpec>) -> Option<String> {
        self.compose_classes(key, Some(spec.into()), true)
    }

    /// Resolve the error token against `key` and format what is left.
    /// `None` means there is nothing to emit.
    pub fn compose_classes(
        &self,
        key: &str,
        spec: Option<ClassSpec>,
        single: bool,
    ) -> Option<String> {
        let spec =
            spec.unwrap_or_else(|| ClassSpec::parse(self.config.class(FIELD).unwrap_or_default()));
        let mut tokens = spec.into_tokens().into_iter();
        let error_token = tokens.next();

        let mut classes: Vec<String> = Vec::new();
        if let Some(error_token) = error_token.filter(|_| self.has_key(key)) {
            classes.extend(
                error_token
                    .split('|')
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
            );
        }
        classes.extend(tokens.filter(|t| !t.is_empty()));

        if classes.is_empty() {
            return None;
        }

        let classes = classes.join(" ");
        Some(if single {
            format!(" {}", classes)
        } else {
            format!(" class=\"{}\"", classes)
        })
    }
}
