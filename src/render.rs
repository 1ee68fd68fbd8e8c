//! Error List Rendering
//!
//! Builds `<div><p>summary</p><ul><li>..</li></ul></div>` markup.
//! Messages are inserted as given; escaping belongs to whoever produced them.
//!
//! Rendering consumes the one-shot message armed by `with_message`, whether
//! or not anything is rendered.

use tracing::debug;

use crate::classes::ClassSpec;
use crate::config::{FIELD_LIST, LIST, WITH_MESSAGE};
use crate::error_bag::ErrorBag;
use crate::presence::Keys;

/// Summary shown above the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMessage {
    /// The `list` role from the message dictionary
    Default,
    Text(String),
}

impl From<&str> for ListMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ListMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// What to render and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    keys: Option<Keys>,
    message: Option<ListMessage>,
    class: Option<ClassSpec>,
    role: &'static str,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::all()
    }
}

impl RenderRequest {
    /// Every message in every bag, wrapped with the `list` role
    pub fn all() -> Self {
        Self {
            keys: None,
            message: None,
            class: None,
            role: LIST,
        }
    }

    /// Only `keys`, in the order given, wrapped with the `list` role
    pub fn keys(keys: impl Into<Keys>) -> Self {
        Self {
            keys: Some(keys.into()),
            ..Self::all()
        }
    }

    /// Only `keys`, wrapped with the `fieldList` role
    pub fn field(keys: impl Into<Keys>) -> Self {
        Self {
            role: FIELD_LIST,
            ..Self::keys(keys)
        }
    }

    /// Takes priority over a message armed with `with_message`
    pub fn message(mut self, message: impl Into<ListMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn default_message(self) -> Self {
        self.message(ListMessage::Default)
    }

    /// Replaces the role class on the wrapper
    pub fn class(mut self, class: impl Into<ClassSpec>) -> Self {
        self.class = Some(class.into());
        self
    }
}

impl ErrorBag {
    /// Arm a summary for the next render call only
    pub fn with_message(&mut self, message: impl Into<ListMessage>) -> &mut Self {
        let message = message.into();
        debug!(message = ?message, "list message armed");
        self.pending_message = Some(message);
        self
    }

    pub fn with_default_message(&mut self) -> &mut Self {
        self.with_message(ListMessage::Default)
    }

    /// Render every message. Consumes the armed message.
    pub fn render_all(&mut self) -> Option<String> {
        self.render(RenderRequest::all())
    }

    /// Render the messages for `keys`. Consumes the armed message.
    pub fn field(&mut self, keys: impl Into<Keys>) -> Option<String> {
        self.render(RenderRequest::field(keys))
    }

    pub fn field_with_message(
        &mut self,
        keys: impl Into<Keys>,
        message: impl Into<ListMessage>,
    ) -> Option<String> {
        self.render(RenderRequest::field(keys).message(message))
    }

    /// Render per `request`. `None` when there is nothing to show.
    /// Always consumes the armed message.
    pub fn render(&mut self, request: RenderRequest) -> Option<String> {
        let pending = self.pending_message.take();
        let message = request.message.or(pending);

        if self.is_empty() {
            return None;
        }

        let errors: Vec<&str> = match &request.keys {
            None => self.all(),
            Some(keys) if self.has_any_of(keys) => {
                keys.iter().flat_map(|key| self.get(key)).collect()
            }
            Some(_) => return None,
        };
        if errors.is_empty() {
            return None;
        }

        let summary = message.and_then(|message| self.resolve_message(&message, errors.len()));

        let mut classes: Vec<String> = match request.class {
            Some(spec) => spec.into_tokens(),
            None => self
                .config
                .class(request.role)
                .map(str::to_string)
                .into_iter()
                .collect(),
        };
        classes.retain(|c| !c.is_empty());
        if summary.is_some() {
            classes.extend(self.config.class(WITH_MESSAGE).map(str::to_string));
        }

        Some(lister(&errors, &classes, summary.as_deref()))
    }

    fn resolve_message(&self, message: &ListMessage, count: usize) -> Option<String> {
        let template = match message {
            ListMessage::Default => self.config.message(LIST)?,
            ListMessage::Text(text) => text.as_str(),
        };
        let text = pluralize(template, count);
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// `"one|many"` picks by count; anything else is used as is
pub fn pluralize(template: &str, count: usize) -> &str {
    let mut forms = template.split('|');
    match (forms.next(), forms.next(), forms.next()) {
        (Some(singular), Some(_), None) if count == 1 => singular,
        (Some(_), Some(plural), None) => plural,
        _ => template,
    }
}

fn lister(errors: &[&str], classes: &[String], summary: Option<&str>) -> String {
    let mut html = String::from("<div");
    if !classes.is_empty() {
        html.push_str(&format!(" class=\"{}\"", classes.join(" ")));
    }
    html.push('>');

    if let Some(summary) = summary {
        html.push_str(&format!("<p>{}</p>", summary));
    }

    html.push_str("<ul>");
    for error in errors {
        html.push_str(&format!("<li>{}</li>", error));
    }
    html.push_str("</ul></div>");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bags::{MessageBag, DEFAULT_BAG};

    fn bag() -> ErrorBag {
        let mut bag = ErrorBag::new();
        bag.put(
            DEFAULT_BAG,
            [("name", vec!["Message for name"]), ("email", vec!["Message for email"])]
                .into_iter()
                .collect(),
        );
        bag
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("One problem.|Many problems.", 1), "One problem.");
        assert_eq!(pluralize("One problem.|Many problems.", 2), "Many problems.");
        assert_eq!(pluralize("One problem.|Many problems.", 0), "Many problems.");
        assert_eq!(pluralize("Problems.", 1), "Problems.");
        assert_eq!(pluralize("a|b|c", 1), "a|b|c");
    }

    #[test]
    fn test_empty_bag_renders_nothing() {
        let mut bag = ErrorBag::new();
        assert_eq!(bag.render_all(), None);
        assert_eq!(bag.field("name"), None);
    }

    #[test]
    fn test_unknown_key_renders_nothing() {
        assert_eq!(bag().field("biscuit"), None);
    }

    #[test]
    fn test_message_is_consumed_even_when_nothing_renders() {
        let mut bag = bag();
        assert_eq!(bag.with_default_message().field("biscuit"), None);
        assert_eq!(
            bag.field("name").unwrap(),
            r#"<div class="error-fieldList"><ul><li>Message for name</li></ul></div>"#
        );
    }

    #[test]
    fn test_request_message_beats_armed_message() {
        let mut bag = bag();
        bag.with_message("Armed.");
        assert_eq!(
            bag.render(RenderRequest::field("name").message("Explicit.")).unwrap(),
            r#"<div class="error-fieldList has-message"><p>Explicit.</p><ul><li>Message for name</li></ul></div>"#
        );
        assert!(!bag.render_all().unwrap().contains("<p>"));
    }

    #[test]
    fn test_empty_message_shows_no_summary() {
        let mut bag = bag();
        assert_eq!(
            bag.field_with_message("name", "").unwrap(),
            r#"<div class="error-fieldList"><ul><li>Message for name</li></ul></div>"#
        );
    }

    #[test]
    fn test_missing_message_role_shows_no_summary() {
        let config = crate::config::ErrorsConfig {
            messages: Default::default(),
            ..Default::default()
        };
        let mut bag = ErrorBag::with_config(config);
        bag.put(DEFAULT_BAG, MessageBag::from_iter([("name", ["x"])]));
        assert_eq!(
            bag.with_default_message().render_all().unwrap(),
            r#"<div class="error-list"><ul><li>x</li></ul></div>"#
        );
    }

    #[test]
    fn test_empty_class_override_drops_attribute() {
        let mut bag = bag();
        assert_eq!(
            bag.render(RenderRequest::field("name").class("")).unwrap(),
            "<div><ul><li>Message for name</li></ul></div>"
        );
    }
}
