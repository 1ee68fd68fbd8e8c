//! View Errors - Form Validation Error Presentation
//!
//! # What it does
//! 1. Holds validation messages in named bags, keyed by field
//! 2. Answers "does this field (or any / all of these) have an error?"
//! 3. Decorates fields with error classes
//! 4. Renders error lists with an optional, count-aware summary
//!
//! Loading errors out of a session and embedding the output in a page are
//! left to the caller.

pub mod bags;
pub mod config;
pub mod error_bag;
pub mod presence;
pub mod classes;
pub mod render;
pub mod session;

pub use bags::{BagError, BagStore, MessageBag, MessageList, DEFAULT_BAG};
pub use config::{ConfigError, ErrorsConfig, RoleMap};
pub use error_bag::ErrorBag;
pub use presence::Keys;
pub use classes::ClassSpec;
pub use render::{pluralize, ListMessage, RenderRequest};
pub use session::{SessionState, SESSION_ERRORS_KEY};
