//! Error types for the deck and session layers.
//!
//! | Category    | Raised by                       | Handling                          |
//! |-------------|---------------------------------|-----------------------------------|
//! | Transport   | [`ServiceError::Transport`]     | log, skip this attempt            |
//! | Service     | status / malformed body         | log, skip this attempt            |
//! | Persistence | [`StoreError`] on save          | log, retry on next mutation       |
//! | Corruption  | [`StoreError::Corrupt`] on load | wipe and recreate, fatal if wipe fails |
//!
//! Transport and service failures are collapsed by every consumer: the
//! distinction only shows up in logs.

mod category;
mod lifecycle;
mod service;
mod store;

pub use category::ErrorCategory;
pub use lifecycle::LifecycleError;
pub use service::ServiceError;
pub use store::StoreError;
