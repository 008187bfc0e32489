//! Presskit Store - durable state of the crawler.
//!
//! - [`RecordStore`] keeps one [`presskit_core::EnrichedRecord`] per listing in
//!   a single JSON document that is replaced atomically on every save.
//! - [`RunSummary`] is the per-run report written next to it.
//! - [`write_heartbeat`] leaves a plain-text "last run" marker for schedulers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod heartbeat;
pub mod store;
#[allow(missing_docs)]
pub mod summary;

pub use error::{Result, StoreError};
pub use heartbeat::{write_heartbeat, HEARTBEAT_FORMAT};
pub use store::{RecordStore, UpsertOutcome, STORE_VERSION};
pub use summary::RunSummary;
