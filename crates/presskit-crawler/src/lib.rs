//! Presskit Crawler - discovery, enrichment and run control.
//!
//! A run walks the configured listing offsets through a [`ListingSource`],
//! hands each new listing to the [`EnrichmentOrchestrator`] and folds the
//! outcome into a [`presskit_store::RecordStore`]. Everything is sequential:
//! one listing at a time, paced between listings, pages and secondary fetches.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use presskit_core::AppConfig;
//! use presskit_crawler::RunController;
//! use presskit_fetch::HttpFetcher;
//! use presskit_store::{RecordStore, RunSummary};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let interval = std::time::Duration::from_millis(config.pacing.per_host_interval_ms);
//! let fetcher = Arc::new(HttpFetcher::new(&config.fetch, &config.discovery.base_url, interval)?);
//!
//! let mut store = RecordStore::open(&config.store.path, config.store.on_corrupt)?;
//! let mut summary = RunSummary::start();
//! RunController::from_config(&config, fetcher)
//!     .run(&mut store, &mut summary)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod controller;
#[allow(missing_docs)]
pub mod discovery;
pub mod error;
pub mod orchestrator;
mod pacing;
pub mod testing;

pub use controller::RunController;
pub use discovery::{ListingSource, StorefrontSearch};
pub use error::{DiscoveryError, Result, RunError};
pub use orchestrator::{EnrichmentOrchestrator, EntityOutcome};
