//! Presskit Core - Foundation crate for the Presskit listing crawler.
//!
//! This crate provides the shared data model, error handling and configuration
//! management that all other Presskit crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Listing stubs, enriched records and the merge rule
//! - [`release_date`] - Ordering of free-text release dates ("smart sort")
//!
//! # Example
//!
//! ```rust
//! use presskit_core::{AppConfig, EnrichedRecord, Enrichment, ListingId, ListingStub};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert!(!config.discovery.offsets.is_empty());
//!
//! let stub = ListingStub {
//!     id: ListingId::new("1234560")?,
//!     title: "Example Game".to_string(),
//!     release_date: "Coming Soon".to_string(),
//!     detail_url: "https://store.example.com/app/1234560/".to_string(),
//!     thumbnail_url: None,
//! };
//! let mut record = EnrichedRecord::from_stub(&stub);
//! record.merge(&stub, Enrichment::default());
//! assert!(record.is_latent());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod release_date;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, CorruptStorePolicy, DiscoveryConfig, EnrichmentConfig, FetchConfig, PacingConfig,
    SkipPolicy, StoreConfig,
};
pub use error::{ConfigError, ConfigResult, PresskitError, Result};
pub use release_date::ReleaseDate;
pub use types::{EnrichedRecord, Enrichment, ListingId, ListingStub};
