//! Error types for discovery and run control.

use presskit_extract::ExtractError;
use presskit_fetch::FetchError;
use presskit_store::StoreError;
use thiserror::Error;

/// A listing page could not be turned into stubs.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The page could not be fetched
    #[error("listing page fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The page was fetched but is not a results page
    #[error("listing page not understood: {0}")]
    Parse(#[from] ExtractError),
}

/// Errors that end a run with a failure status.
#[derive(Error, Debug)]
pub enum RunError {
    /// The first listing page failed; nothing could be discovered
    #[error("discovery failed at offset {offset}: {source}")]
    Discovery {
        /// Offset of the failed page
        offset: u32,
        /// Underlying failure
        #[source]
        source: DiscoveryError,
    },

    /// The store could not be saved
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for run control.
pub type Result<T> = std::result::Result<T, RunError>;
