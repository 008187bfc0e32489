//! Presskit Fetch - HTTP page fetching for the listing crawler.
//!
//! Every remote read in Presskit goes through [`PageFetcher`]. The production
//! implementation, [`HttpFetcher`], sends a fixed identification and age-gate
//! header profile, applies a per-request timeout and spaces requests to the
//! same host with a [`HostPacer`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod engine;
pub mod error;
pub mod pacer;
pub mod profile;

pub use engine::{parse_http_url, HttpFetcher, PageFetcher, RawPage};
pub use error::{FetchError, Result};
pub use pacer::HostPacer;
pub use profile::RequestProfile;
