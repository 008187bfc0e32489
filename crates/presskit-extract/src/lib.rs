//! Presskit Extract - pure analysis of fetched pages.
//!
//! Nothing in this crate performs I/O. Given page text it can:
//!
//! - parse storefront search results into listing stubs ([`parse_listing_rows`])
//! - pick the developer website and Discord invite from a detail page ([`classify_links`])
//! - choose a contact/about page on a developer website ([`discover_contact_page`])
//! - pull email-shaped tokens out of raw text ([`extract_emails`])
//! - keep only the tokens that plausibly belong to the developer ([`TrustFilter`])
//!
//! # Example
//!
//! ```rust
//! use presskit_extract::{extract_emails, TrustFilter};
//!
//! let tokens = extract_emails("press@indiegame.dev, pixel@tracker.example.net");
//! let kept = TrustFilter::for_website("https://www.indiegame.dev/").filter(&tokens);
//! assert_eq!(kept.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

#[allow(missing_docs)]
pub mod contact_page;
pub mod emails;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod html;
#[allow(missing_docs)]
pub mod links;
#[allow(missing_docs)]
pub mod listings;
pub mod trust;

// Re-export commonly used types
pub use contact_page::{discover_contact_page, ContactMatch, ContactTarget};
pub use emails::extract_emails;
pub use error::{ExtractError, Result};
pub use links::{classify_anchor, classify_links, unwrap_redirect, ClassifiedLinks, LinkKind};
pub use listings::parse_listing_rows;
pub use trust::{normalize_host, TrustFilter, PUBLIC_MAIL_PROVIDERS};
