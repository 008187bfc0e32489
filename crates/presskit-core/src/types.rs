//! Shared types used across Presskit.
//!
//! A [`ListingStub`] is what discovery yields for one storefront entry; an
//! [`EnrichedRecord`] is what the store persists for it, keyed by
//! [`ListingId`]. Enrichment results arrive as an [`Enrichment`] and are folded
//! in with [`EnrichedRecord::merge`], which never regresses a populated field.

use crate::error::PresskitError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// Stable external identifier of a listing; the merge key of the store.
///
/// IDs are 1-64 ASCII letters, digits, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Create a new `ListingId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is empty, too long or has characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn new(id: impl Into<String>) -> Result<Self, PresskitError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), PresskitError> {
        static ID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            ID_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(PresskitError::Validation(format!(
                "invalid listing ID: must be 1-64 characters of [A-Za-z0-9_-], got '{id}'"
            )))
        }
    }
}

impl TryFrom<String> for ListingId {
    type Error = PresskitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListingId> for String {
    fn from(id: ListingId) -> Self {
        id.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry yielded by the discovery source. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStub {
    /// Stable external identifier
    pub id: ListingId,
    /// Listing title
    pub title: String,
    /// Human-readable release date, not guaranteed parseable
    pub release_date: String,
    /// Storefront detail page
    pub detail_url: String,
    /// Capsule image, when the listing row carries one
    pub thumbnail_url: Option<String>,
}

/// Contact data found for one entity during a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Developer website (redirect wrapper already removed)
    pub website: Option<String>,
    /// Discord invite
    pub discord_url: Option<String>,
    /// Secondary page the emails were looked for on
    pub contact_page_url: Option<String>,
    /// Trusted, lowercased emails
    pub emails: BTreeSet<String>,
}

impl Enrichment {
    /// True when nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.discord_url.is_none()
            && self.contact_page_url.is_none()
            && self.emails.is_empty()
    }
}

/// Persistent record for one listing.
///
/// Every field except `id` and `title` has a serde default so stores written
/// by older or newer versions stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// Merge key
    pub id: ListingId,
    /// Listing title
    pub title: String,
    /// Free-text release date as shown by the storefront
    #[serde(default)]
    pub release_date: String,
    /// Storefront detail page
    #[serde(default)]
    pub store_url: String,
    /// Capsule image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Developer website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Discord invite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_url: Option<String>,
    /// Contact/about page found on the website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_page_url: Option<String>,
    /// Trusted contact emails, lowercased
    #[serde(default)]
    pub emails: BTreeSet<String>,
    /// When the record was created
    #[serde(default = "Utc::now")]
    pub first_seen: DateTime<Utc>,
}

impl EnrichedRecord {
    /// Create a bare record with no contact channels.
    #[must_use]
    pub fn from_stub(stub: &ListingStub) -> Self {
        Self {
            id: stub.id.clone(),
            title: stub.title.clone(),
            release_date: stub.release_date.clone(),
            store_url: stub.detail_url.clone(),
            thumbnail_url: stub.thumbnail_url.clone(),
            website: None,
            discord_url: None,
            contact_page_url: None,
            emails: BTreeSet::new(),
            first_seen: Utc::now(),
        }
    }

    /// Refresh the descriptive fields from a newer stub of the same listing.
    pub fn refresh_from(&mut self, stub: &ListingStub) {
        self.title.clone_from(&stub.title);
        self.release_date.clone_from(&stub.release_date);
        self.store_url.clone_from(&stub.detail_url);
        if stub.thumbnail_url.is_some() {
            self.thumbnail_url.clone_from(&stub.thumbnail_url);
        }
    }

    /// Fold a pass's findings into this record.
    ///
    /// Descriptive fields follow the stub. Channel fields are replaced only by
    /// a present value and emails are unioned, so nothing populated is ever
    /// cleared. Returns `true` when any contact data changed.
    pub fn merge(&mut self, stub: &ListingStub, enrichment: Enrichment) -> bool {
        self.refresh_from(stub);

        let mut changed = false;
        changed |= replace_if_present(&mut self.website, enrichment.website);
        changed |= replace_if_present(&mut self.discord_url, enrichment.discord_url);
        changed |= replace_if_present(&mut self.contact_page_url, enrichment.contact_page_url);
        for email in enrichment.emails {
            changed |= self.emails.insert(email.to_lowercase());
        }
        changed
    }

    /// Whether at least one email is known.
    #[must_use]
    pub fn has_emails(&self) -> bool {
        !self.emails.is_empty()
    }

    /// A record with any populated contact channel.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.website.is_some()
            || self.discord_url.is_some()
            || self.contact_page_url.is_some()
            || self.has_emails()
    }

    /// A record with no contact channel yet.
    #[must_use]
    pub fn is_latent(&self) -> bool {
        !self.is_actionable()
    }
}

fn replace_if_present(slot: &mut Option<String>, value: Option<String>) -> bool {
    match value {
        Some(value) if slot.as_deref() != Some(value.as_str()) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(id: &str) -> ListingStub {
        ListingStub {
            id: ListingId::new(id).expect("valid listing ID"),
            title: "Starfall Tactics".to_string(),
            release_date: "25 Jan, 2026".to_string(),
            detail_url: format!("https://store.example.com/app/{id}/"),
            thumbnail_url: Some("https://cdn.example.com/capsule.jpg".to_string()),
        }
    }

    #[test]
    fn test_listing_id_validation() {
        assert!(ListingId::new("1234560").is_ok());
        assert!(ListingId::new("bundle_42-a").is_ok());
        assert!(ListingId::new("").is_err());
        assert!(ListingId::new("12 34").is_err());
        assert!(ListingId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn test_listing_id_deserialize_rejects_invalid() {
        let ok: ListingId = serde_json::from_str("\"730\"").expect("valid id");
        assert_eq!(ok.as_str(), "730");

        let bad: std::result::Result<ListingId, _> = serde_json::from_str("\"a/b\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_merge_overwrites_present_fields() {
        let stub = stub("100");
        let mut record = EnrichedRecord::from_stub(&stub);

        let changed = record.merge(
            &stub,
            Enrichment {
                website: Some("https://indiegame.dev/".to_string()),
                discord_url: Some("https://discord.gg/abc".to_string()),
                contact_page_url: None,
                emails: BTreeSet::from(["Press@IndieGame.dev".to_string()]),
            },
        );

        assert!(changed);
        assert_eq!(record.website.as_deref(), Some("https://indiegame.dev/"));
        assert!(record.emails.contains("press@indiegame.dev"));
        assert!(record.is_actionable());
    }

    #[test]
    fn test_merge_never_regresses_populated_fields() {
        let stub = stub("100");
        let mut record = EnrichedRecord::from_stub(&stub);
        record.website = Some("https://indiegame.dev/".to_string());
        record.contact_page_url = Some("https://indiegame.dev/contact".to_string());
        record.emails.insert("press@indiegame.dev".to_string());

        let changed = record.merge(&stub, Enrichment::default());

        assert!(!changed);
        assert_eq!(record.website.as_deref(), Some("https://indiegame.dev/"));
        assert_eq!(
            record.contact_page_url.as_deref(),
            Some("https://indiegame.dev/contact")
        );
        assert_eq!(record.emails.len(), 1);
    }

    #[test]
    fn test_merge_refreshes_descriptive_fields() {
        let original = stub("100");
        let mut record = EnrichedRecord::from_stub(&original);
        let first_seen = record.first_seen;

        let mut renamed = original.clone();
        renamed.title = "Starfall Tactics: Remastered".to_string();
        renamed.release_date = "Q2 2026".to_string();
        renamed.thumbnail_url = None;
        record.merge(&renamed, Enrichment::default());

        assert_eq!(record.title, "Starfall Tactics: Remastered");
        assert_eq!(record.release_date, "Q2 2026");
        assert!(record.thumbnail_url.is_some());
        assert_eq!(record.first_seen, first_seen);
    }

    #[test]
    fn test_record_tolerates_missing_optional_fields() {
        let json = r#"{"id":"100","title":"Old Record","unknown_field":true}"#;
        let record: EnrichedRecord = serde_json::from_str(json).expect("parse legacy record");
        assert_eq!(record.id.as_str(), "100");
        assert!(record.emails.is_empty());
        assert!(record.is_latent());
    }

    #[test]
    fn test_enrichment_is_empty() {
        assert!(Enrichment::default().is_empty());
        let enrichment = Enrichment {
            discord_url: Some("https://discord.gg/x".to_string()),
            ..Enrichment::default()
        };
        assert!(!enrichment.is_empty());
    }
}
