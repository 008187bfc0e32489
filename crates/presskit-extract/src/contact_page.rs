//! Secondary-page selection on a developer website.
//!
//! Anchors are scanned in document order. An anchor mentioning "contact" in
//! its href or text ends the scan. Otherwise the first anchor mentioning one
//! of [`FALLBACK_KEYWORDS`] is used.

use crate::html::{anchors, resolve};
use url::Url;

const CONTACT_KEYWORD: &str = "contact";

/// Lower-priority page names, any of which may carry an address.
pub const FALLBACK_KEYWORDS: &[&str] = &["about", "support", "impressum"];

/// Which rule picked the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMatch {
    Contact,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactTarget {
    pub url: String,
    pub matched: ContactMatch,
}

/// Find the page most likely to list a contact email.
///
/// Only http(s) targets other than the root page itself are eligible.
pub fn discover_contact_page(html: &str, base_url: &str) -> Option<ContactTarget> {
    let base = Url::parse(base_url).ok()?;
    let mut root = base.clone();
    root.set_fragment(None);

    let mut fallback: Option<ContactTarget> = None;

    for anchor in anchors(html) {
        let Some(mut target) = resolve(Some(&base), &anchor.href) else {
            continue;
        };
        if !matches!(target.scheme(), "http" | "https") {
            continue;
        }
        target.set_fragment(None);
        if target == root {
            continue;
        }

        let href = anchor.href.to_lowercase();
        let text = anchor.text.to_lowercase();

        if href.contains(CONTACT_KEYWORD) || text.contains(CONTACT_KEYWORD) {
            return Some(ContactTarget {
                url: target.into(),
                matched: ContactMatch::Contact,
            });
        }

        if fallback.is_none()
            && FALLBACK_KEYWORDS
                .iter()
                .any(|keyword| href.contains(keyword) || text.contains(keyword))
        {
            fallback = Some(ContactTarget {
                url: target.into(),
                matched: ContactMatch::Fallback,
            });
        }
    }

    fallback
}
