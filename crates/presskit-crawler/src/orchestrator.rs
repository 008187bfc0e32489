//! Enrichment of a single listing.
//!
//! One pass fetches the detail page, classifies its outbound links and, when
//! a developer website is found, crawls the website root plus at most one
//! contact page for emails. Every fetch is matched individually: a failed
//! detail page aborts the pass, anything after it only loses the fields it
//! would have produced.

use crate::pacing::pause;
use futures::FutureExt;
use presskit_core::{EnrichedRecord, Enrichment, EnrichmentConfig, ListingStub, PacingConfig, SkipPolicy};
use presskit_extract::{classify_links, discover_contact_page, extract_emails, TrustFilter};
use presskit_fetch::{FetchError, PageFetcher};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Result of one enrichment pass.
#[derive(Debug)]
pub enum EntityOutcome {
    /// The stored record already satisfies the skip policy; nothing fetched
    Skipped,
    /// The detail page could not be fetched
    DetailUnavailable(FetchError),
    /// Contact data found during this pass (possibly empty)
    Enriched(Enrichment),
    /// The pass panicked; the message is kept for the log
    Faulted(String),
}

impl EntityOutcome {
    /// Whether the pass touched the network.
    pub fn did_network_work(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// Runs enrichment passes through a [`PageFetcher`].
pub struct EnrichmentOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    skip_policy: SkipPolicy,
    secondary_delay_ms: u64,
    jitter_ms: u64,
}

impl EnrichmentOrchestrator {
    /// Create an orchestrator with the given policy and secondary-page pacing.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        enrichment: &EnrichmentConfig,
        pacing: &PacingConfig,
    ) -> Self {
        Self {
            fetcher,
            skip_policy: enrichment.skip_policy,
            secondary_delay_ms: pacing.secondary_delay_ms,
            jitter_ms: pacing.jitter_ms,
        }
    }

    /// Active skip policy.
    pub fn skip_policy(&self) -> SkipPolicy {
        self.skip_policy
    }

    /// Whether `prior` is complete enough to skip.
    pub fn should_skip(&self, prior: Option<&EnrichedRecord>) -> bool {
        let Some(record) = prior else {
            return false;
        };
        match self.skip_policy {
            SkipPolicy::HasEmails => record.has_emails(),
            SkipPolicy::HasAnyContact => record.is_actionable(),
            SkipPolicy::Never => false,
        }
    }

    /// Run one pass for `stub`.
    ///
    /// Never fails: fetch errors and panics come back as outcome variants.
    pub async fn enrich(&self, stub: &ListingStub, prior: Option<&EnrichedRecord>) -> EntityOutcome {
        if self.should_skip(prior) {
            debug!(id = %stub.id, policy = ?self.skip_policy, "record complete, skipping");
            return EntityOutcome::Skipped;
        }

        match AssertUnwindSafe(self.enrich_listing(stub)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(id = %stub.id, error = %message, "enrichment pass panicked");
                EntityOutcome::Faulted(message)
            }
        }
    }

    async fn enrich_listing(&self, stub: &ListingStub) -> EntityOutcome {
        let detail = match self.fetcher.fetch(&stub.detail_url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(id = %stub.id, url = %stub.detail_url, error = %e, "detail page unavailable");
                return EntityOutcome::DetailUnavailable(e);
            }
        };

        let links = classify_links(&detail.body, &detail.url);
        debug!(
            id = %stub.id,
            website = ?links.website,
            discord = ?links.discord,
            "classified detail page links"
        );

        let mut enrichment = Enrichment {
            website: links.website,
            discord_url: links.discord,
            ..Enrichment::default()
        };

        if let Some(website) = enrichment.website.clone() {
            self.crawl_website(stub, &website, &mut enrichment).await;
        }

        EntityOutcome::Enriched(enrichment)
    }

    async fn crawl_website(&self, stub: &ListingStub, website: &str, enrichment: &mut Enrichment) {
        let root = match self.fetcher.fetch(website).await {
            Ok(page) => page,
            Err(e) => {
                warn!(id = %stub.id, url = website, error = %e, "website unavailable, keeping links only");
                return;
            }
        };

        let mut tokens = extract_emails(&root.body);

        if let Some(target) = discover_contact_page(&root.body, &root.url) {
            debug!(id = %stub.id, url = %target.url, matched = ?target.matched, "found contact page");
            enrichment.contact_page_url = Some(target.url.clone());

            pause(self.secondary_delay_ms, self.jitter_ms).await;
            match self.fetcher.fetch(&target.url).await {
                Ok(page) => tokens.extend(extract_emails(&page.body)),
                Err(e) => {
                    warn!(id = %stub.id, url = %target.url, error = %e, "contact page unavailable");
                }
            }
        }

        let filter = TrustFilter::for_website(website);
        enrichment.emails = filter.filter(&tokens);
        debug!(
            id = %stub.id,
            found = tokens.len(),
            kept = enrichment.emails.len(),
            site = ?filter.site_host(),
            "filtered emails"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
