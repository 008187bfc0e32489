//! Run controller: one sequential crawl over the configured offsets.

use crate::discovery::{ListingSource, StorefrontSearch};
use crate::error::{Result, RunError};
use crate::orchestrator::{EnrichmentOrchestrator, EntityOutcome};
use crate::pacing::pause;
use presskit_core::{AppConfig, ListingId, ListingStub};
use presskit_fetch::PageFetcher;
use presskit_store::{RecordStore, RunSummary, UpsertOutcome};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Drives discovery and enrichment, and owns the save points of a run.
pub struct RunController {
    source: Arc<dyn ListingSource>,
    orchestrator: EnrichmentOrchestrator,
    offsets: Vec<u32>,
    entity_delay_ms: u64,
    page_delay_ms: u64,
    jitter_ms: u64,
    checkpoint_every: usize,
}

impl RunController {
    /// Create a controller from explicit parts.
    pub fn new(
        source: Arc<dyn ListingSource>,
        orchestrator: EnrichmentOrchestrator,
        config: &AppConfig,
    ) -> Self {
        Self {
            source,
            orchestrator,
            offsets: config.discovery.offsets.clone(),
            entity_delay_ms: config.pacing.entity_delay_ms,
            page_delay_ms: config.pacing.page_delay_ms,
            jitter_ms: config.pacing.jitter_ms,
            checkpoint_every: config.store.checkpoint_every,
        }
    }

    /// Wire storefront discovery and enrichment to the same fetcher.
    pub fn from_config(config: &AppConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let source = StorefrontSearch::new(Arc::clone(&fetcher), config.discovery.clone());
        let orchestrator = EnrichmentOrchestrator::new(fetcher, &config.enrichment, &config.pacing);
        Self::new(Arc::new(source), orchestrator, config)
    }

    /// Run one crawl, folding results into `store` and counting into `summary`.
    ///
    /// The store is saved when the scan ends, however it ends. A failure on
    /// the first listing page is returned as [`RunError::Discovery`] after
    /// that save; a failure on a later page only ends the scan.
    pub async fn run(&self, store: &mut RecordStore, summary: &mut RunSummary) -> Result<()> {
        info!(
            run_id = %summary.run_id,
            offsets = ?self.offsets,
            records = store.len(),
            "starting run"
        );

        let scanned = self.scan(store, summary).await;

        summary.records_total = store.len();
        summary.records_actionable = store.actionable_count();
        summary.finish();

        let saved = store.save();
        match (scanned, saved) {
            (Ok(()), Ok(())) => {
                info!(
                    discovered = summary.discovered,
                    enriched = summary.enriched,
                    skipped = summary.skipped,
                    records = summary.records_total,
                    "run complete"
                );
                Ok(())
            }
            (Ok(()), Err(e)) => {
                error!(path = %store.path().display(), error = %e, "failed to save record store");
                Err(RunError::Store(e))
            }
            (Err(e), saved) => {
                if let Err(save_error) = saved {
                    error!(path = %store.path().display(), error = %save_error, "failed to save record store");
                }
                Err(e)
            }
        }
    }

    async fn scan(&self, store: &mut RecordStore, summary: &mut RunSummary) -> Result<()> {
        let mut seen: HashSet<ListingId> = HashSet::new();
        let mut processed = 0usize;

        for (index, &offset) in self.offsets.iter().enumerate() {
            if index > 0 {
                pause(self.page_delay_ms, self.jitter_ms).await;
            }

            let stubs = match self.source.fetch_page(offset).await {
                Ok(stubs) => stubs,
                Err(e) if index == 0 => {
                    error!(offset, error = %e, "first listing page failed");
                    summary.discovery_error = Some(e.to_string());
                    return Err(RunError::Discovery { offset, source: e });
                }
                Err(e) => {
                    warn!(offset, error = %e, "listing page failed, ending scan");
                    summary.discovery_error = Some(e.to_string());
                    break;
                }
            };
            summary.pages_fetched += 1;

            if stubs.is_empty() {
                info!(offset, "no more listings");
                break;
            }

            for stub in stubs {
                if !seen.insert(stub.id.clone()) {
                    debug!(id = %stub.id, offset, "duplicate listing, already processed");
                    continue;
                }
                summary.discovered += 1;

                let networked = self.process(&stub, store, summary).await;
                processed += 1;

                if self.checkpoint_every > 0 && processed % self.checkpoint_every == 0 {
                    match store.save() {
                        Ok(()) => debug!(processed, "checkpoint saved"),
                        Err(e) => warn!(processed, error = %e, "checkpoint save failed"),
                    }
                }

                if networked {
                    pause(self.entity_delay_ms, self.jitter_ms).await;
                }
            }
        }

        Ok(())
    }

    /// Enrich one listing and apply the outcome. Returns whether it hit the network.
    async fn process(
        &self,
        stub: &ListingStub,
        store: &mut RecordStore,
        summary: &mut RunSummary,
    ) -> bool {
        let outcome = self.orchestrator.enrich(stub, store.get(&stub.id)).await;
        let networked = outcome.did_network_work();

        match outcome {
            EntityOutcome::Skipped => {
                summary.skipped += 1;
            }
            EntityOutcome::DetailUnavailable(_) => {
                summary.attempted += 1;
                summary.detail_failures += 1;
                store.insert_stub(stub);
            }
            EntityOutcome::Faulted(_) => {
                summary.attempted += 1;
                summary.faulted += 1;
                store.insert_stub(stub);
            }
            EntityOutcome::Enriched(enrichment) => {
                summary.attempted += 1;
                let found = !enrichment.is_empty();
                let upserted = store.upsert(stub, enrichment);
                if matches!(upserted, UpsertOutcome::Changed)
                    || (found && matches!(upserted, UpsertOutcome::Created))
                {
                    summary.enriched += 1;
                }
                info!(id = %stub.id, title = %stub.title, outcome = ?upserted, "processed listing");
            }
        }

        networked
    }
}
