//! `presskit run`: one crawl, raced against Ctrl-C.

use super::load_config;
use crate::cli::RunArgs;
use anyhow::Context;
use chrono::Utc;
use presskit_core::{config::parse_offsets, AppConfig};
use presskit_crawler::RunController;
use presskit_fetch::{HttpFetcher, PageFetcher};
use presskit_store::{write_heartbeat, RecordStore, RunSummary};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub async fn execute(config_path: Option<&Path>, args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args)?;

    if let Some(path) = &config.store.heartbeat_path {
        match write_heartbeat(path, Utc::now()) {
            Ok(()) => info!(path = %path.display(), "heartbeat written"),
            Err(e) => warn!(error = %e, "failed to write heartbeat"),
        }
    }

    let mut store = RecordStore::open(&config.store.path, config.store.on_corrupt)
        .with_context(|| format!("failed to open record store {}", config.store.path.display()))?;

    let per_host_interval = Duration::from_millis(config.pacing.per_host_interval_ms);
    let fetcher: Arc<dyn PageFetcher> = Arc::new(
        HttpFetcher::new(&config.fetch, &config.discovery.base_url, per_host_interval)
            .context("failed to build HTTP client")?,
    );
    let controller = RunController::from_config(&config, fetcher);
    let mut summary = RunSummary::start();

    let finished = tokio::select! {
        result = controller.run(&mut store, &mut summary) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    let result = match finished {
        Some(result) => result.map_err(anyhow::Error::from),
        None => {
            warn!("interrupted, saving progress");
            summary.interrupted = Some("interrupted by Ctrl-C".to_string());
            summary.records_total = store.len();
            summary.records_actionable = store.actionable_count();
            summary.finish();
            store
                .save()
                .context("failed to save record store after interrupt")
        }
    };

    if let Err(e) = summary.write_to_file(&config.store.summary_path) {
        warn!(path = %config.store.summary_path.display(), error = %e, "failed to write run summary");
    }
    println!("{}", summary_line(&summary));

    result.context("run failed")
}

/// Fold command-line flags into the loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, args: RunArgs) -> anyhow::Result<()> {
    if let Some(store) = args.store {
        config.store.path = store;
    }
    if let Some(offsets) = args.offsets {
        config.discovery.offsets = parse_offsets(&offsets)?;
    }
    if let Some(policy) = args.skip_policy {
        config.enrichment.skip_policy = policy;
    }
    config.validate()?;
    Ok(())
}

/// One-line human summary of a run.
pub fn summary_line(summary: &RunSummary) -> String {
    let mut line = format!(
        "{} discovered, {} enriched, {} skipped, {} failed; {} records ({} actionable)",
        summary.discovered,
        summary.enriched,
        summary.skipped,
        summary.detail_failures + summary.faulted,
        summary.records_total,
        summary.records_actionable,
    );
    if let Some(reason) = &summary.interrupted {
        line.push_str(&format!(" [{reason}]"));
    }
    if let Some(error) = &summary.discovery_error {
        line.push_str(&format!(" [discovery: {error}]"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use presskit_core::SkipPolicy;
    use std::path::PathBuf;

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            store: Some(PathBuf::from("/tmp/records.json")),
            offsets: Some("0, 25".to_string()),
            skip_policy: Some(SkipPolicy::Never),
        };

        apply_overrides(&mut config, args).expect("overrides should apply");

        assert_eq!(config.store.path, PathBuf::from("/tmp/records.json"));
        assert_eq!(config.discovery.offsets, vec![0, 25]);
        assert_eq!(config.enrichment.skip_policy, SkipPolicy::Never);
    }

    #[test]
    fn test_apply_overrides_rejects_empty_offsets() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            offsets: Some(",".to_string()),
            ..RunArgs::default()
        };
        assert!(apply_overrides(&mut config, args).is_err());
    }

    #[test]
    fn test_summary_line() {
        let mut summary = RunSummary::start();
        summary.discovered = 5;
        summary.enriched = 3;
        summary.detail_failures = 1;
        summary.faulted = 1;
        summary.records_total = 12;
        summary.records_actionable = 9;

        assert_eq!(
            summary_line(&summary),
            "5 discovered, 3 enriched, 0 skipped, 2 failed; 12 records (9 actionable)"
        );

        summary.interrupted = Some("interrupted by Ctrl-C".to_string());
        assert!(summary_line(&summary).ends_with("[interrupted by Ctrl-C]"));
    }
}
