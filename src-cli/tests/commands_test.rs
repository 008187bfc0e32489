//! Tests for the `list` rendering and `run` flag handling.

use presskit_app::commands::list::{render, RecordFilter};
use presskit_app::commands::run::apply_overrides;
use presskit_app::cli::RunArgs;
use presskit_core::{AppConfig, Enrichment, ListingId, ListingStub};
use presskit_store::RecordStore;
use tempfile::TempDir;

fn stub(id: &str, title: &str, release_date: &str) -> ListingStub {
    ListingStub {
        id: ListingId::new(id).expect("valid listing ID"),
        title: title.to_string(),
        release_date: release_date.to_string(),
        detail_url: format!("https://store.example.com/app/{id}/"),
        thumbnail_url: None,
    }
}

fn sample_store(tmp: &TempDir) -> RecordStore {
    let mut store = RecordStore::empty(tmp.path().join("records.json"));
    store.insert_stub(&stub("1", "Old Dated", "10 Feb, 2026"));
    store.upsert(
        &stub("2", "Upcoming", "Coming Soon"),
        Enrichment {
            website: Some("https://upcoming.dev/".to_string()),
            emails: ["press@upcoming.dev".to_string()].into_iter().collect(),
            ..Enrichment::default()
        },
    );
    store.insert_stub(&stub("3", "Mystery", "whenever"));
    store.insert_stub(&stub("4", "New Dated", "March 2026"));
    store
}

fn rendered(store: &RecordStore, filter: RecordFilter) -> (usize, String) {
    let mut out = Vec::new();
    let count = render(store, filter, &mut out).expect("render to buffer");
    (count, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn test_list_smart_sort_order() {
    let tmp = TempDir::new().expect("create temp dir");
    let store = sample_store(&tmp);

    let (count, output) = rendered(&store, RecordFilter::All);
    assert_eq!(count, 4);

    let position = |title: &str| output.find(title).expect("title listed");
    assert!(position("Upcoming") < position("New Dated"));
    assert!(position("New Dated") < position("Old Dated"));
    assert!(position("Old Dated") < position("Mystery"));
    assert!(output.contains("    emails:  press@upcoming.dev"));
}

#[test]
fn test_list_filters() {
    let tmp = TempDir::new().expect("create temp dir");
    let store = sample_store(&tmp);

    let (count, output) = rendered(&store, RecordFilter::Actionable);
    assert_eq!(count, 1);
    assert!(output.contains("Upcoming [2]"));

    let (count, output) = rendered(&store, RecordFilter::Latent);
    assert_eq!(count, 3);
    assert!(!output.contains("Upcoming"));
}

#[test]
fn test_run_flags_override_config() {
    let tmp = TempDir::new().expect("create temp dir");
    let mut config = AppConfig::default();
    let store_path = tmp.path().join("custom.json");

    apply_overrides(
        &mut config,
        RunArgs {
            store: Some(store_path.clone()),
            offsets: Some("100".to_string()),
            skip_policy: None,
        },
    )
    .expect("overrides should apply");

    assert_eq!(config.store.path, store_path);
    assert_eq!(config.discovery.offsets, vec![100]);
}
