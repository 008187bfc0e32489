//! `presskit list`: stored records in smart-sort order.

use super::load_config;
use crate::cli::ListArgs;
use anyhow::Context;
use presskit_core::EnrichedRecord;
use presskit_store::RecordStore;
use std::io::{self, Write};
use std::path::Path;

/// Which records to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    All,
    Actionable,
    Latent,
}

impl RecordFilter {
    pub fn from_args(args: &ListArgs) -> Self {
        if args.actionable {
            Self::Actionable
        } else if args.latent {
            Self::Latent
        } else {
            Self::All
        }
    }

    fn accepts(self, record: &EnrichedRecord) -> bool {
        match self {
            Self::All => true,
            Self::Actionable => record.is_actionable(),
            Self::Latent => record.is_latent(),
        }
    }
}

pub fn execute(config_path: Option<&Path>, args: &ListArgs) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let path = args.store.clone().unwrap_or(config.store.path);

    // Plain load: listing never moves a corrupt store aside
    let store = RecordStore::load(&path)
        .with_context(|| format!("failed to read record store {}", path.display()))?;

    let mut out = io::stdout().lock();
    let printed = render(&store, RecordFilter::from_args(args), &mut out)?;
    writeln!(out, "{printed} of {} records", store.len())?;
    Ok(())
}

/// Write matching records, newest release first. Returns how many were written.
pub fn render(store: &RecordStore, filter: RecordFilter, out: &mut impl Write) -> io::Result<usize> {
    let mut printed = 0;
    for record in store
        .sorted_by_release_desc()
        .into_iter()
        .filter(|record| filter.accepts(record))
    {
        let release = if record.release_date.is_empty() {
            "-"
        } else {
            record.release_date.as_str()
        };
        writeln!(out, "{release:<16} {} [{}]", record.title, record.id)?;
        writeln!(out, "    store:   {}", record.store_url)?;
        if let Some(website) = &record.website {
            writeln!(out, "    website: {website}")?;
        }
        if let Some(discord) = &record.discord_url {
            writeln!(out, "    discord: {discord}")?;
        }
        if let Some(contact) = &record.contact_page_url {
            writeln!(out, "    contact: {contact}")?;
        }
        if record.has_emails() {
            let emails: Vec<&str> = record.emails.iter().map(String::as_str).collect();
            writeln!(out, "    emails:  {}", emails.join(", "))?;
        }
        printed += 1;
    }
    Ok(printed)
}
