use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use feed_rs::parser;

use crate::app::{GemsError, Result};
use crate::domain::FeedEntry;

/// Entries of a previously written feed, in document order.
///
/// A missing file yields no entries. So does a file that cannot be parsed:
/// the problem is logged and the run starts from an empty feed.
pub fn read_prior_entries(path: &Path) -> Vec<FeedEntry> {
    match load_entries(path) {
        Ok(entries) => {
            tracing::debug!("Read {} prior entries from {}", entries.len(), path.display());
            entries
        }
        Err(GemsError::Io(e)) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable feed {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn load_entries(path: &Path) -> Result<Vec<FeedEntry>> {
    let body = fs::read(path)?;
    parse_entries(&body)
}

pub(crate) fn parse_entries(body: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = parser::parse(body).map_err(|e| GemsError::FeedParse(e.to_string()))?;

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
                tracing::debug!("Dropping prior entry without link: {}", entry.id);
                return None;
            };

            Some(FeedEntry {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                link,
                description: entry.summary.map(|s| s.content).unwrap_or_default(),
                // RSS <author> may be reported as the person's email
                author: entry
                    .authors
                    .into_iter()
                    .next()
                    .map(|a| a.email.unwrap_or(a.name)),
                published_at: entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc)),
            })
        })
        .collect();

    Ok(entries)
}
