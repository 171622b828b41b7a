use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::app::{AppContext, Result};
use crate::collector::CollectPolicy;
use crate::domain::{FeedEntry, Gem};
use crate::feed::{read_prior_entries, write_feed, ChannelMeta, EntryBuilder};

/// Parameters of a gems run.
#[derive(Debug, Clone, PartialEq)]
pub struct GemsOptions {
    pub depth: usize,
    pub min_score: i64,
    pub output: PathBuf,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Comments that passed the link filters this run
    pub gems_found: usize,
    /// Entries added to the feed by this run
    pub new_entries: usize,
    /// Entries in the written feed
    pub total_entries: usize,
}

/// Collect gems once and append the unseen ones to the feed at `opts.output`.
pub async fn generate_gems(ctx: &AppContext, opts: &GemsOptions) -> Result<RunSummary> {
    tracing::info!(
        "Fetching gems (min score {}, depth {})",
        opts.min_score,
        opts.depth
    );

    let gems = ctx
        .collector()
        .collect(CollectPolicy::Filtered {
            min_score: opts.min_score,
            depth: opts.depth,
        })
        .await?;

    let prior = read_prior_entries(&opts.output);
    let (entries, new_entries) = merge_entries(prior, &gems, &ctx.entry_builder(), Utc::now());

    write_feed(&opts.output, &ChannelMeta::gems(), &entries)?;

    let summary = RunSummary {
        gems_found: gems.len(),
        new_entries,
        total_entries: entries.len(),
    };
    tracing::info!(
        "Added {} new gems, feed now has {} entries",
        summary.new_entries,
        summary.total_entries
    );
    Ok(summary)
}

/// Rebuild the top-comments feed at `output` from scratch.
pub async fn generate_top_comments(ctx: &AppContext, output: &Path) -> Result<RunSummary> {
    tracing::info!("Fetching top comments with URL");

    let gems = ctx
        .collector()
        .collect(CollectPolicy::Unfiltered {
            comments_per_story: ctx.config.comments_per_story,
        })
        .await?;

    tracing::info!("Generating RSS feed");
    let builder = ctx.entry_builder();
    let entries: Vec<FeedEntry> = gems.iter().map(|gem| builder.top_comment(gem)).collect();

    write_feed(output, &ChannelMeta::top_comments(), &entries)?;

    Ok(RunSummary {
        gems_found: gems.len(),
        new_entries: entries.len(),
        total_entries: entries.len(),
    })
}

/// Carry prior entries forward, then append gems whose permalink is not yet
/// in the feed. A link repeated in the prior feed keeps only its first entry.
/// Returns the merged entries and how many were added.
pub fn merge_entries(
    prior: Vec<FeedEntry>,
    gems: &[Gem],
    builder: &EntryBuilder,
    discovered_at: DateTime<Utc>,
) -> (Vec<FeedEntry>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<FeedEntry> = prior
        .into_iter()
        .filter(|entry| {
            let first = seen.insert(entry.link.clone());
            if !first {
                tracing::warn!("Dropping duplicate feed entry {}", entry.link);
            }
            first
        })
        .collect();
    let mut added = 0;

    for gem in gems {
        if !seen.insert(builder.gem_link(gem.comment.id)) {
            tracing::debug!("Already in feed: comment {}", gem.comment.id);
            continue;
        }
        entries.push(builder.gem(gem, discovered_at));
        added += 1;
    }

    (entries, added)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;
    use crate::collector::tests::MockFetcher;
    use crate::config::Config;
    use crate::domain::Comment;

    fn gem(id: u64) -> Gem {
        Gem {
            comment: Comment {
                id,
                by: Some("bob".into()),
                time: Some(1_700_000_000),
                text: Some("http://foo.com".into()),
                kids: Some(vec![id + 1]),
            },
            story_title: "Story".into(),
            url: "http://foo.com".into(),
            base_domain: "foo.com".into(),
        }
    }

    fn ctx(api: MockFetcher) -> AppContext {
        AppContext::with_fetcher(Config::default(), Arc::new(api))
    }

    fn api() -> MockFetcher {
        MockFetcher::default()
            .story(100, 80, &[1, 2])
            .comment(1, Some("visit http://foo.com"), &[10])
    }

    #[test]
    fn test_merge_keeps_prior_and_skips_known_links() {
        let builder = EntryBuilder::new("https://news.ycombinator.com");
        let old_date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let prior = vec![FeedEntry {
            title: "old".into(),
            link: builder.gem_link(1),
            description: "old description".into(),
            author: Some("bob".into()),
            published_at: Some(old_date),
        }];

        let (entries, added) =
            merge_entries(prior, &[gem(1), gem(2), gem(2)], &builder, Utc::now());

        assert_eq!(added, 1);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "old");
        assert_eq!(entries[0].published_at, Some(old_date));
        assert_eq!(entries[1].link, builder.gem_link(2));
    }

    #[test]
    fn test_merge_drops_duplicate_prior_links() {
        let builder = EntryBuilder::new("https://news.ycombinator.com");
        let prior_entry = |title: &str, id: u64| FeedEntry {
            title: title.into(),
            link: builder.gem_link(id),
            description: String::new(),
            author: None,
            published_at: None,
        };
        let prior = vec![
            prior_entry("first", 1),
            prior_entry("other", 2),
            prior_entry("copy", 1),
        ];

        let (entries, added) = merge_entries(prior, &[gem(1), gem(3)], &builder, Utc::now());

        assert_eq!(added, 1);
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "other", "HN Gem: foo.com - bob"]);

        let links: HashSet<&str> = entries.iter().map(|e| e.link.as_str()).collect();
        assert_eq!(links.len(), entries.len());
    }

    #[tokio::test]
    async fn test_generate_gems_end_to_end() {
        let dir = TempDir::new().unwrap();
        let opts = GemsOptions {
            depth: 5,
            min_score: 50,
            output: dir.path().join("hn_gems.xml"),
        };

        let summary = generate_gems(&ctx(api()), &opts).await.unwrap();
        assert_eq!(summary.new_entries, 1);

        let entries = read_prior_entries(&opts.output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].link, "https://news.ycombinator.com/context?id=1");
        assert!(entries[0].title.contains("foo.com"));
    }

    #[tokio::test]
    async fn test_generate_gems_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let opts = GemsOptions {
            depth: 5,
            min_score: 50,
            output: dir.path().join("hn_gems.xml"),
        };
        let ctx = ctx(api());

        generate_gems(&ctx, &opts).await.unwrap();
        let first = read_prior_entries(&opts.output);

        let summary = generate_gems(&ctx, &opts).await.unwrap();
        let second = read_prior_entries(&opts.output);

        assert_eq!(summary.new_entries, 0);
        assert_eq!(summary.total_entries, 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_top_comments_rebuilds_feed() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("top.xml");
        let ctx = ctx(api());

        generate_top_comments(&ctx, &output).await.unwrap();
        let summary = generate_top_comments(&ctx, &output).await.unwrap();

        assert_eq!(summary.total_entries, 1);
        let entries = read_prior_entries(&output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].link, "https://news.ycombinator.com/item?id=1");
        assert!(entries[0].title.starts_with("Comment by user1 on "));
    }
}
