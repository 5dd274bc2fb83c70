//! The end-to-end scrape: discover conferences, fetch and parse every talk,
//! build the relational model, write the exports.
//!
//! Page fetches are the only parallel step; everything parsed is resolved
//! and assembled in one sequential pass afterwards, so the resolver needs
//! no locking and ids come out deterministic.

use std::path::{Path, PathBuf};
use std::time::Duration;

use exn::ResultExt;
use futures::{StreamExt, stream};
use podium_config::Config;
use podium_extract::index::{self, SessionListing};
use podium_extract::models::{Season, TalkRecord};
use podium_fetch::{FetchOptions, Fetcher};
use podium_model::{Dataset, ModelBuilder};
use podium_store::Database;
use tracing::{debug, info, instrument, warn};

use crate::error::{ErrorKind, Result};

/// Export artifact filenames, created under the configured output directory.
const JSON_EXPORT: &str = "talks.json";
const DB_EXPORT: &str = "talks.db";
const DB_NO_TEXT_EXPORT: &str = "talks.no-text.db";

/// A conference discovered on the index, with everything needed to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DiscoveredConference {
    year: u16,
    season: Season,
    url: String,
}

/// One fetched-and-parsed talk, still tied to the session it was listed in.
struct ParsedTalk {
    session_index: usize,
    record: TalkRecord,
}

pub async fn run(config: &Config, output: Option<PathBuf>, workers: Option<usize>) -> Result<()> {
    let fetcher = Fetcher::new(FetchOptions {
        timeout: Duration::from_secs(config.fetch.timeout_secs),
        retries: config.fetch.retries,
        backoff: Duration::from_millis(config.fetch.backoff_ms),
    })
    .or_raise(|| ErrorKind::Config)?;
    let workers = workers.unwrap_or(config.fetch.workers).max(1);

    let conferences = discover_conferences(&fetcher, config).await?;
    info!(count = conferences.len(), "conferences discovered");

    let mut builder = ModelBuilder::new();
    for conference in &conferences {
        scrape_conference(&fetcher, config, &mut builder, conference, workers).await?;
    }
    let dataset = builder.finish();
    info!(
        talks = dataset.talks.len(),
        speakers = dataset.speakers.len(),
        conferences = dataset.conferences.len(),
        "model built"
    );

    let output_dir = match output {
        Some(dir) => dir,
        None => config.output_dir().or_raise(|| ErrorKind::Config)?,
    };
    write_exports(&dataset, &output_dir).await
}

/// Walk the top-level index (and any decade pages it links to) and return
/// every conference in chronological order.
///
/// This is the only step where failure aborts the run: without the index
/// there is nothing to scrape. Unreadable decade pages are skipped.
#[instrument(skip_all)]
async fn discover_conferences(fetcher: &Fetcher, config: &Config) -> Result<Vec<DiscoveredConference>> {
    let index_html = fetcher
        .fetch_html(&config.source.index_url())
        .await
        .or_raise(|| ErrorKind::Index)?;
    let links = index::conference_links(&index_html, &config.source.base_url);

    let mut urls = links.conferences;
    for decade_url in &links.decades {
        match fetcher.fetch_html(decade_url).await {
            Ok(html) => urls.extend(index::decade_conference_links(&html, &config.source.base_url)),
            Err(err) => warn!("skipping decade page {decade_url}: {err}"),
        }
    }

    let mut conferences = Vec::new();
    for url in urls {
        match index::conference_of_url(&url) {
            Ok((year, season)) => conferences.push(DiscoveredConference { year, season, url }),
            Err(err) => warn!("skipping unrecognized conference link {url}: {err}"),
        }
    }
    conferences.sort_by_key(|c| (c.year, c.season));
    conferences.dedup_by_key(|c| (c.year, c.season));
    Ok(conferences)
}

/// Fetch one conference page, then all of its talk pages, and feed the
/// parsed records into the builder. Failed or non-talk pages are skipped.
#[instrument(skip(fetcher, config, builder), fields(year = conference.year, season = %conference.season))]
async fn scrape_conference(
    fetcher: &Fetcher,
    config: &Config,
    builder: &mut ModelBuilder,
    conference: &DiscoveredConference,
    workers: usize,
) -> Result<()> {
    let html = match fetcher.fetch_html(&conference.url).await {
        Ok(html) => html,
        Err(err) => {
            warn!("skipping conference {}: {err}", conference.url);
            return Ok(());
        }
    };
    let listings = index::session_listings(&html, &config.source.base_url);
    if listings.is_empty() {
        warn!("no sessions found on {}", conference.url);
        return Ok(());
    }

    let parsed = fetch_and_parse_talks(fetcher, &listings, workers).await;

    let conference_id = builder.add_conference(conference.year, conference.season);
    let mut session_ids = vec![None; listings.len()];
    for talk in parsed {
        let session_id = match session_ids[talk.session_index] {
            Some(id) => id,
            None => {
                let id = builder
                    .add_session(conference_id, &listings[talk.session_index].name)
                    .or_raise(|| ErrorKind::Model)?;
                session_ids[talk.session_index] = Some(id);
                id
            }
        };
        builder
            .add_talk(conference_id, session_id, &talk.record)
            .or_raise(|| ErrorKind::Model)?;
    }
    Ok(())
}

/// Fetch every talk page of a conference with a bounded worker pool and
/// parse the results.
///
/// `buffered` preserves listing order, so talks come back session by
/// session in broadcast order regardless of which fetch finished first.
async fn fetch_and_parse_talks(
    fetcher: &Fetcher,
    listings: &[SessionListing],
    workers: usize,
) -> Vec<ParsedTalk> {
    let pages: Vec<(usize, &str)> = listings
        .iter()
        .enumerate()
        .flat_map(|(session_index, listing)| {
            listing.talk_urls.iter().map(move |url| (session_index, url.as_str()))
        })
        .collect();

    let fetched: Vec<(usize, &str, podium_fetch::error::Result<String>)> = stream::iter(pages)
        .map(|(session_index, url)| {
            let fetcher = fetcher.clone();
            async move { (session_index, url, fetcher.fetch_html(url).await) }
        })
        .buffered(workers)
        .collect()
        .await;

    let mut parsed = Vec::new();
    for (session_index, url, fetched_html) in fetched {
        let html = match fetched_html {
            Ok(html) => html,
            Err(err) => {
                warn!("skipping talk page {url}: {err}");
                continue;
            }
        };
        match podium_extract::parse_talk(&html, url) {
            Ok(Some(record)) => parsed.push(ParsedTalk { session_index, record }),
            Ok(None) => debug!("not a talk, skipping {url}"),
            Err(err) => warn!("could not parse {url}: {err}"),
        }
    }
    parsed
}

/// Write the three export artifacts: nested JSON, the full database, and
/// the stripped no-text copy. Pre-existing artifacts are replaced.
#[instrument(skip(dataset))]
async fn write_exports(dataset: &Dataset, output_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .or_raise(|| ErrorKind::Export(output_dir.to_path_buf()))?;

    let json_path = output_dir.join(JSON_EXPORT);
    let json = serde_json::to_string_pretty(&dataset.talk_exports())
        .or_raise(|| ErrorKind::Export(json_path.clone()))?;
    tokio::fs::write(&json_path, json)
        .await
        .or_raise(|| ErrorKind::Export(json_path.clone()))?;
    info!(path = %json_path.display(), "JSON export written");

    let db_path = output_dir.join(DB_EXPORT);
    let no_text_path = output_dir.join(DB_NO_TEXT_EXPORT);
    for stale in [&db_path, &no_text_path] {
        match tokio::fs::remove_file(stale).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(_) => exn::bail!(ErrorKind::Export(stale.clone())),
        }
    }

    let db = Database::connect(&db_path).await.or_raise(|| ErrorKind::Export(db_path.clone()))?;
    podium_store::write_dataset(&db, dataset)
        .await
        .or_raise(|| ErrorKind::Export(db_path.clone()))?;
    db.close().await;
    info!(path = %db_path.display(), "database export written");

    podium_store::write_no_text_copy(&db_path, &no_text_path)
        .await
        .or_raise(|| ErrorKind::Export(no_text_path.clone()))?;
    info!(path = %no_text_path.display(), "no-text database export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovered_conferences_sort_chronologically() {
        let mut conferences = vec![
            DiscoveredConference { year: 2020, season: Season::October, url: "b".into() },
            DiscoveredConference { year: 1971, season: Season::April, url: "a".into() },
            DiscoveredConference { year: 2020, season: Season::April, url: "c".into() },
        ];
        conferences.sort_by_key(|c| (c.year, c.season));
        let order: Vec<(u16, Season)> = conferences.iter().map(|c| (c.year, c.season)).collect();
        assert_eq!(
            order,
            vec![(1971, Season::April), (2020, Season::April), (2020, Season::October)]
        );
    }
}
