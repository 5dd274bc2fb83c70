//! Discovery of conference, session and talk links from the index pages.
//!
//! The top-level index links either directly to a conference
//! (`/study/general-conference/2020/04`) or to a decade selection page
//! (`/study/general-conference/19801989`) which in turn links to its
//! conferences. Conference pages list their sessions, each with the talks
//! delivered in it, in broadcast order.

use std::collections::HashSet;

use exn::{OptionExt, ResultExt};
use scraper::Html;
use tracing::instrument;

use crate::clean::clean_line;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::Season;

/// Links found on the top-level conference index.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexLinks {
    /// Direct links to individual conferences, first-seen order.
    pub conferences: Vec<String>,
    /// Decade selection pages that need a second fetch.
    pub decades: Vec<String>,
}

/// A session of a conference with its talk page links, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionListing {
    pub name: String,
    pub talk_urls: Vec<String>,
}

/// Collect conference and decade links from the top-level index page.
#[instrument(skip(html))]
pub fn conference_links(html: &str, base_url: &str) -> IndexLinks {
    let document = Html::parse_document(html);
    let mut links = IndexLinks::default();
    let mut seen = HashSet::new();
    for anchor in document.select(&consts::ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !seen.insert(href.to_string()) {
            continue;
        }
        if consts::DECADE_URL_REGEX.is_match(href) {
            links.decades.push(absolute(base_url, href));
        } else if consts::CONFERENCE_URL_REGEX.is_match(href) && !consts::TALK_URL_REGEX.is_match(href) {
            links.conferences.push(absolute(base_url, href));
        }
    }
    links
}

/// Collect the per-conference links from a decade selection page.
#[instrument(skip(html))]
pub fn decade_conference_links(html: &str, base_url: &str) -> Vec<String> {
    conference_links(html, base_url).conferences
}

/// Collect the sessions of a conference page, each with its talk links.
///
/// Sessions are `li[data-content-type="general-conference-session"]` items
/// carrying at least one talk anchor; the session name is the item's
/// `p.title`. Links to the session page itself are excluded; duplicates are
/// dropped preserving first-seen order, because export ordering is derived
/// from position.
#[instrument(skip(html))]
pub fn session_listings(html: &str, base_url: &str) -> Vec<SessionListing> {
    let document = Html::parse_document(html);
    let mut sessions = Vec::new();
    for item in document.select(&consts::SESSION_ITEM_SELECTOR) {
        let Some(name) = item
            .select(&consts::SESSION_TITLE_SELECTOR)
            .next()
            .map(|el| clean_line(&el.text().collect::<String>()))
            .filter(|name| !name.is_empty())
        else {
            continue;
        };
        let mut seen = HashSet::new();
        let mut talk_urls = Vec::new();
        for anchor in item.select(&consts::ANCHOR_SELECTOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if consts::TALK_URL_REGEX.is_match(href)
                && !href.ends_with("session?lang=eng")
                && seen.insert(href.to_string())
            {
                talk_urls.push(absolute(base_url, href));
            }
        }
        if !talk_urls.is_empty() {
            sessions.push(SessionListing { name, talk_urls });
        }
    }
    sessions
}

/// Parse the conference year and season out of a conference or talk URL.
///
/// A URL matching neither `/<year>/04` nor `/<year>/10` is a parse failure,
/// never a silent default: every talk must resolve to exactly one conference.
pub fn conference_of_url(url: &str) -> Result<(u16, Season)> {
    let caps = consts::CONFERENCE_URL_REGEX
        .captures(url)
        .ok_or_raise(|| ErrorKind::InvalidUrl(url.to_string()))?;
    let year = caps[1].parse::<u16>().or_raise(|| ErrorKind::ParseError {
        field: "year",
        value: url.to_string(),
    })?;
    let season = Season::from_month_segment(&caps[2]).ok_or_raise(|| ErrorKind::InvalidUrl(url.to_string()))?;
    Ok((year, season))
}

fn absolute(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "https://www.churchofjesuschrist.org";

    #[test]
    fn test_conference_links_split_decades() {
        let html = r#"<html><body>
            <a href="/study/general-conference/2020/04?lang=eng">April 2020</a>
            <a href="/study/general-conference/2019/10?lang=eng">October 2019</a>
            <a href="/study/general-conference/19801989?lang=eng">1980-1989</a>
            <a href="/study/general-conference/2020/04?lang=eng">April 2020 again</a>
            <a href="/some/other/page">Unrelated</a>
        </body></html>"#;
        let links = conference_links(html, BASE);
        assert_eq!(
            links.conferences,
            vec![
                format!("{BASE}/study/general-conference/2020/04?lang=eng"),
                format!("{BASE}/study/general-conference/2019/10?lang=eng"),
            ]
        );
        assert_eq!(links.decades, vec![format!("{BASE}/study/general-conference/19801989?lang=eng")]);
    }

    #[test]
    fn test_talk_links_not_mistaken_for_conferences() {
        let html = r#"<a href="/study/general-conference/2020/04/some-talk?lang=eng">Talk</a>"#;
        let links = conference_links(html, BASE);
        assert!(links.conferences.is_empty());
    }

    #[test]
    fn test_session_listings_in_source_order() {
        let html = r#"<html><body><ul>
            <li data-content-type="general-conference-session">
                <p class="title">Saturday Morning Session</p>
                <a href="/study/general-conference/2020/04/saturday-morning-session?lang=eng">Session</a>
                <a href="/study/general-conference/2020/04/11nelson?lang=eng">Talk One</a>
                <a href="/study/general-conference/2020/04/12oaks?lang=eng">Talk Two</a>
                <a href="/study/general-conference/2020/04/12oaks?lang=eng">Talk Two Duplicate</a>
            </li>
            <li data-content-type="general-conference-session">
                <p class="title">Saturday Afternoon Session</p>
                <a href="/study/general-conference/2020/04/21holland?lang=eng">Talk Three</a>
            </li>
        </ul></body></html>"#;
        let sessions = session_listings(html, BASE);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].name, "Saturday Morning Session");
        assert_eq!(
            sessions[0].talk_urls,
            vec![
                format!("{BASE}/study/general-conference/2020/04/11nelson?lang=eng"),
                format!("{BASE}/study/general-conference/2020/04/12oaks?lang=eng"),
            ]
        );
        assert_eq!(sessions[1].name, "Saturday Afternoon Session");
        assert_eq!(sessions[1].talk_urls.len(), 1);
    }

    #[rstest]
    #[case("https://www.churchofjesuschrist.org/study/general-conference/2020/04?lang=eng", 2020, Season::April)]
    #[case("https://www.churchofjesuschrist.org/study/general-conference/1971/10/talk?lang=eng", 1971, Season::October)]
    fn test_conference_of_url(#[case] url: &str, #[case] year: u16, #[case] season: Season) {
        assert_eq!(conference_of_url(url).unwrap(), (year, season));
    }

    #[test]
    fn test_conference_of_url_rejects_other_urls() {
        let err = conference_of_url("https://www.churchofjesuschrist.org/study/manual/").unwrap_err();
        assert!(matches!(*err, ErrorKind::InvalidUrl(_)));
    }
}
