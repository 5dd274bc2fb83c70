//! Extraction of a single talk page into a [`TalkRecord`].

use std::collections::HashSet;

use exn::OptionExt;
use scraper::Html;
use tracing::instrument;

use crate::clean::{clean, clean_line};
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{Byline, MediaUrl, TalkRecord, UrlKind};

/// Pages that share the talk URL scheme but are not talks: full session
/// recordings, sustainings and administrative reports. They are skipped,
/// not treated as parse failures.
const EXCLUDED_PREFIXES: &[&str] = &[
    "Church Auditing Department Report",
    "Statistical Report",
    "Audit Report",
    "The Annual Report of the Church",
    "Church Finance Committee Report",
    "The Sustaining of Church Officers",
    "The Church Audit Committee Report",
    "Sustaining of ",
    "Video:",
    "Proclamation",
];
const EXCLUDED_SUBSTRINGS: &[&str] = &["[Video Presentation]"];
const EXCLUDED_SUFFIXES: &[&str] = &["Session"];

/// A parsed talk page.
#[derive(Debug)]
pub struct TalkPage {
    document: Html,
}

impl TalkPage {
    pub fn from_document(document: Html) -> Self {
        Self { document }
    }

    pub fn from_html(html: &str) -> Self {
        Self::from_document(Html::parse_document(html))
    }

    /// Extract the talk record, with `page_url` recorded as the default
    /// text-kind URL.
    ///
    /// Returns `Ok(None)` for pages that are deliberately excluded (session
    /// recordings, sustainings, reports). A missing title or a byline with
    /// no usable speaker is an error; the caller logs it and skips the page.
    #[instrument(skip(self))]
    pub fn record(&self, page_url: &str) -> Result<Option<TalkRecord>> {
        let title = self.title()?;
        if Self::is_excluded(&title) {
            return Ok(None);
        }
        let name_line = self
            .first_text(&consts::AUTHOR_NAME_SELECTOR)
            .ok_or_raise(|| ErrorKind::MissingField("speaker"))?;
        let role_line = self.first_text(&consts::AUTHOR_ROLE_SELECTOR);
        let byline = Byline::parse(&name_line, role_line.as_deref())
            .ok_or_raise(|| ErrorKind::MissingField("speaker"))?;
        Ok(Some(TalkRecord {
            title,
            speakers: byline.speakers,
            calling: byline.calling,
            emeritus: byline.emeritus,
            body: self.body(),
            topics: self.topics(),
            urls: self.urls(page_url),
        }))
    }

    fn title(&self) -> Result<String> {
        self.first_text(&consts::TITLE_SELECTOR)
            .or_else(|| self.first_text(&consts::FALLBACK_TITLE_SELECTOR))
            .filter(|title| !title.is_empty())
            .ok_or_raise(|| ErrorKind::MissingField("title"))
    }

    fn is_excluded(title: &str) -> bool {
        EXCLUDED_PREFIXES.iter().any(|prefix| title.starts_with(prefix))
            || EXCLUDED_SUBSTRINGS.iter().any(|needle| title.contains(needle))
            || EXCLUDED_SUFFIXES.iter().any(|suffix| title.ends_with(suffix))
    }

    /// Paragraph text of the article body, blank-line separated. Only `p`
    /// nodes are taken, which excludes footnote lists and figure captions.
    fn body(&self) -> String {
        let Some(block) = self.document.select(&consts::BODY_BLOCK_SELECTOR).next() else {
            return String::new();
        };
        block
            .select(&consts::PARAGRAPH_SELECTOR)
            .map(|p| clean(&p.text().collect::<String>()))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn topics(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();
        for anchor in self.document.select(&consts::TOPIC_ANCHOR_SELECTOR) {
            let label = clean_line(&anchor.text().collect::<String>());
            if !label.is_empty() && seen.insert(label.clone()) {
                topics.push(label);
            }
        }
        topics
    }

    /// The page itself is the canonical text URL; media anchors (audio and
    /// video streams, download links) are collected on top, deduplicated.
    fn urls(&self, page_url: &str) -> Vec<MediaUrl> {
        let mut seen = HashSet::from([page_url.to_string()]);
        let mut urls = vec![MediaUrl::new(page_url, UrlKind::Text)];
        for anchor in self.document.select(&consts::ANCHOR_SELECTOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let label = clean_line(&anchor.text().collect::<String>());
            let kind = UrlKind::classify(href, &label);
            let is_media = matches!(kind, UrlKind::Audio | UrlKind::Video)
                || label.to_lowercase().contains("download");
            if is_media && seen.insert(href.to_string()) {
                urls.push(MediaUrl::new(href, kind));
            }
        }
        urls
    }

    fn first_text(&self, selector: &scraper::Selector) -> Option<String> {
        self.document
            .select(selector)
            .next()
            .map(|el| clean_line(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
    }
}

impl From<Html> for TalkPage {
    fn from(document: Html) -> Self {
        Self::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Calling;
    use rstest::rstest;

    const PAGE_URL: &str = "https://www.churchofjesuschrist.org/study/general-conference/2020/04/talk?lang=eng";

    fn talk_html(title: &str, author: &str, role: Option<&str>) -> String {
        let role = role.map_or(String::new(), |role| format!(r#"<p class="author-role">{role}</p>"#));
        format!(
            r#"<html><head><title>{title}</title></head><body>
            <h1 id="title1">{title}</h1>
            <p class="author-name">{author}</p>
            {role}
            <div class="body-block">
                <p>First paragraph.</p>
                <p>Second&nbsp;paragraph.</p>
                <figure><figcaption>A caption outside paragraphs.</figcaption></figure>
            </div>
            <a href="https://media.example.org/talk.mp3">Audio</a>
            <a href="https://media.example.org/talk-1080p.mp4">Video</a>
            <a href="/study/general-conference/topics/faith?lang=eng">Faith</a>
            <a href="/study/general-conference/topics/hope?lang=eng">Hope</a>
            </body></html>"#
        )
    }

    #[test]
    fn test_full_talk_page() {
        let html = talk_html("A Talk of Note", "By Jane Doe", Some("Relief Society General President"));
        let record = TalkPage::from_html(&html).record(PAGE_URL).unwrap().unwrap();
        assert_eq!(record.title, "A Talk of Note");
        assert_eq!(record.speakers, vec!["Jane Doe".to_string()]);
        assert_eq!(
            record.calling,
            Some(Calling {
                name: "Relief Society General President".to_string(),
                organization: "Relief Society General Presidency".to_string(),
                rank: 7,
            })
        );
        assert!(!record.emeritus);
        assert_eq!(record.body, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(record.topics, vec!["Faith".to_string(), "Hope".to_string()]);
    }

    #[test]
    fn test_urls_classified_with_default_text() {
        let html = talk_html("A Talk of Note", "By Jane Doe", None);
        let record = TalkPage::from_html(&html).record(PAGE_URL).unwrap().unwrap();
        assert_eq!(record.urls[0], MediaUrl::new(PAGE_URL, UrlKind::Text));
        assert!(record.urls.contains(&MediaUrl::new("https://media.example.org/talk.mp3", UrlKind::Audio)));
        assert!(record.urls.contains(&MediaUrl::new("https://media.example.org/talk-1080p.mp4", UrlKind::Video)));
        // Topic anchors are not media and must not leak into the URL list.
        assert_eq!(record.urls.len(), 3);
    }

    #[rstest]
    #[case("Saturday Morning Session")]
    #[case("The Sustaining of Church Officers")]
    #[case("Sustaining of General Authorities")]
    #[case("Statistical Report, 1971")]
    #[case("Video: Moments from General Conference")]
    #[case("A Talk [Video Presentation] in Parts")]
    fn test_excluded_titles(#[case] title: &str) {
        let html = talk_html(title, "By Jane Doe", None);
        assert!(TalkPage::from_html(&html).record(PAGE_URL).unwrap().is_none());
    }

    #[test]
    fn test_missing_speaker_is_error() {
        let html = r#"<html><body><h1 id="title1">Orphan Talk</h1>
            <div class="body-block"><p>Text.</p></div></body></html>"#;
        let err = TalkPage::from_html(html).record(PAGE_URL).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("speaker"));
    }

    #[test]
    fn test_missing_title_is_error() {
        let html = r#"<html><body><p class="author-name">By Jane Doe</p></body></html>"#;
        let err = TalkPage::from_html(html).record(PAGE_URL).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("title"));
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        let html = r#"<html><head><title>Fallback Title</title></head><body>
            <p class="author-name">By Jane Doe</p></body></html>"#;
        let record = TalkPage::from_html(html).record(PAGE_URL).unwrap().unwrap();
        assert_eq!(record.title, "Fallback Title");
    }
}
