use serde::{Deserialize, Serialize};

use crate::models::{Calling, MediaUrl};

/// Everything extracted from a single talk page.
///
/// This is the narrow interface between the site's markup and the rest of
/// the pipeline: if the site redesigns, only the extractor behind this type
/// needs to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkRecord {
    pub title: String,
    /// One name per speaker; more than one for co-delivered talks.
    pub speakers: Vec<String>,
    /// The calling attributed at delivery time, shared by all speakers of
    /// the talk. `None` when the byline carries no role line.
    pub calling: Option<Calling>,
    pub emeritus: bool,
    /// Concatenated paragraph text, blank-line separated. Footnotes and
    /// captions are excluded.
    pub body: String,
    pub topics: Vec<String>,
    /// Classified URLs; always contains at least the text-kind page URL.
    pub urls: Vec<MediaUrl>,
}
