use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification of a URL attached to a talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    Audio,
    Video,
    Text,
}

impl UrlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Text => "text",
        }
    }

    /// Classify a media link by file extension, then by link-label keyword.
    /// Anything unrecognized is treated as a text resource.
    pub fn classify(href: &str, label: &str) -> Self {
        let href = href.split(['?', '#']).next().unwrap_or(href).to_lowercase();
        if href.ends_with(".mp3") || href.ends_with(".m4a") {
            return Self::Audio;
        }
        if href.ends_with(".mp4") || href.ends_with(".m3u8") {
            return Self::Video;
        }
        let label = label.to_lowercase();
        if label.contains("audio") {
            Self::Audio
        } else if label.contains("video") {
            Self::Video
        } else {
            Self::Text
        }
    }
}

impl Display for UrlKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrlKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            "text" => Ok(Self::Text),
            other => Err(other.to_string()),
        }
    }
}

/// A URL attached to a talk, classified by [`UrlKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaUrl {
    pub url: String,
    pub kind: UrlKind,
}

impl MediaUrl {
    pub fn new(url: impl Into<String>, kind: UrlKind) -> Self {
        Self { url: url.into(), kind }
    }
}
