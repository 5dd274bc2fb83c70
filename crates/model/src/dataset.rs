//! The normalized relational model: one row struct per table, accumulated
//! into a [`Dataset`] by the builder, plus the nested JSON export shape.

use std::collections::HashMap;

use podium_extract::models::{MediaUrl, Season};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallingRow {
    pub id: i64,
    pub name: String,
    pub organization: i64,
    pub rank: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConferenceRow {
    pub id: i64,
    pub year: u16,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRow {
    pub id: i64,
    pub conference: i64,
    pub name: String,
    /// 0-based ordinal of the session within its conference, preserving
    /// source index order.
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkRow {
    pub id: i64,
    pub title: String,
    pub emeritus: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkConferenceRow {
    pub id: i64,
    pub talk: i64,
    pub conference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkSessionRow {
    pub id: i64,
    pub talk: i64,
    pub session: i64,
    /// 0-based ordinal of the talk within its session.
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkSpeakerRow {
    pub id: i64,
    pub talk: i64,
    pub speaker: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkCallingRow {
    pub id: i64,
    pub talk: i64,
    pub speaker: i64,
    pub calling: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkTextRow {
    pub id: i64,
    pub talk: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkUrlRow {
    pub id: i64,
    pub talk: i64,
    pub url: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkTopicRow {
    pub id: i64,
    pub talk: i64,
    pub name: String,
}

/// The complete normalized graph produced by one extraction pass.
///
/// Immutable once built; re-running the pipeline regenerates everything
/// from scratch. Row order within each table is id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub speakers: Vec<SpeakerRow>,
    pub organizations: Vec<OrganizationRow>,
    pub callings: Vec<CallingRow>,
    pub conferences: Vec<ConferenceRow>,
    pub sessions: Vec<SessionRow>,
    pub talks: Vec<TalkRow>,
    pub talk_conferences: Vec<TalkConferenceRow>,
    pub talk_sessions: Vec<TalkSessionRow>,
    pub talk_speakers: Vec<TalkSpeakerRow>,
    pub talk_callings: Vec<TalkCallingRow>,
    pub talk_texts: Vec<TalkTextRow>,
    pub talk_urls: Vec<TalkUrlRow>,
    pub talk_topics: Vec<TalkTopicRow>,
}

/// One talk in the nested JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkExport {
    pub title: String,
    pub year: u16,
    pub season: Season,
    pub session: String,
    pub emeritus: bool,
    pub speakers: Vec<SpeakerExport>,
    pub urls: Vec<MediaUrl>,
    pub topics: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerExport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling: Option<CallingExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallingExport {
    pub name: String,
    pub organization: String,
    pub rank: i64,
}

impl Dataset {
    /// Flatten the relational graph back into one nested talk object per
    /// talk, in build order. Deterministic: driven entirely by row order.
    pub fn talk_exports(&self) -> Vec<TalkExport> {
        let speakers: HashMap<i64, &SpeakerRow> = self.speakers.iter().map(|r| (r.id, r)).collect();
        let organizations: HashMap<i64, &OrganizationRow> = self.organizations.iter().map(|r| (r.id, r)).collect();
        let callings: HashMap<i64, &CallingRow> = self.callings.iter().map(|r| (r.id, r)).collect();
        let conferences: HashMap<i64, &ConferenceRow> = self.conferences.iter().map(|r| (r.id, r)).collect();
        let sessions: HashMap<i64, &SessionRow> = self.sessions.iter().map(|r| (r.id, r)).collect();

        let mut conference_of: HashMap<i64, i64> = HashMap::new();
        for row in &self.talk_conferences {
            conference_of.insert(row.talk, row.conference);
        }
        let mut session_of: HashMap<i64, i64> = HashMap::new();
        for row in &self.talk_sessions {
            session_of.insert(row.talk, row.session);
        }
        let mut speakers_of: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in &self.talk_speakers {
            speakers_of.entry(row.talk).or_default().push(row.speaker);
        }
        let mut calling_of: HashMap<(i64, i64), i64> = HashMap::new();
        for row in &self.talk_callings {
            calling_of.insert((row.talk, row.speaker), row.calling);
        }
        let mut text_of: HashMap<i64, &str> = HashMap::new();
        for row in &self.talk_texts {
            text_of.insert(row.talk, row.text.as_str());
        }
        let mut urls_of: HashMap<i64, Vec<MediaUrl>> = HashMap::new();
        for row in &self.talk_urls {
            urls_of
                .entry(row.talk)
                .or_default()
                .push(MediaUrl::new(row.url.clone(), row.kind.parse().unwrap_or(podium_extract::models::UrlKind::Text)));
        }
        let mut topics_of: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &self.talk_topics {
            topics_of.entry(row.talk).or_default().push(row.name.clone());
        }

        self.talks
            .iter()
            .map(|talk| {
                let conference = conference_of.get(&talk.id).and_then(|id| conferences.get(id));
                let session = session_of.get(&talk.id).and_then(|id| sessions.get(id));
                let talk_speakers = speakers_of.get(&talk.id).map(Vec::as_slice).unwrap_or_default();
                TalkExport {
                    title: talk.title.clone(),
                    year: conference.map_or(0, |c| c.year),
                    season: conference.map_or(Season::April, |c| c.season),
                    session: session.map_or_else(String::new, |s| s.name.clone()),
                    emeritus: talk.emeritus,
                    speakers: talk_speakers
                        .iter()
                        .map(|speaker_id| SpeakerExport {
                            name: speakers.get(speaker_id).map_or_else(String::new, |s| s.name.clone()),
                            calling: calling_of.get(&(talk.id, *speaker_id)).and_then(|calling_id| {
                                callings.get(calling_id).map(|calling| CallingExport {
                                    name: calling.name.clone(),
                                    organization: organizations
                                        .get(&calling.organization)
                                        .map_or_else(String::new, |o| o.name.clone()),
                                    rank: calling.rank,
                                })
                            }),
                        })
                        .collect(),
                    urls: urls_of.remove(&talk.id).unwrap_or_default(),
                    topics: topics_of.remove(&talk.id).unwrap_or_default(),
                    text: text_of.get(&talk.id).map(|t| t.to_string()).unwrap_or_default(),
                }
            })
            .collect()
    }
}
