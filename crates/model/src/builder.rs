//! Incremental assembly of the relational [`Dataset`].

use std::collections::HashMap;

use podium_extract::models::{Season, TalkRecord};
use tracing::instrument;

use crate::dataset::{
    ConferenceRow, Dataset, SessionRow, TalkConferenceRow, TalkRow, TalkSessionRow,
    TalkSpeakerRow, TalkCallingRow, TalkTextRow, TalkTopicRow, TalkUrlRow,
};
use crate::error::{ErrorKind, Result};
use crate::resolver::EntityResolver;

/// Accumulates conferences, sessions and talks in pipeline order and
/// assigns every row its final id up front, so the JSON and SQLite
/// exports agree without a second numbering pass.
///
/// Feed it strictly top-down: create a conference, then its sessions,
/// then each talk against the session it appeared under. Positions are
/// counted per parent, preserving the order items were added in.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    resolver: EntityResolver,
    conferences: Vec<ConferenceRow>,
    sessions: Vec<SessionRow>,
    talks: Vec<TalkRow>,
    talk_conferences: Vec<TalkConferenceRow>,
    talk_sessions: Vec<TalkSessionRow>,
    talk_speakers: Vec<TalkSpeakerRow>,
    talk_callings: Vec<TalkCallingRow>,
    talk_texts: Vec<TalkTextRow>,
    talk_urls: Vec<TalkUrlRow>,
    talk_topics: Vec<TalkTopicRow>,
    session_positions: HashMap<i64, i64>,
    talk_positions: HashMap<i64, i64>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conference and return its id.
    pub fn add_conference(&mut self, year: u16, season: Season) -> i64 {
        let id = self.conferences.len() as i64 + 1;
        self.conferences.push(ConferenceRow { id, year, season });
        id
    }

    /// Register a session under `conference` and return its id. Sessions
    /// are positioned in the order they are added within the conference.
    pub fn add_session(&mut self, conference: i64, name: &str) -> Result<i64> {
        if !self.contains_conference(conference) {
            exn::bail!(ErrorKind::Resolution(format!(
                "session {name:?} references unknown conference {conference}"
            )));
        }
        let counter = self.session_positions.entry(conference).or_insert(0);
        let position = *counter;
        *counter += 1;
        let id = self.sessions.len() as i64 + 1;
        self.sessions.push(SessionRow {
            id,
            conference,
            name: name.to_string(),
            position,
        });
        Ok(id)
    }

    /// Register a talk under `conference` and `session`, emitting every
    /// join, text, url and topic row it implies. Returns the talk id.
    #[instrument(skip(self, record), fields(title = %record.title))]
    pub fn add_talk(&mut self, conference: i64, session: i64, record: &TalkRecord) -> Result<i64> {
        if !self.contains_conference(conference) {
            exn::bail!(ErrorKind::Resolution(format!(
                "talk {:?} references unknown conference {conference}",
                record.title
            )));
        }
        if !self.contains_session(session) {
            exn::bail!(ErrorKind::Resolution(format!(
                "talk {:?} references unknown session {session}",
                record.title
            )));
        }
        if record.speakers.is_empty() {
            exn::bail!(ErrorKind::Resolution(format!(
                "talk {:?} has no speakers",
                record.title
            )));
        }

        let talk = self.talks.len() as i64 + 1;
        self.talks.push(TalkRow {
            id: talk,
            title: record.title.clone(),
            emeritus: record.emeritus,
        });

        self.talk_conferences.push(TalkConferenceRow {
            id: self.talk_conferences.len() as i64 + 1,
            talk,
            conference,
        });

        let counter = self.talk_positions.entry(session).or_insert(0);
        let position = *counter;
        *counter += 1;
        self.talk_sessions.push(TalkSessionRow {
            id: self.talk_sessions.len() as i64 + 1,
            talk,
            session,
            position,
        });

        let calling = record.calling.as_ref().map(|c| self.resolver.calling(c));
        for name in &record.speakers {
            let speaker = self.resolver.speaker(name);
            self.talk_speakers.push(TalkSpeakerRow {
                id: self.talk_speakers.len() as i64 + 1,
                talk,
                speaker,
            });
            if let Some(calling) = calling {
                self.talk_callings.push(TalkCallingRow {
                    id: self.talk_callings.len() as i64 + 1,
                    talk,
                    speaker,
                    calling,
                });
            }
        }

        self.talk_texts.push(TalkTextRow {
            id: self.talk_texts.len() as i64 + 1,
            talk,
            text: record.body.clone(),
        });

        for media in &record.urls {
            self.talk_urls.push(TalkUrlRow {
                id: self.talk_urls.len() as i64 + 1,
                talk,
                url: media.url.clone(),
                kind: media.kind.to_string(),
            });
        }

        for topic in &record.topics {
            self.talk_topics.push(TalkTopicRow {
                id: self.talk_topics.len() as i64 + 1,
                talk,
                name: topic.clone(),
            });
        }

        Ok(talk)
    }

    /// Consume the builder and produce the finished dataset, filling the
    /// entity tables from the resolver.
    pub fn finish(self) -> Dataset {
        Dataset {
            speakers: self.resolver.speaker_rows(),
            organizations: self.resolver.organization_rows(),
            callings: self.resolver.calling_rows(),
            conferences: self.conferences,
            sessions: self.sessions,
            talks: self.talks,
            talk_conferences: self.talk_conferences,
            talk_sessions: self.talk_sessions,
            talk_speakers: self.talk_speakers,
            talk_callings: self.talk_callings,
            talk_texts: self.talk_texts,
            talk_urls: self.talk_urls,
            talk_topics: self.talk_topics,
        }
    }

    fn contains_conference(&self, id: i64) -> bool {
        id >= 1 && id <= self.conferences.len() as i64
    }

    fn contains_session(&self, id: i64) -> bool {
        id >= 1 && id <= self.sessions.len() as i64
    }
}
