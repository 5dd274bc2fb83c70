//! Entity resolution and relational model building.
//!
//! Parsed talk records come in one at a time; this crate deduplicates the
//! entities they mention (speakers, organizations, callings) and assembles
//! the normalized row tables that the exporters write out. All ids are
//! assigned here, 1-based in encounter order, so every export format
//! agrees on them.

mod builder;
mod dataset;
mod error;
mod index;
mod resolver;

pub use builder::ModelBuilder;
pub use dataset::{
    CallingExport, CallingRow, ConferenceRow, Dataset, OrganizationRow, SessionRow, SpeakerExport,
    SpeakerRow, TalkCallingRow, TalkConferenceRow, TalkExport, TalkRow, TalkSessionRow,
    TalkSpeakerRow, TalkTextRow, TalkTopicRow, TalkUrlRow,
};
pub use error::{Error, ErrorKind, Result};
pub use index::KeyedIndex;
pub use resolver::EntityResolver;
