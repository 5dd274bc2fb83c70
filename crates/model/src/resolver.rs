//! Corpus-wide entity deduplication.

use podium_extract::models::Calling;

use crate::dataset::{CallingRow, OrganizationRow, SpeakerRow};
use crate::index::KeyedIndex;

/// Deduplicates speakers, organizations and callings across the entire
/// corpus, assigning stable 1-based ids in encounter order.
///
/// All three mappings are lookup-or-create and case-sensitive: two talks
/// referencing "Dallin H. Oaks" resolve to the same speaker id, while a
/// differently-spelled name is a different entity. A calling is keyed by
/// `(name, organization)`; its rank is recorded when the calling is first
/// created and never recomputed.
#[derive(Debug, Clone, Default)]
pub struct EntityResolver {
    speakers: KeyedIndex<String>,
    organizations: KeyedIndex<String>,
    callings: KeyedIndex<(String, i64)>,
    // Rank per calling, aligned with calling insertion order.
    ranks: Vec<i64>,
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a speaker name to its id, creating the speaker if new.
    pub fn speaker(&mut self, name: &str) -> i64 {
        self.speakers.get_or_insert(name.to_string()).0
    }

    /// Resolve an organization name to its id, creating it if new.
    pub fn organization(&mut self, name: &str) -> i64 {
        self.organizations.get_or_insert(name.to_string()).0
    }

    /// Resolve a calling to its id, creating the calling (and its
    /// organization) if new. The heuristic rank carried by `calling` is
    /// stored on first sight only.
    pub fn calling(&mut self, calling: &Calling) -> i64 {
        let organization = self.organization(&calling.organization);
        let (id, created) = self.callings.get_or_insert((calling.name.clone(), organization));
        if created {
            self.ranks.push(calling.rank);
        }
        id
    }

    pub fn speaker_rows(&self) -> Vec<SpeakerRow> {
        self.speakers
            .iter()
            .map(|(name, id)| SpeakerRow { id, name: name.clone() })
            .collect()
    }

    pub fn organization_rows(&self) -> Vec<OrganizationRow> {
        self.organizations
            .iter()
            .map(|(name, id)| OrganizationRow { id, name: name.clone() })
            .collect()
    }

    pub fn calling_rows(&self) -> Vec<CallingRow> {
        self.callings
            .iter()
            .zip(&self.ranks)
            .map(|(((name, organization), id), rank)| CallingRow {
                id,
                name: name.clone(),
                organization: *organization,
                rank: *rank,
            })
            .collect()
    }
}
