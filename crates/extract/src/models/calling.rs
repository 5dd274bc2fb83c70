use serde::{Deserialize, Serialize};

use crate::clean::clean_line;
use crate::consts;

/// Sentinel rank for callings the heuristic table does not recognize.
///
/// Deliberately distinct from `0`, which is the top ecclesiastical office.
/// The table below is a heuristic ordering, not an authoritative hierarchy.
pub const UNRANKED: i64 = 99;

/// An ecclesiastical office or assignment held by a speaker, together with
/// the organization it belongs to and a heuristic rank (distance from the
/// top office).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Calling {
    pub name: String,
    pub organization: String,
    pub rank: i64,
}

impl Calling {
    /// Parse an `author-role` byline into a calling.
    ///
    /// Returns the calling plus whether the line carried a released/former
    /// qualifier (e.g. "Recently Released as Young Women General President"),
    /// which marks the talk as emeritus. An empty line yields `None`: the
    /// speaker holds no formal calling for that talk.
    pub fn parse(line: &str) -> Option<(Self, bool)> {
        let line = clean_line(line);
        if line.is_empty() {
            return None;
        }
        let (qualified, name) = match consts::CALLING_REGEX.captures(&line) {
            Some(caps) => (
                caps.name("qualifier").is_some_and(|m| !m.as_str().trim().is_empty()),
                caps.name("calling").map_or_else(|| line.clone(), |m| m.as_str().trim().to_string()),
            ),
            // Callings with punctuation outside the usual pattern are kept verbatim.
            None => (false, line.clone()),
        };
        let (organization, rank) = organization_and_rank(&name);
        Some((Self { name, organization, rank }, qualified))
    }
}

/// Derive `(organization, rank)` from a calling name; first match wins.
///
/// Lookup happens once per distinct calling at resolution time, never per
/// talk. Unmatched callings land in the catch-all "Local" organization with
/// the [`UNRANKED`] sentinel.
fn organization_and_rank(name: &str) -> (String, i64) {
    let lowered = name.to_lowercase();
    if lowered.contains("president of the church") {
        return ("First Presidency".to_string(), 0);
    }
    if lowered.contains("first presidency") {
        return ("First Presidency".to_string(), 1);
    }
    if lowered.contains("of the twelve") {
        return ("Quorum of the Twelve Apostles".to_string(), 2);
    }
    if lowered.contains("of the seventy") {
        return ("Quorum of the Seventy".to_string(), 3);
    }
    if lowered.contains("presiding bishop") {
        return ("Presiding Bishopric".to_string(), 4);
    }
    if lowered.ends_with("general presidency") || lowered.ends_with("general president") {
        for (needle, organization, rank) in [
            ("young men", "Young Men General Presidency", 5),
            ("sunday school", "Sunday School General Presidency", 6),
            ("relief society", "Relief Society General Presidency", 7),
            ("young women", "Young Women General Presidency", 8),
            ("primary", "Primary General Presidency", 9),
        ] {
            if lowered.contains(needle) {
                return (organization.to_string(), rank);
            }
        }
    }
    if lowered.contains("church audit committee") || lowered.contains("church leadership committee") {
        return (name.to_string(), UNRANKED);
    }
    ("Local".to_string(), UNRANKED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("President of the Church", "First Presidency", 0)]
    #[case("Second Counselor in the First Presidency", "First Presidency", 1)]
    #[case("Of the Quorum of the Twelve Apostles", "Quorum of the Twelve Apostles", 2)]
    #[case("Of the Seventy", "Quorum of the Seventy", 3)]
    #[case("Presiding Bishop", "Presiding Bishopric", 4)]
    #[case("Young Men General President", "Young Men General Presidency", 5)]
    #[case("First Counselor in the Sunday School General Presidency", "Sunday School General Presidency", 6)]
    #[case("Relief Society General President", "Relief Society General Presidency", 7)]
    #[case("Young Women General President", "Young Women General Presidency", 8)]
    #[case("Second Counselor in the Primary General Presidency", "Primary General Presidency", 9)]
    #[case("Church Audit Committee", "Church Audit Committee", UNRANKED)]
    fn test_organization_and_rank(#[case] name: &str, #[case] organization: &str, #[case] rank: i64) {
        let (calling, qualified) = Calling::parse(name).unwrap();
        assert_eq!(calling.organization, organization);
        assert_eq!(calling.rank, rank);
        assert!(!qualified);
    }

    #[test]
    fn test_unmatched_calling_is_unranked_not_top() {
        let (calling, _) = Calling::parse("Ward Organist").unwrap();
        assert_eq!(calling.organization, "Local");
        assert_eq!(calling.rank, UNRANKED);
        assert_ne!(calling.rank, 0);
    }

    #[test]
    fn test_released_qualifier_is_stripped_and_flagged() {
        let (calling, qualified) = Calling::parse("Recently Released as Young Women General President").unwrap();
        assert_eq!(calling.name, "Young Women General President");
        assert_eq!(calling.organization, "Young Women General Presidency");
        assert!(qualified);
    }

    #[test]
    fn test_former_qualifier() {
        let (calling, qualified) = Calling::parse("Former Member of the Quorum of the Twelve Apostles").unwrap();
        assert!(qualified);
        assert_eq!(calling.name, "Quorum of the Twelve Apostles");
        assert_eq!(calling.organization, "Quorum of the Twelve Apostles");
        assert_eq!(calling.rank, 2);
    }

    #[test]
    fn test_empty_line_is_no_calling() {
        assert!(Calling::parse("").is_none());
        assert!(Calling::parse("  \u{a0} ").is_none());
    }
}
