use crate::clean::clean_line;
use crate::consts;
use crate::models::Calling;

/// The parsed byline of a talk: who delivered it and in what capacity.
///
/// The source markup carries two lines: `author-name` ("By Elder Jeffrey R.
/// Holland") and an optional `author-role` ("Of the Quorum of the Twelve
/// Apostles"). Co-delivered talks join names with " and ".
#[derive(Debug, Clone, PartialEq)]
pub struct Byline {
    /// Cleaned speaker names, honorifics stripped. Never empty.
    pub speakers: Vec<String>,
    /// The calling attributed for this talk, if any.
    pub calling: Option<Calling>,
    /// Whether the byline marks the office as already ended (emeritus,
    /// released, former).
    pub emeritus: bool,
}

impl Byline {
    /// Parse the two byline lines. Returns `None` when no speaker name
    /// survives cleanup; the caller treats that as a parse failure.
    pub fn parse(name_line: &str, role_line: Option<&str>) -> Option<Self> {
        let speakers: Vec<String> = clean_line(name_line)
            .split(" and ")
            .filter_map(clean_speaker)
            .collect();
        if speakers.is_empty() {
            return None;
        }
        let (calling, qualified) = match role_line.and_then(Calling::parse) {
            Some((calling, qualified)) => (Some(calling), qualified),
            None => (None, false),
        };
        let emeritus = qualified
            || name_line.to_lowercase().contains("emeritus")
            || role_line.is_some_and(|line| line.to_lowercase().contains("emeritus"));
        Some(Self { speakers, calling, emeritus })
    }
}

/// Strip "By" / "Presented by" and honorific office prefixes from one name.
fn clean_speaker(part: &str) -> Option<String> {
    let part = clean_line(part);
    let name = consts::SPEAKER_REGEX
        .captures(&part)
        .and_then(|caps| caps.name("speaker"))
        .map_or(part.clone(), |m| m.as_str().trim().to_string());
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("By President Russell M. Nelson", "Russell M. Nelson")]
    #[case("By Elder Jeffrey R. Holland", "Jeffrey R. Holland")]
    #[case("Presented by Bishop Gérald Caussé", "Gérald Caussé")]
    #[case("Sister Joy D. Jones", "Joy D. Jones")]
    #[case("Jane Doe", "Jane Doe")]
    fn test_speaker_cleanup(#[case] line: &str, #[case] expected: &str) {
        let byline = Byline::parse(line, None).unwrap();
        assert_eq!(byline.speakers, vec![expected.to_string()]);
        assert!(byline.calling.is_none());
        assert!(!byline.emeritus);
    }

    #[test]
    fn test_co_delivered_talk() {
        let byline = Byline::parse("By President Henry B. Eyring and President Dieter F. Uchtdorf", None).unwrap();
        assert_eq!(
            byline.speakers,
            vec!["Henry B. Eyring".to_string(), "Dieter F. Uchtdorf".to_string()]
        );
    }

    #[test]
    fn test_calling_attached() {
        let byline = Byline::parse(
            "By Jane Doe",
            Some("Relief Society General President"),
        )
        .unwrap();
        let calling = byline.calling.unwrap();
        assert_eq!(calling.name, "Relief Society General President");
        assert_eq!(calling.organization, "Relief Society General Presidency");
        assert!(!byline.emeritus);
    }

    #[rstest]
    #[case("By Elder Joseph B. Wirthlin", Some("Emeritus Member of the Seventy"))]
    #[case("By Elder Robert E. Wells, Emeritus Seventy", None)]
    #[case("By Jane Doe", Some("Recently Released as Primary General President"))]
    fn test_emeritus_detection(#[case] name_line: &str, #[case] role_line: Option<&str>) {
        let byline = Byline::parse(name_line, role_line).unwrap();
        assert!(byline.emeritus);
    }

    #[test]
    fn test_empty_byline_rejected() {
        assert!(Byline::parse("", None).is_none());
        assert!(Byline::parse("   ", Some("Of the Seventy")).is_none());
    }
}
