//! Text cleanup applied to every string pulled out of a page.
//!
//! The source site pads text nodes with non-breaking spaces and the odd tab.
//! Both are normalized here so that entity dedup keys and exported text are
//! stable across pages and years.

/// Normalize whitespace oddities and trim.
pub fn clean(text: &str) -> String {
    text.replace('\t', "    ").replace('\u{a0}', " ").trim().to_string()
}

/// Collapse runs of ASCII whitespace into single spaces, then clean.
///
/// Used for single-line fields (titles, bylines) where the markup may wrap
/// the text across several source lines.
pub fn clean_line(text: &str) -> String {
    clean(&text.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_replaces_nbsp_and_tabs() {
        assert_eq!(clean("a\u{a0}b"), "a b");
        assert_eq!(clean("\ta\tb\t"), "a    b");
    }

    #[test]
    fn test_clean_line_collapses_whitespace() {
        assert_eq!(clean_line("  The \n   Opening\u{a0} Talk "), "The Opening Talk");
    }
}
