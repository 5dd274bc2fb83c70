use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two General Conference seasons. April conferences live under the
/// `/04/` URL segment, October under `/10/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    April,
    October,
}

impl Season {
    /// Map a URL month segment to a season.
    pub fn from_month_segment(segment: &str) -> Option<Self> {
        match segment {
            "04" => Some(Self::April),
            "10" => Some(Self::October),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::April => "April",
            Self::October => "October",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "April" => Ok(Self::April),
            "October" => Ok(Self::October),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_segment_mapping() {
        assert_eq!(Season::from_month_segment("04"), Some(Season::April));
        assert_eq!(Season::from_month_segment("10"), Some(Season::October));
        assert_eq!(Season::from_month_segment("07"), None);
    }

    #[test]
    fn test_april_sorts_before_october() {
        assert!(Season::April < Season::October);
    }
}
