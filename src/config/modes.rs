//! Folder name sanitize modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character allow-list applied to coub titles before they become folder names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeMode {
    /// Latin letters, ASCII digits, space and dot.
    LatinOnly,
    /// Latin and Cyrillic letters, ASCII digits, space and dot.
    LatinAndCyrillic,
    /// Any Unicode letter, ASCII digits, space and dot (default).
    #[default]
    AllLetters,
}

impl SanitizeMode {
    /// All modes, narrowest first.
    pub const ALL: [SanitizeMode; 3] = [
        SanitizeMode::LatinOnly,
        SanitizeMode::LatinAndCyrillic,
        SanitizeMode::AllLetters,
    ];

    /// Pattern matching every character this mode removes.
    pub fn disallowed_pattern(&self) -> &'static str {
        match self {
            SanitizeMode::LatinOnly => r"[^A-Za-z0-9. ]",
            SanitizeMode::LatinAndCyrillic => r"[^A-Za-z0-9. [\p{Cyrillic}&&\p{L}]]",
            SanitizeMode::AllLetters => r"[^\p{L}0-9. ]",
        }
    }
}

impl fmt::Display for SanitizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizeMode::LatinOnly => write!(f, "LATIN_ONLY"),
            SanitizeMode::LatinAndCyrillic => write!(f, "LATIN_AND_CYRILLIC"),
            SanitizeMode::AllLetters => write!(f, "ALL_LETTERS"),
        }
    }
}

impl FromStr for SanitizeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "latin_only" => Ok(SanitizeMode::LatinOnly),
            "latin_and_cyrillic" => Ok(SanitizeMode::LatinAndCyrillic),
            "all_letters" => Ok(SanitizeMode::AllLetters),
            _ => Err(format!(
                "Unknown sanitize mode: '{}'. Possible values: {}, {}, {}",
                s,
                SanitizeMode::LatinOnly,
                SanitizeMode::LatinAndCyrillic,
                SanitizeMode::AllLetters
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!(
            "LATIN_ONLY".parse::<SanitizeMode>().unwrap(),
            SanitizeMode::LatinOnly
        );
        assert_eq!(
            "latin-and-cyrillic".parse::<SanitizeMode>().unwrap(),
            SanitizeMode::LatinAndCyrillic
        );
        assert_eq!(
            " all_letters ".parse::<SanitizeMode>().unwrap(),
            SanitizeMode::AllLetters
        );
    }

    #[test]
    fn test_parse_unknown_lists_values() {
        let err = "klingon".parse::<SanitizeMode>().unwrap_err();
        assert!(err.contains("LATIN_ONLY"));
        assert!(err.contains("ALL_LETTERS"));
    }

    #[test]
    fn test_display_round_trips() {
        for mode in SanitizeMode::ALL {
            assert_eq!(mode.to_string().parse::<SanitizeMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_is_broadest() {
        assert_eq!(SanitizeMode::default(), SanitizeMode::AllLetters);
    }
}
