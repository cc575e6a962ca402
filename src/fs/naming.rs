//! Folder name generation.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SanitizeMode;
use crate::error::{Error, Result};

static LATIN_ONLY: LazyLock<Regex> = LazyLock::new(|| compile(SanitizeMode::LatinOnly));
static LATIN_AND_CYRILLIC: LazyLock<Regex> =
    LazyLock::new(|| compile(SanitizeMode::LatinAndCyrillic));
static ALL_LETTERS: LazyLock<Regex> = LazyLock::new(|| compile(SanitizeMode::AllLetters));

fn compile(mode: SanitizeMode) -> Regex {
    Regex::new(mode.disallowed_pattern()).expect("sanitize patterns are static and valid")
}

fn disallowed(mode: SanitizeMode) -> &'static Regex {
    match mode {
        SanitizeMode::LatinOnly => &*LATIN_ONLY,
        SanitizeMode::LatinAndCyrillic => &*LATIN_AND_CYRILLIC,
        SanitizeMode::AllLetters => &*ALL_LETTERS,
    }
}

/// Strip every character the mode does not allow, then trim surrounding spaces.
pub fn sanitize_title(title: &str, mode: SanitizeMode) -> String {
    disallowed(mode).replace_all(title, "").trim().to_string()
}

/// Reject identifiers that could escape the root folder.
pub fn validate_path_component(name: &str) -> Result<()> {
    if name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed: '{}'",
            name
        )));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(Error::InvalidFilename(format!(
            "Control characters not allowed: '{}'",
            name.escape_debug()
        )));
    }

    Ok(())
}

/// Primary folder name for a coub: `"{title}_{id}_"`.
pub fn primary_dir_name(sanitized_title: &str, id: &str) -> String {
    format!("{}_{}_", sanitized_title, id)
}

/// Fallback folder name used when the primary one is taken: `"{title}(n)"`, n >= 2.
pub fn fallback_dir_name(sanitized_title: &str, n: u32) -> String {
    format!("{}({})", sanitized_title, n)
}
