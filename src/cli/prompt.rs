//! Interactive fallback when no token was supplied.

use std::io::IsTerminal;
use std::path::PathBuf;

use console::{style, Term};

use crate::config::{Config, SanitizeMode};
use crate::error::{Error, Result};

/// Whether an interactive prompt can be shown.
pub fn can_prompt() -> bool {
    Term::stdout().is_term() && std::io::stdin().is_terminal()
}

/// Ask for the token, output folder and sanitize mode, filling `config`.
pub fn prompt_for_settings(config: &mut Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!(
        "{}",
        style("Welcome to the coub likes downloader. It will export all your liked videos from coub.com")
            .bold()
    ))?;

    term.write_line("Please specify access token for coub.com:")?;
    let token = term.read_line()?;
    config.account.remember_token = token.trim().to_string();

    term.write_line("Provide full path to folder for videos or press Enter to use current folder")?;
    let folder = term.read_line()?;
    if !folder.trim().is_empty() {
        config.options.download_directory = Some(PathBuf::from(folder.trim()));
    }

    term.write_line(&format!(
        "Provide coub name sanitize mode or press Enter to use {}",
        SanitizeMode::default()
    ))?;
    config.options.sanitize_mode = parse_mode_answer(&term.read_line()?)?;

    Ok(())
}

/// An empty answer selects the default mode.
fn parse_mode_answer(answer: &str) -> Result<SanitizeMode> {
    if answer.trim().is_empty() {
        return Ok(SanitizeMode::default());
    }
    answer.parse().map_err(|message| Error::ConfigValidation {
        field: "sanitize_mode".to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_is_default() {
        assert_eq!(parse_mode_answer("  ").unwrap(), SanitizeMode::AllLetters);
    }

    #[test]
    fn test_named_answer() {
        assert_eq!(
            parse_mode_answer("LATIN_ONLY").unwrap(),
            SanitizeMode::LatinOnly
        );
    }

    #[test]
    fn test_bad_answer() {
        assert!(matches!(
            parse_mode_answer("nope"),
            Err(Error::ConfigValidation { .. })
        ));
    }
}
