//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, SanitizeMode};

/// Coub likes exporter CLI.
#[derive(Parser, Debug)]
#[command(
    name = "coub-downloader",
    version,
    about = "Export all liked coubs from coub.com",
    long_about = "A CLI tool that saves the audio and video of every coub you liked on coub.com.\n\n\
                  Each coub is written to its own folder as audio.mp3 and video.mp4.\n\
                  Run without a token to be prompted interactively."
)]
pub struct Args {
    /// Access token for coub.com (the `remember_token` browser cookie).
    #[arg(short, long, env = "COUB_TOKEN")]
    pub token: Option<String>,

    /// Output folder. Defaults to the current directory.
    #[arg(short, long = "folder")]
    pub folder: Option<PathBuf>,

    /// Coub names sanitize mode.
    #[arg(short, long = "sanitize-mode", value_enum)]
    pub sanitize_mode: Option<SanitizeModeArg>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of listing pages fetched in parallel.
    #[arg(long)]
    pub page_concurrency: Option<usize>,

    /// Number of coubs saved in parallel.
    #[arg(long)]
    pub item_concurrency: Option<usize>,

    /// Hide the progress bar.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI sanitize mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanitizeModeArg {
    /// Keep Latin letters, digits, spaces and dots.
    #[value(alias = "latin-only")]
    LatinOnly,
    /// Keep Latin and Cyrillic letters, digits, spaces and dots.
    #[value(alias = "latin-and-cyrillic")]
    LatinAndCyrillic,
    /// Keep any letter, digits, spaces and dots.
    #[value(alias = "all-letters")]
    AllLetters,
}

impl From<SanitizeModeArg> for SanitizeMode {
    fn from(arg: SanitizeModeArg) -> Self {
        match arg {
            SanitizeModeArg::LatinOnly => SanitizeMode::LatinOnly,
            SanitizeModeArg::LatinAndCyrillic => SanitizeMode::LatinAndCyrillic,
            SanitizeModeArg::AllLetters => SanitizeMode::AllLetters,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(token) = self.token {
            config.account.remember_token = token.trim().to_string();
        }

        if let Some(folder) = self.folder {
            config.options.download_directory = Some(folder);
        }

        if let Some(mode) = self.sanitize_mode {
            config.options.sanitize_mode = mode.into();
        }

        if let Some(timeout) = self.timeout {
            config.options.request_timeout_seconds = timeout;
        }

        if let Some(n) = self.page_concurrency {
            config.options.page_concurrency = n;
        }

        if let Some(n) = self.item_concurrency {
            config.options.item_concurrency = n;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_merge() {
        let args = Args::try_parse_from([
            "coub-downloader",
            "-t",
            "tok",
            "-f",
            "/tmp/out",
            "-s",
            "LATIN_ONLY",
            "--item-concurrency",
            "3",
            "-q",
        ])
        .unwrap();

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.account.remember_token, "tok");
        assert_eq!(config.download_directory(), PathBuf::from("/tmp/out"));
        assert_eq!(config.options.sanitize_mode, SanitizeMode::LatinOnly);
        assert_eq!(config.options.item_concurrency, 3);
        assert!(!config.options.show_progress);
    }

    #[test]
    fn test_kebab_alias() {
        let args =
            Args::try_parse_from(["coub-downloader", "-s", "latin-and-cyrillic"]).unwrap();
        assert!(matches!(
            args.sanitize_mode,
            Some(SanitizeModeArg::LatinAndCyrillic)
        ));
    }

    #[test]
    fn test_unset_args_keep_config() {
        let args = Args::try_parse_from(["coub-downloader"]).unwrap();
        let mut config = Config::default();
        config.options.sanitize_mode = SanitizeMode::LatinOnly;
        config.options.request_timeout_seconds = 7;
        args.merge_into_config(&mut config);

        assert_eq!(config.options.sanitize_mode, SanitizeMode::LatinOnly);
        assert_eq!(config.options.request_timeout_seconds, 7);
        assert!(config.options.show_progress);
    }
}
