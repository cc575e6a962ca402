//! Configuration validation logic.

use std::path::Path;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_token(&config.account.remember_token)?;
    validate_download_directory(&config.download_directory())?;
    validate_positive("request_timeout_seconds", config.options.request_timeout_seconds)?;
    validate_positive("page_concurrency", config.options.page_concurrency as u64)?;
    validate_positive("item_concurrency", config.options.item_concurrency as u64)?;

    Ok(())
}

/// Validate the remember token.
///
/// The token travels inside a `Cookie` header, so it must be a plain cookie value.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::MissingConfig("remember_token".to_string()));
    }

    if let Some(bad) = token
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, ';' | ',' | '"' | '\\'))
    {
        return Err(Error::ConfigValidation {
            field: "remember_token".to_string(),
            message: format!("Token contains an invalid character: {:?}", bad),
        });
    }

    // Check for placeholder values
    let token_lower = token.to_lowercase();
    if token_lower.contains("replaceme") || token_lower.contains("your_token") {
        return Err(Error::ConfigValidation {
            field: "remember_token".to_string(),
            message: "Token appears to be a placeholder. Please provide your actual coub.com token."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the download directory. It may not exist yet, but must not be a file.
pub fn validate_download_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::MissingConfig("download_directory".to_string()));
    }

    if path.exists() && !path.is_dir() {
        return Err(Error::ConfigValidation {
            field: "download_directory".to_string(),
            message: format!("'{}' exists and is not a directory", path.display()),
        });
    }

    Ok(())
}

fn validate_positive(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Must be greater than zero".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn valid_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.account.remember_token = "a1b2c3d4e5f6".into();
        config.options.download_directory = Some(dir.to_path_buf());
        config
    }

    #[test]
    fn test_valid_config() {
        let dir = tempdir().unwrap();
        assert!(validate_config(&valid_config(dir.path())).is_ok());
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(
            validate_token(""),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_token_with_cookie_separator() {
        assert!(validate_token("abc; other=1").is_err());
        assert!(validate_token("abc def").is_err());
        assert!(validate_token("abc\n").is_err());
    }

    #[test]
    fn test_token_placeholder() {
        assert!(validate_token("REPLACEME").is_err());
    }

    #[test]
    fn test_download_directory_is_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, b"x").unwrap();
        assert!(validate_download_directory(&file).is_err());
        assert!(validate_download_directory(&dir.path().join("not_yet")).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let dir = tempdir().unwrap();
        let mut config = valid_config(dir.path());
        config.options.item_concurrency = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }
}
