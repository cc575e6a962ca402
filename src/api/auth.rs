//! Session credential handling.

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::{Error, Result};

/// Name of the coub.com session cookie.
pub const SESSION_COOKIE: &str = "remember_token";

/// Build the `Cookie` header value carrying the session token.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}", SESSION_COOKIE, token)
}

/// Build the headers attached to every listing request.
pub fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&session_cookie(token))
        .map_err(|e| Error::Authentication(format!("Token is not a valid cookie value: {}", e)))?;
    headers.insert(header::COOKIE, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie() {
        assert_eq!(session_cookie("abc"), "remember_token=abc");
    }

    #[test]
    fn test_auth_headers() {
        let headers = auth_headers("abc").unwrap();
        assert_eq!(headers.get(header::COOKIE).unwrap(), "remember_token=abc");
    }

    #[test]
    fn test_auth_headers_rejects_newline() {
        assert!(matches!(
            auth_headers("abc\r\nX-Evil: 1"),
            Err(Error::Authentication(_))
        ));
    }
}
