use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TargetUrlError {
    #[error("url must not be empty")]
    Empty,
    #[error("url does not parse: {0}")]
    Unparseable(String),
    #[error("scheme '{0}' is not allowed, only http and https")]
    UnsupportedScheme(String),
    #[error("url has no host")]
    MissingHost,
}

/// Validate a candidate redirect target.
///
/// Accepts absolute http(s) URLs with a host component, nothing else. This is
/// a pure parse; no network access.
pub fn validate_target(raw: &str) -> Result<Url, TargetUrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TargetUrlError::Empty);
    }

    let url = Url::parse(raw).map_err(|e| TargetUrlError::Unparseable(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(TargetUrlError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_target("http://example.com").is_ok());
        assert!(validate_target("https://example.com").is_ok());
        assert!(validate_target("https://example.com/page?q=1#frag").is_ok());
        assert!(validate_target("http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_unparseable_input() {
        assert!(matches!(
            validate_target("not a url"),
            Err(TargetUrlError::Unparseable(_))
        ));
        assert!(matches!(
            validate_target("http//missing-colon.example"),
            Err(TargetUrlError::Unparseable(_))
        ));
        assert!(matches!(validate_target(""), Err(TargetUrlError::Empty)));
        assert!(matches!(validate_target("   "), Err(TargetUrlError::Empty)));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(
            validate_target("ftp://example.com"),
            Err(TargetUrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_target("javascript:alert(1)"),
            Err(TargetUrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_target("file:///etc/passwd"),
            Err(TargetUrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_target("mailto:user@example.com"),
            Err(TargetUrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn rejects_hostless_urls() {
        // `Url::parse` already refuses http(s) URLs with an empty authority,
        // which is exactly the missing-host case
        assert!(validate_target("http://").is_err());
        assert!(validate_target("https:///path-only").is_err());
    }
}
