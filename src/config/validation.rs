use super::models::Config;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("public_base_url '{url}' is not a valid http(s) URL")]
    InvalidBaseUrl { url: String },

    #[error("code_length {actual} is outside the supported range 1..={limit}")]
    CodeLengthOutOfRange { actual: usize, limit: usize },

    #[error("max_attempts must be at least 1")]
    NoAttempts,

    #[error("storage bucket name must not be empty")]
    EmptyBucket,
}

const MAX_CODE_LENGTH: usize = 32;

/// Sanity checks applied after all sources are merged.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    let base = &config.shortener.public_base_url;
    let parsed = Url::parse(base).map_err(|_| ValidationError::InvalidBaseUrl {
        url: base.clone(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidBaseUrl { url: base.clone() });
    }

    if !(1..=MAX_CODE_LENGTH).contains(&config.shortener.code_length) {
        return Err(ValidationError::CodeLengthOutOfRange {
            actual: config.shortener.code_length,
            limit: MAX_CODE_LENGTH,
        });
    }

    if config.shortener.max_attempts == 0 {
        return Err(ValidationError::NoAttempts);
    }

    if config.storage.bucket.trim().is_empty() {
        return Err(ValidationError::EmptyBucket);
    }

    Ok(())
}
