//! URL 验证模块
//!
//! Accepts any syntactically valid absolute URL, whatever the scheme.

use url::Url;

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证 URL
///
/// The input is checked as given; surrounding whitespace only matters for
/// the emptiness check, since the URL parser strips it anyway.
pub fn validate_url(url: &str) -> Result<Url, UrlValidationError> {
    if url.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    // 相对路径会在这里失败（没有 base）
    Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))
}

pub fn is_valid_url(url: &str) -> bool {
    validate_url(url).is_ok()
}
