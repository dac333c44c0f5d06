//! Field-level request validation
//!
//! Run by the presentation layer before calling the service. These rules
//! are stricter than the service's own checks: the service accepts any
//! custom shortcode verbatim and any positive validity.

use std::collections::BTreeMap;

use serde::Serialize;

use super::CreateUrlRequest;
use crate::utils::url_validator::is_valid_url;

pub const MIN_SHORTCODE_LEN: usize = 3;
pub const MAX_SHORTCODE_LEN: usize = 10;
/// 7 天
pub const MAX_VALIDITY_MINUTES: i64 = 10_080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestField {
    OriginalUrl,
    CustomShortcode,
    ValidityMinutes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<RequestField, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedValidation {
    pub index: usize,
    #[serde(flatten)]
    pub result: RequestValidation,
}

pub fn validate_url_field(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        return Some("URL is required".to_string());
    }
    if !is_valid_url(url) {
        return Some("Please enter a valid URL".to_string());
    }
    None
}

/// Empty means "generate one", which is always fine.
pub fn validate_shortcode(shortcode: Option<&str>) -> Option<String> {
    let code = match shortcode {
        Some(c) if !c.is_empty() => c,
        _ => return None,
    };

    let len = code.chars().count();
    if !(MIN_SHORTCODE_LEN..=MAX_SHORTCODE_LEN).contains(&len) {
        return Some(format!(
            "Shortcode must be between {} and {} characters",
            MIN_SHORTCODE_LEN, MAX_SHORTCODE_LEN
        ));
    }
    if !crate::utils::is_alphanumeric_code(code) {
        return Some("Shortcode can only contain letters and numbers".to_string());
    }
    None
}

pub fn validate_validity(validity_minutes: Option<i64>) -> Option<String> {
    let minutes = validity_minutes?;

    if minutes <= 0 {
        return Some("Validity must be a positive number".to_string());
    }
    if minutes > MAX_VALIDITY_MINUTES {
        return Some(format!(
            "Validity cannot exceed 7 days ({} minutes)",
            MAX_VALIDITY_MINUTES
        ));
    }
    None
}

pub fn validate_request(request: &CreateUrlRequest) -> RequestValidation {
    let mut errors = BTreeMap::new();

    if let Some(e) = validate_url_field(&request.original_url) {
        errors.insert(RequestField::OriginalUrl, e);
    }
    if let Some(e) = validate_shortcode(request.custom_shortcode.as_deref()) {
        errors.insert(RequestField::CustomShortcode, e);
    }
    if let Some(e) = validate_validity(request.validity_minutes) {
        errors.insert(RequestField::ValidityMinutes, e);
    }

    RequestValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_bulk(requests: &[CreateUrlRequest]) -> Vec<IndexedValidation> {
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| IndexedValidation {
            index,
            result: validate_request(request),
        })
        .collect()
}
