//! Application state shared by the session and the presentation layer
//!
//! Passed around explicitly; every change goes through one of the
//! mutation methods below.

use crate::log_sink::EventLogger;
use crate::storage::UrlRecord;

const STATE_SOURCE: &str = "state";

#[derive(Default)]
pub struct AppState {
    urls: Vec<UrlRecord>,
    loading: bool,
    error: Option<String>,
    shortcode_to_redirect: Option<String>,
    events: Option<EventLogger>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose errors are also reported to the event log.
    pub fn with_events(events: EventLogger) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    pub fn urls(&self) -> &[UrlRecord] {
        &self.urls
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn shortcode_to_redirect(&self) -> Option<&str> {
        self.shortcode_to_redirect.as_deref()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Also ends any loading phase.
    pub fn set_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        if let Some(events) = &self.events {
            events.error(STATE_SOURCE, format!("Error in URL state: {}", error));
        }
        self.error = Some(error);
        self.loading = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_urls(&mut self, urls: Vec<UrlRecord>) {
        self.urls = urls;
        self.loading = false;
    }

    /// Newest first, like the stored listing.
    pub fn add_record(&mut self, record: UrlRecord) {
        self.urls.insert(0, record);
        self.loading = false;
    }

    /// Replace the entry with the same shortcode; unknown codes are ignored.
    pub fn update_record(&mut self, record: UrlRecord) {
        if let Some(existing) = self
            .urls
            .iter_mut()
            .find(|r| r.shortcode == record.shortcode)
        {
            *existing = record;
        }
    }

    pub fn set_shortcode_to_redirect(&mut self, shortcode: Option<String>) {
        self.shortcode_to_redirect = shortcode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(code: &str) -> UrlRecord {
        let now = Utc::now();
        UrlRecord::new(
            "https://example.com".to_string(),
            code.to_string(),
            now,
            now + Duration::minutes(30),
        )
    }

    #[test]
    fn test_add_record_prepends_and_stops_loading() {
        let mut state = AppState::new();
        state.set_loading(true);
        state.add_record(record("one"));
        state.add_record(record("two"));

        assert!(!state.loading());
        assert_eq!(state.urls()[0].shortcode, "two");
        assert_eq!(state.urls()[1].shortcode, "one");
    }

    #[test]
    fn test_update_record_by_shortcode() {
        let mut state = AppState::new();
        state.set_urls(vec![record("one"), record("two")]);

        let mut clicked = state.urls()[1].clone();
        clicked.clicks = 3;
        state.update_record(clicked);
        assert_eq!(state.urls()[1].clicks, 3);

        state.update_record(record("ghost"));
        assert_eq!(state.urls().len(), 2);
    }

    #[test]
    fn test_error_lifecycle() {
        let mut state = AppState::new();
        state.set_loading(true);
        state.set_error("boom");
        assert_eq!(state.error(), Some("boom"));
        assert!(!state.loading());

        state.clear_error();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_shortcode_to_redirect() {
        let mut state = AppState::new();
        state.set_shortcode_to_redirect(Some("abc".to_string()));
        assert_eq!(state.shortcode_to_redirect(), Some("abc"));
        state.set_shortcode_to_redirect(None);
        assert_eq!(state.shortcode_to_redirect(), None);
    }
}
