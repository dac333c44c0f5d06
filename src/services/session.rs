//! Session workflows
//!
//! Binds service calls to [`AppState`] updates the way the presentation
//! layer needs them: loading flags, error messages, and the local list of
//! records kept in sync with what was created or clicked.

use std::sync::Arc;

use super::{BulkCreateResult, CreateUrlRequest, ShortUrlResult, ShortenerService};
use crate::errors::Result;
use crate::state::AppState;
use crate::storage::UrlRecord;

const SESSION_SOURCE: &str = "hook";

/// Click metadata recorded when following a short link.
pub const REDIRECT_SOURCE: &str = "direct";
pub const REDIRECT_LOCATION: &str = "Local";

#[derive(Clone)]
pub struct Session {
    service: Arc<ShortenerService>,
}

impl Session {
    pub fn new(service: Arc<ShortenerService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ShortenerService {
        &self.service
    }

    pub fn create_short_url(
        &self,
        state: &mut AppState,
        req: CreateUrlRequest,
    ) -> Result<ShortUrlResult> {
        state.set_loading(true);
        state.clear_error();
        self.service.events().info(
            SESSION_SOURCE,
            format!("Creating short URL for: {}", req.original_url),
        );

        let result = self.service.create_short_url(req);
        match &result {
            Ok(created) => state.add_record(created.to_new_record()),
            Err(e) => {
                self.service.events().error(
                    SESSION_SOURCE,
                    format!("Failed to create short URL: {}", e.message()),
                );
                state.set_error(e.message());
            }
        }

        state.set_loading(false);
        result
    }

    /// Sequential; the state error summarizes failures without hiding successes.
    pub fn create_bulk(
        &self,
        state: &mut AppState,
        requests: Vec<CreateUrlRequest>,
    ) -> BulkCreateResult {
        state.set_loading(true);
        state.clear_error();

        let total = requests.len();
        self.service
            .events()
            .info(SESSION_SOURCE, format!("Creating {} short URLs", total));
        let result = self.service.create_bulk(requests);
        for created in &result.results {
            state.add_record(created.to_new_record());
        }

        if !result.errors.is_empty() {
            let message = format!(
                "Failed to create {} out of {} URLs",
                result.errors.len(),
                total
            );
            self.service.events().warning(SESSION_SOURCE, message.clone());
            state.set_error(message);
        }

        state.set_loading(false);
        result
    }

    pub fn load_all(&self, state: &mut AppState) -> Result<Vec<UrlRecord>> {
        state.set_loading(true);
        state.clear_error();

        let result = self.service.list_all();
        match &result {
            Ok(records) => state.set_urls(records.clone()),
            Err(e) => {
                self.service.events().error(
                    SESSION_SOURCE,
                    format!("Failed to load URLs: {}", e.message()),
                );
                state.set_error(e.message());
            }
        }

        state.set_loading(false);
        result
    }

    pub fn record_click(
        &self,
        state: &mut AppState,
        shortcode: &str,
        source: Option<&str>,
        location: Option<&str>,
    ) -> Result<UrlRecord> {
        let updated = self
            .service
            .record_click(shortcode, source, location)
            .inspect_err(|e| {
                self.service.events().error(
                    SESSION_SOURCE,
                    format!("Failed to record click: {}", e.message()),
                );
            })?;
        state.update_record(updated.clone());
        Ok(updated)
    }

    /// Follow a short link: resolve, count the click, remember the target.
    pub fn redirect(&self, state: &mut AppState, shortcode: &str) -> Result<UrlRecord> {
        self.service
            .events()
            .info(SESSION_SOURCE, format!("Redirecting shortcode: {}", shortcode));

        let result = self.service.resolve(shortcode).and_then(|_| {
            self.record_click(
                state,
                shortcode,
                Some(REDIRECT_SOURCE),
                Some(REDIRECT_LOCATION),
            )
        });

        match &result {
            Ok(_) => state.set_shortcode_to_redirect(Some(shortcode.to_string())),
            Err(e) => {
                self.service.events().error(
                    SESSION_SOURCE,
                    format!("Redirection failed: {}", e.message()),
                );
                state.set_error(e.message());
            }
        }
        result
    }
}
