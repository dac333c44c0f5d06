//! Shortening service
//!
//! Input validation, shortcode assignment, expiry computation and
//! translation of store failures into user-facing errors. Every operation
//! reports to the event log without waiting on it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ShortenerConfig;
use crate::errors::{PocketlinkError, Result};
use crate::log_sink::EventLogger;
use crate::storage::models::iso_millis;
use crate::storage::{ClickEvent, RecordStore, UrlRecord};
use crate::utils::url_validator::validate_url;
use crate::utils::{Clock, SystemClock, generate_random_code};

/// Event log source for service operations
pub const API_SOURCE: &str = "api";

// ============ Request/Response DTOs ============

/// Request to shorten one URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUrlRequest {
    pub original_url: String,
    /// Used verbatim when present and non-empty
    pub custom_shortcode: Option<String>,
    /// Falls back to the configured default (30) when absent
    pub validity_minutes: Option<i64>,
}

impl CreateUrlRequest {
    pub fn new(original_url: &str) -> Self {
        Self {
            original_url: original_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_shortcode(mut self, code: &str) -> Self {
        self.custom_shortcode = Some(code.to_string());
        self
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }
}

/// What a caller gets back from creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResult {
    pub id: String,
    pub short_url: String,
    pub original_url: String,
    pub shortcode: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub expires_at: DateTime<Utc>,
}

impl ShortUrlResult {
    /// The record exactly as it was stored at creation (no clicks yet).
    pub fn to_new_record(&self) -> UrlRecord {
        UrlRecord {
            id: self.id.clone(),
            original_url: self.original_url.clone(),
            shortcode: self.shortcode.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            clicks: 0,
            click_data: Vec::new(),
        }
    }
}

/// Single failed bulk item, keyed by its input position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailedItem {
    pub index: usize,
    pub url: String,
    pub error: PocketlinkError,
}

/// Result of a bulk create
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkCreateResult {
    pub results: Vec<ShortUrlResult>,
    pub errors: Vec<BulkFailedItem>,
}

impl BulkCreateResult {
    pub fn total(&self) -> usize {
        self.results.len() + self.errors.len()
    }
}

// ============ Settings ============

#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    pub base_url: String,
    pub code_length: usize,
    pub default_validity_minutes: i64,
    pub max_generate_attempts: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::from(&ShortenerConfig::default())
    }
}

impl From<&ShortenerConfig> for ShortenerSettings {
    fn from(config: &ShortenerConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            code_length: config.code_length,
            default_validity_minutes: config.default_validity_minutes,
            max_generate_attempts: config.max_generate_attempts,
        }
    }
}

impl ShortenerSettings {
    /// Build from `[shortener]`, rejecting values no shortcode can be made from.
    pub fn from_config(config: &ShortenerConfig) -> Result<Self> {
        let settings = Self::from(config);
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 {
            return Err(PocketlinkError::validation(
                "shortener.code_length must be at least 1",
            ));
        }
        if self.max_generate_attempts == 0 {
            return Err(PocketlinkError::validation(
                "shortener.max_generate_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

type CodeGenerator = Box<dyn Fn(usize) -> String + Send + Sync>;

// ============ ShortenerService Implementation ============

pub struct ShortenerService {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    events: EventLogger,
    settings: ShortenerSettings,
    generator: CodeGenerator,
}

impl ShortenerService {
    pub fn new(store: RecordStore, events: EventLogger, settings: ShortenerSettings) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            events,
            settings,
            generator: Box::new(generate_random_code),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the random shortcode source.
    pub fn with_code_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(usize) -> String + Send + Sync + 'static,
    {
        self.generator = Box::new(generator);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn events(&self) -> &EventLogger {
        &self.events
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn short_url_for(&self, shortcode: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), shortcode)
    }

    fn describe(&self, record: &UrlRecord) -> ShortUrlResult {
        ShortUrlResult {
            id: record.id.clone(),
            short_url: self.short_url_for(&record.shortcode),
            original_url: record.original_url.clone(),
            shortcode: record.shortcode.clone(),
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }

    // ============ Creation ============

    /// Shorten one URL.
    ///
    /// Nothing is written unless every check passes.
    pub fn create_short_url(&self, req: CreateUrlRequest) -> Result<ShortUrlResult> {
        self.events.info(
            API_SOURCE,
            format!("Creating short URL for: {}", req.original_url),
        );

        match self.try_create(req) {
            Ok(record) => {
                self.events.info(
                    API_SOURCE,
                    format!("Short URL created successfully: {}", record.shortcode),
                );
                info!(
                    "ShortenerService: created '{}' -> '{}'",
                    record.shortcode, record.original_url
                );
                Ok(self.describe(&record))
            }
            Err(e) => {
                self.events.error(
                    API_SOURCE,
                    format!("Failed to create short URL: {}", e.message()),
                );
                Err(e)
            }
        }
    }

    fn try_create(&self, req: CreateUrlRequest) -> Result<UrlRecord> {
        validate_url(&req.original_url)
            .map_err(|e| PocketlinkError::invalid_url(e.to_string()))?;

        let validity = req
            .validity_minutes
            .unwrap_or(self.settings.default_validity_minutes);
        let created_at = self.clock.now();
        let expires_at = compute_expiry(created_at, validity)?;

        match req.custom_shortcode.filter(|c| !c.is_empty()) {
            Some(code) => {
                let record = UrlRecord::new(req.original_url, code, created_at, expires_at);
                self.store.insert(record).map_err(|e| match e {
                    PocketlinkError::DuplicateShortcode(_) => PocketlinkError::shortcode_taken(
                        "Custom shortcode already exists",
                    ),
                    other => other,
                })
            }
            None => self.insert_generated(req.original_url, created_at, expires_at),
        }
    }

    /// Generated codes get a fresh token on collision, up to the configured attempts.
    fn insert_generated(
        &self,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<UrlRecord> {
        // 空短码会占用 "" 并让之后的生成全部冲突
        if self.settings.code_length == 0 {
            return Err(PocketlinkError::validation(
                "shortener.code_length must be at least 1",
            ));
        }
        let attempts = self.settings.max_generate_attempts.max(1);

        for attempt in 1..=attempts {
            let code = (self.generator)(self.settings.code_length);
            let record = UrlRecord::new(original_url.clone(), code.clone(), created_at, expires_at);

            match self.store.insert(record) {
                Ok(record) => return Ok(record),
                Err(PocketlinkError::DuplicateShortcode(_)) => {
                    warn!(
                        "Generated shortcode '{}' collided (attempt {}/{})",
                        code, attempt, attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(PocketlinkError::shortcode_taken(format!(
            "Could not allocate a unique shortcode after {} attempts",
            attempts
        )))
    }

    /// Create each request in turn; a failed item never stops the rest.
    pub fn create_bulk(&self, requests: Vec<CreateUrlRequest>) -> BulkCreateResult {
        let mut result = BulkCreateResult::default();
        for (index, request) in requests.into_iter().enumerate() {
            let url = request.original_url.clone();
            match self.create_short_url(request) {
                Ok(created) => result.results.push(created),
                Err(error) => result.errors.push(BulkFailedItem { index, url, error }),
            }
        }
        result
    }

    // ============ Lookup & Clicks ============

    /// Look up an active record. Never counts as a click.
    pub fn resolve(&self, shortcode: &str) -> Result<UrlRecord> {
        let result = self.store.find_by_shortcode(shortcode).and_then(|record| {
            if record.is_expired(self.clock.now()) {
                Err(PocketlinkError::expired(format!(
                    "Short URL '{}' has expired",
                    shortcode
                )))
            } else {
                Ok(record)
            }
        });

        if let Err(e) = &result {
            self.events.error(
                API_SOURCE,
                format!("Failed to get URL by shortcode: {}", e.message()),
            );
        }
        result
    }

    /// Append a click. Expiry gating is left to the caller.
    pub fn record_click(
        &self,
        shortcode: &str,
        source: Option<&str>,
        location: Option<&str>,
    ) -> Result<UrlRecord> {
        let event = ClickEvent::new(self.clock.now(), source, location);

        match self.store.record_click(shortcode, event) {
            Ok(record) => {
                self.events.info(
                    API_SOURCE,
                    format!("Click recorded for shortcode: {}", shortcode),
                );
                Ok(record)
            }
            Err(e) => {
                self.events
                    .error(API_SOURCE, format!("Failed to record click: {}", e.message()));
                Err(e)
            }
        }
    }

    /// Resolve, then record the click. Expired or unknown codes record nothing.
    pub fn visit(
        &self,
        shortcode: &str,
        source: Option<&str>,
        location: Option<&str>,
    ) -> Result<UrlRecord> {
        self.resolve(shortcode)?;
        self.record_click(shortcode, source, location)
    }

    /// Every record, newest first.
    pub fn list_all(&self) -> Result<Vec<UrlRecord>> {
        match self.store.list_all() {
            Ok(records) => {
                self.events
                    .info(API_SOURCE, format!("Retrieved {} URLs", records.len()));
                Ok(records)
            }
            Err(e) => {
                self.events
                    .error(API_SOURCE, format!("Failed to get all URLs: {}", e.message()));
                Err(e)
            }
        }
    }
}

/// `created_at + minutes`; only positive, representable spans are accepted.
pub fn compute_expiry(created_at: DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>> {
    if minutes <= 0 {
        return Err(PocketlinkError::invalid_validity(format!(
            "Validity must be a positive number of minutes, got {}",
            minutes
        )));
    }

    Duration::try_minutes(minutes)
        .and_then(|span| created_at.checked_add_signed(span))
        .ok_or_else(|| {
            PocketlinkError::invalid_validity(format!(
                "Validity of {} minutes is out of range",
                minutes
            ))
        })
}
