//! Uniqueness-enforcing collection of [`UrlRecord`]s over a [`KvSlot`].
//!
//! The whole collection is the unit of read and write: every operation
//! loads the current slot contents, and every mutation writes the full
//! collection back. Lookups are linear scans over the loaded collection.

use std::sync::Arc;

use chrono::SubsecRound;
use tracing::{debug, trace};

use super::models::{ClickEvent, UrlRecord};
use super::KvSlot;
use crate::errors::{PocketlinkError, Result};

pub const DEFAULT_SLOT_KEY: &str = "shortenedUrls";

#[derive(Clone)]
pub struct RecordStore {
    slot: Arc<dyn KvSlot>,
    key: String,
}

impl RecordStore {
    pub fn new(slot: Arc<dyn KvSlot>) -> Self {
        Self::with_key(slot, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(slot: Arc<dyn KvSlot>, key: &str) -> Self {
        Self {
            slot,
            key: key.to_string(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.slot.backend_name()
    }

    fn load(&self) -> Result<Vec<UrlRecord>> {
        match self.slot.read(&self.key)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str::<Vec<UrlRecord>>(&raw).map_err(|e| {
                PocketlinkError::serialization(format!(
                    "Failed to parse record collection '{}': {}",
                    self.key, e
                ))
            }),
        }
    }

    fn persist(&self, records: &[UrlRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.slot.write(&self.key, &json)?;
        trace!("Persisted {} records to slot '{}'", records.len(), self.key);
        Ok(())
    }

    /// Append a record; its shortcode must not exist yet, expired or not.
    pub fn insert(&self, mut record: UrlRecord) -> Result<UrlRecord> {
        record.normalize_timestamps();
        let mut records = self.load()?;

        if records.iter().any(|r| r.shortcode == record.shortcode) {
            return Err(PocketlinkError::duplicate_shortcode(format!(
                "Shortcode '{}' already exists",
                record.shortcode
            )));
        }

        records.push(record.clone());
        self.persist(&records)?;
        debug!("RecordStore: inserted '{}'", record.shortcode);
        Ok(record)
    }

    pub fn find_by_shortcode(&self, code: &str) -> Result<UrlRecord> {
        self.load()?
            .into_iter()
            .find(|r| r.shortcode == code)
            .ok_or_else(|| PocketlinkError::not_found(format!("Short URL '{}' not found", code)))
    }

    pub fn contains(&self, code: &str) -> Result<bool> {
        Ok(self.load()?.iter().any(|r| r.shortcode == code))
    }

    /// Bump the counter and append the event in one write.
    pub fn record_click(&self, code: &str, mut event: ClickEvent) -> Result<UrlRecord> {
        event.timestamp = event.timestamp.trunc_subsecs(3);
        let mut records = self.load()?;

        let record = records
            .iter_mut()
            .find(|r| r.shortcode == code)
            .ok_or_else(|| PocketlinkError::not_found(format!("Short URL '{}' not found", code)))?;
        record.push_click(event);
        let updated = record.clone();

        self.persist(&records)?;
        debug!("RecordStore: click #{} on '{}'", updated.clicks, code);
        Ok(updated)
    }

    /// Newest first; equal timestamps keep insertion order.
    pub fn list_all(&self) -> Result<Vec<UrlRecord>> {
        let mut records = self.load()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
