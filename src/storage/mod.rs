use std::sync::Arc;

use crate::config::StorageConfig;
use crate::errors::{PocketlinkError, Result};

pub mod backends;
pub mod models;
pub mod record_store;

pub use backends::{FileSlot, MemorySlot};
pub use models::{ClickEvent, UrlRecord};
pub use record_store::RecordStore;

/// Durable key-value slot holding whole serialized values.
///
/// A write replaces the previous value in full; readers never observe a
/// partially written value.
pub trait KvSlot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn KvSlot>> {
        let slot: Arc<dyn KvSlot> = match config.backend.to_lowercase().as_str() {
            "file" => Arc::new(FileSlot::new(&config.data_dir)?),
            "memory" => Arc::new(MemorySlot::new()),
            other => {
                return Err(PocketlinkError::storage_backend_not_found(format!(
                    "Unknown storage backend '{}'. Valid: file, memory",
                    other
                )));
            }
        };

        tracing::debug!("Using storage backend: {}", slot.backend_name());
        Ok(slot)
    }

    /// Slot plus the record store bound to the configured key.
    pub fn create_record_store(config: &StorageConfig) -> Result<RecordStore> {
        let slot = Self::create(config)?;
        Ok(RecordStore::with_key(slot, &config.slot_key))
    }
}
