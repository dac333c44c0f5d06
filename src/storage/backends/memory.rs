use std::collections::HashMap;

use parking_lot::RwLock;

use crate::errors::Result;
use crate::storage::KvSlot;

/// Process-local slot; contents vanish with the process.
#[derive(Default)]
pub struct MemorySlot {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear one key, as an external actor wiping storage would.
    pub fn clear(&self, key: &str) {
        self.values.write().remove(key);
    }
}

impl KvSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
