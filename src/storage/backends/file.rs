use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::errors::{PocketlinkError, Result};
use crate::storage::KvSlot;

/// One `<key>.json` file per slot inside a data directory.
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                error!("创建数据目录失败: {}", e);
                PocketlinkError::file_operation(format!(
                    "Failed to create data directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            info!("已创建数据目录: {}", dir.display());
        }
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key.starts_with('.')
        {
            return Err(PocketlinkError::storage_operation(format!(
                "Invalid slot key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KvSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Slot file {} does not exist yet", path.display());
                Ok(None)
            }
            Err(e) => Err(PocketlinkError::file_operation(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        // 先写临时文件再 rename，保证整体替换
        fs::write(&tmp, value).map_err(|e| {
            PocketlinkError::file_operation(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            PocketlinkError::file_operation(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
