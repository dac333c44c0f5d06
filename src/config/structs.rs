use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - storage: key-value slot backend and location
/// - shortener: shortcode allocation and expiry defaults
/// - logging: tracing output and the remote event sink
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config file > 默认值
    /// ENV 前缀：PL，分隔符：__
    /// 示例：PL__SHORTENER__BASE_URL=https://pl.ink
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("PL")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `file` or `memory`
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Slot key holding the serialized record collection
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
}

/// 短链接生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_validity_minutes")]
    pub default_validity_minutes: i64,
    #[serde(default = "default_max_generate_attempts")]
    pub max_generate_attempts: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
    #[serde(default)]
    pub remote: RemoteLogConfig,
}

/// 远程日志 sink 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLogConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_remote_stack")]
    pub stack: String,
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

// ============================================================
// Default value functions
// ============================================================

fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_slot_key() -> String {
    "shortenedUrls".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_code_length() -> usize {
    6
}

fn default_validity_minutes() -> i64 {
    30
}

fn default_max_generate_attempts() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_remote_endpoint() -> String {
    "http://localhost:8080/log".to_string()
}

fn default_remote_stack() -> String {
    "backend".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    2
}

// ============================================================
// Default implementations
// ============================================================

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
            slot_key: default_slot_key(),
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            code_length: default_code_length(),
            default_validity_minutes: default_validity_minutes(),
            max_generate_attempts: default_max_generate_attempts(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
            remote: RemoteLogConfig::default(),
        }
    }
}

impl Default for RemoteLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_remote_endpoint(),
            stack: default_remote_stack(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.storage.slot_key, "shortenedUrls");
        assert_eq!(config.shortener.code_length, 6);
        assert_eq!(config.shortener.default_validity_minutes, 30);
        assert_eq!(config.shortener.base_url, "http://localhost:3000");
        assert!(!config.logging.remote.enabled);
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[shortener]"));

        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.shortener.max_generate_attempts, 5);
        assert_eq!(parsed.logging.remote.timeout_secs, 2);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: StaticConfig = toml::from_str(
            r#"
            [shortener]
            base_url = "https://pl.ink"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.shortener.base_url, "https://pl.ink");
        assert_eq!(parsed.shortener.code_length, 6);
        assert_eq!(parsed.storage.data_dir, "data");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[storage]\nbackend = \"memory\"\n[shortener]\ncode_length = 8\n",
        )
        .unwrap();

        let config = StaticConfig::load(path.to_str());
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.shortener.code_length, 8);
    }
}
