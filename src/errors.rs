use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PocketlinkError {
    InvalidUrl(String),
    InvalidValidity(String),
    ShortcodeTaken(String),
    DuplicateShortcode(String),
    NotFound(String),
    Expired(String),
    Validation(String),
    StorageOperation(String),
    StorageBackendNotFound(String),
    FileOperation(String),
    Serialization(String),
}

impl PocketlinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PocketlinkError::InvalidUrl(_) => "E001",
            PocketlinkError::InvalidValidity(_) => "E002",
            PocketlinkError::ShortcodeTaken(_) => "E003",
            PocketlinkError::DuplicateShortcode(_) => "E004",
            PocketlinkError::NotFound(_) => "E005",
            PocketlinkError::Expired(_) => "E006",
            PocketlinkError::Validation(_) => "E007",
            PocketlinkError::StorageOperation(_) => "E008",
            PocketlinkError::StorageBackendNotFound(_) => "E009",
            PocketlinkError::FileOperation(_) => "E010",
            PocketlinkError::Serialization(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PocketlinkError::InvalidUrl(_) => "Invalid URL",
            PocketlinkError::InvalidValidity(_) => "Invalid Validity",
            PocketlinkError::ShortcodeTaken(_) => "Shortcode Taken",
            PocketlinkError::DuplicateShortcode(_) => "Duplicate Shortcode",
            PocketlinkError::NotFound(_) => "Short URL Not Found",
            PocketlinkError::Expired(_) => "Short URL Expired",
            PocketlinkError::Validation(_) => "Validation Error",
            PocketlinkError::StorageOperation(_) => "Storage Operation Error",
            PocketlinkError::StorageBackendNotFound(_) => "Storage Backend Not Found",
            PocketlinkError::FileOperation(_) => "File Operation Error",
            PocketlinkError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PocketlinkError::InvalidUrl(msg)
            | PocketlinkError::InvalidValidity(msg)
            | PocketlinkError::ShortcodeTaken(msg)
            | PocketlinkError::DuplicateShortcode(msg)
            | PocketlinkError::NotFound(msg)
            | PocketlinkError::Expired(msg)
            | PocketlinkError::Validation(msg)
            | PocketlinkError::StorageOperation(msg)
            | PocketlinkError::StorageBackendNotFound(msg)
            | PocketlinkError::FileOperation(msg)
            | PocketlinkError::Serialization(msg) => msg,
        }
    }

    /// Errors the caller can fix by changing its input, as opposed to storage failures.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PocketlinkError::InvalidUrl(_)
                | PocketlinkError::InvalidValidity(_)
                | PocketlinkError::ShortcodeTaken(_)
                | PocketlinkError::NotFound(_)
                | PocketlinkError::Expired(_)
                | PocketlinkError::Validation(_)
        )
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PocketlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PocketlinkError {}

// 便捷的构造函数
impl PocketlinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_validity<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::InvalidValidity(msg.into())
    }

    pub fn shortcode_taken<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::ShortcodeTaken(msg.into())
    }

    pub fn duplicate_shortcode<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::DuplicateShortcode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Expired(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Validation(msg.into())
    }

    pub fn storage_operation<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::StorageOperation(msg.into())
    }

    pub fn storage_backend_not_found<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::StorageBackendNotFound(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PocketlinkError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for PocketlinkError {
    fn from(err: std::io::Error) -> Self {
        PocketlinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PocketlinkError {
    fn from(err: serde_json::Error) -> Self {
        PocketlinkError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PocketlinkError {
    fn from(err: csv::Error) -> Self {
        PocketlinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PocketlinkError>;
