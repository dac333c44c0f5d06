//! CSV 导入导出
//!
//! Bulk creation requests come in as CSV; the record listing goes out as CSV.

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::errors::PocketlinkError;
use crate::services::CreateUrlRequest;
use crate::storage::UrlRecord;

/// Bulk request row. Headers: `original_url,custom_shortcode,validity_minutes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequestRow {
    pub original_url: String,
    #[serde(default)]
    pub custom_shortcode: Option<String>,
    #[serde(default)]
    pub validity_minutes: Option<i64>,
}

impl From<BulkRequestRow> for CreateUrlRequest {
    fn from(row: BulkRequestRow) -> Self {
        Self {
            original_url: row.original_url,
            custom_shortcode: row.custom_shortcode.filter(|c| !c.is_empty()),
            validity_minutes: row.validity_minutes,
        }
    }
}

/// 导出行（仅用于序列化）
#[derive(Debug, Clone, Serialize)]
pub struct RecordCsvRow {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: String,
    pub expires_at: String,
    pub clicks: u64,
    pub status: &'static str,
}

impl RecordCsvRow {
    pub fn from_record(record: &UrlRecord, now: DateTime<Utc>) -> Self {
        Self {
            shortcode: record.shortcode.clone(),
            original_url: record.original_url.clone(),
            created_at: record.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            expires_at: record.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            clicks: record.clicks,
            status: if record.is_active(now) { "active" } else { "expired" },
        }
    }
}

/// 从 CSV 文件读取批量请求
///
/// Any malformed row fails the whole file; URL and shortcode checks happen
/// later, per item, in the service.
pub fn read_bulk_requests<P: AsRef<Path>>(path: P) -> Result<Vec<CreateUrlRequest>, PocketlinkError> {
    let file = File::open(path.as_ref())
        .map_err(|e| PocketlinkError::file_operation(format!("Failed to open file: {}", e)))?;
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut requests = Vec::new();
    let mut errors = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<BulkRequestRow>().enumerate() {
        let row_num = row_idx + 2; // 1-based，跳过 header
        match result {
            Ok(row) => requests.push(CreateUrlRequest::from(row)),
            Err(e) => errors.push(format!("Row {}: CSV parse error: {}", row_num, e)),
        }
    }

    if !errors.is_empty() {
        return Err(PocketlinkError::serialization(format!(
            "Failed to read CSV:\n{}",
            errors.join("\n")
        )));
    }

    Ok(requests)
}

/// 导出记录到 CSV 文件
pub fn export_records_to_csv<P: AsRef<Path>>(
    records: &[UrlRecord],
    now: DateTime<Utc>,
    path: P,
) -> Result<(), PocketlinkError> {
    let file = File::create(path.as_ref())
        .map_err(|e| PocketlinkError::file_operation(format!("Failed to create file: {}", e)))?;
    let mut csv_writer = WriterBuilder::new().from_writer(BufWriter::new(file));

    for record in records {
        csv_writer.serialize(RecordCsvRow::from_record(record, now))?;
    }

    csv_writer
        .flush()
        .map_err(|e| PocketlinkError::file_operation(format!("Failed to flush CSV: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_bulk_requests_with_optional_columns() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "original_url,custom_shortcode,validity_minutes").unwrap();
        writeln!(temp_file, "https://a.example.com,,").unwrap();
        writeln!(temp_file, "https://b.example.com, mylink ,60").unwrap();
        writeln!(temp_file, "not a url,,").unwrap();

        let requests = read_bulk_requests(temp_file.path()).unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].custom_shortcode, None);
        assert_eq!(requests[0].validity_minutes, None);
        assert_eq!(requests[1].custom_shortcode.as_deref(), Some("mylink"));
        assert_eq!(requests[1].validity_minutes, Some(60));
        assert_eq!(requests[2].original_url, "not a url");
    }

    #[test]
    fn test_read_bulk_requests_rejects_bad_numbers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "original_url,custom_shortcode,validity_minutes").unwrap();
        writeln!(temp_file, "https://a.example.com,,soon").unwrap();

        let err = read_bulk_requests(temp_file.path()).unwrap_err();
        assert!(matches!(err, PocketlinkError::Serialization(_)));
        assert!(err.message().contains("Row 2"));
    }

    #[test]
    fn test_export_marks_status() {
        let now = Utc::now();
        let active = UrlRecord::new(
            "https://a.example.com".to_string(),
            "live01".to_string(),
            now,
            now + Duration::minutes(5),
        );
        let expired = UrlRecord::new(
            "https://b.example.com".to_string(),
            "old001".to_string(),
            now - Duration::minutes(60),
            now - Duration::minutes(30),
        );

        let temp_file = NamedTempFile::new().unwrap();
        export_records_to_csv(&[active, expired], now, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "shortcode,original_url,created_at,expires_at,clicks,status"
        );
        assert!(lines[1].starts_with("live01,") && lines[1].ends_with(",active"));
        assert!(lines[2].starts_with("old001,") && lines[2].ends_with(",expired"));
    }
}
