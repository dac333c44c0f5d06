//! List and export commands

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::interfaces::cli::CliError;
use crate::services::Session;
use crate::state::AppState;
use crate::storage::UrlRecord;
use crate::utils::csv_handler::export_records_to_csv;

/// Record plus its derived status, for JSON output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedRecord<'a> {
    #[serde(flatten)]
    record: &'a UrlRecord,
    short_url: String,
    is_expired: bool,
}

pub fn list_links(session: &Session, state: &mut AppState, json: bool) -> Result<(), CliError> {
    let records = session.load_all(state)?;
    let now = session.service().now();

    if json {
        let listed: Vec<ListedRecord> = records
            .iter()
            .map(|record| ListedRecord {
                record,
                short_url: session.service().short_url_for(&record.shortcode),
                is_expired: record.is_expired(now),
            })
            .collect();
        let out = serde_json::to_string_pretty(&listed)
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} No short URLs found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short URL list:".bold().green());
    println!();
    for record in &records {
        let status = if record.is_expired(now) {
            "expired".red()
        } else {
            "active".green()
        };
        println!(
            "  {} -> {} [{}] {}",
            record.shortcode.cyan(),
            record.original_url.blue().underline(),
            status,
            format!("(clicks: {})", record.clicks).dimmed().cyan()
        );
    }
    println!();
    println!(
        "{} Total {} short URLs",
        "ℹ".bold().blue(),
        records.len().to_string().green()
    );
    Ok(())
}

pub fn export_links(session: &Session, file_path: Option<String>) -> Result<(), CliError> {
    let path = file_path.unwrap_or_else(|| {
        format!("pocketlink_export_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"))
    });

    let records = session.service().list_all()?;
    export_records_to_csv(&records, session.service().now(), &path)?;

    println!(
        "{} Exported {} short URLs to {}",
        "✓".bold().green(),
        records.len().to_string().green(),
        path.blue()
    );
    Ok(())
}
