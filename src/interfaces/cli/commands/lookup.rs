//! Resolve, open and click commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::Session;
use crate::state::AppState;
use crate::storage::UrlRecord;

fn print_record(session: &Session, record: &UrlRecord) {
    let now = session.service().now();
    let status = if record.is_active(now) {
        "active".green()
    } else {
        "expired".red()
    };

    println!(
        "{} -> {} [{}]",
        session.service().short_url_for(&record.shortcode).cyan(),
        record.original_url.blue().underline(),
        status
    );
    println!(
        "  {} {}",
        "created:".dimmed(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {} {}",
        "expires:".dimmed(),
        record.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  {} {}", "clicks:".dimmed(), record.clicks);
}

/// Preview only; the click count is left alone.
pub fn resolve_link(session: &Session, shortcode: &str) -> Result<(), CliError> {
    let record = session.service().resolve(shortcode)?;
    print_record(session, &record);
    Ok(())
}

pub fn open_link(session: &Session, state: &mut AppState, shortcode: &str) -> Result<(), CliError> {
    let record = session.redirect(state, shortcode)?;
    // 目标地址单独一行，方便脚本使用
    println!("{}", record.original_url);
    Ok(())
}

pub fn click_link(
    session: &Session,
    state: &mut AppState,
    shortcode: &str,
    source: Option<String>,
    location: Option<String>,
) -> Result<(), CliError> {
    let record = session.record_click(state, shortcode, source.as_deref(), location.as_deref())?;
    println!(
        "{} Click recorded for {} (total: {})",
        "✓".bold().green(),
        record.shortcode.cyan(),
        record.clicks.to_string().green()
    );
    Ok(())
}
