//! Create and bulk-create commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{CreateUrlRequest, RequestField, Session, validate_request};
use crate::state::AppState;
use crate::utils::csv_handler::read_bulk_requests;

fn field_label(field: RequestField) -> &'static str {
    match field {
        RequestField::OriginalUrl => "url",
        RequestField::CustomShortcode => "code",
        RequestField::ValidityMinutes => "validity",
    }
}

pub fn create_link(
    session: &Session,
    state: &mut AppState,
    original_url: String,
    code: Option<String>,
    validity: Option<i64>,
) -> Result<(), CliError> {
    let request = CreateUrlRequest {
        original_url,
        custom_shortcode: code,
        validity_minutes: validity,
    };

    // 表单级校验，失败时不触碰存储
    let validation = validate_request(&request);
    if !validation.is_valid {
        let details: Vec<String> = validation
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field_label(*field), message))
            .collect();
        return Err(CliError::ParseError(details.join("; ")));
    }

    let generated = request
        .custom_shortcode
        .as_deref()
        .is_none_or(str::is_empty);
    let result = session.create_short_url(state, request)?;

    if generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            result.shortcode.magenta()
        );
    }
    println!(
        "{} {} -> {} (expires: {})",
        "✓".bold().green(),
        result.short_url.cyan(),
        result.original_url.blue().underline(),
        result
            .expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .yellow()
    );
    Ok(())
}

pub fn create_bulk(
    session: &Session,
    state: &mut AppState,
    file_path: String,
) -> Result<(), CliError> {
    let requests = read_bulk_requests(&file_path)?;
    if requests.is_empty() {
        println!("{} No rows found in {}", "ℹ".bold().blue(), file_path);
        return Ok(());
    }

    let result = session.create_bulk(state, requests);

    for created in &result.results {
        println!(
            "  {} {} -> {}",
            "✓".bold().green(),
            created.short_url.cyan(),
            created.original_url.blue().underline()
        );
    }
    for failed in &result.errors {
        println!(
            "  {} row {} ({}): {}",
            "✗".bold().red(),
            failed.index + 1,
            failed.url.dimmed(),
            failed.error.message().red()
        );
    }

    println!();
    println!(
        "{} Created {} of {} URLs",
        "ℹ".bold().blue(),
        result.results.len().to_string().green(),
        result.total()
    );

    match state.error() {
        Some(message) => Err(CliError::CommandError(message.to_string())),
        None => Ok(()),
    }
}
