//! ShortenerService tests
//!
//! Creation, expiry, click recording and bulk creation against an
//! in-memory slot with a manually driven clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, TimeZone, Utc};
use pocketlink::errors::PocketlinkError;
use pocketlink::log_sink::EventLogger;
use pocketlink::services::{CreateUrlRequest, ShortenerService, ShortenerSettings};
use pocketlink::storage::{MemorySlot, RecordStore};
use pocketlink::utils::ManualClock;

// =============================================================================
// Test Setup
// =============================================================================

fn setup() -> (ShortenerService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap(),
    ));
    let store = RecordStore::new(Arc::new(MemorySlot::new()));
    let service = ShortenerService::new(store, EventLogger::console(), ShortenerSettings::default())
        .with_clock(clock.clone());
    (service, clock)
}

fn is_alphanumeric(code: &str) -> bool {
    code.chars().all(|c| c.is_ascii_alphanumeric())
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn test_create_resolve_click_roundtrip() {
    let (service, clock) = setup();

    let created = service
        .create_short_url(CreateUrlRequest::new("https://example.com/a"))
        .unwrap();
    assert_eq!(created.shortcode.len(), 6);
    assert!(is_alphanumeric(&created.shortcode));
    assert_eq!(created.expires_at - created.created_at, Duration::minutes(30));
    assert_eq!(
        created.short_url,
        format!("http://localhost:3000/{}", created.shortcode)
    );

    let resolved = service.resolve(&created.shortcode).unwrap();
    assert_eq!(resolved.original_url, "https://example.com/a");
    assert_eq!(resolved.clicks, 0);

    clock.advance(Duration::minutes(1));
    let clicked = service
        .record_click(&created.shortcode, Some("qr"), Some("Paris"))
        .unwrap();
    assert_eq!(clicked.clicks, 1);
    assert_eq!(clicked.click_data.len(), 1);
    assert_eq!(clicked.click_data[0].source, "qr");
    assert_eq!(clicked.click_data[0].location, "Paris");
    assert_eq!(
        clicked.click_data[0].timestamp,
        created.created_at + Duration::minutes(1)
    );
}

#[test]
fn test_custom_shortcode_twice() {
    let (service, _clock) = setup();

    let first = service
        .create_short_url(CreateUrlRequest::new("https://example.com/one").with_shortcode("mylink"))
        .unwrap();
    assert_eq!(first.shortcode, "mylink");

    let err = service
        .create_short_url(CreateUrlRequest::new("https://example.com/two").with_shortcode("mylink"))
        .unwrap_err();
    assert!(matches!(err, PocketlinkError::ShortcodeTaken(_)));
    assert_eq!(err.message(), "Custom shortcode already exists");

    let stored = service.resolve("mylink").unwrap();
    assert_eq!(stored.original_url, "https://example.com/one");
    assert_eq!(service.list_all().unwrap().len(), 1);
}

#[test]
fn test_non_positive_validity_rejected_without_writes() {
    let (service, _clock) = setup();

    for minutes in [-5, 0] {
        let err = service
            .create_short_url(CreateUrlRequest::new("https://example.com").with_validity(minutes))
            .unwrap_err();
        assert!(matches!(err, PocketlinkError::InvalidValidity(_)));
    }
    assert!(service.store().is_empty().unwrap());
}

#[test]
fn test_invalid_url_rejected_without_writes() {
    let (service, _clock) = setup();

    for url in ["", "not a url", "example.com/path"] {
        let err = service
            .create_short_url(CreateUrlRequest::new(url))
            .unwrap_err();
        assert!(matches!(err, PocketlinkError::InvalidUrl(_)), "url: {:?}", url);
    }
    assert!(service.store().is_empty().unwrap());
}

#[test]
fn test_empty_custom_shortcode_means_generated() {
    let (service, _clock) = setup();

    let created = service
        .create_short_url(CreateUrlRequest::new("https://example.com").with_shortcode(""))
        .unwrap();
    assert_eq!(created.shortcode.len(), 6);
}

#[test]
fn test_custom_shortcode_used_verbatim() {
    let (service, _clock) = setup();

    // 服务层不检查格式，只有表单校验会拦截
    let created = service
        .create_short_url(CreateUrlRequest::new("https://example.com").with_shortcode("a-b"))
        .unwrap();
    assert_eq!(created.shortcode, "a-b");
}

#[test]
fn test_generated_code_retries_on_collision() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let (service, _clock) = setup();
    let service = service.with_code_generator(move |_len| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        if n < 2 { "taken1".to_string() } else { format!("fresh{}", n) }
    });

    service
        .create_short_url(CreateUrlRequest::new("https://example.com/first"))
        .unwrap();
    let second = service
        .create_short_url(CreateUrlRequest::new("https://example.com/second"))
        .unwrap();

    assert_eq!(second.shortcode, "fresh2");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_generated_code_gives_up_after_max_attempts() {
    let (service, _clock) = setup();
    let service = service.with_code_generator(|_len| "always".to_string());

    service
        .create_short_url(CreateUrlRequest::new("https://example.com/first"))
        .unwrap();
    let err = service
        .create_short_url(CreateUrlRequest::new("https://example.com/second"))
        .unwrap_err();
    assert!(matches!(err, PocketlinkError::ShortcodeTaken(_)));
    assert_eq!(service.store().len().unwrap(), 1);
}

#[test]
fn test_created_result_matches_stored_record() {
    let (service, clock) = setup();
    clock.advance(Duration::microseconds(700));

    let created = service
        .create_short_url(CreateUrlRequest::new("https://example.com"))
        .unwrap();
    let stored = service.store().find_by_shortcode(&created.shortcode).unwrap();
    assert_eq!(created.created_at, stored.created_at);
    assert_eq!(created.expires_at, stored.expires_at);
    assert_eq!(created.to_new_record(), stored);
}

#[test]
fn test_zero_code_length_never_stores_empty_shortcode() {
    let settings = ShortenerSettings {
        code_length: 0,
        ..ShortenerSettings::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(PocketlinkError::Validation(_))
    ));

    let service = ShortenerService::new(
        RecordStore::new(Arc::new(MemorySlot::new())),
        EventLogger::console(),
        settings,
    );

    for _ in 0..2 {
        let err = service
            .create_short_url(CreateUrlRequest::new("https://example.com"))
            .unwrap_err();
        assert!(matches!(err, PocketlinkError::Validation(_)));
    }
    assert!(service.store().is_empty().unwrap());

    // 自定义短码不依赖生成长度
    let custom = service
        .create_short_url(CreateUrlRequest::new("https://example.com").with_shortcode("keep"))
        .unwrap();
    assert_eq!(custom.shortcode, "keep");
}

// =============================================================================
// Resolution and expiry
// =============================================================================

#[test]
fn test_resolve_missing_vs_expired() {
    let (service, clock) = setup();

    let err = service.resolve("nothere").unwrap_err();
    assert!(matches!(err, PocketlinkError::NotFound(_)));

    service
        .create_short_url(
            CreateUrlRequest::new("https://example.com")
                .with_shortcode("short")
                .with_validity(1),
        )
        .unwrap();

    // 恰好到期时仍然有效
    clock.advance(Duration::minutes(1));
    assert!(service.resolve("short").is_ok());

    clock.advance(Duration::milliseconds(1));
    let err = service.resolve("short").unwrap_err();
    assert!(matches!(err, PocketlinkError::Expired(_)));
}

#[test]
fn test_resolve_never_counts_a_click() {
    let (service, _clock) = setup();
    let created = service
        .create_short_url(CreateUrlRequest::new("https://example.com"))
        .unwrap();

    for _ in 0..3 {
        service.resolve(&created.shortcode).unwrap();
    }
    assert_eq!(service.resolve(&created.shortcode).unwrap().clicks, 0);
}

#[test]
fn test_record_click_on_expired_record() {
    let (service, clock) = setup();
    service
        .create_short_url(
            CreateUrlRequest::new("https://example.com")
                .with_shortcode("late")
                .with_validity(5),
        )
        .unwrap();
    clock.advance(Duration::hours(1));

    let clicked = service.record_click("late", None, None).unwrap();
    assert_eq!(clicked.clicks, 1);
    assert_eq!(clicked.click_data[0].source, "direct");
    assert_eq!(clicked.click_data[0].location, "Unknown");
}

#[test]
fn test_visit_rejects_expired_and_records_nothing() {
    let (service, clock) = setup();
    service
        .create_short_url(
            CreateUrlRequest::new("https://example.com")
                .with_shortcode("visit")
                .with_validity(10),
        )
        .unwrap();

    let visited = service.visit("visit", Some("email"), None).unwrap();
    assert_eq!(visited.clicks, 1);

    clock.advance(Duration::minutes(11));
    let err = service.visit("visit", None, None).unwrap_err();
    assert!(matches!(err, PocketlinkError::Expired(_)));
    assert_eq!(service.store().find_by_shortcode("visit").unwrap().clicks, 1);
}

#[test]
fn test_expired_code_cannot_be_reused() {
    let (service, clock) = setup();
    service
        .create_short_url(
            CreateUrlRequest::new("https://example.com/old")
                .with_shortcode("reuse")
                .with_validity(1),
        )
        .unwrap();
    clock.advance(Duration::days(1));

    let err = service
        .create_short_url(CreateUrlRequest::new("https://example.com/new").with_shortcode("reuse"))
        .unwrap_err();
    assert!(matches!(err, PocketlinkError::ShortcodeTaken(_)));
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_list_all_newest_first() {
    let (service, clock) = setup();
    for code in ["first", "second", "third"] {
        service
            .create_short_url(CreateUrlRequest::new("https://example.com").with_shortcode(code))
            .unwrap();
        clock.advance(Duration::seconds(1));
    }

    let codes: Vec<String> = service
        .list_all()
        .unwrap()
        .into_iter()
        .map(|r| r.shortcode)
        .collect();
    assert_eq!(codes, vec!["third", "second", "first"]);
}

// =============================================================================
// Bulk creation
// =============================================================================

#[test]
fn test_bulk_with_invalid_url_in_the_middle() {
    let (service, _clock) = setup();

    let result = service.create_bulk(vec![
        CreateUrlRequest::new("https://example.com/0"),
        CreateUrlRequest::new("not a url"),
        CreateUrlRequest::new("https://example.com/2"),
    ]);

    assert_eq!(result.results.len(), 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.total(), 3);

    let failed = &result.errors[0];
    assert_eq!(failed.index, 1);
    assert_eq!(failed.url, "not a url");
    assert!(matches!(failed.error, PocketlinkError::InvalidUrl(_)));

    assert_eq!(result.results[0].original_url, "https://example.com/0");
    assert_eq!(result.results[1].original_url, "https://example.com/2");
    assert_eq!(service.store().len().unwrap(), 2);
}

#[test]
fn test_bulk_duplicate_within_batch() {
    let (service, _clock) = setup();

    let result = service.create_bulk(vec![
        CreateUrlRequest::new("https://example.com/a").with_shortcode("same"),
        CreateUrlRequest::new("https://example.com/b").with_shortcode("same"),
    ]);

    assert_eq!(result.results.len(), 1);
    assert_eq!(result.errors[0].index, 1);
    assert!(matches!(
        result.errors[0].error,
        PocketlinkError::ShortcodeTaken(_)
    ));
}

#[test]
fn test_bulk_empty_input() {
    let (service, _clock) = setup();
    let result = service.create_bulk(Vec::new());
    assert_eq!(result.total(), 0);
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_custom_settings() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let settings = ShortenerSettings {
        base_url: "https://s.example.org/".to_string(),
        code_length: 8,
        default_validity_minutes: 120,
        max_generate_attempts: 3,
    };
    let service = ShortenerService::new(
        RecordStore::new(Arc::new(MemorySlot::new())),
        EventLogger::console(),
        settings,
    )
    .with_clock(clock);

    let created = service
        .create_short_url(CreateUrlRequest::new("https://example.com"))
        .unwrap();
    assert_eq!(created.shortcode.len(), 8);
    assert_eq!(created.expires_at - created.created_at, Duration::minutes(120));
    assert!(created.short_url.starts_with("https://s.example.org/"));
    assert!(!created.short_url.contains("org//"));
}
