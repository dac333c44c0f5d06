use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One recorded visit to a shortcode's target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub location: String,
}

pub const DEFAULT_CLICK_SOURCE: &str = "direct";
pub const DEFAULT_CLICK_LOCATION: &str = "Unknown";

impl ClickEvent {
    /// Missing source/location fall back to `direct` / `Unknown`.
    pub fn new(timestamp: DateTime<Utc>, source: Option<&str>, location: Option<&str>) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(3),
            source: source.unwrap_or(DEFAULT_CLICK_SOURCE).to_string(),
            location: location.unwrap_or(DEFAULT_CLICK_LOCATION).to_string(),
        }
    }
}

/// Stored shortened URL and its usage history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: String,
    pub original_url: String,
    pub shortcode: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub click_data: Vec<ClickEvent>,
}

impl UrlRecord {
    pub fn new(
        original_url: String,
        shortcode: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_url,
            shortcode,
            created_at: created_at.trunc_subsecs(3),
            expires_at: expires_at.trunc_subsecs(3),
            clicks: 0,
            click_data: Vec::new(),
        }
    }

    /// Drop sub-millisecond precision, which the persisted form cannot hold.
    pub fn normalize_timestamps(&mut self) {
        self.created_at = self.created_at.trunc_subsecs(3);
        self.expires_at = self.expires_at.trunc_subsecs(3);
        for click in &mut self.click_data {
            click.timestamp = click.timestamp.trunc_subsecs(3);
        }
    }

    /// Active iff `now <= expires_at`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.is_active(now)
    }

    /// Counter and history move together.
    pub fn push_click(&mut self, event: ClickEvent) {
        self.clicks += 1;
        self.click_data.push(event);
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix; any precision is
/// accepted when reading.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
