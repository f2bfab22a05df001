// ==========================================
// Machine Shop APS - Holiday Feed
// ==========================================
// External holiday data source behind an async trait. The work
// calendar consumes the feed once at load time; failures fall back
// to the static table and never block scheduling.
// ==========================================

use crate::calendar::holiday::{fallback_holidays, HolidayInfo};
use crate::config::HolidayFeedConfig;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

// ==========================================
// Errors
// ==========================================

/// Feed-path errors. All of them are recovered by substituting the
/// static fallback table; none surfaces to the scheduler.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("holiday feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("holiday feed returned a malformed payload: {0}")]
    MalformedFeed(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

// ==========================================
// HolidayFeed trait
// ==========================================

/// A source of holiday entries for a date range.
#[async_trait]
pub trait HolidayFeed: Send + Sync {
    /// Fetch holiday entries with dates in [start, end].
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HolidayInfo>, CalendarError>;
}

// ==========================================
// StaticHolidayFeed - built-in table
// ==========================================

/// Serves the built-in fallback table. Also useful as a fully
/// deterministic feed in tests.
pub struct StaticHolidayFeed;

#[async_trait]
impl HolidayFeed for StaticHolidayFeed {
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HolidayInfo>, CalendarError> {
        Ok(fallback_holidays()
            .into_iter()
            .filter(|h| h.date >= start && h.date <= end)
            .collect())
    }
}

// ==========================================
// GoogleCalendarFeed - public holiday calendars
// ==========================================

/// Queries the configured public Google calendars (Jewish holidays +
/// Israel civil holidays) and classifies events into holiday flags.
pub struct GoogleCalendarFeed {
    client: reqwest::Client,
    config: HolidayFeedConfig,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

#[derive(Debug, Deserialize)]
struct CalendarEvent {
    summary: Option<String>,
    start: Option<EventStart>,
}

#[derive(Debug, Deserialize)]
struct EventStart {
    /// All-day events carry a plain date.
    date: Option<NaiveDate>,
    /// Timed events carry an RFC3339 timestamp.
    #[serde(rename = "dateTime")]
    date_time: Option<DateTime<FixedOffset>>,
}

impl GoogleCalendarFeed {
    pub fn new(config: HolidayFeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Classify one feed event into a holiday entry.
    ///
    /// # Rules
    /// 1. summary contains "erev" (case-insensitive) -> eve, half day
    /// 2. all-day event, not an eve -> full day
    /// 3. otherwise -> half day only when it is an eve
    fn classify(event: &CalendarEvent) -> Option<HolidayInfo> {
        let start = event.start.as_ref()?;
        let (date, all_day) = match (start.date, &start.date_time) {
            (Some(d), _) => (d, true),
            (None, Some(dt)) => (dt.date_naive(), false),
            (None, None) => return None,
        };

        let name = event.summary.clone().unwrap_or_default();
        let is_eve = name.to_lowercase().contains("erev");
        let is_full_day = all_day && !is_eve;
        let is_half_day = is_eve && !is_full_day;

        Some(HolidayInfo {
            date,
            name,
            is_eve,
            is_full_day,
            is_half_day,
        })
    }

    /// Merge entries from several calendars, one entry per date.
    /// A full-day entry replaces a previously seen non-full entry.
    fn deduplicate(entries: Vec<HolidayInfo>) -> Vec<HolidayInfo> {
        let mut unique: Vec<HolidayInfo> = Vec::new();
        for entry in entries {
            match unique.iter_mut().find(|h| h.date == entry.date) {
                None => unique.push(entry),
                Some(existing) => {
                    if !existing.is_full_day && entry.is_full_day {
                        *existing = entry;
                    }
                }
            }
        }
        unique.sort_by_key(|h| h.date);
        unique
    }

    async fn fetch_calendar(
        &self,
        calendar_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HolidayInfo>, CalendarError> {
        let url = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            urlencode(calendar_id)
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("timeMin", &format!("{}T00:00:00Z", start)),
                ("timeMax", &format!("{}T23:59:59Z", end)),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CalendarError::FeedUnavailable(e.to_string()))?;

        let payload: EventsResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::MalformedFeed(e.to_string()))?;

        debug!(
            calendar_id,
            events = payload.items.len(),
            "holiday calendar fetched"
        );

        Ok(payload.items.iter().filter_map(Self::classify).collect())
    }
}

#[async_trait]
impl HolidayFeed for GoogleCalendarFeed {
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HolidayInfo>, CalendarError> {
        let mut entries = Vec::new();
        for calendar_id in [
            self.config.holiday_calendar_id.as_str(),
            self.config.civil_calendar_id.as_str(),
        ] {
            entries.extend(self.fetch_calendar(calendar_id, start, end).await?);
        }
        Ok(Self::deduplicate(entries))
    }
}

/// Percent-encode a calendar id for use in the request path.
fn urlencode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
