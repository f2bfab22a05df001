// ==========================================
// Machine Shop APS - Scheduling Configuration
// ==========================================
// Process-wide knobs with built-in defaults. Serde-serializable so
// the hosting application can persist overrides alongside its own
// settings.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleConfig
// ==========================================

/// Tunables of the scheduling core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed machine setup overhead added to every operation (minutes).
    pub setup_time_min: i64,
    /// Width of the "near deadline" warning window on Gantt bars (days).
    pub near_deadline_days: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            setup_time_min: 480,
            near_deadline_days: 7,
        }
    }
}

// ==========================================
// HolidayFeedConfig
// ==========================================

/// Connection settings for the external holiday calendars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayFeedConfig {
    pub api_key: String,
    /// Jewish holiday calendar.
    pub holiday_calendar_id: String,
    /// Israel civil holiday calendar.
    pub civil_calendar_id: String,
}

impl Default for HolidayFeedConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            holiday_calendar_id: "en.jewish#holiday@group.v.calendar.google.com".to_string(),
            civil_calendar_id: "en.il#holiday@group.v.calendar.google.com".to_string(),
        }
    }
}

impl HolidayFeedConfig {
    /// Read the API key from `GOOGLE_CALENDAR_API_KEY`, keeping the
    /// default calendar ids.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_CALENDAR_API_KEY").unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_config() {
        let config = ScheduleConfig::default();
        assert_eq!(config.setup_time_min, 480);
        assert_eq!(config.near_deadline_days, 7);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ScheduleConfig {
            setup_time_min: 60,
            near_deadline_days: 3,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ScheduleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
