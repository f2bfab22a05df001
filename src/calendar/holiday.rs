// ==========================================
// Machine Shop APS - Holiday Data
// ==========================================
// Holiday entries drive the working-time calendar: a full-day entry
// is non-working, a half-day entry works the morning shift up to the
// cutoff hour, an eve entry is the half-day before a holiday.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// HolidayInfo
// ==========================================

/// One calendar date with its holiday flags.
///
/// Flags are not mutually exclusive in the feed (an eve is also a
/// half day); `is_full_day` wins over `is_half_day` when both appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    pub date: NaiveDate,
    pub name: String,
    /// Eve of a holiday (working until the half-day cutoff).
    pub is_eve: bool,
    /// Full non-working holiday.
    pub is_full_day: bool,
    /// Reduced morning shift only.
    pub is_half_day: bool,
}

impl HolidayInfo {
    pub fn full_day(date: NaiveDate, name: &str) -> Self {
        Self {
            date,
            name: name.to_string(),
            is_eve: false,
            is_full_day: true,
            is_half_day: false,
        }
    }

    pub fn half_day(date: NaiveDate, name: &str) -> Self {
        Self {
            date,
            name: name.to_string(),
            is_eve: false,
            is_full_day: false,
            is_half_day: true,
        }
    }

    pub fn eve(date: NaiveDate, name: &str) -> Self {
        Self {
            date,
            name: name.to_string(),
            is_eve: true,
            is_full_day: false,
            is_half_day: true,
        }
    }
}

// ==========================================
// Static fallback table
// ==========================================

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Literal dates below are all valid
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fallback holiday date")
}

/// Built-in Israeli holiday table for 2025, used whenever the
/// external feed is unreachable. Pattern per holiday: eve (morning
/// worked), full day(s) off, sometimes a trailing half day.
pub fn fallback_holidays() -> Vec<HolidayInfo> {
    vec![
        HolidayInfo::eve(ymd(2025, 1, 13), "Tu BiShvat Eve"),
        HolidayInfo::full_day(ymd(2025, 1, 14), "Tu BiShvat"),
        HolidayInfo::eve(ymd(2025, 3, 14), "Purim Eve"),
        HolidayInfo::full_day(ymd(2025, 3, 15), "Purim"),
        HolidayInfo::half_day(ymd(2025, 3, 16), "Shushan Purim"),
        HolidayInfo::eve(ymd(2025, 4, 12), "Passover Eve"),
        HolidayInfo::full_day(ymd(2025, 4, 13), "Passover I"),
        HolidayInfo::full_day(ymd(2025, 4, 14), "Passover II"),
        HolidayInfo::full_day(ymd(2025, 4, 15), "Passover III"),
        HolidayInfo::full_day(ymd(2025, 4, 16), "Passover IV"),
        HolidayInfo::full_day(ymd(2025, 4, 17), "Passover V"),
        HolidayInfo::full_day(ymd(2025, 4, 18), "Passover VI"),
        HolidayInfo::full_day(ymd(2025, 4, 19), "Passover VII"),
        HolidayInfo::full_day(ymd(2025, 4, 20), "Passover VIII"),
        HolidayInfo::eve(ymd(2025, 5, 2), "Yom HaZikaron Eve"),
        HolidayInfo::full_day(ymd(2025, 5, 3), "Yom HaZikaron"),
        HolidayInfo::full_day(ymd(2025, 5, 4), "Yom HaAtzmaut"),
    ]
}
