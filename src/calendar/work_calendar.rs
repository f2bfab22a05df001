// ==========================================
// Machine Shop APS - Working-Time Calendar
// ==========================================
// Immutable snapshot of the shop working calendar: Friday/Saturday
// weekend, holiday table, 16h working day starting 08:00, 5h half
// day up to the 13:00 cutoff.
// ==========================================
// Red line: a loaded calendar is read-only; reloading for a wider
// range produces a new snapshot instead of mutating shared state.
// ==========================================

use crate::calendar::feed::HolidayFeed;
use crate::calendar::holiday::{fallback_holidays, HolidayInfo};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::collections::HashMap;
use tracing::{info, warn};

// ==========================================
// Working-time constants
// ==========================================

/// Minutes in a full working day (08:00 - 24:00).
pub const WORKING_DAY_MINUTES: i64 = 960;
/// Minutes in a half working day (08:00 - 13:00).
pub const WORKING_HALF_DAY_MINUTES: i64 = 300;
/// Hour of day at which work starts.
pub const WORK_START_HOUR: u32 = 8;
/// Hour of day at which a half working day ends.
pub const HALF_DAY_CUTOFF_HOUR: u32 = 13;

// ==========================================
// WorkCalendar
// ==========================================

/// Working-time calendar snapshot.
///
/// Construct once per scheduling run via [`WorkCalendar::load`] (feed
/// with static fallback) or [`WorkCalendar::from_holidays`] (explicit
/// table, fully deterministic - the form tests use).
#[derive(Debug, Clone, Default)]
pub struct WorkCalendar {
    holidays: HashMap<NaiveDate, HolidayInfo>,
}

impl WorkCalendar {
    pub fn from_holidays(holidays: Vec<HolidayInfo>) -> Self {
        Self {
            holidays: holidays.into_iter().map(|h| (h.date, h)).collect(),
        }
    }

    /// Load holiday data for [start, end] from the feed.
    ///
    /// # Failure
    /// If the feed is unreachable or malformed, the built-in static
    /// table is substituted and a warning is logged. Loading never
    /// fails and never blocks scheduling.
    pub async fn load(feed: &dyn HolidayFeed, start: NaiveDate, end: NaiveDate) -> Self {
        match feed.fetch_holidays(start, end).await {
            Ok(holidays) => {
                info!(
                    holidays = holidays.len(),
                    %start,
                    %end,
                    "holiday data loaded from feed"
                );
                Self::from_holidays(holidays)
            }
            Err(err) => {
                warn!(error = %err, "holiday feed unavailable, using static fallback table");
                Self::from_holidays(fallback_holidays())
            }
        }
    }

    pub fn holiday(&self, date: NaiveDate) -> Option<&HolidayInfo> {
        self.holidays.get(&date)
    }

    /// Friday or Saturday.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
    }

    /// Weekend or full-day holiday: no work at all.
    pub fn is_non_working_day(&self, date: NaiveDate) -> bool {
        if self.is_weekend(date) {
            return true;
        }
        self.holiday(date).is_some_and(|h| h.is_full_day)
    }

    /// Half-day holiday (morning shift up to the cutoff), never on a
    /// weekend.
    pub fn is_half_working_day(&self, date: NaiveDate) -> bool {
        if self.is_weekend(date) {
            return false;
        }
        self.holiday(date).is_some_and(|h| h.is_half_day)
    }

    /// Working hours the date offers: 0 / 5 / 16.
    pub fn available_hours(&self, date: NaiveDate) -> f64 {
        self.available_minutes(date) as f64 / 60.0
    }

    fn available_minutes(&self, date: NaiveDate) -> i64 {
        if self.is_weekend(date) {
            return 0;
        }
        match self.holiday(date) {
            None => WORKING_DAY_MINUTES,
            Some(h) if h.is_full_day => 0,
            Some(h) if h.is_half_day => WORKING_HALF_DAY_MINUTES,
            Some(_) => WORKING_DAY_MINUTES,
        }
    }

    /// 08:00 on the given date.
    pub fn work_start(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(WORK_START_HOUR, 0, 0)
            .expect("valid work start time")
    }

    /// Advance past non-working days: while the date is non-working,
    /// add one calendar day and reset to the work start hour. A
    /// timestamp already on a working day is returned unchanged.
    pub fn advance_to_next_work_start(&self, timestamp: NaiveDateTime) -> NaiveDateTime {
        let mut current = timestamp;
        while self.is_non_working_day(current.date()) {
            current = Self::work_start(next_day(current.date()));
        }
        current
    }

    /// Work start of the first working day strictly after `date`.
    fn next_work_start_after(&self, date: NaiveDate) -> NaiveDateTime {
        self.advance_to_next_work_start(Self::work_start(next_day(date)))
    }

    /// Add working hours to a timestamp, walking the calendar
    /// day-by-day.
    ///
    /// # Rules
    /// 1. hours <= 0 -> the input timestamp, unchanged
    /// 2. a non-working start advances to the next work start first
    /// 3. the first day contributes only the span from the start
    ///    time-of-day to the day close (13:00 on a half day, 24:00 on
    ///    a full day)
    /// 4. each further working day contributes its full available
    ///    hours; the result on the final day is that day's work start
    ///    plus the hours consumed there
    ///
    /// Deterministic, minute resolution, and monotone: the result is
    /// never before the input.
    pub fn add_working_hours(&self, start: NaiveDateTime, hours: f64) -> NaiveDateTime {
        if hours <= 0.0 {
            return start;
        }

        let mut remaining_min = (hours * 60.0).round() as i64;
        let mut current = self.advance_to_next_work_start(start);

        loop {
            let day = current.date();
            let work_start = Self::work_start(day);
            // Time before 08:00 is dead time, not working time
            let cursor = current.max(work_start);

            let day_close = if self.is_half_working_day(day) {
                day.and_hms_opt(HALF_DAY_CUTOFF_HOUR, 0, 0)
                    .expect("valid cutoff time")
            } else {
                work_start + Duration::minutes(WORKING_DAY_MINUTES)
            };

            let left_min = (day_close - cursor).num_minutes().max(0);
            if remaining_min <= left_min {
                return cursor + Duration::minutes(remaining_min);
            }

            remaining_min -= left_min;
            current = self.next_work_start_after(day);
        }
    }

    /// Count working days in [start, end], half days as 0.5.
    pub fn working_days_between(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        if start > end {
            return 0.0;
        }
        let mut days = 0.0;
        let mut current = start;
        while current <= end {
            if !self.is_non_working_day(current) {
                days += if self.is_half_working_day(current) {
                    0.5
                } else {
                    1.0
                };
            }
            current = next_day(current);
        }
        days
    }

    /// Add working days to a timestamp; half days count 0.5. A
    /// fractional remainder on a half day lands on the cutoff hour.
    pub fn add_working_days(&self, start: NaiveDateTime, days: f64) -> NaiveDateTime {
        if days <= 0.0 {
            return start;
        }

        let mut result = start;
        let mut remaining = days;

        let first = result.date();
        if self.is_half_working_day(first) && !self.is_non_working_day(first) {
            if result.hour() >= HALF_DAY_CUTOFF_HOUR {
                result += Duration::days(1);
            } else {
                remaining -= 0.5;
            }
        }

        while remaining > 0.0 {
            result += Duration::days(1);
            let day = result.date();
            if self.is_non_working_day(day) {
                continue;
            }
            if self.is_half_working_day(day) {
                remaining -= 0.5;
                if remaining > 0.0 && remaining < 0.5 {
                    result = day
                        .and_hms_opt(HALF_DAY_CUTOFF_HOUR, 0, 0)
                        .expect("valid cutoff time");
                    remaining = 0.0;
                }
            } else {
                remaining -= 1.0;
            }
        }

        result
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().expect("date within chrono range")
}
