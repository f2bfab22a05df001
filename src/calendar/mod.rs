// ==========================================
// Machine Shop APS - Working-Calendar Layer
// ==========================================
// Locale-specific working time: weekend pair, holiday feed with
// static fallback, half-day cutoff arithmetic.
// ==========================================

pub mod feed;
pub mod holiday;
pub mod work_calendar;

pub use feed::{CalendarError, GoogleCalendarFeed, HolidayFeed, StaticHolidayFeed};
pub use holiday::{fallback_holidays, HolidayInfo};
pub use work_calendar::{
    WorkCalendar, HALF_DAY_CUTOFF_HOUR, WORKING_DAY_MINUTES, WORKING_HALF_DAY_MINUTES,
    WORK_START_HOUR,
};
