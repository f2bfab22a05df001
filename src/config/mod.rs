// ==========================================
// Machine Shop APS - Configuration Layer
// ==========================================

pub mod schedule_config;

pub use schedule_config::{HolidayFeedConfig, ScheduleConfig};
