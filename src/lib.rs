// ==========================================
// Machine Shop APS - Core Library
// ==========================================
// Decision-support scheduling core for a CNC machine shop: working
// calendar, machine eligibility, greedy earliest-finish placement
// and read-only schedule projections. The shop keeps final control;
// every computed plan is advisory until committed.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Calendar layer - working time and holidays
pub mod calendar;

// Engine layer - business rules
pub mod engine;

// Projection layer - calendar and Gantt views
pub mod projection;

// Configuration layer
pub mod config;

// Logging system
pub mod logging;

// ==========================================
// Core type re-exports
// ==========================================

// Domain types
pub use domain::{DeadlineStatus, OrderStatus, SkipReason};

// Domain entities
pub use domain::{
    Machine, MachineSchedule, Operation, Order, OrderScheduleResult, ScheduledOperation,
    SkippedOperation, MAX_OPERATIONS_PER_ORDER,
};

// Calendar
pub use calendar::{
    CalendarError, GoogleCalendarFeed, HolidayFeed, HolidayInfo, StaticHolidayFeed, WorkCalendar,
};

// Engines
pub use engine::{CapabilityMatcher, DurationEstimator, ScheduleBuilder, ScheduleOutcome};

// Projections
pub use projection::{CalendarProjector, GanttProjector};

// Configuration
pub use config::{HolidayFeedConfig, ScheduleConfig};

// ==========================================
// Constants
// ==========================================

// System version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Machine Shop APS";

// ==========================================
// Compile-time visibility check
// ==========================================
