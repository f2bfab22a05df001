// ==========================================
// Machine Shop APS - Engine Layer
// ==========================================
// Business rules of the scheduling core: eligibility, duration,
// placement. Pure computation over domain snapshots.
// ==========================================
// Red line: the engine does no I/O and mutates no inputs; every
// skipped operation carries a reason.
// ==========================================

pub mod builder;
pub mod capability;
pub mod duration;

// Re-export the core engines
pub use builder::{ScheduleBuilder, ScheduleOutcome};
pub use capability::CapabilityMatcher;
pub use duration::DurationEstimator;
