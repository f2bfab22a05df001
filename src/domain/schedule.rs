// ==========================================
// Machine Shop APS - Schedule Output Structures
// ==========================================
// Derived, ephemeral results of a schedule calculation. Transient
// unless the caller commits them back through the order store.
// ==========================================

use crate::domain::types::SkipReason;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduledOperation
// ==========================================

/// An operation placed on a concrete machine with a concrete time
/// window, enriched with the order context the projections need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    pub order_id: i64,
    pub blueprint_number: String,
    pub op_number: i32,
    pub op_time_min: i32,
    pub op_axes: String,
    pub quantity: u32,
    pub deadline: NaiveDateTime,
    pub machine_id: i64,
    pub machine_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

// ==========================================
// MachineSchedule
// ==========================================

/// Per-machine assignment list produced by the schedule builder.
///
/// `release_date` starts at max(machine release date, calculation
/// start) and only ever moves forward as operations are appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSchedule {
    pub machine_id: i64,
    pub machine_name: String,
    /// Current availability; advances to each assigned operation's end.
    pub release_date: NaiveDateTime,
    /// Assigned operations, sorted by start time.
    pub operations: Vec<ScheduledOperation>,
}

// ==========================================
// OrderScheduleResult
// ==========================================

/// Per-order verdict of a calculation run. Produced instead of
/// mutating the input order; merge with `ScheduleOutcome::apply_to_orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderScheduleResult {
    pub order_id: i64,
    pub will_meet_deadline: bool,
    pub estimated_completion: Option<NaiveDateTime>,
    pub estimated_workdays: Option<i64>,
    /// Computed completion when it exceeds the stated deadline.
    /// Advisory output, not an error.
    pub revised_deadline: Option<NaiveDateTime>,
}

// ==========================================
// SkippedOperation
// ==========================================

/// Diagnostic record for an operation left unassigned. The rest of
/// the batch proceeds; callers that need to alert users check here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedOperation {
    pub order_id: i64,
    pub blueprint_number: String,
    pub op_number: i32,
    pub reason: SkipReason,
}
