// ==========================================
// Machine Shop APS - Order & Operation Entities
// ==========================================
// Orders own their operations (cascade delete in the store);
// op_number defines execution order, not database identity.
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Upper bound on operations per order, enforced by the CRUD layer
/// and assumed by the scheduling core.
pub const MAX_OPERATIONS_PER_ORDER: usize = 6;

// ==========================================
// Operation
// ==========================================

/// A single machining step of an order.
///
/// `op_number` is unique within the order and defines the execution
/// sequence. Assignment fields stay `None` until a computed schedule
/// is committed back through the order store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Sequence number within the order (execution order).
    pub op_number: i32,
    /// Per-unit processing time in minutes (> 0 for schedulable work).
    pub op_time_min: i32,
    /// Required capability tag, e.g. "3-axis", "4-axis", "lathe".
    pub op_axes: String,
    /// Machine chosen by the schedule builder, once committed.
    pub assigned_machine: Option<String>,
    pub machine_id: Option<i64>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    /// Set when the assignment comes from an initial planning run
    /// (as opposed to a manual correction).
    pub is_initially_planned: bool,
}

impl Operation {
    pub fn new(op_number: i32, op_time_min: i32, op_axes: impl Into<String>) -> Self {
        Self {
            op_number,
            op_time_min,
            op_axes: op_axes.into(),
            assigned_machine: None,
            machine_id: None,
            start_date: None,
            end_date: None,
            is_initially_planned: false,
        }
    }
}

// ==========================================
// Order
// ==========================================

/// A manufacturing order as supplied by the order store.
///
/// The `will_meet_deadline` / `estimated_*` / `revised_deadline`
/// fields are derived by the schedule builder and persisted back by
/// the CRUD layer; the builder itself never mutates an input order,
/// it returns fresh copies via `ScheduleOutcome::apply_to_orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Blueprint / drawing document number.
    pub blueprint_number: String,
    /// Units to produce (> 0).
    pub quantity: u32,
    pub deadline: NaiveDateTime,
    /// Higher value = more urgent.
    pub priority: i32,
    pub status: OrderStatus,
    /// Ordered operation list, at most MAX_OPERATIONS_PER_ORDER.
    pub operations: Vec<Operation>,

    // Derived scheduling fields (filled by apply_to_orders)
    pub will_meet_deadline: bool,
    pub estimated_completion: Option<NaiveDateTime>,
    pub estimated_workdays: Option<i64>,
    /// Set when the computed completion exceeds the stated deadline.
    pub revised_deadline: Option<NaiveDateTime>,
}

impl Order {
    pub fn new(
        id: i64,
        blueprint_number: impl Into<String>,
        quantity: u32,
        deadline: NaiveDateTime,
        priority: i32,
    ) -> Self {
        Self {
            id,
            blueprint_number: blueprint_number.into(),
            quantity,
            deadline,
            priority,
            status: OrderStatus::New,
            operations: Vec::new(),
            will_meet_deadline: true,
            estimated_completion: None,
            estimated_workdays: None,
            revised_deadline: None,
        }
    }

    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }
}
