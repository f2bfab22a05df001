// ==========================================
// Machine Shop APS - Domain Layer
// ==========================================
// Entities and shared types. No business rules, no I/O.
// ==========================================

pub mod machine;
pub mod order;
pub mod schedule;
pub mod types;

pub use machine::Machine;
pub use order::{Operation, Order, MAX_OPERATIONS_PER_ORDER};
pub use schedule::{MachineSchedule, OrderScheduleResult, ScheduledOperation, SkippedOperation};
pub use types::{DeadlineStatus, OrderStatus, SkipReason};
