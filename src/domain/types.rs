// ==========================================
// Machine Shop APS - Domain Type Definitions
// ==========================================
// Closed enums shared across the crate.
// Serialization format: SCREAMING_SNAKE_CASE (matches the order store)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Order Status
// ==========================================
// Lifecycle labels managed by the external CRUD layer; the
// scheduling core only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,        // freshly created, not yet planned
    InProgress, // at least one operation running
    Completed,  // all operations finished
    Cancelled,  // withdrawn by the customer
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::New => write!(f, "NEW"),
            OrderStatus::InProgress => write!(f, "IN_PROGRESS"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::New
    }
}

// ==========================================
// Deadline Status
// ==========================================
// Gantt bar tag: how a scheduled operation's end relates to its
// order deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineStatus {
    OnTime,       // comfortably before the deadline
    NearDeadline, // finishes within the warning window before the deadline
    Overdue,      // finishes after the deadline
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineStatus::OnTime => write!(f, "ON_TIME"),
            DeadlineStatus::NearDeadline => write!(f, "NEAR_DEADLINE"),
            DeadlineStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}

// ==========================================
// Skip Reason
// ==========================================
// Why an operation was left unassigned. Recoverable by design:
// a skip never aborts the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    NoEligibleMachine,   // no machine carries the required capability tag
    NonPositiveDuration, // per-unit time or quantity not positive
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoEligibleMachine => write!(f, "NO_ELIGIBLE_MACHINE"),
            SkipReason::NonPositiveDuration => write!(f, "NON_POSITIVE_DURATION"),
        }
    }
}
