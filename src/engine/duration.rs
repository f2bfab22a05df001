// ==========================================
// Machine Shop APS - Operation Duration Estimator
// ==========================================
// Converts (per-unit minutes, quantity) plus the fixed setup
// overhead into required working hours.
// ==========================================

use crate::calendar::WORKING_DAY_MINUTES;

// ==========================================
// DurationEstimator
// ==========================================
pub struct DurationEstimator {
    setup_time_min: i64,
}

impl DurationEstimator {
    /// # Parameters
    /// - setup_time_min: fixed machine setup overhead in minutes,
    ///   added once per operation
    pub fn new(setup_time_min: i64) -> Self {
        Self { setup_time_min }
    }

    /// Total working hours the operation requires.
    ///
    /// # Rules
    /// - (op_time_min * quantity + setup_time_min) / 60
    /// - `None` when per-unit time or quantity is not positive; the
    ///   caller skips the operation with a warning, never aborts
    pub fn required_hours(&self, op_time_min: i32, quantity: u32) -> Option<f64> {
        if op_time_min <= 0 || quantity == 0 {
            return None;
        }
        let total_min = op_time_min as i64 * quantity as i64 + self.setup_time_min;
        Some(total_min as f64 / 60.0)
    }

    /// Whole working days the operation occupies, rounded up against
    /// the full-day length. A quick order-form estimate; the builder
    /// derives the committed figure from actual placement.
    pub fn required_work_days(&self, op_time_min: i32, quantity: u32) -> Option<i64> {
        if op_time_min <= 0 || quantity == 0 {
            return None;
        }
        let total_min = op_time_min as i64 * quantity as i64 + self.setup_time_min;
        Some((total_min + WORKING_DAY_MINUTES - 1) / WORKING_DAY_MINUTES)
    }
}
