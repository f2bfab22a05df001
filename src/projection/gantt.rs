// ==========================================
// Machine Shop APS - Gantt Projection
// ==========================================
// Machine lanes of day-indexed bars over a projection window, plus a
// month scale and non-working-day markers for the timeline header.
// Day indices count calendar days from the window start; rendering
// concerns like pixel widths stay with the presentation layer.
// ==========================================

use crate::calendar::WorkCalendar;
use crate::config::ScheduleConfig;
use crate::domain::{DeadlineStatus, MachineSchedule};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

// ==========================================
// View types
// ==========================================

/// One operation bar on a machine lane.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttBar {
    pub order_id: i64,
    pub blueprint_number: String,
    pub op_number: i32,
    pub quantity: u32,
    pub deadline: NaiveDateTime,
    /// Day index of the bar's first day, clamped to the window start.
    pub start_day: i64,
    /// Day index of the bar's last day.
    pub end_day: i64,
    /// Bar length in days, at least 1.
    pub duration_days: i64,
    pub deadline_status: DeadlineStatus,
}

/// All bars of one machine, in start order.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineLane {
    pub machine_id: i64,
    pub machine_name: String,
    pub bars: Vec<GanttBar>,
}

/// One month of the timeline header, keyed "YYYY-MM".
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSpan {
    pub month: String,
    /// Window days falling inside the month.
    pub days: i64,
}

/// A weekend, holiday or half day inside the window.
#[derive(Debug, Clone, PartialEq)]
pub struct NonWorkingDayMarker {
    pub date: NaiveDate,
    pub day_index: i64,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_half_day: bool,
}

// ==========================================
// GanttProjector
// ==========================================

pub struct GanttProjector {
    calendar: Arc<WorkCalendar>,
    near_deadline_days: i64,
}

impl GanttProjector {
    pub fn new(calendar: Arc<WorkCalendar>, config: &ScheduleConfig) -> Self {
        Self {
            calendar,
            near_deadline_days: config.near_deadline_days,
        }
    }

    /// Deadline verdict of a single bar.
    ///
    /// # Rules
    /// - completion after the deadline: overdue
    /// - otherwise, completion within the warning window of the
    ///   deadline: near deadline
    /// - otherwise: on time
    pub fn deadline_status(&self, end: NaiveDateTime, deadline: NaiveDateTime) -> DeadlineStatus {
        if end > deadline {
            DeadlineStatus::Overdue
        } else if (deadline - end).num_days() <= self.near_deadline_days {
            DeadlineStatus::NearDeadline
        } else {
            DeadlineStatus::OnTime
        }
    }

    /// One lane per machine schedule. Bars ending before the window
    /// start are dropped; bars starting before it are clamped to day
    /// index 0.
    pub fn build_lanes(
        &self,
        schedules: &[MachineSchedule],
        window_start: NaiveDate,
    ) -> Vec<MachineLane> {
        schedules
            .iter()
            .map(|schedule| MachineLane {
                machine_id: schedule.machine_id,
                machine_name: schedule.machine_name.clone(),
                bars: schedule
                    .operations
                    .iter()
                    .filter_map(|op| {
                        let end_day = (op.end.date() - window_start).num_days();
                        if end_day < 0 {
                            return None;
                        }
                        let start_day =
                            (op.start.date() - window_start).num_days().max(0);
                        Some(GanttBar {
                            order_id: op.order_id,
                            blueprint_number: op.blueprint_number.clone(),
                            op_number: op.op_number,
                            quantity: op.quantity,
                            deadline: op.deadline,
                            start_day,
                            end_day,
                            duration_days: (end_day - start_day + 1).max(1),
                            deadline_status: self.deadline_status(op.end, op.deadline),
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    /// Month header over `[start, end]` inclusive: each month touched
    /// by the window with the count of window days inside it, in
    /// chronological order.
    pub fn month_scale(&self, start: NaiveDate, end: NaiveDate) -> Vec<MonthSpan> {
        let mut months: Vec<MonthSpan> = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            let key = date.format("%Y-%m").to_string();
            match months.last_mut() {
                Some(span) if span.month == key => span.days += 1,
                _ => months.push(MonthSpan { month: key, days: 1 }),
            }
        }
        months
    }

    /// Weekend, holiday and half-day markers over `[start, end]`
    /// inclusive, with their day indices from the window start.
    pub fn non_working_days(&self, start: NaiveDate, end: NaiveDate) -> Vec<NonWorkingDayMarker> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter_map(|date| {
                let is_weekend = self.calendar.is_weekend(date);
                let is_holiday = self
                    .calendar
                    .holiday(date)
                    .map(|h| h.is_full_day)
                    .unwrap_or(false);
                let is_half_day = self.calendar.is_half_working_day(date);
                if !(is_weekend || is_holiday || is_half_day) {
                    return None;
                }
                Some(NonWorkingDayMarker {
                    date,
                    day_index: (date - start).num_days(),
                    is_weekend,
                    is_holiday,
                    is_half_day,
                })
            })
            .collect()
    }
}
