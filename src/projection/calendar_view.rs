// ==========================================
// Machine Shop APS - Calendar Projection
// ==========================================
// Per-machine day grids over a date window: which operations occupy
// each day, which days are weekends, holidays or half days. Purely
// derived from a schedule and the working calendar; nothing here
// feeds back into placement.
// ==========================================

use crate::calendar::WorkCalendar;
use crate::domain::{MachineSchedule, ScheduledOperation};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

// ==========================================
// View types
// ==========================================

/// One day cell of a machine calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_half_day: bool,
    /// Operations occupying this day on the calendar's machine.
    pub operations: Vec<ScheduledOperation>,
}

/// Day grid of a single machine over the projection window.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineCalendar {
    pub machine_id: i64,
    pub machine_name: String,
    pub days: Vec<CalendarDay>,
}

// ==========================================
// CalendarProjector
// ==========================================

pub struct CalendarProjector {
    calendar: Arc<WorkCalendar>,
}

impl CalendarProjector {
    pub fn new(calendar: Arc<WorkCalendar>) -> Self {
        Self { calendar }
    }

    /// Day grid for one machine over `[start, end]` inclusive. An
    /// operation occupies every calendar day its `[start, end]` span
    /// touches, non-working days included.
    pub fn build_machine_calendar(
        &self,
        schedule: &MachineSchedule,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MachineCalendar {
        let days = self
            .window(start, end)
            .map(|date| {
                let operations: Vec<ScheduledOperation> = schedule
                    .operations
                    .iter()
                    .filter(|op| date >= op.start.date() && date <= op.end.date())
                    .cloned()
                    .collect();
                self.day_cell(date, operations)
            })
            .collect();

        MachineCalendar {
            machine_id: schedule.machine_id,
            machine_name: schedule.machine_name.clone(),
            days,
        }
    }

    /// One grid per machine, same window for all.
    pub fn build_all(
        &self,
        schedules: &[MachineSchedule],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<MachineCalendar> {
        schedules
            .iter()
            .map(|s| self.build_machine_calendar(s, start, end))
            .collect()
    }

    /// Collapse several machine grids (same window) into one combined
    /// grid carrying the union of operations per day. The "all
    /// machines" view.
    pub fn merge_calendars(&self, calendars: &[MachineCalendar]) -> Vec<CalendarDay> {
        let Some(first) = calendars.first() else {
            return Vec::new();
        };

        first
            .days
            .iter()
            .enumerate()
            .map(|(idx, day)| {
                let mut merged = day.clone();
                for other in &calendars[1..] {
                    if let Some(other_day) = other.days.get(idx) {
                        merged.operations.extend(other_day.operations.iter().cloned());
                    }
                }
                merged
            })
            .collect()
    }

    /// Bucket a day grid by month, keyed "YYYY-MM". BTreeMap keeps
    /// the months in chronological order.
    pub fn group_by_month(days: &[CalendarDay]) -> BTreeMap<String, Vec<CalendarDay>> {
        let mut months: BTreeMap<String, Vec<CalendarDay>> = BTreeMap::new();
        for day in days {
            months
                .entry(day.date.format("%Y-%m").to_string())
                .or_default()
                .push(day.clone());
        }
        months
    }

    fn day_cell(&self, date: NaiveDate, operations: Vec<ScheduledOperation>) -> CalendarDay {
        let holiday = self.calendar.holiday(date);
        CalendarDay {
            date,
            is_weekend: self.calendar.is_weekend(date),
            is_holiday: holiday.map(|h| h.is_full_day).unwrap_or(false),
            is_half_day: self.calendar.is_half_working_day(date),
            operations,
        }
    }

    fn window(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        start.iter_days().take_while(move |d| *d <= end)
    }
}
