// ==========================================
// Machine Shop APS - Projection Layer
// ==========================================
// Read-only views over computed schedules: calendar day grids and
// Gantt lanes. Projections never influence placement.
// ==========================================

pub mod calendar_view;
pub mod gantt;

pub use calendar_view::{CalendarDay, CalendarProjector, MachineCalendar};
pub use gantt::{GanttBar, GanttProjector, MachineLane, MonthSpan, NonWorkingDayMarker};
