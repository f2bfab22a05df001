// ==========================================
// Machine Shop APS - Schedule Builder
// ==========================================
// Greedy earliest-finish-time assignment: orders by priority and
// deadline, operations in sequence, each operation on the eligible
// machine that completes it soonest.
// ==========================================
// Red line: single-pass batch computation. No I/O, no hidden state,
// inputs are never mutated; results come back as fresh structures.
// ==========================================

use crate::calendar::WorkCalendar;
use crate::config::ScheduleConfig;
use crate::domain::{
    Machine, MachineSchedule, Operation, Order, OrderScheduleResult, ScheduledOperation,
    SkipReason, SkippedOperation,
};
use crate::engine::capability::CapabilityMatcher;
use crate::engine::duration::DurationEstimator;
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// ScheduleOutcome - calculation result
// ==========================================

/// Complete result of one calculation run. Transient: nothing is
/// persisted unless the caller commits assignments back through the
/// order store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    /// One schedule per input machine, operations sorted by start.
    pub machine_schedules: Vec<MachineSchedule>,
    /// Per-order verdicts, in processing order.
    pub order_results: Vec<OrderScheduleResult>,
    /// Operations left unassigned, with reasons.
    pub skipped: Vec<SkippedOperation>,
}

impl ScheduleOutcome {
    pub fn result_for(&self, order_id: i64) -> Option<&OrderScheduleResult> {
        self.order_results.iter().find(|r| r.order_id == order_id)
    }

    /// All scheduled operations of one order, in op_number order.
    pub fn operations_for_order(&self, order_id: i64) -> Vec<&ScheduledOperation> {
        let mut ops: Vec<&ScheduledOperation> = self
            .machine_schedules
            .iter()
            .flat_map(|s| s.operations.iter())
            .filter(|op| op.order_id == order_id)
            .collect();
        ops.sort_by_key(|op| op.op_number);
        ops
    }

    /// Merge assignments and derived fields into copies of the input
    /// orders - the persistence-facing export. Operations that were
    /// skipped keep their previous assignment fields untouched, so
    /// callers can detect them as unassigned.
    pub fn apply_to_orders(&self, orders: &[Order]) -> Vec<Order> {
        orders
            .iter()
            .map(|order| {
                let mut updated = order.clone();

                for scheduled in self.operations_for_order(order.id) {
                    if let Some(op) = updated
                        .operations
                        .iter_mut()
                        .find(|op| op.op_number == scheduled.op_number)
                    {
                        op.assigned_machine = Some(scheduled.machine_name.clone());
                        op.machine_id = Some(scheduled.machine_id);
                        op.start_date = Some(scheduled.start);
                        op.end_date = Some(scheduled.end);
                        op.is_initially_planned = true;
                    }
                }

                if let Some(result) = self.result_for(order.id) {
                    updated.will_meet_deadline = result.will_meet_deadline;
                    updated.estimated_completion = result.estimated_completion;
                    updated.estimated_workdays = result.estimated_workdays;
                    updated.revised_deadline = result.revised_deadline;
                }

                updated
            })
            .collect()
    }
}

// ==========================================
// ScheduleBuilder
// ==========================================

pub struct ScheduleBuilder {
    calendar: Arc<WorkCalendar>,
    estimator: DurationEstimator,
}

impl ScheduleBuilder {
    /// # Parameters
    /// - calendar: immutable working-calendar snapshot covering the
    ///   scheduling horizon
    /// - config: scheduling tunables (setup overhead)
    pub fn new(calendar: Arc<WorkCalendar>, config: &ScheduleConfig) -> Self {
        Self {
            calendar,
            estimator: DurationEstimator::new(config.setup_time_min),
        }
    }

    /// Compute a schedule for the given snapshot of orders and
    /// machines.
    ///
    /// # Rules
    /// 1. calculation start = requested start advanced to the next
    ///    working day, snapped to the work start hour
    /// 2. each machine starts at max(release date, calculation start)
    /// 3. orders processed by priority desc, deadline asc
    /// 4. operations within an order strictly in op_number sequence;
    ///    each goes to the eligible machine with the earliest finish
    ///    (first machine wins ties), never starting before its
    ///    predecessor's end
    /// 5. an order whose last operation finishes after its deadline
    ///    receives a revised deadline - an advisory, not an error
    ///
    /// Unschedulable operations (no eligible machine, non-positive
    /// duration) are skipped with a diagnostic; nothing aborts the
    /// batch. Empty order or machine lists are valid degenerate
    /// inputs. Identical input snapshots yield identical results.
    pub fn calculate_schedule(
        &self,
        orders: &[Order],
        machines: &[Machine],
        requested_start: NaiveDateTime,
    ) -> ScheduleOutcome {
        // ==========================================
        // Step 1: calculation start
        // ==========================================
        let mut start_day = requested_start;
        while self.calendar.is_non_working_day(start_day.date()) {
            start_day += Duration::days(1);
        }
        let calculation_start = WorkCalendar::work_start(start_day.date());

        info!(
            orders = orders.len(),
            machines = machines.len(),
            %calculation_start,
            "schedule calculation started"
        );

        // ==========================================
        // Step 2: one schedule per machine
        // ==========================================
        let mut schedules: Vec<MachineSchedule> = machines
            .iter()
            .map(|m| MachineSchedule {
                machine_id: m.id,
                machine_name: m.name.clone(),
                release_date: m.release_date.max(calculation_start),
                operations: Vec::new(),
            })
            .collect();

        // ==========================================
        // Step 3: order work list, priority desc / deadline asc
        // ==========================================
        let mut work_list: Vec<&Order> = orders.iter().collect();
        work_list.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.deadline.cmp(&b.deadline))
        });

        let mut order_results = Vec::new();
        let mut skipped = Vec::new();

        // ==========================================
        // Step 4: place operations order by order
        // ==========================================
        for order in work_list {
            if order.operations.is_empty() {
                debug!(order_id = order.id, "order has no operations, skipping");
                continue;
            }

            debug!(
                order_id = order.id,
                blueprint = %order.blueprint_number,
                priority = order.priority,
                deadline = %order.deadline,
                "processing order"
            );

            let mut operations: Vec<&Operation> = order.operations.iter().collect();
            operations.sort_by_key(|op| op.op_number);

            let mut predecessor_end: Option<NaiveDateTime> = None;
            let mut first_start: Option<NaiveDateTime> = None;

            for operation in operations {
                // Eligibility; schedules[i] mirrors machines[i]
                let eligible: Vec<usize> = machines
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| CapabilityMatcher::can_perform(m, operation))
                    .map(|(i, _)| i)
                    .collect();
                if eligible.is_empty() {
                    warn!(
                        order_id = order.id,
                        op_number = operation.op_number,
                        op_axes = %operation.op_axes,
                        "no eligible machine for operation, leaving unassigned"
                    );
                    skipped.push(SkippedOperation {
                        order_id: order.id,
                        blueprint_number: order.blueprint_number.clone(),
                        op_number: operation.op_number,
                        reason: SkipReason::NoEligibleMachine,
                    });
                    continue;
                }

                // Duration
                let hours = match self
                    .estimator
                    .required_hours(operation.op_time_min, order.quantity)
                {
                    Some(h) => h,
                    None => {
                        warn!(
                            order_id = order.id,
                            op_number = operation.op_number,
                            op_time_min = operation.op_time_min,
                            quantity = order.quantity,
                            "non-positive operation duration, leaving unassigned"
                        );
                        skipped.push(SkippedOperation {
                            order_id: order.id,
                            blueprint_number: order.blueprint_number.clone(),
                            op_number: operation.op_number,
                            reason: SkipReason::NonPositiveDuration,
                        });
                        continue;
                    }
                };

                // Earliest-finish machine; the first eligible machine
                // wins ties, so iteration order decides deterministically
                let mut best: Option<(usize, NaiveDateTime, NaiveDateTime)> = None;
                for index in eligible {
                    let (start, end) = self.candidate_window(
                        &schedules[index],
                        calculation_start,
                        predecessor_end,
                        hours,
                    );

                    match best {
                        Some((_, _, best_end)) if end >= best_end => {}
                        _ => best = Some((index, start, end)),
                    }
                }

                let Some((index, start, end)) = best else {
                    continue;
                };

                let machine_id = schedules[index].machine_id;
                let machine_name = schedules[index].machine_name.clone();

                debug!(
                    order_id = order.id,
                    op_number = operation.op_number,
                    machine = %machine_name,
                    %start,
                    %end,
                    "operation assigned"
                );

                // Record the assignment; machine availability only
                // moves forward
                schedules[index].operations.push(ScheduledOperation {
                    order_id: order.id,
                    blueprint_number: order.blueprint_number.clone(),
                    op_number: operation.op_number,
                    op_time_min: operation.op_time_min,
                    op_axes: operation.op_axes.clone(),
                    quantity: order.quantity,
                    deadline: order.deadline,
                    machine_id,
                    machine_name,
                    start,
                    end,
                });
                schedules[index].release_date = end;

                first_start.get_or_insert(start);
                predecessor_end = Some(end);
            }

            // Deadline verdict
            let will_meet = match predecessor_end {
                Some(end) => end <= order.deadline,
                None => true,
            };
            let estimated_workdays = match (first_start, predecessor_end) {
                (Some(first), Some(last)) => Some(
                    self.calendar
                        .working_days_between(first.date(), last.date())
                        .ceil() as i64,
                ),
                _ => None,
            };

            if let (false, Some(completion)) = (will_meet, predecessor_end) {
                warn!(
                    order_id = order.id,
                    blueprint = %order.blueprint_number,
                    deadline = %order.deadline,
                    %completion,
                    "order misses its deadline, revised deadline set"
                );
            }

            order_results.push(OrderScheduleResult {
                order_id: order.id,
                will_meet_deadline: will_meet,
                estimated_completion: predecessor_end,
                estimated_workdays,
                revised_deadline: if will_meet { None } else { predecessor_end },
            });
        }

        // ==========================================
        // Step 5: per-machine operations sorted by start
        // ==========================================
        for schedule in &mut schedules {
            schedule.operations.sort_by_key(|op| op.start);
        }

        info!(
            assigned = schedules.iter().map(|s| s.operations.len()).sum::<usize>(),
            skipped = skipped.len(),
            late_orders = order_results
                .iter()
                .filter(|r| !r.will_meet_deadline)
                .count(),
            "schedule calculation finished"
        );

        ScheduleOutcome {
            machine_schedules: schedules,
            order_results,
            skipped,
        }
    }

    /// Candidate time window on one machine: start at the later of
    /// machine availability, calculation start and predecessor end,
    /// advanced past non-working days; end after the required hours.
    fn candidate_window(
        &self,
        schedule: &MachineSchedule,
        calculation_start: NaiveDateTime,
        predecessor_end: Option<NaiveDateTime>,
        hours: f64,
    ) -> (NaiveDateTime, NaiveDateTime) {
        let mut start = schedule.release_date.max(calculation_start);
        if let Some(end) = predecessor_end {
            start = start.max(end);
        }
        let start = self.calendar.advance_to_next_work_start(start);
        let end = self.calendar.add_working_hours(start, hours);
        (start, end)
    }
}
