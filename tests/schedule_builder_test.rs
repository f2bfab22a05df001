// ==========================================
// ScheduleBuilder integration tests
// ==========================================
// Target: greedy earliest-finish placement end to end
// Coverage: ordering, machine choice, precedence, skips, deadline
// verdicts, determinism, input immutability
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use machine_shop_aps::calendar::{HolidayInfo, WorkCalendar};
use machine_shop_aps::config::ScheduleConfig;
use machine_shop_aps::domain::{Machine, Operation, Order, SkipReason};
use machine_shop_aps::engine::ScheduleBuilder;
use std::sync::Arc;

// ==========================================
// Test helpers
// ==========================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// Machine available from Monday 2025-06-02 08:00.
fn machine(id: i64, name: &str, types: &[&str]) -> Machine {
    Machine::new(
        id,
        name,
        at(2025, 6, 2, 8, 0),
        types.iter().map(|t| t.to_string()).collect(),
    )
}

fn order(id: i64, priority: i32, deadline: NaiveDateTime, ops: Vec<Operation>) -> Order {
    Order::new(id, format!("BP-{id}"), 10, deadline, priority).with_operations(ops)
}

/// Builder over a plain calendar (weekends only, default setup 480).
fn plain_builder() -> ScheduleBuilder {
    ScheduleBuilder::new(
        Arc::new(WorkCalendar::default()),
        &ScheduleConfig::default(),
    )
}

/// June 2025 with Wed 4 declared a half day and Thu 5 a full holiday.
fn holiday_calendar() -> WorkCalendar {
    WorkCalendar::from_holidays(vec![
        HolidayInfo::eve(date(2025, 6, 4), "Holiday Eve"),
        HolidayInfo::full_day(date(2025, 6, 5), "Holiday"),
    ])
}

// ==========================================
// Sequential placement within one order
// ==========================================

#[test]
fn test_single_order_two_operations_in_sequence() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    // op1: 60 x 10 + 480 = 18h, op2: 30 x 10 + 480 = 13h
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 60, "3-axis"), Operation::new(2, 30, "3-axis")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    let ops = outcome.operations_for_order(1);
    assert_eq!(ops.len(), 2);
    // 18h from Monday 08:00: 16h Monday + 2h Tuesday
    assert_eq!(ops[0].start, at(2025, 6, 2, 8, 0));
    assert_eq!(ops[0].end, at(2025, 6, 3, 10, 0));
    // op2 starts exactly at op1's end, 13h fits the rest of Tuesday
    assert_eq!(ops[1].start, at(2025, 6, 3, 10, 0));
    assert_eq!(ops[1].end, at(2025, 6, 3, 23, 0));

    let result = outcome.result_for(1).unwrap();
    assert!(result.will_meet_deadline);
    assert_eq!(result.estimated_completion, Some(at(2025, 6, 3, 23, 0)));
    assert_eq!(result.estimated_workdays, Some(2));
    assert!(result.revised_deadline.is_none());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_operations_processed_by_op_number_not_input_order() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    // op 2 listed before op 1
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(2, 30, "3-axis"), Operation::new(1, 60, "3-axis")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    let ops = outcome.operations_for_order(1);
    assert_eq!(ops[0].op_number, 1);
    assert_eq!(ops[1].op_number, 2);
    assert!(ops[0].end <= ops[1].start);
}

// ==========================================
// Machine choice
// ==========================================

#[test]
fn test_earliest_finish_picks_free_machine() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"]), machine(2, "M2", &["3-axis"])];
    // two 16h single-op orders; the second must land on the idle M2
    let orders = vec![
        order(1, 5, at(2025, 6, 30, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
        order(2, 1, at(2025, 6, 30, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
    ];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    let first = outcome.operations_for_order(1);
    let second = outcome.operations_for_order(2);
    assert_eq!(first[0].machine_id, 1);
    assert_eq!(second[0].machine_id, 2);
    // both fill Monday completely
    assert_eq!(first[0].end, at(2025, 6, 3, 0, 0));
    assert_eq!(second[0].end, at(2025, 6, 3, 0, 0));
}

#[test]
fn test_tie_broken_by_input_order() {
    let builder = plain_builder();
    let machines = vec![machine(7, "M7", &["lathe"]), machine(3, "M3", &["lathe"])];
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 48, "lathe")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    // both machines finish at the same instant; the first listed wins
    assert_eq!(outcome.operations_for_order(1)[0].machine_id, 7);
}

#[test]
fn test_capability_restricts_assignment() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["lathe"]), machine(2, "M2", &["3-axis"])];
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 48, "3-axis"), Operation::new(2, 48, "lathe")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    let ops = outcome.operations_for_order(1);
    assert_eq!(ops[0].machine_id, 2);
    assert_eq!(ops[1].machine_id, 1);
    // cross-machine precedence still holds
    assert!(ops[0].end <= ops[1].start);
}

// ==========================================
// Order ranking and deadline verdicts
// ==========================================

#[test]
fn test_priority_beats_deadline_and_late_order_gets_revised_deadline() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    // the low-priority order has the earlier deadline but yields the machine
    let orders = vec![
        order(1, 1, at(2025, 6, 2, 20, 0), vec![Operation::new(1, 48, "3-axis")]),
        order(2, 5, at(2025, 6, 30, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
    ];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    // high priority takes Monday, low priority queues behind it; the
    // machine closes Monday at midnight and Tuesday is a working day,
    // so the raw availability timestamp is recorded as the start
    assert_eq!(outcome.operations_for_order(2)[0].start, at(2025, 6, 2, 8, 0));
    assert_eq!(outcome.operations_for_order(1)[0].start, at(2025, 6, 3, 0, 0));

    let late = outcome.result_for(1).unwrap();
    assert!(!late.will_meet_deadline);
    assert_eq!(late.revised_deadline, Some(at(2025, 6, 4, 0, 0)));

    let on_time = outcome.result_for(2).unwrap();
    assert!(on_time.will_meet_deadline);
    assert!(on_time.revised_deadline.is_none());
}

#[test]
fn test_equal_priority_ranked_by_deadline() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    let orders = vec![
        order(1, 3, at(2025, 6, 20, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
        order(2, 3, at(2025, 6, 10, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
    ];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    // the tighter deadline goes first; the queued order picks up at
    // the machine's midnight close of Monday
    assert_eq!(outcome.operations_for_order(2)[0].start, at(2025, 6, 2, 8, 0));
    assert_eq!(outcome.operations_for_order(1)[0].start, at(2025, 6, 3, 0, 0));
}

// ==========================================
// Calendar interaction
// ==========================================

#[test]
fn test_requested_start_on_weekend_snaps_to_sunday_morning() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 48, "3-axis")],
    )];

    // Saturday afternoon request
    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 7, 15, 30));

    assert_eq!(outcome.operations_for_order(1)[0].start, at(2025, 6, 8, 8, 0));
}

#[test]
fn test_machine_release_after_calculation_start_is_respected() {
    let builder = plain_builder();
    let mut late_machine = machine(1, "M1", &["3-axis"]);
    late_machine.release_date = at(2025, 6, 3, 12, 0);
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 48, "3-axis")],
    )];

    let outcome = builder.calculate_schedule(&orders, &[late_machine], at(2025, 6, 2, 8, 0));

    assert_eq!(outcome.operations_for_order(1)[0].start, at(2025, 6, 3, 12, 0));
}

#[test]
fn test_midnight_close_before_weekend_starts_successor_on_sunday() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    // two 16h orders from Thursday: the first closes the machine at
    // Friday 00:00, which is weekend territory
    let orders = vec![
        order(1, 5, at(2025, 6, 30, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
        order(2, 1, at(2025, 6, 30, 0, 0), vec![Operation::new(1, 48, "3-axis")]),
    ];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 5, 8, 0));

    assert_eq!(outcome.operations_for_order(1)[0].end, at(2025, 6, 6, 0, 0));
    // the successor never starts inside the weekend
    let queued = outcome.operations_for_order(2)[0].clone();
    assert_eq!(queued.start, at(2025, 6, 8, 8, 0));
    assert_eq!(queued.end, at(2025, 6, 9, 0, 0));
}

#[test]
fn test_operation_spans_half_day_holiday_and_weekend() {
    let builder = ScheduleBuilder::new(
        Arc::new(holiday_calendar()),
        &ScheduleConfig {
            setup_time_min: 0,
            near_deadline_days: 7,
        },
    );
    let machines = vec![machine(1, "M1", &["3-axis"])];
    // 42 x 10 = 420 min = 7h starting on the half day: 5h Wednesday,
    // Thursday holiday and Friday/Saturday skipped, 2h Sunday
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 42, "3-axis")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 4, 8, 0));

    let ops = outcome.operations_for_order(1);
    assert_eq!(ops[0].start, at(2025, 6, 4, 8, 0));
    assert_eq!(ops[0].end, at(2025, 6, 8, 10, 0));
}

// ==========================================
// Skips and degenerate inputs
// ==========================================

#[test]
fn test_no_eligible_machine_skips_operation_but_not_order() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 60, "5-axis"), Operation::new(2, 48, "3-axis")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].op_number, 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::NoEligibleMachine);

    // op 2 still scheduled, from the machine's availability
    let ops = outcome.operations_for_order(1);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].op_number, 2);
    assert_eq!(ops[0].start, at(2025, 6, 2, 8, 0));
}

#[test]
fn test_non_positive_duration_skips_operation() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 0, "3-axis")],
    )];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::NonPositiveDuration);
    assert!(outcome.operations_for_order(1).is_empty());

    // nothing was placed, so the verdict stays optimistic
    let result = outcome.result_for(1).unwrap();
    assert!(result.will_meet_deadline);
    assert!(result.estimated_completion.is_none());
}

#[test]
fn test_order_without_operations_produces_no_result() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    let orders = vec![order(1, 1, at(2025, 6, 30, 0, 0), vec![])];

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    assert!(outcome.result_for(1).is_none());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_empty_inputs_yield_empty_outcome() {
    let builder = plain_builder();

    let outcome = builder.calculate_schedule(&[], &[], at(2025, 6, 2, 8, 0));
    assert!(outcome.machine_schedules.is_empty());
    assert!(outcome.order_results.is_empty());
    assert!(outcome.skipped.is_empty());

    // orders but no machines: everything skipped, nothing lost
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 30, 0, 0),
        vec![Operation::new(1, 60, "3-axis")],
    )];
    let outcome = builder.calculate_schedule(&orders, &[], at(2025, 6, 2, 8, 0));
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::NoEligibleMachine);
}

// ==========================================
// No overlap per machine
// ==========================================

#[test]
fn test_machine_operations_never_overlap() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"]), machine(2, "M2", &["3-axis"])];
    let orders: Vec<Order> = (1..=5)
        .map(|id| {
            order(
                id,
                (id % 3) as i32,
                at(2025, 7, 15, 0, 0),
                vec![Operation::new(1, 30, "3-axis"), Operation::new(2, 45, "3-axis")],
            )
        })
        .collect();

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));

    for schedule in &outcome.machine_schedules {
        for pair in schedule.operations.windows(2) {
            assert!(
                pair[0].end <= pair[1].start,
                "overlap on {}: {} .. {} vs {} .. {}",
                schedule.machine_name,
                pair[0].start,
                pair[0].end,
                pair[1].start,
                pair[1].end
            );
        }
    }
}

// ==========================================
// Determinism and input immutability
// ==========================================

#[test]
fn test_identical_inputs_give_identical_outcomes() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"]), machine(2, "M2", &["3-axis"])];
    let orders = vec![
        order(1, 2, at(2025, 6, 20, 0, 0), vec![Operation::new(1, 60, "3-axis")]),
        order(2, 2, at(2025, 6, 25, 0, 0), vec![Operation::new(1, 30, "3-axis")]),
    ];

    let first = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));
    let second = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));
    assert_eq!(first, second);
}

#[test]
fn test_inputs_not_mutated_and_apply_merges_assignments() {
    let builder = plain_builder();
    let machines = vec![machine(1, "M1", &["3-axis"])];
    let orders = vec![order(
        1,
        1,
        at(2025, 6, 2, 12, 0),
        vec![Operation::new(1, 60, "3-axis"), Operation::new(2, 60, "5-axis")],
    )];
    let snapshot = orders.clone();

    let outcome = builder.calculate_schedule(&orders, &machines, at(2025, 6, 2, 8, 0));
    assert_eq!(orders, snapshot);

    let applied = outcome.apply_to_orders(&orders);
    assert_eq!(orders, snapshot);

    let op1 = &applied[0].operations[0];
    assert_eq!(op1.assigned_machine.as_deref(), Some("M1"));
    assert_eq!(op1.machine_id, Some(1));
    assert_eq!(op1.start_date, Some(at(2025, 6, 2, 8, 0)));
    assert_eq!(op1.end_date, Some(at(2025, 6, 3, 10, 0)));
    assert!(op1.is_initially_planned);

    // the skipped op keeps its unassigned state
    let op2 = &applied[0].operations[1];
    assert!(op2.assigned_machine.is_none());
    assert!(!op2.is_initially_planned);

    // order-level derived fields merged: 18h blows the noon deadline
    assert!(!applied[0].will_meet_deadline);
    assert_eq!(applied[0].estimated_completion, Some(at(2025, 6, 3, 10, 0)));
    assert_eq!(applied[0].revised_deadline, Some(at(2025, 6, 3, 10, 0)));
}
