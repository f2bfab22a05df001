// ==========================================
// Machine Shop APS - Capability Matcher
// ==========================================
// Red line: stateless, no side effects, no calendar dependency.
// ==========================================

use crate::domain::{Machine, Operation};

// ==========================================
// CapabilityMatcher - pure eligibility rule
// ==========================================
pub struct CapabilityMatcher;

impl CapabilityMatcher {
    /// Whether the machine can perform the operation.
    ///
    /// # Rules
    /// 1. an operation without an axis tag is never performable
    /// 2. eligible iff some machine capability tag occurs in the
    ///    operation's axis tag ("3-axis" matches a machine declaring
    ///    "3-axis", and also one declaring the shorthand "3-axis" as
    ///    part of a composite tag)
    pub fn can_perform(machine: &Machine, operation: &Operation) -> bool {
        if operation.op_axes.is_empty() {
            return false;
        }
        machine
            .types
            .iter()
            .any(|tag| operation.op_axes.contains(tag.as_str()))
    }

    /// Machines from `machines` eligible for the operation, in input
    /// order (the deterministic tie-break order of the builder).
    pub fn eligible_machines<'a>(
        machines: &'a [Machine],
        operation: &Operation,
    ) -> Vec<&'a Machine> {
        machines
            .iter()
            .filter(|m| Self::can_perform(m, operation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn machine(types: &[&str]) -> Machine {
        Machine::new(
            1,
            "M1",
            NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            types.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_exact_tag_match() {
        let m = machine(&["3-axis"]);
        assert!(CapabilityMatcher::can_perform(
            &m,
            &Operation::new(1, 60, "3-axis")
        ));
    }

    #[test]
    fn test_no_match() {
        let m = machine(&["4-axis"]);
        assert!(!CapabilityMatcher::can_perform(
            &m,
            &Operation::new(1, 60, "lathe")
        ));
    }

    #[test]
    fn test_empty_axes_never_performable() {
        let m = machine(&["3-axis", "lathe"]);
        assert!(!CapabilityMatcher::can_perform(&m, &Operation::new(1, 60, "")));
    }

    #[test]
    fn test_containment_semantics() {
        // A machine declaring the bare "lathe" tag matches a more
        // specific operation tag that contains it
        let m = machine(&["lathe"]);
        assert!(CapabilityMatcher::can_perform(
            &m,
            &Operation::new(1, 60, "cnc-lathe")
        ));
    }

    #[test]
    fn test_eligible_machines_preserves_input_order() {
        let machines = vec![
            Machine { id: 1, ..machine(&["lathe"]) },
            Machine { id: 2, ..machine(&["3-axis"]) },
            Machine { id: 3, ..machine(&["3-axis", "lathe"]) },
        ];
        let op = Operation::new(1, 60, "3-axis");
        let eligible = CapabilityMatcher::eligible_machines(&machines, &op);
        let ids: Vec<i64> = eligible.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
