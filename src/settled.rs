//! Which steps of a plan have already been paid.
//!
//! This is view state, not engine state: a fresh `SettledMarks` belongs to
//! every freshly computed plan.

use std::collections::HashSet;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::schemas::SettlementStep;

/// Stable identity of a settlement step, derived from who pays whom and how
/// much (in cents).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepKey([u8; 32]);

impl StepKey {
    pub fn of(step: &SettlementStep) -> Self {
        let cents = (step.amount * 100.0).round() as i64;
        let mut hasher = Sha256::new();
        hasher.update(step.from_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(step.to_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(cents.to_be_bytes());

        let mut key = [0u8; 32];
        key.copy_from_slice(&hasher.finalize());
        StepKey(key)
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SettledMarks {
    settled: HashSet<StepKey>,
}

impl SettledMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the mark on `step` and returns whether it is now settled.
    pub fn toggle(&mut self, step: &SettlementStep) -> bool {
        let key = StepKey::of(step);
        if self.settled.remove(&key) {
            false
        } else {
            self.settled.insert(key);
            true
        }
    }

    pub fn is_settled(&self, step: &SettlementStep) -> bool {
        self.settled.contains(&StepKey::of(step))
    }

    pub fn outstanding<'a>(
        &'a self,
        steps: &'a [SettlementStep],
    ) -> impl Iterator<Item = &'a SettlementStep> + 'a {
        steps.iter().filter(move |step| !self.is_settled(step))
    }

    pub fn outstanding_total(&self, steps: &[SettlementStep]) -> f64 {
        self.outstanding(steps).map(|step| step.amount).sum()
    }

    pub fn clear(&mut self) {
        self.settled.clear();
    }

    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str, amount: f64) -> SettlementStep {
        SettlementStep {
            from_name: from.to_string(),
            to_name: to.to_string(),
            amount,
            is_couple_transfer: false,
        }
    }

    #[test]
    fn key_is_stable_and_distinguishes_steps() {
        assert_eq!(StepKey::of(&step("B", "A", 50.0)), StepKey::of(&step("B", "A", 50.0)));
        assert_ne!(StepKey::of(&step("B", "A", 50.0)), StepKey::of(&step("A", "B", 50.0)));
        assert_ne!(StepKey::of(&step("B", "A", 50.0)), StepKey::of(&step("B", "A", 50.01)));
        assert_ne!(StepKey::of(&step("AB", "C", 1.0)), StepKey::of(&step("A", "BC", 1.0)));
    }

    #[test]
    fn toggle_marks_and_unmarks() {
        let plan = vec![step("B", "A", 50.0), step("C", "A", 20.0)];
        let mut marks = SettledMarks::new();

        assert!(marks.toggle(&plan[0]));
        assert!(marks.is_settled(&plan[0]));
        assert!(!marks.is_settled(&plan[1]));
        assert_eq!(marks.outstanding(&plan).count(), 1);
        assert_eq!(marks.outstanding_total(&plan), 20.0);

        assert!(!marks.toggle(&plan[0]));
        assert!(marks.is_empty());
        assert_eq!(marks.outstanding_total(&plan), 70.0);
    }

    #[test]
    fn clear_forgets_everything() {
        let plan = vec![step("B", "A", 50.0)];
        let mut marks = SettledMarks::new();
        marks.toggle(&plan[0]);
        assert_eq!(marks.len(), 1);

        marks.clear();
        assert!(!marks.is_settled(&plan[0]));
    }

    #[test]
    fn display_is_short_hex() {
        let key = StepKey::of(&step("B", "A", 50.0));
        let shown = key.to_string();
        assert_eq!(shown.len(), 16);
        assert!(shown.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
