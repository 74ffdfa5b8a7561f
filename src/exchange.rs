//! Turns per-person balances into a short list of transfers.
//!
//! Couples are merged into a single financial unit first, so a couple never
//! pays itself. The remaining units are settled greedily: the biggest debtor
//! pays the biggest creditor until one of them reaches zero, which bounds the
//! plan to at most `units - 1` transfers.

use std::collections::HashSet;

use tracing::debug;

use crate::couples::Roster;
use crate::schemas::{BillSummary, PersonId, SettlementStep};

/// Balances and transfers at or below this magnitude count as settled.
pub const EPSILON: f64 = 0.01;

/// A single person or a couple, settled as one balance.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialUnit {
    pub name: String,
    pub balance: f64,
    pub ids: Vec<PersonId>,
}

/// Groups people into financial units, one per single person and one per
/// couple, in roster order.
pub fn consolidate_units(summary: &BillSummary, roster: &Roster) -> Vec<FinancialUnit> {
    let mut processed: HashSet<&str> = HashSet::new();
    let mut units = Vec::new();

    for person in roster.people() {
        if processed.contains(person.id.as_str()) {
            continue;
        }
        processed.insert(person.id.as_str());

        let mut unit = FinancialUnit {
            name: person.name.clone(),
            balance: summary.balance_of(&person.id).unwrap_or(0.0),
            ids: vec![person.id.clone()],
        };

        if let Some(partner) = roster.partner_of(&person.id) {
            unit.balance += summary.balance_of(&partner.id).unwrap_or(0.0);

            // Sorted so the label doesn't depend on who was visited first
            let mut names = [person.name.as_str(), partner.name.as_str()];
            names.sort();
            unit.name = format!("{} & {}", names[0], names[1]);

            unit.ids.push(partner.id.clone());
            processed.insert(partner.id.as_str());
        }

        units.push(unit);
    }

    units
}

fn is_settled(unit: &FinancialUnit) -> bool {
    unit.balance.abs() <= EPSILON
}

// Greedy minimum cash flow over the units that still owe or are owed
fn get_simplified_transfers(
    mut units: Vec<FinancialUnit>,
    max_iterations: usize,
) -> Vec<SettlementStep> {
    units.retain(|unit| !is_settled(unit));

    let mut steps = Vec::new();
    let mut iterations = 0;

    while !units.is_empty() && iterations < max_iterations {
        units.sort_by(|a, b| a.balance.total_cmp(&b.balance));

        let last = units.len() - 1;
        let debtor_balance = units[0].balance;
        let creditor_balance = units[last].balance;
        if debtor_balance >= -EPSILON || creditor_balance <= EPSILON {
            break;
        }

        let amount = debtor_balance.abs().min(creditor_balance);
        if amount > EPSILON {
            debug!(
                from = %units[0].name,
                to = %units[last].name,
                amount,
                "settlement step"
            );
            steps.push(SettlementStep {
                from_name: units[0].name.clone(),
                to_name: units[last].name.clone(),
                amount: round_to_2_decimals(amount),
                is_couple_transfer: false,
            });
        }

        units[0].balance += amount;
        units[last].balance -= amount;
        units.retain(|unit| !is_settled(unit));

        iterations += 1;
    }

    steps
}

pub fn round_to_2_decimals(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Proposes the transfers that settle every unit's balance.
pub fn compute_settlements(summary: &BillSummary, roster: &Roster) -> Vec<SettlementStep> {
    let units = consolidate_units(summary, roster);
    get_simplified_transfers(units, roster.people().len() * 2)
}
