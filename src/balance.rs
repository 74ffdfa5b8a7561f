use std::collections::HashMap;

use tracing::debug;

use crate::schemas::{BillSummary, Expense, Person, PersonBreakdown};

#[derive(Clone, Copy, Default)]
struct Tally {
    paid: f64,
    share: f64,
}

/// The people who actually carry the cost of `expense`.
///
/// Birthday people eat for free as long as someone without a birthday is
/// also eligible. If everyone eligible has a birthday, they all pay.
pub fn share_participants<'a>(people: &'a [Person], expense: &Expense) -> Vec<&'a Person> {
    let eligible: Vec<&Person> = people
        .iter()
        .filter(|person| !expense.excludes(&person.id))
        .collect();
    let non_birthday: Vec<&Person> = eligible
        .iter()
        .copied()
        .filter(|person| !person.is_birthday)
        .collect();

    if !non_birthday.is_empty() && non_birthday.len() < eligible.len() {
        non_birthday
    } else {
        eligible
    }
}

/// Aggregates who paid what and who owes what.
///
/// An expense that excludes every participant still counts towards `total`
/// and towards its payer's `paid`, but its cost is attributed to nobody. In
/// that case the balances no longer sum to zero.
pub fn compute_summary(people: &[Person], expenses: &[Expense]) -> BillSummary {
    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let mut tallies: HashMap<&str, Tally> = people
        .iter()
        .map(|person| (person.id.as_str(), Tally::default()))
        .collect();

    for expense in expenses {
        if let Some(payer) = tallies.get_mut(expense.payer_id.as_str()) {
            payer.paid += expense.amount;
        }

        let participants = share_participants(people, expense);
        if participants.is_empty() {
            debug!(
                expense = %expense.id,
                amount = expense.amount,
                "expense has no share participants"
            );
            continue;
        }

        let amount_per_participant = expense.amount / participants.len() as f64;
        for participant in participants {
            tallies
                .entry(participant.id.as_str())
                .and_modify(|tally| tally.share += amount_per_participant);
        }
    }

    let breakdown = people
        .iter()
        .map(|person| {
            let tally = tallies.get(person.id.as_str()).copied().unwrap_or_default();
            PersonBreakdown {
                person_id: person.id.clone(),
                paid: tally.paid,
                share: tally.share,
                balance: tally.paid - tally.share,
            }
        })
        .collect();

    BillSummary {
        total,
        per_person: total / people.len().max(1) as f64,
        breakdown,
    }
}
