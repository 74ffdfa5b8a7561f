//! Merging loosely typed expenses, as produced by an expense extractor, into
//! full expenses.

use tracing::warn;
use uuid::Uuid;

use crate::schemas::{Expense, ExpenseDraft, Person, PersonId};

/// Finds the participant a free-form payer name refers to: the first one
/// whose name equals or contains the input, ignoring case.
pub fn resolve_payer(name: &str, people: &[Person]) -> Option<PersonId> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    people
        .iter()
        .find(|person| {
            let candidate = person.name.to_lowercase();
            candidate == needle || candidate.contains(&needle)
        })
        .map(|person| person.id.clone())
}

/// Turns drafts into expenses everyone participates in. A payer that can't
/// be resolved defaults to the first participant.
pub fn merge_drafts(drafts: Vec<ExpenseDraft>, people: &[Person]) -> Vec<Expense> {
    let Some(fallback_payer) = people.first() else {
        if !drafts.is_empty() {
            warn!(count = drafts.len(), "no participants to assign drafted expenses to");
        }
        return vec![];
    };

    drafts
        .into_iter()
        .map(|draft| {
            let payer_id = draft
                .payer_id
                .filter(|id| people.iter().any(|person| &person.id == id))
                .or_else(|| {
                    draft
                        .payer_name
                        .as_deref()
                        .and_then(|name| resolve_payer(name, people))
                })
                .unwrap_or_else(|| fallback_payer.id.clone());

            Expense {
                id: Uuid::new_v4().to_string(),
                description: draft
                    .description
                    .filter(|description| !description.trim().is_empty())
                    .unwrap_or_else(|| "Unknown Item".to_string()),
                amount: draft.amount.unwrap_or(0.0),
                payer_id,
                excluded_ids: vec![],
                manual_override: None,
            }
        })
        .collect()
}
