use serde::{Deserialize, Serialize};

pub type PersonId = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub is_birthday: bool,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Person {
            id: id.into(),
            name: name.into(),
            is_birthday: false,
        }
    }

    pub fn birthday(mut self) -> Self {
        self.is_birthday = true;
        self
    }
}

/// A person as the front end sends it, with the couple link stored inline.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub is_birthday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_couple_with: Option<PersonId>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub payer_id: PersonId,
    #[serde(default)]
    pub excluded_ids: Vec<PersonId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<bool>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        payer_id: impl Into<PersonId>,
    ) -> Self {
        Expense {
            id: id.into(),
            description: description.into(),
            amount,
            payer_id: payer_id.into(),
            excluded_ids: vec![],
            manual_override: None,
        }
    }

    pub fn excluding<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        self.excluded_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn excludes(&self, id: &str) -> bool {
        self.excluded_ids.iter().any(|excluded| excluded == id)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBreakdown {
    pub person_id: PersonId,
    /// How much they paid upfront
    pub paid: f64,
    /// How much they consumed
    pub share: f64,
    /// paid - share, positive means they should receive money
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub total: f64,
    /// Informational average, the settlement never looks at it
    pub per_person: f64,
    pub breakdown: Vec<PersonBreakdown>,
}

impl BillSummary {
    pub fn balance_of(&self, id: &str) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|entry| entry.person_id == id)
            .map(|entry| entry.balance)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStep {
    pub from_name: String,
    pub to_name: String,
    pub amount: f64,
    pub is_couple_transfer: bool,
}

/// A partial expense coming from an external extractor.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payer_id: Option<PersonId>,
    #[serde(default)]
    pub payer_name: Option<String>,
}
