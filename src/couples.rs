use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::schemas::{Person, PersonId, PersonRecord};

/// Symmetric partner table. Every mutation touches both sides of a pair, so
/// `partner_of(a) == Some(b)` holds exactly when `partner_of(b) == Some(a)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoupleRegistry {
    partners: HashMap<PersonId, PersonId>,
}

impl CoupleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, a: &str, b: &str) -> Result<()> {
        if a == b {
            return Err(Error::SelfLink(a.to_string()));
        }
        for id in [a, b] {
            if let Some(partner) = self.partners.get(id) {
                return Err(Error::AlreadyLinked {
                    id: id.to_string(),
                    partner: partner.clone(),
                });
            }
        }
        self.partners.insert(a.to_string(), b.to_string());
        self.partners.insert(b.to_string(), a.to_string());
        Ok(())
    }

    /// Breaks the pair `id` belongs to and returns the former partner.
    pub fn unlink(&mut self, id: &str) -> Option<PersonId> {
        let partner = self.partners.remove(id)?;
        self.partners.remove(&partner);
        Some(partner)
    }

    pub fn partner_of(&self, id: &str) -> Option<&str> {
        self.partners.get(id).map(String::as_str)
    }

    pub fn is_linked(&self, id: &str) -> bool {
        self.partners.contains_key(id)
    }

    /// Each pair once, smaller id first.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .partners
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        pairs.sort();
        pairs
    }

    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// The participant list together with its couple links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    people: Vec<Person>,
    couples: CoupleRegistry,
}

impl Roster {
    pub fn new(people: Vec<Person>) -> Self {
        Roster {
            people,
            couples: CoupleRegistry::new(),
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn couples(&self) -> &CoupleRegistry {
        &self.couples
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn partner_of(&self, id: &str) -> Option<&Person> {
        self.couples
            .partner_of(id)
            .and_then(|partner| self.get(partner))
    }

    /// Adds a participant under a fresh id. Blank names are ignored.
    pub fn add_person(&mut self, name: &str) -> Option<&Person> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.people.push(Person::new(Uuid::new_v4().to_string(), name));
        self.people.last()
    }

    /// Removes a participant; a linked partner becomes single again.
    pub fn remove_person(&mut self, id: &str) -> Option<Person> {
        let index = self.people.iter().position(|person| person.id == id)?;
        self.couples.unlink(id);
        Some(self.people.remove(index))
    }

    pub fn toggle_birthday(&mut self, id: &str) -> Result<bool> {
        let person = self
            .people
            .iter_mut()
            .find(|person| person.id == id)
            .ok_or_else(|| Error::UnknownPerson(id.to_string()))?;
        person.is_birthday = !person.is_birthday;
        Ok(person.is_birthday)
    }

    pub fn link(&mut self, a: &str, b: &str) -> Result<()> {
        for id in [a, b] {
            if self.get(id).is_none() {
                return Err(Error::UnknownPerson(id.to_string()));
            }
        }
        self.couples.link(a, b)
    }

    pub fn unlink(&mut self, id: &str) -> Option<PersonId> {
        self.couples.unlink(id)
    }

    /// Builds a roster from wire records.
    ///
    /// A link pointing at someone not in the list is dropped. A link the
    /// partner does not point back at is rejected.
    pub fn from_records(records: Vec<PersonRecord>) -> Result<Self> {
        let declared: HashMap<&str, Option<&str>> = records
            .iter()
            .map(|record| (record.id.as_str(), record.is_couple_with.as_deref()))
            .collect();

        let mut couples = CoupleRegistry::new();
        for record in &records {
            let Some(partner) = record.is_couple_with.as_deref() else {
                continue;
            };
            if partner == record.id {
                return Err(Error::SelfLink(record.id.clone()));
            }
            match declared.get(partner) {
                None => {
                    warn!(person = %record.id, partner, "dropping link to unknown participant");
                }
                Some(back) if *back == Some(record.id.as_str()) => {
                    if couples.partner_of(&record.id) != Some(partner) {
                        couples.link(&record.id, partner)?;
                    }
                }
                Some(_) => {
                    return Err(Error::AsymmetricLink {
                        id: record.id.clone(),
                        partner: partner.to_string(),
                    });
                }
            }
        }

        let people = records
            .into_iter()
            .map(|record| Person {
                id: record.id,
                name: record.name,
                is_birthday: record.is_birthday,
            })
            .collect();
        Ok(Roster { people, couples })
    }

    pub fn to_records(&self) -> Vec<PersonRecord> {
        self.people
            .iter()
            .map(|person| PersonRecord {
                id: person.id.clone(),
                name: person.name.clone(),
                is_birthday: person.is_birthday,
                is_couple_with: self.couples.partner_of(&person.id).map(str::to_string),
            })
            .collect()
    }
}
