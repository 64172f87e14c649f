use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Collection, Entity, Navigable, Summarize};
use crate::domain::types::{CandidatId, CandidatStatus, ContactEmail, PersonName, PhoneNumber};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Candidat {
    pub id: CandidatId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    pub current_position: Option<String>,
    pub status: CandidatStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCandidat {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    pub current_position: Option<String>,
    /// Falls back to [`CandidatStatus::default`] when absent.
    pub status: Option<CandidatStatus>,
}

/// Assignment of one mutable candidate field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum CandidatField {
    FirstName(PersonName),
    LastName(PersonName),
    Email(Option<ContactEmail>),
    Phone(Option<PhoneNumber>),
    CurrentPosition(Option<String>),
    Status(CandidatStatus),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CandidatQuery {
    pub status: Option<CandidatStatus>,
    /// Matches first or last name.
    pub search: Option<String>,
}

/// Candidate counts shown on the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CandidatStats {
    pub total: usize,
    #[serde(rename = "actifs")]
    pub active: usize,
    #[serde(rename = "en_recherche")]
    pub searching: usize,
    #[serde(rename = "places")]
    pub placed: usize,
}

impl Candidat {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Candidat {
    type Id = CandidatId;
    type Field = CandidatField;
    type New = NewCandidat;
    type Query = CandidatQuery;

    const COLLECTION: Collection = Collection::Candidats;

    fn id(&self) -> CandidatId {
        self.id
    }

    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    fn touch(&mut self, at: NaiveDateTime) {
        self.updated_at = at;
    }

    fn apply(&mut self, field: CandidatField) -> CandidatField {
        use std::mem::replace;

        match field {
            CandidatField::FirstName(v) => {
                CandidatField::FirstName(replace(&mut self.first_name, v))
            }
            CandidatField::LastName(v) => CandidatField::LastName(replace(&mut self.last_name, v)),
            CandidatField::Email(v) => CandidatField::Email(replace(&mut self.email, v)),
            CandidatField::Phone(v) => CandidatField::Phone(replace(&mut self.phone, v)),
            CandidatField::CurrentPosition(v) => {
                CandidatField::CurrentPosition(replace(&mut self.current_position, v))
            }
            CandidatField::Status(v) => CandidatField::Status(replace(&mut self.status, v)),
        }
    }
}

impl Navigable for Candidat {
    const URL_KEY: &'static str = "candidatId";
}

impl Summarize for Candidat {
    type Stats = CandidatStats;

    fn summarize(items: &[Self]) -> CandidatStats {
        items.iter().fold(
            CandidatStats {
                total: items.len(),
                ..CandidatStats::default()
            },
            |mut stats, candidat| {
                match candidat.status {
                    CandidatStatus::Actif => stats.active += 1,
                    CandidatStatus::EnRecherche => stats.searching += 1,
                    CandidatStatus::Place => stats.placed += 1,
                    CandidatStatus::Inactif => {}
                }
                stats
            },
        )
    }
}
