use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Collection, Entity, Navigable, Summarize};
use crate::domain::types::{ClientId, JobTitle, MandatId, MandatStatus};

/// Recruitment assignment received from a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mandat {
    pub id: MandatId,
    pub client_id: ClientId,
    pub title: JobTitle,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: MandatStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMandat {
    pub client_id: ClientId,
    pub title: JobTitle,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<MandatStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum MandatField {
    Title(JobTitle),
    Description(Option<String>),
    Location(Option<String>),
    Status(MandatStatus),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MandatQuery {
    /// Restricts the list to one client's mandates.
    pub client_id: Option<ClientId>,
    pub status: Option<MandatStatus>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MandatStats {
    pub total: usize,
    #[serde(rename = "ouverts")]
    pub open: usize,
    #[serde(rename = "en_cours")]
    pub in_progress: usize,
    #[serde(rename = "pourvus")]
    pub filled: usize,
    #[serde(rename = "annules")]
    pub cancelled: usize,
}

impl Entity for Mandat {
    type Id = MandatId;
    type Field = MandatField;
    type New = NewMandat;
    type Query = MandatQuery;

    const COLLECTION: Collection = Collection::Mandats;

    fn id(&self) -> MandatId {
        self.id
    }

    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    fn touch(&mut self, at: NaiveDateTime) {
        self.updated_at = at;
    }

    fn apply(&mut self, field: MandatField) -> MandatField {
        use std::mem::replace;

        match field {
            MandatField::Title(v) => MandatField::Title(replace(&mut self.title, v)),
            MandatField::Description(v) => {
                MandatField::Description(replace(&mut self.description, v))
            }
            MandatField::Location(v) => MandatField::Location(replace(&mut self.location, v)),
            MandatField::Status(v) => MandatField::Status(replace(&mut self.status, v)),
        }
    }
}

impl Navigable for Mandat {
    const URL_KEY: &'static str = "mandatId";
}

impl Summarize for Mandat {
    type Stats = MandatStats;

    fn summarize(items: &[Self]) -> MandatStats {
        let mut stats = MandatStats {
            total: items.len(),
            ..MandatStats::default()
        };
        for mandat in items {
            match mandat.status {
                MandatStatus::Ouvert => stats.open += 1,
                MandatStatus::EnCours => stats.in_progress += 1,
                MandatStatus::Pourvu => stats.filled += 1,
                MandatStatus::Annule => stats.cancelled += 1,
            }
        }
        stats
    }
}
