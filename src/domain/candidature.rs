use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Collection, Entity, Summarize};
use crate::domain::types::{CandidatId, CandidatureId, CandidatureStatus, MandatId};

/// Application of a candidate to a mandate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Candidature {
    pub id: CandidatureId,
    pub candidat_id: CandidatId,
    pub mandat_id: MandatId,
    pub status: CandidatureStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCandidature {
    pub candidat_id: CandidatId,
    pub mandat_id: MandatId,
    pub status: Option<CandidatureStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum CandidatureField {
    Status(CandidatureStatus),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CandidatureQuery {
    pub candidat_id: Option<CandidatId>,
    pub mandat_id: Option<MandatId>,
    pub status: Option<CandidatureStatus>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CandidatureStats {
    pub total: usize,
    pub nouvelles: usize,
    pub entretiens: usize,
    pub offres: usize,
    pub acceptees: usize,
    pub refusees: usize,
}

impl Entity for Candidature {
    type Id = CandidatureId;
    type Field = CandidatureField;
    type New = NewCandidature;
    type Query = CandidatureQuery;

    const COLLECTION: Collection = Collection::Candidatures;

    fn id(&self) -> CandidatureId {
        self.id
    }

    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    fn touch(&mut self, at: NaiveDateTime) {
        self.updated_at = at;
    }

    fn apply(&mut self, field: CandidatureField) -> CandidatureField {
        match field {
            CandidatureField::Status(v) => {
                CandidatureField::Status(std::mem::replace(&mut self.status, v))
            }
        }
    }
}

impl Summarize for Candidature {
    type Stats = CandidatureStats;

    fn summarize(items: &[Self]) -> CandidatureStats {
        let mut stats = CandidatureStats {
            total: items.len(),
            ..CandidatureStats::default()
        };
        for candidature in items {
            let counter = match candidature.status {
                CandidatureStatus::Nouvelle => &mut stats.nouvelles,
                CandidatureStatus::Entretien => &mut stats.entretiens,
                CandidatureStatus::Offre => &mut stats.offres,
                CandidatureStatus::Acceptee => &mut stats.acceptees,
                CandidatureStatus::Refusee => &mut stats.refusees,
            };
            *counter += 1;
        }
        stats
    }
}
