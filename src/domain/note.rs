use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Collection, Entity, Summarize};
use crate::domain::types::{CandidatId, ClientId, MandatId, NoteBody, NoteId, TypeConstraintError};

/// Kind of record a note is attached to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NoteTargetKind {
    Client,
    Mandat,
    Candidat,
}

impl NoteTargetKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NoteTargetKind::Client => "client",
            NoteTargetKind::Mandat => "mandat",
            NoteTargetKind::Candidat => "candidat",
        }
    }
}

impl TryFrom<&str> for NoteTargetKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "client" => Ok(NoteTargetKind::Client),
            "mandat" => Ok(NoteTargetKind::Mandat),
            "candidat" => Ok(NoteTargetKind::Candidat),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown note target `{other}`"
            ))),
        }
    }
}

/// Record a note is attached to. Stored as `(entity_type, entity_id)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "entity_type", content = "entity_id", rename_all = "snake_case")]
pub enum NoteTarget {
    Client(ClientId),
    Mandat(MandatId),
    Candidat(CandidatId),
}

impl NoteTarget {
    pub fn new(kind: NoteTargetKind, id: i32) -> Result<Self, TypeConstraintError> {
        Ok(match kind {
            NoteTargetKind::Client => NoteTarget::Client(ClientId::new(id)?),
            NoteTargetKind::Mandat => NoteTarget::Mandat(MandatId::new(id)?),
            NoteTargetKind::Candidat => NoteTarget::Candidat(CandidatId::new(id)?),
        })
    }

    pub fn kind(self) -> NoteTargetKind {
        match self {
            NoteTarget::Client(_) => NoteTargetKind::Client,
            NoteTarget::Mandat(_) => NoteTargetKind::Mandat,
            NoteTarget::Candidat(_) => NoteTargetKind::Candidat,
        }
    }

    pub fn raw_id(self) -> i32 {
        match self {
            NoteTarget::Client(id) => id.get(),
            NoteTarget::Mandat(id) => id.get(),
            NoteTarget::Candidat(id) => id.get(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub target: NoteTarget,
    pub body: NoteBody,
    pub author: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewNote {
    pub target: NoteTarget,
    pub body: NoteBody,
    pub author: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum NoteField {
    Body(NoteBody),
}

/// Flat query-string shape of [`NoteQuery`].
#[derive(Debug, Deserialize)]
struct NoteQueryParams {
    entity_type: Option<NoteTargetKind>,
    entity_id: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "NoteQueryParams")]
pub struct NoteQuery {
    pub target: Option<NoteTarget>,
}

impl TryFrom<NoteQueryParams> for NoteQuery {
    type Error = TypeConstraintError;

    fn try_from(params: NoteQueryParams) -> Result<Self, Self::Error> {
        let target = match (params.entity_type, params.entity_id) {
            (Some(kind), Some(id)) => Some(NoteTarget::new(kind, id)?),
            (None, None) => None,
            _ => {
                return Err(TypeConstraintError::InvalidValue(
                    "entity_type and entity_id go together".to_string(),
                ));
            }
        };
        Ok(Self { target })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NoteStats {
    pub total: usize,
}

impl Entity for Note {
    type Id = NoteId;
    type Field = NoteField;
    type New = NewNote;
    type Query = NoteQuery;

    const COLLECTION: Collection = Collection::Notes;

    fn id(&self) -> NoteId {
        self.id
    }

    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    fn touch(&mut self, at: NaiveDateTime) {
        self.updated_at = at;
    }

    fn apply(&mut self, field: NoteField) -> NoteField {
        match field {
            NoteField::Body(v) => NoteField::Body(std::mem::replace(&mut self.body, v)),
        }
    }
}

impl Summarize for Note {
    type Stats = NoteStats;

    fn summarize(items: &[Self]) -> NoteStats {
        NoteStats { total: items.len() }
    }
}
