use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::candidature::{
    Candidature as DomainCandidature, NewCandidature as DomainNewCandidature,
};
use crate::domain::types::{
    CandidatId, CandidatureId, CandidatureStatus, MandatId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::candidatures)]
pub struct Candidature {
    pub id: i32,
    pub candidat_id: i32,
    pub mandat_id: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::candidatures)]
pub struct NewCandidature<'a> {
    pub candidat_id: i32,
    pub mandat_id: i32,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::candidatures)]
pub struct CandidatureChangeset<'a> {
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Candidature> for DomainCandidature {
    type Error = TypeConstraintError;

    fn try_from(row: Candidature) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CandidatureId::new(row.id)?,
            candidat_id: CandidatId::new(row.candidat_id)?,
            mandat_id: MandatId::new(row.mandat_id)?,
            status: CandidatureStatus::try_from(row.status.as_str())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl NewCandidature<'static> {
    pub fn stamped(candidature: &DomainNewCandidature, now: NaiveDateTime) -> Self {
        Self {
            candidat_id: candidature.candidat_id.get(),
            mandat_id: candidature.mandat_id.get(),
            status: candidature.status.unwrap_or_default().as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&DomainCandidature> for CandidatureChangeset<'static> {
    fn from(candidature: &DomainCandidature) -> Self {
        Self {
            status: candidature.status.as_str(),
            updated_at: candidature.updated_at,
        }
    }
}
