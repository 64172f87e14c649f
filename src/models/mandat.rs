use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::mandat::{Mandat as DomainMandat, NewMandat as DomainNewMandat};
use crate::domain::types::{ClientId, JobTitle, MandatId, MandatStatus, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::mandats)]
pub struct Mandat {
    pub id: i32,
    pub client_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::mandats)]
pub struct NewMandat<'a> {
    pub client_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::mandats, treat_none_as_null = true)]
pub struct MandatChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Mandat> for DomainMandat {
    type Error = TypeConstraintError;

    fn try_from(row: Mandat) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MandatId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            title: JobTitle::new(row.title)?,
            description: row.description,
            location: row.location,
            status: MandatStatus::try_from(row.status.as_str())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> NewMandat<'a> {
    pub fn stamped(mandat: &'a DomainNewMandat, now: NaiveDateTime) -> Self {
        Self {
            client_id: mandat.client_id.get(),
            title: mandat.title.as_str(),
            description: mandat.description.as_deref(),
            location: mandat.location.as_deref(),
            status: mandat.status.unwrap_or_default().as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainMandat> for MandatChangeset<'a> {
    fn from(mandat: &'a DomainMandat) -> Self {
        Self {
            title: mandat.title.as_str(),
            description: mandat.description.as_deref(),
            location: mandat.location.as_deref(),
            status: mandat.status.as_str(),
            updated_at: mandat.updated_at,
        }
    }
}
