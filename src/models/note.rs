//! Diesel models for notes attached to clients, mandates and candidates.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::note::{
    NewNote as DomainNewNote, Note as DomainNote, NoteTarget, NoteTargetKind,
};
use crate::domain::types::{NoteBody, NoteId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notes)]
pub struct Note {
    pub id: i32,
    pub entity_type: String,
    pub entity_id: i32,
    pub body: String,
    pub author: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notes)]
pub struct NewNote<'a> {
    pub entity_type: &'a str,
    pub entity_id: i32,
    pub body: &'a str,
    pub author: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::notes)]
pub struct NoteChangeset<'a> {
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Note> for DomainNote {
    type Error = TypeConstraintError;

    fn try_from(row: Note) -> Result<Self, Self::Error> {
        let kind = NoteTargetKind::try_from(row.entity_type.as_str())?;
        Ok(Self {
            id: NoteId::new(row.id)?,
            target: NoteTarget::new(kind, row.entity_id)?,
            body: NoteBody::new(row.body)?,
            author: row.author,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> NewNote<'a> {
    pub fn stamped(note: &'a DomainNewNote, now: NaiveDateTime) -> Self {
        Self {
            entity_type: note.target.kind().as_str(),
            entity_id: note.target.raw_id(),
            body: note.body.as_str(),
            author: note.author.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainNote> for NoteChangeset<'a> {
    fn from(note: &'a DomainNote) -> Self {
        Self {
            body: note.body.as_str(),
            updated_at: note.updated_at,
        }
    }
}
