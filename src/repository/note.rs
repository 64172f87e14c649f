use chrono::{NaiveDateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::entity::Entity;
use crate::domain::note::{NewNote, Note, NoteField, NoteQuery, NoteTarget};
use crate::domain::types::NoteId;
use crate::models::note::{NewNote as DbNewNote, Note as DbNote, NoteChangeset};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EntityReader, EntityWriter};

impl EntityReader<Note> for DieselRepository {
    fn get_by_id(&self, id: NoteId) -> RepositoryResult<Option<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let note = notes::table
            .find(id.get())
            .first::<DbNote>(&mut conn)
            .optional()?;

        note.map(Note::try_from).transpose().map_err(Into::into)
    }

    fn list(&self, query: &NoteQuery) -> RepositoryResult<Vec<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let mut items = notes::table.into_boxed();

        if let Some(target) = query.target {
            items = items
                .filter(notes::entity_type.eq(target.kind().as_str()))
                .filter(notes::entity_id.eq(target.raw_id()));
        }

        items
            .order((notes::created_at.desc(), notes::id.desc()))
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(|row| Note::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl EntityWriter<Note> for DieselRepository {
    fn create(&self, new: &NewNote) -> RepositoryResult<Note> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            if !target_exists(conn, new.target)? {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "{} {} does not exist",
                    new.target.kind().as_str(),
                    new.target.raw_id()
                )));
            }

            let created = diesel::insert_into(notes::table)
                .values(&DbNewNote::stamped(new, Utc::now().naive_utc()))
                .get_result::<DbNote>(conn)?;

            Ok(created.try_into()?)
        })
    }

    fn update(
        &self,
        id: NoteId,
        fields: &[NoteField],
        stamp: NaiveDateTime,
    ) -> RepositoryResult<Note> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            let mut note: Note = notes::table
                .find(id.get())
                .first::<DbNote>(conn)?
                .try_into()?;

            for field in fields {
                note.apply(field.clone());
            }
            note.touch(stamp);

            let updated = diesel::update(notes::table.find(id.get()))
                .set(&NoteChangeset::from(&note))
                .get_result::<DbNote>(conn)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete(&self, id: NoteId) -> RepositoryResult<()> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let affected = diesel::delete(notes::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Notes have no foreign key, so the target row is checked before insert.
fn target_exists(conn: &mut SqliteConnection, target: NoteTarget) -> RepositoryResult<bool> {
    use crate::schema::{candidats, clients, mandats};

    let found = match target {
        NoteTarget::Client(id) => {
            diesel::select(exists(clients::table.find(id.get()))).get_result::<bool>(conn)?
        }
        NoteTarget::Mandat(id) => {
            diesel::select(exists(mandats::table.find(id.get()))).get_result::<bool>(conn)?
        }
        NoteTarget::Candidat(id) => {
            diesel::select(exists(candidats::table.find(id.get()))).get_result::<bool>(conn)?
        }
    };
    Ok(found)
}
