use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::candidat::{Candidat, CandidatField, CandidatQuery, NewCandidat};
use crate::domain::entity::Entity;
use crate::domain::note::NoteTargetKind;
use crate::domain::types::CandidatId;
use crate::models::candidat::{
    Candidat as DbCandidat, CandidatChangeset, NewCandidat as DbNewCandidat,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EntityReader, EntityWriter};

impl EntityReader<Candidat> for DieselRepository {
    fn get_by_id(&self, id: CandidatId) -> RepositoryResult<Option<Candidat>> {
        use crate::schema::candidats;

        let mut conn = self.conn()?;
        let candidat = candidats::table
            .find(id.get())
            .first::<DbCandidat>(&mut conn)
            .optional()?;

        candidat.map(Candidat::try_from).transpose().map_err(Into::into)
    }

    fn list(&self, query: &CandidatQuery) -> RepositoryResult<Vec<Candidat>> {
        use crate::schema::candidats;

        let mut conn = self.conn()?;
        let mut items = candidats::table.into_boxed();

        if let Some(status) = query.status {
            items = items.filter(candidats::status.eq(status.as_str()));
        }

        if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{term}%");
            items = items.filter(
                candidats::first_name
                    .like(pattern.clone())
                    .or(candidats::last_name.like(pattern)),
            );
        }

        items
            .order((candidats::created_at.desc(), candidats::id.desc()))
            .load::<DbCandidat>(&mut conn)?
            .into_iter()
            .map(|row| Candidat::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl EntityWriter<Candidat> for DieselRepository {
    fn create(&self, new: &NewCandidat) -> RepositoryResult<Candidat> {
        use crate::schema::candidats;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(candidats::table)
            .values(&DbNewCandidat::stamped(new, Utc::now().naive_utc()))
            .get_result::<DbCandidat>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update(
        &self,
        id: CandidatId,
        fields: &[CandidatField],
        stamp: NaiveDateTime,
    ) -> RepositoryResult<Candidat> {
        use crate::schema::candidats;

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            let mut candidat: Candidat = candidats::table
                .find(id.get())
                .first::<DbCandidat>(conn)?
                .try_into()?;

            for field in fields {
                candidat.apply(field.clone());
            }
            candidat.touch(stamp);

            let updated = diesel::update(candidats::table.find(id.get()))
                .set(&CandidatChangeset::from(&candidat))
                .get_result::<DbCandidat>(conn)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete(&self, id: CandidatId) -> RepositoryResult<()> {
        use crate::schema::{candidats, notes};

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                notes::table
                    .filter(notes::entity_type.eq(NoteTargetKind::Candidat.as_str()))
                    .filter(notes::entity_id.eq(id.get())),
            )
            .execute(conn)?;

            // Applications go with the candidate through ON DELETE CASCADE.
            let affected = diesel::delete(candidats::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
