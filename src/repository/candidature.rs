use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::candidature::{
    Candidature, CandidatureField, CandidatureQuery, NewCandidature,
};
use crate::domain::entity::Entity;
use crate::domain::types::CandidatureId;
use crate::models::candidature::{
    Candidature as DbCandidature, CandidatureChangeset, NewCandidature as DbNewCandidature,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EntityReader, EntityWriter};

impl EntityReader<Candidature> for DieselRepository {
    fn get_by_id(&self, id: CandidatureId) -> RepositoryResult<Option<Candidature>> {
        use crate::schema::candidatures;

        let mut conn = self.conn()?;
        let candidature = candidatures::table
            .find(id.get())
            .first::<DbCandidature>(&mut conn)
            .optional()?;

        candidature
            .map(Candidature::try_from)
            .transpose()
            .map_err(Into::into)
    }

    fn list(&self, query: &CandidatureQuery) -> RepositoryResult<Vec<Candidature>> {
        use crate::schema::candidatures;

        let mut conn = self.conn()?;
        let mut items = candidatures::table.into_boxed();

        if let Some(candidat_id) = query.candidat_id {
            items = items.filter(candidatures::candidat_id.eq(candidat_id.get()));
        }
        if let Some(mandat_id) = query.mandat_id {
            items = items.filter(candidatures::mandat_id.eq(mandat_id.get()));
        }
        if let Some(status) = query.status {
            items = items.filter(candidatures::status.eq(status.as_str()));
        }

        items
            .order((candidatures::created_at.desc(), candidatures::id.desc()))
            .load::<DbCandidature>(&mut conn)?
            .into_iter()
            .map(|row| Candidature::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl EntityWriter<Candidature> for DieselRepository {
    fn create(&self, new: &NewCandidature) -> RepositoryResult<Candidature> {
        use crate::schema::candidatures;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(candidatures::table)
            .values(&DbNewCandidature::stamped(new, Utc::now().naive_utc()))
            .get_result::<DbCandidature>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update(
        &self,
        id: CandidatureId,
        fields: &[CandidatureField],
        stamp: NaiveDateTime,
    ) -> RepositoryResult<Candidature> {
        use crate::schema::candidatures;

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            let mut candidature: Candidature = candidatures::table
                .find(id.get())
                .first::<DbCandidature>(conn)?
                .try_into()?;

            for field in fields {
                candidature.apply(field.clone());
            }
            candidature.touch(stamp);

            let updated = diesel::update(candidatures::table.find(id.get()))
                .set(&CandidatureChangeset::from(&candidature))
                .get_result::<DbCandidature>(conn)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete(&self, id: CandidatureId) -> RepositoryResult<()> {
        use crate::schema::candidatures;

        let mut conn = self.conn()?;
        let affected = diesel::delete(candidatures::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
