use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::entity::Entity;
use crate::domain::mandat::{Mandat, MandatField, MandatQuery, NewMandat};
use crate::domain::note::NoteTargetKind;
use crate::domain::types::MandatId;
use crate::models::mandat::{Mandat as DbMandat, MandatChangeset, NewMandat as DbNewMandat};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EntityReader, EntityWriter};

impl EntityReader<Mandat> for DieselRepository {
    fn get_by_id(&self, id: MandatId) -> RepositoryResult<Option<Mandat>> {
        use crate::schema::mandats;

        let mut conn = self.conn()?;
        let mandat = mandats::table
            .find(id.get())
            .first::<DbMandat>(&mut conn)
            .optional()?;

        mandat.map(Mandat::try_from).transpose().map_err(Into::into)
    }

    fn list(&self, query: &MandatQuery) -> RepositoryResult<Vec<Mandat>> {
        use crate::schema::mandats;

        let mut conn = self.conn()?;
        let mut items = mandats::table.into_boxed();

        if let Some(client_id) = query.client_id {
            items = items.filter(mandats::client_id.eq(client_id.get()));
        }
        if let Some(status) = query.status {
            items = items.filter(mandats::status.eq(status.as_str()));
        }

        items
            .order((mandats::created_at.desc(), mandats::id.desc()))
            .load::<DbMandat>(&mut conn)?
            .into_iter()
            .map(|row| Mandat::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl EntityWriter<Mandat> for DieselRepository {
    fn create(&self, new: &NewMandat) -> RepositoryResult<Mandat> {
        use crate::schema::mandats;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(mandats::table)
            .values(&DbNewMandat::stamped(new, Utc::now().naive_utc()))
            .get_result::<DbMandat>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update(
        &self,
        id: MandatId,
        fields: &[MandatField],
        stamp: NaiveDateTime,
    ) -> RepositoryResult<Mandat> {
        use crate::schema::mandats;

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            let mut mandat: Mandat = mandats::table
                .find(id.get())
                .first::<DbMandat>(conn)?
                .try_into()?;

            for field in fields {
                mandat.apply(field.clone());
            }
            mandat.touch(stamp);

            let updated = diesel::update(mandats::table.find(id.get()))
                .set(&MandatChangeset::from(&mandat))
                .get_result::<DbMandat>(conn)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete(&self, id: MandatId) -> RepositoryResult<()> {
        use crate::schema::{mandats, notes};

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                notes::table
                    .filter(notes::entity_type.eq(NoteTargetKind::Mandat.as_str()))
                    .filter(notes::entity_id.eq(id.get())),
            )
            .execute(conn)?;

            let affected = diesel::delete(mandats::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
