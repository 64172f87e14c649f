use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::client::{Client, ClientField, ClientQuery, NewClient};
use crate::domain::entity::Entity;
use crate::domain::note::NoteTargetKind;
use crate::domain::types::ClientId;
use crate::models::client::{Client as DbClient, ClientChangeset, NewClient as DbNewClient};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EntityReader, EntityWriter};

impl EntityReader<Client> for DieselRepository {
    fn get_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        client.map(Client::try_from).transpose().map_err(Into::into)
    }

    fn list(&self, query: &ClientQuery) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let mut items = clients::table.into_boxed();

        if let Some(status) = query.status {
            items = items.filter(clients::status.eq(status.as_str()));
        }

        if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            items = items.filter(clients::name.like(format!("%{term}%")));
        }

        items
            .order((clients::created_at.desc(), clients::id.desc()))
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|row| Client::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl EntityWriter<Client> for DieselRepository {
    fn create(&self, new: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(clients::table)
            .values(&DbNewClient::stamped(new, Utc::now().naive_utc()))
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update(
        &self,
        id: ClientId,
        fields: &[ClientField],
        stamp: NaiveDateTime,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            let mut client: Client = clients::table
                .find(id.get())
                .first::<DbClient>(conn)?
                .try_into()?;

            for field in fields {
                client.apply(field.clone());
            }
            client.touch(stamp);

            let updated = diesel::update(clients::table.find(id.get()))
                .set(&ClientChangeset::from(&client))
                .get_result::<DbClient>(conn)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete(&self, id: ClientId) -> RepositoryResult<()> {
        use crate::schema::{clients, mandats, notes};

        let mut conn = self.conn()?;
        (*conn).transaction::<_, RepositoryError, _>(|conn| {
            let mandat_ids = mandats::table
                .filter(mandats::client_id.eq(id.get()))
                .select(mandats::id);

            diesel::delete(
                notes::table
                    .filter(notes::entity_type.eq(NoteTargetKind::Mandat.as_str()))
                    .filter(notes::entity_id.eq_any(mandat_ids)),
            )
            .execute(conn)?;

            diesel::delete(
                notes::table
                    .filter(notes::entity_type.eq(NoteTargetKind::Client.as_str()))
                    .filter(notes::entity_id.eq(id.get())),
            )
            .execute(conn)?;

            // Mandates and their applications follow through ON DELETE CASCADE.
            let affected = diesel::delete(clients::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
