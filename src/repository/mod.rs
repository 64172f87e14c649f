//! Data gateway over the recruitment collections.
//!
//! Every collection is reached through the same pair of traits so that
//! services can be written once for all entities. [`DieselRepository`] is the
//! SQLite-backed implementation used by the server.

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::entity::Entity;
use crate::repository::errors::RepositoryResult;

pub mod candidat;
pub mod candidature;
pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod note;
pub mod mandat;
#[cfg(test)]
pub mod test;

/// Read side of a collection: `select` and `selectOne`.
pub trait EntityReader<E: Entity> {
    /// Loads a single record. A missing record is `Ok(None)`, not an error.
    fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>>;
    /// Loads every record matching the filter, most recent first.
    fn list(&self, query: &E::Query) -> RepositoryResult<Vec<E>>;
}

/// Write side of a collection: `insert`, `update` and `delete`.
pub trait EntityWriter<E: Entity> {
    /// Inserts a record; id and timestamps are assigned here.
    fn create(&self, new: &E::New) -> RepositoryResult<E>;
    /// Applies `fields` to the stored row and stamps `updated_at` with
    /// `stamp`, atomically for that row.
    fn update(&self, id: E::Id, fields: &[E::Field], stamp: NaiveDateTime)
    -> RepositoryResult<E>;
    /// Removes the record together with the rows that depend on it.
    fn delete(&self, id: E::Id) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every collection.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
