//! Collection state with derived statistics.
//!
//! Fetch failures are kept as state. Write failures are kept as state and
//! also returned to the caller.

use chrono::Utc;

use crate::domain::entity::{Entity, Summarize, next_stamp};
use crate::repository::errors::RepositoryError;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug)]
pub struct EntityList<E: Entity> {
    query: Option<E::Query>,
    items: Vec<E>,
    is_loading: bool,
    error: Option<String>,
}

impl<E: Entity> Default for EntityList<E> {
    fn default() -> Self {
        Self {
            query: None,
            items: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

impl<E: Entity> EntityList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Filter of the last fetch, `None` before the first one.
    pub fn query(&self) -> Option<&E::Query> {
        self.query.as_ref()
    }

    /// True until the first fetch settles.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loads the collection and replaces the held items.
    ///
    /// On failure the previous items are kept and the error is recorded.
    pub fn fetch<R>(&mut self, repo: &R, query: E::Query)
    where
        R: EntityReader<E> + ?Sized,
    {
        match repo.list(&query) {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                log::error!("Failed to list {}: {err}", E::COLLECTION);
                self.error = Some(err.to_string());
            }
        }
        self.query = Some(query);
        self.is_loading = false;
    }

    /// Fetches when nothing was fetched yet or the filter changed.
    ///
    /// Returns whether a fetch was issued.
    pub fn set_query<R>(&mut self, repo: &R, query: E::Query) -> bool
    where
        R: EntityReader<E> + ?Sized,
    {
        if self.query.as_ref() == Some(&query) {
            return false;
        }
        self.fetch(repo, query);
        true
    }

    /// Creates a record and puts it at the head of the list.
    pub fn create<R>(&mut self, repo: &R, new: &E::New) -> ServiceResult<E>
    where
        R: EntityWriter<E> + ?Sized,
    {
        let created = repo
            .create(new)
            .map_err(|err| self.record(err, "create"))?;
        self.items.insert(0, created.clone());
        self.error = None;
        Ok(created)
    }

    /// Updates a record and replaces it by id. Other records are untouched.
    pub fn update<R>(&mut self, repo: &R, id: E::Id, fields: &[E::Field]) -> ServiceResult<E>
    where
        R: EntityWriter<E> + ?Sized,
    {
        let stamp = self
            .get(id)
            .map(Entity::updated_at)
            .map_or_else(|| Utc::now().naive_utc(), next_stamp);
        let updated = repo
            .update(id, fields, stamp)
            .map_err(|err| self.record(err, "update"))?;
        self.reconcile(&updated);
        self.error = None;
        Ok(updated)
    }

    /// Deletes a record and drops every held item with that id.
    pub fn delete<R>(&mut self, repo: &R, id: E::Id) -> ServiceResult<()>
    where
        R: EntityWriter<E> + ?Sized,
    {
        repo.delete(id).map_err(|err| self.record(err, "delete"))?;
        self.items.retain(|item| item.id() != id);
        self.error = None;
        Ok(())
    }

    /// Reflects a record updated elsewhere into the held items.
    ///
    /// Returns whether a held item was replaced.
    pub fn reconcile(&mut self, entity: &E) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(item) => {
                *item = entity.clone();
                true
            }
            None => false,
        }
    }

    fn record(&mut self, err: RepositoryError, action: &str) -> ServiceError {
        log::error!("Failed to {action} {}: {err}", E::COLLECTION);
        self.error = Some(err.to_string());
        err.into()
    }
}

impl<E: Summarize> EntityList<E> {
    /// Counts derived from the held items, recomputed on every call.
    pub fn stats(&self) -> E::Stats {
        E::summarize(&self.items)
    }
}
