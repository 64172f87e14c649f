//! In-memory gateway used to exercise services without a database.

use std::cell::{Cell, RefCell};

use chrono::NaiveDateTime;

use crate::domain::candidat::{Candidat, NewCandidat};
use crate::domain::entity::Entity;
use crate::domain::mandat::{Mandat, NewMandat};
use crate::domain::note::{NewNote, Note};
use crate::domain::types::{CandidatId, MandatId, NoteId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{EntityReader, EntityWriter};

/// Lets the in-memory gateway build and filter records.
pub trait Fixture: Entity {
    fn materialize(id: i32, new: &Self::New, now: NaiveDateTime) -> Self;
    fn matches(&self, query: &Self::Query) -> bool;
}

pub struct InMemoryRepository<E> {
    rows: RefCell<Vec<E>>,
    next_id: Cell<i32>,
    lookups: Cell<usize>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl<E: Fixture> InMemoryRepository<E> {
    pub fn with_rows(rows: Vec<E>) -> Self {
        let next_id = rows
            .iter()
            .map(|row| Into::<i32>::into(row.id()))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            rows: RefCell::new(rows),
            next_id: Cell::new(next_id),
            lookups: Cell::new(0),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
        }
    }

    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn rows(&self) -> Vec<E> {
        self.rows.borrow().clone()
    }

    /// Number of `get_by_id` calls received.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn check_writes(&self) -> RepositoryResult<()> {
        if self.fail_writes.get() {
            Err(RepositoryError::ConnectionError("gateway unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl<E: Fixture> EntityReader<E> for InMemoryRepository<E> {
    fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        self.lookups.set(self.lookups.get() + 1);
        if self.fail_reads.get() {
            return Err(RepositoryError::ConnectionError(
                "gateway unreachable".to_string(),
            ));
        }
        Ok(self.rows.borrow().iter().find(|row| row.id() == id).cloned())
    }

    fn list(&self, query: &E::Query) -> RepositoryResult<Vec<E>> {
        if self.fail_reads.get() {
            return Err(RepositoryError::ConnectionError(
                "gateway unreachable".to_string(),
            ));
        }
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.matches(query))
            .cloned()
            .collect())
    }
}

impl<E: Fixture> EntityWriter<E> for InMemoryRepository<E> {
    fn create(&self, new: &E::New) -> RepositoryResult<E> {
        self.check_writes()?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let record = E::materialize(id, new, chrono::Utc::now().naive_utc());
        self.rows.borrow_mut().insert(0, record.clone());
        Ok(record)
    }

    fn update(&self, id: E::Id, fields: &[E::Field], stamp: NaiveDateTime) -> RepositoryResult<E> {
        self.check_writes()?;
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(RepositoryError::NotFound)?;
        for field in fields {
            row.apply(field.clone());
        }
        row.touch(stamp);
        Ok(row.clone())
    }

    fn delete(&self, id: E::Id) -> RepositoryResult<()> {
        self.check_writes()?;
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl Fixture for Candidat {
    fn materialize(id: i32, new: &NewCandidat, now: NaiveDateTime) -> Self {
        Candidat {
            id: CandidatId::new(id).expect("fixture ids are positive"),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            current_position: new.current_position.clone(),
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn matches(&self, query: &Self::Query) -> bool {
        query.status.is_none_or(|status| self.status == status)
            && query.search.as_deref().is_none_or(|term| {
                self.first_name.contains(term) || self.last_name.contains(term)
            })
    }
}

impl Fixture for Mandat {
    fn materialize(id: i32, new: &NewMandat, now: NaiveDateTime) -> Self {
        Mandat {
            id: MandatId::new(id).expect("fixture ids are positive"),
            client_id: new.client_id,
            title: new.title.clone(),
            description: new.description.clone(),
            location: new.location.clone(),
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn matches(&self, query: &Self::Query) -> bool {
        query.client_id.is_none_or(|client_id| self.client_id == client_id)
            && query.status.is_none_or(|status| self.status == status)
    }
}

impl Fixture for Note {
    fn materialize(id: i32, new: &NewNote, now: NaiveDateTime) -> Self {
        Note {
            id: NoteId::new(id).expect("fixture ids are positive"),
            target: new.target,
            body: new.body.clone(),
            author: new.author.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn matches(&self, query: &Self::Query) -> bool {
        query.target.is_none_or(|target| self.target == target)
    }
}
