//! Optimistic single-record state.
//!
//! [`OptimisticEntity`] holds one record in memory and applies field updates
//! locally before the gateway confirms them. A rejected update is rolled back
//! before the error reaches the caller, so the held record never keeps a value
//! the gateway refused.
//!
//! Two updates of the same field are not coordinated: whichever is applied
//! last wins locally, matching the single-operator usage.
//!
//! This is the library-side hook for callers that keep records in memory
//! between requests. [`Workspace::update_selected`] drives it for the selected
//! record. The HTTP `PATCH` routes are stateless and use the confirmed write
//! in [`crate::services::entities::update_entity`] instead.
//!
//! [`Workspace::update_selected`]: crate::services::workspace::Workspace::update_selected

use crate::domain::entity::{Entity, next_stamp};
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug)]
pub struct OptimisticEntity<E: Entity> {
    id: E::Id,
    entity: Option<E>,
    is_loading: bool,
    error: Option<String>,
}

impl<E: Entity> OptimisticEntity<E> {
    /// State for a record that still has to be fetched.
    pub fn new(id: E::Id) -> Self {
        Self {
            id,
            entity: None,
            is_loading: true,
            error: None,
        }
    }

    /// State seeded with a record that is already in memory.
    pub fn from_entity(entity: E) -> Self {
        Self {
            id: entity.id(),
            entity: Some(entity),
            is_loading: false,
            error: None,
        }
    }

    pub fn id(&self) -> E::Id {
        self.id
    }

    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    pub fn into_entity(self) -> Option<E> {
        self.entity
    }

    /// True until the first fetch settles.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches the record `id`. Read failures are kept in [`Self::error`].
    ///
    /// Switching to another id drops the record held for the previous one.
    pub fn load<R>(&mut self, repo: &R, id: E::Id) -> Option<&E>
    where
        R: EntityReader<E> + ?Sized,
    {
        if id != self.id {
            self.id = id;
            self.entity = None;
            self.error = None;
            self.is_loading = true;
        }
        self.refresh(repo);
        self.entity.as_ref()
    }

    /// Re-fetches the record and replaces local state unconditionally.
    ///
    /// A record that no longer exists clears the local copy.
    pub fn refresh<R>(&mut self, repo: &R)
    where
        R: EntityReader<E> + ?Sized,
    {
        match repo.get_by_id(self.id) {
            Ok(entity) => {
                self.entity = entity;
                self.error = None;
            }
            Err(err) => {
                log::error!("Failed to fetch {} {}: {err}", E::COLLECTION, self.id);
                self.error = Some(err.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Applies `field` locally, then asks the gateway to persist it.
    ///
    /// On success the local record is kept as applied. On failure the field
    /// and, when still ours, the modification stamp are restored and the
    /// error is returned.
    pub fn update_field<R>(&mut self, repo: &R, field: E::Field) -> ServiceResult<&E>
    where
        R: EntityWriter<E> + ?Sized,
    {
        let Some(entity) = self.entity.as_mut() else {
            return Err(ServiceError::NotFound);
        };

        let previous_stamp = entity.updated_at();
        let stamp = next_stamp(previous_stamp);
        let undo = entity.apply(field.clone());
        entity.touch(stamp);

        match repo.update(self.id, std::slice::from_ref(&field), stamp) {
            Ok(_) => {
                self.error = None;
                Ok(entity)
            }
            Err(err) => {
                log::error!(
                    "Failed to update {} {}, rolling back: {err}",
                    E::COLLECTION,
                    self.id
                );
                entity.apply(undo);
                if entity.updated_at() == stamp {
                    entity.touch(previous_stamp);
                }
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::candidat::{Candidat, CandidatField};
    use crate::domain::types::{CandidatId, CandidatStatus, PersonName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCandidatRepository;
    use crate::repository::test::InMemoryRepository;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn candidat(id: i32) -> Candidat {
        Candidat {
            id: CandidatId::new(id).unwrap(),
            first_name: PersonName::new("Lucie").unwrap(),
            last_name: PersonName::new("Bernard").unwrap(),
            email: None,
            phone: None,
            current_position: Some("Juriste".to_string()),
            status: CandidatStatus::Actif,
            created_at: stamp(),
            updated_at: stamp(),
        }
    }

    #[test]
    fn failed_update_rolls_back_the_field() {
        let mut repo = MockCandidatRepository::new();
        repo.expect_update()
            .times(1)
            .returning(|_, _, _| Err(RepositoryError::ConnectionError("offline".into())));

        let mut state = OptimisticEntity::from_entity(candidat(1));
        let result = state.update_field(&repo, CandidatField::Status(CandidatStatus::Place));

        assert!(result.is_err());
        let held = state.entity().unwrap();
        assert_eq!(held.status, CandidatStatus::Actif);
        assert_eq!(held.updated_at, stamp());
        assert_eq!(state.error(), Some("Connection error: offline"));
    }

    #[test]
    fn rollback_leaves_other_fields_alone() {
        let repo = InMemoryRepository::with_rows(vec![candidat(1)]);
        let mut state = OptimisticEntity::from_entity(candidat(1));
        state
            .update_field(&repo, CandidatField::CurrentPosition(Some("Notaire".into())))
            .unwrap();

        repo.fail_writes(true);
        let result = state.update_field(&repo, CandidatField::Status(CandidatStatus::Inactif));

        assert!(result.is_err());
        let held = state.entity().unwrap();
        assert_eq!(held.status, CandidatStatus::Actif);
        assert_eq!(held.current_position.as_deref(), Some("Notaire"));
    }

    #[test]
    fn successful_update_keeps_value_and_advances_stamp() {
        let repo = InMemoryRepository::with_rows(vec![candidat(1)]);
        let mut state = OptimisticEntity::from_entity(candidat(1));

        let updated = state
            .update_field(&repo, CandidatField::Status(CandidatStatus::Place))
            .unwrap();

        assert_eq!(updated.status, CandidatStatus::Place);
        assert!(updated.updated_at > stamp());
        assert_eq!(repo.rows()[0].status, CandidatStatus::Place);
        // Confirmed updates are not followed by a re-fetch.
        assert_eq!(repo.lookups(), 0);
    }

    #[test]
    fn gateway_receives_the_optimistic_stamp() {
        let mut repo = MockCandidatRepository::new();
        repo.expect_update()
            .withf(|id, fields, at| {
                id.get() == 1
                    && fields.to_vec() == vec![CandidatField::Status(CandidatStatus::EnRecherche)]
                    && *at > stamp()
            })
            .returning(|_, _, _| Ok(candidat(1)));

        let mut state = OptimisticEntity::from_entity(candidat(1));
        state
            .update_field(&repo, CandidatField::Status(CandidatStatus::EnRecherche))
            .unwrap();
        assert_eq!(
            state.entity().map(|c| c.status),
            Some(CandidatStatus::EnRecherche)
        );
    }

    #[test]
    fn refresh_twice_yields_identical_state() {
        let repo = InMemoryRepository::with_rows(vec![candidat(3)]);
        let mut state = OptimisticEntity::<Candidat>::new(CandidatId::new(3).unwrap());
        assert!(state.is_loading());

        state.refresh(&repo);
        let first = state.entity().cloned();
        state.refresh(&repo);

        assert!(!state.is_loading());
        assert_eq!(first, state.entity().cloned());
        assert_eq!(first, Some(candidat(3)));
    }

    #[test]
    fn refresh_clears_a_deleted_record() {
        let repo = InMemoryRepository::<Candidat>::empty();
        let mut state = OptimisticEntity::from_entity(candidat(5));

        state.refresh(&repo);

        assert!(state.entity().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn read_failure_is_captured() {
        let repo = InMemoryRepository::with_rows(vec![candidat(2)]);
        repo.fail_reads(true);
        let mut state = OptimisticEntity::<Candidat>::new(CandidatId::new(2).unwrap());

        assert!(state.load(&repo, CandidatId::new(2).unwrap()).is_none());
        assert_eq!(state.error(), Some("Connection error: gateway unreachable"));
        assert!(!state.is_loading());
    }

    #[test]
    fn load_switches_to_another_record() {
        let repo = InMemoryRepository::with_rows(vec![candidat(2), candidat(3)]);
        let mut state = OptimisticEntity::from_entity(candidat(2));

        let loaded = state.load(&repo, CandidatId::new(3).unwrap()).cloned();

        assert_eq!(loaded.map(|c| c.id), CandidatId::new(3).ok());
        assert_eq!(state.id(), CandidatId::new(3).unwrap());
    }

    #[test]
    fn update_without_record_is_not_found() {
        let repo = InMemoryRepository::<Candidat>::empty();
        let mut state = OptimisticEntity::<Candidat>::new(CandidatId::new(8).unwrap());

        let result = state.update_field(&repo, CandidatField::Status(CandidatStatus::Place));
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
