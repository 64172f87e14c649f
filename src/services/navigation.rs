//! Selection state driven by URL query parameters.
//!
//! A [`SelectionController`] tracks which record of a navigable collection is
//! shown, whether it is being edited, and the fetch needed when the URL names
//! a record that is not in memory yet:
//!
//! ```text
//! Idle --url id--> Loading --found--> Selected <--cancel/submit-- Editing
//!   ^                 |                  |  \-------edit-------->
//!   +----not found----+                  |
//!   +----------------back----------------+
//! ```
//!
//! Fetches happen in two steps. [`SelectionController::sync_url`] hands out a
//! [`FetchTicket`] and [`SelectionController::resolve`] applies its result.
//! Every transition that abandons a fetch bumps the generation, so a result
//! arriving for an abandoned ticket is dropped. The controller never rewrites
//! the URL; clearing it after [`SelectionController::back`] is up to the
//! caller.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entity::{Entity, Navigable, next_stamp};
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameter holding the parent record of a creation form.
pub const PARENT_KEY: &str = "parentId";
/// Query parameter requesting a creation form.
pub const ACTION_KEY: &str = "action";
pub const ACTION_CREATE: &str = "create";

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionState<E: Entity> {
    Idle,
    Loading(E::Id),
    Selected(E),
    Editing(E),
}

/// Name of a [`SelectionState`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    Idle,
    Loading,
    Selected,
    Editing,
}

impl<E: Entity> SelectionState<E> {
    pub fn phase(&self) -> SelectionPhase {
        match self {
            SelectionState::Idle => SelectionPhase::Idle,
            SelectionState::Loading(_) => SelectionPhase::Loading,
            SelectionState::Selected(_) => SelectionPhase::Selected,
            SelectionState::Editing(_) => SelectionPhase::Editing,
        }
    }
}

/// Selection-related query parameters of one navigable collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionParams<I> {
    pub id: Option<I>,
    pub parent_id: Option<i32>,
    pub create: bool,
}

impl<I> Default for SelectionParams<I> {
    fn default() -> Self {
        Self {
            id: None,
            parent_id: None,
            create: false,
        }
    }
}

impl<I: TryFrom<i32>> SelectionParams<I> {
    /// Reads `key`, `parentId` and `action` from a query map.
    ///
    /// Ids that are not positive integers are treated as absent.
    pub fn from_query(query: &HashMap<String, String>, key: &str) -> Self {
        Self {
            id: parse_id(query.get(key)).and_then(|id| I::try_from(id).ok()),
            parent_id: parse_id(query.get(PARENT_KEY)),
            create: query
                .get(ACTION_KEY)
                .is_some_and(|action| action == ACTION_CREATE),
        }
    }
}

fn parse_id(raw: Option<&String>) -> Option<i32> {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .filter(|id| *id > 0)
}

/// Pending creation form, optionally pre-filled with a parent record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CreateIntent {
    pub parent_id: Option<i32>,
}

/// Handle for one fetch started by [`SelectionController::sync_url`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket<I> {
    pub id: I,
    generation: u64,
}

#[derive(Debug)]
pub struct SelectionController<E: Navigable> {
    state: SelectionState<E>,
    url_id: Option<E::Id>,
    /// Last id fetched for the current URL value. Reset when the URL id
    /// changes or the selection is cleared.
    attempted: Option<E::Id>,
    generation: u64,
    create: Option<CreateIntent>,
    error: Option<String>,
}

impl<E: Navigable> Default for SelectionController<E> {
    fn default() -> Self {
        Self {
            state: SelectionState::Idle,
            url_id: None,
            attempted: None,
            generation: 0,
            create: None,
            error: None,
        }
    }
}

impl<E: Navigable> SelectionController<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState<E> {
        &self.state
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    /// Record held in `Selected` or `Editing`.
    pub fn selected(&self) -> Option<&E> {
        match &self.state {
            SelectionState::Selected(entity) | SelectionState::Editing(entity) => Some(entity),
            SelectionState::Idle | SelectionState::Loading(_) => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SelectionState::Editing(_))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Creation form requested through `action=create`.
    pub fn create_intent(&self) -> Option<CreateIntent> {
        self.create
    }

    /// Takes all selection parameters from the URL.
    pub fn apply_params(&mut self, params: &SelectionParams<E::Id>) -> Option<FetchTicket<E::Id>> {
        self.create = params.create.then_some(CreateIntent {
            parent_id: params.parent_id,
        });
        self.sync_url(params.id)
    }

    /// Follows the URL id.
    ///
    /// Returns a ticket when the id names a record that is not held locally
    /// and has not been fetched for this URL value yet.
    pub fn sync_url(&mut self, id: Option<E::Id>) -> Option<FetchTicket<E::Id>> {
        if self.url_id != id {
            self.url_id = id;
            self.attempted = None;
        }

        let Some(id) = id else {
            if matches!(self.state, SelectionState::Loading(_)) {
                self.abandon();
                self.state = SelectionState::Idle;
            }
            return None;
        };

        match self.state {
            SelectionState::Selected(_) | SelectionState::Editing(_) => return None,
            SelectionState::Loading(current) if current == id => return None,
            SelectionState::Loading(_) | SelectionState::Idle => {}
        }
        if self.attempted == Some(id) {
            return None;
        }

        self.abandon();
        self.attempted = Some(id);
        self.state = SelectionState::Loading(id);
        Some(FetchTicket {
            id,
            generation: self.generation,
        })
    }

    /// Applies a fetch result. Returns `false` when the ticket is stale.
    ///
    /// A missing record returns the controller to `Idle` without refetching.
    pub fn resolve(&mut self, ticket: FetchTicket<E::Id>, entity: Option<E>) -> bool {
        if !self.is_current(&ticket) {
            log::debug!(
                "Dropping stale fetch of {} {}",
                E::COLLECTION,
                ticket.id
            );
            return false;
        }
        self.error = None;
        self.state = match entity {
            Some(entity) => SelectionState::Selected(entity),
            None => SelectionState::Idle,
        };
        true
    }

    /// Records a failed fetch. Returns `false` when the ticket is stale.
    pub fn fail(&mut self, ticket: FetchTicket<E::Id>, error: impl ToString) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        let message = error.to_string();
        log::error!("Failed to fetch {} {}: {message}", E::COLLECTION, ticket.id);
        self.error = Some(message);
        self.state = SelectionState::Idle;
        true
    }

    /// Follows the URL id and runs the resulting fetch, if any.
    pub fn load<R>(&mut self, repo: &R, id: Option<E::Id>) -> &SelectionState<E>
    where
        R: EntityReader<E> + ?Sized,
    {
        if let Some(ticket) = self.sync_url(id) {
            self.fetch(repo, ticket);
        }
        &self.state
    }

    /// Runs the fetch for `ticket` and applies its result.
    pub fn fetch<R>(&mut self, repo: &R, ticket: FetchTicket<E::Id>) -> bool
    where
        R: EntityReader<E> + ?Sized,
    {
        match repo.get_by_id(ticket.id) {
            Ok(entity) => self.resolve(ticket, entity),
            Err(err) => self.fail(ticket, err),
        }
    }

    /// Shows a record chosen explicitly, e.g. from a list.
    pub fn select(&mut self, entity: E) {
        self.abandon();
        self.error = None;
        self.state = SelectionState::Selected(entity);
    }

    /// Replaces the held record with a saved copy of it, keeping the phase.
    ///
    /// Returns `false` when no record with that id is selected.
    pub fn reflect(&mut self, entity: &E) -> bool {
        match &mut self.state {
            SelectionState::Selected(held) | SelectionState::Editing(held)
                if held.id() == entity.id() =>
            {
                *held = entity.clone();
                true
            }
            _ => false,
        }
    }

    /// Clears the selection.
    pub fn back(&mut self) {
        self.abandon();
        self.attempted = None;
        self.state = SelectionState::Idle;
    }

    /// Enters edit mode. The held record is not modified.
    pub fn edit(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SelectionState::Idle) {
            SelectionState::Selected(entity) => {
                self.state = SelectionState::Editing(entity);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Leaves edit mode keeping the record as it was.
    pub fn cancel_edit(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SelectionState::Idle) {
            SelectionState::Editing(entity) => {
                self.state = SelectionState::Selected(entity);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Persists the edited fields and shows the record returned by the
    /// gateway. On failure the controller stays in `Editing`.
    pub fn submit_edit<R>(&mut self, repo: &R, fields: &[E::Field]) -> ServiceResult<&E>
    where
        R: EntityWriter<E> + ?Sized,
    {
        let SelectionState::Editing(entity) = &self.state else {
            return Err(ServiceError::Form("no record is being edited".to_string()));
        };

        let id = entity.id();
        let stamp = next_stamp(entity.updated_at());
        match repo.update(id, fields, stamp) {
            Ok(updated) => {
                self.error = None;
                self.state = SelectionState::Selected(updated);
                self.selected().ok_or(ServiceError::NotFound)
            }
            Err(err) => {
                log::error!("Failed to save {} {id}: {err}", E::COLLECTION);
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    fn is_current(&self, ticket: &FetchTicket<E::Id>) -> bool {
        ticket.generation == self.generation
            && matches!(self.state, SelectionState::Loading(id) if id == ticket.id)
    }

    fn abandon(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::mandat::{Mandat, MandatField};
    use crate::domain::types::{ClientId, JobTitle, MandatId, MandatStatus};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockMandatRepository;
    use crate::repository::test::InMemoryRepository;

    fn mandat(id: i32) -> Mandat {
        let at = NaiveDate::from_ymd_opt(2024, 9, 12)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        Mandat {
            id: MandatId::new(id).unwrap(),
            client_id: ClientId::new(1).unwrap(),
            title: JobTitle::new("Responsable RH").unwrap(),
            description: None,
            location: None,
            status: MandatStatus::Ouvert,
            created_at: at,
            updated_at: at,
        }
    }

    fn id(value: i32) -> MandatId {
        MandatId::new(value).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_url_id_is_idle() {
        let repo = InMemoryRepository::with_rows(vec![mandat(1)]);
        let mut controller = SelectionController::<Mandat>::new();

        assert_eq!(controller.load(&repo, None), &SelectionState::Idle);
        assert_eq!(repo.lookups(), 0);
    }

    #[test]
    fn missing_record_goes_idle_and_is_not_refetched() {
        let repo = InMemoryRepository::<Mandat>::empty();
        let mut controller = SelectionController::<Mandat>::new();
        let params = SelectionParams::from_query(&query(&[("mandatId", "42")]), Mandat::URL_KEY);

        let ticket = controller.apply_params(&params).unwrap();
        assert_eq!(ticket.id, id(42));
        assert_eq!(controller.phase(), SelectionPhase::Loading);
        assert!(controller.resolve(ticket, repo.get_by_id(ticket.id).unwrap()));
        assert_eq!(controller.state(), &SelectionState::Idle);

        for _ in 0..3 {
            controller.load(&repo, Some(id(42)));
        }
        assert_eq!(repo.lookups(), 1);
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn changed_url_id_fetches_again() {
        let repo = InMemoryRepository::with_rows(vec![mandat(7)]);
        let mut controller = SelectionController::<Mandat>::new();

        controller.load(&repo, Some(id(42)));
        assert_eq!(controller.phase(), SelectionPhase::Idle);

        controller.load(&repo, Some(id(7)));
        assert_eq!(controller.selected(), Some(&mandat(7)));
        controller.load(&repo, Some(id(7)));
        assert_eq!(repo.lookups(), 2);
    }

    #[test]
    fn found_record_is_selected_once() {
        let mut repo = MockMandatRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(mandat(id.get()))));
        let mut controller = SelectionController::<Mandat>::new();

        controller.load(&repo, Some(id(3)));
        controller.load(&repo, Some(id(3)));

        assert_eq!(controller.phase(), SelectionPhase::Selected);
        assert_eq!(controller.selected().map(|m| m.id), Some(id(3)));
    }

    #[test]
    fn local_selection_suppresses_fetch() {
        let repo = InMemoryRepository::with_rows(vec![mandat(5)]);
        let mut controller = SelectionController::<Mandat>::new();

        controller.select(mandat(5));
        assert!(controller.sync_url(Some(id(5))).is_none());
        assert_eq!(repo.lookups(), 0);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut controller = SelectionController::<Mandat>::new();

        let first = controller.sync_url(Some(id(1))).unwrap();
        let second = controller.sync_url(Some(id(2))).unwrap();

        assert!(!controller.resolve(first, Some(mandat(1))));
        assert_eq!(controller.state(), &SelectionState::Loading(id(2)));
        assert!(controller.resolve(second, Some(mandat(2))));
        assert_eq!(controller.selected().map(|m| m.id), Some(id(2)));
    }

    #[test]
    fn result_after_back_is_discarded() {
        let mut controller = SelectionController::<Mandat>::new();
        let ticket = controller.sync_url(Some(id(1))).unwrap();

        controller.back();

        assert!(!controller.resolve(ticket, Some(mandat(1))));
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn result_after_explicit_selection_is_discarded() {
        let mut controller = SelectionController::<Mandat>::new();
        let ticket = controller.sync_url(Some(id(1))).unwrap();

        controller.select(mandat(9));

        assert!(!controller.fail(ticket, "late failure"));
        assert_eq!(controller.selected().map(|m| m.id), Some(id(9)));
        assert!(controller.error().is_none());
    }

    #[test]
    fn clearing_url_while_loading_goes_idle() {
        let mut controller = SelectionController::<Mandat>::new();
        let ticket = controller.sync_url(Some(id(4))).unwrap();

        assert!(controller.sync_url(None).is_none());
        assert_eq!(controller.state(), &SelectionState::Idle);
        assert!(!controller.resolve(ticket, Some(mandat(4))));
    }

    #[test]
    fn back_allows_the_same_id_to_be_fetched_again() {
        let repo = InMemoryRepository::with_rows(vec![mandat(6)]);
        let mut controller = SelectionController::<Mandat>::new();

        controller.load(&repo, Some(id(6)));
        controller.back();
        assert_eq!(controller.phase(), SelectionPhase::Idle);

        controller.load(&repo, Some(id(6)));
        assert_eq!(controller.phase(), SelectionPhase::Selected);
        assert_eq!(repo.lookups(), 2);
    }

    #[test]
    fn fetch_failure_is_captured_as_idle() {
        let repo = InMemoryRepository::with_rows(vec![mandat(6)]);
        repo.fail_reads(true);
        let mut controller = SelectionController::<Mandat>::new();

        controller.load(&repo, Some(id(6)));
        controller.load(&repo, Some(id(6)));

        assert_eq!(controller.phase(), SelectionPhase::Idle);
        assert_eq!(
            controller.error(),
            Some("Connection error: gateway unreachable")
        );
        assert_eq!(repo.lookups(), 1);
    }

    #[test]
    fn edit_and_cancel_keep_the_record() {
        let mut controller = SelectionController::<Mandat>::new();
        assert!(!controller.edit());

        controller.select(mandat(2));
        assert!(controller.edit());
        assert!(controller.is_editing());
        assert_eq!(controller.selected(), Some(&mandat(2)));

        assert!(controller.cancel_edit());
        assert_eq!(controller.state(), &SelectionState::Selected(mandat(2)));
        assert!(!controller.cancel_edit());
    }

    #[test]
    fn submit_merges_the_saved_record() {
        let repo = InMemoryRepository::with_rows(vec![mandat(2)]);
        let mut controller = SelectionController::<Mandat>::new();
        controller.select(mandat(2));
        controller.edit();

        let saved = controller
            .submit_edit(&repo, &[MandatField::Status(MandatStatus::EnCours)])
            .unwrap()
            .clone();

        assert_eq!(saved.status, MandatStatus::EnCours);
        assert!(saved.updated_at > mandat(2).updated_at);
        assert_eq!(controller.state(), &SelectionState::Selected(saved));
    }

    #[test]
    fn failed_submit_stays_in_edit_mode() {
        let mut repo = MockMandatRepository::new();
        repo.expect_update()
            .returning(|_, _, _| Err(RepositoryError::ConstraintViolation("status".into())));
        let mut controller = SelectionController::<Mandat>::new();
        controller.select(mandat(2));
        controller.edit();

        let result = controller.submit_edit(&repo, &[MandatField::Status(MandatStatus::Pourvu)]);

        assert!(result.is_err());
        assert_eq!(controller.state(), &SelectionState::Editing(mandat(2)));
        assert!(controller.error().is_some());
    }

    #[test]
    fn submit_requires_edit_mode() {
        let repo = InMemoryRepository::with_rows(vec![mandat(2)]);
        let mut controller = SelectionController::<Mandat>::new();
        controller.select(mandat(2));

        let result = controller.submit_edit(&repo, &[]);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn params_parse_parent_and_action() {
        let params = SelectionParams::<MandatId>::from_query(
            &query(&[("mandatId", "abc"), ("parentId", "12"), ("action", "create")]),
            Mandat::URL_KEY,
        );
        assert_eq!(params.id, None);
        assert_eq!(params.parent_id, Some(12));
        assert!(params.create);

        let mut controller = SelectionController::<Mandat>::new();
        assert!(controller.apply_params(&params).is_none());
        assert_eq!(
            controller.create_intent(),
            Some(CreateIntent {
                parent_id: Some(12)
            })
        );

        let params = SelectionParams::<MandatId>::from_query(
            &query(&[("mandatId", "0"), ("action", "view")]),
            Mandat::URL_KEY,
        );
        assert_eq!(params, SelectionParams::default());
    }

    #[test]
    fn reflect_replaces_only_the_held_record() {
        let mut controller = SelectionController::<Mandat>::new();
        let mut saved = mandat(3);
        saved.status = MandatStatus::Pourvu;

        assert!(!controller.reflect(&saved));

        controller.select(mandat(3));
        controller.edit();
        assert!(controller.reflect(&saved));
        assert!(controller.is_editing());
        assert_eq!(controller.selected(), Some(&saved));

        assert!(!controller.reflect(&mandat(4)));
        assert_eq!(controller.selected(), Some(&saved));
    }
}
