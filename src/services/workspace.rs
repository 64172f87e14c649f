//! Workspace of one navigable collection: the filtered list and the
//! selected record, kept consistent with each other.
//!
//! The list and the selection hold separate copies of a record. Every edit
//! made through [`Workspace`] is written back into both by id.

use std::collections::HashMap;

use crate::domain::entity::{Navigable, Summarize};
use crate::dto::workspace::WorkspaceData;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::collection::EntityList;
use crate::services::navigation::{SelectionController, SelectionParams};
use crate::services::optimistic::OptimisticEntity;
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug)]
pub struct Workspace<E: Navigable + Summarize> {
    list: EntityList<E>,
    selection: SelectionController<E>,
}

impl<E: Navigable + Summarize> Default for Workspace<E> {
    fn default() -> Self {
        Self {
            list: EntityList::new(),
            selection: SelectionController::new(),
        }
    }
}

impl<E: Navigable + Summarize> Workspace<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &EntityList<E> {
        &self.list
    }

    pub fn selection(&self) -> &SelectionController<E> {
        &self.selection
    }

    /// Navigation without writes: `select`, `back`, `edit`, `cancel_edit`.
    pub fn selection_mut(&mut self) -> &mut SelectionController<E> {
        &mut self.selection
    }

    /// Fetches the list for `query` and the record named by `params`.
    pub fn load<R>(&mut self, repo: &R, params: &SelectionParams<E::Id>, query: E::Query)
    where
        R: EntityReader<E> + ?Sized,
    {
        self.list.set_query(repo, query);
        if let Some(ticket) = self.selection.apply_params(params) {
            self.selection.fetch(repo, ticket);
        }
    }

    /// Saves the record being edited and reflects the saved copy into the
    /// list. On failure both copies are left as they were.
    pub fn submit_edit<R>(&mut self, repo: &R, fields: &[E::Field]) -> ServiceResult<E>
    where
        R: EntityWriter<E> + ?Sized,
    {
        let saved = self.selection.submit_edit(repo, fields)?.clone();
        self.list.reconcile(&saved);
        Ok(saved)
    }

    /// Updates one field of the selected record optimistically, outside edit
    /// mode. The confirmed record replaces both copies; a rejected update
    /// leaves them untouched.
    pub fn update_selected<R>(&mut self, repo: &R, field: E::Field) -> ServiceResult<E>
    where
        R: EntityWriter<E> + ?Sized,
    {
        let Some(selected) = self.selection.selected().cloned() else {
            return Err(ServiceError::NotFound);
        };

        let mut hook = OptimisticEntity::from_entity(selected);
        let saved = hook.update_field(repo, field)?.clone();
        self.selection.reflect(&saved);
        self.list.reconcile(&saved);
        Ok(saved)
    }

    /// Page data for the current state.
    pub fn data(&self) -> WorkspaceData<E> {
        WorkspaceData {
            state: self.selection.phase(),
            selected: self.selection.selected().cloned(),
            editing: self.selection.is_editing(),
            items: self.list.items().to_vec(),
            stats: self.list.stats(),
            create: self.selection.create_intent(),
            error: self
                .list
                .error()
                .or(self.selection.error())
                .map(ToString::to_string),
        }
    }
}

/// Loads the filtered list and the record named by the URL parameters.
///
/// Read failures are reported through [`WorkspaceData::error`].
pub fn load_workspace<E, R>(
    repo: &R,
    params: &HashMap<String, String>,
    query: E::Query,
) -> WorkspaceData<E>
where
    E: Navigable + Summarize,
    R: EntityReader<E> + ?Sized,
{
    let params = SelectionParams::from_query(params, E::URL_KEY);

    let mut workspace = Workspace::new();
    workspace.load(repo, &params, query);
    workspace.data()
}
