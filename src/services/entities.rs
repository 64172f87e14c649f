//! Request-level operations shared by every collection endpoint.

use validator::Validate;

use crate::domain::entity::{Entity, Summarize, next_stamp};
use crate::dto::api::ListResponse;
use crate::forms::EntityForm;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists the records matching `query` together with their counts.
pub fn list_entities<E, R>(repo: &R, query: &E::Query) -> ServiceResult<ListResponse<E>>
where
    E: Summarize,
    R: EntityReader<E> + ?Sized,
{
    let items = repo.list(query).map_err(|err| {
        log::error!("Failed to list {}: {err}", E::COLLECTION);
        err
    })?;
    Ok(ListResponse::new(items))
}

pub fn get_entity<E, R>(repo: &R, id: E::Id) -> ServiceResult<E>
where
    E: Entity,
    R: EntityReader<E> + ?Sized,
{
    repo.get_by_id(id)
        .map_err(|err| {
            log::error!("Failed to fetch {} {id}: {err}", E::COLLECTION);
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates `form` and creates the record it describes.
pub fn create_entity<F, R>(repo: &R, form: F) -> ServiceResult<F::Entity>
where
    F: EntityForm,
    R: EntityWriter<F::Entity> + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(err.to_string()));
    }

    let new = form.into_new()?;

    repo.create(&new).map_err(|err| {
        log::error!(
            "Failed to create {}: {err}",
            <F::Entity as Entity>::COLLECTION
        );
        err.into()
    })
}

/// Applies `fields` to a stored record, stamping it after its current
/// modification time.
pub fn update_entity<E, R>(repo: &R, id: E::Id, fields: &[E::Field]) -> ServiceResult<E>
where
    E: Entity,
    R: EntityReader<E> + EntityWriter<E> + ?Sized,
{
    if fields.is_empty() {
        return Err(ServiceError::Form("no fields to update".to_string()));
    }

    let current = get_entity::<E, R>(repo, id)?;
    let stamp = next_stamp(current.updated_at());

    repo.update(id, fields, stamp).map_err(|err| {
        log::error!("Failed to update {} {id}: {err}", E::COLLECTION);
        err.into()
    })
}

pub fn delete_entity<E, R>(repo: &R, id: E::Id) -> ServiceResult<()>
where
    E: Entity,
    R: EntityWriter<E> + ?Sized,
{
    repo.delete(id).map_err(|err| {
        log::error!("Failed to delete {} {id}: {err}", E::COLLECTION);
        err.into()
    })
}
