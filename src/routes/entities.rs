//! Collection endpoints under `/api/v1`.
//!
//! Every collection gets the same handlers, instantiated per entity type.

use std::collections::HashMap;

use actix_web::{HttpResponse, Scope, web};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::candidat::Candidat;
use crate::domain::candidature::Candidature;
use crate::domain::client::Client;
use crate::domain::entity::{Entity, Navigable, Summarize};
use crate::domain::mandat::Mandat;
use crate::domain::note::Note;
use crate::dto::api::ErrorBody;
use crate::forms::EntityForm;
use crate::forms::candidat::NewCandidatForm;
use crate::forms::candidature::NewCandidatureForm;
use crate::forms::client::NewClientForm;
use crate::forms::mandat::NewMandatForm;
use crate::repository::{DieselRepository, EntityReader, EntityWriter};
use crate::routes::{error_response, note};
use crate::services::{entities as entity_service, workspace as workspace_service};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(navigable_scope::<Client, NewClientForm>())
        .service(navigable_scope::<Mandat, NewMandatForm>())
        .service(navigable_scope::<Candidat, NewCandidatForm>())
        .service(records::<Candidature>(
            collection(Candidature::COLLECTION.as_str())
                .route("", web::post().to(create::<NewCandidatureForm>)),
        ))
        .service(records::<Note>(
            collection(Note::COLLECTION.as_str()).route("", web::post().to(note::create_note)),
        ));
}

fn collection(name: &str) -> Scope {
    web::scope(&format!("/{name}"))
}

/// Scope of a navigable collection: workspace, creation and record routes.
fn navigable_scope<E, F>() -> Scope
where
    E: Navigable + Summarize + Serialize + 'static,
    E::Stats: Serialize,
    E::Query: DeserializeOwned + 'static,
    E::Field: DeserializeOwned + 'static,
    F: EntityForm<Entity = E> + 'static,
    DieselRepository: EntityReader<E> + EntityWriter<E>,
{
    // `/workspace` must be matched before `/{id}`.
    records::<E>(
        collection(E::COLLECTION.as_str())
            .route("/workspace", web::get().to(workspace::<E>))
            .route("", web::post().to(create::<F>)),
    )
}

fn records<E>(scope: Scope) -> Scope
where
    E: Summarize + Serialize + 'static,
    E::Stats: Serialize,
    E::Query: DeserializeOwned + 'static,
    E::Field: DeserializeOwned + 'static,
    DieselRepository: EntityReader<E> + EntityWriter<E>,
{
    scope
        .route("", web::get().to(list::<E>))
        .route("/{id}", web::get().to(show::<E>))
        .route("/{id}", web::patch().to(patch::<E>))
        .route("/{id}", web::delete().to(destroy::<E>))
}

/// Converts a path segment into the entity's identifier.
pub(crate) fn parse_id<E: Entity>(raw: i32) -> Result<E::Id, HttpResponse> {
    <E::Id as TryFrom<i32>>::try_from(raw)
        .map_err(|_| HttpResponse::NotFound().json(ErrorBody::new("record not found")))
}

async fn list<E>(repo: web::Data<DieselRepository>, query: web::Query<E::Query>) -> HttpResponse
where
    E: Summarize + Serialize,
    E::Stats: Serialize,
    E::Query: DeserializeOwned,
    DieselRepository: EntityReader<E>,
{
    match entity_service::list_entities::<E, _>(repo.get_ref(), &query.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response(&err),
    }
}

async fn show<E>(repo: web::Data<DieselRepository>, path: web::Path<i32>) -> HttpResponse
where
    E: Entity + Serialize,
    DieselRepository: EntityReader<E>,
{
    let id = match parse_id::<E>(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match entity_service::get_entity::<E, _>(repo.get_ref(), id) {
        Ok(entity) => HttpResponse::Ok().json(entity),
        Err(err) => error_response(&err),
    }
}

async fn create<F>(repo: web::Data<DieselRepository>, form: web::Json<F>) -> HttpResponse
where
    F: EntityForm,
    F::Entity: Serialize,
    DieselRepository: EntityWriter<F::Entity>,
{
    match entity_service::create_entity(repo.get_ref(), form.into_inner()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => error_response(&err),
    }
}

async fn patch<E>(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    fields: web::Json<Vec<E::Field>>,
) -> HttpResponse
where
    E: Entity + Serialize,
    E::Field: DeserializeOwned,
    DieselRepository: EntityReader<E> + EntityWriter<E>,
{
    let id = match parse_id::<E>(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match entity_service::update_entity::<E, _>(repo.get_ref(), id, &fields.into_inner()) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => error_response(&err),
    }
}

async fn destroy<E>(repo: web::Data<DieselRepository>, path: web::Path<i32>) -> HttpResponse
where
    E: Entity,
    DieselRepository: EntityWriter<E>,
{
    let id = match parse_id::<E>(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match entity_service::delete_entity::<E, _>(repo.get_ref(), id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

async fn workspace<E>(
    repo: web::Data<DieselRepository>,
    params: web::Query<HashMap<String, String>>,
    query: web::Query<E::Query>,
) -> HttpResponse
where
    E: Navigable + Summarize + Serialize,
    E::Stats: Serialize,
    E::Query: DeserializeOwned,
    DieselRepository: EntityReader<E>,
{
    let data =
        workspace_service::load_workspace::<E, _>(repo.get_ref(), &params, query.into_inner());
    HttpResponse::Ok().json(data)
}
