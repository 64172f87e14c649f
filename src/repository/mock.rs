//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::candidat::{Candidat, CandidatField, CandidatQuery, NewCandidat};
use crate::domain::mandat::{Mandat, MandatField, MandatQuery, NewMandat};
use crate::domain::types::{CandidatId, MandatId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{EntityReader, EntityWriter};

mock! {
    pub CandidatRepository {}

    impl EntityReader<Candidat> for CandidatRepository {
        fn get_by_id(&self, id: CandidatId) -> RepositoryResult<Option<Candidat>>;
        fn list(&self, query: &CandidatQuery) -> RepositoryResult<Vec<Candidat>>;
    }

    impl EntityWriter<Candidat> for CandidatRepository {
        fn create(&self, new: &NewCandidat) -> RepositoryResult<Candidat>;
        fn update(
            &self,
            id: CandidatId,
            fields: &[CandidatField],
            stamp: NaiveDateTime,
        ) -> RepositoryResult<Candidat>;
        fn delete(&self, id: CandidatId) -> RepositoryResult<()>;
    }
}

mock! {
    pub MandatRepository {}

    impl EntityReader<Mandat> for MandatRepository {
        fn get_by_id(&self, id: MandatId) -> RepositoryResult<Option<Mandat>>;
        fn list(&self, query: &MandatQuery) -> RepositoryResult<Vec<Mandat>>;
    }

    impl EntityWriter<Mandat> for MandatRepository {
        fn create(&self, new: &NewMandat) -> RepositoryResult<Mandat>;
        fn update(
            &self,
            id: MandatId,
            fields: &[MandatField],
            stamp: NaiveDateTime,
        ) -> RepositoryResult<Mandat>;
        fn delete(&self, id: MandatId) -> RepositoryResult<()>;
    }
}
