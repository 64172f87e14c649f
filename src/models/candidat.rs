use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::candidat::{Candidat as DomainCandidat, NewCandidat as DomainNewCandidat};
use crate::domain::types::{
    CandidatId, CandidatStatus, ContactEmail, PersonName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::candidats)]
/// Diesel model for [`crate::domain::candidat::Candidat`].
pub struct Candidat {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub current_position: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::candidats)]
/// Insertable form of [`Candidat`].
pub struct NewCandidat<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub current_position: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::candidats, treat_none_as_null = true)]
/// Full row rewrite applied after patching a [`Candidat`].
pub struct CandidatChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub current_position: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Candidat> for DomainCandidat {
    type Error = TypeConstraintError;

    fn try_from(row: Candidat) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CandidatId::new(row.id)?,
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            email: row.email.map(ContactEmail::new).transpose()?,
            phone: row.phone.map(PhoneNumber::new).transpose()?,
            current_position: row.current_position,
            status: CandidatStatus::try_from(row.status.as_str())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> NewCandidat<'a> {
    /// Builds the insertable row, stamping both timestamps with `now` and
    /// defaulting the status.
    pub fn stamped(candidat: &'a DomainNewCandidat, now: NaiveDateTime) -> Self {
        Self {
            first_name: candidat.first_name.as_str(),
            last_name: candidat.last_name.as_str(),
            email: candidat.email.as_ref().map(ContactEmail::as_str),
            phone: candidat.phone.as_ref().map(PhoneNumber::as_str),
            current_position: candidat.current_position.as_deref(),
            status: candidat.status.unwrap_or_default().as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainCandidat> for CandidatChangeset<'a> {
    fn from(candidat: &'a DomainCandidat) -> Self {
        Self {
            first_name: candidat.first_name.as_str(),
            last_name: candidat.last_name.as_str(),
            email: candidat.email.as_ref().map(ContactEmail::as_str),
            phone: candidat.phone.as_ref().map(PhoneNumber::as_str),
            current_position: candidat.current_position.as_deref(),
            status: candidat.status.as_str(),
            updated_at: candidat.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row() -> Candidat {
        let now = Utc::now().naive_utc();
        Candidat {
            id: 3,
            first_name: "Louis".to_string(),
            last_name: "Pasteur".to_string(),
            email: Some("louis@example.com".to_string()),
            phone: None,
            current_position: Some("Chimiste".to_string()),
            status: "en_recherche".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_into_domain() {
        let domain = DomainCandidat::try_from(row()).unwrap();
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.full_name(), "Louis Pasteur");
        assert_eq!(domain.status, CandidatStatus::EnRecherche);
        assert_eq!(
            domain.email.as_ref().map(ContactEmail::as_str),
            Some("louis@example.com")
        );
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let mut bad = row();
        bad.status = "embauche".to_string();
        assert!(matches!(
            DomainCandidat::try_from(bad),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }

    #[test]
    fn insertable_defaults_status() {
        let new = DomainNewCandidat {
            first_name: PersonName::new("Ada").unwrap(),
            last_name: PersonName::new("Lovelace").unwrap(),
            email: None,
            phone: None,
            current_position: None,
            status: None,
        };
        let now = Utc::now().naive_utc();
        let insertable = NewCandidat::stamped(&new, now);
        assert_eq!(insertable.status, "actif");
        assert_eq!(insertable.created_at, now);
        assert_eq!(insertable.updated_at, now);
    }
}
