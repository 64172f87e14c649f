use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{
    ClientId, ClientName, ClientStatus, ContactEmail, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients, treat_none_as_null = true)]
/// Data used when rewriting a [`Client`] record.
pub struct ClientChangeset<'a> {
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            name: ClientName::new(client.name)?,
            industry: client.industry,
            email: client.email.map(ContactEmail::new).transpose()?,
            phone: client.phone.map(PhoneNumber::new).transpose()?,
            address: client.address,
            status: ClientStatus::try_from(client.status.as_str())?,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> NewClient<'a> {
    pub fn stamped(client: &'a DomainNewClient, now: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            industry: client.industry.as_deref(),
            email: client.email.as_ref().map(ContactEmail::as_str),
            phone: client.phone.as_ref().map(PhoneNumber::as_str),
            address: client.address.as_deref(),
            status: client.status.unwrap_or_default().as_str(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainClient> for ClientChangeset<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            name: client.name.as_str(),
            industry: client.industry.as_deref(),
            email: client.email.as_ref().map(ContactEmail::as_str),
            phone: client.phone.as_ref().map(PhoneNumber::as_str),
            address: client.address.as_deref(),
            status: client.status.as_str(),
            updated_at: client.updated_at,
        }
    }
}
