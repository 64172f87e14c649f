use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Collection, Entity, Navigable, Summarize};
use crate::domain::types::{ClientId, ClientName, ClientStatus, ContactEmail, PhoneNumber};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub industry: Option<String>,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub status: ClientStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: ClientName,
    pub industry: Option<String>,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ClientField {
    Name(ClientName),
    Industry(Option<String>),
    Email(Option<ContactEmail>),
    Phone(Option<PhoneNumber>),
    Address(Option<String>),
    Status(ClientStatus),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClientQuery {
    pub status: Option<ClientStatus>,
    pub search: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub total: usize,
    #[serde(rename = "actifs")]
    pub active: usize,
    pub prospects: usize,
    #[serde(rename = "inactifs")]
    pub inactive: usize,
}

impl Entity for Client {
    type Id = ClientId;
    type Field = ClientField;
    type New = NewClient;
    type Query = ClientQuery;

    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> ClientId {
        self.id
    }

    fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    fn touch(&mut self, at: NaiveDateTime) {
        self.updated_at = at;
    }

    fn apply(&mut self, field: ClientField) -> ClientField {
        use std::mem::replace;

        match field {
            ClientField::Name(v) => ClientField::Name(replace(&mut self.name, v)),
            ClientField::Industry(v) => ClientField::Industry(replace(&mut self.industry, v)),
            ClientField::Email(v) => ClientField::Email(replace(&mut self.email, v)),
            ClientField::Phone(v) => ClientField::Phone(replace(&mut self.phone, v)),
            ClientField::Address(v) => ClientField::Address(replace(&mut self.address, v)),
            ClientField::Status(v) => ClientField::Status(replace(&mut self.status, v)),
        }
    }
}

impl Navigable for Client {
    const URL_KEY: &'static str = "clientId";
}

impl Summarize for Client {
    type Stats = ClientStats;

    fn summarize(items: &[Self]) -> ClientStats {
        let mut stats = ClientStats {
            total: items.len(),
            ..ClientStats::default()
        };
        for client in items {
            match client.status {
                ClientStatus::Actif => stats.active += 1,
                ClientStatus::Prospect => stats.prospects += 1,
                ClientStatus::Inactif => stats.inactive += 1,
            }
        }
        stats
    }
}
