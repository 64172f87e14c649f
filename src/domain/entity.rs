//! Contracts shared by every persisted record.
//!
//! Services and controllers are written against these traits so the same
//! optimistic-update, list and navigation logic serves every collection.

use std::fmt::{self, Debug, Display};

use chrono::{NaiveDateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::domain::types::TypeConstraintError;

/// Named collections exposed by the data gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Clients,
    Mandats,
    Candidats,
    Candidatures,
    Notes,
}

impl Collection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Mandats => "mandats",
            Collection::Candidats => "candidats",
            Collection::Candidatures => "candidatures",
            Collection::Notes => "notes",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record with a stable identifier and repository-maintained
/// timestamps.
pub trait Entity: Clone + Debug {
    /// Positive identifier assigned by the gateway on insert.
    type Id: Copy
        + Eq
        + Debug
        + Display
        + TryFrom<i32, Error = TypeConstraintError>
        + Into<i32>
        + 'static;
    /// Assignment of a single mutable field.
    type Field: Clone + Debug;
    /// Creation payload; the gateway assigns id and timestamps.
    type New: Debug;
    /// Server-side filter. `Default` selects the whole collection.
    type Query: Default + Clone + PartialEq + Debug;

    const COLLECTION: Collection;

    fn id(&self) -> Self::Id;

    fn updated_at(&self) -> NaiveDateTime;

    fn touch(&mut self, at: NaiveDateTime);

    /// Writes `field` into the record and returns the assignment that restores
    /// the previous value.
    fn apply(&mut self, field: Self::Field) -> Self::Field;
}

/// Entities selectable through a URL query parameter.
pub trait Navigable: Entity {
    /// Query parameter carrying the selected identifier, e.g. `mandatId`.
    const URL_KEY: &'static str;
}

/// Entities with counts derived from a loaded list.
pub trait Summarize: Entity {
    type Stats: Default + Debug + PartialEq;

    fn summarize(items: &[Self]) -> Self::Stats;
}

/// Returns a modification stamp strictly later than `previous`.
///
/// Wall-clock time is used when it has moved forward; otherwise the previous
/// stamp is advanced by one microsecond so ordering survives clock skew and
/// coarse clocks.
pub fn next_stamp(previous: NaiveDateTime) -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
