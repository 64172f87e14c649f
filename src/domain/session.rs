//! Explicit operator session.
//!
//! The signed-in operator is carried by a [`Session`] value handed to the
//! services that need it instead of living in process-wide state.

use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactEmail, PersonName};

/// Back-office user acting on records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operator {
    pub name: PersonName,
    pub email: ContactEmail,
}

/// Session lifecycle: initialised on sign-in, cleared on sign-out.
#[derive(Clone, Debug, Default)]
pub struct Session {
    operator: Option<Operator>,
}

impl Session {
    pub fn signed_in(operator: Operator) -> Self {
        Self {
            operator: Some(operator),
        }
    }

    pub fn sign_in(&mut self, operator: Operator) {
        self.operator = Some(operator);
    }

    pub fn sign_out(&mut self) {
        self.operator = None;
    }

    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.operator.is_some()
    }
}
