//! Domain records exposed by the recruitment service layer.

pub mod candidat;
pub mod candidature;
pub mod client;
pub mod entity;
pub mod mandat;
pub mod note;
pub mod session;
pub mod types;
