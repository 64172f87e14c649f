//! Database models shared across the recruitment repository.

pub mod candidat;
pub mod candidature;
pub mod client;
pub mod config;
pub mod mandat;
pub mod note;
