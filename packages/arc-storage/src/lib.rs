//! Read-only access to the host application's relational store.
//!
//! The schema belongs to the archival application; this crate never creates or migrates tables.

pub mod db;
pub mod repositories;
pub mod terms;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
