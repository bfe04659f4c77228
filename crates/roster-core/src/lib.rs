//! Core types and rule engines for the roster personnel store.
//!
//! No terminal, file-format or database code lives here. The crate holds
//! the record model, the rule engine that derives seniority and promotion
//! fields, the query engine behind the roster table, and the
//! [`store::RosterStore`] abstraction that backends implement.

pub mod collate;
pub mod column;
pub mod error;
pub mod export;
pub mod form;
pub mod query;
pub mod record;
pub mod roster;
pub mod rules;
pub mod store;
pub mod view;

pub use error::{Error, Result, ValidationError};
