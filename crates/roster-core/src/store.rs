//! The `RosterStore` trait.
//!
//! A store is a two-key key-value collaborator: one key holds the whole
//! serialised roster, the other an optional remote database URL. Backends
//! such as `roster-store-sqlite` implement the trait.

use std::future::Future;

use crate::roster::Roster;

/// Key under which the roster collection is stored.
pub const ROSTER_KEY: &str = "personnel";

/// Key holding the configured remote database URL.
pub const DATABASE_URL_KEY: &str = "databaseUrl";

/// Abstraction over a roster persistence backend.
///
/// Writes always replace the whole value of a key.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the stored roster. A store that has never been written yields an
  /// empty roster.
  fn load_roster(&self) -> impl Future<Output = Result<Roster, Self::Error>> + Send + '_;

  /// Replace the stored roster with `roster`.
  fn save_roster<'a>(
    &'a self,
    roster: &'a Roster,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn database_url(&self) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Set the database URL, or remove it with `None`.
  fn set_database_url<'a>(
    &'a self,
    url: Option<&'a str>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
