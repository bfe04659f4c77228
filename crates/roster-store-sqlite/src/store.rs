//! [`SqliteStore`], the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::OptionalExtension as _;

use roster_core::{
  roster::Roster,
  store::{DATABASE_URL_KEY, ROSTER_KEY, RosterStore},
};

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Raw key-value access ──────────────────────────────────────────────────

  async fn get(&self, key: &'static str) -> Result<Option<String>> {
    let value = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM kv WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get::<_, String>(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(value)
  }

  pub(crate) async fn put(&self, key: &'static str, value: String) -> Result<()> {
    let at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
          rusqlite::params![key, value, at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete(&self, key: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// When the roster was last written, if ever.
  pub async fn roster_saved_at(&self) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT updated_at FROM kv WHERE key = ?1",
              rusqlite::params![ROSTER_KEY],
              |row| row.get::<_, String>(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.and_then(|s| {
      DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .inspect_err(|e| tracing::warn!(value = %s, error = %e, "unparseable updated_at"))
        .ok()
    }))
  }
}

fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Millis, true) }

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  async fn load_roster(&self) -> Result<Roster> {
    match self.get(ROSTER_KEY).await? {
      Some(json) => Ok(Roster::from_json(&json)?),
      None => Ok(Roster::default()),
    }
  }

  async fn save_roster(&self, roster: &Roster) -> Result<()> {
    let json = roster.to_json()?;
    tracing::debug!(records = roster.len(), bytes = json.len(), "saving roster");
    self.put(ROSTER_KEY, json).await
  }

  async fn database_url(&self) -> Result<Option<String>> { self.get(DATABASE_URL_KEY).await }

  async fn set_database_url(&self, url: Option<&str>) -> Result<()> {
    match url {
      Some(url) => self.put(DATABASE_URL_KEY, url.to_owned()).await,
      None => self.delete(DATABASE_URL_KEY).await,
    }
  }
}
