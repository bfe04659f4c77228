//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use chrono::NaiveDate;
use roster_core::{
  record::{Department, Eligibility, PersonnelRecord, Status, Title, TriState},
  roster::Roster,
  store::RosterStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(registry_number: &str) -> PersonnelRecord {
  let date = |s: &str| s.parse::<NaiveDate>().unwrap();
  PersonnelRecord {
    id: Uuid::new_v4(),
    registry_number: registry_number.into(),
    full_name: "Zeynep Kaya".into(),
    title: Title::AssistantInspector,
    seal_number: TriState::NotApplicable,
    department: Department::InformationSystemsAudits,
    division: TriState::Value("Denetim Analitiği".into()),
    hire_date: date("2023-09-01"),
    banking_seniority_start_date: date("2023-09-01"),
    banking_absence_days: 0,
    audit_seniority_start_date: date("2023-09-01"),
    audit_absence_days: 0,
    promotion_bonus_days: 0,
    banking_seniority_years: 3.12,
    audit_seniority_years: 3.12,
    next_promotion_date: TriState::Value(date("2025-09-01")),
    promotion_eligible: TriState::Value(Eligibility::Yes),
    termination_date: None,
    status: Status::Active,
  }
}

// ─── Roster ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_loads_empty_roster() {
  let s = store().await;
  let roster = s.load_roster().await.unwrap();
  assert!(roster.is_empty());
  assert!(s.roster_saved_at().await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
  let s = store().await;
  let roster = Roster::new(vec![record("1001"), record("1002")]);
  s.save_roster(&roster).await.unwrap();

  let loaded = s.load_roster().await.unwrap();
  assert_eq!(loaded, roster);
  assert!(s.roster_saved_at().await.unwrap().is_some());
}

#[tokio::test]
async fn save_replaces_whole_collection() {
  let s = store().await;
  s.save_roster(&Roster::new(vec![record("1"), record("2"), record("3")]))
    .await
    .unwrap();

  let smaller = Roster::new(vec![record("9")]);
  s.save_roster(&smaller).await.unwrap();

  let loaded = s.load_roster().await.unwrap();
  assert_eq!(loaded.len(), 1);
  assert_eq!(loaded.records()[0].registry_number, "9");
}

#[tokio::test]
async fn corrupt_roster_value_is_an_error() {
  let s = store().await;
  s.put(roster_core::store::ROSTER_KEY, "{not json".into())
    .await
    .unwrap();
  let err = s.load_roster().await.unwrap_err();
  assert!(matches!(err, Error::Core(_)));
}

// ─── Database URL ────────────────────────────────────────────────────────────

#[tokio::test]
async fn database_url_is_independent_of_roster() {
  let s = store().await;
  assert_eq!(s.database_url().await.unwrap(), None);

  s.set_database_url(Some("postgres://db.example/roster"))
    .await
    .unwrap();
  s.save_roster(&Roster::new(vec![record("1")])).await.unwrap();
  assert_eq!(
    s.database_url().await.unwrap().as_deref(),
    Some("postgres://db.example/roster")
  );

  s.set_database_url(None).await.unwrap();
  assert_eq!(s.database_url().await.unwrap(), None);
  assert_eq!(s.load_roster().await.unwrap().len(), 1);
}

// ─── On disk ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("roster.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.save_roster(&Roster::new(vec![record("1001")])).await.unwrap();
    s.set_database_url(Some("https://example.org")).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let roster = s.load_roster().await.unwrap();
  assert_eq!(roster.records()[0].registry_number, "1001");
  assert_eq!(roster.records()[0].seal_number, TriState::NotApplicable);
  assert_eq!(s.database_url().await.unwrap().as_deref(), Some("https://example.org"));
}
