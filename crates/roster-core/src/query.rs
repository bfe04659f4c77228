//! The roster query engine: active filter, search, two-level sort and
//! column visibility.
//!
//! Query state is transient and never persisted. [`RosterQuery::apply`]
//! borrows rows from the roster, so re-deriving the view after every edit
//! copies nothing.

use std::{cmp::Ordering, collections::BTreeSet};

use crate::{
  collate,
  column::{Column, SortValue},
  record::PersonnelRecord,
};

// ─── Sort ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  Asc,
  #[default]
  Desc,
}

impl SortDirection {
  pub fn toggled(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }

  fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      Self::Asc => ordering,
      Self::Desc => ordering.reverse(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
  pub column:    Column,
  pub direction: SortDirection,
}

impl SortKey {
  pub fn new(column: Column, direction: SortDirection) -> Self { Self { column, direction } }

  /// Order two records by this key. Missing values go last whichever way
  /// the key points.
  pub fn compare(&self, a: &PersonnelRecord, b: &PersonnelRecord) -> Ordering {
    match (self.column.sort_value(a), self.column.sort_value(b)) {
      (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
      (SortValue::Missing, _) => Ordering::Greater,
      (_, SortValue::Missing) => Ordering::Less,
      (x, y) => self.direction.apply(x.compare(&y)),
    }
  }
}

/// Columns that, when the user moves off them, become the tie-break.
pub const STICKY_COLUMNS: [Column; 2] = [Column::Title, Column::AuditSeniorityYears];

/// Primary key chosen by the user plus the remembered tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
  pub primary:   SortKey,
  pub secondary: SortKey,
}

impl Default for SortState {
  fn default() -> Self {
    Self {
      primary:   SortKey::new(Column::Title, SortDirection::Desc),
      secondary: SortKey::new(Column::AuditSeniorityYears, SortDirection::Desc),
    }
  }
}

impl SortState {
  /// The user clicked `column`. Clicking the current primary flips its
  /// direction; clicking another column makes it the ascending primary, and
  /// a sticky previous primary becomes the descending secondary.
  pub fn select(self, column: Column) -> Self {
    if self.primary.column == column {
      return Self {
        primary: SortKey::new(column, self.primary.direction.toggled()),
        ..self
      };
    }
    let secondary = if STICKY_COLUMNS.contains(&self.primary.column) {
      SortKey::new(self.primary.column, SortDirection::Desc)
    } else {
      self.secondary
    };
    Self { primary: SortKey::new(column, SortDirection::Asc), secondary }
  }

  pub fn compare(&self, a: &PersonnelRecord, b: &PersonnelRecord) -> Ordering {
    self
      .primary
      .compare(a, b)
      .then_with(|| self.secondary.compare(a, b))
  }
}

// ─── Column visibility ───────────────────────────────────────────────────────

/// Which columns the table and exports include. Everything starts visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
  hidden: BTreeSet<Column>,
}

impl ColumnVisibility {
  pub fn is_visible(&self, column: Column) -> bool { !self.hidden.contains(&column) }

  pub fn toggle(mut self, column: Column) -> Self {
    if !self.hidden.remove(&column) {
      self.hidden.insert(column);
    }
    self
  }

  pub fn show_all(self) -> Self { Self::default() }

  /// Visible columns in display order.
  pub fn visible(&self) -> Vec<Column> {
    Column::all().filter(|c| self.is_visible(*c)).collect()
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
  pub search:      String,
  pub active_only: bool,
  pub sort:        SortState,
  pub columns:     ColumnVisibility,
}

impl Default for RosterQuery {
  fn default() -> Self {
    Self {
      search:      String::new(),
      active_only: true,
      sort:        SortState::default(),
      columns:     ColumnVisibility::default(),
    }
  }
}

impl RosterQuery {
  /// Filter then sort `records`. The sort is stable, so rows equal on both
  /// keys keep roster order.
  pub fn apply<'a>(&self, records: &'a [PersonnelRecord]) -> Vec<&'a PersonnelRecord> {
    let needle = collate::fold(self.search.trim());
    let mut rows: Vec<&PersonnelRecord> = records
      .iter()
      .filter(|r| !self.active_only || r.is_active())
      .filter(|r| matches_search(r, &needle))
      .collect();
    rows.sort_by(|a, b| self.sort.compare(a, b));
    rows
  }
}

/// Whether any field of `record` contains the already-folded `needle`.
/// Each column is tried in both its stored and displayed form, so dates
/// match as `2020-03-10` and as `10.03.2020`.
pub fn matches_search(record: &PersonnelRecord, needle: &str) -> bool {
  if needle.is_empty() {
    return true;
  }
  collate::fold(&record.id.to_string()).contains(needle)
    || Column::all().any(|column| {
      collate::fold(&column.raw(record)).contains(needle)
        || collate::fold(&column.display(record)).contains(needle)
    })
}
