//! The roster table: filtered, sorted rows over the visible columns.

use std::ops::Range;

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use roster_core::{
  column::Column,
  query::{SortDirection, SortState},
};

use crate::app::App;

const MIN_WIDTH: u16 = 6;
const MAX_WIDTH: u16 = 28;

/// Render the roster table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = app.rows();
  let columns = app.visible_columns();
  let query = &app.view.query;

  let title = if query.search.is_empty() && !app.search_active {
    format!(" Personel ({}/{}) ", rows.len(), app.roster.len())
  } else {
    format!(" Personel ({}/{})  /{} ", rows.len(), app.roster.len(), query.search)
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if rows.is_empty() {
    let hint = if app.roster.is_empty() {
      "No personnel yet. Press n to add."
    } else {
      "No matching rows."
    };
    f.render_widget(
      Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  // Only the columns that fit, always including the focused one.
  let widths: Vec<u16> = columns
    .iter()
    .map(|c| {
      let header = c.label().chars().count() + 2;
      let cells = rows
        .iter()
        .map(|r| c.display(r).chars().count())
        .max()
        .unwrap_or(0);
      (header.max(cells) as u16).clamp(MIN_WIDTH, MAX_WIDTH)
    })
    .collect();
  let window = column_window(&widths, app.focus_column, inner.width);

  let header = Row::new(columns[window.clone()].iter().enumerate().map(|(i, column)| {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if window.start + i == app.focus_column {
      style = style.fg(Color::Black).bg(Color::Cyan);
    }
    Cell::from(format!("{}{}", column.label(), sort_marker(&query.sort, *column))).style(style)
  }))
  .style(Style::default().fg(Color::Cyan));

  let body = rows.iter().map(|record| {
    let cells = columns[window.clone()].iter().map(|column| {
      let line = Line::from(column.display(record));
      Cell::from(if column.centered() { line.alignment(Alignment::Center) } else { line })
    });
    let style = if record.is_active() {
      Style::default()
    } else {
      Style::default().fg(Color::DarkGray)
    };
    Row::new(cells).style(style)
  });

  let table = Table::new(body, widths[window.clone()].iter().map(|w| Constraint::Length(*w)))
    .header(header)
    .column_spacing(1)
    .row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    );

  let mut state = TableState::default().with_selected(Some(app.cursor));
  f.render_stateful_widget(table, inner, &mut state);
}

/// `▲`/`▼` on the primary sort column, `△`/`▽` on the tie-break.
fn sort_marker(sort: &SortState, column: Column) -> &'static str {
  let arrow = |direction: SortDirection, filled: bool| match (direction, filled) {
    (SortDirection::Asc, true) => " ▲",
    (SortDirection::Desc, true) => " ▼",
    (SortDirection::Asc, false) => " △",
    (SortDirection::Desc, false) => " ▽",
  };
  if sort.primary.column == column {
    arrow(sort.primary.direction, true)
  } else if sort.secondary.column == column {
    arrow(sort.secondary.direction, false)
  } else {
    ""
  }
}

/// The run of columns starting as far left as possible while `focus` still
/// fits in `available` cells.
fn column_window(widths: &[u16], focus: usize, available: u16) -> Range<usize> {
  if widths.is_empty() {
    return 0..0;
  }
  let focus = focus.min(widths.len() - 1);
  let fits = |range: Range<usize>| {
    widths[range].iter().map(|w| u32::from(*w) + 1).sum::<u32>() <= u32::from(available) + 1
  };

  let mut start = 0;
  while start < focus && !fits(start..focus + 1) {
    start += 1;
  }
  let mut end = focus + 1;
  while end < widths.len() && fits(start..end + 1) {
    end += 1;
  }
  start..end
}
