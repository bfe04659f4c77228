//! TUI rendering: header, roster table, status bar and dialog overlays.

pub mod dialogs;
pub mod record_form;
pub mod roster_table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use roster_core::view::Dialog;

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  roster_table::draw(f, rows[1], app);
  draw_status(f, rows[2], app);

  match &app.view.dialog {
    Dialog::Idle => {}
    Dialog::Add(form) | Dialog::Edit(form) => record_form::draw(f, area, app, form),
    Dialog::DeleteConfirm(id) => dialogs::draw_delete(f, area, app, *id),
    Dialog::Export => dialogs::draw_export(f, area, app),
    Dialog::Columns => dialogs::draw_columns(f, area, app),
    Dialog::Settings { database_url } => dialogs::draw_settings(f, area, database_url),
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%d.%m.%Y").to_string();
  let scope = if app.view.query.active_only { "active" } else { "all" };

  let left = Span::styled(
    format!(" Personel Listesi  ({} {scope})", app.rows().len()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

const TABLE_HINTS: &str = "↑↓ move  ←→ column  o sort  / search  a active/all  n new  e edit  \
                           d delete  t status  x export  T template  c columns  s settings  q quit";

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.view.dialog {
    _ if app.search_active => ("SEARCH", "Type to filter  Enter keep  Esc clear"),
    Dialog::Idle => ("TABLE", TABLE_HINTS),
    Dialog::Add(_) | Dialog::Edit(_) => (
      "FORM",
      "Tab/↑↓ field  ←→ choose  Enter save  Esc cancel",
    ),
    Dialog::DeleteConfirm(_) => ("DELETE", "y confirm  n cancel"),
    Dialog::Export => ("EXPORT", "↑↓ format  Enter export  Esc cancel"),
    Dialog::Columns => ("COLUMNS", "↑↓ move  Space toggle  a show all  Esc close"),
    Dialog::Settings { .. } => ("SETTINGS", "Type URL  Enter save  Esc cancel"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
    .flex(Flex::Center)
    .areas(area);
  let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
    .flex(Flex::Center)
    .areas(row);
  rect
}
