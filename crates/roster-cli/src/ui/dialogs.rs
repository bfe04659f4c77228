//! Small popups: delete confirmation, export format, column chooser,
//! settings.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use roster_core::column::Column;
use uuid::Uuid;

use crate::{
  app::{App, EXPORT_FORMATS},
  ui::centered,
};

fn popup_block(title: &str) -> Block<'_> {
  Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan))
}

fn highlight() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

pub fn draw_delete(f: &mut Frame, area: Rect, app: &App, id: Uuid) {
  let name = app
    .roster
    .get(id)
    .map(|r| format!("{} ({})", r.full_name, r.registry_number))
    .unwrap_or_default();
  let text = vec![
    Line::from("Bu personeli silmek istediğinize emin misiniz?"),
    Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(Span::styled("[y] delete   [n] cancel", Style::default().fg(Color::Gray))),
  ];
  let popup = centered(area, 60, 6);
  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(text)
      .block(popup_block(" Personeli Sil "))
      .wrap(Wrap { trim: true }),
    popup,
  );
}

pub fn draw_export(f: &mut Frame, area: Rect, app: &App) {
  let rows = app.rows().len();
  let columns = app.visible_columns().len();
  let items: Vec<ListItem> = EXPORT_FORMATS
    .iter()
    .map(|format| ListItem::new(format.label()))
    .collect();

  let popup = centered(area, 50, EXPORT_FORMATS.len() as u16 + 4);
  let block = popup_block(" Dışa Aktar ");
  let inner = block.inner(popup);
  f.render_widget(Clear, popup);
  f.render_widget(block, popup);

  let [summary, list] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
  f.render_widget(
    Paragraph::new(format!("{rows} rows, {columns} columns"))
      .style(Style::default().fg(Color::Gray)),
    summary,
  );

  let mut state = ListState::default().with_selected(Some(app.menu_cursor));
  f.render_stateful_widget(List::new(items).highlight_style(highlight()), list, &mut state);
}

pub fn draw_columns(f: &mut Frame, area: Rect, app: &App) {
  let visibility = &app.view.query.columns;
  let items: Vec<ListItem> = Column::all()
    .map(|column| {
      let mark = if visibility.is_visible(column) { "[x]" } else { "[ ]" };
      ListItem::new(format!("{mark} {}", column.label()))
    })
    .collect();

  let popup = centered(area, 56, items.len() as u16 + 2);
  let mut state = ListState::default().with_selected(Some(app.menu_cursor));
  f.render_widget(Clear, popup);
  f.render_stateful_widget(
    List::new(items)
      .block(popup_block(" Sütunlar "))
      .highlight_style(highlight()),
    popup,
    &mut state,
  );
}

pub fn draw_settings(f: &mut Frame, area: Rect, database_url: &str) {
  let text = vec![
    Line::from(Span::styled("Veritabanı URL", Style::default().fg(Color::Gray))),
    Line::from(Span::styled(
      format!("{database_url}_"),
      Style::default().fg(Color::White).bg(Color::Blue),
    )),
    Line::from(""),
    Line::from(Span::styled(
      "Leave empty to clear.",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  let popup = centered(area, 70, 6);
  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(text).block(popup_block(" Ayarlar ")), popup);
}
