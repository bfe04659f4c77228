//! Standalone HTML rendering with `quick-xml`'s writer.

use std::io::Cursor;

use chrono::{Datelike, NaiveDateTime};
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};
use roster_core::{collate, export::ExportTable};

use crate::{Error, Result};

pub const ORGANIZATION: &str = "Vakıf Katılım Bankası";
pub const UNIT: &str = "Teftiş Kurulu Başkanlığı";
pub const DOCUMENT_TITLE: &str = "Personel Listesi";

const STYLE: &str = r#"
body {
  font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.4;
  color: #333;
  margin: 0 auto;
  padding: 15px;
  background-color: #f9fafb;
}
.header { text-align: center; margin-bottom: 20px; }
.header h2 { color: rgb(29,79,145); margin: 10px 0 2px; font-weight: 700; font-size: 22px; }
.header h3 { color: rgb(29,79,145); margin: 0 0 2px; font-weight: 700; font-size: 18px; }
.header h1 { color: #444444; margin-top: 0; font-weight: 400; font-size: 16px; }
table {
  border-collapse: collapse;
  width: 100%;
  background-color: white;
  box-shadow: 0 1px 3px 0 rgba(0, 0, 0, 0.1), 0 1px 2px 0 rgba(0, 0, 0, 0.06);
  font-size: 12px;
}
th, td { border: 1px solid #e5e7eb; padding: 6px 8px; text-align: left; white-space: nowrap; }
td.center { text-align: center; }
th { background-color: #f3f4f6; font-weight: 600; color: #374151; text-align: center; }
td { font-size: 11px; }
tr:nth-child(even) { background-color: #f9fafb; }
.footer { margin-top: 20px; text-align: center; color: #6b7280; font-size: 11px; }
"#;

type HtmlWriter = Writer<Cursor<Vec<u8>>>;

/// Render `table` as a UTF-8 HTML page: organisation header, the table,
/// and a footer with the copyright year and generation time.
pub fn render_document(table: &ExportTable, generated_at: NaiveDateTime) -> Result<Vec<u8>> {
  let mut w = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

  emit(&mut w, Event::DocType(BytesText::from_escaped("html")))?;
  let mut html = BytesStart::new("html");
  html.push_attribute(("lang", "tr"));
  emit(&mut w, Event::Start(html))?;

  // <head>
  start(&mut w, "head")?;
  let mut meta = BytesStart::new("meta");
  meta.push_attribute(("charset", "UTF-8"));
  emit(&mut w, Event::Empty(meta))?;
  text_elem(&mut w, "title", DOCUMENT_TITLE)?;
  start(&mut w, "style")?;
  emit(&mut w, Event::Text(BytesText::from_escaped(STYLE)))?;
  end(&mut w, "style")?;
  end(&mut w, "head")?;

  start(&mut w, "body")?;

  // Organisation header
  start_with_class(&mut w, "div", "header")?;
  text_elem(&mut w, "h2", ORGANIZATION)?;
  text_elem(&mut w, "h3", UNIT)?;
  text_elem(&mut w, "h1", DOCUMENT_TITLE)?;
  end(&mut w, "div")?;

  // Table
  start(&mut w, "table")?;
  start(&mut w, "thead")?;
  start(&mut w, "tr")?;
  for header in table.headers() {
    start(&mut w, "th")?;
    for (i, line) in header.lines().enumerate() {
      if i > 0 {
        emit(&mut w, Event::Empty(BytesStart::new("br")))?;
      }
      emit(&mut w, Event::Text(BytesText::new(&collate::capitalize(line))))?;
    }
    end(&mut w, "th")?;
  }
  end(&mut w, "tr")?;
  end(&mut w, "thead")?;

  start(&mut w, "tbody")?;
  for row in &table.rows {
    start(&mut w, "tr")?;
    for (column, cell) in table.columns.iter().zip(row) {
      let mut td = BytesStart::new("td");
      if column.centered() {
        td.push_attribute(("class", "center"));
      }
      emit(&mut w, Event::Start(td))?;
      emit(&mut w, Event::Text(BytesText::new(&cell.to_string())))?;
      end(&mut w, "td")?;
    }
    end(&mut w, "tr")?;
  }
  end(&mut w, "tbody")?;
  end(&mut w, "table")?;

  // Footer
  start_with_class(&mut w, "div", "footer")?;
  text_elem(
    &mut w,
    "p",
    &format!("© {} {ORGANIZATION} - {UNIT}", generated_at.year()),
  )?;
  text_elem(
    &mut w,
    "p",
    &format!("Oluşturulma tarihi: {}", generated_at.format("%d.%m.%Y %H:%M")),
  )?;
  end(&mut w, "div")?;

  end(&mut w, "body")?;
  end(&mut w, "html")?;

  Ok(w.into_inner().into_inner())
}

// ─── Writer helpers ──────────────────────────────────────────────────────────

fn emit(w: &mut HtmlWriter, event: Event<'_>) -> Result<()> {
  w.write_event(event).map_err(|e| Error::Xml(e.to_string()))
}

fn start(w: &mut HtmlWriter, tag: &str) -> Result<()> {
  emit(w, Event::Start(BytesStart::new(tag)))
}

fn start_with_class(w: &mut HtmlWriter, tag: &str, class: &str) -> Result<()> {
  let mut elem = BytesStart::new(tag);
  elem.push_attribute(("class", class));
  emit(w, Event::Start(elem))
}

fn end(w: &mut HtmlWriter, tag: &str) -> Result<()> { emit(w, Event::End(BytesEnd::new(tag))) }

fn text_elem(w: &mut HtmlWriter, tag: &str, text: &str) -> Result<()> {
  start(w, tag)?;
  emit(w, Event::Text(BytesText::new(text)))?;
  end(w, tag)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use roster_core::{column::Column, export::Cell};

  use super::*;

  fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 15)
      .unwrap()
      .and_hms_opt(9, 30, 0)
      .unwrap()
  }

  fn render(table: &ExportTable) -> String {
    String::from_utf8(render_document(table, generated_at()).unwrap()).unwrap()
  }

  #[test]
  fn has_organisation_header_and_footer() {
    let html = render(&ExportTable { columns: vec![Column::FullName], rows: Vec::new() });
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\"/>"));
    assert!(html.contains("<h2>Vakıf Katılım Bankası</h2>"));
    assert!(html.contains("<h3>Teftiş Kurulu Başkanlığı</h3>"));
    assert!(html.contains("<h1>Personel Listesi</h1>"));
    assert!(html.contains("© 2026 Vakıf Katılım Bankası - Teftiş Kurulu Başkanlığı"));
    assert!(html.contains("15.10.2026 09:30"));
  }

  #[test]
  fn headers_are_capitalised_per_line() {
    let html = render(&ExportTable {
      columns: vec![Column::HireDate, Column::BankingSeniorityYears],
      rows:    Vec::new(),
    });
    assert!(html.contains("İşe giriş"));
    assert!(html.contains("<br/>"));
    assert!(html.contains("Bankacılık kıdemi"));
    assert!(html.contains("(yıl)"));
  }

  #[test]
  fn cells_are_escaped_and_centred() {
    let html = render(&ExportTable {
      columns: vec![Column::RegistryNumber, Column::FullName, Column::AuditSeniorityYears],
      rows:    vec![vec![
        Cell::Text("1001".into()),
        Cell::Text("Ali <Veli> & Co".into()),
        Cell::Decimal(7.5),
      ]],
    });
    assert!(html.contains("Ali &lt;Veli&gt; &amp; Co"));
    assert!(html.contains("7.50"));
    assert!(html.contains("class=\"center\""));
  }
}
