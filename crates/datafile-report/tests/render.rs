//! Tests for the built-in display renderers.

use datafile_model::{SearchPredicate, Table};
use datafile_report::{DisplayRenderer, HtmlDisplay, ReportConfig, default_renderers, render_html};
use tempfile::TempDir;

fn tea_table() -> Table {
    Table::from_records(
        vec!["Name".into(), "Tea".into()],
        vec![
            vec!["Alice".into(), "Green".into()],
            vec!["Bob".into(), "English Breakfast".into()],
            vec!["Charlie".into(), "Matcha & Milk".into()],
        ],
    )
    .unwrap()
}

fn collect(renderer: &dyn DisplayRenderer, table: &Table) -> Vec<String> {
    let mut lines = Vec::new();
    renderer.render(table, &mut |line| lines.push(line.to_string()));
    lines
}

#[test]
fn html_keeps_row_positions_and_escapes_text() {
    let matches = tea_table()
        .filter(&SearchPredicate::new("li", "Name", false))
        .unwrap();
    let html = render_html(&matches).unwrap();
    insta::assert_snapshot!(html, @r#"<!DOCTYPE html><html><head><meta charset="utf-8"/><title>DataFile display</title></head><body><table border="1" class="dataframe"><thead><tr><th></th><th>Name</th><th>Tea</th></tr></thead><tbody><tr><th>0</th><td>Alice</td><td>Green</td></tr><tr><th>2</th><td>Charlie</td><td>Matcha &amp; Milk</td></tr></tbody></table></body></html>"#);
}

#[test]
fn html_display_writes_page_without_browser() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("displays");
    let renderer = HtmlDisplay::new(output_dir.clone(), false);

    let lines = collect(&renderer, &tea_table());

    let pages: Vec<_> = std::fs::read_dir(&output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    let file_name = page.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("datafile_display_"));
    assert!(file_name.ends_with(".html"));
    assert!(std::fs::read_to_string(page).unwrap().contains("English Breakfast"));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Wrote "));
}

#[test]
fn html_display_reports_directory_failure() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();
    let renderer = HtmlDisplay::new(blocker.join("displays"), false);

    let lines = collect(&renderer, &tea_table());

    assert_eq!(
        lines.last().map(String::as_str),
        Some("There was a problem creating the output directory")
    );
}

#[test]
fn text_display_lists_every_row() {
    let renderers = default_renderers(&ReportConfig::default());
    let lines = collect(renderers[0].as_ref(), &tea_table());
    assert_eq!(lines.len(), 1);
    for name in ["Alice", "Bob", "Charlie"] {
        assert!(lines[0].contains(name));
    }
}
