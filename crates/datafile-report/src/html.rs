//! HTML page rendering.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::{info, warn};

use datafile_model::Table;

use crate::renderer::DisplayRenderer;

const PAGE_TITLE: &str = "DataFile display";

/// Writes the table to a timestamped HTML page and opens it in the
/// default browser.
#[derive(Debug, Clone)]
pub struct HtmlDisplay {
    output_dir: PathBuf,
    open_browser: bool,
}

impl HtmlDisplay {
    pub fn new(output_dir: PathBuf, open_browser: bool) -> Self {
        Self {
            output_dir,
            open_browser,
        }
    }

    fn page_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y_%m_%d_%H_%M_%S");
        self.output_dir
            .join(format!("datafile_display_{stamp}.html"))
    }
}

impl DisplayRenderer for HtmlDisplay {
    fn name(&self) -> &str {
        "HTML"
    }

    fn render(&self, table: &Table, sink: &mut dyn FnMut(&str)) {
        if let Err(error) = fs::create_dir_all(&self.output_dir) {
            warn!(dir = %self.output_dir.display(), %error, "create output directory failed");
            sink(&error.to_string());
            sink("There was a problem creating the output directory");
            return;
        }

        let path = self.page_path();
        if let Err(error) = write_page(&path, table) {
            warn!(path = %path.display(), error = %error, "write html failed");
            sink(&format!("{error:#}"));
            sink("There was a problem creating the HTML file");
            return;
        }
        info!(path = %path.display(), rows = table.len(), "wrote html display");

        let target = std::path::absolute(&path).unwrap_or(path);
        if !self.open_browser {
            sink(&format!("Wrote {}", target.display()));
            return;
        }
        sink(&format!("Opening {} in browser...", target.display()));
        if let Err(error) = open::that(&target) {
            warn!(path = %target.display(), %error, "open browser failed");
            sink(&error.to_string());
            sink("There was a problem opening the HTML file");
        }
    }
}

fn write_page(path: &Path, table: &Table) -> Result<()> {
    let html = render_html(table)?;
    fs::write(path, html).with_context(|| format!("write {}", path.display()))
}

/// The full HTML document for `table`. Rows are labelled with their
/// positions.
pub fn render_html(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    buffer.write_all(b"<!DOCTYPE html>")?;
    let mut writer = Writer::new(buffer);

    writer.write_event(Event::Start(BytesStart::new("html")))?;
    writer.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    writer.write_event(Event::Empty(meta))?;
    write_text_element(&mut writer, "title", PAGE_TITLE)?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;
    writer.write_event(Event::Start(BytesStart::new("body")))?;

    let mut table_start = BytesStart::new("table");
    table_start.push_attribute(("border", "1"));
    table_start.push_attribute(("class", "dataframe"));
    writer.write_event(Event::Start(table_start))?;

    writer.write_event(Event::Start(BytesStart::new("thead")))?;
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    write_text_element(&mut writer, "th", "")?;
    for column in table.columns() {
        write_text_element(&mut writer, "th", column)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    writer.write_event(Event::End(BytesEnd::new("thead")))?;

    writer.write_event(Event::Start(BytesStart::new("tbody")))?;
    for row in table.rows() {
        writer.write_event(Event::Start(BytesStart::new("tr")))?;
        write_text_element(&mut writer, "th", &row.position.to_string())?;
        for cell in &row.cells {
            write_text_element(&mut writer, "td", cell)?;
        }
        writer.write_event(Event::End(BytesEnd::new("tr")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("tbody")))?;

    writer.write_event(Event::End(BytesEnd::new("table")))?;
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
