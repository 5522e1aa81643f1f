//! DataFile display renderers.
//!
//! A renderer turns a [`Table`](datafile_model::Table) into output for the
//! user and reports status through a caller-supplied sink:
//!
//! - **Text**: a bordered table printed straight to the sink
//! - **HTML**: a page written to disk and opened in the default browser

mod html;
mod renderer;
mod text;

pub use html::{HtmlDisplay, render_html};
pub use renderer::{DisplayRenderer, ReportConfig, default_renderers};
pub use text::{IndexColumn, TextDisplay, build_text_table};
