use std::path::PathBuf;

use datafile_model::Table;

use crate::html::HtmlDisplay;
use crate::text::TextDisplay;

/// Something that can show a table to the user.
///
/// `render` never fails: problems are described through `sink` and the
/// caller carries on.
pub trait DisplayRenderer {
    fn name(&self) -> &str;

    fn render(&self, table: &Table, sink: &mut dyn FnMut(&str));
}

/// Options shared by the built-in renderers.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory HTML pages are written to.
    pub output_dir: PathBuf,
    /// Launch the default browser after writing a page.
    pub open_browser: bool,
    /// Maximum width of text tables.
    pub text_width: u16,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output_displays"),
            open_browser: true,
            text_width: 120,
        }
    }
}

/// The built-in renderers, in menu order.
pub fn default_renderers(config: &ReportConfig) -> Vec<Box<dyn DisplayRenderer>> {
    vec![
        Box::new(TextDisplay::new(config.text_width)),
        Box::new(HtmlDisplay::new(config.output_dir.clone(), config.open_browser)),
    ]
}
