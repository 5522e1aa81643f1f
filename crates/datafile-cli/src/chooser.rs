//! Picking a file to open.

use std::path::PathBuf;

/// Asks the user for a file. `None` means nothing was chosen.
pub trait FileChooser {
    fn choose_file(&mut self, extensions: &[&str]) -> Option<PathBuf>;
}

/// The platform's native open dialog.
#[derive(Debug, Clone)]
pub struct DialogFileChooser {
    title: String,
}

impl DialogFileChooser {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Whether a native dialog can be shown at all. Without a display
    /// server on Linux the session falls back to a typed path.
    pub fn available() -> bool {
        if cfg!(any(target_os = "windows", target_os = "macos")) {
            return true;
        }
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()))
    }
}

impl FileChooser for DialogFileChooser {
    fn choose_file(&mut self, extensions: &[&str]) -> Option<PathBuf> {
        let picked = rfd::FileDialog::new()
            .set_title(self.title.as_str())
            .add_filter("Delimited text", extensions)
            .pick_file();
        tracing::debug!(picked = ?picked, "file dialog closed");
        picked
    }
}
