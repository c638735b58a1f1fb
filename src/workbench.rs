//! Editor session behind the GUI: the script being edited, the compiled
//! output, the status console and file handling.

use crate::compiler::compile_to_console;
use crate::console::{APP_NAME, APP_VERSION, Console, MessageKind};
use crate::parser::{FsSource, ScriptSource};
use crate::settings::Settings;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};

/// Extension used for compiled G-code files.
pub const GCODE_EXTENSION: &str = "nc";

pub struct Workbench {
    pub source: String,
    pub output: String,
    pub console: Console,
    pub settings: Settings,
    pub path: Option<Utf8PathBuf>,
    pub dirty: bool,
}

impl Workbench {
    pub fn new(settings: Settings) -> Self {
        Self {
            source: String::new(),
            output: String::new(),
            console: Console::default(),
            settings,
            path: None,
            dirty: false,
        }
    }

    /// Window title, e.g. `GRoller 0.1.0 - drill.xgc*`.
    pub fn title(&self) -> String {
        let mut title = format!("{APP_NAME} {APP_VERSION}");
        if let Some(name) = self.path.as_ref().and_then(|p| p.file_name()) {
            title.push_str(" - ");
            title.push_str(name);
        }
        if self.dirty {
            title.push('*');
        }
        title
    }

    pub fn new_file(&mut self) {
        self.source.clear();
        self.output.clear();
        self.path = None;
        self.dirty = false;
    }

    pub fn open_file(&mut self, path: impl AsRef<Utf8Path>) -> Result<()> {
        self.open_from(&mut FsSource, path)
    }

    /// Load a script from any source, replacing the editor contents.
    pub fn open_from<S: ScriptSource>(&mut self, source: &mut S, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        let text = source.read_to_string(path)?;
        self.source = self.expand_tabs(&text);
        self.output.clear();
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        tracing::info!(%path, "opened script");
        Ok(())
    }

    /// Replace the editor text after a user edit.
    pub fn set_source(&mut self, text: String) {
        if text != self.source {
            self.source = text;
            self.dirty = true;
        }
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            bail!("No file name yet; use Save As");
        };
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path.as_std_path(), &self.source).with_context(|| format!("Failed to write {}", path))?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        tracing::info!(%path, "saved script");
        Ok(())
    }

    /// Where `save_output` writes by default: the script path with `.nc`.
    pub fn default_output_path(&self) -> Option<Utf8PathBuf> {
        self.path.as_ref().map(|p| p.with_extension(GCODE_EXTENSION))
    }

    pub fn save_output(&self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        if self.output.is_empty() {
            bail!("Nothing compiled yet");
        }
        std::fs::write(path.as_std_path(), &self.output).with_context(|| format!("Failed to write {}", path))?;
        Ok(())
    }

    /// Compile the editor text into the output pane.
    pub fn compile(&mut self) -> bool {
        let (output, ok) = compile_to_console(&self.source, &self.settings, &mut self.console);
        self.output = output;
        ok
    }

    pub fn reset_console(&mut self) {
        self.console.reset();
    }

    /// Show an error that is not a compilation result (I/O and the like).
    pub fn report(&mut self, err: &anyhow::Error) {
        self.console.print_line(format!("{err:#}"), MessageKind::Error, true);
    }

    /// Replace tabs with the configured number of spaces.
    pub fn expand_tabs(&self, text: &str) -> String {
        text.replace('\t', &" ".repeat(self.settings.ui.tab_spaces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_tracks_path_and_dirty_flag() {
        let mut wb = Workbench::new(Settings::default());
        assert_eq!(wb.title(), format!("GRoller {APP_VERSION}"));
        wb.path = Some(Utf8PathBuf::from("/tmp/part.xgc"));
        wb.set_source("G21".to_string());
        assert_eq!(wb.title(), format!("GRoller {APP_VERSION} - part.xgc*"));
        assert_eq!(wb.default_output_path(), Some(Utf8PathBuf::from("/tmp/part.nc")));
    }
}
