//! Compilation status console.
//!
//! A plain list of highlighted lines that the GUI renders with colours and
//! the CLI writes to stderr.

use crate::error::{CompileError, Stage};

pub const APP_NAME: &str = "GRoller";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default console width in characters used for the header and rules.
pub const DEFAULT_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Header and separator lines.
    Plain,
    Success,
    Error,
    Warning,
    /// Output of `console_print` in a script.
    Print,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone)]
pub struct Console {
    width: usize,
    lines: Vec<ConsoleLine>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Console {
    pub fn new(width: usize) -> Self {
        let mut console = Self {
            width: width.max(1),
            lines: Vec::new(),
        };
        console.reset();
        console
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Dashed separator spanning the console width.
    pub fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    /// Clear everything and write the header again.
    pub fn reset(&mut self) {
        self.lines.clear();
        let title = format!("{APP_NAME} {APP_VERSION}");
        let header = format!("{title:^width$}", width = self.width);
        self.push(header.trim_end().to_string(), MessageKind::Plain);
        self.push(self.rule(), MessageKind::Plain);
    }

    /// Append a line; `add_rule` follows it with an unhighlighted separator.
    pub fn print_line(&mut self, text: impl Into<String>, kind: MessageKind, add_rule: bool) {
        self.push(text.into(), kind);
        if add_rule {
            self.push(self.rule(), MessageKind::Plain);
        }
    }

    /// Report a failed compilation the way the status console shows it.
    pub fn report_error(&mut self, err: &CompileError) {
        match err.stage {
            Stage::Preprocess => {
                self.print_line("Preprocessor Error:", MessageKind::Error, false);
                self.print_line(err.to_string(), MessageKind::Error, true);
            }
            Stage::Runtime => {
                self.print_line(format!("Runtime Error: Line {}:", err.line), MessageKind::Error, false);
                self.print_line(err.message.clone(), MessageKind::Error, true);
            }
        }
    }

    /// Whole console as text, one line per entry.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    fn push(&mut self, text: String, kind: MessageKind) {
        self.lines.push(ConsoleLine { text, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_survives_reset() {
        let mut c = Console::new(20);
        c.print_line("hello", MessageKind::Print, true);
        assert_eq!(c.lines().len(), 4);
        c.reset();
        assert_eq!(c.lines().len(), 2);
        assert!(c.lines()[0].text.contains(APP_NAME));
        assert_eq!(c.lines()[1].text, "-".repeat(20));
    }
}
