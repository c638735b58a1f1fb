#![cfg(feature = "egui")]

use eframe::egui;

use crate::workbench::Workbench;

/// What a path prompt does once confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    Open,
    SaveAs,
    SaveOutput,
}

impl PathAction {
    pub fn label(self) -> &'static str {
        match self {
            PathAction::Open => "Open script",
            PathAction::SaveAs => "Save script as",
            PathAction::SaveOutput => "Save G-code as",
        }
    }
}

/// Small modal asking for a file path.
#[derive(Debug, Clone)]
pub struct PathPrompt {
    pub action: PathAction,
    pub path: String,
}

pub struct GrollerApp {
    pub bench: Workbench,
    pub prompt: Option<PathPrompt>,
    pub show_about: bool,
    pub(super) last_title: String,
}

impl GrollerApp {
    pub fn new(bench: Workbench) -> Self {
        Self {
            bench,
            prompt: None,
            show_about: false,
            last_title: String::new(),
        }
    }

    /// Open a path prompt, pre-filled from the current file.
    pub fn ask_path(&mut self, action: PathAction) {
        let path = match action {
            PathAction::Open | PathAction::SaveAs => self.bench.path.as_ref().map(|p| p.to_string()),
            PathAction::SaveOutput => self.bench.default_output_path().map(|p| p.to_string()),
        }
        .unwrap_or_default();
        self.prompt = Some(PathPrompt { action, path });
    }

    /// Run the pending prompt. Failures go to the console.
    pub fn confirm_prompt(&mut self) -> bool {
        let Some(prompt) = self.prompt.take() else {
            return false;
        };
        let path = prompt.path.trim();
        if path.is_empty() {
            self.bench.report(&anyhow::anyhow!("No file name given"));
            return false;
        }
        let result = match prompt.action {
            PathAction::Open => self.bench.open_file(path),
            PathAction::SaveAs => self.bench.save_as(path),
            PathAction::SaveOutput => self.bench.save_output(path),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                self.bench.report(&err);
                false
            }
        }
    }

    /// Save to the current file, asking for a name when there is none.
    pub fn save(&mut self) {
        if self.bench.path.is_none() {
            self.ask_path(PathAction::SaveAs);
        } else if let Err(err) = self.bench.save() {
            self.bench.report(&err);
        }
    }

    pub fn compile(&mut self) -> bool {
        self.bench.compile()
    }
}

impl eframe::App for GrollerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        super::ui::update(self, ctx, frame);
    }
}
