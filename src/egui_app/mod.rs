//! Egui-based XGC editor (feature = "egui").
//!
//! Three panes around a [`crate::workbench::Workbench`]: the status console
//! on the left, the script editor in the middle and the compiled G-code on
//! the right. Construct a [`GrollerApp`] and hand it to `eframe::run_native`.

#![cfg(feature = "egui")]

mod state;
mod text;
mod ui;

pub use state::{GrollerApp, PathAction, PathPrompt};
pub use text::{line_numbers, message_colors, xgc_syntax_job};
