//! Extended G-code (XGC) compiler.
//!
//! XGC is G-code plus variables, `for` loops, conditionals and math
//! expressions. [`compiler::xgc_to_gcode`] turns an XGC script into plain
//! RS-274 G-code; [`workbench::Workbench`] wraps it in an editor session
//! with a status console.
//!
//! The binary `groller` compiles scripts from the command line.

pub mod batch;
pub mod compiler;
pub mod console;
pub mod error;
pub mod interp;
pub mod machine;
pub mod model;
pub mod output;
pub mod parser;
pub mod settings;
pub mod workbench;

pub use compiler::{CompileOptions, Compilation, xgc_to_gcode};
pub use error::{CompileError, Stage};

// Optional GUI/egui functionality lives behind the `egui` feature flag.
// It renders a Workbench as a three-pane editor (console, script, output)
// and is started by src/bin/groller_gui.rs.
#[cfg(feature = "egui")]
pub mod egui_app;
