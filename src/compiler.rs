//! The XGC → G-code pipeline: parse, run, round.

use crate::console::{Console, MessageKind};
use crate::error::{CompileError, CompileResult};
use crate::interp::Interpreter;
use crate::output::{Precision, round_gcode};
use crate::parser::parse_script;
use crate::settings::{G04Style, Settings};

/// Shown in the output pane when compilation fails.
pub const FAILED_OUTPUT: &str = "Compilation Failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileOptions {
    pub precision: Precision,
    pub g04_style: G04Style,
}

impl CompileOptions {
    /// Build options from settings, reporting precision problems on `console`.
    pub fn from_settings(settings: &Settings, console: &mut Console) -> Self {
        Self {
            precision: settings.precision(console),
            g04_style: settings.transpiler.g04_style,
        }
    }
}

/// Result of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub gcode: String,
    /// `console_print` output in execution order.
    pub prints: Vec<String>,
}

/// Compile an XGC script into G-code.
pub fn xgc_to_gcode(script: &str, options: &CompileOptions) -> CompileResult<Compilation> {
    let program = parse_script(script)?;
    let mut interp = Interpreter::new(options.g04_style);
    interp.run(&program)?;
    let (crude, prints) = interp.into_parts();
    let gcode = round_gcode(&crude, options.precision);
    tracing::debug!(lines = gcode.lines().count(), "compiled script");
    Ok(Compilation { gcode, prints })
}

/// Compile and report to a console. Returns the text for the output pane
/// and whether compilation succeeded.
///
/// `console_print` output reaches the console even when a later line fails.
pub fn compile_to_console(script: &str, settings: &Settings, console: &mut Console) -> (String, bool) {
    let options = CompileOptions::from_settings(settings, console);
    let program = match parse_script(script) {
        Ok(program) => program,
        Err(err) => return report_failure(&err, console),
    };
    let mut interp = Interpreter::new(options.g04_style);
    let result = interp.run(&program);
    for text in interp.prints() {
        console.print_line(text.clone(), MessageKind::Print, false);
    }
    match result {
        Ok(()) => {
            console.print_line("Compilation Success!", MessageKind::Success, true);
            (round_gcode(&interp.gcode(), options.precision), true)
        }
        Err(err) => report_failure(&err, console),
    }
}

fn report_failure(err: &CompileError, console: &mut Console) -> (String, bool) {
    tracing::info!(line = err.line, stage = ?err.stage, message = %err.message, "compilation failed");
    console.report_error(err);
    (FAILED_OUTPUT.to_string(), false)
}
