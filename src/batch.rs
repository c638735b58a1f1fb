//! Compiling many scripts at once.

use crate::compiler::{CompileOptions, xgc_to_gcode};
use crate::parser::{FsSource, ScriptSource};
use crate::workbench::GCODE_EXTENSION;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;

/// What happened to one script.
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: Utf8PathBuf,
    /// Written G-code file on success, error on failure.
    pub result: Result<Utf8PathBuf>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Find every `.xgc` file below `dir`.
pub fn collect_scripts(dir: impl AsRef<Utf8Path>) -> Result<Vec<Utf8PathBuf>> {
    FsSource.list_scripts(dir.as_ref())
}

/// Output path for `input`: same stem with `.nc`, in `out_dir` when given.
pub fn output_path(input: &Utf8Path, out_dir: Option<&Utf8Path>) -> Utf8PathBuf {
    let renamed = input.with_extension(GCODE_EXTENSION);
    match (out_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Compile all scripts in parallel, writing one G-code file per script.
/// Outcomes are returned in input order. Fails before compiling anything
/// when `out_dir` cannot be created.
pub fn compile_all(
    inputs: &[Utf8PathBuf],
    options: &CompileOptions,
    out_dir: Option<&Utf8Path>,
) -> Result<Vec<BatchOutcome>> {
    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir.as_std_path()).with_context(|| format!("Failed to create {}", dir))?;
    }
    Ok(inputs
        .par_iter()
        .map(|input| BatchOutcome {
            input: input.clone(),
            result: compile_one(input, options, out_dir),
        })
        .collect())
}

fn compile_one(input: &Utf8Path, options: &CompileOptions, out_dir: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    let script = FsSource.read_to_string(input)?;
    let compilation = xgc_to_gcode(&script, options).with_context(|| format!("Failed to compile {}", input))?;
    let out = output_path(input, out_dir);
    std::fs::write(out.as_std_path(), &compilation.gcode).with_context(|| format!("Failed to write {}", out))?;
    tracing::debug!(%input, output = %out, "compiled");
    Ok(out)
}
