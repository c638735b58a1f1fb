//! `settings.json` loading.
//!
//! The file is read leniently: sections and fields that are missing fall
//! back to defaults, and the two precision fields are inspected by hand so
//! a bad value produces a console warning instead of a failed load.

use crate::console::{Console, MessageKind};
use crate::output::{MAX_PRECISION, Precision};
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// How `G04` dwell times are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum G04Style {
    /// `G04 P<seconds>`
    #[default]
    #[serde(rename = "RS-274")]
    Rs274,
    /// `G04 P<integer milliseconds>`
    #[serde(rename = "milliseconds")]
    Milliseconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub comp_param: CompParam,
    #[serde(default)]
    pub transpiler: TranspilerSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Built-in settings used when there is no settings file.
impl Default for Settings {
    fn default() -> Self {
        Self {
            comp_param: CompParam::with_defaults(),
            transpiler: TranspilerSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// Compilation parameters. Kept as raw JSON so a wrongly typed value can
/// be reported rather than rejected. A field left out of the file stays
/// `None` and is warned about when precision is resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompParam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dec_prec: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ang_prec: Option<serde_json::Value>,
}

impl CompParam {
    pub fn with_defaults() -> Self {
        let defaults = Precision::default();
        Self {
            max_dec_prec: Some(defaults.position.into()),
            max_ang_prec: Some(defaults.angular.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranspilerSettings {
    #[serde(rename = "g04-style", default)]
    pub g04_style: G04Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub tab_spaces: usize,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tab_spaces: 4,
            window_width: 1600,
            window_height: 900,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse settings JSON")
    }

    /// Load settings from a file.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))?;
        let settings = Self::from_json(&text).with_context(|| format!("Invalid settings in {}", path))?;
        tracing::info!(%path, "loaded settings");
        Ok(settings)
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_std_path(), json).with_context(|| format!("Failed to write {}", path))?;
        Ok(())
    }

    /// Resolve output precision, warning on the console about missing or
    /// non-integer values and using defaults for them.
    pub fn precision(&self, console: &mut Console) -> Precision {
        let defaults = Precision::default();
        Precision {
            position: resolve_precision(
                self.comp_param.max_dec_prec.as_ref(),
                "Max decimal precision",
                defaults.position,
                console,
            ),
            angular: resolve_precision(
                self.comp_param.max_ang_prec.as_ref(),
                "Max angular precision",
                defaults.angular,
                console,
            ),
        }
    }
}

fn resolve_precision(
    value: Option<&serde_json::Value>,
    label: &str,
    default: usize,
    console: &mut Console,
) -> usize {
    let out_of_range = format!("is out of range (0 to {MAX_PRECISION})");
    let problem = match value {
        None => "not found",
        Some(v) => match v.as_u64().map(usize::try_from) {
            Some(Ok(n)) if n <= MAX_PRECISION => return n,
            Some(_) => out_of_range.as_str(),
            None => "is not an integer",
        },
    };
    tracing::warn!(field = label, problem, default, "falling back to default precision");
    console.print_line(
        format!("Warning: {label} {problem}. Default value of {default} is used. [{SETTINGS_FILE_NAME}]"),
        MessageKind::Warning,
        true,
    );
    default
}
