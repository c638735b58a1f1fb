//! Modal machine state tracked while a program runs.
//!
//! Only polar mode and the canned cycle change what is emitted; the other
//! fields follow the modal commands so later checks can rely on them.

use crate::model::Value;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Inch,
    #[default]
    Millimeter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    #[default]
    Absolute,
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedrateMode {
    Inverse,
    #[default]
    UnitsPerMinute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcPlane {
    #[default]
    XY,
    XZ,
    YZ,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Spindle {
    #[default]
    Off,
    Clockwise { rpm: i64 },
}

/// Polar coordinate mode entered by G16, left by G15.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarMode {
    pub cx: f64,
    pub cy: f64,
}

impl PolarMode {
    /// Convert radius and angle (degrees) around the centre to X/Y.
    pub fn to_cartesian(&self, radius: f64, angle_deg: f64) -> (f64, f64) {
        let theta = angle_deg.to_radians();
        (self.cx + radius * theta.cos(), self.cy + radius * theta.sin())
    }
}

/// Active canned drilling cycle (G81.1).
#[derive(Debug, Clone, PartialEq)]
pub struct CannedCycle {
    /// Every parameter given to G81.1 except X and Y.
    pub params: IndexMap<char, Value>,
    /// Hole position of the most recent cycle, reused by X-only/Y-only lines.
    pub last_x: Value,
    pub last_y: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MachineState {
    pub polar: Option<PolarMode>,
    pub canned: Option<CannedCycle>,
    pub unit: Unit,
    pub positioning: Positioning,
    pub spindle: Spindle,
    pub feedrate_mode: FeedrateMode,
    pub arc_plane: ArcPlane,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }
}
