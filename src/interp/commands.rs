//! Semantics of the supported G/M commands.

use super::Interpreter;
use crate::machine::{ArcPlane, CannedCycle, FeedrateMode, PolarMode, Positioning, Spindle, Unit};
use crate::model::{Code, Command, Expr, Value};
use crate::output::format_value;
use crate::settings::G04Style;
use indexmap::IndexMap;

type Params = IndexMap<char, Value>;

const MOVE_RAPID: &[char] = &['X', 'Y', 'Z', 'A', 'B', 'C'];
const MOVE_LINEAR: &[char] = &['X', 'Y', 'Z', 'A', 'B', 'C', 'F'];
const MOVE_ARC: &[char] = &['X', 'Y', 'Z', 'I', 'J', 'K', 'R', 'F'];
const DRILL_ALLOWED: &[char] = &['Z', 'R', 'F', 'X', 'Y', 'L', 'P', 'D', 'A'];
const DRILL_REQUIRED: &[char] = &['Z', 'R', 'F', 'X', 'Y'];
/// Upper bound for the G81.1 repeat count `L`.
pub const DRILL_REPEAT_LIMIT: i64 = 10_000;

fn join_letters(letters: &[char]) -> String {
    letters.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}

fn check_allowed(code: Code, params: &Params, allowed: &[char]) -> Result<(), String> {
    let mut illegal: Vec<char> = params.keys().copied().filter(|k| !allowed.contains(k)).collect();
    if illegal.is_empty() {
        return Ok(());
    }
    illegal.sort_unstable();
    Err(format!(
        "{code} contains unexpected parameter(s): {}",
        join_letters(&illegal)
    ))
}

fn check_required(code: Code, params: &Params, required: &[char]) -> Result<(), String> {
    let mut missing: Vec<char> = required.iter().copied().filter(|k| !params.contains_key(k)).collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort_unstable();
    Err(format!(
        "{code} necessary parameter(s) missing: {}",
        join_letters(&missing)
    ))
}

fn number(v: &Value) -> f64 {
    v.as_f64().unwrap_or(0.0)
}

fn format_line(code: Code, params: &Params) -> String {
    let mut line = code.as_str().to_string();
    for (k, v) in params {
        line.push(' ');
        line.push(*k);
        line.push_str(&format_value(v));
    }
    line
}

impl Interpreter {
    fn eval_params(&mut self, params: &IndexMap<char, Expr>) -> Result<Params, String> {
        let mut out = Params::with_capacity(params.len());
        for (k, expr) in params {
            let v = self.eval(expr)?;
            if v.as_f64().is_none() {
                return Err(format!(
                    "parameter {k} must be a number, not '{}'",
                    v.type_name()
                ));
            }
            out.insert(*k, v);
        }
        Ok(out)
    }

    pub(super) fn exec_command(&mut self, cmd: &Command) -> Result<(), String> {
        let params = self.eval_params(&cmd.params)?;
        match cmd.code {
            Code::G00 => self.motion(Code::G00, params),
            Code::G01 => self.motion(Code::G01, params),
            Code::G02 | Code::G03 => {
                check_allowed(cmd.code, &params, MOVE_ARC)?;
                if params.is_empty() {
                    return Err(format!("{} requires at least one parameter", cmd.code));
                }
                self.emit(format_line(cmd.code, &params));
                Ok(())
            }
            Code::G04 => {
                check_allowed(Code::G04, &params, &['P'])?;
                let p = params
                    .get(&'P')
                    .ok_or_else(|| "G04 requires parameter P".to_string())?
                    .clone();
                self.dwell(&p);
                Ok(())
            }
            Code::G16 => {
                check_allowed(Code::G16, &params, &['X', 'Y'])?;
                check_required(Code::G16, &params, &['X', 'Y'])?;
                self.state.polar = Some(PolarMode {
                    cx: number(&params[&'X']),
                    cy: number(&params[&'Y']),
                });
                Ok(())
            }
            Code::G81_1 => self.start_drilling(params),
            Code::M03 => {
                check_allowed(Code::M03, &params, &['S'])?;
                let rpm = match params.get(&'S') {
                    Some(Value::Int(rpm)) => *rpm,
                    Some(_) => return Err("M03 spindle RPM must be an integer".to_string()),
                    None => return Err("M03 requires parameter S".to_string()),
                };
                self.state.spindle = Spindle::Clockwise { rpm };
                self.emit(format!("M03 S{rpm}"));
                Ok(())
            }
            other => {
                // The parser routes parameterless codes to modal lines.
                if !params.is_empty() {
                    return Err(format!("{other} takes no parameters"));
                }
                self.exec_modal(&[other])
            }
        }
    }

    /// Run a line of parameterless commands; their words share one line.
    pub(super) fn exec_modal(&mut self, codes: &[Code]) -> Result<(), String> {
        let mut words = Vec::new();
        for code in codes {
            let emitted = match code {
                Code::G15 => {
                    self.state.polar = None;
                    false
                }
                Code::G80 => {
                    self.state.canned = None;
                    false
                }
                Code::G17 => {
                    self.state.arc_plane = ArcPlane::XY;
                    true
                }
                Code::G18 => {
                    self.state.arc_plane = ArcPlane::XZ;
                    true
                }
                Code::G19 => {
                    self.state.arc_plane = ArcPlane::YZ;
                    true
                }
                Code::G20 => {
                    self.state.unit = Unit::Inch;
                    true
                }
                Code::G21 => {
                    self.state.unit = Unit::Millimeter;
                    true
                }
                Code::G90 => {
                    self.state.positioning = Positioning::Absolute;
                    true
                }
                Code::G91 => {
                    self.state.positioning = Positioning::Incremental;
                    true
                }
                Code::G93 => {
                    self.state.feedrate_mode = FeedrateMode::Inverse;
                    true
                }
                Code::G94 => {
                    self.state.feedrate_mode = FeedrateMode::UnitsPerMinute;
                    true
                }
                Code::M05 => {
                    self.state.spindle = Spindle::Off;
                    true
                }
                Code::M30 => true,
                other => return Err(format!("{other} requires parameters")),
            };
            if emitted {
                words.push(code.as_str());
            }
        }
        if !words.is_empty() {
            self.emit(words.join(" "));
        }
        Ok(())
    }

    /// G00 / G01, converting radius/angle in polar mode.
    fn motion(&mut self, code: Code, mut params: Params) -> Result<(), String> {
        let allowed = if code == Code::G00 { MOVE_RAPID } else { MOVE_LINEAR };
        check_allowed(code, &params, allowed)?;
        if params.is_empty() {
            return Err(format!("{code} requires at least one parameter"));
        }
        if let Some(polar) = self.state.polar {
            match (params.get(&'X'), params.get(&'Y')) {
                (Some(r), Some(theta)) => {
                    let (x, y) = polar.to_cartesian(number(r), number(theta));
                    // Replacing keeps the written parameter order.
                    params.insert('X', Value::Float(x));
                    params.insert('Y', Value::Float(y));
                }
                (Some(_), None) => return Err(format!("{code} (polar mode) needs argument Y")),
                (None, Some(_)) => return Err(format!("{code} (polar mode) needs argument X")),
                (None, None) => {}
            }
        }
        self.emit(format_line(code, &params));
        Ok(())
    }

    /// Positive P is seconds, negative P is milliseconds.
    fn dwell(&mut self, p: &Value) {
        let seconds = number(p) >= 0.0;
        let word = match self.g04_style {
            G04Style::Rs274 if seconds => format_value(p),
            G04Style::Rs274 => format_value(&Value::Float(-number(p) / 1000.0)),
            G04Style::Milliseconds if seconds => format!("{}", (number(p) * 1000.0).round() as i64),
            G04Style::Milliseconds => format!("{}", (-number(p)).round() as i64),
        };
        self.emit(format!("G04 P{word}"));
    }

    fn start_drilling(&mut self, mut params: Params) -> Result<(), String> {
        check_allowed(Code::G81_1, &params, DRILL_ALLOWED)?;
        check_required(Code::G81_1, &params, DRILL_REQUIRED)?;
        if params.contains_key(&'D') != params.contains_key(&'A') {
            return Err(
                "G81.1 parameters \"D\" and \"A\" must either provided together, or not provided at all."
                    .to_string(),
            );
        }
        if let Some(l) = params.get(&'L') {
            if !matches!(l, Value::Int(n) if *n >= 0) {
                return Err("G81.1 repeat count L must be a non-negative integer".to_string());
            }
            if matches!(l, Value::Int(n) if *n > DRILL_REPEAT_LIMIT) {
                return Err(format!("G81.1 repeat count L must be at most {DRILL_REPEAT_LIMIT}"));
            }
        }
        let x = params.shift_remove(&'X').unwrap_or(Value::Int(0));
        let y = params.shift_remove(&'Y').unwrap_or(Value::Int(0));
        self.state.canned = Some(CannedCycle {
            params,
            last_x: x.clone(),
            last_y: y.clone(),
        });
        self.drill_hole(x, y)
    }

    pub(super) fn exec_canned_xy(&mut self, x: Option<&Expr>, y: Option<&Expr>) -> Result<(), String> {
        let Some(cycle) = self.state.canned.as_ref() else {
            return Err("Canned cycle line (X,Y) appeared outside canned cycle".to_string());
        };
        let (last_x, last_y) = (cycle.last_x.clone(), cycle.last_y.clone());
        let mut coord = |expr: Option<&Expr>, last: Value, axis: char| -> Result<Value, String> {
            let Some(expr) = expr else {
                return Ok(last);
            };
            let v = self.eval(expr)?;
            if v.as_f64().is_none() {
                return Err(format!("parameter {axis} must be a number, not '{}'", v.type_name()));
            }
            Ok(v)
        };
        let x = coord(x, last_x, 'X')?;
        let y = coord(y, last_y, 'Y')?;
        self.drill_hole(x, y)
    }

    /// One pass of the active canned cycle at (x, y).
    fn drill_hole(&mut self, x: Value, y: Value) -> Result<(), String> {
        let Some(cycle) = self.state.canned.as_mut() else {
            return Err("Canned cycle line (X,Y) appeared outside canned cycle".to_string());
        };
        cycle.last_x = x.clone();
        cycle.last_y = y.clone();
        let p = cycle.params.clone();
        let repeats = match p.get(&'L') {
            Some(Value::Int(n)) => *n,
            _ => 1,
        };

        self.motion(Code::G00, Params::from([('X', x), ('Y', y)]))?;
        for _ in 0..repeats {
            self.motion(Code::G01, Params::from([('Z', p[&'Z'].clone()), ('F', p[&'F'].clone())]))?;
            if let Some(dwell) = p.get(&'P') {
                self.dwell(dwell);
            }
            self.motion(Code::G00, Params::from([('Z', p[&'R'].clone())]))?;
        }
        Ok(())
    }
}
