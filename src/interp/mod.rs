//! Tree-walking interpreter that runs a parsed XGC [`Program`] and
//! collects the G-code it emits.
//!
//! Variables live in one flat scope (loop variables leak out of their loop,
//! as script authors expect). Builtin constants can be shadowed.

pub mod builtins;
mod commands;
pub mod eval;

use crate::error::{CompileError, CompileResult};
use crate::machine::MachineState;
use crate::model::{Expr, Program, Statement, StatementKind, Value};
use crate::output::format_value;
use crate::settings::G04Style;
use std::collections::HashMap;

/// Maximum nesting of blocks while executing.
const MAX_DEPTH: usize = 64;

pub struct Interpreter {
    vars: HashMap<String, Value>,
    state: MachineState,
    lines: Vec<String>,
    prints: Vec<String>,
    g04_style: G04Style,
    depth: usize,
}

impl Interpreter {
    pub fn new(g04_style: G04Style) -> Self {
        Self {
            vars: HashMap::new(),
            state: MachineState::new(),
            lines: Vec::new(),
            prints: Vec::new(),
            g04_style,
            depth: 0,
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Execute all statements of a program.
    pub fn run(&mut self, program: &Program) -> CompileResult<()> {
        self.exec_block(&program.statements)
    }

    /// Unrounded G-code emitted so far, newline terminated.
    pub fn gcode(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Values printed with `console_print`, in order.
    pub fn prints(&self) -> &[String] {
        &self.prints
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        let gcode = self.gcode();
        (gcode, self.prints)
    }

    fn exec_block(&mut self, statements: &[Statement]) -> CompileResult<()> {
        for stmt in statements {
            self.exec_statement(stmt)?;
        }
        Ok(())
    }

    fn exec_statement(&mut self, stmt: &Statement) -> CompileResult<()> {
        let err = |msg: String| CompileError::runtime(stmt.line, msg);
        match &stmt.kind {
            StatementKind::Assign { targets, value } => {
                let v = self.eval(value).map_err(err)?;
                for t in targets {
                    self.vars.insert(t.clone(), v.clone());
                }
            }
            StatementKind::AugAssign { target, op, value } => {
                let current = self.lookup(target).map_err(err)?;
                let rhs = self.eval(value).map_err(err)?;
                let v = eval::binary(*op, &current, &rhs).map_err(err)?;
                self.vars.insert(target.clone(), v);
            }
            StatementKind::Expr(expr) => {
                self.eval(expr).map_err(err)?;
            }
            StatementKind::Pass => {}
            StatementKind::For { var, iter, body } => {
                let items = match self.eval(iter).map_err(err)? {
                    Value::List(items) => items,
                    other => return Err(err(format!("'{}' object is not iterable", other.type_name()))),
                };
                self.enter(stmt.line)?;
                for item in items {
                    self.vars.insert(var.clone(), item);
                    self.exec_block(body)?;
                }
                self.depth -= 1;
            }
            StatementKind::If { branches, else_body } => {
                self.enter(stmt.line)?;
                let mut taken = false;
                for branch in branches {
                    let cond = self
                        .eval(&branch.condition)
                        .map_err(|m| CompileError::runtime(branch.line, m))?;
                    if cond.is_truthy() {
                        self.exec_block(&branch.body)?;
                        taken = true;
                        break;
                    }
                }
                if !taken {
                    if let Some(body) = else_body {
                        self.exec_block(body)?;
                    }
                }
                self.depth -= 1;
            }
            StatementKind::Command(cmd) => self.exec_command(cmd).map_err(err)?,
            StatementKind::Modal(codes) => self.exec_modal(codes).map_err(err)?,
            StatementKind::CannedXy { x, y } => self.exec_canned_xy(x.as_ref(), y.as_ref()).map_err(err)?,
        }
        Ok(())
    }

    fn enter(&mut self, line: usize) -> CompileResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(CompileError::runtime(line, "blocks are nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<Value, String> {
        self.vars
            .get(name)
            .cloned()
            .or_else(|| builtins::constant(name))
            .ok_or_else(|| format!("name '{name}' is not defined"))
    }

    pub(crate) fn eval(&mut self, expr: &Expr) -> Result<Value, String> {
        match expr {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Name(name) => self.lookup(name),
            Expr::Unary(op, inner) => {
                let v = self.eval(inner)?;
                eval::unary(*op, &v)
            }
            Expr::Binary(op, l, r) => {
                let lv = self.eval(l)?;
                let rv = self.eval(r)?;
                eval::binary(*op, &lv, &rv)
            }
            Expr::Compare(op, l, r) => {
                let lv = self.eval(l)?;
                let rv = self.eval(r)?;
                eval::compare(*op, &lv, &rv)
            }
            Expr::And(l, r) => {
                let lv = self.eval(l)?;
                if !lv.is_truthy() {
                    return Ok(lv);
                }
                self.eval(r)
            }
            Expr::Or(l, r) => {
                let lv = self.eval(l)?;
                if lv.is_truthy() {
                    return Ok(lv);
                }
                self.eval(r)
            }
            Expr::Not(inner) => Ok(Value::Bool(!self.eval(inner)?.is_truthy())),
            Expr::Call { name, args } => {
                let values = args.iter().map(|a| self.eval(a)).collect::<Result<Vec<_>, _>>()?;
                self.call(name, &values)
            }
        }
    }

    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, String> {
        if name == "console_print" {
            return self.console_print(args);
        }
        match builtins::call(name, args) {
            Some(result) => result,
            None if self.vars.contains_key(name) => {
                Err(format!("'{}' object is not callable", self.vars[name].type_name()))
            }
            None => Err(format!("name '{name}' is not defined")),
        }
    }

    fn console_print(&mut self, args: &[Value]) -> Result<Value, String> {
        let [value] = args else {
            return Err(format!(
                "console_print() takes exactly 1 argument ({} given)",
                args.len()
            ));
        };
        if !matches!(value, Value::Int(_) | Value::Float(_) | Value::Str(_)) {
            return Err("console_print: Input is not a number or string".to_string());
        }
        let text = format_value(value);
        tracing::debug!(%text, "console_print");
        self.prints.push(text);
        Ok(Value::None)
    }

    pub(crate) fn emit(&mut self, line: String) {
        self.lines.push(line);
    }
}
