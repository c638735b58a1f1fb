//! Arithmetic and comparison with Python-style numeric rules.

use crate::model::{BinOp, CmpOp, UnaryOp, Value};
use std::cmp::Ordering;

/// Integer-like view: ints and bools.
fn as_int(v: &Value) -> Option<i64> {
    match v {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    }
}

fn type_error(op: &str, l: &Value, r: &Value) -> String {
    format!(
        "unsupported operand type(s) for {op}: '{}' and '{}'",
        l.type_name(),
        r.type_name()
    )
}

pub fn unary(op: UnaryOp, v: &Value) -> Result<Value, String> {
    let sym = match op {
        UnaryOp::Neg => "-",
        UnaryOp::Pos => "+",
    };
    if let Some(i) = as_int(v) {
        return match op {
            UnaryOp::Neg => i.checked_neg().map(Value::Int).ok_or_else(overflow),
            UnaryOp::Pos => Ok(Value::Int(i)),
        };
    }
    match (op, v) {
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Pos, Value::Float(f)) => Ok(Value::Float(*f)),
        _ => Err(format!("bad operand type for unary {sym}: '{}'", v.type_name())),
    }
}

fn overflow() -> String {
    "integer overflow".to_string()
}

pub fn binary(op: BinOp, l: &Value, r: &Value) -> Result<Value, String> {
    if let (Value::Str(a), Value::Str(b)) = (l, r) {
        return match op {
            BinOp::Add => Ok(Value::Str(format!("{a}{b}"))),
            _ => Err(type_error(op.symbol(), l, r)),
        };
    }
    if let (Some(a), Some(b)) = (as_int(l), as_int(r)) {
        return int_binary(op, a, b);
    }
    match (l.as_f64(), r.as_f64()) {
        (Some(a), Some(b)) => float_binary(op, a, b),
        _ => Err(type_error(op.symbol(), l, r)),
    }
}

fn int_binary(op: BinOp, a: i64, b: i64) -> Result<Value, String> {
    match op {
        BinOp::Add => a.checked_add(b).map(Value::Int).ok_or_else(overflow),
        BinOp::Sub => a.checked_sub(b).map(Value::Int).ok_or_else(overflow),
        BinOp::Mul => a.checked_mul(b).map(Value::Int).ok_or_else(overflow),
        BinOp::Div => {
            if b == 0 {
                return Err("division by zero".to_string());
            }
            Ok(Value::Float(a as f64 / b as f64))
        }
        BinOp::FloorDiv | BinOp::Mod => {
            if b == 0 {
                return Err("integer division or modulo by zero".to_string());
            }
            let q = a.checked_div(b).ok_or_else(overflow)?;
            let r = a - q * b;
            let adjust = r != 0 && ((r < 0) != (b < 0));
            if op == BinOp::FloorDiv {
                Ok(Value::Int(if adjust { q - 1 } else { q }))
            } else {
                Ok(Value::Int(if adjust { r + b } else { r }))
            }
        }
        BinOp::Pow => {
            if b < 0 {
                return float_binary(op, a as f64, b as f64);
            }
            let exp = u32::try_from(b).map_err(|_| overflow())?;
            a.checked_pow(exp).map(Value::Int).ok_or_else(overflow)
        }
    }
}

fn float_binary(op: BinOp, a: f64, b: f64) -> Result<Value, String> {
    let v = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err("float division by zero".to_string());
            }
            a / b
        }
        BinOp::FloorDiv => {
            if b == 0.0 {
                return Err("float floor division by zero".to_string());
            }
            (a / b).floor()
        }
        BinOp::Mod => {
            if b == 0.0 {
                return Err("float modulo by zero".to_string());
            }
            a - b * (a / b).floor()
        }
        BinOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err("zero cannot be raised to a negative power".to_string());
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Err("negative number cannot be raised to a fractional power".to_string());
            }
            a.powf(b)
        }
    };
    Ok(Value::Float(v))
}

pub fn compare(op: CmpOp, l: &Value, r: &Value) -> Result<Value, String> {
    let ordering = match (l, r) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match (as_int(l), as_int(r)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => match (l.as_f64(), r.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => {
                    return match op {
                        CmpOp::Eq => Ok(Value::Bool(l == r)),
                        CmpOp::Ne => Ok(Value::Bool(l != r)),
                        _ => Err(format!(
                            "'{}' not supported between instances of '{}' and '{}'",
                            cmp_symbol(op),
                            l.type_name(),
                            r.type_name()
                        )),
                    };
                }
            },
        },
    };
    // NaN compares unequal to everything.
    let Some(ord) = ordering else {
        return Ok(Value::Bool(op == CmpOp::Ne));
    };
    let result = match op {
        CmpOp::Eq => ord == Ordering::Equal,
        CmpOp::Ne => ord != Ordering::Equal,
        CmpOp::Lt => ord == Ordering::Less,
        CmpOp::Le => ord != Ordering::Greater,
        CmpOp::Gt => ord == Ordering::Greater,
        CmpOp::Ge => ord != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

fn cmp_symbol(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        CmpOp::Ne => "!=",
        CmpOp::Lt => "<",
        CmpOp::Le => "<=",
        CmpOp::Gt => ">",
        CmpOp::Ge => ">=",
    }
}
