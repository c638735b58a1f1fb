//! Math functions and constants available to scripts.
//!
//! Trigonometry works in degrees, since that is how machinists write
//! angles in G-code.

use crate::model::Value;

/// Upper bound on the number of elements `frange` will produce.
pub const FRANGE_LIMIT: usize = 1_000_000;

pub fn constant(name: &str) -> Option<Value> {
    match name {
        "PI" => Some(Value::Float(std::f64::consts::PI)),
        "E" => Some(Value::Float(std::f64::consts::E)),
        _ => None,
    }
}

/// Call a pure builtin. `None` when no builtin has this name.
pub fn call(name: &str, args: &[Value]) -> Option<Result<Value, String>> {
    let result = match name {
        "cos" => unary_float(name, args, |x| x.to_radians().cos()),
        "sin" => unary_float(name, args, |x| x.to_radians().sin()),
        "tan" => unary_float(name, args, |x| x.to_radians().tan()),
        "abs" => unary_float(name, args, f64::abs),
        "exp" => unary_float(name, args, f64::exp),
        "sqrt" => number_args(name, args, 1, 1).and_then(|xs| {
            if xs[0] < 0.0 {
                Err("math domain error".to_string())
            } else {
                Ok(Value::Float(xs[0].sqrt()))
            }
        }),
        "pow" => number_args(name, args, 2, 2).map(|xs| Value::Float(xs[0].powf(xs[1]))),
        "log" => number_args(name, args, 1, 2).and_then(|xs| log(&xs)),
        "round" => round(args),
        "frange" => frange(args),
        _ => return None,
    };
    Some(result)
}

fn number_args(name: &str, args: &[Value], min: usize, max: usize) -> Result<Vec<f64>, String> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("exactly {min}")
        } else {
            format!("{min} to {max}")
        };
        return Err(format!(
            "{name}() takes {expected} argument(s) ({} given)",
            args.len()
        ));
    }
    args.iter()
        .map(|a| {
            a.as_f64()
                .ok_or_else(|| format!("{name}() argument must be a number, not '{}'", a.type_name()))
        })
        .collect()
}

fn unary_float(name: &str, args: &[Value], f: impl Fn(f64) -> f64) -> Result<Value, String> {
    let xs = number_args(name, args, 1, 1)?;
    Ok(Value::Float(f(xs[0])))
}

fn log(xs: &[f64]) -> Result<Value, String> {
    let x = xs[0];
    if x <= 0.0 {
        return Err("math domain error".to_string());
    }
    match xs.get(1) {
        None => Ok(Value::Float(x.ln())),
        Some(&base) if base <= 0.0 || base == 1.0 => Err("math domain error".to_string()),
        Some(&base) => Ok(Value::Float(x.ln() / base.ln())),
    }
}

/// `round(x)` gives an int, `round(x, n)` keeps the input type. Ties go to
/// the even neighbour.
fn round(args: &[Value]) -> Result<Value, String> {
    let xs = number_args("round", args, 1, 2)?;
    let x = xs[0];
    match args.get(1) {
        None => {
            if let Value::Int(i) = args[0] {
                return Ok(Value::Int(i));
            }
            let r = x.round_ties_even();
            if !r.is_finite() || r.abs() >= i64::MAX as f64 {
                return Err("cannot convert float to integer".to_string());
            }
            Ok(Value::Int(r as i64))
        }
        Some(Value::Int(n)) => {
            if let Value::Int(i) = args[0] {
                if *n >= 0 {
                    return Ok(Value::Int(i));
                }
                let scale = 10f64.powi(n.unsigned_abs().min(308) as i32);
                return Ok(Value::Int(((i as f64 / scale).round_ties_even() * scale) as i64));
            }
            let exp = (*n).clamp(-308, 308) as i32;
            let scale = 10f64.powi(exp);
            Ok(Value::Float((x * scale).round_ties_even() / scale))
        }
        Some(other) => Err(format!(
            "round() ndigits must be an integer, not '{}'",
            other.type_name()
        )),
    }
}

/// Float-tolerant `range`: start inclusive, stop exclusive.
///
/// Elements are built by repeated addition so integer arguments give
/// integers. An element within 1e-9 relative of `stop` counts as `stop`.
pub fn frange(args: &[Value]) -> Result<Value, String> {
    number_args("frange", args, 3, 3)?;
    let (start, stop, step) = (&args[0], &args[1], &args[2]);
    let step_f = step.as_f64().unwrap_or(0.0);
    let start_f = start.as_f64().unwrap_or(0.0);
    let stop_f = stop.as_f64().unwrap_or(0.0);
    if step_f == 0.0 {
        return Err("Loop step must be non-zero".to_string());
    }
    let ascending = step_f > 0.0 && stop_f > start_f;
    let descending = step_f < 0.0 && start_f > stop_f;
    if !ascending && !descending {
        return Err("frange(): Infinite loop detected".to_string());
    }
    let mut items = Vec::new();
    let mut current = start.clone();
    loop {
        let c = current.as_f64().unwrap_or(stop_f);
        let before_stop = if ascending { c < stop_f } else { c > stop_f };
        if !before_stop || is_close(c, stop_f) {
            break;
        }
        if items.len() >= FRANGE_LIMIT {
            return Err(format!("frange(): more than {FRANGE_LIMIT} elements"));
        }
        items.push(current.clone());
        current = super::eval::binary(crate::model::BinOp::Add, &current, step)?;
    }
    Ok(Value::List(items))
}

/// `math.isclose` with the default relative tolerance and no absolute one.
fn is_close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Value {
        Value::List(v.iter().map(|i| Value::Int(*i)).collect())
    }

    #[test]
    fn frange_integers() {
        let r = frange(&[Value::Int(1), Value::Int(4), Value::Int(1)]).unwrap();
        assert_eq!(r, ints(&[1, 2, 3]));
        let r = frange(&[Value::Int(5), Value::Int(0), Value::Int(-2)]).unwrap();
        assert_eq!(r, ints(&[5, 3, 1]));
    }

    #[test]
    fn frange_floats_exclude_near_stop() {
        let r = frange(&[Value::Int(0), Value::Int(1), Value::Float(0.1)]).unwrap();
        let Value::List(items) = r else { panic!("list") };
        assert_eq!(items.len(), 10);
    }

    #[test]
    fn frange_errors() {
        assert!(frange(&[Value::Int(0), Value::Int(1), Value::Int(0)]).is_err());
        assert!(frange(&[Value::Int(1), Value::Int(1), Value::Int(1)]).is_err());
        assert!(frange(&[Value::Int(0), Value::Int(1), Value::Int(-1)]).is_err());
    }

    #[test]
    fn degree_trig_and_round() {
        let Some(Ok(Value::Float(c))) = call("cos", &[Value::Int(60)]) else {
            panic!("cos")
        };
        assert!((c - 0.5).abs() < 1e-12);
        assert_eq!(call("round", &[Value::Float(2.5)]), Some(Ok(Value::Int(2))));
        assert_eq!(call("round", &[Value::Float(3.5)]), Some(Ok(Value::Int(4))));
        assert_eq!(
            call("round", &[Value::Float(1.26), Value::Int(1)]),
            Some(Ok(Value::Float(1.3)))
        );
        assert_eq!(call("abs", &[Value::Int(-2)]), Some(Ok(Value::Float(2.0))));
        assert!(call("nope", &[]).is_none());
        assert!(matches!(call("sqrt", &[Value::Int(-1)]), Some(Err(_))));
    }
}
