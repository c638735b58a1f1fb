//! Turning values into G-code text.
//!
//! Values are first written the way a user would read them back in the
//! script (`10`, `2.5`, `10.0`), then [`round_gcode`] pins axis words to a
//! fixed number of decimals.

use crate::model::Value;

/// Largest number of decimals an axis word may be printed with.
pub const MAX_PRECISION: usize = 17;

/// Decimal places for position (`X Y Z`) and angular (`A B C`) words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    pub position: usize,
    pub angular: usize,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            position: 3,
            angular: 2,
        }
    }
}

/// Format a value for output or the console.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Str(s) => s.clone(),
        Value::None => "None".to_string(),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

/// Python `repr` of a float: shortest round-trip digits, scientific
/// notation when the decimal exponent is below -4 or at least 16.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // `{:e}` gives the shortest round-trip mantissa, e.g. `6.123233995736766e-17`.
    let sci = format!("{f:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.unsigned_abs());
    }
    let s = f.to_string();
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Round every position and angular word of a G-code program.
///
/// Words are whitespace separated (`G01 X1.23456 A90`). Words whose value
/// is not a plain number are left untouched.
pub fn round_gcode(crude: &str, precision: Precision) -> String {
    let mut out = String::with_capacity(crude.len());
    for line in crude.lines() {
        let words: Vec<String> = line
            .split_whitespace()
            .map(|w| round_word(w, precision))
            .collect();
        out.push_str(&words.join(" "));
        out.push('\n');
    }
    out
}

fn round_word(word: &str, precision: Precision) -> String {
    let mut chars = word.chars();
    let Some(letter) = chars.next() else {
        return String::new();
    };
    let digits = match letter {
        'X' | 'Y' | 'Z' => precision.position,
        'A' | 'B' | 'C' => precision.angular,
        _ => return word.to_string(),
    }
    .min(MAX_PRECISION);
    match chars.as_str().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let text = format!("{v:.digits$}");
            // Tiny negatives such as cos(270) must not print as `-0.000`.
            let text = match text.strip_prefix('-') {
                Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
                _ => text,
            };
            format!("{letter}{text}")
        }
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_a_decimal_point() {
        assert_eq!(format_float(10.0), "10.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(-0.125), "-0.125");
        assert_eq!(format_value(&Value::Int(7)), "7");
    }

    #[test]
    fn exponent_form_outside_python_thresholds() {
        assert_eq!(format_float(6.123233995736766e-17), "6.123233995736766e-17");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(-2.5e20), "-2.5e+20");
        assert_eq!(format_float(0.0), "0.0");
    }

    #[test]
    fn rounds_only_axis_words() {
        let p = Precision {
            position: 3,
            angular: 1,
        };
        let out = round_gcode("G01 X1 Y2.34567 Z-0.5 F100.25\nG00 A45.678\n", p);
        assert_eq!(out, "G01 X1.000 Y2.346 Z-0.500 F100.25\nG00 A45.7\n");
    }

    #[test]
    fn oversized_precision_is_capped() {
        let p = Precision {
            position: 100_000,
            angular: 2,
        };
        assert_eq!(round_gcode("G01 X1\n", p), format!("G01 X1.{}\n", "0".repeat(MAX_PRECISION)));
    }

    #[test]
    fn tiny_values_round_to_zero() {
        let out = round_gcode("G01 X6.123233995736766e-17\n", Precision::default());
        assert_eq!(out, "G01 X0.000\n");
        let out = round_gcode("G01 Y-1.8369701987210297e-16\n", Precision::default());
        assert_eq!(out, "G01 Y0.000\n");
    }
}
