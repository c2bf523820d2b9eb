use crate::process::date_parser;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// A single CSV field after type inference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    /// Date and time with no zone designator, read as local wall time.
    DateTime(NaiveDateTime),
    Timestamp(DateTime<FixedOffset>),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numbers that are whole and in range, e.g. `season` or `round`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 => {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            Value::Timestamp(ts) => Some(ts.date_naive()),
            _ => None,
        }
    }
}

/// Renders the way a template string would: whole numbers without a
/// fraction, `null` for empty fields, text verbatim.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) if *n == 0.0 => f.write_str("0"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3f")),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Infer the type of one raw field.
///
/// The field is trimmed for inspection only: empty → `Null`,
/// `true`/`false` → `Bool`, `NaN` or anything numeric → `Number`,
/// ISO-like dates → a date variant. Anything else is kept as the original,
/// untrimmed text.
pub fn infer(raw: &str) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::Null;
    }
    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "NaN" => return Value::Number(f64::NAN),
        _ => {}
    }
    if let Some(n) = parse_number(s) {
        return Value::Number(n);
    }
    if let Some(date) = date_parser::parse_iso_like(s) {
        return date;
    }
    Value::Text(raw.to_string())
}

/// Numeric literal: decimal with optional sign/exponent, `Infinity`, or an
/// unsigned `0x`/`0o`/`0b` integer.
fn parse_number(s: &str) -> Option<f64> {
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = parse_radix(s) {
        return Some(n);
    }
    // f64::from_str also takes "inf"/"nan" spellings; those stay text.
    if s
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_radix(s: &str) -> Option<f64> {
    let radix = match s.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(infer("25"), Value::Number(25.0));
        assert_eq!(infer(" 18.5 "), Value::Number(18.5));
        assert_eq!(infer("-3"), Value::Number(-3.0));
        assert_eq!(infer("1e3"), Value::Number(1000.0));
        assert_eq!(infer(".5"), Value::Number(0.5));
        assert_eq!(infer("0x1F"), Value::Number(31.0));
        assert_eq!(infer("Infinity"), Value::Number(f64::INFINITY));
        assert!(infer("NaN").as_f64().unwrap().is_nan());
    }

    #[test]
    fn booleans_and_nulls() {
        assert_eq!(infer("true"), Value::Bool(true));
        assert_eq!(infer("false"), Value::Bool(false));
        assert_eq!(infer(""), Value::Null);
        assert_eq!(infer("   "), Value::Null);
        // only the exact lowercase spellings
        assert_eq!(infer("True"), Value::Text("True".into()));
    }

    #[test]
    fn dates() {
        assert_eq!(
            infer("2023-03-05"),
            Value::Date(NaiveDate::from_ymd_opt(2023, 3, 5).unwrap())
        );
        // a bare year is a number, not a date
        assert_eq!(infer("2023"), Value::Number(2023.0));
    }

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(infer("hamilton"), Value::Text("hamilton".into()));
        assert_eq!(infer(" Red Bull "), Value::Text(" Red Bull ".into()));
        assert_eq!(infer("inf"), Value::Text("inf".into()));
        assert_eq!(infer("nan"), Value::Text("nan".into()));
        assert_eq!(infer("44abc"), Value::Text("44abc".into()));
        assert_eq!(infer("0x"), Value::Text("0x".into()));
        assert_eq!(infer("HAM"), Value::Text("HAM".into()));
    }

    #[test]
    fn display_matches_template_rendering() {
        assert_eq!(Value::Number(2023.0).to_string(), "2023");
        assert_eq!(Value::Number(12.5).to_string(), "12.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Text("Max".into()).to_string(), "Max");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(1997, 9, 30).unwrap()).to_string(),
            "1997-09-30"
        );
    }

    #[test]
    fn integer_view() {
        assert_eq!(Value::Number(7.0).as_i64(), Some(7));
        assert_eq!(Value::Number(7.5).as_i64(), None);
        assert_eq!(Value::Text("7".into()).as_i64(), None);
    }
}
