use crate::constants::MISSING_SENTINEL;
use std::{borrow::Cow, fmt};

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Missing,
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Text cell, or `Missing` for the VCF missing marker `.`.
    pub fn from_vcf_text(value: &str) -> Self {
        if value == MISSING_SENTINEL {
            Value::Missing
        } else {
            Value::Text(value.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Textual rendering of present values; `None` only for `Missing`.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Missing => None,
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Flag(_) | Value::Missing => None,
        }
    }

    /// Numeric coercion: unparsable text becomes `Missing`.
    pub fn coerce_numeric(self) -> Self {
        match self {
            Value::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Value::Integer(i)
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(n) if !n.is_nan() => Value::Number(n),
                        _ => Value::Missing,
                    }
                }
            }
            Value::Number(n) if n.is_nan() => Value::Missing,
            other => other,
        }
    }

    /// Float coercion for Float-declared columns: integral text stays a float.
    pub fn coerce_float(self) -> Self {
        match self {
            Value::Integer(i) => Value::Number(i as f64),
            Value::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if !n.is_nan() => Value::Number(n),
                _ => Value::Missing,
            },
            Value::Number(n) if n.is_nan() => Value::Missing,
            other => other,
        }
    }

    /// Cell text for the finished table.
    pub fn to_output_text(&self) -> String {
        match self {
            Value::Missing => MISSING_SENTINEL.to_string(),
            Value::Text(s) if s.is_empty() || s == "nan" || s == "None" => {
                MISSING_SENTINEL.to_string()
            }
            Value::Number(n) if n.is_nan() => MISSING_SENTINEL.to_string(),
            other => other.to_string(),
        }
    }
}

/// `x / divisor` when `value` reads as a number, otherwise `value` untouched.
pub fn safe_divide(value: Value, divisor: f64) -> Value {
    if divisor == 0.0 {
        return value;
    }
    match value.as_f64() {
        Some(x) => Value::Number(x / divisor),
        None => value,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "{MISSING_SENTINEL}"),
            Value::Flag(true) => write!(f, "True"),
            Value::Flag(false) => write!(f, "False"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{n:.1}")
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}
