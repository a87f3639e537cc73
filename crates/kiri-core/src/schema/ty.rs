use crate::stmt::Value;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// The declared type category of a column.
///
/// SQLite only records the type name written in the DDL, so the category
/// is recovered from that name the same way the store assigns column
/// affinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Whole numbers
    Integer,

    /// Floating point and decimal numbers
    Real,

    /// Unconstrained text
    Text,

    Boolean,

    /// Date or date-time, stored as text
    Timestamp,

    /// Text restricted to a fixed set of variants
    Enum(Vec<String>),
}

impl Type {
    /// Classifies a declared column type such as `VARCHAR(200)` or
    /// `DECIMAL(10, 2)`.
    ///
    /// Enumerations are not recognised here; the variants live outside the
    /// type name and are attached by the driver.
    pub fn from_declared(declared: &str) -> Type {
        let declared = declared.to_ascii_uppercase();

        if declared.contains("BOOL") {
            Type::Boolean
        } else if declared.contains("DATE") || declared.contains("TIME") {
            Type::Timestamp
        } else if declared.contains("INT") {
            Type::Integer
        } else if declared.contains("CHAR") || declared.contains("CLOB") || declared.contains("TEXT")
        {
            Type::Text
        } else if ["REAL", "FLOA", "DOUB", "NUM", "DEC"]
            .iter()
            .any(|needle| declared.contains(needle))
        {
            Type::Real
        } else {
            Type::Text
        }
    }

    /// Lowercase name of the category, used in warnings.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Integer => "integer",
            Type::Real => "real",
            Type::Text => "text",
            Type::Boolean => "boolean",
            Type::Timestamp => "timestamp",
            Type::Enum(_) => "enum",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Real)
    }

    /// Converts `value` into the representation this column stores.
    ///
    /// Only unambiguous conversions are performed. Returns `None` when the
    /// value does not fit the column; callers drop such fields. `Null` is
    /// accepted by every type; nullability is checked separately.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        if value.is_null() {
            return Some(value);
        }

        match self {
            Type::Integer => match value {
                Value::I64(_) => Some(value),
                Value::F64(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
                    Some(Value::I64(v as i64))
                }
                Value::String(v) => v.parse::<i64>().ok().map(Value::I64),
                _ => None,
            },
            Type::Real => match value {
                Value::F64(_) => Some(value),
                Value::I64(v) => Some(Value::F64(v as f64)),
                Value::String(v) => v
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Value::F64),
                _ => None,
            },
            Type::Text => match value {
                Value::String(_) => Some(value),
                Value::I64(v) => Some(Value::String(v.to_string())),
                Value::F64(v) if v.is_finite() => Some(Value::String(v.to_string())),
                _ => None,
            },
            Type::Boolean => match value {
                Value::Bool(_) => Some(value),
                Value::I64(0) => Some(Value::Bool(false)),
                Value::I64(1) => Some(Value::Bool(true)),
                Value::String(v) => match v.as_str() {
                    "true" => Some(Value::Bool(true)),
                    "false" => Some(Value::Bool(false)),
                    _ => None,
                },
                _ => None,
            },
            Type::Timestamp => match value {
                Value::String(ref v) if is_timestamp(v) => Some(value),
                _ => None,
            },
            Type::Enum(variants) => match value {
                Value::String(ref v) if variants.iter().any(|variant| variant == v) => Some(value),
                _ => None,
            },
        }
    }
}

fn is_timestamp(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
