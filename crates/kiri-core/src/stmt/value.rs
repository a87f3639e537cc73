use serde::{Serialize, Serializer};
use std::fmt;

/// A scalar value exchanged with the store or a client.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// 64-bit floating point value
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the value's runtime shape, used in warnings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::F64(_) => "float",
            Self::I64(_) => "integer",
            Self::Null => "null",
            Self::String(_) => "string",
        }
    }

    /// Converts a JSON value into a scalar value.
    ///
    /// Returns `None` for arrays and objects. Integral JSON numbers that fit
    /// in an `i64` become `I64`; every other number becomes `F64`.
    pub fn from_json(value: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;

        match value {
            Json::Null => Some(Value::Null),
            Json::Bool(v) => Some(Value::Bool(*v)),
            Json::Number(n) => match n.as_i64() {
                Some(v) => Some(Value::I64(v)),
                None => n.as_f64().map(Value::F64),
            },
            Json::String(v) => Some(Value::String(v.clone())),
            Json::Array(_) | Json::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Bool(v) => Json::Bool(*v),
            Value::F64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::I64(v) => Json::from(*v),
            Value::Null => Json::Null,
            Value::String(v) => Json::String(v.clone()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::Null => serializer.serialize_none(),
            Value::String(v) => serializer.serialize_str(v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Null => f.write_str("NULL"),
            Value::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
