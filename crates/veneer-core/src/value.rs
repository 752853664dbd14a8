use crate::Result;

use serde::Serialize;

/// A dynamically typed field value.
///
/// Values cross the flat-map boundary in both directions: reads produce them
/// and writes consume them. `Record` holds a composite value assembled from
/// multiparam fragments (for example a date built from year/month/day parts).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point
    F64(f64),

    /// Null value
    #[default]
    Null,

    /// Composite value built from positional parts
    Record(Vec<Value>),

    /// String value
    String(String),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub fn record_from_vec(parts: Vec<Self>) -> Self {
        Self::Record(parts)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[Self]> {
        match self {
            Self::Record(parts) => Some(parts),
            _ => None,
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => Err(crate::Error::type_conversion(self, "String")),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            _ => Err(crate::Error::type_conversion(self, "i64")),
        }
    }

    #[track_caller]
    pub fn expect_string(&self) -> &str {
        match self {
            Self::String(v) => v,
            _ => panic!("expected string value, but was {self:#?}"),
        }
    }

    #[track_caller]
    pub fn expect_record(&self) -> &[Self] {
        match self {
            Self::Record(parts) => parts,
            _ => panic!("expected record value, but was {self:#?}"),
        }
    }

    /// Coerce the value to an integer, the way a multiparam `i` tag does.
    ///
    /// Strings are parsed; a fractional value is truncated. `None` means the
    /// value carries nothing coercible.
    pub fn coerce_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            Self::F64(v) => Some(*v as i64),
            Self::String(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce the value to a float, the way a multiparam `f` tag does.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            Self::I64(v) => Some(*v as f64),
            Self::String(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce the value to a string, the way a multiparam `s` tag does.
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Self::String(v) => Some(v.clone()),
            Self::I64(v) => Some(v.to_string()),
            Self::F64(v) => Some(v.to_string()),
            Self::Bool(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
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
