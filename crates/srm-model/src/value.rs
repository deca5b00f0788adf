//! Scalar kinds and typed field values.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::grid::{CellValue, format_numeric};

/// The declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    #[serde(alias = "string")]
    Text,
    #[serde(alias = "integer")]
    Int,
    #[serde(alias = "number")]
    Float,
    #[serde(alias = "boolean")]
    Bool,
    Date,
    DateTime,
}

impl ScalarKind {
    /// Lowercase name used in messages and schema files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "int" | "integer" => Ok(Self::Int),
            "float" | "number" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }
}

/// A typed value held by (or destined for) a record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns the kind of a non-null value.
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(ScalarKind::Text),
            Self::Int(_) => Some(ScalarKind::Int),
            Self::Float(_) => Some(ScalarKind::Float),
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Date(_) => Some(ScalarKind::Date),
            Self::DateTime(_) => Some(ScalarKind::DateTime),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The blank value an unmatched field of `kind` starts from.
    ///
    /// Dates have no zero value and start as `Null`.
    pub fn default_for(kind: ScalarKind, nullable: bool) -> Self {
        if nullable {
            return Self::Null;
        }
        match kind {
            ScalarKind::Text => Self::Text(String::new()),
            ScalarKind::Int => Self::Int(0),
            ScalarKind::Float => Self::Float(0.0),
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::Date | ScalarKind::DateTime => Self::Null,
        }
    }

    /// Converts the value to a grid cell for export.
    pub fn into_cell(self) -> CellValue {
        match self {
            Self::Null => CellValue::Missing,
            Self::Text(s) => CellValue::Text(s),
            Self::Int(v) => CellValue::Int(v),
            Self::Float(v) => CellValue::Float(v),
            Self::Bool(v) => CellValue::Bool(v),
            Self::Date(v) => CellValue::Date(v),
            Self::DateTime(v) => CellValue::DateTime(v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A Rust type that can be stored in a record field.
///
/// `from_value` receives a value already coerced to [`Scalar::KIND`]; it only
/// has to unwrap it and check ranges for narrow types.
pub trait Scalar: Sized + 'static {
    const KIND: ScalarKind;
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self, String>;

    fn to_value(&self) -> Value;
}

fn mismatch(value: &Value, expected: ScalarKind) -> String {
    match value.kind() {
        Some(kind) => format!("expected {expected} value, got {kind}"),
        None => "missing value".to_string(),
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

macro_rules! int_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::Int;

            fn from_value(value: Value) -> Result<Self, String> {
                match value {
                    Value::Int(v) => <$ty>::try_from(v)
                        .map_err(|_| format!("{v} is out of range for {}", stringify!($ty))),
                    other => Err(mismatch(&other, Self::KIND)),
                }
            }

            #[allow(clippy::cast_precision_loss)]
            fn to_value(&self) -> Value {
                i64::try_from(*self).map_or_else(|_| Value::Float(*self as f64), Value::Int)
            }
        }
    )*};
}

int_scalar!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(v) if v.is_finite() && v.abs() > f64::from(f32::MAX) => {
                Err(format!("{v} is out of range for f32"))
            }
            Value::Float(v) => Ok(v as f32),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Scalar for NaiveDate {
    const KIND: ScalarKind = ScalarKind::Date;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Date(v) => Ok(v),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl Scalar for NaiveDateTime {
    const KIND: ScalarKind = ScalarKind::DateTime;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::DateTime(v) => Ok(v),
            other => Err(mismatch(&other, Self::KIND)),
        }
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl<T: Scalar> Scalar for Option<T> {
    const KIND: ScalarKind = T::KIND;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Scalar::to_value)
    }
}
