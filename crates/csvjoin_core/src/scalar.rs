use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ordfloat::OrdF64;

/// Logical type of a column or value.
///
/// Variants are ordered from the narrowest to the widest type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    Null,
    Boolean,
    Int64,
    Float64,
    Utf8,
}

/// A single untyped cell value.
///
/// Equality and hashing treat an integral float as the integer it holds, so
/// `Int64(2)` and `Float64(2.0)` are the same key. Ordering places booleans
/// first, then numbers, then strings, and nulls last.
#[derive(Debug, Clone)]
pub enum ScalarValue {
    /// Missing value.
    Null,

    /// True or false value
    Boolean(bool),

    /// Signed 64bit int
    Int64(i64),

    /// 64bit float
    Float64(OrdF64),

    /// Utf-8 encoded string.
    Utf8(String),
}

/// Normalized view of a scalar used for equality, hashing and ordering.
#[derive(Debug, Clone, Copy)]
enum Canonical<'a> {
    Boolean(bool),
    Int(i64),
    Float(OrdF64),
    Utf8(&'a str),
    Null,
}

impl Canonical<'_> {
    const fn rank(&self) -> u8 {
        match self {
            Self::Boolean(_) => 0,
            Self::Int(_) | Self::Float(_) => 1,
            Self::Utf8(_) => 2,
            Self::Null => 3,
        }
    }
}

/// Lower and upper bounds of floats that convert losslessly to an i64.
const I64_FLOAT_MIN: f64 = -9_223_372_036_854_775_808.0;
const I64_FLOAT_MAX: f64 = 9_223_372_036_854_775_808.0;

impl ScalarValue {
    pub fn float64(v: f64) -> Self {
        ScalarValue::Float64(OrdF64::new(v))
    }

    pub fn utf8(v: impl Into<String>) -> Self {
        ScalarValue::Utf8(v.into())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub const fn datatype(&self) -> DataType {
        match self {
            ScalarValue::Null => DataType::Null,
            ScalarValue::Boolean(_) => DataType::Boolean,
            ScalarValue::Int64(_) => DataType::Int64,
            ScalarValue::Float64(_) => DataType::Float64,
            ScalarValue::Utf8(_) => DataType::Utf8,
        }
    }

    fn canonical(&self) -> Canonical<'_> {
        match self {
            ScalarValue::Null => Canonical::Null,
            ScalarValue::Boolean(v) => Canonical::Boolean(*v),
            ScalarValue::Int64(v) => Canonical::Int(*v),
            ScalarValue::Float64(v) => {
                let f = v.value();
                if f.fract() == 0.0 && (I64_FLOAT_MIN..I64_FLOAT_MAX).contains(&f) {
                    Canonical::Int(f as i64)
                } else {
                    Canonical::Float(*v)
                }
            }
            ScalarValue::Utf8(v) => Canonical::Utf8(v),
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScalarValue {}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.canonical(), other.canonical());
        match (a, b) {
            (Canonical::Boolean(a), Canonical::Boolean(b)) => a.cmp(&b),
            (Canonical::Int(a), Canonical::Int(b)) => a.cmp(&b),
            (Canonical::Float(a), Canonical::Float(b)) => a.cmp(&b),
            // Ties between an int and a non-integral float can only come from
            // rounding the int, keep ints first.
            (Canonical::Int(a), Canonical::Float(b)) => {
                OrdF64::new(a as f64).cmp(&b).then(Ordering::Less)
            }
            (Canonical::Float(a), Canonical::Int(b)) => {
                a.cmp(&OrdF64::new(b as f64)).then(Ordering::Greater)
            }
            (Canonical::Utf8(a), Canonical::Utf8(b)) => a.cmp(b),
            (Canonical::Null, Canonical::Null) => Ordering::Equal,
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let canonical = self.canonical();
        canonical.rank().hash(state);
        match canonical {
            Canonical::Boolean(v) => v.hash(state),
            Canonical::Int(v) => v.hash(state),
            Canonical::Float(v) => v.value().to_bits().hash(state),
            Canonical::Utf8(v) => v.hash(state),
            Canonical::Null => (),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            ScalarValue::Boolean(v) => write!(f, "{v}"),
            ScalarValue::Int64(v) => write!(f, "{v}"),
            // Shortest form that reads back to the same float, integral
            // values keep their `.0`.
            ScalarValue::Float64(v) => write!(f, "{:?}", v.value()),
            ScalarValue::Utf8(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::float64(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl<T> From<Option<T>> for ScalarValue
where
    T: Into<ScalarValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ScalarValue::Null,
        }
    }
}
