use std::fmt::{Display, Formatter};

use crate::duckdb::LogicalType;

/// A constant as the host engine hands it to a table function, e.g. the right hand side of a
/// pushed-down comparison.
///
/// Nulls are typed: `Null(LogicalType::Integer)` is `NULL::INTEGER`, a bare `NULL` is
/// `Null(LogicalType::SqlNull)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null(LogicalType),
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    UTinyInt(u8),
    USmallInt(u16),
    UInteger(u32),
    UBigInt(u64),
    Float(f32),
    Double(f64),
    Char(String),
    Varchar(String),
    Blob(Vec<u8>),
    /// Days since the unix epoch.
    Date(i32),
    /// Microseconds since the unix epoch.
    Timestamp(i64),
    List(LogicalType, Vec<Value>),
}

impl Value {
    pub fn null() -> Self {
        Self::Null(LogicalType::SqlNull)
    }

    pub fn logical_type(&self) -> LogicalType {
        match self {
            Self::Null(t) => t.clone(),
            Self::Boolean(_) => LogicalType::Boolean,
            Self::TinyInt(_) => LogicalType::TinyInt,
            Self::SmallInt(_) => LogicalType::SmallInt,
            Self::Integer(_) => LogicalType::Integer,
            Self::BigInt(_) => LogicalType::BigInt,
            Self::UTinyInt(_) => LogicalType::UTinyInt,
            Self::USmallInt(_) => LogicalType::USmallInt,
            Self::UInteger(_) => LogicalType::UInteger,
            Self::UBigInt(_) => LogicalType::UBigInt,
            Self::Float(_) => LogicalType::Float,
            Self::Double(_) => LogicalType::Double,
            Self::Char(_) => LogicalType::Char,
            Self::Varchar(_) => LogicalType::Varchar,
            Self::Blob(_) => LogicalType::Blob,
            Self::Date(_) => LogicalType::Date,
            Self::Timestamp(_) => LogicalType::Timestamp,
            Self::List(child, _) => LogicalType::list(child.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null(_) => write!(f, "NULL"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::TinyInt(v) => write!(f, "{v}"),
            Self::SmallInt(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::UTinyInt(v) => write!(f, "{v}"),
            Self::USmallInt(v) => write!(f, "{v}"),
            Self::UInteger(v) => write!(f, "{v}"),
            Self::UBigInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Char(v) | Self::Varchar(v) => write!(f, "'{v}'"),
            Self::Blob(v) => {
                for b in v {
                    write!(f, "\\x{b:02X}")?;
                }
                Ok(())
            }
            Self::Date(days) => write!(f, "DATE {days}"),
            Self::Timestamp(us) => write!(f, "TIMESTAMP {us}"),
            Self::List(_, values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! value_from {
    ($T:ty, $variant:ident) => {
        impl From<$T> for Value {
            fn from(value: $T) -> Self {
                Self::$variant(value)
            }
        }
    };
}

value_from!(bool, Boolean);
value_from!(i8, TinyInt);
value_from!(i16, SmallInt);
value_from!(i32, Integer);
value_from!(i64, BigInt);
value_from!(u8, UTinyInt);
value_from!(u16, USmallInt);
value_from!(u32, UInteger);
value_from!(u64, UBigInt);
value_from!(f32, Float);
value_from!(f64, Double);
value_from!(String, Varchar);
value_from!(Vec<u8>, Blob);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Varchar(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes a null of type `SQLNULL`; prefer [`Value::Null`] when the type is known.
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_else(Value::null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_nulls() {
        let v = Value::Null(LogicalType::Integer);
        assert!(v.is_null());
        assert_eq!(v.logical_type(), LogicalType::Integer);
        assert_eq!(Value::null().logical_type(), LogicalType::SqlNull);
        assert_eq!(Value::from(None::<i32>), Value::null());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("US").to_string(), "'US'");
        assert_eq!(Value::from(30).to_string(), "30");
        assert_eq!(Value::Blob(vec![0xab, 0x01]).to_string(), "\\xAB\\x01");
        assert_eq!(
            Value::List(LogicalType::Integer, vec![1.into(), 2.into()]).to_string(),
            "[1, 2]"
        );
    }
}
