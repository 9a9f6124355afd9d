use vortex_dtype::{DType, Nullability};
use vortex_error::{VortexResult, vortex_bail, vortex_err};
use vortex_scalar::{PValue, Scalar};

use crate::convert::{FromDuckDBType, ToDuckDBType};
use crate::duckdb::Value;

pub trait ToDuckDBScalar {
    fn try_to_duckdb_scalar(&self) -> VortexResult<Value>;
}

impl ToDuckDBScalar for Scalar {
    fn try_to_duckdb_scalar(&self) -> VortexResult<Value> {
        let value = match self.dtype() {
            DType::Null => None,
            DType::Bool(_) => self.as_bool()?.map(Value::Boolean),
            DType::Primitive(..) => self.as_pvalue()?.map(pvalue_to_value),
            DType::Utf8(_) => self.as_utf8()?.map(|s| Value::Varchar(s.to_string())),
            DType::Binary(_) => self.as_binary()?.map(|b| Value::Blob(b.to_vec())),
            DType::Struct(..) | DType::List(..) => {
                vortex_bail!(NotImplemented: "nested scalar {} to duckdb value", self.dtype())
            }
        };
        Ok(value.unwrap_or_else(|| Value::Null(self.dtype().to_duckdb_type())))
    }
}

fn pvalue_to_value(pvalue: PValue) -> Value {
    match pvalue {
        PValue::U8(v) => v.into(),
        PValue::U16(v) => v.into(),
        PValue::U32(v) => v.into(),
        PValue::U64(v) => v.into(),
        PValue::I8(v) => v.into(),
        PValue::I16(v) => v.into(),
        PValue::I32(v) => v.into(),
        PValue::I64(v) => v.into(),
        PValue::F32(v) => v.into(),
        PValue::F64(v) => v.into(),
    }
}

/// Convert a host constant into a [`Scalar`] of the matching dtype.
///
/// Nulls always produce a nullable scalar, whatever `nullability` asks for, since a
/// non-nullable null does not exist.
pub fn value_into_scalar(value: &Value, nullability: Nullability) -> VortexResult<Scalar> {
    Ok(match value {
        Value::Null(type_) => Scalar::null(DType::from_duckdb(type_, Nullability::Nullable)?),
        Value::Boolean(v) => Scalar::bool(*v, nullability),
        Value::TinyInt(v) => Scalar::primitive(*v, nullability),
        Value::SmallInt(v) => Scalar::primitive(*v, nullability),
        Value::Integer(v) => Scalar::primitive(*v, nullability),
        Value::BigInt(v) => Scalar::primitive(*v, nullability),
        Value::UTinyInt(v) => Scalar::primitive(*v, nullability),
        Value::USmallInt(v) => Scalar::primitive(*v, nullability),
        Value::UInteger(v) => Scalar::primitive(*v, nullability),
        Value::UBigInt(v) => Scalar::primitive(*v, nullability),
        Value::Float(v) => Scalar::primitive(*v, nullability),
        Value::Double(v) => Scalar::primitive(*v, nullability),
        Value::Char(v) | Value::Varchar(v) => Scalar::utf8(v.as_str(), nullability),
        Value::Blob(v) => Scalar::binary(v.as_slice(), nullability),
        Value::Date(_) | Value::Timestamp(_) | Value::List(..) => {
            return Err(vortex_err!(NotImplemented: "{}", value.logical_type()));
        }
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use vortex_dtype::Nullability::{NonNullable, Nullable};
    use vortex_dtype::PType;

    use crate::duckdb::LogicalType;

    use super::*;

    #[rstest]
    #[case(Value::Boolean(true), Scalar::bool(true, Nullable))]
    #[case(Value::TinyInt(-3), Scalar::primitive(-3i8, Nullable))]
    #[case(Value::Integer(30), Scalar::primitive(30i32, Nullable))]
    #[case(Value::UBigInt(u64::MAX), Scalar::primitive(u64::MAX, Nullable))]
    #[case(Value::Float(1.5), Scalar::primitive(1.5f32, Nullable))]
    #[case(Value::Double(-0.25), Scalar::primitive(-0.25f64, Nullable))]
    #[case(Value::Char("x".into()), Scalar::utf8("x", Nullable))]
    #[case(Value::from("US"), Scalar::utf8("US", Nullable))]
    #[case(Value::Blob(vec![1, 2]), Scalar::binary(vec![1u8, 2], Nullable))]
    #[case(Value::null(), Scalar::null(DType::Null))]
    #[case(Value::Null(LogicalType::Invalid), Scalar::null(DType::Null))]
    #[case(
        Value::Null(LogicalType::Integer),
        Scalar::null(DType::Primitive(PType::I32, Nullable))
    )]
    fn literal_mapping(#[case] value: Value, #[case] expected: Scalar) {
        assert_eq!(value_into_scalar(&value, Nullable).unwrap(), expected);
    }

    #[test]
    fn null_is_nullable_regardless() {
        let scalar = value_into_scalar(&Value::Null(LogicalType::Varchar), NonNullable).unwrap();
        assert!(scalar.is_null());
        assert!(scalar.dtype().is_nullable());
    }

    #[rstest]
    #[case(Value::Date(1), "DATE")]
    #[case(Value::Timestamp(1), "TIMESTAMP")]
    #[case(Value::Null(LogicalType::Date), "DATE")]
    #[case(Value::List(LogicalType::Integer, vec![]), "INTEGER[]")]
    fn unsupported(#[case] value: Value, #[case] type_name: &str) {
        let err = value_into_scalar(&value, Nullable).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains(type_name));
    }

    #[rstest]
    #[case(Scalar::primitive(7u16, NonNullable), Value::USmallInt(7))]
    #[case(Scalar::null(DType::Primitive(PType::I64, Nullable)), Value::Null(LogicalType::BigInt))]
    #[case(Scalar::utf8("a", Nullable), Value::Varchar("a".into()))]
    #[case(Scalar::null(DType::Null), Value::null())]
    fn to_duckdb_value(#[case] scalar: Scalar, #[case] expected: Value) {
        assert_eq!(scalar.try_to_duckdb_scalar().unwrap(), expected);
    }
}
