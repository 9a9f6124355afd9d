use vortex_dtype::{DType, PType};

use crate::duckdb::LogicalType;

pub trait ToDuckDBType {
    fn to_duckdb_type(&self) -> LogicalType;
}

impl ToDuckDBType for DType {
    fn to_duckdb_type(&self) -> LogicalType {
        // The host tracks nullability as a column constraint, not on the type.
        match self {
            DType::Null => LogicalType::SqlNull,
            DType::Bool(_) => LogicalType::Boolean,
            DType::Primitive(ptype, _) => match ptype {
                PType::I8 => LogicalType::TinyInt,
                PType::I16 => LogicalType::SmallInt,
                PType::I32 => LogicalType::Integer,
                PType::I64 => LogicalType::BigInt,
                PType::U8 => LogicalType::UTinyInt,
                PType::U16 => LogicalType::USmallInt,
                PType::U32 => LogicalType::UInteger,
                PType::U64 => LogicalType::UBigInt,
                PType::F32 => LogicalType::Float,
                PType::F64 => LogicalType::Double,
            },
            DType::Utf8(_) => LogicalType::Varchar,
            DType::Binary(_) => LogicalType::Blob,
            DType::Struct(struct_, _) => LogicalType::Struct(
                struct_
                    .names()
                    .iter()
                    .zip(struct_.fields())
                    .map(|(name, field)| (name.to_string(), field.to_duckdb_type()))
                    .collect(),
            ),
            DType::List(element, _) => LogicalType::list(element.to_duckdb_type()),
        }
    }
}
