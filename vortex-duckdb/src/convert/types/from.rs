use std::sync::Arc;

use vortex_dtype::Nullability::Nullable;
use vortex_dtype::{DType, Nullability, PType, StructDType};
use vortex_error::{VortexResult, vortex_bail};

use crate::duckdb::LogicalType;

pub trait FromDuckDBType<A> {
    fn from_duckdb(type_: A, nullable: Nullability) -> VortexResult<Self>
    where
        Self: Sized;
}

impl FromDuckDBType<&LogicalType> for DType {
    fn from_duckdb(type_: &LogicalType, nullable: Nullability) -> VortexResult<Self> {
        Ok(match type_ {
            LogicalType::Invalid | LogicalType::SqlNull => DType::Null,
            LogicalType::Boolean => DType::Bool(nullable),
            LogicalType::TinyInt => DType::Primitive(PType::I8, nullable),
            LogicalType::SmallInt => DType::Primitive(PType::I16, nullable),
            LogicalType::Integer => DType::Primitive(PType::I32, nullable),
            LogicalType::BigInt => DType::Primitive(PType::I64, nullable),
            LogicalType::UTinyInt => DType::Primitive(PType::U8, nullable),
            LogicalType::USmallInt => DType::Primitive(PType::U16, nullable),
            LogicalType::UInteger => DType::Primitive(PType::U32, nullable),
            LogicalType::UBigInt => DType::Primitive(PType::U64, nullable),
            LogicalType::Float => DType::Primitive(PType::F32, nullable),
            LogicalType::Double => DType::Primitive(PType::F64, nullable),
            LogicalType::Char | LogicalType::Varchar => DType::Utf8(nullable),
            LogicalType::Blob => DType::Binary(nullable),
            // Children carry no nullability of their own in the host.
            LogicalType::List(child) => {
                DType::List(Arc::new(DType::from_duckdb(child.as_ref(), Nullable)?), nullable)
            }
            LogicalType::Struct(fields) => DType::Struct(
                StructDType::try_new(
                    fields.iter().map(|(n, _)| n.as_str().into()).collect(),
                    fields
                        .iter()
                        .map(|(_, t)| DType::from_duckdb(t, Nullable))
                        .collect::<VortexResult<Vec<_>>>()?,
                )?,
                nullable,
            ),
            LogicalType::Date | LogicalType::Timestamp => {
                vortex_bail!(NotImplemented: "{}", type_)
            }
        })
    }
}
