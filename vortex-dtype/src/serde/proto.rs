use std::sync::Arc;

use vortex_error::{VortexError, VortexResult, vortex_err};
use vortex_proto::dtype as pb;
use vortex_proto::dtype::d_type::DtypeType;

use crate::{DType, FieldName, PType, StructDType};

impl From<&DType> for pb::DType {
    fn from(value: &DType) -> Self {
        let dtype_type = match value {
            DType::Null => DtypeType::Null(pb::Null {}),
            DType::Bool(n) => DtypeType::Bool(pb::Bool {
                nullable: (*n).into(),
            }),
            DType::Primitive(ptype, n) => DtypeType::Primitive(pb::Primitive {
                r#type: pb::PType::from(*ptype).into(),
                nullable: (*n).into(),
            }),
            DType::Utf8(n) => DtypeType::Utf8(pb::Utf8 {
                nullable: (*n).into(),
            }),
            DType::Binary(n) => DtypeType::Binary(pb::Binary {
                nullable: (*n).into(),
            }),
            DType::Struct(st, n) => DtypeType::Struct(pb::Struct {
                names: st.names().iter().map(|name| name.to_string()).collect(),
                dtypes: st.fields().map(pb::DType::from).collect(),
                nullable: (*n).into(),
            }),
            DType::List(element, n) => DtypeType::List(pb::List {
                element_type: Some(Box::new(element.as_ref().into())),
                nullable: (*n).into(),
            }),
        };
        pb::DType {
            dtype_type: Some(dtype_type),
        }
    }
}

impl TryFrom<&pb::DType> for DType {
    type Error = VortexError;

    fn try_from(value: &pb::DType) -> VortexResult<Self> {
        let dtype_type = value
            .dtype_type
            .as_ref()
            .ok_or_else(|| vortex_err!(InvalidSerde: "Unrecognized DType"))?;

        match dtype_type {
            DtypeType::Null(_) => Ok(DType::Null),
            DtypeType::Bool(b) => Ok(DType::Bool(b.nullable.into())),
            DtypeType::Primitive(p) => Ok(DType::Primitive(
                PType::try_from(p.r#type)?,
                p.nullable.into(),
            )),
            DtypeType::Utf8(u) => Ok(DType::Utf8(u.nullable.into())),
            DtypeType::Binary(b) => Ok(DType::Binary(b.nullable.into())),
            DtypeType::Struct(s) => {
                let names: Arc<[FieldName]> =
                    s.names.iter().map(|name| FieldName::from(name.as_str())).collect();
                let dtypes = s
                    .dtypes
                    .iter()
                    .map(DType::try_from)
                    .collect::<VortexResult<Vec<_>>>()?;
                Ok(DType::Struct(
                    StructDType::try_new(names, dtypes)
                        .map_err(|e| e.with_context("Invalid struct DType"))?,
                    s.nullable.into(),
                ))
            }
            DtypeType::List(l) => {
                let element = l
                    .element_type
                    .as_deref()
                    .ok_or_else(|| vortex_err!(InvalidSerde: "List missing element type"))?;
                Ok(DType::List(
                    Arc::new(DType::try_from(element)?),
                    l.nullable.into(),
                ))
            }
        }
    }
}

impl From<PType> for pb::PType {
    fn from(value: PType) -> Self {
        match value {
            PType::U8 => pb::PType::U8,
            PType::U16 => pb::PType::U16,
            PType::U32 => pb::PType::U32,
            PType::U64 => pb::PType::U64,
            PType::I8 => pb::PType::I8,
            PType::I16 => pb::PType::I16,
            PType::I32 => pb::PType::I32,
            PType::I64 => pb::PType::I64,
            PType::F32 => pb::PType::F32,
            PType::F64 => pb::PType::F64,
        }
    }
}

impl TryFrom<i32> for PType {
    type Error = VortexError;

    fn try_from(value: i32) -> VortexResult<Self> {
        let ptype = pb::PType::try_from(value)
            .map_err(|_| vortex_err!(InvalidSerde: "Unknown primitive type {}", value))?;
        Ok(match ptype {
            pb::PType::U8 => PType::U8,
            pb::PType::U16 => PType::U16,
            pb::PType::U32 => PType::U32,
            pb::PType::U64 => PType::U64,
            pb::PType::I8 => PType::I8,
            pb::PType::I16 => PType::I16,
            pb::PType::I32 => PType::I32,
            pb::PType::I64 => PType::I64,
            pb::PType::F32 => PType::F32,
            pb::PType::F64 => PType::F64,
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use vortex_proto::dtype as pb;

    use crate::Nullability::{NonNullable, Nullable};
    use crate::{DType, PType, StructDType};

    fn round_trip(dtype: DType) {
        assert_eq!(dtype, DType::try_from(&pb::DType::from(&dtype)).unwrap());
    }

    #[test]
    fn test_scalars() {
        round_trip(DType::Null);
        round_trip(DType::Bool(Nullable));
        round_trip(DType::Primitive(PType::U16, NonNullable));
        round_trip(DType::Primitive(PType::F64, Nullable));
        round_trip(DType::Utf8(NonNullable));
        round_trip(DType::Binary(Nullable));
    }

    #[test]
    fn test_nested() {
        round_trip(DType::Struct(
            StructDType::from_iter([
                ("a", DType::Primitive(PType::I8, Nullable)),
                (
                    "b",
                    DType::List(Arc::new(DType::Utf8(NonNullable)), Nullable),
                ),
            ]),
            NonNullable,
        ));
    }

    #[test]
    fn test_missing_type() {
        assert!(DType::try_from(&pb::DType { dtype_type: None }).is_err());
    }

    #[test]
    fn test_unknown_ptype() {
        assert!(PType::try_from(42).is_err());
    }
}
