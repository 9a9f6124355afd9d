use vortex_dtype::DType;
use vortex_error::{VortexError, VortexResult, vortex_err};
use vortex_proto::scalar as pb;
use vortex_proto::scalar::scalar_value::Kind;

use crate::pvalue::PValue;
use crate::{InnerScalarValue, Scalar, ScalarValue};

impl From<&Scalar> for pb::Scalar {
    fn from(value: &Scalar) -> Self {
        pb::Scalar {
            dtype: Some(value.dtype().into()),
            value: Some(value.value().into()),
        }
    }
}

impl From<&ScalarValue> for pb::ScalarValue {
    fn from(value: &ScalarValue) -> Self {
        match value {
            ScalarValue(InnerScalarValue::Null) => pb::ScalarValue {
                kind: Some(Kind::NullValue(prost_types::NullValue::NullValue.into())),
            },
            ScalarValue(InnerScalarValue::Bool(v)) => pb::ScalarValue {
                kind: Some(Kind::BoolValue(*v)),
            },
            ScalarValue(InnerScalarValue::Primitive(v)) => v.into(),
            ScalarValue(InnerScalarValue::Buffer(v)) => pb::ScalarValue {
                kind: Some(Kind::BytesValue(v.to_vec())),
            },
            ScalarValue(InnerScalarValue::BufferString(v)) => pb::ScalarValue {
                kind: Some(Kind::StringValue(v.to_string())),
            },
        }
    }
}

impl From<&PValue> for pb::ScalarValue {
    fn from(value: &PValue) -> Self {
        let kind = match *value {
            PValue::I8(v) => Kind::Int8Value(v.into()),
            PValue::I16(v) => Kind::Int16Value(v.into()),
            PValue::I32(v) => Kind::Int32Value(v),
            PValue::I64(v) => Kind::Int64Value(v),
            PValue::U8(v) => Kind::Uint8Value(v.into()),
            PValue::U16(v) => Kind::Uint16Value(v.into()),
            PValue::U32(v) => Kind::Uint32Value(v),
            PValue::U64(v) => Kind::Uint64Value(v),
            PValue::F32(v) => Kind::F32Value(v),
            PValue::F64(v) => Kind::F64Value(v),
        };
        pb::ScalarValue { kind: Some(kind) }
    }
}

impl TryFrom<&pb::Scalar> for Scalar {
    type Error = VortexError;

    fn try_from(value: &pb::Scalar) -> Result<Self, Self::Error> {
        let dtype = DType::try_from(
            value
                .dtype
                .as_ref()
                .ok_or_else(|| vortex_err!(InvalidSerde: "Scalar missing dtype"))?,
        )?;

        let value = deserialize_scalar_value(
            value
                .value
                .as_ref()
                .ok_or_else(|| vortex_err!(InvalidSerde: "Scalar missing value"))?,
        )?;

        Scalar::try_new(dtype, value)
            .map_err(|e| e.with_context("Deserialized scalar does not match its dtype"))
    }
}

fn deserialize_scalar_value(value: &pb::ScalarValue) -> VortexResult<ScalarValue> {
    let kind = value
        .kind
        .as_ref()
        .ok_or_else(|| vortex_err!(InvalidSerde: "ScalarValue missing kind"))?;

    let inner = match kind {
        Kind::NullValue(_) => InnerScalarValue::Null,
        Kind::BoolValue(v) => InnerScalarValue::Bool(*v),
        Kind::Int8Value(v) => InnerScalarValue::Primitive(PValue::I8(i8::try_from(*v)?)),
        Kind::Int16Value(v) => InnerScalarValue::Primitive(PValue::I16(i16::try_from(*v)?)),
        Kind::Int32Value(v) => InnerScalarValue::Primitive(PValue::I32(*v)),
        Kind::Int64Value(v) => InnerScalarValue::Primitive(PValue::I64(*v)),
        Kind::Uint8Value(v) => InnerScalarValue::Primitive(PValue::U8(u8::try_from(*v)?)),
        Kind::Uint16Value(v) => InnerScalarValue::Primitive(PValue::U16(u16::try_from(*v)?)),
        Kind::Uint32Value(v) => InnerScalarValue::Primitive(PValue::U32(*v)),
        Kind::Uint64Value(v) => InnerScalarValue::Primitive(PValue::U64(*v)),
        Kind::F32Value(v) => InnerScalarValue::Primitive(PValue::F32(*v)),
        Kind::F64Value(v) => InnerScalarValue::Primitive(PValue::F64(*v)),
        Kind::StringValue(v) => InnerScalarValue::BufferString(v.as_str().into()),
        Kind::BytesValue(v) => InnerScalarValue::Buffer(v.as_slice().into()),
    };
    Ok(ScalarValue(inner))
}
