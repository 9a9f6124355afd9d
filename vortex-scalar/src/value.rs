use std::cmp::Ordering;
use std::fmt::{Display, Write};
use std::sync::Arc;

use vortex_dtype::DType;
use vortex_error::{VortexResult, vortex_err};

use crate::pvalue::PValue;

/// Represents the internal data of a scalar value. Must be interpreted by wrapping
/// up with a DType to make a Scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarValue(pub(crate) InnerScalarValue);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum InnerScalarValue {
    Bool(bool),
    Primitive(PValue),
    Buffer(Arc<[u8]>),
    BufferString(Arc<str>),
    Null,
}

fn to_hex(slice: &[u8]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    for byte in slice {
        write!(output, "{:02x}", byte)?;
    }
    Ok(output)
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for InnerScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Primitive(pvalue) => write!(f, "{}", pvalue),
            Self::Buffer(buf) => {
                if buf.len() > 10 {
                    write!(
                        f,
                        "{}..{}",
                        to_hex(&buf[0..5])?,
                        to_hex(&buf[buf.len() - 5..buf.len()])?,
                    )
                } else {
                    write!(f, "{}", to_hex(buf)?)
                }
            }
            Self::BufferString(s) => write!(f, "\"{}\"", s.escape_default()),
            Self::Null => write!(f, "null"),
        }
    }
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn is_instance_of(&self, dtype: &DType) -> bool {
        self.0.is_instance_of(dtype)
    }

    pub fn as_bool(&self) -> VortexResult<Option<bool>> {
        self.0.as_bool()
    }

    pub fn as_pvalue(&self) -> VortexResult<Option<PValue>> {
        self.0.as_pvalue()
    }

    pub fn as_buffer(&self) -> VortexResult<Option<Arc<[u8]>>> {
        self.0.as_buffer()
    }

    pub fn as_buffer_string(&self) -> VortexResult<Option<Arc<str>>> {
        self.0.as_buffer_string()
    }
}

impl InnerScalarValue {
    pub(crate) fn is_null(&self) -> bool {
        matches!(self, InnerScalarValue::Null)
    }

    pub(crate) fn is_instance_of(&self, dtype: &DType) -> bool {
        match (&self, dtype) {
            (InnerScalarValue::Bool(_), DType::Bool(_)) => true,
            (InnerScalarValue::Primitive(pvalue), DType::Primitive(ptype, _)) => {
                pvalue.is_instance_of(ptype)
            }
            (InnerScalarValue::Buffer(_), DType::Binary(_)) => true,
            (InnerScalarValue::BufferString(_), DType::Utf8(_)) => true,
            (InnerScalarValue::Null, dtype) => dtype.is_nullable(),
            _ => false,
        }
    }

    /// Order two values of the same kind. Nulls and mismatched kinds are unordered.
    pub(crate) fn partial_cmp_value(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => Some(s.cmp(o)),
            (Self::Primitive(s), Self::Primitive(o)) => s.partial_cmp(o),
            (Self::Buffer(s), Self::Buffer(o)) => Some(s.cmp(o)),
            (Self::BufferString(s), Self::BufferString(o)) => Some(s.cmp(o)),
            _ => None,
        }
    }

    pub(crate) fn as_bool(&self) -> VortexResult<Option<bool>> {
        match &self {
            InnerScalarValue::Null => Ok(None),
            InnerScalarValue::Bool(b) => Ok(Some(*b)),
            _ => Err(vortex_err!("Expected a bool scalar, found {}", self)),
        }
    }

    pub(crate) fn as_pvalue(&self) -> VortexResult<Option<PValue>> {
        match &self {
            InnerScalarValue::Null => Ok(None),
            InnerScalarValue::Primitive(p) => Ok(Some(*p)),
            _ => Err(vortex_err!("Expected a primitive scalar, found {}", self)),
        }
    }

    pub(crate) fn as_buffer(&self) -> VortexResult<Option<Arc<[u8]>>> {
        match &self {
            InnerScalarValue::Null => Ok(None),
            InnerScalarValue::Buffer(b) => Ok(Some(b.clone())),
            _ => Err(vortex_err!("Expected a binary scalar, found {}", self)),
        }
    }

    pub(crate) fn as_buffer_string(&self) -> VortexResult<Option<Arc<str>>> {
        match &self {
            InnerScalarValue::Null => Ok(None),
            InnerScalarValue::BufferString(b) => Ok(Some(b.clone())),
            _ => Err(vortex_err!("Expected a string scalar, found {}", self)),
        }
    }
}

#[cfg(test)]
mod test {
    use vortex_dtype::{DType, Nullability, PType};

    use crate::{InnerScalarValue, PValue, ScalarValue};

    #[test]
    pub fn test_is_instance_of_bool() {
        assert!(
            ScalarValue(InnerScalarValue::Bool(true))
                .is_instance_of(&DType::Bool(Nullability::Nullable))
        );
        assert!(
            ScalarValue(InnerScalarValue::Bool(false))
                .is_instance_of(&DType::Bool(Nullability::NonNullable))
        );
        assert!(
            !ScalarValue(InnerScalarValue::Bool(false)).is_instance_of(&DType::Utf8(Nullability::Nullable))
        );
    }

    #[test]
    pub fn test_is_instance_of_primitive() {
        assert!(
            ScalarValue(InnerScalarValue::Primitive(PValue::F64(0.0)))
                .is_instance_of(&DType::Primitive(PType::F64, Nullability::NonNullable))
        );
        assert!(
            !ScalarValue(InnerScalarValue::Primitive(PValue::F64(0.0)))
                .is_instance_of(&DType::Primitive(PType::F32, Nullability::NonNullable))
        );
    }

    #[test]
    pub fn test_null_needs_nullable() {
        let null = ScalarValue(InnerScalarValue::Null);
        assert!(null.is_instance_of(&DType::Null));
        assert!(null.is_instance_of(&DType::Utf8(Nullability::Nullable)));
        assert!(!null.is_instance_of(&DType::Utf8(Nullability::NonNullable)));
    }

    #[test]
    pub fn test_display() {
        assert_eq!(
            ScalarValue(InnerScalarValue::BufferString("a\"b".into())).to_string(),
            "\"a\\\"b\""
        );
        assert_eq!(
            ScalarValue(InnerScalarValue::Buffer(vec![0u8, 255].into())).to_string(),
            "00ff"
        );
        assert_eq!(ScalarValue(InnerScalarValue::Null).to_string(), "null");
    }
}
