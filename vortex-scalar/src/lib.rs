use std::cmp::Ordering;
use std::sync::Arc;

use vortex_dtype::{DType, NativePType, Nullability};
use vortex_error::{VortexResult, vortex_bail};

mod display;
#[cfg(feature = "proto")]
mod proto;
mod pvalue;
mod value;

pub use pvalue::*;
pub use value::*;

/// A single logical item, composed of both a [`ScalarValue`] and a logical [`DType`].
///
/// A scalar always satisfies `value.is_instance_of(dtype)`: a null value only appears with a
/// nullable dtype, and a primitive value carries exactly the [`vortex_dtype::PType`] of its dtype.
///
/// [`PartialOrd`] is defined only between scalars whose dtypes match ignoring nullability, and
/// never orders nulls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar {
    dtype: DType,
    value: ScalarValue,
}

impl Scalar {
    pub fn try_new(dtype: DType, value: ScalarValue) -> VortexResult<Self> {
        if !value.is_instance_of(&dtype) {
            vortex_bail!("value {} is not an instance of {}", value, dtype);
        }
        Ok(Self { dtype, value })
    }

    #[inline]
    pub fn dtype(&self) -> &DType {
        &self.dtype
    }

    #[inline]
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    #[inline]
    pub fn into_parts(self) -> (DType, ScalarValue) {
        (self.dtype, self.value)
    }

    pub fn is_valid(&self) -> bool {
        !self.value.is_null()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// A null of the nullable version of `dtype`.
    pub fn null(dtype: DType) -> Self {
        Self {
            dtype: dtype.as_nullable(),
            value: ScalarValue(InnerScalarValue::Null),
        }
    }

    pub fn bool(value: bool, nullability: Nullability) -> Self {
        Self {
            dtype: DType::Bool(nullability),
            value: ScalarValue(InnerScalarValue::Bool(value)),
        }
    }

    pub fn primitive<T: NativePType + Into<PValue>>(value: T, nullability: Nullability) -> Self {
        Self {
            dtype: DType::Primitive(T::PTYPE, nullability),
            value: ScalarValue(InnerScalarValue::Primitive(value.into())),
        }
    }

    pub fn utf8(value: impl Into<Arc<str>>, nullability: Nullability) -> Self {
        Self {
            dtype: DType::Utf8(nullability),
            value: ScalarValue(InnerScalarValue::BufferString(value.into())),
        }
    }

    pub fn binary(value: impl Into<Arc<[u8]>>, nullability: Nullability) -> Self {
        Self {
            dtype: DType::Binary(nullability),
            value: ScalarValue(InnerScalarValue::Buffer(value.into())),
        }
    }

    pub fn into_nullable(self) -> Self {
        Self {
            dtype: self.dtype.as_nullable(),
            value: self.value,
        }
    }

    pub fn as_bool(&self) -> VortexResult<Option<bool>> {
        self.value.as_bool()
    }

    pub fn as_pvalue(&self) -> VortexResult<Option<PValue>> {
        self.value.as_pvalue()
    }

    pub fn as_utf8(&self) -> VortexResult<Option<Arc<str>>> {
        self.value.as_buffer_string()
    }

    pub fn as_binary(&self) -> VortexResult<Option<Arc<[u8]>>> {
        self.value.as_buffer()
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.dtype.eq_ignore_nullability(&other.dtype) {
            return None;
        }
        self.value.0.partial_cmp_value(&other.value.0)
    }
}

macro_rules! from_native_for_scalar {
    ($T:ty) => {
        impl From<$T> for Scalar {
            fn from(value: $T) -> Self {
                Scalar::primitive(value, Nullability::NonNullable)
            }
        }
    };
}

from_native_for_scalar!(u8);
from_native_for_scalar!(u16);
from_native_for_scalar!(u32);
from_native_for_scalar!(u64);
from_native_for_scalar!(i8);
from_native_for_scalar!(i16);
from_native_for_scalar!(i32);
from_native_for_scalar!(i64);
from_native_for_scalar!(f32);
from_native_for_scalar!(f64);

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::bool(value, Nullability::NonNullable)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::utf8(value, Nullability::NonNullable)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::utf8(value, Nullability::NonNullable)
    }
}
