use core::fmt::Display;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use vortex_dtype::PType;
use vortex_error::{VortexError, vortex_err};

#[derive(Debug, Clone, Copy)]
pub enum PValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl PValue {
    pub fn ptype(&self) -> PType {
        match self {
            Self::U8(_) => PType::U8,
            Self::U16(_) => PType::U16,
            Self::U32(_) => PType::U32,
            Self::U64(_) => PType::U64,
            Self::I8(_) => PType::I8,
            Self::I16(_) => PType::I16,
            Self::I32(_) => PType::I32,
            Self::I64(_) => PType::I64,
            Self::F32(_) => PType::F32,
            Self::F64(_) => PType::F64,
        }
    }

    pub fn is_instance_of(&self, ptype: &PType) -> bool {
        &self.ptype() == ptype
    }

    /// Widen an integer value so that signed and unsigned values of any width compare exactly.
    fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            Self::F32(_) | Self::F64(_) => None,
        }
    }

    fn float_bits(&self) -> Option<u64> {
        match *self {
            Self::F32(v) => Some(u64::from(v.to_bits())),
            Self::F64(v) => Some(v.to_bits()),
            _ => None,
        }
    }
}

impl PartialEq for PValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptype() == other.ptype() && self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Eq for PValue {}

impl PartialOrd for PValue {
    /// Integers compare across widths and signedness, floats only against the same float type
    /// using a total order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::F32(s), Self::F32(o)) => Some(s.total_cmp(o)),
            (Self::F64(s), Self::F64(o)) => Some(s.total_cmp(o)),
            (s, o) => Some(s.as_i128()?.cmp(&o.as_i128()?)),
        }
    }
}

impl Hash for PValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptype().hash(state);
        match self.float_bits() {
            Some(bits) => bits.hash(state),
            None => self.as_i128().hash(state),
        }
    }
}

macro_rules! impl_pvalue {
    ($T:ty, $PT:tt) => {
        impl From<$T> for PValue {
            fn from(value: $T) -> Self {
                PValue::$PT(value)
            }
        }

        impl TryFrom<PValue> for $T {
            type Error = VortexError;

            fn try_from(value: PValue) -> Result<Self, Self::Error> {
                match value {
                    PValue::$PT(v) => Ok(v),
                    _ => Err(vortex_err!(
                        "Cannot read primitive value {} as {}",
                        value,
                        PType::$PT
                    )),
                }
            }
        }
    };
}

impl_pvalue!(u8, U8);
impl_pvalue!(u16, U16);
impl_pvalue!(u32, U32);
impl_pvalue!(u64, U64);
impl_pvalue!(i8, I8);
impl_pvalue!(i16, I16);
impl_pvalue!(i32, I32);
impl_pvalue!(i64, I64);
impl_pvalue!(f32, F32);
impl_pvalue!(f64, F64);

impl Display for PValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{}u8", v),
            Self::U16(v) => write!(f, "{}u16", v),
            Self::U32(v) => write!(f, "{}u32", v),
            Self::U64(v) => write!(f, "{}u64", v),
            Self::I8(v) => write!(f, "{}i8", v),
            Self::I16(v) => write!(f, "{}i16", v),
            Self::I32(v) => write!(f, "{}i32", v),
            Self::I64(v) => write!(f, "{}i64", v),
            Self::F32(v) => write!(f, "{}f32", v),
            Self::F64(v) => write!(f, "{}f64", v),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use vortex_dtype::PType;

    use crate::PValue;

    #[test]
    pub fn test_is_instance_of() {
        assert!(PValue::U8(10).is_instance_of(&PType::U8));
        assert!(!PValue::U8(10).is_instance_of(&PType::U16));
        assert!(!PValue::U8(10).is_instance_of(&PType::I8));
        assert!(PValue::F32(10.0).is_instance_of(&PType::F32));
        assert!(!PValue::F32(10.0).is_instance_of(&PType::F64));
    }

    #[test]
    fn test_compare_different_types() {
        assert_eq!(
            PValue::I8(4).partial_cmp(&PValue::I8(5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            PValue::I8(4).partial_cmp(&PValue::I64(5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            PValue::U64(u64::MAX).partial_cmp(&PValue::I64(-1)),
            Some(Ordering::Greater)
        );
        assert_eq!(PValue::F32(1.0).partial_cmp(&PValue::F64(1.0)), None);
        assert_eq!(PValue::F32(1.0).partial_cmp(&PValue::I32(1)), None);
    }

    #[test]
    fn test_eq_requires_same_type() {
        assert_eq!(PValue::I32(7), PValue::I32(7));
        assert_ne!(PValue::I32(7), PValue::I64(7));
        assert_eq!(PValue::F64(f64::NAN), PValue::F64(f64::NAN));
    }

    #[test]
    fn test_try_from() {
        assert_eq!(i32::try_from(PValue::I32(-3)).unwrap(), -3);
        assert!(i32::try_from(PValue::I64(-3)).is_err());
    }
}
