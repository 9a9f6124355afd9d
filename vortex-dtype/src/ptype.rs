//! Physical type definitions and behavior.

use std::fmt::{Debug, Display, Formatter};

use vortex_error::{VortexError, VortexResult, vortex_err};

use crate::DType;

/// Physical type enum, represents the in-memory physical layout of a fixed-width value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Hash)]
pub enum PType {
    /// An 8-bit unsigned integer
    U8,
    /// A 16-bit unsigned integer
    U16,
    /// A 32-bit unsigned integer
    U32,
    /// A 64-bit unsigned integer
    U64,
    /// An 8-bit signed integer
    I8,
    /// A 16-bit signed integer
    I16,
    /// A 32-bit signed integer
    I32,
    /// A 64-bit signed integer
    I64,
    /// A 32-bit floating point number
    F32,
    /// A 64-bit floating point number
    F64,
}

/// A trait for native Rust types that correspond 1:1 to a PType
pub trait NativePType: Send + Sync + Clone + Copy + Debug + Display + PartialEq + PartialOrd {
    /// The PType that corresponds to this native type
    const PTYPE: PType;
}

macro_rules! native_ptype {
    ($T:ty, $ptype:tt) => {
        impl NativePType for $T {
            const PTYPE: PType = PType::$ptype;
        }
    };
}

native_ptype!(u8, U8);
native_ptype!(u16, U16);
native_ptype!(u32, U32);
native_ptype!(u64, U64);
native_ptype!(i8, I8);
native_ptype!(i16, I16);
native_ptype!(i32, I32);
native_ptype!(i64, I64);
native_ptype!(f32, F32);
native_ptype!(f64, F64);

impl PType {
    /// Returns `true` iff this PType is an unsigned integer type
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Returns `true` iff this PType is a signed integer type
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns `true` iff this PType is an integer type, signed or unsigned
    pub const fn is_int(self) -> bool {
        self.is_unsigned_int() || self.is_signed_int()
    }

    /// Returns `true` iff this PType is a floating point type
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns the number of bytes in this PType
    pub const fn byte_width(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    /// Returns the number of bits in this PType
    pub const fn bit_width(&self) -> usize {
        self.byte_width() * 8
    }
}

impl Display for PType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
        }
    }
}

impl TryFrom<&DType> for PType {
    type Error = VortexError;

    fn try_from(value: &DType) -> VortexResult<Self> {
        match value {
            DType::Primitive(p, _) => Ok(*p),
            _ => Err(vortex_err!("Cannot convert DType {} into PType", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Nullability;

    #[rstest]
    #[case(PType::U8, 8, false, true)]
    #[case(PType::I16, 16, true, false)]
    #[case(PType::U32, 32, false, true)]
    #[case(PType::I64, 64, true, false)]
    #[case(PType::F32, 32, false, false)]
    #[case(PType::F64, 64, false, false)]
    fn widths_and_signedness(
        #[case] ptype: PType,
        #[case] bits: usize,
        #[case] signed: bool,
        #[case] unsigned: bool,
    ) {
        assert_eq!(ptype.bit_width(), bits);
        assert_eq!(ptype.is_signed_int(), signed);
        assert_eq!(ptype.is_unsigned_int(), unsigned);
        assert_eq!(ptype.is_float(), !signed && !unsigned);
    }

    #[test]
    fn native_ptypes() {
        assert_eq!(<i32 as NativePType>::PTYPE, PType::I32);
        assert_eq!(<u64 as NativePType>::PTYPE, PType::U64);
        assert_eq!(<f64 as NativePType>::PTYPE, PType::F64);
    }

    #[test]
    fn from_dtype() {
        let dtype = DType::Primitive(PType::U16, Nullability::Nullable);
        assert_eq!(PType::try_from(&dtype).unwrap(), PType::U16);
        assert!(PType::try_from(&DType::Utf8(Nullability::NonNullable)).is_err());
    }
}
