use std::fmt::{Display, Formatter};

use crate::Scalar;

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.value(), f)
    }
}

#[cfg(test)]
mod test {
    use vortex_dtype::{DType, Nullability};

    use crate::Scalar;

    #[test]
    fn display() {
        assert_eq!(Scalar::from(30i32).to_string(), "30i32");
        assert_eq!(Scalar::from(1.5f64).to_string(), "1.5f64");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from("Germany").to_string(), "\"Germany\"");
        assert_eq!(Scalar::null(DType::Bool(Nullability::Nullable)).to_string(), "null");
    }
}
