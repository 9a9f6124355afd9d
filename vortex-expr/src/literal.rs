use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;

use vortex_error::vortex_panic;
use vortex_scalar::Scalar;

use crate::{ExprRef, VortexExpr};

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    value: Scalar,
}

impl Literal {
    pub fn new_expr(value: impl Into<Scalar>) -> ExprRef {
        Arc::new(Self {
            value: value.into(),
        })
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }

    pub fn maybe_from(expr: &ExprRef) -> Option<&Literal> {
        expr.as_any().downcast_ref::<Literal>()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl VortexExpr for Literal {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children(&self) -> Vec<&ExprRef> {
        vec![]
    }

    fn replacing_children(self: Arc<Self>, children: Vec<ExprRef>) -> ExprRef {
        if !children.is_empty() {
            vortex_panic!("Literal has no children, got {}", children.len());
        }
        self
    }
}

pub(crate) mod proto {
    use vortex_error::{VortexResult, vortex_bail, vortex_err};
    use vortex_proto::expr::kind;
    use vortex_proto::expr::kind::Kind;
    use vortex_scalar::Scalar;

    use crate::{ExprDeserialize, ExprRef, ExprSerializable, Id, Literal};

    pub(crate) struct LiteralSerde;

    impl Id for LiteralSerde {
        fn id(&self) -> &'static str {
            "literal"
        }
    }

    impl ExprDeserialize for LiteralSerde {
        fn deserialize(&self, kind: &Kind, children: Vec<ExprRef>) -> VortexResult<ExprRef> {
            let Kind::Literal(kind::Literal { value }) = kind else {
                vortex_bail!(InvalidSerde: "wrong kind {:?}, want literal", kind)
            };
            if !children.is_empty() {
                vortex_bail!(InvalidSerde: "literal takes no children, got {}", children.len())
            }
            let value = value
                .as_ref()
                .ok_or_else(|| vortex_err!(InvalidSerde: "literal missing value"))?;
            Ok(Literal::new_expr(Scalar::try_from(value)?))
        }
    }

    impl ExprSerializable for Literal {
        fn id(&self) -> &'static str {
            LiteralSerde.id()
        }

        fn serialize_kind(&self) -> VortexResult<Kind> {
            Ok(Kind::Literal(kind::Literal {
                value: Some(self.value().into()),
            }))
        }
    }
}

/// Create a new `Literal` expression from a type that coerces to `Scalar`.
///
///
/// ## Example usage
///
/// ```
/// use vortex_dtype::Nullability;
/// use vortex_expr::{lit, Literal};
/// use vortex_scalar::Scalar;
///
/// let number = lit(34i32);
///
/// let literal = number.as_any()
///     .downcast_ref::<Literal>()
///     .unwrap();
/// assert_eq!(literal.value(), &Scalar::primitive(34i32, Nullability::NonNullable));
/// ```
pub fn lit(value: impl Into<Scalar>) -> ExprRef {
    Literal::new_expr(value.into())
}
