use std::any::Any;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use vortex_error::{VortexExpect, vortex_panic};

use crate::{ExprRef, Operator, VortexExpr};

#[derive(Debug, Clone, Eq, Hash)]
#[allow(clippy::derived_hash_with_manual_eq)]
pub struct BinaryExpr {
    lhs: ExprRef,
    operator: Operator,
    rhs: ExprRef,
}

impl BinaryExpr {
    pub fn new_expr(lhs: ExprRef, operator: Operator, rhs: ExprRef) -> ExprRef {
        Arc::new(Self { lhs, operator, rhs })
    }

    pub fn lhs(&self) -> &ExprRef {
        &self.lhs
    }

    pub fn rhs(&self) -> &ExprRef {
        &self.rhs
    }

    pub fn op(&self) -> Operator {
        self.operator
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.lhs, self.operator, self.rhs)
    }
}

impl VortexExpr for BinaryExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children(&self) -> Vec<&ExprRef> {
        vec![&self.lhs, &self.rhs]
    }

    fn replacing_children(self: Arc<Self>, children: Vec<ExprRef>) -> ExprRef {
        if children.len() != 2 {
            vortex_panic!(
                "BinaryExpr::replacing_children expects 2 children, got {}",
                children.len()
            );
        }
        let mut children = children.into_iter();
        let lhs = children.next().vortex_expect("lhs");
        let rhs = children.next().vortex_expect("rhs");
        BinaryExpr::new_expr(lhs, self.operator, rhs)
    }
}

impl PartialEq for BinaryExpr {
    fn eq(&self, other: &BinaryExpr) -> bool {
        other.operator == self.operator && other.lhs.eq(&self.lhs) && other.rhs.eq(&self.rhs)
    }
}

pub(crate) mod proto {
    use vortex_error::{VortexResult, vortex_bail};
    use vortex_proto::expr::kind::{BinaryOp, Kind};

    use crate::{BinaryExpr, ExprDeserialize, ExprRef, ExprSerializable, Id, Operator};

    pub(crate) struct BinarySerde;

    impl Id for BinarySerde {
        fn id(&self) -> &'static str {
            "binary"
        }
    }

    impl ExprDeserialize for BinarySerde {
        fn deserialize(&self, kind: &Kind, children: Vec<ExprRef>) -> VortexResult<ExprRef> {
            let Kind::BinaryOp(op) = kind else {
                vortex_bail!(InvalidSerde: "wrong kind {:?}, want binary", kind)
            };
            let [lhs, rhs]: [ExprRef; 2] = match children.try_into() {
                Ok(children) => children,
                Err(children) => vortex_bail!(
                    InvalidSerde: "binary expression needs 2 children, got {}",
                    children.len()
                ),
            };
            Ok(BinaryExpr::new_expr(lhs, Operator::try_from(*op)?, rhs))
        }
    }

    impl ExprSerializable for BinaryExpr {
        fn id(&self) -> &'static str {
            BinarySerde.id()
        }

        fn serialize_kind(&self) -> VortexResult<Kind> {
            Ok(Kind::BinaryOp(BinaryOp::from(self.op()).into()))
        }
    }
}

/// Create a new `BinaryExpr` using the `Eq` operator.
///
/// ## Example usage
///
/// ```
/// use vortex_expr::{col, eq, lit};
///
/// assert_eq!(eq(col("a"), lit(3)).to_string(), "([].$a = 3i32)");
/// ```
pub fn eq(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::Eq, rhs)
}

/// Create a new `BinaryExpr` using the `NotEq` operator.
pub fn not_eq(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::NotEq, rhs)
}

/// Create a new `BinaryExpr` using the `Gte` operator.
pub fn gt_eq(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::Gte, rhs)
}

/// Create a new `BinaryExpr` using the `Gt` operator.
///
/// ## Example usage
///
/// ```
/// use vortex_expr::{col, gt, lit};
///
/// assert_eq!(gt(col("col1"), lit(30)).to_string(), "([].$col1 > 30i32)");
/// ```
pub fn gt(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::Gt, rhs)
}

/// Create a new `BinaryExpr` using the `Lte` operator.
pub fn lt_eq(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::Lte, rhs)
}

/// Create a new `BinaryExpr` using the `Lt` operator.
pub fn lt(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::Lt, rhs)
}

/// Create a new `BinaryExpr` using the `Or` operator.
pub fn or(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::Or, rhs)
}

/// Create a new `BinaryExpr` using the `And` operator.
///
/// ## Example usage
///
/// ```
/// use vortex_expr::{and, col, split_conjunction};
///
/// let expr = and(col("a"), col("b"));
/// assert_eq!(split_conjunction(&expr).len(), 2);
/// ```
pub fn and(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    BinaryExpr::new_expr(lhs, Operator::And, rhs)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{BinaryExpr, Operator, VortexExpr, col, gt, lit};

    #[test]
    fn replacing_children() {
        let expr = gt(col("a"), lit(1));
        let replaced = expr
            .as_any()
            .downcast_ref::<BinaryExpr>()
            .map(|b| Arc::new(b.clone()))
            .unwrap()
            .replacing_children(vec![col("b"), lit(2)]);
        assert_eq!(&replaced, &gt(col("b"), lit(2)));
        let binary = replaced.as_any().downcast_ref::<BinaryExpr>().unwrap();
        assert_eq!(binary.op(), Operator::Gt);
        assert_eq!(binary.lhs(), &col("b"));
    }
}
