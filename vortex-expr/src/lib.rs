use std::any::Any;
use std::fmt::{Debug, Display};
use std::sync::Arc;

use dyn_hash::DynHash;

mod binary;
mod get_item;
mod identity;
mod literal;
mod operators;
mod registry;
mod serde;
mod traversal;

pub use binary::*;
pub use get_item::*;
pub use identity::*;
pub use literal::*;
pub use operators::*;
pub use registry::deserialize_expr;
pub use serde::*;
pub use traversal::*;
use vortex_error::VortexResult;
use vortex_proto::expr::kind::Kind;

pub type ExprRef = Arc<dyn VortexExpr>;

/// A node of a filter or projection expression over the rows of a scan.
///
/// Every node can be serialized, so any tree built from these nodes can cross into the storage
/// engine as bytes.
pub trait VortexExpr: Debug + Send + Sync + DynEq + DynHash + Display + ExprSerializable {
    /// Convert expression reference to reference of [`Any`] type
    fn as_any(&self) -> &dyn Any;

    fn children(&self) -> Vec<&ExprRef>;

    fn replacing_children(self: Arc<Self>, children: Vec<ExprRef>) -> ExprRef;
}

/// Names a serializable expression kind. The id is written into every serialized node and used
/// to find the matching [`ExprDeserialize`] when reading it back.
pub trait Id {
    fn id(&self) -> &'static str;
}

/// Produces the node-specific payload of an expression; children are serialized separately.
pub trait ExprSerializable {
    fn id(&self) -> &'static str;

    fn serialize_kind(&self) -> VortexResult<Kind>;
}

/// Rebuilds an expression node from its payload and its already deserialized children.
pub trait ExprDeserialize: Id + Sync {
    fn deserialize(&self, kind: &Kind, children: Vec<ExprRef>) -> VortexResult<ExprRef>;
}

/// Splits top level and operations into separate expressions
pub fn split_conjunction(expr: &ExprRef) -> Vec<ExprRef> {
    let mut conjunctions = vec![];
    split_inner(expr, &mut conjunctions);
    conjunctions
}

fn split_inner(expr: &ExprRef, exprs: &mut Vec<ExprRef>) {
    match expr.as_any().downcast_ref::<BinaryExpr>() {
        Some(bexp) if bexp.op() == Operator::And => {
            split_inner(bexp.lhs(), exprs);
            split_inner(bexp.rhs(), exprs);
        }
        Some(_) | None => {
            exprs.push(expr.clone());
        }
    }
}

// Adapted from apache/datafusion https://github.com/apache/datafusion/blob/f31ca5b927c040ce03f6a3c8c8dc3d7f4ef5be34/datafusion/physical-expr-common/src/physical_expr.rs#L156
/// [`VortexExpr`] can't be constrained by [`Eq`] directly because it must remain object
/// safe. To ease implementation blanket implementation is provided for [`Eq`] types.
pub trait DynEq {
    fn dyn_eq(&self, other: &dyn Any) -> bool;
}

impl<T: Eq + Any> DynEq for T {
    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Self>() == Some(self)
    }
}

impl PartialEq for dyn VortexExpr {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other.as_any())
    }
}

impl Eq for dyn VortexExpr {}

dyn_hash::hash_trait_object!(VortexExpr);

#[cfg(test)]
mod tests {
    use vortex_dtype::{DType, Nullability};
    use vortex_scalar::Scalar;

    use super::*;

    #[test]
    fn basic_expr_split_test() {
        let lhs = get_item("col1", ident());
        let rhs = lit(1);
        let expr = eq(lhs, rhs);
        let conjunction = split_conjunction(&expr);
        assert_eq!(conjunction.len(), 1);
    }

    #[test]
    fn basic_conjunction_split_test() {
        let lhs = get_item("col1", ident());
        let rhs = lit(1);
        let expr = and(lhs, rhs);
        let conjunction = split_conjunction(&expr);
        assert_eq!(conjunction.len(), 2, "Conjunction is {conjunction:?}");
    }

    #[test]
    fn nested_conjunction_split_test() {
        let a = gt(col("a"), lit(1));
        let b = lt(col("b"), lit(2));
        let c = eq(col("c"), lit(3));
        let expr = and(a.clone(), and(b.clone(), c.clone()));
        assert_eq!(split_conjunction(&expr), vec![a, b, c]);
    }

    #[test]
    fn expr_display() {
        assert_eq!(col("a").to_string(), "[].$a");
        assert_eq!(Identity.to_string(), "[]");

        let col1: Arc<dyn VortexExpr> = col("col1");
        let col2: Arc<dyn VortexExpr> = col("col2");
        assert_eq!(
            and(col1.clone(), col2.clone()).to_string(),
            "([].$col1 and [].$col2)"
        );
        assert_eq!(
            or(col1.clone(), col2.clone()).to_string(),
            "([].$col1 or [].$col2)"
        );
        assert_eq!(
            eq(col1.clone(), col2.clone()).to_string(),
            "([].$col1 = [].$col2)"
        );
        assert_eq!(
            not_eq(col1.clone(), col2.clone()).to_string(),
            "([].$col1 != [].$col2)"
        );
        assert_eq!(
            gt(col1.clone(), col2.clone()).to_string(),
            "([].$col1 > [].$col2)"
        );
        assert_eq!(
            gt_eq(col1.clone(), col2.clone()).to_string(),
            "([].$col1 >= [].$col2)"
        );
        assert_eq!(
            lt(col1.clone(), col2.clone()).to_string(),
            "([].$col1 < [].$col2)"
        );
        assert_eq!(
            lt_eq(col1.clone(), col2.clone()).to_string(),
            "([].$col1 <= [].$col2)"
        );

        assert_eq!(
            or(
                lt(col1.clone(), col2.clone()),
                not_eq(col1.clone(), col2.clone()),
            )
            .to_string(),
            "(([].$col1 < [].$col2) or ([].$col1 != [].$col2))"
        );

        assert_eq!(lit(Scalar::from(0_u8)).to_string(), "0u8");
        assert_eq!(
            lit(Scalar::from(i64::MAX)).to_string(),
            "9223372036854775807i64"
        );
        assert_eq!(lit(Scalar::from(true)).to_string(), "true");
        assert_eq!(
            lit(Scalar::null(DType::Bool(Nullability::Nullable))).to_string(),
            "null"
        );
    }

    #[test]
    fn structural_equality() {
        assert_eq!(&gt(col("a"), lit(30)), &gt(col("a"), lit(30)));
        assert_ne!(&gt(col("a"), lit(30)), &gt(col("a"), lit(31)));
        assert_ne!(&gt(col("a"), lit(30)), &gt_eq(col("a"), lit(30)));
        assert_ne!(&col("a"), &col("b"));
    }
}
