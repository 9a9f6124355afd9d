use prost::Message;
use vortex_error::VortexResult;
use vortex_proto::expr::{Expr, Kind};

use crate::{ExprRef, deserialize_expr};

/// Convert an expression tree into its protobuf form.
///
/// Each node records its registered id, its children in order and its payload.
pub fn serialize_expr(expr: &ExprRef) -> VortexResult<Expr> {
    let children = expr
        .children()
        .into_iter()
        .map(serialize_expr)
        .collect::<VortexResult<Vec<_>>>()?;
    Ok(Expr {
        id: expr.id().to_string(),
        children,
        kind: Some(Kind {
            kind: Some(expr.serialize_kind()?),
        }),
    })
}

/// Serialize an expression tree to bytes.
///
/// The encoding is canonical: structurally equal trees always produce identical bytes, so the
/// output can be used as a cache key.
pub fn serialize(expr: &ExprRef) -> VortexResult<Vec<u8>> {
    Ok(serialize_expr(expr)?.encode_to_vec())
}

/// Parse bytes written by [`serialize`] back into an expression tree.
pub fn deserialize(bytes: &[u8]) -> VortexResult<ExprRef> {
    deserialize_expr(&Expr::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use vortex_dtype::{DType, Nullability};
    use vortex_scalar::Scalar;

    use super::*;
    use crate::{and, col, eq, gt, ident, lit, lt_eq, not_eq, or};

    fn round_trip(expr: ExprRef) {
        let bytes = serialize(&expr).unwrap();
        assert_eq!(&deserialize(&bytes).unwrap(), &expr);
    }

    #[test]
    fn test_round_trip() {
        round_trip(ident());
        round_trip(col("a"));
        round_trip(gt(col("col1"), lit(30)));
        round_trip(eq(col("s"), lit("Germany")));
        round_trip(not_eq(
            col("f"),
            lit(Scalar::null(DType::Binary(Nullability::Nullable))),
        ));
        round_trip(and(
            gt(col("a"), lit(1u64)),
            or(lt_eq(col("b"), lit(2.5f64)), eq(col("c"), lit(true))),
        ));
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            and(
                gt(col("col1"), lit(30)),
                and(eq(col("name"), lit("x")), lt_eq(col("n"), lit(7i8))),
            )
        };
        assert_eq!(serialize(&build()).unwrap(), serialize(&build()).unwrap());
        assert_ne!(
            serialize(&build()).unwrap(),
            serialize(&gt(col("col1"), lit(31))).unwrap()
        );
    }

    #[test]
    fn test_tree_shape() {
        let proto = serialize_expr(&gt(col("col1"), lit(30))).unwrap();
        assert_eq!(proto.id, "binary");
        assert_eq!(proto.children.len(), 2);
        assert_eq!(proto.children[0].id, "get_item");
        assert_eq!(proto.children[0].children[0].id, "identity");
        assert_eq!(proto.children[1].id, "literal");
    }

    #[test]
    fn test_unknown_id() {
        let mut proto = serialize_expr(&col("a")).unwrap();
        proto.id = "nope".to_string();
        assert!(deserialize_expr(&proto).is_err());
    }

    #[test]
    fn test_missing_children() {
        let mut proto = serialize_expr(&gt(col("a"), lit(1))).unwrap();
        proto.children.pop();
        assert!(deserialize_expr(&proto).is_err());
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(deserialize(&[0xff, 0xff, 0xff]).is_err());
    }
}
