use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::sync::Arc;

use vortex_dtype::FieldName;
use vortex_error::{VortexExpect, vortex_panic};

use crate::{ExprRef, VortexExpr, ident};

#[derive(Debug, Clone, Eq, Hash)]
#[allow(clippy::derived_hash_with_manual_eq)]
pub struct GetItem {
    field: FieldName,
    child: ExprRef,
}

impl GetItem {
    pub fn new_expr(field: impl Into<FieldName>, child: ExprRef) -> ExprRef {
        Arc::new(Self {
            field: field.into(),
            child,
        })
    }

    pub fn field(&self) -> &FieldName {
        &self.field
    }

    pub fn child(&self) -> &ExprRef {
        &self.child
    }

    pub fn is(expr: &ExprRef) -> bool {
        expr.as_any().is::<Self>()
    }
}

/// A column of the scanned row, `get_item(field, ident())`.
pub fn col(field: impl Into<FieldName>) -> ExprRef {
    GetItem::new_expr(field, ident())
}

pub fn get_item(field: impl Into<FieldName>, child: ExprRef) -> ExprRef {
    GetItem::new_expr(field, child)
}

impl Display for GetItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.${}", self.child, &self.field)
    }
}

impl VortexExpr for GetItem {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children(&self) -> Vec<&ExprRef> {
        vec![self.child()]
    }

    fn replacing_children(self: Arc<Self>, children: Vec<ExprRef>) -> ExprRef {
        if children.len() != 1 {
            vortex_panic!(
                "GetItem::replacing_children expects 1 child, got {}",
                children.len()
            );
        }
        Self::new_expr(
            self.field().clone(),
            children.into_iter().next().vortex_expect("child"),
        )
    }
}

impl PartialEq for GetItem {
    fn eq(&self, other: &GetItem) -> bool {
        self.field == other.field && self.child.eq(&other.child)
    }
}

pub(crate) mod proto {
    use vortex_error::{VortexResult, vortex_bail};
    use vortex_proto::expr::kind;
    use vortex_proto::expr::kind::Kind;

    use crate::{ExprDeserialize, ExprRef, ExprSerializable, GetItem, Id};

    pub(crate) struct GetItemSerde;

    impl Id for GetItemSerde {
        fn id(&self) -> &'static str {
            "get_item"
        }
    }

    impl ExprDeserialize for GetItemSerde {
        fn deserialize(&self, kind: &Kind, children: Vec<ExprRef>) -> VortexResult<ExprRef> {
            let Kind::GetItem(kind::GetItem { path }) = kind else {
                vortex_bail!(InvalidSerde: "wrong kind {:?}, want get_item", kind)
            };
            let Ok([child]): Result<[ExprRef; 1], _> = children.try_into() else {
                vortex_bail!(InvalidSerde: "get_item needs exactly one child")
            };
            Ok(GetItem::new_expr(path.as_str(), child))
        }
    }

    impl ExprSerializable for GetItem {
        fn id(&self) -> &'static str {
            GetItemSerde.id()
        }

        fn serialize_kind(&self) -> VortexResult<Kind> {
            Ok(Kind::GetItem(kind::GetItem {
                path: self.field().to_string(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{GetItem, col, get_item, ident, lit};

    #[test]
    pub fn get_item_by_name() {
        let expr = get_item("a", ident());
        assert!(GetItem::is(&expr));
        assert!(!GetItem::is(&lit(1)));
        assert_eq!(&expr, &col("a"));
        let item = expr.as_any().downcast_ref::<GetItem>().unwrap();
        assert_eq!(item.field().as_ref(), "a");
        assert_eq!(item.child(), &ident());
    }
}
