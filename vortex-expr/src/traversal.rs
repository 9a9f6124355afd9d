use std::collections::BTreeSet;

use vortex_dtype::FieldName;

use crate::{ExprRef, GetItem, Identity};

/// Visit every node of an expression tree in pre-order.
pub fn visit_pre_order<'a>(expr: &'a ExprRef, visit: &mut impl FnMut(&'a ExprRef)) {
    visit(expr);
    for child in expr.children() {
        visit_pre_order(child, visit);
    }
}

pub trait VortexExprExt {
    /// The columns of the scope row referenced by this expression, i.e. every `$field` read
    /// directly off [`Identity`].
    fn references(&self) -> BTreeSet<FieldName>;
}

impl VortexExprExt for ExprRef {
    fn references(&self) -> BTreeSet<FieldName> {
        let mut fields = BTreeSet::new();
        visit_pre_order(self, &mut |node| {
            if let Some(get_item) = node
                .as_any()
                .downcast_ref::<GetItem>()
                .filter(|g| g.child().as_any().is::<Identity>())
            {
                fields.insert(get_item.field().clone());
            }
        });
        fields
    }
}
