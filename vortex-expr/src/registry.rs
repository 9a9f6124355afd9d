use std::collections::HashMap;
use std::sync::LazyLock;

use vortex_error::{VortexResult, vortex_err};
use vortex_proto::expr::Expr;

use crate::binary::proto::BinarySerde;
use crate::get_item::proto::GetItemSerde;
use crate::identity::proto::IdentitySerde;
use crate::literal::proto::LiteralSerde;
use crate::{ExprDeserialize, ExprRef};

const EXPRESSIONS: &[&'static dyn ExprDeserialize] =
    &[&BinarySerde, &LiteralSerde, &GetItemSerde, &IdentitySerde];

static EXPRESSIONS_REGISTRY: LazyLock<HashMap<&'static str, &&'static dyn ExprDeserialize>> =
    LazyLock::new(move || EXPRESSIONS.iter().map(|e| (e.id(), e)).collect());

/// Rebuild an expression tree from its protobuf form.
pub fn deserialize_expr(expr: &Expr) -> VortexResult<ExprRef> {
    let expr_id = expr.id.as_str();
    let deserializer = EXPRESSIONS_REGISTRY
        .get(expr_id)
        .ok_or_else(|| vortex_err!(InvalidSerde: "unknown expression id: {}", expr_id))?;
    let children = expr
        .children
        .iter()
        .map(deserialize_expr)
        .collect::<VortexResult<Vec<_>>>()?;
    deserializer.deserialize(
        expr.kind
            .as_ref()
            .ok_or_else(|| vortex_err!(InvalidSerde: "empty kind"))?
            .kind
            .as_ref()
            .ok_or_else(|| vortex_err!(InvalidSerde: "empty kind inner"))?,
        children,
    )
}
