use std::any::Any;
use std::fmt::Display;
use std::sync::{Arc, LazyLock};

use vortex_error::vortex_panic;

use crate::{ExprRef, VortexExpr};

static IDENTITY: LazyLock<ExprRef> = LazyLock::new(|| Arc::new(Identity));

/// The scope of an expression: the row being scanned.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Identity;

impl Identity {
    pub fn new_expr() -> ExprRef {
        IDENTITY.clone()
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[]")
    }
}

impl VortexExpr for Identity {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children(&self) -> Vec<&ExprRef> {
        vec![]
    }

    fn replacing_children(self: Arc<Self>, children: Vec<ExprRef>) -> ExprRef {
        if !children.is_empty() {
            vortex_panic!("Identity has no children, got {}", children.len());
        }
        self
    }
}

// Return a global pointer to the identity token.
pub fn ident() -> ExprRef {
    Identity::new_expr()
}

pub(crate) mod proto {
    use vortex_error::{VortexResult, vortex_bail};
    use vortex_proto::expr::kind;
    use vortex_proto::expr::kind::Kind;

    use crate::{ExprDeserialize, ExprRef, ExprSerializable, Id, Identity};

    pub(crate) struct IdentitySerde;

    impl Id for IdentitySerde {
        fn id(&self) -> &'static str {
            "identity"
        }
    }

    impl ExprDeserialize for IdentitySerde {
        fn deserialize(&self, kind: &Kind, children: Vec<ExprRef>) -> VortexResult<ExprRef> {
            if !matches!(kind, Kind::Identity(_)) {
                vortex_bail!(InvalidSerde: "wrong kind {:?}, want identity", kind)
            }
            if !children.is_empty() {
                vortex_bail!(InvalidSerde: "identity takes no children, got {}", children.len())
            }
            Ok(Identity::new_expr())
        }
    }

    impl ExprSerializable for Identity {
        fn id(&self) -> &'static str {
            IdentitySerde.id()
        }

        fn serialize_kind(&self) -> VortexResult<Kind> {
            Ok(Kind::Identity(kind::Identity {}))
        }
    }
}
