use std::fmt::{Display, Formatter};

use vortex_error::{VortexError, VortexResult, vortex_err};
use vortex_proto::expr::kind::BinaryOp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    // comparison
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    // boolean algebra
    And,
    Or,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match &self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::And => "and",
            Operator::Or => "or",
        };
        Display::fmt(display, f)
    }
}

impl Operator {
    pub fn is_comparison(&self) -> bool {
        !matches!(self, Operator::And | Operator::Or)
    }
}

impl From<Operator> for BinaryOp {
    fn from(value: Operator) -> Self {
        match value {
            Operator::Eq => BinaryOp::Eq,
            Operator::NotEq => BinaryOp::NotEq,
            Operator::Gt => BinaryOp::Gt,
            Operator::Gte => BinaryOp::Gte,
            Operator::Lt => BinaryOp::Lt,
            Operator::Lte => BinaryOp::Lte,
            Operator::And => BinaryOp::And,
            Operator::Or => BinaryOp::Or,
        }
    }
}

impl From<BinaryOp> for Operator {
    fn from(value: BinaryOp) -> Self {
        match value {
            BinaryOp::Eq => Operator::Eq,
            BinaryOp::NotEq => Operator::NotEq,
            BinaryOp::Gt => Operator::Gt,
            BinaryOp::Gte => Operator::Gte,
            BinaryOp::Lt => Operator::Lt,
            BinaryOp::Lte => Operator::Lte,
            BinaryOp::And => Operator::And,
            BinaryOp::Or => Operator::Or,
        }
    }
}

impl TryFrom<i32> for Operator {
    type Error = VortexError;

    fn try_from(value: i32) -> VortexResult<Self> {
        BinaryOp::try_from(value)
            .map(Operator::from)
            .map_err(|_| vortex_err!(InvalidSerde: "unknown binary operator {}", value))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Operator::Eq)]
    #[case(Operator::NotEq)]
    #[case(Operator::Gt)]
    #[case(Operator::Gte)]
    #[case(Operator::Lt)]
    #[case(Operator::Lte)]
    #[case(Operator::And)]
    #[case(Operator::Or)]
    fn wire_tag(#[case] op: Operator) {
        let tag: i32 = BinaryOp::from(op).into();
        assert_eq!(Operator::try_from(tag).unwrap(), op);
    }

    #[test]
    fn unknown_tag() {
        assert!(Operator::try_from(99).is_err());
    }
}
