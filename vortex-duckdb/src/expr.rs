//! Translation of the host's pushed-down table filters into Vortex expressions.

use log::{debug, warn};
use vortex_dtype::Nullability;
use vortex_error::{VortexResult, vortex_bail, vortex_err};
use vortex_expr::{BinaryExpr, ExprRef, Literal, Operator, and, col};

use crate::convert::value_into_scalar;
use crate::duckdb::{ExpressionType, TableFilter, TableFilterSet};

pub fn into_binary_operator(type_: ExpressionType) -> VortexResult<Operator> {
    Ok(match type_ {
        ExpressionType::CompareEqual => Operator::Eq,
        ExpressionType::CompareNotEqual => Operator::NotEq,
        ExpressionType::CompareLessThan => Operator::Lt,
        ExpressionType::CompareGreaterThan => Operator::Gt,
        ExpressionType::CompareLessThanOrEqualTo => Operator::Lte,
        ExpressionType::CompareGreaterThanOrEqualTo => Operator::Gte,
        ExpressionType::ConjunctionAnd => Operator::And,
        ExpressionType::ConjunctionOr => Operator::Or,
        other => vortex_bail!(NotImplemented: "expression type {}", other),
    })
}

/// Compile one table filter over the column `column_name` of the scan row.
///
/// Only constant comparisons and conjunctions of them can be expressed; every other filter
/// fails with [`NotImplemented`](vortex_error::VortexError::NotImplemented), meaning the host
/// has to evaluate it itself.
pub fn table_filter_into_expr(filter: &TableFilter, column_name: &str) -> VortexResult<ExprRef> {
    match filter {
        TableFilter::ConstantComparison {
            comparison,
            constant,
        } => {
            let operator = into_binary_operator(*comparison)?;
            let value = value_into_scalar(constant, Nullability::Nullable)?;
            Ok(BinaryExpr::new_expr(
                col(column_name),
                operator,
                Literal::new_expr(value),
            ))
        }
        TableFilter::ConjunctionAnd(children) => flatten_exprs(
            children
                .iter()
                .map(|child| table_filter_into_expr(child, column_name))
                .collect::<VortexResult<Vec<_>>>()?,
        )
        .ok_or_else(|| vortex_err!("conjunction filter without children")),
        TableFilter::IsNull | TableFilter::IsNotNull => {
            vortex_bail!(NotImplemented: "null checks")
        }
        other => vortex_bail!(NotImplemented: "table filter type {}", other.filter_type()),
    }
}

/// Combine conjuncts into a right-nested chain of `and`, preserving their order.
///
/// No conjuncts means no filter.
pub fn flatten_exprs<I>(exprs: I) -> Option<ExprRef>
where
    I: IntoIterator<Item = ExprRef>,
    I::IntoIter: DoubleEndedIterator,
{
    exprs.into_iter().rev().reduce(|rest, expr| and(expr, rest))
}

/// The outcome of compiling a scan's table filters.
#[derive(Debug, Default)]
pub struct FilterPushdown {
    conjuncts: Vec<ExprRef>,
    rejected: Vec<usize>,
}

impl FilterPushdown {
    /// Conjuncts the storage engine evaluates, in filter position order.
    pub fn conjuncts(&self) -> &[ExprRef] {
        &self.conjuncts
    }

    /// Filter positions that could not be compiled and are left to the host.
    pub fn rejected(&self) -> &[usize] {
        &self.rejected
    }

    pub fn into_parts(self) -> (Vec<ExprRef>, Vec<usize>) {
        (self.conjuncts, self.rejected)
    }
}

/// Compile every filter of `filters`. The filter at position `p` applies to the column named
/// `column_names[column_ids[p]]`.
pub fn create_filter_expression(
    filters: &TableFilterSet,
    column_names: &[String],
    column_ids: &[usize],
) -> VortexResult<FilterPushdown> {
    let mut pushdown = FilterPushdown::default();
    for (position, filter) in filters.iter() {
        let column_id = *column_ids
            .get(position)
            .ok_or_else(|| vortex_err!(OutOfBounds: position, 0, column_ids.len()))?;
        let column_name = column_names
            .get(column_id)
            .ok_or_else(|| vortex_err!(OutOfBounds: column_id, 0, column_names.len()))?;

        match table_filter_into_expr(filter, column_name) {
            Ok(expr) => {
                debug!("pushing down filter on {column_name}: {expr}");
                pushdown.conjuncts.push(expr);
            }
            Err(e) if e.is_not_implemented() => {
                warn!("filter on {column_name} left to the host: {e}");
                pushdown.rejected.push(position);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(pushdown)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use vortex_dtype::DType;
    use vortex_expr::{VortexExprExt, deserialize, eq, gt, lit, lt, serialize, split_conjunction};
    use vortex_scalar::Scalar;

    use super::*;
    use crate::duckdb::{LogicalType, Value};

    fn nullable_lit(value: impl Into<Scalar>) -> ExprRef {
        let scalar: Scalar = value.into();
        lit(scalar.into_nullable())
    }

    #[rstest]
    #[case(ExpressionType::CompareEqual, Operator::Eq)]
    #[case(ExpressionType::CompareNotEqual, Operator::NotEq)]
    #[case(ExpressionType::CompareLessThan, Operator::Lt)]
    #[case(ExpressionType::CompareLessThanOrEqualTo, Operator::Lte)]
    #[case(ExpressionType::CompareGreaterThan, Operator::Gt)]
    #[case(ExpressionType::CompareGreaterThanOrEqualTo, Operator::Gte)]
    #[case(ExpressionType::ConjunctionAnd, Operator::And)]
    #[case(ExpressionType::ConjunctionOr, Operator::Or)]
    fn operator_mapping(#[case] type_: ExpressionType, #[case] expected: Operator) {
        assert_eq!(into_binary_operator(type_).unwrap(), expected);
    }

    #[rstest]
    #[case(ExpressionType::CompareDistinctFrom)]
    #[case(ExpressionType::CompareIn)]
    #[case(ExpressionType::CompareNotDistinctFrom)]
    fn unmapped_operator(#[case] type_: ExpressionType) {
        let err = into_binary_operator(type_).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains(&type_.id().to_string()));
    }

    #[test]
    fn constant_comparison() {
        let expr = table_filter_into_expr(
            &TableFilter::comparison(ExpressionType::CompareGreaterThan, 30),
            "age",
        )
        .unwrap();
        assert_eq!(&expr, &gt(col("age"), nullable_lit(30)));
        assert_eq!(expr.to_string(), "([].$age > 30i32)");
    }

    #[test]
    fn typed_null_constant() {
        let expr = table_filter_into_expr(
            &TableFilter::comparison(
                ExpressionType::CompareEqual,
                Value::Null(LogicalType::Varchar),
            ),
            "s",
        )
        .unwrap();
        assert_eq!(
            &expr,
            &eq(col("s"), lit(Scalar::null(DType::Utf8(Nullability::Nullable))))
        );
    }

    #[test]
    fn conjunction_contains_each_child_once() {
        let filter = TableFilter::ConjunctionAnd(vec![
            TableFilter::comparison(ExpressionType::CompareGreaterThan, 1),
            TableFilter::comparison(ExpressionType::CompareLessThan, 10),
            TableFilter::comparison(ExpressionType::CompareNotEqual, 5),
        ]);
        let expr = table_filter_into_expr(&filter, "x").unwrap();
        assert_eq!(
            &expr,
            &and(
                gt(col("x"), nullable_lit(1)),
                and(
                    lt(col("x"), nullable_lit(10)),
                    vortex_expr::not_eq(col("x"), nullable_lit(5))
                )
            )
        );
        assert_eq!(split_conjunction(&expr).len(), 3);
    }

    #[rstest]
    #[case(TableFilter::IsNull)]
    #[case(TableFilter::IsNotNull)]
    fn null_checks(#[case] filter: TableFilter) {
        let err = table_filter_into_expr(&filter, "x").unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains("null checks"));
    }

    #[rstest]
    #[case(TableFilter::ConjunctionOr(vec![TableFilter::IsNull, TableFilter::IsNotNull]), "3")]
    #[case(TableFilter::In(vec![Value::from(1)]), "7")]
    #[case(TableFilter::Optional(Box::new(TableFilter::IsNull)), "6")]
    fn unsupported_filter_kind(#[case] filter: TableFilter, #[case] kind: &str) {
        let err = table_filter_into_expr(&filter, "x").unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains(&format!("table filter type {kind}")));
    }

    #[test]
    fn unsupported_constant_type() {
        let err = table_filter_into_expr(
            &TableFilter::comparison(ExpressionType::CompareEqual, Value::Date(3)),
            "d",
        )
        .unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains("DATE"));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(5, 4)]
    fn flatten_shape(#[case] n: usize, #[case] ands: usize) {
        let conjuncts = (0..n)
            .map(|i| gt(col(format!("c{i}").as_str()), lit(i as i64)))
            .collect::<Vec<_>>();
        let Some(expr) = flatten_exprs(conjuncts.clone()) else {
            assert_eq!(n, 0);
            return;
        };
        assert_eq!(split_conjunction(&expr), conjuncts);
        assert_eq!(expr.to_string().matches(" and ").count(), ands);
    }

    #[test]
    fn age_and_country() {
        let filters = TableFilterSet::from_iter([
            (
                0,
                TableFilter::comparison(ExpressionType::CompareGreaterThan, 30),
            ),
            (
                1,
                TableFilter::comparison(ExpressionType::CompareEqual, "US"),
            ),
        ]);
        let names = vec!["age".to_string(), "country".to_string()];
        let pushdown = create_filter_expression(&filters, &names, &[0, 1]).unwrap();
        assert!(pushdown.rejected().is_empty());

        let expr = flatten_exprs(pushdown.conjuncts().iter().cloned()).unwrap();
        assert_eq!(
            &expr,
            &and(
                gt(col("age"), nullable_lit(30)),
                eq(col("country"), nullable_lit("US"))
            )
        );
        assert_eq!(&deserialize(&serialize(&expr).unwrap()).unwrap(), &expr);
    }

    #[test]
    fn rejected_filters_are_reported() {
        let filters = TableFilterSet::from_iter([
            (0, TableFilter::IsNull),
            (
                2,
                TableFilter::comparison(ExpressionType::CompareLessThanOrEqualTo, 7i64),
            ),
        ]);
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        // Position 2 of the scan reads column 1.
        let pushdown = create_filter_expression(&filters, &names, &[2, 0, 1]).unwrap();
        assert_eq!(pushdown.rejected(), &[0]);
        assert_eq!(pushdown.conjuncts().len(), 1);
        assert_eq!(
            pushdown.conjuncts()[0]
                .references()
                .iter()
                .map(|f| f.as_ref())
                .collect::<Vec<_>>(),
            vec!["b"]
        );
    }

    #[test]
    fn filter_position_out_of_range() {
        let filters = TableFilterSet::from_iter([(
            4,
            TableFilter::comparison(ExpressionType::CompareEqual, 1),
        )]);
        let err = create_filter_expression(&filters, &["a".to_string()], &[0]).unwrap_err();
        assert!(!err.is_not_implemented());
    }
}
