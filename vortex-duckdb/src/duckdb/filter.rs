use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::{Display, Formatter};

use crate::duckdb::Value;

/// Expression type ids of the host engine, as carried by comparison filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExpressionType {
    CompareEqual = 25,
    CompareNotEqual = 26,
    CompareLessThan = 27,
    CompareGreaterThan = 28,
    CompareLessThanOrEqualTo = 29,
    CompareGreaterThanOrEqualTo = 30,
    CompareIn = 35,
    CompareNotIn = 36,
    CompareDistinctFrom = 37,
    CompareBetween = 38,
    CompareNotBetween = 39,
    CompareNotDistinctFrom = 40,
    ConjunctionAnd = 50,
    ConjunctionOr = 51,
}

impl ExpressionType {
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl Display for ExpressionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Kind ids of [`TableFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TableFilterType {
    ConstantComparison = 0,
    IsNull = 1,
    IsNotNull = 2,
    ConjunctionOr = 3,
    ConjunctionAnd = 4,
    StructExtract = 5,
    OptionalFilter = 6,
    InFilter = 7,
}

impl TableFilterType {
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl Display for TableFilterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A predicate over a single column that the host offers to push into the scan.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFilter {
    ConstantComparison {
        comparison: ExpressionType,
        constant: Value,
    },
    IsNull,
    IsNotNull,
    ConjunctionOr(Vec<TableFilter>),
    ConjunctionAnd(Vec<TableFilter>),
    StructExtract {
        child_name: String,
        child_idx: usize,
        child_filter: Box<TableFilter>,
    },
    Optional(Box<TableFilter>),
    In(Vec<Value>),
}

impl TableFilter {
    pub fn comparison(comparison: ExpressionType, constant: impl Into<Value>) -> Self {
        Self::ConstantComparison {
            comparison,
            constant: constant.into(),
        }
    }

    pub fn filter_type(&self) -> TableFilterType {
        match self {
            Self::ConstantComparison { .. } => TableFilterType::ConstantComparison,
            Self::IsNull => TableFilterType::IsNull,
            Self::IsNotNull => TableFilterType::IsNotNull,
            Self::ConjunctionOr(_) => TableFilterType::ConjunctionOr,
            Self::ConjunctionAnd(_) => TableFilterType::ConjunctionAnd,
            Self::StructExtract { .. } => TableFilterType::StructExtract,
            Self::Optional(_) => TableFilterType::OptionalFilter,
            Self::In(_) => TableFilterType::InFilter,
        }
    }
}

/// The filters pushed into a scan, keyed by position in the scan's `column_ids`.
///
/// Iteration is in ascending position order, so compiling the set is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFilterSet {
    filters: BTreeMap<usize, TableFilter>,
}

impl TableFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter for the column at `column_position`. A second filter on the same column is
    /// combined with the first into a conjunction.
    pub fn push_filter(&mut self, column_position: usize, filter: TableFilter) {
        match self.filters.entry(column_position) {
            Entry::Vacant(e) => {
                e.insert(filter);
            }
            Entry::Occupied(mut e) => match e.get_mut() {
                TableFilter::ConjunctionAnd(children) => children.push(filter),
                existing => {
                    let prev = std::mem::replace(existing, TableFilter::IsNotNull);
                    *existing = TableFilter::ConjunctionAnd(vec![prev, filter]);
                }
            },
        }
    }

    pub fn get(&self, column_position: usize) -> Option<&TableFilter> {
        self.filters.get(&column_position)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &TableFilter)> {
        self.filters.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<(usize, TableFilter)> for TableFilterSet {
    fn from_iter<T: IntoIterator<Item = (usize, TableFilter)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (position, filter) in iter {
            set.push_filter(position, filter);
        }
        set
    }
}
