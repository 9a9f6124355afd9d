use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// A column type as the host engine describes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Invalid,
    SqlNull,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    Float,
    Double,
    Char,
    Varchar,
    Blob,
    Date,
    Timestamp,
    List(Box<LogicalType>),
    Struct(Vec<(String, LogicalType)>),
}

impl LogicalType {
    pub fn list(child: LogicalType) -> Self {
        Self::List(Box::new(child))
    }

    pub fn struct_type<N: Into<String>>(fields: impl IntoIterator<Item = (N, LogicalType)>) -> Self {
        Self::Struct(fields.into_iter().map(|(n, t)| (n.into(), t)).collect())
    }

    /// The name of the type id, without any child types.
    pub fn id_name(&self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            Self::SqlNull => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::UTinyInt => "UTINYINT",
            Self::USmallInt => "USMALLINT",
            Self::UInteger => "UINTEGER",
            Self::UBigInt => "UBIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::Timestamp => "TIMESTAMP",
            Self::List(_) => "LIST",
            Self::Struct(_) => "STRUCT",
        }
    }
}

impl Display for LogicalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(child) => write!(f, "{child}[]"),
            Self::Struct(fields) => write!(
                f,
                "STRUCT({})",
                fields
                    .iter()
                    .format_with(", ", |(n, t), f| f(&format_args!("{n} {t}")))
            ),
            other => write!(f, "{}", other.id_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(LogicalType::Integer.to_string(), "INTEGER");
        assert_eq!(LogicalType::SqlNull.to_string(), "NULL");
        assert_eq!(LogicalType::list(LogicalType::Varchar).to_string(), "VARCHAR[]");
        assert_eq!(
            LogicalType::struct_type([
                ("a", LogicalType::BigInt),
                ("b", LogicalType::list(LogicalType::Double)),
            ])
            .to_string(),
            "STRUCT(a BIGINT, b DOUBLE[])"
        );
    }
}
