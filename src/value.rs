use chrono::{DateTime, Utc};
use std::fmt::{self, Display};

/// SQL type tag used when binding a typed NULL.
///
/// Some drivers need the declared type of a NULL parameter to choose its storage, so every
/// typed setter binds its own tag rather than an untyped NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Integer,
    BigInt,
    Boolean,
    Double,
    Timestamp,
    Varchar,
}

impl Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Double => "DOUBLE",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Varchar => "VARCHAR",
        })
    }
}

/// A scalar parameter value. `None` is SQL NULL of the variant's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Option<i32>),
    Long(Option<i64>),
    Boolean(Option<bool>),
    Double(Option<f64>),
    Timestamp(Option<DateTime<Utc>>),
    String(Option<String>),
}

impl Value {
    /// The NULL value carrying the given type tag.
    pub fn null(sql_type: SqlType) -> Self {
        match sql_type {
            SqlType::Integer => Value::Int(None),
            SqlType::BigInt => Value::Long(None),
            SqlType::Boolean => Value::Boolean(None),
            SqlType::Double => Value::Double(None),
            SqlType::Timestamp => Value::Timestamp(None),
            SqlType::Varchar => Value::String(None),
        }
    }

    pub fn sql_type(&self) -> SqlType {
        match self {
            Value::Int(..) => SqlType::Integer,
            Value::Long(..) => SqlType::BigInt,
            Value::Boolean(..) => SqlType::Boolean,
            Value::Double(..) => SqlType::Double,
            Value::Timestamp(..) => SqlType::Timestamp,
            Value::String(..) => SqlType::Varchar,
        }
    }
}

macro_rules! impl_from_value {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(Some(value))
            }
        }
        impl From<Option<$ty>> for Value {
            fn from(value: Option<$ty>) -> Self {
                Value::$variant(value)
            }
        }
    };
}

impl_from_value!(Int, i32);
impl_from_value!(Long, i64);
impl_from_value!(Boolean, bool);
impl_from_value!(Double, f64);
impl_from_value!(Timestamp, DateTime<Utc>);
impl_from_value!(String, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_keeps_type() {
        for sql_type in [
            SqlType::Integer,
            SqlType::BigInt,
            SqlType::Boolean,
            SqlType::Double,
            SqlType::Timestamp,
            SqlType::Varchar,
        ] {
            assert_eq!(Value::null(sql_type).sql_type(), sql_type);
        }
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(7), Value::Int(Some(7)));
        assert_eq!(Value::from(7_i64), Value::Long(Some(7)));
        assert_eq!(Value::from(None::<bool>), Value::Boolean(None));
        assert_eq!(
            Value::from(Some("abc".to_owned())),
            Value::String(Some("abc".into()))
        );
        assert_eq!(Value::from(None::<f64>), Value::null(SqlType::Double));
    }

    #[test]
    fn test_sql_type_display() {
        assert_eq!(SqlType::BigInt.to_string(), "BIGINT");
        assert_eq!(SqlType::Varchar.to_string(), "VARCHAR");
    }
}
