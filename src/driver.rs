//! Capabilities consumed from the underlying positional driver.
//!
//! A driver plugs into [`NamedParameterStatement`](crate::NamedParameterStatement) by
//! implementing three traits: [`Connection`] (a replaceable connection),
//! [`DriverConnection`] (the live connection that prepares statements) and
//! [`StatementHandle`] (a positional prepared statement). The bundled
//! [`mysql`](crate::mysql) module implements them over SQLx.

use crate::value::SqlType;
use chrono::{DateTime, Utc};
use std::fmt::{self, Display};
use std::rc::Rc;

/// Error type reported by driver implementations
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Whether the driver should make auto-generated keys available after an insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeneratedKeys {
    #[default]
    None,
    Return,
}

/// A warning attached to a statement by the driver.
///
/// The presence of any warning makes the statement stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A shared, replaceable database connection.
pub trait Connection {
    type Driver: DriverConnection;

    /// The current live connection.
    fn instance(&self) -> Self::Driver;

    /// Replace the live connection with a new one.
    fn reset(&self) -> Result<(), DriverError>;
}

/// A live connection able to prepare positional statements.
pub trait DriverConnection {
    type Statement: StatementHandle;

    fn prepare_statement(
        &self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> Result<Self::Statement, DriverError>;
}

/// A positional prepared statement. Parameter indices start at 1.
pub trait StatementHandle {
    type Cursor;

    fn execute_query(&mut self) -> Result<Self::Cursor, DriverError>;
    fn execute_update(&mut self) -> Result<u64, DriverError>;
    fn generated_keys(&mut self) -> Result<Self::Cursor, DriverError>;
    fn warnings(&self) -> Result<Option<Warning>, DriverError>;
    fn close(&mut self) -> Result<(), DriverError>;

    fn set_int(&mut self, index: usize, value: i32) -> Result<(), DriverError>;
    fn set_long(&mut self, index: usize, value: i64) -> Result<(), DriverError>;
    fn set_boolean(&mut self, index: usize, value: bool) -> Result<(), DriverError>;
    fn set_double(&mut self, index: usize, value: f64) -> Result<(), DriverError>;
    fn set_timestamp(&mut self, index: usize, value: DateTime<Utc>) -> Result<(), DriverError>;
    fn set_string(&mut self, index: usize, value: &str) -> Result<(), DriverError>;
    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<(), DriverError>;
}

impl<C: Connection + ?Sized> Connection for &C {
    type Driver = C::Driver;

    fn instance(&self) -> Self::Driver {
        (**self).instance()
    }

    fn reset(&self) -> Result<(), DriverError> {
        (**self).reset()
    }
}

impl<C: Connection + ?Sized> Connection for Rc<C> {
    type Driver = C::Driver;

    fn instance(&self) -> Self::Driver {
        (**self).instance()
    }

    fn reset(&self) -> Result<(), DriverError> {
        (**self).reset()
    }
}
