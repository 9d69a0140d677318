use crate::driver::{Connection, DriverConnection, DriverError, GeneratedKeys, StatementHandle};
use crate::error::{Error, Result};
use crate::parser::{parse, ParameterMap, ParsedQuery};
use crate::value::Value;
use chrono::{DateTime, Utc};

/// Statement handle type produced by a connection.
pub type Handle<C> = <<C as Connection>::Driver as DriverConnection>::Statement;

/// Cursor type returned by a connection's statements.
pub type Cursor<C> = <Handle<C> as StatementHandle>::Cursor;

enum State<S> {
    /// Never prepared.
    Absent,
    Prepared(S),
    /// Execution failed; the handle must be replaced on a fresh connection.
    Stale(S),
    /// The last reset failed and left no handle.
    Failed,
}

/// A prepared statement addressed by named placeholders.
///
/// `NamedParameterStatement` rewrites `:name` placeholders to the driver's positional `?`
/// once, at construction, and keeps the mapping from each name to every position it
/// occupies. Values are then bound by name; a name that the query does not use is ignored.
///
/// The underlying driver statement is created by [`prepare`](Self::prepare). When an
/// execution fails, or the driver attaches a warning to the statement, the next `prepare`
/// resets the connection and prepares the statement again. Execution never prepares
/// implicitly.
///
/// A statement is meant for one thread at a time and assumes it is the only user of the
/// connection while it resets it.
///
/// # Examples
///
/// ```rust,no_run
/// use sqlx_named_statement::mysql::MySqlConnection;
/// use sqlx_named_statement::NamedParameterStatement;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let connection = MySqlConnection::connect("mysql://localhost/test")?;
///
/// let mut statement = NamedParameterStatement::new(
///     &connection,
///     "UPDATE users SET name = :name WHERE id = :id OR parent_id = :id",
/// );
///
/// statement.prepare()?;
/// statement.set_string("name", Some("Jane Doe"))?;
/// statement.set_int("id", Some(42))?;
/// let updated = statement.execute_update()?;
/// println!("Updated {} rows", updated);
/// # Ok(())
/// # }
/// ```
pub struct NamedParameterStatement<C: Connection> {
    connection: C,
    query: ParsedQuery,
    keys: GeneratedKeys,
    state: State<Handle<C>>,
}

impl<C: Connection> NamedParameterStatement<C> {
    /// Creates a new statement for `query` on `connection`. Nothing is sent to the driver
    /// until [`prepare`](Self::prepare) is called.
    pub fn new<T>(connection: C, query: T) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            connection,
            query: parse(query.as_ref()),
            keys: GeneratedKeys::None,
            state: State::Absent,
        }
    }

    /// The rewritten, positional SQL.
    pub fn sql(&self) -> &str {
        self.query.sql()
    }

    pub fn params(&self) -> &ParameterMap {
        self.query.params()
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self.state, State::Prepared(..))
    }

    /// Whether the statement must be prepared again, on a new connection, before use.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Stale(..) | State::Failed)
    }

    /// Closes the current handle, optionally resets the connection, and prepares a new
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reconnect`] if the connection cannot be reset and
    /// [`Error::Prepare`] if the driver rejects the statement. Either way the statement is
    /// left without a handle and [`is_failed`](Self::is_failed) reports `true`.
    pub fn reset(&mut self, reset_connection: bool) -> Result<()> {
        if let State::Prepared(mut handle) | State::Stale(mut handle) =
            std::mem::replace(&mut self.state, State::Failed)
        {
            handle.close().map_err(Error::Driver)?;
        }
        if reset_connection {
            log::debug!("resetting connection");
            self.connection.reset().map_err(Error::Reconnect)?;
        }
        log::trace!("preparing `{}`", self.query.sql());
        let handle = self
            .connection
            .instance()
            .prepare_statement(self.query.sql(), self.keys)
            .map_err(Error::Prepare)?;
        self.state = State::Prepared(handle);
        Ok(())
    }

    /// Makes sure the statement has a usable handle, without requesting generated keys.
    pub fn prepare(&mut self) -> Result<()> {
        self.prepare_with(GeneratedKeys::None)
    }

    /// Makes sure the statement has a usable handle.
    ///
    /// A statement that was never prepared is prepared on the current connection. A
    /// statement whose execution failed, or that carries a driver warning, is prepared
    /// again after resetting the connection. A healthy statement is left untouched.
    ///
    /// If the first attempt fails, one more attempt is made on a reset connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Recovery`] with both errors when the second attempt fails too.
    pub fn prepare_with(&mut self, keys: GeneratedKeys) -> Result<()> {
        self.keys = keys;
        let reset_connection = match &self.state {
            State::Absent => Ok(false),
            State::Prepared(handle) => match handle.warnings() {
                Ok(None) => return Ok(()),
                Ok(Some(warning)) => {
                    log::debug!("statement has warning `{}`", warning);
                    Ok(true)
                }
                Err(error) => Err(Error::Driver(error)),
            },
            State::Stale(..) | State::Failed => Ok(true),
        };
        let initial = match reset_connection.and_then(|reset| self.reset(reset)) {
            Ok(()) => return Ok(()),
            Err(error) => error,
        };
        log::debug!("prepare failed: {}, retrying on a new connection", initial);
        self.reset(true).map_err(|source| {
            log::warn!("statement recovery failed: {}", source);
            Error::Recovery {
                initial: Box::new(initial),
                source: Box::new(source),
            }
        })
    }

    /// Executes the statement and returns the driver's cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotPrepared`] without a usable handle. A driver error is returned
    /// as [`Error::Execution`] and marks the statement stale.
    pub fn execute_query(&mut self) -> Result<Cursor<C>> {
        let result = self.handle_mut()?.execute_query();
        self.track(result)
    }

    /// Executes the statement and returns the number of affected rows.
    ///
    /// Errors as in [`execute_query`](Self::execute_query).
    pub fn execute_update(&mut self) -> Result<u64> {
        let result = self.handle_mut()?.execute_update();
        self.track(result)
    }

    /// Keys generated by the last update, when prepared with [`GeneratedKeys::Return`].
    pub fn generated_keys(&mut self) -> Result<Cursor<C>> {
        self.handle_mut()?.generated_keys().map_err(Error::Driver)
    }

    /// Closes the underlying handle.
    pub fn close(self) -> Result<()> {
        match self.state {
            State::Prepared(mut handle) | State::Stale(mut handle) => {
                handle.close().map_err(Error::Driver)
            }
            State::Absent | State::Failed => Ok(()),
        }
    }

    /// Binds `value` at every position of `name`. Does nothing if the query does not use
    /// `name`.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        let Some(indices) = self.query.indices(name) else {
            log::trace!("ignoring unknown parameter `{}`", name);
            return Ok(());
        };
        let State::Prepared(handle) = &mut self.state else {
            return Err(Error::NotPrepared);
        };
        for &index in indices {
            bind(handle, index, &value).map_err(Error::Driver)?;
        }
        Ok(())
    }

    pub fn set_int(&mut self, name: &str, value: Option<i32>) -> Result<()> {
        self.set_value(name, value.into())
    }

    pub fn set_long(&mut self, name: &str, value: Option<i64>) -> Result<()> {
        self.set_value(name, value.into())
    }

    pub fn set_boolean(&mut self, name: &str, value: Option<bool>) -> Result<()> {
        self.set_value(name, value.into())
    }

    pub fn set_double(&mut self, name: &str, value: Option<f64>) -> Result<()> {
        self.set_value(name, value.into())
    }

    pub fn set_timestamp(&mut self, name: &str, value: Option<DateTime<Utc>>) -> Result<()> {
        self.set_value(name, value.into())
    }

    pub fn set_string(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        self.set_value(name, value.map(str::to_owned).into())
    }

    fn handle_mut(&mut self) -> Result<&mut Handle<C>> {
        match &mut self.state {
            State::Prepared(handle) => Ok(handle),
            _ => Err(Error::NotPrepared),
        }
    }

    fn track<T>(&mut self, result: std::result::Result<T, DriverError>) -> Result<T> {
        result.map_err(|error| {
            log::debug!("execution failed, statement is stale: {}", error);
            if let State::Prepared(handle) = std::mem::replace(&mut self.state, State::Failed) {
                self.state = State::Stale(handle);
            }
            Error::Execution(error)
        })
    }
}

fn bind<S: StatementHandle>(
    handle: &mut S,
    index: usize,
    value: &Value,
) -> std::result::Result<(), DriverError> {
    match value {
        Value::Int(Some(v)) => handle.set_int(index, *v),
        Value::Long(Some(v)) => handle.set_long(index, *v),
        Value::Boolean(Some(v)) => handle.set_boolean(index, *v),
        Value::Double(Some(v)) => handle.set_double(index, *v),
        Value::Timestamp(Some(v)) => handle.set_timestamp(index, *v),
        Value::String(Some(v)) => handle.set_string(index, v),
        null => handle.set_null(index, null.sql_type()),
    }
}
