//! # sqlx-named-statement
//!
//! Named-parameter prepared statements on top of positional drivers, with automatic
//! recovery of statements that went stale.
//!
//! ## Features
//!
//! - **Named Placeholders**: Use `:param_name` instead of `?` in your SQL queries
//! - **Repeated Names**: A name used several times is bound once and fills every position
//! - **Quote Aware**: Text inside `'...'` and `"..."` is never rewritten
//! - **Typed NULLs**: `None` binds the NULL of the setter's SQL type
//! - **Stale Statement Recovery**: After a failed execution or a driver warning, the next
//!   `prepare` resets the connection and prepares the statement again
//! - **Driver Agnostic**: Any driver implementing the [`driver`] traits works; a blocking
//!   MySQL driver built on SQLx is included
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sqlx-named-statement = "0.1"
//! ```
//!
//! ## Examples
//!
//! ### Insert and Query
//!
//! ```rust,no_run
//! use sqlx::Row;
//! use sqlx_named_statement::mysql::MySqlConnection;
//! use sqlx_named_statement::NamedParameterStatement;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = MySqlConnection::connect("mysql://localhost/test")?;
//!
//! let mut insert = NamedParameterStatement::new(
//!     &connection,
//!     "INSERT INTO users (id, name) VALUES (:id, :name)",
//! );
//! insert.prepare()?;
//! insert.set_int("id", Some(42))?;
//! insert.set_string("name", Some("John Doe"))?;
//! insert.execute_update()?;
//!
//! let mut select = NamedParameterStatement::new(
//!     &connection,
//!     "SELECT name FROM users WHERE id = :id AND name <> 'n/a: unknown'",
//! );
//! select.prepare()?;
//! select.set_int("id", Some(42))?;
//! for row in select.execute_query()? {
//!     let name: String = row.try_get("name")?;
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Recovering from Failures
//!
//! ```rust,no_run
//! use sqlx_named_statement::mysql::MySqlConnection;
//! use sqlx_named_statement::NamedParameterStatement;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = MySqlConnection::from_env()?;
//! let mut statement =
//!     NamedParameterStatement::new(&connection, "DELETE FROM sessions WHERE user_id = :user");
//!
//! for user in [1, 2, 3] {
//!     // Re-prepares on a new connection if the previous iteration failed.
//!     statement.prepare()?;
//!     statement.set_long("user", Some(user))?;
//!     if let Err(error) = statement.execute_update() {
//!         eprintln!("user {}: {}", user, error);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Rewriting Only
//!
//! ```rust
//! use sqlx_named_statement::parser::parse;
//!
//! let parsed = parse("SELECT * FROM t WHERE a = :x OR b = :x");
//! assert_eq!(parsed.sql(), "SELECT * FROM t WHERE a = ? OR b = ?");
//! assert_eq!(parsed.indices("x"), Some(&[1, 2][..]));
//! ```
//!
//! ## How It Works
//!
//! 1. **Parse**: The query is scanned once. Named placeholders outside quotes become `?`
//!    and every name is mapped to the positions it occupies
//! 2. **Prepare**: The positional SQL is prepared by the driver. A statement that failed
//!    or carries a warning is prepared again on a reset connection
//! 3. **Bind**: Setters look up the name and bind the value at each of its positions;
//!    names the query does not use are ignored
//!
//! ## Limitations
//!
//! - A `:` followed by an identifier character is always a placeholder outside quotes, so
//!   casts such as `a::int` must be written as `CAST(a AS ...)`
//! - Statements are not thread safe and a reset replaces the connection for every
//!   statement sharing it
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at your option.

pub mod driver;
pub mod error;
pub mod mysql;
pub mod parser;
pub mod statement;
pub mod value;

pub use driver::{Connection, DriverConnection, GeneratedKeys, StatementHandle, Warning};
pub use error::{Error, Result};
pub use parser::{parse, ParameterMap, ParsedQuery};
pub use statement::NamedParameterStatement;
pub use value::{SqlType, Value};

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::driver::{Connection, GeneratedKeys};
    pub use crate::error::{Error, Result};
    pub use crate::mysql::MySqlConnection;
    pub use crate::NamedParameterStatement;
}
