use crate::driver::DriverError;

/// Error types for sqlx-named-statement
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The driver could not prepare the rewritten query
    #[error("Failed to prepare statement: {0}")]
    Prepare(#[source] DriverError),

    /// The connection could not be re-established
    #[error("Failed to reset connection: {0}")]
    Reconnect(#[source] DriverError),

    /// Query or update execution failed; the statement is now stale
    #[error("Statement execution failed: {0}")]
    Execution(#[source] DriverError),

    /// Re-preparing with a fresh connection failed after a first attempt had already failed
    #[error("Statement recovery failed: {source} (after: {initial})")]
    Recovery {
        initial: Box<Error>,
        #[source]
        source: Box<Error>,
    },

    /// The statement has no live handle; `prepare` must succeed first
    #[error("Statement is not prepared")]
    NotPrepared,

    /// Any other error reported by the statement handle
    #[error("Driver error: {0}")]
    Driver(#[source] DriverError),

    /// Error from SQLx database operations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The blocking runtime could not be started
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was raised by the reconnect step, either directly or as the final
    /// cause of a failed recovery.
    pub fn is_reconnect(&self) -> bool {
        match self {
            Error::Reconnect(_) => true,
            Error::Recovery { source, .. } => source.is_reconnect(),
            _ => false,
        }
    }
}

/// Result type alias for sqlx-named-statement operations
pub type Result<T> = std::result::Result<T, Error>;
