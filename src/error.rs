use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;
#[cfg(feature = "postgres")]
use tokio_postgres;

/// Errors raised while expanding placeholders or binding parameters.
#[derive(Debug, Error)]
pub enum BindError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    /// A placeholder names a parameter that was never supplied. Raised during
    /// expansion, before anything is bound.
    #[error("no parameter supplied for placeholder {0}")]
    MissingParameter(usize),

    /// A supplied parameter is never referenced by the statement. Binding it
    /// would consume bind indices the SQL does not mention.
    #[error("parameter {0} is never referenced in the statement")]
    UnusedParameter(usize),

    /// Malformed placeholder text, e.g. index zero.
    #[error("malformed placeholder: {0}")]
    Placeholder(String),

    /// Expansion would exceed the configured bind-value ceiling.
    #[error("statement requires {required} bind values, limit is {limit}")]
    BindLimit { required: usize, limit: usize },

    /// A value was bound at a non-consecutive index.
    #[error("bind index {index} out of sequence, expected {expected}")]
    OutOfSequence { index: usize, expected: usize },
}
