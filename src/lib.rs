//! Collection-aware parameter binding for SQL prepared statements.
//!
//! A statement like `SELECT ... WHERE id IN (?)` needs one placeholder per
//! element of a runtime list, so neither the SQL text nor the bind sequence
//! can be fixed ahead of time, and the list has to compose with every other
//! parameter bound before and after it. This crate splits the problem the
//! way a statement planner does:
//!
//! - [`expand_placeholders`] rewrites the statement so each declared
//!   parameter contributes exactly its argument count of placeholders, at
//!   absolute positions, in the target backend's style;
//! - [`bind_params`] threads one [`BindCursor`] through every parameter in
//!   declaration order, one bind call per value, so indices never collide or
//!   gap no matter how many lists of whatever sizes appear.
//!
//! The [`sqlite`] and [`postgres`] modules wire the pipeline to `rusqlite`
//! and `tokio-postgres`.
//!
//! ```rust
//! # #[cfg(feature = "sqlite")]
//! # fn main() -> Result<(), sql_inlist::BindError> {
//! use sql_inlist::prelude::*;
//!
//! let conn = rusqlite::Connection::open_in_memory()?;
//! conn.execute_batch(
//!     "CREATE TABLE t (id INTEGER, name TEXT);
//!      INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, 'c');",
//! )?;
//!
//! let qp = QueryAndParams::new(
//!     "SELECT name FROM t WHERE id IN (?1) AND name <> ?2",
//!     vec![QueryParam::list([1i64, 3]), QueryParam::scalar("zzz")],
//! );
//!
//! let mut statement = sql_inlist::sqlite::prepare_and_bind(&conn, &qp)?;
//! let mut rows = statement.raw_query();
//! let mut names = Vec::new();
//! while let Some(row) = rows.next()? {
//!     names.push(row.get::<_, String>(0)?);
//! }
//! assert_eq!(names, ["a", "c"]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "sqlite"))]
//! # fn main() {}
//! ```

pub mod adapter;
pub mod bind;
pub mod error;
pub mod expand;
pub mod prelude;
pub mod query;
pub mod value;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use adapter::{CollectionAdapter, ParamAdapter, ScalarAdapter};
pub use bind::{BindCursor, BindValue};
pub use error::BindError;
pub use expand::{ExpandOptions, ExpandedQuery, PlaceholderStyle, expand_placeholders};
pub use query::{QueryAndParams, QueryParam, bind_params};
pub use value::ParamValue;

#[cfg(feature = "sqlite")]
pub use rusqlite;
#[cfg(feature = "postgres")]
pub use tokio_postgres;
