//! PostgreSQL element binder and statement helpers, on top of
//! `tokio-postgres`.
//!
//! The wire protocol takes every bind value at execute time, so the
//! "prepared statement handle" on this backend is [`PgArguments`], an
//! ordered buffer that enforces the consecutive-index contract and hands
//! `tokio_postgres` its parameter slice.

use std::borrow::Cow;
use std::error::Error;

use tokio_postgres::Client;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::bind::{BindCursor, BindValue};
use crate::error::BindError;
use crate::expand::{ExpandOptions, PlaceholderStyle};
use crate::query::{QueryAndParams, bind_params};
use crate::value::ParamValue;

impl ToSql for ParamValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            ParamValue::Int(i) => (*i).to_sql(ty, out),
            ParamValue::Float(f) => (*f).to_sql(ty, out),
            ParamValue::Text(s) => s.to_sql(ty, out),
            ParamValue::Bool(b) => (*b).to_sql(ty, out),
            ParamValue::Timestamp(dt) => dt.to_sql(ty, out),
            ParamValue::Null => Ok(IsNull::Yes),
            ParamValue::Json(jval) => jval.to_sql(ty, out),
            ParamValue::Blob(bytes) => bytes.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        match *ty {
            // Integer types
            Type::INT2 | Type::INT4 | Type::INT8 => true,
            // Floating point types
            Type::FLOAT4 | Type::FLOAT8 => true,
            // Text types
            Type::TEXT | Type::VARCHAR | Type::CHAR | Type::NAME => true,
            // Boolean type
            Type::BOOL => true,
            // Date/time types
            Type::TIMESTAMP | Type::TIMESTAMPTZ | Type::DATE => true,
            // JSON types
            Type::JSON | Type::JSONB => true,
            // Binary data
            Type::BYTEA => true,
            _ => false,
        }
    }

    to_sql_checked!();
}

/// Ordered bind buffer standing in for the prepared statement during the
/// binding pass.
///
/// Values must arrive at consecutive 1-based indices; anything else is a
/// cursor-contract violation and is rejected before it can silently
/// misalign the statement.
#[derive(Debug, Default)]
pub struct PgArguments {
    values: Vec<ParamValue>,
}

impl PgArguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append `value` as bind index `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::OutOfSequence`] unless `index` is exactly one
    /// past the last accepted value.
    pub fn push_at(&mut self, index: usize, value: ParamValue) -> Result<(), BindError> {
        let expected = self.values.len() + 1;
        if index != expected {
            return Err(BindError::OutOfSequence { index, expected });
        }
        self.values.push(value);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the buffer as the parameter slice `tokio_postgres` executes
    /// with.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}

/// Anything convertible to a [`ParamValue`] binds into the argument buffer.
impl<T> BindValue<PgArguments> for T
where
    T: Clone + Into<ParamValue>,
{
    fn bind_to(&self, statement: &mut PgArguments, index: usize) -> Result<(), BindError> {
        statement.push_at(index, self.clone().into())
    }
}

fn expand_and_bind<'q>(qp: &'q QueryAndParams) -> Result<(Cow<'q, str>, PgArguments), BindError> {
    let expanded = qp.expand_with(&ExpandOptions::new(PlaceholderStyle::Postgres))?;
    let mut args = PgArguments::with_capacity(expanded.bind_count);
    let mut cursor = BindCursor::new();
    bind_params(&mut args, &qp.params, &mut cursor)?;
    Ok((expanded.sql, args))
}

/// Run a statement through the expand-prepare-bind pipeline and return the
/// number of affected rows.
///
/// # Errors
///
/// Returns [`BindError`] on expansion, preparation, bind, or execution
/// failure.
pub async fn execute(client: &Client, qp: &QueryAndParams) -> Result<u64, BindError> {
    let (sql, args) = expand_and_bind(qp)?;
    let statement = client.prepare(sql.as_ref()).await?;
    Ok(client.execute(&statement, &args.as_refs()).await?)
}

/// Run a query through the expand-prepare-bind pipeline and return its rows.
///
/// # Errors
///
/// Returns [`BindError`] on expansion, preparation, bind, or execution
/// failure.
pub async fn query(
    client: &Client,
    qp: &QueryAndParams,
) -> Result<Vec<tokio_postgres::Row>, BindError> {
    let (sql, args) = expand_and_bind(qp)?;
    let statement = client.prepare(sql.as_ref()).await?;
    Ok(client.query(&statement, &args.as_refs()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParam;

    #[test]
    fn push_at_enforces_consecutive_indices() {
        let mut args = PgArguments::new();
        args.push_at(1, ParamValue::Int(1)).unwrap();
        args.push_at(2, ParamValue::Int(2)).unwrap();

        let err = args.push_at(4, ParamValue::Int(4)).unwrap_err();
        assert!(matches!(
            err,
            BindError::OutOfSequence {
                index: 4,
                expected: 3
            }
        ));
        // The rejected value was not buffered.
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn bind_params_fills_the_buffer_in_declaration_order() {
        let params = vec![
            QueryParam::list([10i64, 20]),
            QueryParam::scalar("x"),
            QueryParam::list([30i64]),
        ];
        let mut args = PgArguments::new();
        let mut cursor = BindCursor::new();

        bind_params(&mut args, &params, &mut cursor).unwrap();

        assert_eq!(cursor.position(), 5);
        assert_eq!(args.len(), 4);
        assert_eq!(args.as_refs().len(), 4);
    }

    #[test]
    fn expand_and_bind_agree_on_count() {
        let qp = QueryAndParams::new(
            "SELECT * FROM t WHERE id IN ($1) AND name = $2",
            vec![QueryParam::list([7i64, 8, 9]), QueryParam::scalar("n")],
        );
        let (sql, args) = expand_and_bind(&qp).unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE id IN ($1,$2,$3) AND name = $4");
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn accepts_covers_supported_types() {
        assert!(<ParamValue as ToSql>::accepts(&Type::INT8));
        assert!(<ParamValue as ToSql>::accepts(&Type::TEXT));
        assert!(<ParamValue as ToSql>::accepts(&Type::JSONB));
        assert!(!<ParamValue as ToSql>::accepts(&Type::UUID));
    }
}
