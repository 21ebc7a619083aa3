//! SQLite element binder and statement helpers, on top of `rusqlite`.

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, Statement, ToSql};

use crate::bind::{BindCursor, BindValue};
use crate::error::BindError;
use crate::expand::{ExpandOptions, PlaceholderStyle};
use crate::query::{QueryAndParams, bind_params};
use crate::value::ParamValue;

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            ParamValue::Int(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            ParamValue::Float(f) => ToSqlOutput::Owned(Value::Real(*f)),
            ParamValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            ParamValue::Bool(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            ParamValue::Timestamp(dt) => {
                ToSqlOutput::Owned(Value::Text(dt.format("%F %T%.f").to_string()))
            }
            ParamValue::Null => ToSqlOutput::Owned(Value::Null),
            ParamValue::Json(jval) => ToSqlOutput::Owned(Value::Text(jval.to_string())),
            ParamValue::Blob(bytes) => ToSqlOutput::Borrowed(ValueRef::Blob(bytes)),
        })
    }
}

/// Anything `rusqlite` can serialize binds directly at a placeholder index.
impl<'conn, T> BindValue<Statement<'conn>> for T
where
    T: ToSql,
{
    fn bind_to(&self, statement: &mut Statement<'conn>, index: usize) -> Result<(), BindError> {
        statement.raw_bind_parameter(index, self)?;
        Ok(())
    }
}

/// Expand placeholders for SQLite, prepare the statement, and bind every
/// parameter through one cursor.
///
/// The returned statement is fully bound; run it with `raw_query` or
/// `raw_execute`.
///
/// # Errors
///
/// Returns [`BindError`] if expansion fails (see
/// [`expand_placeholders`](crate::expand::expand_placeholders)), the
/// statement cannot be prepared, or a bind is rejected. On a bind failure
/// the statement is dropped rather than returned.
pub fn prepare_and_bind<'conn>(
    conn: &'conn Connection,
    qp: &QueryAndParams,
) -> Result<Statement<'conn>, BindError> {
    let expanded = qp.expand_with(&ExpandOptions::new(PlaceholderStyle::Sqlite))?;
    let mut statement = conn.prepare(expanded.sql.as_ref())?;
    let mut cursor = BindCursor::new();
    bind_params(&mut statement, &qp.params, &mut cursor)?;
    Ok(statement)
}

/// Run a DML statement through the expand-prepare-bind pipeline and return
/// the number of affected rows.
///
/// # Errors
///
/// Returns [`BindError`] on expansion, preparation, bind, or execution
/// failure.
pub fn execute(conn: &Connection, qp: &QueryAndParams) -> Result<usize, BindError> {
    let mut statement = prepare_and_bind(conn, qp)?;
    Ok(statement.raw_execute()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn select_one(conn: &Connection, value: ParamValue) -> rusqlite::Result<Value> {
        let mut statement = conn.prepare("SELECT ?1")?;
        statement.raw_bind_parameter(1, value)?;
        let mut rows = statement.raw_query();
        let row = rows.next()?.expect("one row");
        row.get(0)
    }

    #[test]
    fn param_values_map_to_native_sqlite_types() {
        let conn = Connection::open_in_memory().unwrap();

        assert_eq!(
            select_one(&conn, ParamValue::Int(5)).unwrap(),
            Value::Integer(5)
        );
        assert_eq!(
            select_one(&conn, ParamValue::Bool(true)).unwrap(),
            Value::Integer(1)
        );
        assert_eq!(
            select_one(&conn, ParamValue::Text("abc".into())).unwrap(),
            Value::Text("abc".into())
        );
        assert_eq!(select_one(&conn, ParamValue::Null).unwrap(), Value::Null);
        assert_eq!(
            select_one(&conn, ParamValue::Blob(vec![1, 2, 3])).unwrap(),
            Value::Blob(vec![1, 2, 3])
        );
    }

    #[test]
    fn timestamps_render_as_sortable_text() {
        let conn = Connection::open_in_memory().unwrap();
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 250)
            .unwrap();

        assert_eq!(
            select_one(&conn, ParamValue::Timestamp(dt)).unwrap(),
            Value::Text("2024-01-02 03:04:05.250".into())
        );
    }

    #[test]
    fn json_renders_as_text() {
        let conn = Connection::open_in_memory().unwrap();
        let json = serde_json::json!({"k": [1, 2]});

        assert_eq!(
            select_one(&conn, ParamValue::Json(json)).unwrap(),
            Value::Text("{\"k\":[1,2]}".into())
        );
    }
}
