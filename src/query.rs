use crate::adapter::{CollectionAdapter, ParamAdapter, ScalarAdapter};
use crate::bind::{BindCursor, BindValue};
use crate::error::BindError;
use crate::expand::{ExpandOptions, ExpandedQuery, PlaceholderStyle, expand_placeholders};
use crate::value::ParamValue;

/// One declared query parameter: a single value or an ordered list.
///
/// A placeholder in the statement text refers to a declared parameter by
/// position; expansion turns a `List` reference into one placeholder per
/// element, and binding dispatches to the matching adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    /// One value, one placeholder.
    Scalar(ParamValue),
    /// An ordered list of values, one placeholder per element.
    List(Vec<ParamValue>),
}

impl QueryParam {
    /// Declare a scalar parameter.
    pub fn scalar(value: impl Into<ParamValue>) -> Self {
        QueryParam::Scalar(value.into())
    }

    /// Declare a list parameter from any ordered sequence of values.
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParamValue>,
    {
        QueryParam::List(values.into_iter().map(Into::into).collect())
    }

    /// Number of placeholders this parameter consumes.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        match self {
            QueryParam::Scalar(_) => 1,
            QueryParam::List(values) => values.len(),
        }
    }

    /// True when the placeholder count depends on the runtime value.
    #[must_use]
    pub fn variable_arg_count(&self) -> bool {
        matches!(self, QueryParam::List(_))
    }

    /// Bind this parameter at the cursor position, advancing the cursor once
    /// per bound value.
    ///
    /// # Errors
    ///
    /// Propagates the first element-binder failure; values bound so far stay
    /// bound and the statement must be discarded by the caller.
    pub fn bind_into<S>(&self, statement: &mut S, cursor: &mut BindCursor) -> Result<(), BindError>
    where
        ParamValue: BindValue<S>,
    {
        match self {
            QueryParam::Scalar(value) => ScalarAdapter.bind(statement, value, cursor),
            QueryParam::List(values) => CollectionAdapter.bind(statement, values.as_slice(), cursor),
        }
    }
}

/// Bind every parameter in declaration order through one shared cursor.
///
/// Indices never collide or gap regardless of how many list parameters of
/// varying sizes appear, or in what order.
///
/// # Errors
///
/// Stops at the first failure; the statement is left partially bound.
pub fn bind_params<S>(
    statement: &mut S,
    params: &[QueryParam],
    cursor: &mut BindCursor,
) -> Result<(), BindError>
where
    ParamValue: BindValue<S>,
{
    for param in params {
        tracing::trace!(
            index = cursor.position(),
            count = param.arg_count(),
            "binding parameter"
        );
        param.bind_into(statement, cursor)?;
    }
    Ok(())
}

/// A SQL string and its declared parameters bundled together.
///
/// Keeping the two in one place means expansion and binding cannot drift
/// apart:
/// ```rust
/// use sql_inlist::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "SELECT * FROM t WHERE id IN ($1) AND flag = $2",
///     vec![QueryParam::list([10i64, 20, 30]), QueryParam::scalar(true)],
/// );
/// let expanded = qp.expand(PlaceholderStyle::Postgres)?;
/// assert_eq!(
///     expanded.sql,
///     "SELECT * FROM t WHERE id IN ($1,$2,$3) AND flag = $4"
/// );
/// assert_eq!(expanded.bind_count, 4);
/// # Ok::<(), sql_inlist::BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryAndParams {
    /// The SQL query string, with one numbered placeholder per parameter.
    pub query: String,
    /// The declared parameters, in placeholder-number order.
    pub params: Vec<QueryParam>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters.
    pub fn new(query: impl Into<String>, params: Vec<QueryParam>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters.
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }

    /// Total bind values across all parameters.
    #[must_use]
    pub fn total_arg_count(&self) -> usize {
        self.params.iter().map(QueryParam::arg_count).sum()
    }

    /// Expand placeholders for the target style with default options.
    ///
    /// # Errors
    ///
    /// See [`expand_placeholders`].
    pub fn expand(&self, style: PlaceholderStyle) -> Result<ExpandedQuery<'_>, BindError> {
        expand_placeholders(&self.query, &self.params, &ExpandOptions::new(style))
    }

    /// Expand placeholders with explicit options.
    ///
    /// # Errors
    ///
    /// See [`expand_placeholders`].
    pub fn expand_with(&self, options: &ExpandOptions) -> Result<ExpandedQuery<'_>, BindError> {
        expand_placeholders(&self.query, &self.params, options)
    }
}
