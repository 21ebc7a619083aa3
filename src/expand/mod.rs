//! Placeholder expansion: the statement-planning half of list binding.
//!
//! A statement is written with one numbered placeholder per *declared*
//! parameter (`$1`/`?1`, 1-based). At call time each list parameter needs
//! one placeholder per element, a count only known from the runtime value,
//! and every placeholder after it shifts accordingly. [`expand_placeholders`]
//! performs that rewrite, in the target backend's placeholder style, and
//! reports the total bind count so the binding pass and the SQL text cannot
//! disagree.

mod lexer;

use std::borrow::Cow;
use std::fmt::Write as _;

use lexer::{
    State, closes_dollar_quote, is_block_comment_end, is_block_comment_start,
    is_line_comment_start, scan_number, try_start_dollar_quote,
};

use crate::error::BindError;
use crate::query::QueryParam;

/// Target placeholder style for expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

impl PlaceholderStyle {
    fn prefix(self) -> char {
        match self {
            PlaceholderStyle::Postgres => '$',
            PlaceholderStyle::Sqlite => '?',
        }
    }

    /// The backend's default ceiling on bind values per statement
    /// (PostgreSQL's protocol limit, SQLite's default
    /// `SQLITE_MAX_VARIABLE_NUMBER`). Pair with
    /// [`ExpandOptions::with_max_bind_values`].
    #[must_use]
    pub fn bind_limit(self) -> usize {
        match self {
            PlaceholderStyle::Postgres => 65_535,
            PlaceholderStyle::Sqlite => 32_766,
        }
    }
}

/// Options for one expansion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Placeholder style to emit.
    pub style: PlaceholderStyle,
    /// Refuse statements needing more bind values than this.
    pub max_bind_values: Option<usize>,
}

impl ExpandOptions {
    #[must_use]
    pub fn new(style: PlaceholderStyle) -> Self {
        Self {
            style,
            max_bind_values: None,
        }
    }

    #[must_use]
    pub fn with_max_bind_values(mut self, limit: usize) -> Self {
        self.max_bind_values = Some(limit);
        self
    }
}

/// Result of a successful expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedQuery<'a> {
    /// The rewritten SQL; borrowed when no rewrite was needed.
    pub sql: Cow<'a, str>,
    /// Total bind values the statement now expects.
    pub bind_count: usize,
}

/// Rewrite numbered placeholders so each declared parameter contributes
/// exactly its argument count of placeholders, at absolute positions.
///
/// Placeholder `N` refers to the N-th declared parameter. A scalar reference
/// becomes one placeholder at the parameter's absolute index; a list
/// reference becomes `len` comma-separated placeholders (an empty list
/// emits nothing). Both `$N` and `?N` are recognized on input regardless of
/// the target style, so one query text can serve both backends; bare `?`
/// placeholders are not recognized. String literals, quoted identifiers,
/// comments, and dollar-quoted blocks are left untouched.
///
/// A parameter may be referenced more than once (the same index range is
/// re-emitted; the parameter is still bound once), but every declared
/// parameter must be referenced at least once.
///
/// Returns borrowed SQL when nothing needed rewriting.
///
/// # Errors
///
/// - [`BindError::Placeholder`] for a placeholder with index 0;
/// - [`BindError::MissingParameter`] when a placeholder exceeds the declared
///   parameter count, raised before anything is bound;
/// - [`BindError::UnusedParameter`] when a declared parameter is never
///   referenced;
/// - [`BindError::BindLimit`] when the total bind count exceeds
///   [`ExpandOptions::max_bind_values`].
pub fn expand_placeholders<'a>(
    sql: &'a str,
    params: &[QueryParam],
    options: &ExpandOptions,
) -> Result<ExpandedQuery<'a>, BindError> {
    // Absolute first index per declared parameter, from cumulative counts.
    let mut starts = Vec::with_capacity(params.len());
    let mut bind_count = 0usize;
    for param in params {
        starts.push(bind_count + 1);
        bind_count += param.arg_count();
    }
    if let Some(limit) = options.max_bind_values
        && bind_count > limit
    {
        return Err(BindError::BindLimit {
            required: bind_count,
            limit,
        });
    }

    let mut referenced = vec![false; params.len()];
    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    // Start of the span not yet copied into `out`.
    let mut tail_start = 0;
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment(1);
                    idx += 1;
                }
                b'$' | b'?' => {
                    if b == b'$'
                        && let Some((tag, resume)) = try_start_dollar_quote(bytes, idx)
                    {
                        state = State::DollarQuoted(tag);
                        idx = resume;
                    } else if let Some((number_end, number)) = scan_number(bytes, idx + 1) {
                        let rendered =
                            render_reference(number, params, &starts, &mut referenced, options.style)?;
                        let span = &sql[idx..number_end];
                        if rendered != span {
                            let buf = out.get_or_insert_with(String::new);
                            buf.push_str(&sql[tail_start..idx]);
                            buf.push_str(&rendered);
                            tail_start = number_end;
                        }
                        idx = number_end - 1;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && closes_dollar_quote(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
            }
        }
        idx += 1;
    }

    if let Some(first_unused) = referenced.iter().position(|seen| !seen) {
        return Err(BindError::UnusedParameter(first_unused + 1));
    }

    let sql = match out {
        Some(mut buf) => {
            buf.push_str(&sql[tail_start..]);
            tracing::debug!(bind_count, "expanded statement placeholders");
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    };
    Ok(ExpandedQuery { sql, bind_count })
}

/// Render one placeholder reference as the parameter's absolute index range.
fn render_reference(
    number: usize,
    params: &[QueryParam],
    starts: &[usize],
    referenced: &mut [bool],
    style: PlaceholderStyle,
) -> Result<String, BindError> {
    if number == 0 {
        return Err(BindError::Placeholder(
            "placeholder indices are 1-based; found index 0".into(),
        ));
    }
    let Some(param) = params.get(number - 1) else {
        return Err(BindError::MissingParameter(number));
    };
    referenced[number - 1] = true;

    let first = starts[number - 1];
    let mut rendered = String::new();
    for (offset, absolute) in (first..first + param.arg_count()).enumerate() {
        if offset > 0 {
            rendered.push(',');
        }
        rendered.push(style.prefix());
        let _ = write!(rendered, "{absolute}");
    }
    Ok(rendered)
}
