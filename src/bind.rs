use crate::error::BindError;

/// The shared bind-index cursor for one statement-binding pass.
///
/// Placeholder indices are global to a statement, not per-parameter, so one
/// cursor is threaded through every parameter in declaration order. Each
/// bound value consumes exactly one index; after binding a parameter of N
/// values the cursor has advanced by exactly N.
///
/// The cursor advances only after a value binds successfully, so on failure
/// it reflects the successfully bound prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindCursor {
    next: usize,
}

impl BindCursor {
    /// Cursor at the first usable index. Both supported backends start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Cursor at an arbitrary starting index.
    #[must_use]
    pub fn starting_at(first: usize) -> Self {
        Self { next: first }
    }

    /// The next unused bind index.
    #[must_use]
    pub fn position(&self) -> usize {
        self.next
    }

    /// Consume the current index.
    pub fn advance(&mut self) {
        self.next += 1;
    }
}

impl Default for BindCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds one value into a prepared statement at a given 1-based index.
///
/// `S` is the statement handle: `rusqlite::Statement` for SQLite, or
/// [`PgArguments`](crate::postgres::PgArguments) for PostgreSQL, where the
/// driver takes every value at execute time. Implementations exist for the
/// driver-native value types and for [`ParamValue`](crate::ParamValue), so
/// adapters monomorphize per element type instead of inspecting types at
/// run time.
pub trait BindValue<S> {
    /// Bind `self` into `statement` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when the underlying driver rejects the value or
    /// the index.
    fn bind_to(&self, statement: &mut S, index: usize) -> Result<(), BindError>;
}
