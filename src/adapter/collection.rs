use crate::adapter::ParamAdapter;
use crate::bind::{BindCursor, BindValue};
use crate::error::BindError;

/// Variable-arity adapter for collection parameters (`IN`-lists).
///
/// A collection of size N consumes N placeholders and N consecutive cursor
/// indices. Elements are bound in iteration order, one bind call each, with
/// the cursor advancing by one after every successful bind; afterwards the
/// cursor sits exactly N past where it started. An empty collection is
/// valid: zero binds, cursor untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionAdapter;

impl CollectionAdapter {
    /// Single-pass bind for sequences that cannot be restarted.
    ///
    /// The iterator is consumed exactly once, so one-shot sources work. The
    /// caller is responsible for having reported the matching argument count
    /// to the planner beforehand; the value must not change in between.
    ///
    /// # Errors
    ///
    /// Stops at the first element-binder failure; earlier elements stay
    /// bound and the cursor reflects only the bound prefix.
    pub fn bind_iter<S, I>(
        &self,
        statement: &mut S,
        values: I,
        cursor: &mut BindCursor,
    ) -> Result<(), BindError>
    where
        I: IntoIterator,
        I::Item: BindValue<S>,
    {
        for value in values {
            value.bind_to(statement, cursor.position())?;
            cursor.advance();
        }
        Ok(())
    }
}

impl<S, T> ParamAdapter<S, [T]> for CollectionAdapter
where
    T: BindValue<S>,
{
    fn variable_arg_count(&self) -> bool {
        true
    }

    fn arg_count(&self, values: &[T]) -> usize {
        values.len()
    }

    fn bind(
        &self,
        statement: &mut S,
        values: &[T],
        cursor: &mut BindCursor,
    ) -> Result<(), BindError> {
        for value in values {
            value.bind_to(statement, cursor.position())?;
            cursor.advance();
        }
        Ok(())
    }
}
