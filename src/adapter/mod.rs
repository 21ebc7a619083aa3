//! Parameter adapters: how a declared parameter participates in binding.
//!
//! An adapter answers two questions for the statement planner: how many
//! placeholders does this parameter consume, and how is it bound. Scalars
//! always consume one; collections consume one per element, a count only
//! known at call time.

mod collection;
mod scalar;

pub use collection::CollectionAdapter;
pub use scalar::ScalarAdapter;

use crate::bind::BindCursor;
use crate::error::BindError;

/// Adapts one declared parameter of value type `V` for statement handle `S`.
pub trait ParamAdapter<S, V: ?Sized> {
    /// True when the placeholder count depends on the runtime value. The
    /// planner must then size the placeholder list from [`arg_count`]
    /// instead of assuming a single placeholder.
    ///
    /// [`arg_count`]: ParamAdapter::arg_count
    fn variable_arg_count(&self) -> bool;

    /// Number of placeholders this parameter requires. Pure read.
    fn arg_count(&self, value: &V) -> usize;

    /// Bind `value` at the cursor position, advancing the cursor once per
    /// bound element.
    ///
    /// # Errors
    ///
    /// Propagates the first element-binder failure immediately; values bound
    /// so far stay bound and the statement must be discarded by the caller.
    fn bind(&self, statement: &mut S, value: &V, cursor: &mut BindCursor) -> Result<(), BindError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::bind::BindValue;
    use crate::error::BindError;

    /// Records (index, value) pairs in bind order; fails on request.
    #[derive(Debug, Default)]
    pub struct RecordingStatement {
        pub bound: Vec<(usize, i64)>,
        pub fail_on_value: Option<i64>,
    }

    impl BindValue<RecordingStatement> for i64 {
        fn bind_to(&self, statement: &mut RecordingStatement, index: usize) -> Result<(), BindError> {
            if statement.fail_on_value == Some(*self) {
                return Err(BindError::Placeholder(format!("refused value {self}")));
            }
            statement.bound.push((index, *self));
            Ok(())
        }
    }
}
