use crate::adapter::ParamAdapter;
use crate::bind::{BindCursor, BindValue};
use crate::error::BindError;

/// Fixed-arity adapter: one value, one placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarAdapter;

impl<S, T> ParamAdapter<S, T> for ScalarAdapter
where
    T: BindValue<S>,
{
    fn variable_arg_count(&self) -> bool {
        false
    }

    fn arg_count(&self, _value: &T) -> usize {
        1
    }

    fn bind(&self, statement: &mut S, value: &T, cursor: &mut BindCursor) -> Result<(), BindError> {
        value.bind_to(statement, cursor.position())?;
        cursor.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::RecordingStatement;

    #[test]
    fn binds_once_and_advances_once() {
        let mut statement = RecordingStatement::default();
        let mut cursor = BindCursor::new();

        let adapter: &dyn ParamAdapter<RecordingStatement, i64> = &ScalarAdapter;
        assert!(!adapter.variable_arg_count());
        assert_eq!(adapter.arg_count(&42), 1);

        adapter.bind(&mut statement, &42, &mut cursor).unwrap();
        assert_eq!(statement.bound, [(1, 42)]);
        assert_eq!(cursor.position(), 2);
    }
}
