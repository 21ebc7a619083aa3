//! Convenient imports for common functionality.

pub use crate::adapter::{CollectionAdapter, ParamAdapter, ScalarAdapter};
pub use crate::bind::{BindCursor, BindValue};
pub use crate::error::BindError;
pub use crate::expand::{
    ExpandOptions, ExpandedQuery, PlaceholderStyle, expand_placeholders,
};
pub use crate::query::{QueryAndParams, QueryParam, bind_params};
pub use crate::value::ParamValue;

#[cfg(feature = "postgres")]
pub use crate::postgres::PgArguments;
