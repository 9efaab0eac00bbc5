mod column_slice;
mod predicate;
mod slice_query;

pub use column_slice::ColumnSlice;
pub use predicate::{DEFAULT_SLICE_COUNT, SlicePredicate, SliceRange};
pub use slice_query::{ColumnQuery, CountQuery, SliceQuery};
