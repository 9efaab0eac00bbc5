mod column;
mod row;

pub use column::Column;
pub use row::Row;
