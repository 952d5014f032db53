//! Tables, rows and the secondary index.

mod index;
mod row;
#[allow(clippy::module_inception)]
mod table;

pub use index::SecondaryIndex;
pub use row::{Row, RowId, ID_FIELD};
pub use table::Table;
