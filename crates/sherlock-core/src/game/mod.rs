pub mod serialization;
pub mod table;

pub use serialization::{PlayerRow, SuspectRow, TableSnapshot};
pub use table::Table;
