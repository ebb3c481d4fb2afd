pub mod load;
pub mod movie;

pub use load::{LoadKind, DEFAULT_SEARCH_TERM};
pub use movie::MovieRecord;
