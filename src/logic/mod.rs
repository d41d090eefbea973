pub mod assemble;
pub mod catalog;
pub mod compose;
pub mod execute;
pub mod lookup;
pub mod validate;

pub use catalog::Catalog;
pub use execute::{Lookup, QueryExecutor};
pub use validate::{parse_id, validate_year, validate_year_range, YearBounds, FIRST_SEASON};
