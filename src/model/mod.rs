pub mod entity;
pub mod query;
pub mod records;
pub mod responses;

pub use entity::*;
pub use query::*;
pub use records::*;
pub use responses::*;
