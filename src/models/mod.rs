pub mod candidate;
pub mod page;
pub mod query;
