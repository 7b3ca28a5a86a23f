pub mod filter;
pub mod query;
pub mod row;
pub mod word;
