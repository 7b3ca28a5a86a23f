pub mod fetcher;
pub mod repo;
