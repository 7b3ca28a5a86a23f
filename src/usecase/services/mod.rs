pub mod debounce;
pub mod edit_service;
pub mod filter_state;
pub mod import_service;
pub mod pagination;
pub mod pipeline;
pub mod query_service;
pub mod table;
