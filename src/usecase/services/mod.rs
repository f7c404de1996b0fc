pub mod edit_service;
pub mod query_service;
