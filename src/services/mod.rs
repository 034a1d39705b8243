pub mod matcher_service;
pub mod pagination_service;
pub mod query_service;
pub mod remote_service;
pub mod session_service;
pub mod source_service;
