pub mod login_id_filter;
pub mod session_cache;
