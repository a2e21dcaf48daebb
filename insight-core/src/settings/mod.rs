pub mod ai;
pub mod api_server;
pub mod rate_limiting;
pub mod supabase;
