pub mod ai;
pub mod prober;
pub mod supabase;
