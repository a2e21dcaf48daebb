pub mod ai;
pub mod early_warning;
pub mod email;
pub mod health;
pub mod root;
pub mod segments;
