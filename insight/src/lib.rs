//! insight backend library
//!
//! Exposes the router, app state and gateway building blocks so
//! integration tests can drive the full HTTP surface in-process.

pub mod api;
pub mod app_state;
pub mod http;
pub mod init_telemetry;
pub mod services;
pub mod settings;
pub mod stop_flag;

pub use app_state::AppState;
