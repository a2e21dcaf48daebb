pub mod http;
pub mod settings;
pub mod version;
