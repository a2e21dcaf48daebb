/// Version of the insight workspace, taken from the crate metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
