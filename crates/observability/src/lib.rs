//! Process-wide tracing setup shared by the binaries.

pub mod tracing;

pub use tracing::LogFormat;

/// Initialize tracing from `RUST_LOG` and `VETFORUM_LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    let format = std::env::var("VETFORUM_LOG_FORMAT")
        .map(|v| LogFormat::from_env_value(&v))
        .unwrap_or_default();
    tracing::init(format);
}
