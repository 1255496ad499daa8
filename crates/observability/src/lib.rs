//! Tracing/logging setup shared by every binary.

/// Initialize process-wide logging.
///
/// The output format comes from `LOG_FORMAT` (JSON unless it says
/// `pretty`); the filter from `RUST_LOG` (default `info`). Safe to call
/// multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use tracing::{LogFormat, UnknownLogFormat};
