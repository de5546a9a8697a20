//! Tracing/logging setup shared by ledger binaries.

/// Initialize process-wide tracing using `RUST_LOG` and `LEDGER_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
