//! Process-wide logging setup shared by the binaries and tests.

/// Subscriber construction (filters, formatter).
pub mod tracing;

/// Initialize structured logging for the process.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    tracing::init();
}

/// Same as [`init`] but with an explicit default directive used when
/// `RUST_LOG` is unset (e.g. `"billsplit=debug"` in tests).
pub fn init_with_default(directive: &str) {
    tracing::init_with_default(directive);
}
