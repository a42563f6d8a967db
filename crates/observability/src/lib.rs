//! Logging setup shared by hrdesk binaries and test harnesses.

/// Subscriber configuration (filters, output format).
pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}

/// Human-readable logs captured by the test harness.
pub fn init_for_tests() {
    subscriber::init_test_writer();
}
