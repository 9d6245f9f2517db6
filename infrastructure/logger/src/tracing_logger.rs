use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Target every business-layer message is emitted under, so
/// `RUST_LOG=shopping=debug` isolates use-case logging.
pub const LOG_TARGET: &str = "shopping";

/// `Logger` port adapter forwarding to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: LOG_TARGET, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: LOG_TARGET, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: LOG_TARGET, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: LOG_TARGET, "{}", message);
    }
}
