//! Process-wide sink for operational messages.
//!
//! Parking components report noteworthy events (a full floor, a released slot,
//! a rejected ticket) through [`logger()`]. Unless another sink is installed
//! before first use, messages go to `tracing` at info level.

use std::sync::OnceLock;

use tracing::info;

/// Fire-and-forget message sink. Implementations must never fail the caller.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Default sink forwarding every message to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        info!(target: "parking", "{message}");
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
}

static LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();

/// The process-wide logger, created on first access.
pub fn logger() -> &'static dyn Logger {
    LOGGER.get_or_init(|| Box::new(TracingLogger)).as_ref()
}

/// Replace the default sink. Only succeeds before anything has logged.
pub fn install(sink: Box<dyn Logger>) -> Result<(), LoggerError> {
    LOGGER.set(sink).map_err(|_| LoggerError::AlreadyInitialized)
}
