use crate::config::ConfigError;
use crate::parking::{SlotType, TicketId};
use crate::telemetry::TelemetryError;
use std::fmt;

/// Recoverable outcomes of park/unpark requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParkingError {
    #[error("no {} slot available on any floor", .slot_type.label())]
    SlotUnavailable { slot_type: SlotType },
    #[error("ticket {ticket_id} is not valid")]
    InvalidTicket { ticket_id: TicketId },
}

/// Failures while wiring the service together at startup.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}
